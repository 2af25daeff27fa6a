//! SQLite store integration tests
//!
//! Every test runs against a fresh database in a temp directory. The
//! atomic week advance gets the most attention since it is the one write
//! path that combines progression, template snapshots, and the guarded
//! week counter in a single transaction.

use chrono::{Datelike, NaiveDate};
use liftrs::cycle::ProgressionError;
use liftrs::error::LiftrsError;
use liftrs::models::{
    CustomProgram, ProgramLength, ProgressionRule, TemplateExercise, TemplateSet,
};
use liftrs::storage::{StorageError, Store};
use rust_decimal_macros::dec;
use tempfile::TempDir;
use uuid::Uuid;

const OWNER: &str = "athlete-1";

fn open_store(dir: &TempDir) -> Store {
    Store::open(dir.path().join("test.db")).unwrap()
}

fn squat_template() -> Vec<TemplateExercise> {
    vec![TemplateExercise::new(
        "Squat",
        vec![
            TemplateSet::new(dec!(185), 5),
            TemplateSet::new(dec!(185), 5),
        ],
    )]
}

fn squat_rules() -> Vec<ProgressionRule> {
    vec![ProgressionRule {
        exercise_name: "Squat".to_string(),
        base_weight: None,
        increment: Some(dec!(5)),
    }]
}

/// Store a template and a 4-week program over it, returning the program
fn seeded_program(store: &mut Store) -> CustomProgram {
    let template = store
        .store_template(OWNER, "Squat Day", &squat_template())
        .unwrap();
    let program = CustomProgram::new(
        OWNER,
        template.id,
        "Squat LP",
        ProgramLength::FourWeeks,
        squat_rules(),
    );
    store.store_program(&program).unwrap();
    program
}

#[test]
fn test_template_round_trip() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir);

    let stored = store
        .store_template(OWNER, "Squat Day", &squat_template())
        .unwrap();
    let loaded = store.load_template(OWNER, stored.id).unwrap();

    assert_eq!(loaded.id, stored.id);
    assert_eq!(loaded.name, "Squat Day");
    assert_eq!(loaded.exercises, squat_template());
}

#[test]
fn test_program_round_trip() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir);

    let program = seeded_program(&mut store);
    let loaded = store.load_program(OWNER, program.id).unwrap();

    assert_eq!(loaded.name, "Squat LP");
    assert_eq!(loaded.length, ProgramLength::FourWeeks);
    assert_eq!(loaded.current_week, 1);
    assert_eq!(loaded.rules, squat_rules());
    assert_eq!(loaded.template_id, program.template_id);
}

#[test]
fn test_start_next_week_walks_the_whole_program() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir);
    let program = seeded_program(&mut store);

    for expected_week in 1..=4 {
        let started = store.start_next_week(OWNER, program.id).unwrap();
        assert_eq!(started.week, expected_week);
    }

    let finished = store.load_program(OWNER, program.id).unwrap();
    assert_eq!(finished.current_week, 5);
    assert!(finished.is_complete());

    // A fifth start is refused with the program's terminal state
    let err = store.start_next_week(OWNER, program.id).unwrap_err();
    assert!(matches!(
        err,
        LiftrsError::Progression(ProgressionError::ProgramComplete {
            current_week: 5,
            weeks: 4
        })
    ));
}

#[test]
fn test_started_week_snapshots_progressed_weights() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir);
    let program = seeded_program(&mut store);

    store.start_next_week(OWNER, program.id).unwrap();
    let second = store.start_next_week(OWNER, program.id).unwrap();
    assert_eq!(second.week, 2);

    // The derived template holds week 2's weights: 185 + 5
    let derived = store.load_template(OWNER, second.template_id).unwrap();
    assert_eq!(derived.name, "Squat LP week 2");
    for set in &derived.exercises[0].sets {
        assert_eq!(set.weight, dec!(190));
    }
}

#[test]
fn test_start_next_week_rejects_unknown_program() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir);
    seeded_program(&mut store);

    let err = store.start_next_week(OWNER, Uuid::new_v4()).unwrap_err();
    assert!(matches!(
        err,
        LiftrsError::Storage(StorageError::NotFound { .. })
    ));
}

#[test]
fn test_reads_are_owner_scoped() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir);
    let program = seeded_program(&mut store);

    assert!(matches!(
        store.load_program("athlete-2", program.id),
        Err(StorageError::NotFound { .. })
    ));
    assert!(matches!(
        store.load_template("athlete-2", program.template_id),
        Err(StorageError::NotFound { .. })
    ));
    assert!(store.list_programs("athlete-2").unwrap().is_empty());
    assert_eq!(store.list_programs(OWNER).unwrap().len(), 1);
}

#[test]
fn test_reset_rewinds_and_allows_a_rerun() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir);
    let program = seeded_program(&mut store);

    store.start_next_week(OWNER, program.id).unwrap();
    store.start_next_week(OWNER, program.id).unwrap();

    let reset = store.reset_program(OWNER, program.id).unwrap();
    assert_eq!(reset.current_week, 1);

    // The rerun starts over from week 1
    let started = store.start_next_week(OWNER, program.id).unwrap();
    assert_eq!(started.week, 1);
}

#[test]
fn test_reset_unknown_program_is_not_found() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir);

    assert!(matches!(
        store.reset_program(OWNER, Uuid::new_v4()),
        Err(StorageError::NotFound { .. })
    ));
}

#[test]
fn test_recent_workouts_newest_first() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir);
    let program = seeded_program(&mut store);

    for _ in 0..3 {
        store.start_next_week(OWNER, program.id).unwrap();
    }

    let workouts = store.recent_workouts(OWNER, 10).unwrap();
    let weeks: Vec<u32> = workouts.iter().map(|w| w.week).collect();
    assert_eq!(weeks, vec![3, 2, 1]);

    let limited = store.recent_workouts(OWNER, 2).unwrap();
    assert_eq!(limited.len(), 2);
    assert_eq!(limited[0].week, 3);

    assert!(store.recent_workouts("athlete-2", 10).unwrap().is_empty());
}

#[test]
fn test_bodyweight_same_day_replaces() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir);

    let date = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
    store.log_bodyweight(OWNER, date, dec!(180)).unwrap();
    store.log_bodyweight(OWNER, date, dec!(181.5)).unwrap();

    let history = store.bodyweight_history(OWNER, 10).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].weight, dec!(181.5));
}

#[test]
fn test_bodyweight_history_is_chronological() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir);

    // Logged out of order
    for (day, weight) in [(3, dec!(181)), (1, dec!(180)), (2, dec!(180.5))] {
        let date = NaiveDate::from_ymd_opt(2026, 6, day).unwrap();
        store.log_bodyweight(OWNER, date, weight).unwrap();
    }

    let history = store.bodyweight_history(OWNER, 10).unwrap();
    let days: Vec<u32> = history.iter().map(|e| e.date.day()).collect();
    assert_eq!(days, vec![1, 2, 3]);

    // The limit keeps the most recent entries, still oldest first
    let limited = store.bodyweight_history(OWNER, 2).unwrap();
    assert_eq!(limited[0].weight, dec!(180.5));
    assert_eq!(limited[1].weight, dec!(181));
}

#[test]
fn test_assignment_lifecycle() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir);

    assert!(store.load_assignment(OWNER).unwrap().is_none());

    let assigned = store.assign_program(OWNER, "531").unwrap();
    assert_eq!(assigned.current_week, 1);

    for expected in [2, 3, 4, 1] {
        let advanced = store.advance_assignment(OWNER, 4).unwrap();
        assert_eq!(advanced.current_week, expected); // wraps after week 4
    }

    // Reassigning replaces the old assignment and restarts at week 1
    store.assign_program(OWNER, "texas").unwrap();
    let current = store.load_assignment(OWNER).unwrap().unwrap();
    assert_eq!(current.program_key, "texas");
    assert_eq!(current.current_week, 1);
}

#[test]
fn test_advance_without_assignment_is_not_found() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir);

    assert!(matches!(
        store.advance_assignment(OWNER, 4),
        Err(StorageError::NotFound { .. })
    ));
}

#[test]
fn test_state_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("test.db");

    let program_id = {
        let mut store = Store::open(&db_path).unwrap();
        let program = seeded_program(&mut store);
        store.start_next_week(OWNER, program.id).unwrap();
        store.assign_program(OWNER, "531").unwrap();
        store.advance_assignment(OWNER, 4).unwrap();
        program.id
    };

    let store = Store::open(&db_path).unwrap();
    let program = store.load_program(OWNER, program_id).unwrap();
    assert_eq!(program.current_week, 2);
    let assignment = store.load_assignment(OWNER).unwrap().unwrap();
    assert_eq!(assignment.program_key, "531");
    assert_eq!(assignment.current_week, 2);
}
