//! Candito 6-Week Strength: every week hand-authored, selected by explicit
//! branching. The schedule narrows from four volume days to two peak days
//! and ends in a max test, so no single formula covers it.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::cycle_week;
use crate::models::{Exercise, PrescribedSet, RepMaxes, WorkoutDay};
use crate::repmax::MaxCalculator;

const CYCLE_WEEKS: u32 = 6;

pub fn generate(maxes: &RepMaxes, week: u32) -> Vec<WorkoutDay> {
    match cycle_week(week, CYCLE_WEEKS) {
        2 => volume_week(maxes, dec!(0.825)),
        3 => ladder_week(maxes),
        4 => acclimation_week(maxes),
        5 => intensity_week(maxes),
        6 => test_week(maxes),
        _ => volume_week(maxes, dec!(0.80)),
    }
}

fn pct_set(max: Decimal, pct: Decimal, reps: u32) -> PrescribedSet {
    PrescribedSet::load(MaxCalculator::round5(max * pct), reps)
}

fn pct_sets(max: Decimal, pct: Decimal, sets: usize, reps: u32) -> Vec<PrescribedSet> {
    vec![pct_set(max, pct, reps); sets]
}

/// Weeks 1-2: four days of sixes at a flat percentage, heavy days carrying
/// more sets than control days
fn volume_week(maxes: &RepMaxes, pct: Decimal) -> Vec<WorkoutDay> {
    vec![
        WorkoutDay::new(
            "Day 1",
            "Heavy Lower",
            vec![
                Exercise::structured("Squat", pct_sets(maxes.squat, pct, 4, 6)),
                Exercise::structured("Deadlift", pct_sets(maxes.deadlift, pct, 2, 6)),
            ],
        ),
        WorkoutDay::new(
            "Day 2",
            "Heavy Upper",
            vec![
                Exercise::structured("Bench Press", pct_sets(maxes.bench, pct, 4, 6)),
                Exercise::structured("Overhead Press", pct_sets(maxes.ohp, pct, 2, 6)),
                Exercise::note("Upper Back", "4x8 rows, moderate effort"),
            ],
        ),
        WorkoutDay::new(
            "Day 3",
            "Control Lower",
            vec![
                Exercise::structured("Squat", pct_sets(maxes.squat, pct, 3, 6)),
                Exercise::structured("Deadlift", pct_sets(maxes.deadlift, pct, 1, 6)),
            ],
        ),
        WorkoutDay::new(
            "Day 4",
            "Control Upper",
            vec![
                Exercise::structured("Bench Press", pct_sets(maxes.bench, pct, 3, 6)),
                Exercise::structured("Overhead Press", pct_sets(maxes.ohp, pct, 2, 6)),
            ],
        ),
    ]
}

/// Week 3: 6/4/2 ladders at 80/85/90%
fn ladder_week(maxes: &RepMaxes) -> Vec<WorkoutDay> {
    let ladder = |max: Decimal| {
        vec![
            pct_set(max, dec!(0.80), 6),
            pct_set(max, dec!(0.85), 4),
            pct_set(max, dec!(0.90), 2),
        ]
    };
    vec![
        WorkoutDay::new(
            "Day 1",
            "Lower",
            vec![
                Exercise::structured("Squat", ladder(maxes.squat)),
                Exercise::structured("Deadlift", ladder(maxes.deadlift)),
            ],
        ),
        WorkoutDay::new(
            "Day 2",
            "Upper",
            vec![
                Exercise::structured("Bench Press", ladder(maxes.bench)),
                Exercise::structured("Overhead Press", ladder(maxes.ohp)),
            ],
        ),
        WorkoutDay::new(
            "Day 3",
            "Full Body",
            vec![
                Exercise::structured("Squat", ladder(maxes.squat)),
                Exercise::structured("Bench Press", ladder(maxes.bench)),
            ],
        ),
    ]
}

/// Week 4: heavy acclimation triples at 87.5/90/92.5%
fn acclimation_week(maxes: &RepMaxes) -> Vec<WorkoutDay> {
    let triples = |max: Decimal| {
        vec![
            pct_set(max, dec!(0.875), 3),
            pct_set(max, dec!(0.90), 3),
            pct_set(max, dec!(0.925), 3),
        ]
    };
    vec![
        WorkoutDay::new(
            "Day 1",
            "Lower",
            vec![
                Exercise::structured("Squat", triples(maxes.squat)),
                Exercise::structured("Deadlift", triples(maxes.deadlift)),
            ],
        ),
        WorkoutDay::new(
            "Day 2",
            "Upper",
            vec![
                Exercise::structured("Bench Press", triples(maxes.bench)),
                Exercise::structured("Overhead Press", triples(maxes.ohp)),
            ],
        ),
        WorkoutDay::new(
            "Day 3",
            "Full Body",
            vec![
                Exercise::structured("Squat", triples(maxes.squat)),
                Exercise::structured("Bench Press", triples(maxes.bench)),
            ],
        ),
    ]
}

/// Week 5: two peak-intensity days of doubles and a single
fn intensity_week(maxes: &RepMaxes) -> Vec<WorkoutDay> {
    let peak = |max: Decimal| {
        vec![
            pct_set(max, dec!(0.925), 2),
            pct_set(max, dec!(0.925), 2),
            pct_set(max, dec!(0.95), 1),
        ]
    };
    vec![
        WorkoutDay::new(
            "Day 1",
            "Lower",
            vec![
                Exercise::structured("Squat", peak(maxes.squat)),
                Exercise::structured("Deadlift", peak(maxes.deadlift)),
            ],
        ),
        WorkoutDay::new(
            "Day 2",
            "Upper",
            vec![
                Exercise::structured("Bench Press", peak(maxes.bench)),
                Exercise::structured(
                    "Dips (optional)",
                    vec![PrescribedSet::bodyweight(8); 3],
                ),
            ],
        ),
    ]
}

/// Week 6: a light deload session, then test day working up to new maxes
fn test_week(maxes: &RepMaxes) -> Vec<WorkoutDay> {
    let deload = |max: Decimal| pct_sets(max, dec!(0.60), 2, 5);
    let test = |max: Decimal| vec![PrescribedSet::rep_max(MaxCalculator::round5(max), 1)];
    vec![
        WorkoutDay::new(
            "Day 1",
            "Deload",
            vec![
                Exercise::structured("Squat", deload(maxes.squat)),
                Exercise::structured("Bench Press", deload(maxes.bench)),
                Exercise::structured("Deadlift", deload(maxes.deadlift)),
            ],
        ),
        WorkoutDay::new(
            "Day 2",
            "Max Test",
            vec![
                Exercise::structured("Squat", test(maxes.squat)),
                Exercise::structured("Bench Press", test(maxes.bench)),
                Exercise::structured("Deadlift", test(maxes.deadlift)),
            ],
        ),
    ]
}
