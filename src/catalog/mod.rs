//! Program catalog: a registry of named periodization methodologies, each a
//! pure function from `(rep maxes, week)` to a list of training days.
//!
//! Generators never touch the clock, randomness, or I/O; identical inputs
//! produce identical output. Week-dependent programs wrap out-of-range week
//! numbers back into their cycle (week 5 of a 4-week cycle repeats week 1),
//! so every generator is total over any week value.

pub mod calgary;
pub mod candito;
pub mod gzcl;
pub mod juggernaut;
pub mod madcow;
pub mod nsuns;
pub mod sheiko;
pub mod smolov;
pub mod stronglifts;
pub mod texas;
pub mod wendler;

use crate::models::{ProgramLevel, RepMaxes, WorkoutDay};
use thiserror::Error;
use tracing::debug;

/// Catalog lookup errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Unknown program key: {key}")]
    UnknownProgram { key: String },
}

/// A catalog entry: program metadata plus the pure generator function
pub struct ProgramDefinition {
    /// Stable lookup key, matched case-insensitively
    pub key: &'static str,
    pub name: &'static str,
    pub level: ProgramLevel,
    pub days_per_week: u32,
    /// Weeks in one full cycle; 1 for week-invariant programs
    pub cycle_weeks: u32,
    /// Whether prescriptions vary with the week argument
    pub weekly: bool,
    /// Advertised running length, where the methodology defines an end.
    /// Week-invariant linear-progression programs run until the lifter
    /// stalls and carry no fixed length.
    pub total_weeks: Option<u32>,
    /// Whether percentages are taken off a 90% training max rather than the
    /// raw one-rep max
    pub uses_training_max: bool,
    pub generate: fn(&RepMaxes, u32) -> Vec<WorkoutDay>,
}

/// Every program the engine knows how to generate
pub const PROGRAMS: &[ProgramDefinition] = &[
    ProgramDefinition {
        key: "531",
        name: "Wendler 5/3/1",
        level: ProgramLevel::Intermediate,
        days_per_week: 4,
        cycle_weeks: 4,
        weekly: true,
        total_weeks: None,
        uses_training_max: true,
        generate: wendler::five31,
    },
    ProgramDefinition {
        key: "531bbb",
        name: "5/3/1 Boring But Big",
        level: ProgramLevel::Intermediate,
        days_per_week: 4,
        cycle_weeks: 4,
        weekly: true,
        total_weeks: None,
        uses_training_max: true,
        generate: wendler::five31_bbb,
    },
    ProgramDefinition {
        key: "531fsl",
        name: "5/3/1 First Set Last",
        level: ProgramLevel::Intermediate,
        days_per_week: 4,
        cycle_weeks: 4,
        weekly: true,
        total_weeks: None,
        uses_training_max: true,
        generate: wendler::five31_fsl,
    },
    ProgramDefinition {
        key: "nsuns",
        name: "nSuns LP 4-Day",
        level: ProgramLevel::Intermediate,
        days_per_week: 4,
        cycle_weeks: 1,
        weekly: false,
        total_weeks: None,
        uses_training_max: true,
        generate: nsuns::generate,
    },
    ProgramDefinition {
        key: "stronglifts",
        name: "StrongLifts 5x5",
        level: ProgramLevel::Beginner,
        days_per_week: 3,
        cycle_weeks: 1,
        weekly: false,
        total_weeks: None,
        uses_training_max: false,
        generate: stronglifts::generate,
    },
    ProgramDefinition {
        key: "madcow",
        name: "Madcow 5x5",
        level: ProgramLevel::Intermediate,
        days_per_week: 3,
        cycle_weeks: 12,
        weekly: true,
        total_weeks: Some(12),
        uses_training_max: false,
        generate: madcow::generate,
    },
    ProgramDefinition {
        key: "texas",
        name: "Texas Method",
        level: ProgramLevel::Intermediate,
        days_per_week: 3,
        cycle_weeks: 1,
        weekly: false,
        total_weeks: None,
        uses_training_max: false,
        generate: texas::generate,
    },
    ProgramDefinition {
        key: "gzclp",
        name: "GZCLP",
        level: ProgramLevel::Beginner,
        days_per_week: 4,
        cycle_weeks: 1,
        weekly: false,
        total_weeks: None,
        uses_training_max: false,
        generate: gzcl::gzclp,
    },
    ProgramDefinition {
        key: "jt2",
        name: "GZCL Jacked & Tan 2.0",
        level: ProgramLevel::Advanced,
        days_per_week: 4,
        cycle_weeks: 6,
        weekly: true,
        total_weeks: Some(6),
        uses_training_max: false,
        generate: gzcl::jacked_and_tan_2,
    },
    ProgramDefinition {
        key: "smolovjr",
        name: "Smolov Jr (Bench)",
        level: ProgramLevel::Advanced,
        days_per_week: 4,
        cycle_weeks: 3,
        weekly: true,
        total_weeks: Some(3),
        uses_training_max: false,
        generate: smolov::junior_bench,
    },
    ProgramDefinition {
        key: "juggernaut",
        name: "Juggernaut Method",
        level: ProgramLevel::Intermediate,
        days_per_week: 4,
        cycle_weeks: 16,
        weekly: true,
        total_weeks: Some(16),
        uses_training_max: true,
        generate: juggernaut::generate,
    },
    ProgramDefinition {
        key: "candito",
        name: "Candito 6-Week Strength",
        level: ProgramLevel::Intermediate,
        days_per_week: 4,
        cycle_weeks: 6,
        weekly: true,
        total_weeks: Some(6),
        uses_training_max: false,
        generate: candito::generate,
    },
    ProgramDefinition {
        key: "calgary",
        name: "Calgary Barbell 8-Week",
        level: ProgramLevel::Advanced,
        days_per_week: 4,
        cycle_weeks: 8,
        weekly: true,
        total_weeks: Some(8),
        uses_training_max: false,
        generate: calgary::generate,
    },
    ProgramDefinition {
        key: "sheiko",
        name: "Sheiko 4-Week Volume Block",
        level: ProgramLevel::Advanced,
        days_per_week: 3,
        cycle_weeks: 4,
        weekly: true,
        total_weeks: Some(4),
        uses_training_max: false,
        generate: sheiko::generate,
    },
];

/// Look up a program by key, case-insensitively
pub fn find(key: &str) -> Option<&'static ProgramDefinition> {
    PROGRAMS.iter().find(|p| p.key.eq_ignore_ascii_case(key))
}

/// Map an arbitrary week number into `[1, cycle_weeks]`.
///
/// Weeks below 1 snap to 1; weeks past the cycle wrap around, so week 5 of
/// a 4-week cycle repeats week 1. Out-of-range weeks are common when a
/// lifter keeps an assignment running past the written schedule.
pub fn cycle_week(week: u32, cycle_weeks: u32) -> u32 {
    if cycle_weeks == 0 || week < 1 {
        return 1;
    }
    ((week - 1) % cycle_weeks) + 1
}

/// Generate every training day of `key` for the given maxes and week.
///
/// The week defaults to 1 and is ignored entirely by week-invariant
/// programs. Unknown keys fail fast with no partial computation.
pub fn generate_program_workouts(
    key: &str,
    maxes: &RepMaxes,
    week: Option<u32>,
) -> Result<Vec<WorkoutDay>, CatalogError> {
    let program = find(key).ok_or_else(|| CatalogError::UnknownProgram {
        key: key.to_string(),
    })?;

    let week = if program.weekly {
        cycle_week(week.unwrap_or(1), program.cycle_weeks)
    } else {
        1
    };

    let days = (program.generate)(maxes, week);
    debug!(
        "Generated {} days for program '{}' week {}",
        days.len(),
        program.key,
        week
    );
    Ok(days)
}
