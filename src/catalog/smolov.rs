//! Smolov Jr: a three-week bench specialization block.
//!
//! Four fixed sessions per week at rising set counts and percentages. Each
//! week adds a flat 2.5 units on top of the percentage-derived base, so
//! week-2 weights intentionally land off the 5-unit grid; that offset is
//! the program's written progression and is preserved, not re-rounded.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::cycle_week;
use crate::models::{Exercise, PrescribedSet, RepMaxes, WorkoutDay};
use crate::repmax::MaxCalculator;

/// (sets, reps, percentage of the bench 1RM) for the four weekly sessions
const SESSIONS: [(u32, u32, Decimal); 4] = [
    (6, 6, dec!(0.70)),
    (7, 5, dec!(0.75)),
    (8, 4, dec!(0.80)),
    (10, 3, dec!(0.85)),
];

const WEEKLY_STEP: Decimal = dec!(2.5);
const CYCLE_WEEKS: u32 = 3;

pub fn junior_bench(maxes: &RepMaxes, week: u32) -> Vec<WorkoutDay> {
    let week = cycle_week(week, CYCLE_WEEKS);
    let offset = WEEKLY_STEP * Decimal::from(week - 1);

    SESSIONS
        .iter()
        .enumerate()
        .map(|(i, (sets, reps, pct))| {
            let weight = MaxCalculator::round5(maxes.bench * pct) + offset;
            WorkoutDay::new(
                format!("Day {}", i + 1),
                "Bench Press",
                vec![Exercise::structured(
                    "Bench Press",
                    vec![PrescribedSet::load(weight, *reps); *sets as usize],
                )],
            )
        })
        .collect()
}
