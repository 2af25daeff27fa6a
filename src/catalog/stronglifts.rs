//! StrongLifts 5x5: alternating A/B full-body days.
//!
//! Starting weights are half the lifter's max, floored at the empty bar
//! (or a loaded bar for deadlift) because the scheme is calibrated for
//! near-beginners whose true max is unknown. Session-to-session +5
//! progression is managed by the lifter, not the generator, so output is
//! week-invariant.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{Exercise, PrescribedSet, RepMaxes, WorkoutDay};
use crate::repmax::MaxCalculator;

const BAR_FLOOR: Decimal = dec!(45);
const DEADLIFT_FLOOR: Decimal = dec!(95);
/// No row max is collected; everyone starts rows at the same bar weight
const ROW_START: Decimal = dec!(65);

const START_FRACTION: Decimal = dec!(0.50);

pub fn generate(maxes: &RepMaxes, _week: u32) -> Vec<WorkoutDay> {
    let squat = start_weight(maxes.squat, BAR_FLOOR);
    let bench = start_weight(maxes.bench, BAR_FLOOR);
    let ohp = start_weight(maxes.ohp, BAR_FLOOR);
    let deadlift = start_weight(maxes.deadlift, DEADLIFT_FLOOR);

    let workout_a = || {
        vec![
            Exercise::structured("Squat", five_by_five(squat)),
            Exercise::structured("Bench Press", five_by_five(bench)),
            Exercise::structured("Barbell Row", five_by_five(ROW_START)),
        ]
    };
    let workout_b = vec![
        Exercise::structured("Squat", five_by_five(squat)),
        Exercise::structured("Overhead Press", five_by_five(ohp)),
        Exercise::structured("Deadlift", vec![PrescribedSet::load(deadlift, 5)]),
    ];

    vec![
        WorkoutDay::new("Day 1", "Workout A", workout_a()),
        WorkoutDay::new("Day 2", "Workout B", workout_b),
        WorkoutDay::new("Day 3", "Workout A", workout_a()),
    ]
}

fn start_weight(one_rep_max: Decimal, floor: Decimal) -> Decimal {
    MaxCalculator::round5(one_rep_max * START_FRACTION).max(floor)
}

fn five_by_five(weight: Decimal) -> Vec<PrescribedSet> {
    vec![PrescribedSet::load(weight, 5); 5]
}
