//! Sheiko-style 4-week volume block: three sessions a week of many small
//! fixed-percentage sets between 50% and 85%, with the competition lifts
//! appearing twice in one session on the double days.
//!
//! Week tables are explicit (volume, intensification, peak volume, taper);
//! Sheiko blocks are written set-by-set and resist any closed formula.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::cycle_week;
use crate::models::{Exercise, PrescribedSet, RepMaxes, WorkoutDay};
use crate::repmax::MaxCalculator;

const CYCLE_WEEKS: u32 = 4;

pub fn generate(maxes: &RepMaxes, week: u32) -> Vec<WorkoutDay> {
    match cycle_week(week, CYCLE_WEEKS) {
        2 => intensification_week(maxes),
        3 => peak_volume_week(maxes),
        4 => taper_week(maxes),
        _ => volume_week(maxes),
    }
}

/// Expand a (percentage, reps, sets) scheme against a lift's max
fn block(max: Decimal, scheme: &[(Decimal, u32, u32)]) -> Vec<PrescribedSet> {
    scheme
        .iter()
        .flat_map(|(pct, reps, sets)| {
            let weight = MaxCalculator::round5(max * *pct);
            std::iter::repeat(PrescribedSet::load(weight, *reps)).take(*sets as usize)
        })
        .collect()
}

fn volume_week(maxes: &RepMaxes) -> Vec<WorkoutDay> {
    vec![
        WorkoutDay::new(
            "Day 1",
            "Squat + Bench",
            vec![
                Exercise::structured(
                    "Bench Press",
                    block(
                        maxes.bench,
                        &[
                            (dec!(0.50), 5, 1),
                            (dec!(0.60), 4, 1),
                            (dec!(0.70), 3, 2),
                            (dec!(0.75), 3, 5),
                        ],
                    ),
                ),
                Exercise::structured(
                    "Squat",
                    block(
                        maxes.squat,
                        &[
                            (dec!(0.50), 5, 1),
                            (dec!(0.60), 4, 1),
                            (dec!(0.70), 3, 2),
                            (dec!(0.75), 3, 5),
                        ],
                    ),
                ),
                Exercise::structured(
                    "Bench Press",
                    block(maxes.bench, &[(dec!(0.55), 4, 1), (dec!(0.65), 4, 4)]),
                ),
                Exercise::note("Accessories", "Flyes and good mornings, 5x8"),
            ],
        ),
        WorkoutDay::new(
            "Day 2",
            "Deadlift + Bench",
            vec![
                Exercise::structured(
                    "Deadlift",
                    block(
                        maxes.deadlift,
                        &[(dec!(0.50), 4, 1), (dec!(0.60), 4, 2), (dec!(0.70), 3, 4)],
                    ),
                ),
                Exercise::structured(
                    "Bench Press",
                    block(
                        maxes.bench,
                        &[(dec!(0.50), 6, 1), (dec!(0.60), 6, 1), (dec!(0.65), 5, 4)],
                    ),
                ),
                Exercise::note("Accessories", "Dips and lat work, 5x8"),
            ],
        ),
        WorkoutDay::new(
            "Day 3",
            "Squat + Bench",
            vec![
                Exercise::structured(
                    "Squat",
                    block(
                        maxes.squat,
                        &[
                            (dec!(0.50), 5, 1),
                            (dec!(0.60), 5, 1),
                            (dec!(0.70), 4, 2),
                            (dec!(0.75), 3, 4),
                        ],
                    ),
                ),
                Exercise::structured(
                    "Bench Press",
                    block(
                        maxes.bench,
                        &[(dec!(0.50), 5, 1), (dec!(0.60), 5, 2), (dec!(0.70), 4, 4)],
                    ),
                ),
                Exercise::structured(
                    "Squat",
                    block(maxes.squat, &[(dec!(0.55), 4, 1), (dec!(0.65), 4, 3)]),
                ),
                Exercise::note("Accessories", "Back raises, 5x10"),
            ],
        ),
    ]
}

fn intensification_week(maxes: &RepMaxes) -> Vec<WorkoutDay> {
    vec![
        WorkoutDay::new(
            "Day 1",
            "Squat + Bench",
            vec![
                Exercise::structured(
                    "Bench Press",
                    block(
                        maxes.bench,
                        &[
                            (dec!(0.55), 4, 1),
                            (dec!(0.65), 4, 1),
                            (dec!(0.75), 3, 2),
                            (dec!(0.80), 2, 4),
                        ],
                    ),
                ),
                Exercise::structured(
                    "Squat",
                    block(
                        maxes.squat,
                        &[
                            (dec!(0.55), 4, 1),
                            (dec!(0.65), 4, 1),
                            (dec!(0.75), 3, 2),
                            (dec!(0.80), 2, 4),
                        ],
                    ),
                ),
                Exercise::note("Accessories", "Good mornings, 4x6"),
            ],
        ),
        WorkoutDay::new(
            "Day 2",
            "Deadlift + Bench",
            vec![
                Exercise::structured(
                    "Deadlift",
                    block(
                        maxes.deadlift,
                        &[
                            (dec!(0.55), 3, 1),
                            (dec!(0.65), 3, 2),
                            (dec!(0.75), 2, 3),
                            (dec!(0.85), 1, 2),
                        ],
                    ),
                ),
                Exercise::structured(
                    "Bench Press",
                    block(
                        maxes.bench,
                        &[(dec!(0.50), 5, 1), (dec!(0.60), 5, 1), (dec!(0.70), 4, 3)],
                    ),
                ),
                Exercise::note("Accessories", "Dips, 4x8"),
            ],
        ),
        WorkoutDay::new(
            "Day 3",
            "Squat + Bench",
            vec![
                Exercise::structured(
                    "Squat",
                    block(
                        maxes.squat,
                        &[
                            (dec!(0.55), 4, 1),
                            (dec!(0.65), 3, 1),
                            (dec!(0.75), 3, 2),
                            (dec!(0.85), 2, 3),
                        ],
                    ),
                ),
                Exercise::structured(
                    "Bench Press",
                    block(
                        maxes.bench,
                        &[(dec!(0.55), 4, 1), (dec!(0.65), 4, 2), (dec!(0.75), 3, 4)],
                    ),
                ),
                Exercise::note("Accessories", "Lat work, 5x10"),
            ],
        ),
    ]
}

fn peak_volume_week(maxes: &RepMaxes) -> Vec<WorkoutDay> {
    vec![
        WorkoutDay::new(
            "Day 1",
            "Squat + Bench",
            vec![
                Exercise::structured(
                    "Bench Press",
                    block(
                        maxes.bench,
                        &[
                            (dec!(0.50), 5, 1),
                            (dec!(0.60), 5, 1),
                            (dec!(0.70), 4, 2),
                            (dec!(0.75), 4, 6),
                        ],
                    ),
                ),
                Exercise::structured(
                    "Squat",
                    block(
                        maxes.squat,
                        &[
                            (dec!(0.50), 5, 1),
                            (dec!(0.60), 5, 1),
                            (dec!(0.70), 4, 2),
                            (dec!(0.75), 3, 6),
                        ],
                    ),
                ),
                Exercise::structured(
                    "Bench Press",
                    block(maxes.bench, &[(dec!(0.55), 5, 1), (dec!(0.65), 4, 5)]),
                ),
                Exercise::note("Accessories", "Flyes, 5x10"),
            ],
        ),
        WorkoutDay::new(
            "Day 2",
            "Deadlift + Bench",
            vec![
                Exercise::structured(
                    "Deadlift",
                    block(
                        maxes.deadlift,
                        &[
                            (dec!(0.50), 4, 1),
                            (dec!(0.60), 4, 2),
                            (dec!(0.70), 4, 4),
                            (dec!(0.75), 3, 3),
                        ],
                    ),
                ),
                Exercise::structured(
                    "Bench Press",
                    block(
                        maxes.bench,
                        &[(dec!(0.50), 6, 1), (dec!(0.60), 5, 2), (dec!(0.65), 5, 5)],
                    ),
                ),
                Exercise::note("Accessories", "Dips and rows, 5x8"),
            ],
        ),
        WorkoutDay::new(
            "Day 3",
            "Squat + Bench",
            vec![
                Exercise::structured(
                    "Squat",
                    block(
                        maxes.squat,
                        &[
                            (dec!(0.50), 5, 1),
                            (dec!(0.60), 5, 2),
                            (dec!(0.70), 4, 5),
                            (dec!(0.75), 3, 3),
                        ],
                    ),
                ),
                Exercise::structured(
                    "Bench Press",
                    block(
                        maxes.bench,
                        &[(dec!(0.50), 5, 1), (dec!(0.60), 5, 2), (dec!(0.70), 4, 5)],
                    ),
                ),
                Exercise::structured(
                    "Squat",
                    block(maxes.squat, &[(dec!(0.55), 4, 1), (dec!(0.65), 4, 4)]),
                ),
                Exercise::note("Accessories", "Back raises, 5x10"),
            ],
        ),
    ]
}

fn taper_week(maxes: &RepMaxes) -> Vec<WorkoutDay> {
    vec![
        WorkoutDay::new(
            "Day 1",
            "Squat + Bench",
            vec![
                Exercise::structured(
                    "Bench Press",
                    block(
                        maxes.bench,
                        &[(dec!(0.50), 4, 1), (dec!(0.60), 3, 2), (dec!(0.70), 2, 3)],
                    ),
                ),
                Exercise::structured(
                    "Squat",
                    block(
                        maxes.squat,
                        &[(dec!(0.50), 4, 1), (dec!(0.60), 3, 2), (dec!(0.70), 2, 3)],
                    ),
                ),
                Exercise::note("Accessories", "Light abs only"),
            ],
        ),
        WorkoutDay::new(
            "Day 2",
            "Deadlift + Bench",
            vec![
                Exercise::structured(
                    "Deadlift",
                    block(
                        maxes.deadlift,
                        &[(dec!(0.50), 3, 1), (dec!(0.60), 3, 2), (dec!(0.70), 2, 2)],
                    ),
                ),
                Exercise::structured(
                    "Bench Press",
                    block(maxes.bench, &[(dec!(0.50), 4, 1), (dec!(0.60), 4, 2)]),
                ),
                Exercise::note("Accessories", "Light abs only"),
            ],
        ),
        WorkoutDay::new(
            "Day 3",
            "Squat + Bench",
            vec![
                Exercise::structured(
                    "Squat",
                    block(
                        maxes.squat,
                        &[(dec!(0.50), 3, 1), (dec!(0.60), 3, 2), (dec!(0.70), 2, 2)],
                    ),
                ),
                Exercise::structured(
                    "Bench Press",
                    block(
                        maxes.bench,
                        &[(dec!(0.50), 4, 1), (dec!(0.60), 3, 2), (dec!(0.70), 2, 2)],
                    ),
                ),
                Exercise::note("Accessories", "Light abs only"),
            ],
        ),
    ]
}
