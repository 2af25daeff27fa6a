//! Texas Method: three weekly day roles off a shared five-rep max.
//!
//! Every weight derives from an estimated 5RM (85% of the 1RM). The light
//! day's squat is a percentage of the volume day's working weight, not of
//! the raw max, so derived values chain.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{Exercise, PrescribedSet, RepMaxes, SetReps, SetWeight, WorkoutDay};
use crate::repmax::MaxCalculator;

const FIVE_REP_FRACTION: Decimal = dec!(0.85);
const VOLUME_FRACTION: Decimal = dec!(0.90);
const LIGHT_FRACTION: Decimal = dec!(0.80);

pub fn generate(maxes: &RepMaxes, _week: u32) -> Vec<WorkoutDay> {
    let squat_5rm = five_rep_max(maxes.squat);
    let bench_5rm = five_rep_max(maxes.bench);
    let ohp_5rm = five_rep_max(maxes.ohp);
    let deadlift_5rm = five_rep_max(maxes.deadlift);

    let squat_volume = MaxCalculator::round5(squat_5rm * VOLUME_FRACTION);
    let bench_volume = MaxCalculator::round5(bench_5rm * VOLUME_FRACTION);
    let deadlift_volume = MaxCalculator::round5(deadlift_5rm * VOLUME_FRACTION);
    // Chained off the derived volume weight, not the raw max
    let squat_light = MaxCalculator::round5(squat_volume * LIGHT_FRACTION);

    vec![
        WorkoutDay::new(
            "Day 1",
            "Volume",
            vec![
                Exercise::structured("Squat", vec![PrescribedSet::load(squat_volume, 5); 5]),
                Exercise::structured("Bench Press", vec![PrescribedSet::load(bench_volume, 5); 5]),
                Exercise::structured("Deadlift", vec![PrescribedSet::load(deadlift_volume, 5)]),
            ],
        ),
        WorkoutDay::new(
            "Day 2",
            "Light",
            vec![
                Exercise::structured("Squat", vec![PrescribedSet::load(squat_light, 5); 2]),
                Exercise::structured(
                    "Overhead Press",
                    vec![
                        PrescribedSet::load(
                            MaxCalculator::round5(ohp_5rm * VOLUME_FRACTION),
                            5
                        );
                        3
                    ],
                ),
                Exercise::structured(
                    "Chin-Up",
                    vec![
                        PrescribedSet {
                            weight: SetWeight::Bodyweight,
                            reps: SetReps::Amrap(5),
                        };
                        3
                    ],
                ),
            ],
        ),
        WorkoutDay::new(
            "Day 3",
            "Intensity",
            vec![
                Exercise::structured("Squat", vec![PrescribedSet::load(squat_5rm, 5)]),
                Exercise::structured("Bench Press", vec![PrescribedSet::load(bench_5rm, 5)]),
                Exercise::note("Barbell Row", "3x5 moderate, leave a rep in the tank"),
            ],
        ),
    ]
}

fn five_rep_max(one_rep_max: Decimal) -> Decimal {
    MaxCalculator::round5(one_rep_max * FIVE_REP_FRACTION)
}
