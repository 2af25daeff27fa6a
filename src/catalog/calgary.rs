//! Calgary Barbell 8-week: a meet-prep block ramping from 70% fives to
//! 92.5% singles, with a mid-cycle down week and a taper week of openers.
//!
//! Each week reads its scheme from an explicit table; secondary slots run
//! five points under the main scheme with one set less. Pull-ups and
//! accessory blocks ride along on every full week.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::cycle_week;
use crate::models::{Exercise, PrescribedSet, RepMaxes, SetReps, SetWeight, WorkoutDay};
use crate::repmax::MaxCalculator;

const CYCLE_WEEKS: u32 = 8;
const OPENER_WEEK: u32 = 8;
const SECONDARY_DROP: Decimal = dec!(0.05);

/// (percentage, reps, sets) for the main slot of each week. Week 5 is the
/// programmed down week; week 8 tapers to meet openers.
const WEEK_SCHEMES: [(Decimal, u32, usize); 8] = [
    (dec!(0.70), 5, 4),
    (dec!(0.75), 5, 4),
    (dec!(0.80), 4, 4),
    (dec!(0.85), 3, 4),
    (dec!(0.70), 4, 3),
    (dec!(0.875), 2, 3),
    (dec!(0.925), 1, 3),
    (dec!(0.91), 1, 1),
];

pub fn generate(maxes: &RepMaxes, week: u32) -> Vec<WorkoutDay> {
    let week = cycle_week(week, CYCLE_WEEKS);
    if week == OPENER_WEEK {
        return opener_week(maxes);
    }

    let (pct, reps, sets) = WEEK_SCHEMES[(week - 1) as usize];
    let main = |max: Decimal| pct_sets(max, pct, sets, reps);
    let secondary = |max: Decimal| pct_sets(max, pct - SECONDARY_DROP, sets.max(2) - 1, reps);
    let pull_ups = || {
        Exercise::structured(
            "Pull-Up",
            vec![
                PrescribedSet {
                    weight: SetWeight::Bodyweight,
                    reps: SetReps::Amrap(6),
                };
                3
            ],
        )
    };

    vec![
        WorkoutDay::new(
            "Day 1",
            "Squat + Bench",
            vec![
                Exercise::structured("Squat", main(maxes.squat)),
                Exercise::structured("Bench Press", main(maxes.bench)),
                pull_ups(),
                Exercise::note("Accessories", "2 movements, 3x8-12"),
            ],
        ),
        WorkoutDay::new(
            "Day 2",
            "Deadlift + Bench",
            vec![
                Exercise::structured("Deadlift", main(maxes.deadlift)),
                Exercise::structured("Close-Grip Bench Press", secondary(maxes.bench)),
                Exercise::note("Accessories", "Rows and core, 3x10"),
            ],
        ),
        WorkoutDay::new(
            "Day 3",
            "Bench + Squat",
            vec![
                Exercise::structured("Bench Press", main(maxes.bench)),
                Exercise::structured("Squat", secondary(maxes.squat)),
                Exercise::note("Accessories", "Upper back, 3x10-15"),
            ],
        ),
        WorkoutDay::new(
            "Day 4",
            "OHP + Deadlift",
            vec![
                Exercise::structured("Overhead Press", main(maxes.ohp)),
                Exercise::structured("Deadlift", secondary(maxes.deadlift)),
                pull_ups(),
                Exercise::note("Accessories", "Arms and shoulders, 3x12"),
            ],
        ),
    ]
}

/// Taper week: one opener single per lift per day, nothing else heavy
fn opener_week(maxes: &RepMaxes) -> Vec<WorkoutDay> {
    let (pct, _, _) = WEEK_SCHEMES[(OPENER_WEEK - 1) as usize];
    let opener = |max: Decimal| vec![PrescribedSet::load(MaxCalculator::round5(max * pct), 1)];

    vec![
        WorkoutDay::new(
            "Day 1",
            "Squat Opener",
            vec![
                Exercise::structured("Squat", opener(maxes.squat)),
                Exercise::note("Mobility", "Light stretching, nothing taxing"),
            ],
        ),
        WorkoutDay::new(
            "Day 2",
            "Bench Opener",
            vec![
                Exercise::structured("Bench Press", opener(maxes.bench)),
                Exercise::note("Mobility", "Light stretching, nothing taxing"),
            ],
        ),
        WorkoutDay::new(
            "Day 3",
            "Deadlift Opener",
            vec![
                Exercise::structured("Deadlift", opener(maxes.deadlift)),
                Exercise::note("Mobility", "Light stretching, nothing taxing"),
            ],
        ),
        WorkoutDay::new(
            "Day 4",
            "Rest + Visualization",
            vec![Exercise::note(
                "Rest",
                "Walk through meet-day timing, no barbell work",
            )],
        ),
    ]
}

fn pct_sets(max: Decimal, pct: Decimal, sets: usize, reps: u32) -> Vec<PrescribedSet> {
    vec![
        PrescribedSet::load(MaxCalculator::round5(max * pct), reps);
        sets
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn maxes() -> RepMaxes {
        RepMaxes {
            squat: dec!(300),
            bench: dec!(200),
            deadlift: dec!(350),
            ohp: dec!(120),
        }
    }

    #[test]
    fn test_every_week_has_four_days() {
        let m = maxes();
        for week in 1..=8 {
            assert_eq!(generate(&m, week).len(), 4, "week {}", week);
        }
    }

    #[test]
    fn test_week_one_opens_at_seventy_percent() {
        let days = generate(&maxes(), 1);
        let squat = days[0].exercises[0].sets.sets().unwrap();
        assert_eq!(squat.len(), 4);
        // 70% of 300 = 210
        assert_eq!(squat[0], PrescribedSet::load(dec!(210), 5));
    }

    #[test]
    fn test_secondary_slot_runs_five_points_under() {
        let days = generate(&maxes(), 1);
        // Day 3 squat: 65% of 300 = 195, one set fewer
        let squat = days[2].exercises[1].sets.sets().unwrap();
        assert_eq!(squat.len(), 3);
        assert_eq!(squat[0], PrescribedSet::load(dec!(195), 5));
    }

    #[test]
    fn test_down_week_backs_off_after_week_four() {
        let wk4 = generate(&maxes(), 4);
        let wk5 = generate(&maxes(), 5);
        let heavy = wk4[0].exercises[0].sets.sets().unwrap()[0].clone();
        let light = wk5[0].exercises[0].sets.sets().unwrap()[0].clone();
        // 85% -> 255 vs 70% -> 210
        assert_eq!(heavy, PrescribedSet::load(dec!(255), 3));
        assert_eq!(light, PrescribedSet::load(dec!(210), 4));
    }

    #[test]
    fn test_week_seven_peaks_in_singles() {
        let days = generate(&maxes(), 7);
        let squat = days[0].exercises[0].sets.sets().unwrap();
        // 92.5% of 300 = 277.5 -> 280
        assert_eq!(squat[0], PrescribedSet::load(dec!(280), 1));
    }

    #[test]
    fn test_taper_week_is_openers_only() {
        let days = generate(&maxes(), 8);
        let squat = days[0].exercises[0].sets.sets().unwrap();
        assert_eq!(squat.len(), 1);
        // Opener at 91%: 273 -> 275
        assert_eq!(squat[0], PrescribedSet::load(dec!(275), 1));
        // Final day has no barbell work at all
        assert!(days[3].exercises[0].sets.sets().is_none());
    }

    #[test]
    fn test_pull_ups_are_bodyweight() {
        let days = generate(&maxes(), 2);
        let pull_ups = days[0].exercises[2].sets.sets().unwrap();
        assert_eq!(pull_ups.len(), 3);
        assert_eq!(pull_ups[0].weight, SetWeight::Bodyweight);
        assert_eq!(pull_ups[0].reps, SetReps::Amrap(6));
    }

    #[test]
    fn test_wraps_after_eight_weeks() {
        let m = maxes();
        assert_eq!(generate(&m, 9), generate(&m, 1));
    }
}
