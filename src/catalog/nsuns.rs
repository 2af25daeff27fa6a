//! nSuns LP 4-day: fixed percentage ladders off a 90% training max.
//!
//! Week-invariant; the lifter adjusts their maxes between cycles based on
//! AMRAP performance, which is outside the generator's scope. Each day pairs
//! a nine-set T1 ladder with an eight-set T2 ladder of a second lift.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{Exercise, PrescribedSet, RepMaxes, SetReps, SetWeight, WorkoutDay};
use crate::repmax::MaxCalculator;

const T1_PERCENTS: [Decimal; 9] = [
    dec!(0.75),
    dec!(0.85),
    dec!(0.95),
    dec!(0.90),
    dec!(0.85),
    dec!(0.80),
    dec!(0.75),
    dec!(0.70),
    dec!(0.65),
];

const T2_PERCENTS: [Decimal; 8] = [
    dec!(0.50),
    dec!(0.60),
    dec!(0.70),
    dec!(0.70),
    dec!(0.70),
    dec!(0.65),
    dec!(0.60),
    dec!(0.55),
];

const T2_REPS: [u32; 8] = [5, 5, 3, 5, 7, 4, 6, 8];

pub fn generate(maxes: &RepMaxes, _week: u32) -> Vec<WorkoutDay> {
    let squat_tm = MaxCalculator::training_max(maxes.squat);
    let bench_tm = MaxCalculator::training_max(maxes.bench);
    let deadlift_tm = MaxCalculator::training_max(maxes.deadlift);
    let ohp_tm = MaxCalculator::training_max(maxes.ohp);

    vec![
        day(
            "Day 1",
            "Bench Press",
            Exercise::structured("Bench Press", t1_sets(bench_tm, false)),
            Exercise::structured("Overhead Press", t2_sets(ohp_tm)),
        ),
        day(
            "Day 2",
            "Squat",
            Exercise::structured("Squat", t1_sets(squat_tm, false)),
            Exercise::structured("Sumo Deadlift", t2_sets(deadlift_tm)),
        ),
        day(
            "Day 3",
            "Overhead Press",
            Exercise::structured("Overhead Press", t1_sets(ohp_tm, false)),
            Exercise::structured("Incline Bench Press", t2_sets(bench_tm)),
        ),
        day(
            "Day 4",
            "Deadlift",
            Exercise::structured("Deadlift", t1_sets(deadlift_tm, true)),
            Exercise::structured("Front Squat", t2_sets(squat_tm)),
        ),
    ]
}

fn day(label: &str, focus: &str, t1: Exercise, t2: Exercise) -> WorkoutDay {
    WorkoutDay::new(
        label,
        focus,
        vec![
            t1,
            t2,
            Exercise::note("Accessories", "3-5 movements of your choice, 8-12 reps"),
        ],
    )
}

/// The nine-set T1 ladder: work up to a 95% AMRAP single, then back down.
/// Deadlift caps the back-down sets at triples to keep pulling volume sane.
fn t1_sets(tm: Decimal, deadlift_day: bool) -> Vec<PrescribedSet> {
    let reps: [SetReps; 9] = if deadlift_day {
        [
            SetReps::Count(5),
            SetReps::Count(3),
            SetReps::Amrap(1),
            SetReps::Count(3),
            SetReps::Count(3),
            SetReps::Count(3),
            SetReps::Count(3),
            SetReps::Count(3),
            SetReps::Amrap(3),
        ]
    } else {
        [
            SetReps::Count(5),
            SetReps::Count(3),
            SetReps::Amrap(1),
            SetReps::Count(3),
            SetReps::Count(3),
            SetReps::Count(3),
            SetReps::Count(5),
            SetReps::Count(5),
            SetReps::Amrap(5),
        ]
    };

    T1_PERCENTS
        .iter()
        .zip(reps)
        .map(|(pct, rep)| PrescribedSet {
            weight: SetWeight::Load(MaxCalculator::round5(tm * pct)),
            reps: rep,
        })
        .collect()
}

fn t2_sets(tm: Decimal) -> Vec<PrescribedSet> {
    T2_PERCENTS
        .iter()
        .zip(T2_REPS)
        .map(|(pct, reps)| PrescribedSet::load(MaxCalculator::round5(tm * pct), reps))
        .collect()
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
    fn test_four_days_with_two_ladders_each() {
        let days = generate(&maxes(), 1);
        assert_eq!(days.len(), 4);
        for day in &days {
            assert_eq!(day.exercises[0].sets.sets().unwrap().len(), 9);
            assert_eq!(day.exercises[1].sets.sets().unwrap().len(), 8);
        }
    }

    #[test]
    fn test_week_invariant() {
        let m = maxes();
        assert_eq!(generate(&m, 1), generate(&m, 30));
    }

    #[test]
    fn test_t1_amrap_single_at_ninety_five_percent() {
        let days = generate(&maxes(), 1);
        // Bench TM = round5(0.9 * 200) = 180; 95% -> 171 -> 170
        let bench_sets = days[0].exercises[0].sets.sets().unwrap();
        assert_eq!(bench_sets[2], PrescribedSet::amrap(dec!(170), 1));
    }

    #[test]
    fn test_deadlift_day_caps_backdown_at_triples() {
        let days = generate(&maxes(), 1);
        let dl_sets = days[3].exercises[0].sets.sets().unwrap();
        // Deadlift TM = 315; closing set 65% -> 204.75 -> 205
        assert_eq!(dl_sets[8], PrescribedSet::amrap(dec!(205), 3));
        for set in &dl_sets[3..8] {
            assert_eq!(set.reps, SetReps::Count(3));
        }
    }

    #[test]
    fn test_t2_opens_at_half_tm() {
        let days = generate(&maxes(), 1);
        // OHP TM = 110; 50% -> 55
        let ohp_t2 = days[0].exercises[1].sets.sets().unwrap();
        assert_eq!(ohp_t2[0], PrescribedSet::load(dec!(55), 5));
        assert_eq!(ohp_t2[7].reps, SetReps::Count(8));
    }

    #[test]
    fn test_t2_lifts_pair_across_days() {
        let days = generate(&maxes(), 1);
        let t2_names: Vec<&str> = days.iter().map(|d| d.exercises[1].name.as_str()).collect();
        assert_eq!(
            t2_names,
            vec![
                "Overhead Press",
                "Sumo Deadlift",
                "Incline Bench Press",
                "Front Squat"
            ]
        );
    }
}
