//! GZCL-family programs: GZCLP and Jacked & Tan 2.0.
//!
//! Both structure every session in three tiers: T1 heavy low-rep main
//! work with a terminal AMRAP or rep-max set, T2 moderate-percentage
//! volume, T3 free-text accessory blocks left to the lifter.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::cycle_week;
use crate::models::{Exercise, Lift, PrescribedSet, RepMaxes, WorkoutDay};
use crate::repmax::MaxCalculator;

const GZCLP_T1_FRACTION: Decimal = dec!(0.85);
const GZCLP_T2_FRACTION: Decimal = dec!(0.65);

/// GZCLP: the linear-progression entry point to the GZCL method.
/// Week-invariant; stage changes happen when the lifter fails, outside the
/// generator's scope.
pub fn gzclp(maxes: &RepMaxes, _week: u32) -> Vec<WorkoutDay> {
    let day = |label: &str, t1: Lift, t2: Lift, t3: &str| {
        let t1_weight = MaxCalculator::round5(t1.max_in(maxes) * GZCLP_T1_FRACTION);
        let t2_weight = MaxCalculator::round5(t2.max_in(maxes) * GZCLP_T2_FRACTION);
        WorkoutDay::new(
            label,
            t1.name(),
            vec![
                Exercise::structured(t1.name(), gzclp_t1_sets(t1_weight)),
                Exercise::structured(t2.name(), vec![PrescribedSet::load(t2_weight, 10); 3]),
                Exercise::note(t3, "3x15+"),
            ],
        )
    };

    vec![
        day("Day 1", Lift::Squat, Lift::Bench, "Lat Pulldown"),
        day("Day 2", Lift::Ohp, Lift::Deadlift, "Dumbbell Row"),
        day("Day 3", Lift::Bench, Lift::Squat, "Lat Pulldown"),
        day("Day 4", Lift::Deadlift, Lift::Ohp, "Dumbbell Row"),
    ]
}

/// T1: five triples, the last one open-ended
fn gzclp_t1_sets(weight: Decimal) -> Vec<PrescribedSet> {
    let mut sets = vec![PrescribedSet::load(weight, 3); 4];
    sets.push(PrescribedSet::amrap(weight, 3));
    sets
}

/// T1 guide per week: rep-max target and the percentage to work up from
const JT2_T1_GUIDES: [(Decimal, u32); 6] = [
    (dec!(0.70), 10),
    (dec!(0.75), 8),
    (dec!(0.80), 6),
    (dec!(0.84), 5),
    (dec!(0.88), 3),
    (dec!(0.92), 2),
];

/// T2 volume wave per week: (sets, reps, percentage)
const JT2_T2_WAVE: [(u32, u32, Decimal); 6] = [
    (3, 8, dec!(0.55)),
    (4, 6, dec!(0.60)),
    (5, 5, dec!(0.65)),
    (4, 4, dec!(0.70)),
    (3, 3, dec!(0.75)),
    (2, 2, dec!(0.60)),
];

const JT2_BACKOFF_DROP: Decimal = dec!(0.10);
const JT2_BACKOFF_SETS: usize = 3;
const JT2_CYCLE_WEEKS: u32 = 6;

/// T2 variation trained alongside each T1 lift, at a percentage of the
/// same lift's max
fn jt2_t2_variation(lift: Lift) -> &'static str {
    match lift {
        Lift::Squat => "Front Squat",
        Lift::Bench => "Close-Grip Bench Press",
        Lift::Deadlift => "Stiff-Leg Deadlift",
        Lift::Ohp => "Push Press",
    }
}

/// Jacked & Tan 2.0: six hand-authored weeks walking the T1 top set from a
/// 10RM down to a 2RM while the T2 wave rises then deloads.
pub fn jacked_and_tan_2(maxes: &RepMaxes, week: u32) -> Vec<WorkoutDay> {
    let week = cycle_week(week, JT2_CYCLE_WEEKS);
    let (guide, target) = JT2_T1_GUIDES[(week - 1) as usize];
    let (t2_sets, t2_reps, t2_pct) = JT2_T2_WAVE[(week - 1) as usize];

    [Lift::Squat, Lift::Bench, Lift::Deadlift, Lift::Ohp]
        .iter()
        .enumerate()
        .map(|(i, lift)| {
            let max = lift.max_in(maxes);
            let t2_weight = MaxCalculator::round5(max * t2_pct);
            WorkoutDay::new(
                format!("Day {}", i + 1),
                lift.name(),
                vec![
                    Exercise::structured(lift.name(), jt2_t1_sets(max, guide, target)),
                    Exercise::structured(
                        jt2_t2_variation(*lift),
                        vec![PrescribedSet::load(t2_weight, t2_reps); t2_sets as usize],
                    ),
                    Exercise::note("Accessories", "2-3 movements, MR10 each"),
                ],
            )
        })
        .collect()
}

/// Top set works up to the week's rep max from a guide percentage, then
/// three back-off sets ten points lighter at the same rep count
fn jt2_t1_sets(max: Decimal, guide: Decimal, target: u32) -> Vec<PrescribedSet> {
    let top = PrescribedSet::rep_max(MaxCalculator::round5(max * guide), target);
    let backoff_weight = MaxCalculator::round5(max * (guide - JT2_BACKOFF_DROP));
    let mut sets = vec![top];
    sets.extend(vec![
        PrescribedSet::load(backoff_weight, target);
        JT2_BACKOFF_SETS
    ]);
    sets
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
    fn test_gzclp_tier_structure() {
        let days = gzclp(&maxes(), 1);
        assert_eq!(days.len(), 4);

        // Day 1: squat T1 at 85% -> 255, bench T2 at 65% -> 130
        let t1 = days[0].exercises[0].sets.sets().unwrap();
        assert_eq!(t1.len(), 5);
        assert_eq!(t1[0], PrescribedSet::load(dec!(255), 3));
        assert_eq!(t1[4], PrescribedSet::amrap(dec!(255), 3));

        let t2 = days[0].exercises[1].sets.sets().unwrap();
        assert_eq!(t2.len(), 3);
        assert_eq!(t2[0], PrescribedSet::load(dec!(130), 10));

        assert!(days[0].exercises[2].sets.sets().is_none());
    }

    #[test]
    fn test_gzclp_day_rotation() {
        let days = gzclp(&maxes(), 1);
        let t1_names: Vec<&str> = days.iter().map(|d| d.exercises[0].name.as_str()).collect();
        assert_eq!(
            t1_names,
            vec!["Squat", "Overhead Press", "Bench Press", "Deadlift"]
        );
    }

    #[test]
    fn test_gzclp_week_invariant() {
        let m = maxes();
        assert_eq!(gzclp(&m, 1), gzclp(&m, 6));
    }

    #[test]
    fn test_jt2_week_one_works_to_ten_rep_max() {
        let days = jacked_and_tan_2(&maxes(), 1);
        let squat_t1 = days[0].exercises[0].sets.sets().unwrap();
        assert_eq!(squat_t1.len(), 4);
        // 70% of 300 = 210, working to a 10RM
        assert_eq!(squat_t1[0], PrescribedSet::rep_max(dec!(210), 10));
        // Back-offs 10 points lighter: 60% -> 180
        assert_eq!(squat_t1[1], PrescribedSet::load(dec!(180), 10));
    }

    #[test]
    fn test_jt2_week_six_is_doubles() {
        let days = jacked_and_tan_2(&maxes(), 6);
        let squat_t1 = days[0].exercises[0].sets.sets().unwrap();
        // 92% of 300 = 276 -> 275, working to a 2RM
        assert_eq!(squat_t1[0], PrescribedSet::rep_max(dec!(275), 2));

        let t2 = days[0].exercises[1].sets.sets().unwrap();
        // Deload wave: 2x2 at 60%
        assert_eq!(t2.len(), 2);
        assert_eq!(t2[0], PrescribedSet::load(dec!(180), 2));
    }

    #[test]
    fn test_jt2_t2_wave_volume_peaks_mid_cycle() {
        let m = maxes();
        let sets_per_week: Vec<usize> = (1..=6)
            .map(|w| {
                jacked_and_tan_2(&m, w)[0].exercises[1]
                    .sets
                    .sets()
                    .unwrap()
                    .len()
            })
            .collect();
        assert_eq!(sets_per_week, vec![3, 4, 5, 4, 3, 2]);
    }

    #[test]
    fn test_jt2_wraps_past_six_weeks() {
        let m = maxes();
        assert_eq!(jacked_and_tan_2(&m, 7), jacked_and_tan_2(&m, 1));
    }
}
