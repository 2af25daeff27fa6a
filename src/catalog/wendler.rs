//! Wendler 5/3/1 and its Boring But Big / First Set Last variants.
//!
//! All three share the same four-week main-work wave off a 90% training
//! max; the variants differ only in the backoff block appended after the
//! main sets.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::cycle_week;
use crate::models::{Exercise, Lift, PrescribedSet, RepMaxes, SetReps, SetWeight, WorkoutDay};
use crate::repmax::MaxCalculator;

/// Press day opens the week; squat day closes it
const DAY_ORDER: [Lift; 4] = [Lift::Ohp, Lift::Deadlift, Lift::Bench, Lift::Squat];

const CYCLE_WEEKS: u32 = 4;

enum Backoff {
    None,
    BoringButBig,
    FirstSetLast,
}

/// Plain 5/3/1: three main sets per day, AMRAP on the top set except deload
pub fn five31(maxes: &RepMaxes, week: u32) -> Vec<WorkoutDay> {
    generate(maxes, week, Backoff::None)
}

/// 5/3/1 Boring But Big: main work plus 5x10 of the same lift at 50% TM
/// (40% on the deload week)
pub fn five31_bbb(maxes: &RepMaxes, week: u32) -> Vec<WorkoutDay> {
    generate(maxes, week, Backoff::BoringButBig)
}

/// 5/3/1 First Set Last: main work plus 5x5 at the week's opening percentage
pub fn five31_fsl(maxes: &RepMaxes, week: u32) -> Vec<WorkoutDay> {
    generate(maxes, week, Backoff::FirstSetLast)
}

fn generate(maxes: &RepMaxes, week: u32, backoff: Backoff) -> Vec<WorkoutDay> {
    let week = cycle_week(week, CYCLE_WEEKS);
    let (percents, reps) = week_scheme(week);

    DAY_ORDER
        .iter()
        .enumerate()
        .map(|(i, lift)| {
            let tm = MaxCalculator::training_max(lift.max_in(maxes));
            let mut sets = main_sets(tm, &percents, &reps);
            match backoff {
                Backoff::None => {}
                Backoff::BoringButBig => sets.extend(bbb_sets(tm, week)),
                Backoff::FirstSetLast => sets.extend(fsl_sets(tm, percents[0])),
            }
            WorkoutDay::new(
                format!("Day {}", i + 1),
                lift.name(),
                vec![
                    Exercise::structured(lift.name(), sets),
                    Exercise::note("Assistance", "50-100 reps each: push, pull, single-leg/core"),
                ],
            )
        })
        .collect()
}

/// The four-week wave. Week 4 is the deload: straight fives, no AMRAP.
fn week_scheme(week: u32) -> ([Decimal; 3], [SetReps; 3]) {
    match week {
        2 => (
            [dec!(0.70), dec!(0.80), dec!(0.90)],
            [SetReps::Count(3), SetReps::Count(3), SetReps::Amrap(3)],
        ),
        3 => (
            [dec!(0.75), dec!(0.85), dec!(0.95)],
            [SetReps::Count(5), SetReps::Count(3), SetReps::Amrap(1)],
        ),
        4 => (
            [dec!(0.40), dec!(0.50), dec!(0.60)],
            [SetReps::Count(5), SetReps::Count(5), SetReps::Count(5)],
        ),
        _ => (
            [dec!(0.65), dec!(0.75), dec!(0.85)],
            [SetReps::Count(5), SetReps::Count(5), SetReps::Amrap(5)],
        ),
    }
}

fn main_sets(tm: Decimal, percents: &[Decimal; 3], reps: &[SetReps; 3]) -> Vec<PrescribedSet> {
    percents
        .iter()
        .zip(reps.iter())
        .map(|(pct, rep)| PrescribedSet {
            weight: SetWeight::Load(MaxCalculator::round5(tm * pct)),
            reps: rep.clone(),
        })
        .collect()
}

fn bbb_sets(tm: Decimal, week: u32) -> Vec<PrescribedSet> {
    let pct = if week == 4 { dec!(0.40) } else { dec!(0.50) };
    let weight = MaxCalculator::round5(tm * pct);
    vec![PrescribedSet::load(weight, 10); 5]
}

fn fsl_sets(tm: Decimal, first_percent: Decimal) -> Vec<PrescribedSet> {
    let weight = MaxCalculator::round5(tm * first_percent);
    vec![PrescribedSet::load(weight, 5); 5]
}
