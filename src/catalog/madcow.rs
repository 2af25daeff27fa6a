//! Madcow 5x5: weekly-multiplicative ramped fives over twelve weeks.
//!
//! Each lift anchors on a five-rep base (85% of the 1RM) that the Monday
//! top set reaches on week 4; earlier weeks ramp in below it and later
//! weeks grow 2.5% per week. Friday's PR triple previews next week's top,
//! so every percentage chains off a derived value rather than the raw max.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::cycle_week;
use crate::models::{Exercise, PrescribedSet, RepMaxes, WorkoutDay};
use crate::repmax::MaxCalculator;

const CYCLE_WEEKS: u32 = 12;

const FIVE_REP_FRACTION: Decimal = dec!(0.85);
const WEEKLY_FACTOR: Decimal = dec!(1.025);
/// No row max is collected; rows anchor on a fixed five-rep base
const ROW_BASE: Decimal = dec!(65);

/// Monday ramp: five even steps to the week's top set
const RAMP_5: [Decimal; 5] = [dec!(0.50), dec!(0.625), dec!(0.75), dec!(0.875), dec!(1.0)];
/// Light-day squat ramp stops one step short of Monday's top
const RAMP_4_LIGHT: [Decimal; 4] = [dec!(0.50), dec!(0.625), dec!(0.75), dec!(0.875)];
/// Press/pull ramp on the light day: four even steps to a full top set
const RAMP_4_FULL: [Decimal; 4] = [dec!(0.40), dec!(0.60), dec!(0.80), dec!(1.0)];

const BACKOFF_FRACTION: Decimal = dec!(0.875);

pub fn generate(maxes: &RepMaxes, week: u32) -> Vec<WorkoutDay> {
    let week = cycle_week(week, CYCLE_WEEKS);

    let squat_base = MaxCalculator::round5(maxes.squat * FIVE_REP_FRACTION);
    let bench_base = MaxCalculator::round5(maxes.bench * FIVE_REP_FRACTION);
    let ohp_base = MaxCalculator::round5(maxes.ohp * FIVE_REP_FRACTION);
    let deadlift_base = MaxCalculator::round5(maxes.deadlift * FIVE_REP_FRACTION);

    let squat_top = weekly_top(squat_base, week);
    let bench_top = weekly_top(bench_base, week);
    let row_top = weekly_top(ROW_BASE, week);

    let monday = WorkoutDay::new(
        "Monday",
        "Volume",
        vec![
            Exercise::structured("Squat", ramp(squat_top, &RAMP_5, 5)),
            Exercise::structured("Bench Press", ramp(bench_top, &RAMP_5, 5)),
            Exercise::structured("Barbell Row", ramp(row_top, &RAMP_5, 5)),
        ],
    );

    let wednesday = WorkoutDay::new(
        "Wednesday",
        "Light",
        vec![
            Exercise::structured("Squat", ramp(squat_top, &RAMP_4_LIGHT, 5)),
            Exercise::structured(
                "Overhead Press",
                ramp(weekly_top(ohp_base, week), &RAMP_4_FULL, 5),
            ),
            Exercise::structured(
                "Deadlift",
                ramp(weekly_top(deadlift_base, week), &RAMP_4_FULL, 5),
            ),
        ],
    );

    let friday = WorkoutDay::new(
        "Friday",
        "Intensity",
        vec![
            Exercise::structured("Squat", friday_sets(squat_top, weekly_top(squat_base, week + 1))),
            Exercise::structured("Bench Press", friday_sets(bench_top, weekly_top(bench_base, week + 1))),
            Exercise::structured("Barbell Row", friday_sets(row_top, weekly_top(ROW_BASE, week + 1))),
        ],
    );

    vec![monday, wednesday, friday]
}

/// The week's top-set weight: the five-rep base compounded 2.5% per week,
/// anchored so that week 4 lands exactly on the base
fn weekly_top(base: Decimal, week: u32) -> Decimal {
    let mut top = base;
    if week > 4 {
        for _ in 4..week {
            top *= WEEKLY_FACTOR;
        }
    } else {
        for _ in week..4 {
            top /= WEEKLY_FACTOR;
        }
    }
    MaxCalculator::round5(top)
}

fn ramp(top: Decimal, fractions: &[Decimal], reps: u32) -> Vec<PrescribedSet> {
    fractions
        .iter()
        .map(|f| PrescribedSet::load(MaxCalculator::round5(top * f), reps))
        .collect()
}

/// Friday: ramp to 87.5%, PR triple at next week's top, back-off eight
fn friday_sets(top: Decimal, next_week_top: Decimal) -> Vec<PrescribedSet> {
    let mut sets = ramp(top, &RAMP_4_LIGHT, 5);
    sets.push(PrescribedSet::load(next_week_top, 3));
    sets.push(PrescribedSet::load(
        MaxCalculator::round5(top * BACKOFF_FRACTION),
        8,
    ));
    sets
}
