//! Juggernaut Method: four 4-week waves (10s, 8s, 5s, 3s), each running
//! accumulation, intensification, realization, then a fixed deload.
//!
//! The week index decomposes into (wave, phase); each pair selects its own
//! prescription from a 2D table. Percentages come off a working max of 90%
//! of the lift's 1RM, left unrounded so only the per-set weight snaps to
//! the plate increment.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::cycle_week;
use crate::models::{Exercise, Lift, PrescribedSet, RepMaxes, WorkoutDay};
use crate::repmax::MaxCalculator;

const CYCLE_WEEKS: u32 = 16;
const WORKING_MAX_FRACTION: Decimal = dec!(0.90);

/// Rep target of each 4-week wave, in running order
const WAVES: [u32; 4] = [10, 8, 5, 3];

/// Reference day order
const DAY_ORDER: [Lift; 4] = [Lift::Bench, Lift::Squat, Lift::Deadlift, Lift::Ohp];

pub fn generate(maxes: &RepMaxes, week: u32) -> Vec<WorkoutDay> {
    let week = cycle_week(week, CYCLE_WEEKS);
    let (wave, phase) = decompose(week);

    DAY_ORDER
        .iter()
        .enumerate()
        .map(|(i, lift)| {
            let working_max = lift.max_in(maxes) * WORKING_MAX_FRACTION;
            WorkoutDay::new(
                format!("Day {}", i + 1),
                lift.name(),
                vec![Exercise::structured(
                    lift.name(),
                    session_sets(wave, phase, working_max),
                )],
            )
        })
        .collect()
}

/// Split a 1-based week of the 16-week cycle into (wave rep target,
/// phase 1-4 within the wave)
fn decompose(week: u32) -> (u32, u32) {
    let idx = week - 1;
    (WAVES[(idx / 4) as usize], (idx % 4) + 1)
}

fn session_sets(wave: u32, phase: u32, working_max: Decimal) -> Vec<PrescribedSet> {
    let load = |pct: Decimal| MaxCalculator::round5(working_max * pct);
    match phase {
        1 => {
            let pct = accumulation_percent(wave);
            vec![PrescribedSet::load(load(pct), wave); 5]
        }
        2 => {
            let (percents, reps) = intensification_scheme(wave);
            percents
                .iter()
                .zip(reps)
                .map(|(pct, r)| PrescribedSet::load(load(*pct), r))
                .collect()
        }
        3 => {
            let (percents, reps) = realization_scheme(wave);
            let mut sets: Vec<PrescribedSet> = percents[..3]
                .iter()
                .zip(reps)
                .map(|(pct, r)| PrescribedSet::load(load(*pct), r))
                .collect();
            sets.push(PrescribedSet::amrap(load(percents[3]), wave));
            sets
        }
        // Phase 4: the same deload ladder regardless of wave
        _ => [dec!(0.40), dec!(0.50), dec!(0.60)]
            .iter()
            .map(|pct| PrescribedSet::load(load(*pct), 5))
            .collect(),
    }
}

fn accumulation_percent(wave: u32) -> Decimal {
    match wave {
        10 => dec!(0.60),
        8 => dec!(0.65),
        5 => dec!(0.70),
        _ => dec!(0.75),
    }
}

fn intensification_scheme(wave: u32) -> ([Decimal; 3], [u32; 3]) {
    match wave {
        10 => ([dec!(0.50), dec!(0.60), dec!(0.70)], [5, 5, 10]),
        8 => ([dec!(0.55), dec!(0.65), dec!(0.75)], [5, 5, 8]),
        5 => ([dec!(0.60), dec!(0.70), dec!(0.80)], [5, 3, 5]),
        _ => ([dec!(0.65), dec!(0.75), dec!(0.85)], [3, 3, 3]),
    }
}

/// Three fixed work-up sets, then the all-out set at the final percentage
fn realization_scheme(wave: u32) -> ([Decimal; 4], [u32; 3]) {
    match wave {
        10 => ([dec!(0.50), dec!(0.60), dec!(0.70), dec!(0.75)], [5, 3, 1]),
        8 => ([dec!(0.55), dec!(0.65), dec!(0.75), dec!(0.80)], [5, 3, 1]),
        5 => ([dec!(0.60), dec!(0.70), dec!(0.80), dec!(0.85)], [3, 2, 1]),
        _ => ([dec!(0.65), dec!(0.75), dec!(0.85), dec!(0.90)], [3, 1, 1]),
    }
}
