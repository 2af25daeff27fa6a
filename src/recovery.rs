//! Training load and readiness tracking
//!
//! A lightweight fatigue heuristic over generated workout history. Load is
//! measured as session tonnage (total weight lifted); readiness compares the
//! acute (7-day) load average against the chronic (28-day) average.
//!
//! # Sports Science Background
//!
//! The acute:chronic workload ratio is a widely used spike detector: chronic
//! load is what the lifter is adapted to, acute load is what they just did.
//! A ratio near 1.0 means training matches adaptation; well below means the
//! lifter is fresher than usual; well above flags a load spike that tends to
//! precede overuse problems.
//!
//! All of this is advisory. It never gates program generation.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::models::TemplateExercise;
use crate::storage::StoredWorkout;

/// Days in the acute load window
pub const ACUTE_WINDOW_DAYS: i64 = 7;
/// Days in the chronic load window
pub const CHRONIC_WINDOW_DAYS: i64 = 28;

/// Acute:chronic ratio below which the lifter counts as fresh
const FRESH_BELOW: Decimal = dec!(0.8);
/// Acute:chronic ratio above which the load counts as a spike
const STRAINED_ABOVE: Decimal = dec!(1.3);

/// Total weight lifted in one session: Σ weight × reps over every
/// load-bearing set. Timed sets contribute nothing.
pub fn session_tonnage(exercises: &[TemplateExercise]) -> Decimal {
    exercises
        .iter()
        .flat_map(|exercise| exercise.sets.iter())
        .filter(|set| !set.is_timed())
        .map(|set| set.weight * Decimal::from(set.reps))
        .sum()
}

/// Tonnage aggregated per calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyLoad {
    pub date: NaiveDate,
    pub tonnage: Decimal,
}

/// Collapse workout history into per-day loads, oldest first
pub fn daily_loads(workouts: &[StoredWorkout]) -> Vec<DailyLoad> {
    let mut by_date: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for workout in workouts {
        let tonnage = session_tonnage(&workout.exercises);
        *by_date
            .entry(workout.created_at.date_naive())
            .or_insert(Decimal::ZERO) += tonnage;
    }
    by_date
        .into_iter()
        .map(|(date, tonnage)| DailyLoad { date, tonnage })
        .collect()
}

/// Readiness categories from the acute:chronic load ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Readiness {
    /// Acute load well below chronic; detrained or tapering
    Fresh,
    /// Acute load in line with chronic adaptation
    Ready,
    /// Acute load spiking above chronic adaptation
    Strained,
    /// No chronic load history to compare against
    NoData,
}

impl fmt::Display for Readiness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Readiness::Fresh => write!(f, "Fresh"),
            Readiness::Ready => write!(f, "Ready"),
            Readiness::Strained => write!(f, "Strained"),
            Readiness::NoData => write!(f, "No Data"),
        }
    }
}

impl Readiness {
    /// Classify from acute and chronic daily load averages.
    ///
    /// Fresh below a 0.8 ratio, Ready up to 1.3, Strained above. A
    /// non-positive chronic average means there is no baseline to compare
    /// against.
    pub fn from_ratio(acute: Decimal, chronic: Decimal) -> Self {
        if chronic <= Decimal::ZERO {
            return Readiness::NoData;
        }

        let ratio = acute / chronic;
        if ratio < FRESH_BELOW {
            Readiness::Fresh
        } else if ratio <= STRAINED_ABOVE {
            Readiness::Ready
        } else {
            Readiness::Strained
        }
    }
}

/// Acute and chronic load averages as of a reference date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FatigueSnapshot {
    /// Mean daily tonnage over the trailing 7 days
    pub acute: Decimal,
    /// Mean daily tonnage over the trailing 28 days
    pub chronic: Decimal,
    /// Acute divided by chronic; absent without chronic history
    pub ratio: Option<Decimal>,
    pub readiness: Readiness,
}

impl FatigueSnapshot {
    /// Compute the snapshot for `today` from per-day loads.
    ///
    /// Both windows include `today` and count empty days as zero load, so
    /// the averages are over the full window length.
    pub fn compute(loads: &[DailyLoad], today: NaiveDate) -> Self {
        let acute_start = today - Duration::days(ACUTE_WINDOW_DAYS - 1);
        let chronic_start = today - Duration::days(CHRONIC_WINDOW_DAYS - 1);

        let window_sum = |start: NaiveDate| -> Decimal {
            loads
                .iter()
                .filter(|load| load.date >= start && load.date <= today)
                .map(|load| load.tonnage)
                .sum()
        };

        let acute = window_sum(acute_start) / Decimal::from(ACUTE_WINDOW_DAYS);
        let chronic = window_sum(chronic_start) / Decimal::from(CHRONIC_WINDOW_DAYS);

        let ratio = if chronic > Decimal::ZERO {
            Some(acute / chronic)
        } else {
            None
        };

        FatigueSnapshot {
            acute,
            chronic,
            ratio,
            readiness: Readiness::from_ratio(acute, chronic),
        }
    }
}
