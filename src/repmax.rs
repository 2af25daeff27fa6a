use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// One-rep-max estimation and weight rounding primitives.
///
/// Every function here is total: degenerate inputs fall back to 0 or to the
/// unmodified input, never to an error. The rest of the engine leans on this
/// so that program generation cannot fail on arithmetic.
pub struct MaxCalculator;

impl MaxCalculator {
    /// Default plate increment; barbells load in 5-unit steps on standard
    /// equipment
    pub const DEFAULT_INCREMENT: Decimal = dec!(5);

    /// Training max fraction used by percentage-table programs (90% of 1RM)
    const TRAINING_MAX_FACTOR: Decimal = dec!(0.90);

    /// Epley divisor: each rep past the first adds 1/30 of the bar weight
    const EPLEY_DIVISOR: Decimal = dec!(30);

    /// Round a weight to the nearest multiple of `increment`.
    ///
    /// Midpoints round away from zero (202.5 at increment 5 gives 205).
    /// A non-positive increment passes the value through unchanged.
    pub fn round_to_increment(value: Decimal, increment: Decimal) -> Decimal {
        if increment <= Decimal::ZERO {
            return value;
        }
        let multiples = (value / increment)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        multiples * increment
    }

    /// Round to the nearest 5 units, the increment every catalog program
    /// prescribes in
    pub fn round5(value: Decimal) -> Decimal {
        Self::round_to_increment(value, Self::DEFAULT_INCREMENT)
    }

    /// Estimate a one-rep max from a submaximal set using the Epley formula
    /// `weight * (1 + reps/30)`, rounded to a whole number.
    ///
    /// A single rep is already a max attempt, so the weight passes through
    /// unrounded. Non-positive weight or zero reps returns 0.
    pub fn estimate_one_rep_max(weight: Decimal, reps: u32) -> Decimal {
        if weight <= Decimal::ZERO || reps == 0 {
            return Decimal::ZERO;
        }
        if reps == 1 {
            return weight;
        }
        let estimate =
            weight * (Self::EPLEY_DIVISOR + Decimal::from(reps)) / Self::EPLEY_DIVISOR;
        estimate.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Training max: 90% of the one-rep max, rounded to 5.
    ///
    /// The submaximal anchor every percentage-table program works from,
    /// buffering prescriptions against an overestimated max.
    pub fn training_max(one_rep_max: Decimal) -> Decimal {
        Self::round5(one_rep_max * Self::TRAINING_MAX_FACTOR)
    }
}
