//! Object consistency measures (spec §4.4.3).
//!
//! Consistency measures decide whether an object may sit in a union's lower
//! approximation under variable-consistency DRSA, and double as monotonic
//! condition-addition evaluators for the rule induction loop (§4.7).
//! Measures are expressed as exact integer [`Ratio`]s rather than `f64` so
//! that threshold comparisons (`value >= threshold` / `value <= threshold`)
//! are cross-multiplied instead of float-compared.

use crate::approximation::union::{UnionType, UnionView};
use crate::dominance::DominanceCones;
use drs_core::TriLogic;

/// An exact non-negative ratio `numerator / denominator`, `denominator >= 1`.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub struct Ratio {
    pub numerator: u64,
    pub denominator: u64,
}

impl Ratio {
    pub fn new(numerator: u64, denominator: u64) -> Ratio {
        debug_assert!(denominator > 0, "ratio denominator must be positive");
        Ratio { numerator, denominator }
    }

    pub fn zero() -> Ratio {
        Ratio { numerator: 0, denominator: 1 }
    }

    pub fn as_f64(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    /// `self >= other`, computed by cross-multiplication.
    pub fn at_least(&self, other: Ratio) -> bool {
        self.numerator as u128 * other.denominator as u128 >= other.numerator as u128 * self.denominator as u128
    }

    /// `self <= other`, computed by cross-multiplication.
    pub fn at_most(&self, other: Ratio) -> bool {
        other.at_least(*self)
    }

    /// Total order by cross-multiplication — used by the condition generator
    /// to rank candidate conditions without ever converting to `f64` (spec
    /// §4.7).
    pub fn cmp(&self, other: &Ratio) -> core::cmp::Ordering {
        let lhs = self.numerator as u128 * other.denominator as u128;
        let rhs = other.numerator as u128 * self.denominator as u128;
        lhs.cmp(&rhs)
    }
}

/// Direction in which a measure's value is "better" (spec §4.7: `GAIN` or
/// `COST` measure type, reused here for VC threshold comparison sense).
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum MeasureSense {
    Gain,
    Cost,
}

/// An object consistency measure: `(i, U) -> Ratio`, with a declared
/// threshold-comparison sense.
pub trait ConsistencyMeasure {
    fn sense(&self) -> MeasureSense;
    fn evaluate(&self, i: usize, union: &dyn UnionView, cones: &DominanceCones) -> Ratio;

    /// Does `i`'s measured value satisfy `threshold` under this measure's
    /// sense? `>= threshold` for gain, `<= threshold` for cost.
    fn is_satisfied(&self, i: usize, union: &dyn UnionView, cones: &DominanceCones, threshold: Ratio) -> bool {
        let value = self.evaluate(i, union, cones);
        match self.sense() {
            MeasureSense::Gain => value.at_least(threshold),
            MeasureSense::Cost => value.at_most(threshold),
        }
    }
}

/// The distinguished epsilon consistency measure (spec §4.4.3): the fraction
/// of an object's counting cone whose decision is negative for the union.
/// Cost sense: `0` is fully consistent, `1` is worst.
pub struct Epsilon;

impl ConsistencyMeasure for Epsilon {
    fn sense(&self) -> MeasureSense {
        MeasureSense::Cost
    }

    fn evaluate(&self, i: usize, union: &dyn UnionView, cones: &DominanceCones) -> Ratio {
        let complement_len = union.complement_size() as u64;
        if complement_len == 0 {
            // Degenerate by convention: a union with no complement is fully
            // consistent everywhere (spec §4.4.3).
            return Ratio::zero();
        }

        // Same cone the classical lower approximation tests for this union
        // type, so that `epsilon(i, U) == 0` coincides exactly with `i`
        // belonging to the classical lower approximation.
        let distribution = match union.union_type() {
            UnionType::AtLeast => cones.positive_standard_distribution(i),
            UnionType::AtMost => cones.negative_standard_distribution(i),
        };

        let negative: u64 = distribution
            .iter()
            .filter(|(d, _)| union.classify_decision(d) == TriLogic::False)
            .map(|(_, count)| *count as u64)
            .sum();

        Ratio::new(negative, complement_len)
    }
}
