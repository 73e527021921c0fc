//! Value model and three-valued comparison logic (spec §4.1).
//!
//! A [`Value`] is one of: an ordered integer, an ordered real, an enumerated
//! element (referencing a shared element list by index), a pair of two
//! ordered values of the same subtype ("interval" semantics), or a missing
//! value carrying one of two declared semantics ([`MissingValueType`]).
//!
//! Comparison never panics and never silently picks an arbitrary answer for
//! an ill-typed pair: mismatched subtypes always yield
//! [`TriLogic::Uncomparable`], which callers must branch on explicitly.

use alloc::boxed::Box;
use ordered_float::OrderedFloat;

use crate::attribute::PreferenceType;

/// Result of a value comparison: classical boolean plus a declared "no
/// answer" state for values whose ordering is undefined relative to each
/// other.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum TriLogic {
    True,
    False,
    Uncomparable,
}

impl TriLogic {
    /// Negation; `Uncomparable` propagates (it is not "the opposite of
    /// comparable", it is simply not a yes/no answer).
    pub fn negate(self) -> TriLogic {
        match self {
            TriLogic::True => TriLogic::False,
            TriLogic::False => TriLogic::True,
            TriLogic::Uncomparable => TriLogic::Uncomparable,
        }
    }

    /// Three-valued AND: `Uncomparable` poisons the result; otherwise `True`
    /// iff both operands are `True`.
    fn and(self, other: TriLogic) -> TriLogic {
        if self == TriLogic::Uncomparable || other == TriLogic::Uncomparable {
            TriLogic::Uncomparable
        } else if self == TriLogic::True && other == TriLogic::True {
            TriLogic::True
        } else {
            TriLogic::False
        }
    }

    pub fn is_true(self) -> bool {
        matches!(self, TriLogic::True)
    }
}

/// Declared semantics for a missing evaluation (spec §4.1).
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MissingValueType {
    /// "Equal to all": a neutral element in every ordered relation against a
    /// non-missing, simple (non-pair) value.
    Mv15,
    /// Comparable but non-dominating: `Uncomparable` against any non-missing
    /// value in dominance relations.
    Mv2,
}

/// A single cell's evaluation.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Value {
    Integer(i64),
    Real(OrderedFloat<f64>),
    /// Index into the attribute's shared element (domain) list.
    Enumeration(usize),
    /// Two ordered values of the same subtype, read as an interval
    /// `[first, second]`.
    Pair(Box<Value>, Box<Value>),
    Missing(MissingValueType),
}

impl Value {
    pub fn real(v: f64) -> Value {
        Value::Real(OrderedFloat(v))
    }

    pub fn pair(first: Value, second: Value) -> Value {
        Value::Pair(Box::new(first), Box::new(second))
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing(_))
    }

    /// A value is "simple" iff it is not a pair (spec §4.1: MV1.5 is
    /// `Uncomparable` only against non-simple types).
    fn is_simple(&self) -> bool {
        !matches!(self, Value::Pair(_, _))
    }
}

/// `x ≥ y`? Mixed subtypes (other than the missing-value special cases)
/// always yield `Uncomparable`.
pub fn at_least(x: &Value, y: &Value) -> TriLogic {
    if let Some(result) = missing_case(x, y) {
        return result;
    }
    match (x, y) {
        (Value::Integer(a), Value::Integer(b)) => bool_tri(a >= b),
        (Value::Real(a), Value::Real(b)) => bool_tri(a >= b),
        (Value::Enumeration(a), Value::Enumeration(b)) => bool_tri(a >= b),
        (Value::Pair(xf, xs), Value::Pair(yf, ys)) => at_least(xf, yf).and(at_most(xs, ys)),
        _ => TriLogic::Uncomparable,
    }
}

/// `x ≤ y`? Dual of [`at_least`].
pub fn at_most(x: &Value, y: &Value) -> TriLogic {
    if let Some(result) = missing_case(x, y) {
        return result;
    }
    match (x, y) {
        (Value::Integer(a), Value::Integer(b)) => bool_tri(a <= b),
        (Value::Real(a), Value::Real(b)) => bool_tri(a <= b),
        (Value::Enumeration(a), Value::Enumeration(b)) => bool_tri(a <= b),
        (Value::Pair(xf, xs), Value::Pair(yf, ys)) => at_most(xf, yf).and(at_least(xs, ys)),
        _ => TriLogic::Uncomparable,
    }
}

/// `x == y`? Defined as `atLeast ∧ atMost`; `Uncomparable` propagates.
pub fn equal(x: &Value, y: &Value) -> TriLogic {
    at_least(x, y).and(at_most(x, y))
}

/// `x != y`? Negation of [`equal`]; `Uncomparable` propagates.
pub fn different(x: &Value, y: &Value) -> TriLogic {
    equal(x, y).negate()
}

/// "Is `x` at least as good as `y`" under a preference direction: `atLeast`
/// for gain criteria, `atMost` for cost criteria. For `None` (non-preference,
/// nominal) attributes this degenerates to equality, matching the dominance
/// engine's requirement that non-preference attributes require equality.
pub fn at_least_as_good(x: &Value, y: &Value, preference: PreferenceType) -> TriLogic {
    match preference {
        PreferenceType::Gain => at_least(x, y),
        PreferenceType::Cost => at_most(x, y),
        PreferenceType::None => equal(x, y),
    }
}

fn bool_tri(b: bool) -> TriLogic {
    if b {
        TriLogic::True
    } else {
        TriLogic::False
    }
}

/// Handles every pairing where at least one side is [`Value::Missing`].
/// Returns `None` when neither side is missing, so the caller falls through
/// to ordinary subtype matching.
fn missing_case(x: &Value, y: &Value) -> Option<TriLogic> {
    match (x, y) {
        (Value::Missing(_), Value::Missing(_)) => Some(TriLogic::True),
        (Value::Missing(mv), other) | (other, Value::Missing(mv)) => {
            Some(missing_vs_value(*mv, other))
        }
        _ => None,
    }
}

fn missing_vs_value(mv: MissingValueType, other: &Value) -> TriLogic {
    match mv {
        MissingValueType::Mv15 => {
            if other.is_simple() {
                TriLogic::True
            } else {
                TriLogic::Uncomparable
            }
        }
        MissingValueType::Mv2 => TriLogic::Uncomparable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_ordering() {
        let (a, b) = (Value::Integer(5), Value::Integer(3));
        assert_eq!(at_least(&a, &b), TriLogic::True);
        assert_eq!(at_most(&a, &b), TriLogic::False);
        assert_eq!(equal(&a, &a), TriLogic::True);
        assert_eq!(different(&a, &b), TriLogic::True);
    }

    #[test]
    fn mixed_subtype_is_uncomparable() {
        let a = Value::Integer(5);
        let b = Value::real(5.0);
        assert_eq!(at_least(&a, &b), TriLogic::Uncomparable);
        assert_eq!(equal(&a, &b), TriLogic::Uncomparable);
    }

    #[test]
    fn mv15_is_neutral_against_simple_values() {
        let m = Value::Missing(MissingValueType::Mv15);
        let v = Value::Integer(3);
        assert_eq!(at_least(&m, &v), TriLogic::True);
        assert_eq!(at_most(&m, &v), TriLogic::True);
        assert_eq!(at_least(&v, &m), TriLogic::True);
    }

    #[test]
    fn mv15_is_uncomparable_against_pairs() {
        let m = Value::Missing(MissingValueType::Mv15);
        let p = Value::pair(Value::Integer(1), Value::Integer(2));
        assert_eq!(at_least(&m, &p), TriLogic::Uncomparable);
    }

    #[test]
    fn mv2_is_uncomparable_against_non_missing() {
        let m = Value::Missing(MissingValueType::Mv2);
        let v = Value::Integer(3);
        assert_eq!(at_least(&m, &v), TriLogic::Uncomparable);
        assert_eq!(at_most(&v, &m), TriLogic::Uncomparable);
    }

    #[test]
    fn missing_vs_missing_is_true() {
        let a = Value::Missing(MissingValueType::Mv15);
        let b = Value::Missing(MissingValueType::Mv2);
        assert_eq!(at_least(&a, &b), TriLogic::True);
        assert_eq!(equal(&a, &b), TriLogic::True);
    }

    #[test]
    fn pair_interval_dominance() {
        // x = [2, 8], y = [3, 7]: y's interval is inside x's, so x atLeast y
        // holds only if x.first >= y.first and x.second <= y.second.
        let x = Value::pair(Value::Integer(2), Value::Integer(8));
        let y = Value::pair(Value::Integer(3), Value::Integer(7));
        assert_eq!(at_least(&x, &y), TriLogic::False); // 2 >= 3 is false
        let x2 = Value::pair(Value::Integer(5), Value::Integer(6));
        assert_eq!(at_least(&x2, &y), TriLogic::True); // 5>=3 and 6<=7
    }

    #[test]
    fn pair_vs_simple_is_uncomparable() {
        let p = Value::pair(Value::Integer(1), Value::Integer(2));
        let v = Value::Integer(1);
        assert_eq!(at_least(&p, &v), TriLogic::Uncomparable);
    }
}
