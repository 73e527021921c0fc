//! The decision tuple of an object (spec §3).
//!
//! Usually of size one (`SimpleDecision`), but the design admits composite
//! decisions, so `Decision` is a thin wrapper over the full vector of active
//! decision-attribute values.

use alloc::vec;
use alloc::vec::Vec;

use crate::value::{self, TriLogic, Value};

/// The tuple of active decision values for one object.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Decision(Vec<Value>);

impl Decision {
    pub fn new(values: Vec<Value>) -> Self {
        Decision(values)
    }

    pub fn simple(value: Value) -> Self {
        Decision(vec![value])
    }

    pub fn values(&self) -> &[Value] {
        &self.0
    }

    pub fn is_simple(&self) -> bool {
        self.0.len() == 1
    }
}

/// Convenience alias: the common case of a single-attribute decision.
pub type SimpleDecision = Decision;

/// `atLeastAsGood`-style comparison between two (possibly composite)
/// decisions: `Uncomparable` if the vectors differ in length or any
/// component pair is uncomparable; otherwise `True` iff every `x[i]` is at
/// least as good as `y[i]` under the matching preference, combined as
/// "all components must hold" with `Uncomparable` poisoning the result.
pub fn at_least_as_good(
    x: &Decision,
    y: &Decision,
    preferences: &[crate::attribute::PreferenceType],
) -> TriLogic {
    if x.0.len() != y.0.len() || x.0.len() != preferences.len() {
        return TriLogic::Uncomparable;
    }
    let mut acc = TriLogic::True;
    for ((xv, yv), pref) in x.0.iter().zip(y.0.iter()).zip(preferences.iter()) {
        let cmp = value::at_least_as_good(xv, yv, *pref);
        acc = and3(acc, cmp);
        if acc == TriLogic::Uncomparable {
            return TriLogic::Uncomparable;
        }
    }
    acc
}

fn and3(a: TriLogic, b: TriLogic) -> TriLogic {
    match (a, b) {
        (TriLogic::Uncomparable, _) | (_, TriLogic::Uncomparable) => TriLogic::Uncomparable,
        (TriLogic::True, TriLogic::True) => TriLogic::True,
        _ => TriLogic::False,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::PreferenceType;

    #[test]
    fn simple_decision_dominance() {
        let a = Decision::simple(Value::Integer(3));
        let b = Decision::simple(Value::Integer(2));
        assert_eq!(at_least_as_good(&a, &b, &[PreferenceType::Gain]), TriLogic::True);
        assert_eq!(at_least_as_good(&b, &a, &[PreferenceType::Gain]), TriLogic::False);
    }
}
