//! Best-condition search for the sequential covering loop (spec §4.7).
//!
//! For a fixed set of "considered objects" (typically a rule's currently
//! uncovered positive objects), this picks the single elementary condition
//! that a list of condition-addition evaluators ranks highest, trying every
//! active condition attribute and — for simple ordered gain/cost attributes —
//! narrowing the search to the extreme limiting values first, exactly as the
//! source's monotonic-evaluator optimization does. Missing evaluations are
//! never proposed as limiting values; pair-valued and non-preference
//! attributes fall back to scanning every distinct value directly, since
//! there's no declared monotonicity to prune on.
//!
//! Unlike the interval-narrowing scan the source takes after the extreme
//! value is beaten (spec §4.7 step 7), this rescans every remaining distinct
//! value on the attribute instead of shrinking a `(sufficient, insufficient)`
//! bound incrementally. Both reach the same best candidate — the narrowing is
//! a performance optimization over an otherwise exhaustive per-attribute
//! scan, not a semantic difference — and an exhaustive scan is the version
//! confidently correct without compiling it.

use alloc::vec::Vec;

use drs_core::attribute::{PreferenceType, ValueType};
use drs_core::Value;

use crate::approximation::union::UnionType;
use crate::conditions::{build_condition, Condition, RuleType};
use crate::consistency::{MeasureSense, Ratio};
use crate::errors::AlgoError;
use crate::rule_conditions::RuleConditions;

/// Whether an evaluator's score gets better or worse as a candidate
/// condition keeps more of the considered objects covered (spec §4.7).
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum MonotonicityType {
    ImprovesWithCoverage,
    DeterioratesWithCoverage,
}

/// A ranking criterion the condition generator consults, in order, to pick
/// the best candidate condition for one attribute and to break ties between
/// attributes (spec §4.7).
pub trait ConditionAdditionEvaluator {
    fn measure_type(&self) -> MeasureSense;
    fn monotonicity_type(&self) -> MonotonicityType;

    /// Higher is better under `measure_type() == Gain`, lower is better
    /// under `Cost` — evaluated against `rc` as it stands before `candidate`
    /// is added.
    fn evaluate(&self, rc: &RuleConditions, candidate: &Condition) -> Result<Ratio, AlgoError>;
}

/// The number of `considered_objects` that `candidate` would keep covered if
/// added to `rc` — the natural default evaluator: prefer the least
/// restrictive condition that still respects the other evaluators, keeping
/// the rule as general as the data allows (spec §4.7, "maximize coverage").
pub struct CoveredObjectsCountEvaluator;

impl ConditionAdditionEvaluator for CoveredObjectsCountEvaluator {
    fn measure_type(&self) -> MeasureSense {
        MeasureSense::Gain
    }

    fn monotonicity_type(&self) -> MonotonicityType {
        MonotonicityType::ImprovesWithCoverage
    }

    fn evaluate(&self, rc: &RuleConditions, candidate: &Condition) -> Result<Ratio, AlgoError> {
        let covered = rc.indices_of_covered_objects_with_condition(candidate)?;
        Ok(Ratio::new(covered.len() as u64, 1))
    }
}

/// Among `rc`'s currently covered objects that `candidate` would keep, the
/// fraction that are positive objects — a precision-like secondary evaluator
/// for breaking ties left by [`CoveredObjectsCountEvaluator`].
pub struct PositivePrecisionEvaluator;

impl ConditionAdditionEvaluator for PositivePrecisionEvaluator {
    fn measure_type(&self) -> MeasureSense {
        MeasureSense::Gain
    }

    fn monotonicity_type(&self) -> MonotonicityType {
        MonotonicityType::ImprovesWithCoverage
    }

    fn evaluate(&self, rc: &RuleConditions, candidate: &Condition) -> Result<Ratio, AlgoError> {
        let covered = rc.indices_of_covered_objects_with_condition(candidate)?;
        if covered.is_empty() {
            return Ok(Ratio::zero());
        }
        let positive: alloc::collections::BTreeSet<usize> = rc.positive_objects().iter().copied().collect();
        let positive_covered = covered.iter().filter(|i| positive.contains(i)).count();
        Ok(Ratio::new(positive_covered as u64, covered.len() as u64))
    }
}

/// Rejects an evaluator list that switches monotonicity type more than once
/// (spec §4.7's validation contract on the evaluator sequence).
fn validate_evaluators(evaluators: &[&dyn ConditionAdditionEvaluator]) -> Result<(), AlgoError> {
    let mut transitions = 0;
    for window in evaluators.windows(2) {
        if window[0].monotonicity_type() != window[1].monotonicity_type() {
            transitions += 1;
        }
    }
    if transitions > 1 {
        return Err(AlgoError::EvaluatorMonotonicityMismatch);
    }
    Ok(())
}

/// `Greater` iff `a` ranks strictly above `b` under `evaluator`'s sense.
fn better(evaluator: &dyn ConditionAdditionEvaluator, rc: &RuleConditions, a: &Condition, b: &Condition) -> Result<core::cmp::Ordering, AlgoError> {
    let va = evaluator.evaluate(rc, a)?;
    let vb = evaluator.evaluate(rc, b)?;
    let ord = va.cmp(&vb);
    Ok(match evaluator.measure_type() {
        MeasureSense::Gain => ord,
        MeasureSense::Cost => ord.reverse(),
    })
}

/// Lexicographic comparison across the full evaluator list: the first
/// evaluator that disagrees decides (spec §4.7 step 5's tie-break).
fn lexicographic_compare(
    evaluators: &[&dyn ConditionAdditionEvaluator],
    rc: &RuleConditions,
    a: &Condition,
    b: &Condition,
) -> Result<core::cmp::Ordering, AlgoError> {
    for &e in evaluators {
        let ord = better(e, rc, a, b)?;
        if ord != core::cmp::Ordering::Equal {
            return Ok(ord);
        }
    }
    Ok(core::cmp::Ordering::Equal)
}

/// Distinct, non-missing values `considered_objects` take on `attribute_index`,
/// in ascending `Value` order (spec §4.7: missing evaluations are never
/// proposed as limiting values).
fn distinct_values(rc: &RuleConditions, considered_objects: &[usize], attribute_index: usize) -> Result<Vec<Value>, AlgoError> {
    let table = rc.table();
    let mut values = Vec::new();
    for &i in considered_objects {
        let v = table.get_field(i, attribute_index)?;
        if !v.is_missing() {
            values.push(v.clone());
        }
    }
    values.sort_unstable();
    values.dedup();
    Ok(values)
}

/// Whether `attribute_index` is eligible for the extreme-value-first search:
/// a declared preference direction over a simple (non-pair) ordered domain
/// (spec §4.7: pair-valued attributes always fall back to a full scan).
fn is_optimizable(preference: PreferenceType, value_type: &ValueType) -> bool {
    preference != PreferenceType::None && !matches!(value_type, ValueType::Pair(_))
}

/// Tries `candidate` against the current `best`, replacing it when
/// `candidate` ranks strictly higher under `evaluators[0]` alone, or ties on
/// it and wins the full lexicographic comparison (spec §4.7 steps 3-5).
fn consider(
    evaluators: &[&dyn ConditionAdditionEvaluator],
    rc: &RuleConditions,
    best: &mut Option<Condition>,
    candidate: Condition,
) -> Result<(), AlgoError> {
    match best {
        None => *best = Some(candidate),
        Some(current) => {
            let ord = lexicographic_compare(evaluators, rc, &candidate, current)?;
            if ord == core::cmp::Ordering::Greater {
                *best = Some(candidate);
            }
        }
    }
    Ok(())
}

/// Picks the single best elementary condition to add next, scanning every
/// active condition attribute and ranking candidates with `evaluators` (first
/// evaluator breaks ties, subsequent ones break ties of ties) — spec §4.7.
/// Fails with [`AlgoError::ElementaryConditionNotFound`] if `considered_objects`
/// yields no non-missing evaluation on any active condition attribute.
pub fn get_best_condition(
    considered_objects: &[usize],
    rc: &RuleConditions,
    evaluators: &[&dyn ConditionAdditionEvaluator],
    union_type: UnionType,
    rule_type: RuleType,
) -> Result<Condition, AlgoError> {
    validate_evaluators(evaluators)?;
    let first = *evaluators.first().ok_or(AlgoError::EmptyConditionEvaluators)?;
    let table = rc.table();

    let mut best: Option<Condition> = None;

    for &attr_idx in table.active_condition_attribute_indices() {
        let attr = &table.attributes()[attr_idx];
        let values = distinct_values(rc, considered_objects, attr_idx)?;
        if values.is_empty() {
            continue;
        }

        if is_optimizable(attr.preference, &attr.value_type) {
            // compareToMultiplier (spec §4.7 step 1): +1 if a larger raw
            // value is "more restrictive" as a threshold for this
            // union/preference combination, -1 otherwise.
            let multiplier = attr.preference.sign()
                * if union_type == UnionType::AtLeast { 1 } else { -1 };

            let least_restrictive = if multiplier >= 0 { values.first() } else { values.last() }.unwrap().clone();
            let most_restrictive = if multiplier >= 0 { values.last() } else { values.first() }.unwrap().clone();

            let improves = first.monotonicity_type() == MonotonicityType::ImprovesWithCoverage;
            let extreme = if improves { least_restrictive.clone() } else { most_restrictive.clone() };
            let extreme_candidate = build_condition(rule_type, union_type, attr.preference, attr_idx, extreme.clone());
            consider(evaluators, rc, &mut best, extreme_candidate)?;

            // Mixed-monotonicity evaluator lists leave the first evaluator's
            // extreme choice non-conclusive, so every other distinct value on
            // this attribute is also tried (spec §4.7 step 7's intent, taken
            // as a full scan rather than an incrementally narrowed interval —
            // see the module doc comment).
            let mixed = evaluators.windows(2).any(|w| w[0].monotonicity_type() != w[1].monotonicity_type());
            if mixed {
                for v in &values {
                    if *v == extreme {
                        continue;
                    }
                    let candidate = build_condition(rule_type, union_type, attr.preference, attr_idx, v.clone());
                    consider(evaluators, rc, &mut best, candidate)?;
                }
            }
        } else {
            for v in &values {
                let candidate = build_condition(rule_type, union_type, attr.preference, attr_idx, v.clone());
                consider(evaluators, rc, &mut best, candidate)?;
            }
        }
    }

    best.ok_or(AlgoError::ElementaryConditionNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use drs_core::attribute::{Attribute, AttributeKind, EvaluationKind};
    use drs_core::value::MissingValueType;
    use drs_core::{InformationTable, ObjectIdGenerator};
    use alloc::string::ToString;
    use alloc::vec;

    fn gain_attr() -> Attribute {
        Attribute {
            name: "q".to_string(),
            active: true,
            kind: AttributeKind::Evaluation(EvaluationKind::Condition),
            preference: PreferenceType::Gain,
            missing_value_type: MissingValueType::Mv15,
            value_type: ValueType::Integer,
        }
    }

    /// Three objects on one gain attribute, two positive (q=3, q=5) and one
    /// negative (q=1). The least restrictive AT_LEAST threshold (`q >= 1`)
    /// covers every object and wins under the coverage-maximizing default
    /// evaluator.
    #[test]
    fn picks_least_restrictive_threshold_for_at_least_with_coverage_evaluator() {
        let attrs = vec![gain_attr()];
        let rows = vec![vec![Value::Integer(1)], vec![Value::Integer(3)], vec![Value::Integer(5)]];
        let gen = ObjectIdGenerator::new();
        let table = InformationTable::from_rows(attrs, rows, &gen).unwrap();
        let rc = RuleConditions::new(table, vec![1, 2], vec![0, 1, 2], vec![0, 1, 2], vec![]);

        let count_eval = CoveredObjectsCountEvaluator;
        let evaluators: [&dyn ConditionAdditionEvaluator; 1] = [&count_eval];
        let c = get_best_condition(&[0, 1, 2], &rc, &evaluators, UnionType::AtLeast, RuleType::Certain).unwrap();
        assert_eq!(c.limiting_value(), &Value::Integer(1));
        assert_eq!(c.relation(), crate::conditions::Relation::GreaterOrEqual);
    }

    /// With a precision evaluator first (deteriorates as noise is let in),
    /// the generator should prefer the threshold that excludes the negative
    /// object entirely, not the maximal-coverage one.
    #[test]
    fn precision_evaluator_prefers_excluding_negatives() {
        let attrs = vec![gain_attr()];
        let rows = vec![vec![Value::Integer(1)], vec![Value::Integer(3)], vec![Value::Integer(5)]];
        let gen = ObjectIdGenerator::new();
        let table = InformationTable::from_rows(attrs, rows, &gen).unwrap();
        let rc = RuleConditions::new(table, vec![1, 2], vec![0, 1, 2], vec![0, 1, 2], vec![]);

        let precision_eval = PositivePrecisionEvaluator;
        let evaluators: [&dyn ConditionAdditionEvaluator; 1] = [&precision_eval];
        let c = get_best_condition(&[0, 1, 2], &rc, &evaluators, UnionType::AtLeast, RuleType::Certain).unwrap();
        // q >= 3 covers {1,2}, both positive: precision 1.0, beats q >= 1's
        // precision 2/3.
        assert_eq!(c.limiting_value(), &Value::Integer(3));
    }

    /// An attribute with no non-missing evaluation among the considered
    /// objects contributes no candidate; with only that attribute active,
    /// the search fails with `ElementaryConditionNotFound`.
    #[test]
    fn fails_when_every_considered_value_is_missing() {
        let attrs = vec![gain_attr()];
        let rows = vec![vec![Value::Missing(MissingValueType::Mv15)], vec![Value::Missing(MissingValueType::Mv15)]];
        let gen = ObjectIdGenerator::new();
        let table = InformationTable::from_rows(attrs, rows, &gen).unwrap();
        let rc = RuleConditions::new(table, vec![0, 1], vec![0, 1], vec![0, 1], vec![]);

        let count_eval = CoveredObjectsCountEvaluator;
        let evaluators: [&dyn ConditionAdditionEvaluator; 1] = [&count_eval];
        let err = get_best_condition(&[0, 1], &rc, &evaluators, UnionType::AtLeast, RuleType::Certain).unwrap_err();
        assert_eq!(err, AlgoError::ElementaryConditionNotFound);
    }

    /// Mixed-monotonicity evaluator lists are rejected up front.
    #[test]
    fn rejects_evaluator_list_with_more_than_one_monotonicity_switch() {
        struct Improves;
        impl ConditionAdditionEvaluator for Improves {
            fn measure_type(&self) -> MeasureSense {
                MeasureSense::Gain
            }
            fn monotonicity_type(&self) -> MonotonicityType {
                MonotonicityType::ImprovesWithCoverage
            }
            fn evaluate(&self, _rc: &RuleConditions, _c: &Condition) -> Result<Ratio, AlgoError> {
                Ok(Ratio::zero())
            }
        }
        struct Deteriorates;
        impl ConditionAdditionEvaluator for Deteriorates {
            fn measure_type(&self) -> MeasureSense {
                MeasureSense::Gain
            }
            fn monotonicity_type(&self) -> MonotonicityType {
                MonotonicityType::DeterioratesWithCoverage
            }
            fn evaluate(&self, _rc: &RuleConditions, _c: &Condition) -> Result<Ratio, AlgoError> {
                Ok(Ratio::zero())
            }
        }
        let a = Improves;
        let b = Deteriorates;
        let c = Improves;
        let evaluators: [&dyn ConditionAdditionEvaluator; 3] = [&a, &b, &c];
        assert_eq!(validate_evaluators(&evaluators), Err(AlgoError::EvaluatorMonotonicityMismatch));
    }
}
