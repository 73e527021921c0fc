//! Decision rules and rule sets (spec §3, §4.8, §6).
//!
//! A [`DecisionRule`] is the frozen output of one sequential-covering round:
//! a conjunction of [`Condition`]s plus a disjunctive decision head described
//! by a [`RuleSemantics`] and a limiting [`Decision`] ("decision is at least
//! / at most / equal to this value"). [`RuleSet`] collects every rule induced
//! across every union processed, in emission order, and can recompute
//! per-rule coverage statistics against any table.

use alloc::vec::Vec;

use drs_core::{Decision, InformationTable};

use crate::approximation::union::{Union, UnionType};
use crate::conditions::{Condition, RuleType};
use crate::consistency::Ratio;
use crate::errors::AlgoError;
use crate::rule_conditions::RuleConditions;

/// The decision head's relation to its limiting value (spec §6: "semantics
/// (AT_LEAST/AT_MOST/EQUAL)"). Rules built from a [`Union`] (this crate's
/// only construction path) are always `AtLeast` or `AtMost`; `Equal` is part
/// of the external output contract for completeness but has no producer
/// here, since [`Union`] requires an ordinal decision attribute.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum RuleSemantics {
    AtLeast,
    AtMost,
    Equal,
}

impl From<UnionType> for RuleSemantics {
    fn from(t: UnionType) -> RuleSemantics {
        match t {
            UnionType::AtLeast => RuleSemantics::AtLeast,
            UnionType::AtMost => RuleSemantics::AtMost,
        }
    }
}

/// One induced rule: `conditions[0] ∧ conditions[1] ∧ ... ⇒ decision
/// semantics limiting_decision`.
#[derive(Clone, Debug)]
pub struct DecisionRule {
    rule_type: RuleType,
    semantics: RuleSemantics,
    limiting_decision: Decision,
    conditions: Vec<Condition>,
}

impl DecisionRule {
    pub fn rule_type(&self) -> RuleType {
        self.rule_type
    }

    pub fn semantics(&self) -> RuleSemantics {
        self.semantics
    }

    pub fn limiting_decision(&self) -> &Decision {
        &self.limiting_decision
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Does object `i` satisfy every condition (spec §8 invariant 10: rule
    /// LHS soundness)?
    pub fn covers(&self, i: usize, table: &InformationTable) -> Result<bool, AlgoError> {
        for c in &self.conditions {
            if !c.satisfied_by(i, table)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Builds the frozen rule a finished [`RuleConditions`] represents,
    /// carrying along the union it was induced from for its decision head.
    pub fn from_rule_conditions(rc: &RuleConditions, rule_type: RuleType, union: &Union) -> DecisionRule {
        DecisionRule {
            rule_type,
            semantics: RuleSemantics::from(union.union_type()),
            limiting_decision: union.limiting_decision().clone(),
            conditions: rc.conditions().to_vec(),
        }
    }
}

/// Coverage statistics for one rule against a table: which objects satisfy
/// it, and how many of those are positive for the union it was induced from.
#[derive(Clone, Debug)]
pub struct RuleCoverageInfo {
    covered_objects: Vec<usize>,
    positive_covered: usize,
}

impl RuleCoverageInfo {
    pub fn covered_objects(&self) -> &[usize] {
        &self.covered_objects
    }

    pub fn support(&self) -> usize {
        self.covered_objects.len()
    }

    pub fn positive_covered(&self) -> usize {
        self.positive_covered
    }

    /// Fraction of covered objects that are positive for the rule's union —
    /// 0/1 (not an error) when the rule covers nothing.
    pub fn confidence(&self) -> Ratio {
        if self.covered_objects.is_empty() {
            Ratio::zero()
        } else {
            Ratio::new(self.positive_covered as u64, self.covered_objects.len() as u64)
        }
    }

    fn compute(rule: &DecisionRule, table: &InformationTable, positive_objects: &[usize]) -> Result<RuleCoverageInfo, AlgoError> {
        let positive: alloc::collections::BTreeSet<usize> = positive_objects.iter().copied().collect();
        let mut covered_objects = Vec::new();
        let mut positive_covered = 0;
        for i in 0..table.num_objects() {
            if rule.covers(i, table)? {
                covered_objects.push(i);
                if positive.contains(&i) {
                    positive_covered += 1;
                }
            }
        }
        Ok(RuleCoverageInfo { covered_objects, positive_covered })
    }
}

/// An ordered collection of induced rules (spec §4.8: "upward and downward
/// rule sets...are concatenated in that order" for the VC wrapper).
#[derive(Clone, Debug, Default)]
pub struct RuleSet {
    rules: Vec<DecisionRule>,
}

impl RuleSet {
    pub fn new() -> RuleSet {
        RuleSet { rules: Vec::new() }
    }

    pub fn from_rules(rules: Vec<DecisionRule>) -> RuleSet {
        RuleSet { rules }
    }

    pub fn rules(&self) -> &[DecisionRule] {
        &self.rules
    }

    pub fn push(&mut self, rule: DecisionRule) {
        self.rules.push(rule);
    }

    pub fn extend(&mut self, other: RuleSet) {
        self.rules.extend(other.rules);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Recomputes coverage statistics for every rule against `table`, with
    /// `positive_objects` supplying each rule's "positive" set in parallel
    /// (same length and order as `self.rules()`).
    pub fn coverage(&self, table: &InformationTable, positive_objects: &[Vec<usize>]) -> Result<Vec<RuleCoverageInfo>, AlgoError> {
        self.rules
            .iter()
            .zip(positive_objects.iter())
            .map(|(rule, positives)| RuleCoverageInfo::compute(rule, table, positives))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::approximation::union::UnionType;
    use crate::conditions::build_condition;
    use drs_core::attribute::{Attribute, AttributeKind, EvaluationKind, PreferenceType, ValueType};
    use drs_core::value::MissingValueType;
    use drs_core::{InformationTable, ObjectIdGenerator, Value};
    use alloc::string::ToString;
    use alloc::vec;

    fn cond_attr() -> Attribute {
        Attribute {
            name: "q".to_string(),
            active: true,
            kind: AttributeKind::Evaluation(EvaluationKind::Condition),
            preference: PreferenceType::Gain,
            missing_value_type: MissingValueType::Mv15,
            value_type: ValueType::Integer,
        }
    }

    fn decision_attr() -> Attribute {
        Attribute {
            name: "class".to_string(),
            active: true,
            kind: AttributeKind::Evaluation(EvaluationKind::Decision),
            preference: PreferenceType::Gain,
            missing_value_type: MissingValueType::Mv15,
            value_type: ValueType::Integer,
        }
    }

    fn row(q: i64, class: i64) -> Vec<Value> {
        vec![Value::Integer(q), Value::Integer(class)]
    }

    #[test]
    fn rule_soundness_over_all_objects() {
        let attrs = vec![cond_attr(), decision_attr()];
        let rows = vec![row(1, 1), row(2, 2), row(3, 2), row(4, 3)];
        let gen = ObjectIdGenerator::new();
        let table = InformationTable::from_rows(attrs, rows, &gen).unwrap();
        let union = Union::new(&table, UnionType::AtLeast, Decision::simple(Value::Integer(2))).unwrap();

        let c = build_condition(RuleType::Certain, UnionType::AtLeast, PreferenceType::Gain, 0, Value::Integer(2));
        let mut rc = RuleConditions::new(table.clone(), vec![1, 2, 3], vec![1, 2, 3], vec![0, 1, 2, 3], vec![]);
        rc.add_condition(c).unwrap();

        let rule = DecisionRule::from_rule_conditions(&rc, RuleType::Certain, &union);
        assert_eq!(rule.semantics(), RuleSemantics::AtLeast);
        assert!(!rule.covers(0, &table).unwrap());
        assert!(rule.covers(1, &table).unwrap());
        assert!(rule.covers(2, &table).unwrap());
        assert!(rule.covers(3, &table).unwrap());
    }

    #[test]
    fn coverage_reports_support_and_confidence() {
        let attrs = vec![cond_attr(), decision_attr()];
        let rows = vec![row(1, 1), row(2, 2), row(3, 2), row(4, 3)];
        let gen = ObjectIdGenerator::new();
        let table = InformationTable::from_rows(attrs, rows, &gen).unwrap();
        let union = Union::new(&table, UnionType::AtLeast, Decision::simple(Value::Integer(2))).unwrap();

        let c = build_condition(RuleType::Certain, UnionType::AtLeast, PreferenceType::Gain, 0, Value::Integer(2));
        let mut rc = RuleConditions::new(table.clone(), vec![1, 2, 3], vec![1, 2, 3], vec![0, 1, 2, 3], vec![]);
        rc.add_condition(c).unwrap();

        let rule = DecisionRule::from_rule_conditions(&rc, RuleType::Certain, &union);
        let mut set = RuleSet::new();
        set.push(rule);

        let coverage = set.coverage(&table, &[vec![1, 2, 3]]).unwrap();
        assert_eq!(coverage[0].support(), 3);
        assert_eq!(coverage[0].positive_covered(), 3);
        assert!(coverage[0].confidence().at_least(Ratio::new(1, 1)));
    }
}
