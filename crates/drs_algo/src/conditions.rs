//! Elementary condition model (spec §4.5).
//!
//! A condition compares one object's evaluation on a chosen attribute
//! against a limiting value using one of `{≥, ≤, =}`, in one of two operand
//! orders. The two orders give the two rule-type phrasings: certain rules
//! read "object op threshold" ([`ConditionVariant::ThresholdVsObject`] —
//! despite the name, the object is the relation's left side, matching the
//! source's own naming), possible rules read "threshold op object"
//! ([`ConditionVariant::ObjectVsThreshold`]).

use drs_core::attribute::PreferenceType;
use drs_core::value::{at_least, at_most, equal, MissingValueType};
use drs_core::{InformationTable, Value};

use crate::approximation::union::UnionType;
use crate::errors::AlgoError;

#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum Relation {
    GreaterOrEqual,
    LessOrEqual,
    Equal,
}

#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum ConditionVariant {
    /// Certain-rule phrasing: evaluates `object_value relation limiting_value`.
    ThresholdVsObject,
    /// Possible-rule phrasing: evaluates `limiting_value relation object_value`.
    ObjectVsThreshold,
}

/// Which base object set (and therefore which condition phrasing) a rule is
/// induced from (spec §4.5, §4.8).
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum RuleType {
    Certain,
    Possible,
    Approximate,
}

/// An elementary condition: `attribute_index relation limiting_value`, read
/// in the operand order `variant` prescribes.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Condition {
    attribute_index: usize,
    relation: Relation,
    limiting_value: Value,
    variant: ConditionVariant,
}

impl Condition {
    pub fn attribute_index(&self) -> usize {
        self.attribute_index
    }

    pub fn relation(&self) -> Relation {
        self.relation
    }

    pub fn limiting_value(&self) -> &Value {
        &self.limiting_value
    }

    pub fn variant(&self) -> ConditionVariant {
        self.variant
    }

    /// Value-semantic copy (spec §4.5 `duplicate()` contract — `Condition`
    /// is already a plain value type, so `Clone` already provides this).
    pub fn duplicate(&self) -> Condition {
        self.clone()
    }

    /// Is this condition satisfied by object `i`? A missing evaluation is
    /// satisfied iff the attribute's missing flavor is MV1.5 (spec §4.5);
    /// this holds regardless of `relation`/`variant`.
    pub fn satisfied_by(&self, i: usize, table: &InformationTable) -> Result<bool, AlgoError> {
        let v = table.get_field(i, self.attribute_index)?;
        if v.is_missing() {
            let attr = &table.attributes()[self.attribute_index];
            return Ok(attr.missing_value_type == MissingValueType::Mv15);
        }
        let (lhs, rhs) = match self.variant {
            ConditionVariant::ThresholdVsObject => (v, &self.limiting_value),
            ConditionVariant::ObjectVsThreshold => (&self.limiting_value, v),
        };
        let result = match self.relation {
            Relation::GreaterOrEqual => at_least(lhs, rhs),
            Relation::LessOrEqual => at_most(lhs, rhs),
            Relation::Equal => equal(lhs, rhs),
        };
        Ok(result.is_true())
    }
}

/// The raw `{≥, ≤, =}` relation a certain/approximate rule condition on
/// `attribute_index` uses for `(union_type, preference)` (spec §4.7 rule-type
/// table). Exhaustive: every `(UnionType, PreferenceType)` pair has an
/// explicit arm (resolves spec §9's "missing `return`" open question — no
/// fallthrough default here or in [`build_condition`]).
fn resolve_relation(union_type: UnionType, preference: PreferenceType) -> Relation {
    match (union_type, preference) {
        (UnionType::AtLeast, PreferenceType::Gain) => Relation::GreaterOrEqual,
        (UnionType::AtLeast, PreferenceType::Cost) => Relation::LessOrEqual,
        (UnionType::AtLeast, PreferenceType::None) => Relation::Equal,
        (UnionType::AtMost, PreferenceType::Gain) => Relation::LessOrEqual,
        (UnionType::AtMost, PreferenceType::Cost) => Relation::GreaterOrEqual,
        (UnionType::AtMost, PreferenceType::None) => Relation::Equal,
    }
}

/// Builds the condition a rule of `rule_type` would use for `union_type` /
/// `preference` on `attribute_index` with limiting value `limiting_value`
/// (spec §4.7). Certain and approximate rules use the threshold-vs-object
/// phrasing; possible rules use the object-vs-threshold phrasing of the same
/// relation — this is the explicit-return fix for the dropped-`return`
/// source bug spec §9 calls out.
pub fn build_condition(
    rule_type: RuleType,
    union_type: UnionType,
    preference: PreferenceType,
    attribute_index: usize,
    limiting_value: Value,
) -> Condition {
    let relation = resolve_relation(union_type, preference);
    let variant = match rule_type {
        RuleType::Certain => ConditionVariant::ThresholdVsObject,
        RuleType::Approximate => ConditionVariant::ThresholdVsObject,
        RuleType::Possible => ConditionVariant::ObjectVsThreshold,
    };
    Condition { attribute_index, relation, limiting_value, variant }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drs_core::attribute::{Attribute, AttributeKind, EvaluationKind, ValueType};
    use drs_core::{ObjectIdGenerator, Value};
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

    fn cost_attr_mv2() -> Attribute {
        Attribute {
            name: "q".to_string(),
            active: true,
            kind: AttributeKind::Evaluation(EvaluationKind::Condition),
            preference: PreferenceType::Cost,
            missing_value_type: MissingValueType::Mv2,
            value_type: ValueType::Integer,
        }
    }

    fn table_with(attr: Attribute, values: &[i64]) -> InformationTable {
        let rows: Vec<Vec<Value>> = values.iter().map(|&v| vec![Value::Integer(v)]).collect();
        let gen = ObjectIdGenerator::new();
        InformationTable::from_rows(vec![attr], rows, &gen).unwrap()
    }

    /// Certain, AT_LEAST, gain: "q(x) >= t" — matches spec's worked example.
    #[test]
    fn certain_at_least_gain_is_object_at_least_threshold() {
        let table = table_with(gain_attr(), &[1, 5, 10]);
        let c = build_condition(RuleType::Certain, UnionType::AtLeast, PreferenceType::Gain, 0, Value::Integer(5));
        assert_eq!(c.relation(), Relation::GreaterOrEqual);
        assert_eq!(c.variant(), ConditionVariant::ThresholdVsObject);
        assert!(!c.satisfied_by(0, &table).unwrap());
        assert!(c.satisfied_by(1, &table).unwrap());
        assert!(c.satisfied_by(2, &table).unwrap());
    }

    /// Possible rules swap operand order relative to certain rules.
    #[test]
    fn possible_uses_object_vs_threshold_phrasing() {
        let c = build_condition(RuleType::Possible, UnionType::AtLeast, PreferenceType::Gain, 0, Value::Integer(5));
        assert_eq!(c.variant(), ConditionVariant::ObjectVsThreshold);
        assert_eq!(c.relation(), Relation::GreaterOrEqual);
    }

    /// AT_MOST flips the relation relative to AT_LEAST for the same preference.
    #[test]
    fn at_most_flips_relation() {
        let at_least = resolve_relation(UnionType::AtLeast, PreferenceType::Gain);
        let at_most = resolve_relation(UnionType::AtMost, PreferenceType::Gain);
        assert_eq!(at_least, Relation::GreaterOrEqual);
        assert_eq!(at_most, Relation::LessOrEqual);
    }

    /// Mv2-missing evaluation fails any condition on that attribute.
    #[test]
    fn mv2_missing_never_satisfies() {
        let attr = cost_attr_mv2();
        let rows = vec![vec![Value::Missing(MissingValueType::Mv2)]];
        let gen = ObjectIdGenerator::new();
        let table = InformationTable::from_rows(vec![attr], rows, &gen).unwrap();
        let c = build_condition(RuleType::Certain, UnionType::AtLeast, PreferenceType::Cost, 0, Value::Integer(5));
        assert!(!c.satisfied_by(0, &table).unwrap());
    }
}
