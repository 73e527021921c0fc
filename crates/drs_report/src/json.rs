//! JSON rendering of an induced [`RuleSet`] (spec §6, JSON sibling of the
//! RuleML rendering): one object per rule with its conditions, semantics and
//! decision head spelled out as plain strings, plus optional coverage
//! statistics when available.

use serde::Serialize;

use drs_algo::{Condition, DecisionRule, Relation, RuleCoverageInfo, RuleSemantics, RuleSet, RuleType};
use drs_core::attribute::Attribute;

use crate::errors::ReportError;
use crate::value_text::value_to_string;

#[derive(Serialize)]
struct ConditionJson {
    attribute: String,
    relation: &'static str,
    value: String,
}

#[derive(Serialize)]
struct RuleJson {
    #[serde(rename = "type")]
    rule_type: &'static str,
    semantics: &'static str,
    conditions: Vec<ConditionJson>,
    decision: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    coverage: Option<CoverageJson>,
}

#[derive(Serialize)]
struct CoverageJson {
    support: usize,
    positive_covered: usize,
    confidence: f64,
}

#[derive(Serialize)]
struct RuleSetJson {
    rules: Vec<RuleJson>,
}

fn relation_symbol(relation: Relation) -> &'static str {
    match relation {
        Relation::GreaterOrEqual => ">=",
        Relation::LessOrEqual => "<=",
        Relation::Equal => "=",
    }
}

fn rule_type_label(rule_type: RuleType) -> &'static str {
    match rule_type {
        RuleType::Certain => "CERTAIN",
        RuleType::Possible => "POSSIBLE",
        RuleType::Approximate => "APPROXIMATE",
    }
}

fn semantics_label(semantics: RuleSemantics) -> &'static str {
    match semantics {
        RuleSemantics::AtLeast => "AT_LEAST",
        RuleSemantics::AtMost => "AT_MOST",
        RuleSemantics::Equal => "EQUAL",
    }
}

fn condition_to_json(condition: &Condition, attributes: &[Attribute]) -> Result<ConditionJson, ReportError> {
    let attr = attributes
        .get(condition.attribute_index())
        .ok_or(ReportError::MissingField("condition attribute"))?;
    Ok(ConditionJson {
        attribute: attr.name.clone(),
        relation: relation_symbol(condition.relation()),
        value: value_to_string(attr, condition.limiting_value()),
    })
}

fn rule_to_json(rule: &DecisionRule, attributes: &[Attribute], coverage: Option<&RuleCoverageInfo>) -> Result<RuleJson, ReportError> {
    let decision_attr = attributes
        .iter()
        .find(|a| a.is_active_decision())
        .ok_or(ReportError::MissingField("decision attribute"))?;

    let conditions = rule
        .conditions()
        .iter()
        .map(|c| condition_to_json(c, attributes))
        .collect::<Result<Vec<_>, _>>()?;

    let decision = rule
        .limiting_decision()
        .values()
        .iter()
        .map(|v| value_to_string(decision_attr, v))
        .collect();

    let coverage = coverage.map(|c| CoverageJson {
        support: c.support(),
        positive_covered: c.positive_covered(),
        confidence: c.confidence().as_f64(),
    });

    Ok(RuleJson {
        rule_type: rule_type_label(rule.rule_type()),
        semantics: semantics_label(rule.semantics()),
        conditions,
        decision,
        coverage,
    })
}

/// Renders `rule_set` to a pretty-printed JSON document, attaching per-rule
/// coverage when `coverage` is supplied (same length and order as
/// `rule_set.rules()`, per [`RuleSet::coverage`]'s contract).
pub fn render_rule_set(rule_set: &RuleSet, attributes: &[Attribute], coverage: Option<&[RuleCoverageInfo]>) -> Result<String, ReportError> {
    let rules = rule_set
        .rules()
        .iter()
        .enumerate()
        .map(|(i, rule)| rule_to_json(rule, attributes, coverage.and_then(|c| c.get(i))))
        .collect::<Result<Vec<_>, _>>()?;

    serde_json::to_string_pretty(&RuleSetJson { rules }).map_err(|e| ReportError::Json(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use drs_algo::approximation::union::{Union, UnionType};
    use drs_algo::build_condition;
    use drs_algo::rule_conditions::RuleConditions;
    use drs_core::attribute::{AttributeKind, EvaluationKind, MissingValueType, PreferenceType, ValueType};
    use drs_core::{Decision, InformationTable, ObjectIdGenerator, Value};

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

    #[test]
    fn renders_rule_with_coverage() {
        let attrs = vec![cond_attr(), decision_attr()];
        let rows = vec![vec![Value::Integer(1), Value::Integer(1)], vec![Value::Integer(5), Value::Integer(2)]];
        let gen = ObjectIdGenerator::new();
        let table = InformationTable::from_rows(attrs.clone(), rows, &gen).unwrap();
        let union = Union::new(&table, UnionType::AtLeast, Decision::simple(Value::Integer(2))).unwrap();

        let c = build_condition(RuleType::Certain, UnionType::AtLeast, PreferenceType::Gain, 0, Value::Integer(5));
        let mut rc = RuleConditions::new(table.clone(), vec![1], vec![1], vec![0, 1], vec![]);
        rc.add_condition(c).unwrap();
        let rule = DecisionRule::from_rule_conditions(&rc, RuleType::Certain, &union);

        let mut set = RuleSet::new();
        set.push(rule);
        let coverage = set.coverage(&table, &[vec![1]]).unwrap();

        let json = render_rule_set(&set, &attrs, Some(&coverage)).unwrap();
        assert!(json.contains("\"type\": \"CERTAIN\""));
        assert!(json.contains("\"semantics\": \"AT_LEAST\""));
        assert!(json.contains("\"support\": 1"));
    }
}
