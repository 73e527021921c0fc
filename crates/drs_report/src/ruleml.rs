//! RuleML rendering of an induced [`RuleSet`] (spec §6: "Induced rules
//! serialized as RuleML: each rule is a conjunction of elementary conditions
//! implying a disjunctive decision, annotated with its type
//! (CERTAIN/POSSIBLE/APPROXIMATE) and semantics (AT_LEAST/AT_MOST/EQUAL)").

use std::io::Cursor;

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::writer::Writer;

use drs_algo::{Condition, DecisionRule, Relation, RuleSemantics, RuleSet, RuleType};
use drs_core::attribute::Attribute;

use crate::errors::ReportError;
use crate::value_text::value_to_string;

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

fn relation_symbol(relation: Relation) -> &'static str {
    match relation {
        Relation::GreaterOrEqual => ">=",
        Relation::LessOrEqual => "<=",
        Relation::Equal => "=",
    }
}

/// Renders every rule in `rule_set` to a `<ruleSet>` RuleML document. Each
/// rule's elementary conditions become one `<if>` conjunction and its
/// decision head becomes one `<then>` atom.
pub fn render_rule_set(rule_set: &RuleSet, attributes: &[Attribute]) -> Result<String, ReportError> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    writer.write_event(Event::Start(BytesStart::new("ruleSet")))?;
    for rule in rule_set.rules() {
        write_rule(&mut writer, rule, attributes)?;
    }
    writer.write_event(Event::End(BytesEnd::new("ruleSet")))?;

    let bytes = writer.into_inner().into_inner();
    String::from_utf8(bytes).map_err(|e| ReportError::Xml(e.to_string()))
}

fn write_rule<W: std::io::Write>(writer: &mut Writer<W>, rule: &DecisionRule, attributes: &[Attribute]) -> Result<(), ReportError> {
    let mut start = BytesStart::new("rule");
    start.push_attribute(("type", rule_type_label(rule.rule_type())));
    start.push_attribute(("semantics", semantics_label(rule.semantics())));
    writer.write_event(Event::Start(start))?;

    writer.write_event(Event::Start(BytesStart::new("if")))?;
    for condition in rule.conditions() {
        write_condition(writer, condition, attributes)?;
    }
    writer.write_event(Event::End(BytesEnd::new("if")))?;

    writer.write_event(Event::Start(BytesStart::new("then")))?;
    for value in rule.limiting_decision().values() {
        let attr = decision_attribute(attributes).ok_or(ReportError::MissingField("decision attribute"))?;
        let mut atom = BytesStart::new("atom");
        atom.push_attribute(("attribute", attr.name.as_str()));
        atom.push_attribute(("relation", semantics_relation(rule.semantics())));
        writer.write_event(Event::Start(atom))?;
        writer.write_event(Event::Text(BytesText::new(&value_to_string(attr, value))))?;
        writer.write_event(Event::End(BytesEnd::new("atom")))?;
    }
    writer.write_event(Event::End(BytesEnd::new("then")))?;

    writer.write_event(Event::End(BytesEnd::new("rule")))?;
    Ok(())
}

fn semantics_relation(semantics: RuleSemantics) -> &'static str {
    match semantics {
        RuleSemantics::AtLeast => ">=",
        RuleSemantics::AtMost => "<=",
        RuleSemantics::Equal => "=",
    }
}

fn decision_attribute(attributes: &[Attribute]) -> Option<&Attribute> {
    attributes.iter().find(|a| a.is_active_decision())
}

fn write_condition<W: std::io::Write>(writer: &mut Writer<W>, condition: &Condition, attributes: &[Attribute]) -> Result<(), ReportError> {
    let attr = attributes
        .get(condition.attribute_index())
        .ok_or(ReportError::MissingField("condition attribute"))?;

    let mut atom = BytesStart::new("atom");
    atom.push_attribute(("attribute", attr.name.as_str()));
    atom.push_attribute(("relation", relation_symbol(condition.relation())));
    writer.write_event(Event::Start(atom))?;
    writer.write_event(Event::Text(BytesText::new(&value_to_string(attr, condition.limiting_value()))))?;
    writer.write_event(Event::End(BytesEnd::new("atom")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use drs_algo::approximation::union::UnionType;
    use drs_algo::conditions::build_condition;
    use drs_algo::rule_conditions::RuleConditions;
    use drs_algo::approximation::union::Union;
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
    fn renders_one_certain_rule_with_one_condition() {
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

        let xml = render_rule_set(&set, &attrs).unwrap();
        assert!(xml.contains("type=\"CERTAIN\""));
        assert!(xml.contains("semantics=\"AT_LEAST\""));
        assert!(xml.contains("attribute=\"q\""));
        assert!(xml.contains("attribute=\"class\""));
    }
}
