//! Renders a `drs_core::Value` to text for presentation, resolving
//! `Enumeration` indices back to their declared domain labels via the
//! owning attribute's `ValueType` (spec §3: "shared element list").

use drs_core::attribute::{Attribute, ValueType};
use drs_core::Value;

/// Text for one value under `attribute`'s declared type. `Missing` always
/// renders as `?`, matching the CSV ingestion convention in `drs_io`.
pub fn value_to_string(attribute: &Attribute, value: &Value) -> String {
    render(&attribute.value_type, value)
}

fn render(value_type: &ValueType, value: &Value) -> String {
    match value {
        Value::Missing(_) => "?".to_string(),
        Value::Integer(n) => n.to_string(),
        Value::Real(f) => f.0.to_string(),
        Value::Enumeration(idx) => match value_type {
            ValueType::Enumeration(domain) => domain.get(*idx).cloned().unwrap_or_else(|| idx.to_string()),
            _ => idx.to_string(),
        },
        Value::Pair(first, second) => {
            let inner = match value_type {
                ValueType::Pair(inner) => inner.as_ref(),
                other => other,
            };
            format!("{}:{}", render(inner, first), render(inner, second))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drs_core::attribute::{AttributeKind, EvaluationKind, MissingValueType, PreferenceType};

    fn enum_attr() -> Attribute {
        Attribute {
            name: "class".to_string(),
            active: true,
            kind: AttributeKind::Evaluation(EvaluationKind::Decision),
            preference: PreferenceType::Gain,
            missing_value_type: MissingValueType::Mv15,
            value_type: ValueType::Enumeration(vec!["low".to_string(), "mid".to_string(), "high".to_string()]),
        }
    }

    #[test]
    fn enumeration_resolves_to_domain_label() {
        let attr = enum_attr();
        assert_eq!(value_to_string(&attr, &Value::Enumeration(1)), "mid");
    }

    #[test]
    fn missing_renders_as_question_mark() {
        let attr = enum_attr();
        assert_eq!(value_to_string(&attr, &Value::Missing(MissingValueType::Mv15)), "?");
    }
}
