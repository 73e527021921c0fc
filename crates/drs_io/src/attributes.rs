//! Attribute-list JSON parsing (spec §6: "Input attributes serialized as a
//! JSON array of objects").
//!
//! Wire shape, field by field:
//!
//! - `name`: string.
//! - `active`: bool.
//! - `type`: `"CONDITION"` | `"DECISION"` | `"DESCRIPTION"` | `"identification"`.
//! - `preferenceType`: `"GAIN"` | `"COST"` | `"NONE"`.
//! - `valueType`: `"Integer"` | `"Real"` | `"Enumeration"` | `["Pair", <inner>]`.
//! - `domain`: array of strings, required when `valueType` is `"Enumeration"`
//!   (or a pair whose inner type is `"Enumeration"`).
//! - `missingValueType`: `"M15"` | `"M2"`.

use serde::Deserialize;

use drs_core::attribute::{Attribute, AttributeKind, EvaluationKind, MissingValueType, PreferenceType, ValueType};

use crate::errors::IoError;

#[derive(Deserialize)]
struct RawAttribute {
    name: String,
    active: bool,
    #[serde(rename = "type")]
    kind: String,
    #[serde(rename = "preferenceType")]
    preference_type: String,
    #[serde(rename = "valueType")]
    value_type: serde_json::Value,
    #[serde(default)]
    domain: Vec<String>,
    #[serde(rename = "missingValueType")]
    missing_value_type: String,
}

/// Parses a JSON array of attribute specs into `drs_core::Attribute` values,
/// in file order, validating the "at most one active decision / at most one
/// active identification attribute" rule at this boundary (spec §4.2) so the
/// caller gets a typed `IoError` rather than discovering the violation later
/// at `InformationTable::from_rows`.
pub fn parse_attributes(json: &str) -> Result<Vec<Attribute>, IoError> {
    let raw: Vec<RawAttribute> = serde_json::from_str(json)?;
    let mut attributes = Vec::with_capacity(raw.len());
    for r in raw {
        attributes.push(build_attribute(r)?);
    }

    let decisions = attributes.iter().filter(|a| a.is_active_decision()).count();
    if decisions > 1 {
        tracing::warn!(count = decisions, "more than one active decision attribute declared");
        return Err(IoError::Schema("more than one active decision attribute declared".into()));
    }
    let ids = attributes.iter().filter(|a| a.is_active_identification()).count();
    if ids > 1 {
        tracing::warn!(count = ids, "more than one active identification attribute declared");
        return Err(IoError::Schema("more than one active identification attribute declared".into()));
    }

    tracing::debug!(count = attributes.len(), "parsed attribute list");
    Ok(attributes)
}

fn build_attribute(r: RawAttribute) -> Result<Attribute, IoError> {
    if r.name.trim().is_empty() {
        return Err(IoError::MissingAttributeMetadata("<unnamed>".into()));
    }

    let kind = match r.kind.as_str() {
        "CONDITION" => AttributeKind::Evaluation(EvaluationKind::Condition),
        "DECISION" => AttributeKind::Evaluation(EvaluationKind::Decision),
        "DESCRIPTION" => AttributeKind::Evaluation(EvaluationKind::Description),
        "identification" => AttributeKind::Identification,
        other => {
            return Err(IoError::Schema(format!(
                "attribute `{}` has unknown type `{}`",
                r.name, other
            )))
        }
    };

    let preference = match r.preference_type.as_str() {
        "GAIN" => PreferenceType::Gain,
        "COST" => PreferenceType::Cost,
        "NONE" => PreferenceType::None,
        other => {
            return Err(IoError::Schema(format!(
                "attribute `{}` has unknown preferenceType `{}`",
                r.name, other
            )))
        }
    };

    let missing_value_type = match r.missing_value_type.as_str() {
        "M15" => MissingValueType::Mv15,
        "M2" => MissingValueType::Mv2,
        other => {
            return Err(IoError::Schema(format!(
                "attribute `{}` has unknown missingValueType `{}`",
                r.name, other
            )))
        }
    };

    let value_type = parse_value_type(&r.name, &r.value_type, &r.domain)?;

    Ok(Attribute {
        name: r.name,
        active: r.active,
        kind,
        preference,
        missing_value_type,
        value_type,
    })
}

fn parse_value_type(name: &str, v: &serde_json::Value, domain: &[String]) -> Result<ValueType, IoError> {
    if let Some(s) = v.as_str() {
        return parse_simple_value_type(name, s, domain);
    }
    if let Some(arr) = v.as_array() {
        if arr.len() == 2 && arr[0].as_str() == Some("Pair") {
            let inner = parse_value_type(name, &arr[1], domain)?;
            return Ok(ValueType::Pair(Box::new(inner)));
        }
    }
    Err(IoError::Schema(format!(
        "attribute `{}` has unrecognized valueType `{}`",
        name, v
    )))
}

fn parse_simple_value_type(name: &str, s: &str, domain: &[String]) -> Result<ValueType, IoError> {
    match s {
        "Integer" => Ok(ValueType::Integer),
        "Real" => Ok(ValueType::Real),
        "Enumeration" => {
            if domain.is_empty() {
                return Err(IoError::MissingAttributeMetadata(name.to_string()));
            }
            Ok(ValueType::Enumeration(domain.to_vec()))
        }
        other => Err(IoError::Schema(format!(
            "attribute `{}` has unrecognized valueType `{}`",
            name, other
        ))),
    }
}
