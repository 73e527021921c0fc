//! Row ingestion: CSV or JSON-array-of-objects, both converging on the
//! `Vec<Vec<Value>>` shape `InformationTable::from_rows` expects (spec §6).

use std::collections::BTreeMap;
use std::io::Read;

use drs_core::attribute::{Attribute, ValueType};
use drs_core::value::MissingValueType;
use drs_core::{CoreError, Value};

use crate::errors::IoError;

/// CSV dialect + missing-value convention. Defaults match spec §6: comma
/// delimiter, header row present, missing marker `?`.
#[derive(Clone, Debug)]
pub struct CsvIngestOptions {
    pub delimiter: u8,
    pub has_header: bool,
    pub missing_value_marker: String,
}

impl Default for CsvIngestOptions {
    fn default() -> Self {
        CsvIngestOptions {
            delimiter: b',',
            has_header: true,
            missing_value_marker: "?".to_string(),
        }
    }
}

/// Reads CSV rows aligned to `attributes`' order (one column per attribute,
/// in declaration order) into `Value`s typed per attribute.
pub fn parse_csv_rows<R: Read>(
    attributes: &[Attribute],
    reader: R,
    options: &CsvIngestOptions,
) -> Result<Vec<Vec<Value>>, IoError> {
    let mut builder = csv::ReaderBuilder::new();
    builder.delimiter(options.delimiter).has_headers(options.has_header).flexible(false);
    let mut csv_reader = builder.from_reader(reader);

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        if record.len() != attributes.len() {
            tracing::warn!(expected = attributes.len(), actual = record.len(), "csv row rejected: width mismatch");
            return Err(IoError::Core(CoreError::RowWidthMismatch {
                expected: attributes.len(),
                actual: record.len(),
            }));
        }
        let mut row = Vec::with_capacity(attributes.len());
        for (attr, field) in attributes.iter().zip(record.iter()) {
            row.push(parse_value_from_str(attr, field, &options.missing_value_marker)?);
        }
        rows.push(row);
    }
    tracing::debug!(count = rows.len(), "parsed csv rows");
    Ok(rows)
}

/// Reads a JSON array of objects keyed by attribute name. A missing key or
/// JSON `null` becomes a missing value; an object key naming no attribute is
/// rejected rather than silently dropped.
pub fn parse_json_rows(attributes: &[Attribute], json: &str) -> Result<Vec<Vec<Value>>, IoError> {
    let raw: Vec<BTreeMap<String, serde_json::Value>> = serde_json::from_str(json)?;
    let known: std::collections::BTreeSet<&str> = attributes.iter().map(|a| a.name.as_str()).collect();

    let mut rows = Vec::with_capacity(raw.len());
    for object in &raw {
        for key in object.keys() {
            if !known.contains(key.as_str()) {
                tracing::warn!(key = %key, "json row rejected: unknown attribute name");
                return Err(IoError::UnknownAttributeName(key.clone()));
            }
        }
        let mut row = Vec::with_capacity(attributes.len());
        for attr in attributes {
            let cell = object.get(&attr.name);
            row.push(parse_value_from_json(attr, cell)?);
        }
        rows.push(row);
    }
    tracing::debug!(count = rows.len(), "parsed json rows");
    Ok(rows)
}

fn parse_value_from_str(attr: &Attribute, raw: &str, missing_marker: &str) -> Result<Value, IoError> {
    if raw == missing_marker {
        return Ok(Value::Missing(attr.missing_value_type));
    }
    parse_typed_str(&attr.name, &attr.value_type, attr.missing_value_type, raw, missing_marker)
}

fn parse_typed_str(
    attr_name: &str,
    value_type: &ValueType,
    missing_value_type: MissingValueType,
    raw: &str,
    missing_marker: &str,
) -> Result<Value, IoError> {
    if raw == missing_marker {
        return Ok(Value::Missing(missing_value_type));
    }
    match value_type {
        ValueType::Integer => raw
            .parse::<i64>()
            .map(Value::Integer)
            .map_err(|e| invalid_value(attr_name, e.to_string())),
        ValueType::Real => raw
            .parse::<f64>()
            .map(Value::real)
            .map_err(|e| invalid_value(attr_name, e.to_string())),
        ValueType::Enumeration(domain) => domain
            .iter()
            .position(|label| label == raw)
            .map(Value::Enumeration)
            .ok_or_else(|| invalid_value(attr_name, alloc_format(raw))),
        ValueType::Pair(inner) => {
            let (first, second) = raw
                .split_once(':')
                .ok_or_else(|| invalid_value(attr_name, "pair value must be `first:second`".to_string()))?;
            let first_v = parse_typed_str(attr_name, inner, missing_value_type, first, missing_marker)?;
            let second_v = parse_typed_str(attr_name, inner, missing_value_type, second, missing_marker)?;
            Ok(Value::pair(first_v, second_v))
        }
    }
}

fn parse_value_from_json(attr: &Attribute, cell: Option<&serde_json::Value>) -> Result<Value, IoError> {
    match cell {
        None | Some(serde_json::Value::Null) => Ok(Value::Missing(attr.missing_value_type)),
        Some(v) => parse_typed_json(&attr.name, &attr.value_type, attr.missing_value_type, v),
    }
}

fn parse_typed_json(
    attr_name: &str,
    value_type: &ValueType,
    missing_value_type: MissingValueType,
    v: &serde_json::Value,
) -> Result<Value, IoError> {
    if v.is_null() {
        return Ok(Value::Missing(missing_value_type));
    }
    match value_type {
        ValueType::Integer => v
            .as_i64()
            .map(Value::Integer)
            .ok_or_else(|| invalid_value(attr_name, alloc_format(&v.to_string()))),
        ValueType::Real => v
            .as_f64()
            .map(Value::real)
            .ok_or_else(|| invalid_value(attr_name, alloc_format(&v.to_string()))),
        ValueType::Enumeration(domain) => v
            .as_str()
            .and_then(|s| domain.iter().position(|label| label == s))
            .map(Value::Enumeration)
            .ok_or_else(|| invalid_value(attr_name, alloc_format(&v.to_string()))),
        ValueType::Pair(inner) => {
            let arr = v
                .as_array()
                .filter(|a| a.len() == 2)
                .ok_or_else(|| invalid_value(attr_name, "pair value must be a 2-element array".to_string()))?;
            let first = parse_typed_json(attr_name, inner, missing_value_type, &arr[0])?;
            let second = parse_typed_json(attr_name, inner, missing_value_type, &arr[1])?;
            Ok(Value::pair(first, second))
        }
    }
}

fn invalid_value(attribute: &str, reason: String) -> IoError {
    IoError::Core(CoreError::InvalidValue { attribute: attribute.to_string(), reason })
}

fn alloc_format(raw: &str) -> String {
    format!("could not parse `{}`", raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use drs_core::attribute::{AttributeKind, EvaluationKind, PreferenceType};

    fn cond_attr(name: &str, value_type: ValueType) -> Attribute {
        Attribute {
            name: name.to_string(),
            active: true,
            kind: AttributeKind::Evaluation(EvaluationKind::Condition),
            preference: PreferenceType::Gain,
            missing_value_type: MissingValueType::Mv15,
            value_type,
        }
    }

    #[test]
    fn csv_rows_parse_typed_cells_and_missing_marker() {
        let attrs = vec![cond_attr("q1", ValueType::Integer), cond_attr("q2", ValueType::Real)];
        let csv_text = "q1,q2\n1,2.5\n?,3.0\n";
        let rows = parse_csv_rows(&attrs, csv_text.as_bytes(), &CsvIngestOptions::default()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], Value::Integer(1));
        assert_eq!(rows[1][0], Value::Missing(MissingValueType::Mv15));
    }

    #[test]
    fn csv_row_width_mismatch_is_fatal() {
        let attrs = vec![cond_attr("q1", ValueType::Integer)];
        let csv_text = "q1\n1,2\n";
        let err = parse_csv_rows(&attrs, csv_text.as_bytes(), &CsvIngestOptions::default()).unwrap_err();
        assert!(matches!(err, IoError::Core(CoreError::RowWidthMismatch { .. })));
    }

    #[test]
    fn json_rows_treat_absent_key_and_null_as_missing() {
        let attrs = vec![cond_attr("q1", ValueType::Integer)];
        let json = r#"[{"q1": 5}, {"q1": null}, {}]"#;
        let rows = parse_json_rows(&attrs, json).unwrap();
        assert_eq!(rows[0][0], Value::Integer(5));
        assert_eq!(rows[1][0], Value::Missing(MissingValueType::Mv15));
        assert_eq!(rows[2][0], Value::Missing(MissingValueType::Mv15));
    }

    #[test]
    fn json_rows_reject_unknown_attribute_name() {
        let attrs = vec![cond_attr("q1", ValueType::Integer)];
        let json = r#"[{"q1": 5, "bogus": 1}]"#;
        let err = parse_json_rows(&attrs, json).unwrap_err();
        assert!(matches!(err, IoError::UnknownAttributeName(k) if k == "bogus"));
    }

    #[test]
    fn pair_values_parse_both_sides() {
        let attrs = vec![cond_attr("interval", ValueType::Pair(Box::new(ValueType::Integer)))];
        let csv_text = "interval\n2:8\n";
        let rows = parse_csv_rows(&attrs, csv_text.as_bytes(), &CsvIngestOptions::default()).unwrap();
        assert_eq!(rows[0][0], Value::pair(Value::Integer(2), Value::Integer(8)));
    }
}
