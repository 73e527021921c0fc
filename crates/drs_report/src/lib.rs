//! drs_report — RuleML and JSON rendering of an induced rule set (spec §6).
//!
//! Deliberately thin and outside the algorithmic core: this crate only
//! formats a `drs_algo::rule::RuleSet` against the `drs_core::Attribute`
//! list it was induced from. It does not induce rules itself.

#![forbid(unsafe_code)]

pub mod errors;
pub mod json;
pub mod ruleml;
pub mod value_text;

pub use errors::ReportError;
pub use json::render_rule_set as render_json;
pub use ruleml::render_rule_set as render_ruleml;
