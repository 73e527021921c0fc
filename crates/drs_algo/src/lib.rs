//! drs_algo — DRSA / VC-DRSA approximation engine and VC-DomLEM
//! sequential-covering rule learner.
//!
//! Depends only on `drs_core`. Modules, in dependency order:
//!
//! - [`dominance`]: per-object dominance cones and cached decision-class
//!   distributions.
//! - [`consistency`]: object consistency measures (`Epsilon`) used by
//!   variable-consistency approximations.
//! - [`approximation`]: ordered-class unions, classical/VC lower-upper
//!   approximations, and region algebra.
//! - [`conditions`]: the elementary condition model.
//! - [`rule_conditions`]: incremental coverage bookkeeping for a rule under
//!   construction.
//! - [`condition_generator`]: best-condition search for the covering loop.
//! - [`coverer`]: the VC-DomLEM sequential covering loop, pruners, and
//!   minimality checker.
//! - [`rule`]: `DecisionRule` / `RuleSet` and coverage statistics.
//!
//! [`induce_rules`] / [`induce_rules_vc`] / [`induce_rules_with_characteristics`]
//! are the library's three entry points (spec §6).

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod errors;
pub mod dominance;
pub mod consistency;
pub mod approximation;
pub mod conditions;
pub mod rule_conditions;
pub mod condition_generator;
pub mod coverer;
pub mod rule;

use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use drs_core::{Decision, InformationTable};

pub use errors::AlgoError;
pub use consistency::{ConsistencyMeasure, Epsilon, MeasureSense, Ratio};
pub use conditions::{build_condition, Condition, ConditionVariant, Relation, RuleType};
pub use rule::{DecisionRule, RuleCoverageInfo, RuleSemantics, RuleSet};

use approximation::union::{Union, UnionType};
use condition_generator::{ConditionAdditionEvaluator, CoveredObjectsCountEvaluator, PositivePrecisionEvaluator};
use coverer::{induce_rules_for_union, induce_rules_for_union_vc};
use dominance::DominanceCones;
use approximation::calculator::VariableConsistencyCalculator;

/// A `RuleSet` together with the per-rule coverage statistics
/// [`induce_rules_with_characteristics`] computes.
pub struct RuleSetWithCharacteristics {
    pub rules: RuleSet,
    pub coverage: Vec<RuleCoverageInfo>,
}

/// Configuration for [`induce_rules_with_settings`]: which rule type to
/// induce (spec §4.8's three base/allowed-object policies, one per
/// [`RuleType`]) and, for variable-consistency induction, the epsilon
/// threshold gating lower-approximation membership (spec §4.4.3). The three
/// named entry points below are thin wrappers over this for the common
/// cases (spec §6).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct VcDomLemSettings {
    pub rule_type: RuleType,
    pub consistency_threshold: Option<Ratio>,
}

impl Default for VcDomLemSettings {
    /// Classical certain-rule induction: no consistency loosening.
    fn default() -> Self {
        VcDomLemSettings { rule_type: RuleType::Certain, consistency_threshold: None }
    }
}

impl VcDomLemSettings {
    pub fn classical(rule_type: RuleType) -> Self {
        VcDomLemSettings { rule_type, consistency_threshold: None }
    }

    pub fn variable_consistency(rule_type: RuleType, consistency_threshold: Ratio) -> Self {
        VcDomLemSettings { rule_type, consistency_threshold: Some(consistency_threshold) }
    }
}

/// Every distinct decision value present in `table`'s active decision
/// column, in ascending order (spec §4.4.1: each distinct value anchors one
/// AT_LEAST and one AT_MOST union).
fn decision_classes(table: &InformationTable) -> Result<Vec<Decision>, AlgoError> {
    table.active_decision_attribute_index().ok_or(AlgoError::NoOrdinalDecisionAttribute)?;
    let mut classes = BTreeSet::new();
    for i in 0..table.num_objects() {
        if let Some(d) = table.decision(i) {
            classes.insert(d);
        }
    }
    Ok(classes.into_iter().collect())
}

/// Runs the sequential coverer for `rule_type` over every AT_LEAST union
/// (upward) then every AT_MOST union (downward) anchored at each distinct
/// decision class, concatenating upward rules before downward ones (spec
/// §4.8's last line). Returns each rule paired with its union's positive
/// object set, for coverage statistics downstream.
fn induce_for_rule_type(
    table: &InformationTable,
    rule_type: RuleType,
    calc: Option<&VariableConsistencyCalculator<'_>>,
) -> Result<Vec<(DecisionRule, Vec<usize>)>, AlgoError> {
    let classes = decision_classes(table)?;
    let cones = DominanceCones::build(table)?;
    let count_eval = CoveredObjectsCountEvaluator;
    let precision_eval = PositivePrecisionEvaluator;
    let evaluators: [&dyn ConditionAdditionEvaluator; 2] = [&count_eval, &precision_eval];

    let mut result = Vec::new();
    let mut accepted = Vec::new();
    for union_type in [UnionType::AtLeast, UnionType::AtMost] {
        for class in &classes {
            let union = Union::new(table, union_type, class.clone())?;
            let rule_conditions = match calc {
                Some(c) => induce_rules_for_union_vc(&union, &cones, c, rule_type, &evaluators, &mut accepted)?,
                None => induce_rules_for_union(&union, &cones, rule_type, &evaluators, &mut accepted)?,
            };
            for rc in &rule_conditions {
                result.push((DecisionRule::from_rule_conditions(rc, rule_type, &union), union.objects().to_vec()));
            }
        }
    }
    Ok(result)
}

/// The single general entry point behind [`induce_rules`],
/// [`induce_rules_vc`] and [`induce_rules_with_characteristics`]: induces
/// `settings.rule_type` rules, classically or under variable consistency
/// depending on `settings.consistency_threshold`, and always reports
/// per-rule coverage statistics (the classical wrappers without
/// "characteristics" just discard them).
pub fn induce_rules_with_settings(table: &InformationTable, settings: &VcDomLemSettings) -> Result<RuleSetWithCharacteristics, AlgoError> {
    let eps = Epsilon;
    let pairs = match settings.consistency_threshold {
        Some(threshold) => {
            let measures: [&dyn ConsistencyMeasure; 1] = [&eps];
            let thresholds = [threshold];
            let calc = VariableConsistencyCalculator::new(&measures, &thresholds)?;
            induce_for_rule_type(table, settings.rule_type, Some(&calc))?
        }
        None => induce_for_rule_type(table, settings.rule_type, None)?,
    };

    let mut rules = Vec::with_capacity(pairs.len());
    let mut positives = Vec::with_capacity(pairs.len());
    for (rule, positive_objects) in pairs {
        rules.push(rule);
        positives.push(positive_objects);
    }
    let rule_set = RuleSet::from_rules(rules);
    let coverage = rule_set.coverage(table, &positives)?;
    Ok(RuleSetWithCharacteristics { rules: rule_set, coverage })
}

/// Classical DRSA certain-rule induction (spec §6 `induceRules(table)`).
pub fn induce_rules(table: &InformationTable) -> Result<RuleSet, AlgoError> {
    let settings = VcDomLemSettings::classical(RuleType::Certain);
    Ok(induce_rules_with_settings(table, &settings)?.rules)
}

/// Variable-consistency certain-rule induction under a single epsilon
/// threshold (spec §6 `induceRules(table, consistencyThreshold)`).
pub fn induce_rules_vc(table: &InformationTable, consistency_threshold: Ratio) -> Result<RuleSet, AlgoError> {
    let settings = VcDomLemSettings::variable_consistency(RuleType::Certain, consistency_threshold);
    Ok(induce_rules_with_settings(table, &settings)?.rules)
}

/// Classical certain-rule induction with per-rule coverage statistics (spec
/// §6 `induceRulesWithCharacteristics(table)`).
pub fn induce_rules_with_characteristics(table: &InformationTable) -> Result<RuleSetWithCharacteristics, AlgoError> {
    let settings = VcDomLemSettings::classical(RuleType::Certain);
    induce_rules_with_settings(table, &settings)
}
