//! VC-DomLEM sequential covering loop (spec §4.8).
//!
//! For one [`Union`], the coverer repeatedly builds a [`RuleConditions`]
//! covering part of the union's base object set `B` (Lower for certain
//! rules, Upper for possible, Boundary for approximate) while staying inside
//! the allowed-coverage set `A` (a region plus neutral objects), prunes the
//! rule's own conditions, removes what it covers from `B`, and repeats until
//! `B` is empty. A final rule-set pruning pass drops whole rules that turn
//! out to be redundant for covering the union's original base set.

use alloc::collections::BTreeSet;
use alloc::rc::Rc;
use alloc::vec::Vec;

use crate::approximation::calculator::{boundary, lower_approximation, upper_approximation, VariableConsistencyCalculator};
use crate::approximation::region::{classical_regions, vc_regions};
use crate::approximation::union::Union;
use crate::condition_generator::{get_best_condition, ConditionAdditionEvaluator};
use crate::conditions::RuleType;
use crate::dominance::DominanceCones;
use crate::errors::AlgoError;
use crate::rule_conditions::RuleConditions;

/// Decides when a growing [`RuleConditions`] is specific enough to stop
/// adding conditions (spec §4.8 `stoppingChecker`).
pub trait StoppingConditionChecker {
    fn is_satisfied(&self, rc: &RuleConditions) -> bool;
}

/// Satisfied once every currently covered object lies in the rule's allowed
/// set — the standard DomLEM stopping rule: stop as soon as the conditions
/// no longer let in anything outside what they're permitted to cover.
pub struct ConsistentCoverageStoppingChecker;

impl StoppingConditionChecker for ConsistentCoverageStoppingChecker {
    fn is_satisfied(&self, rc: &RuleConditions) -> bool {
        let allowed: BTreeSet<usize> = rc.allowed_objects().iter().copied().collect();
        rc.covered_objects().iter().all(|i| allowed.contains(i))
    }
}

/// Drops conditions that turn out to be unnecessary once the rest of the
/// rule is in place (spec §4.8 `conditionPruner`: "FIFO — try removing
/// earliest first").
pub trait ConditionPruner {
    fn prune(&self, rc: &mut RuleConditions, stopping: &dyn StoppingConditionChecker) -> Result<(), AlgoError>;
}

pub struct FifoConditionPruner;

impl ConditionPruner for FifoConditionPruner {
    fn prune(&self, rc: &mut RuleConditions, stopping: &dyn StoppingConditionChecker) -> Result<(), AlgoError> {
        let mut idx = 0;
        while idx < rc.conditions().len() {
            let removed = rc.remove_condition(idx)?;
            if stopping.is_satisfied(rc) {
                // Stays removed; the next condition has shifted into `idx`.
            } else {
                rc.insert_condition(idx, removed)?;
                idx += 1;
            }
        }
        Ok(())
    }
}

/// Drops whole rules from an emitted list whose removal still leaves the
/// remaining rules' coverage a superset of the union's original base set
/// (spec §4.8 `ruleSetPruner`).
pub trait RuleSetPruner {
    fn prune(&self, rules: Vec<RuleConditions>, base_objects_at_start: &[usize]) -> Vec<RuleConditions>;
}

pub struct CoverageRuleSetPruner;

impl RuleSetPruner for CoverageRuleSetPruner {
    fn prune(&self, rules: Vec<RuleConditions>, base_objects_at_start: &[usize]) -> Vec<RuleConditions> {
        let b0: BTreeSet<usize> = base_objects_at_start.iter().copied().collect();
        let mut kept = alloc::vec![true; rules.len()];
        for i in 0..rules.len() {
            kept[i] = false;
            let covered_without_i: BTreeSet<usize> = rules
                .iter()
                .enumerate()
                .filter(|(j, _)| kept[*j])
                .flat_map(|(_, r)| r.covered_objects().iter().copied())
                .collect();
            if !b0.is_subset(&covered_without_i) {
                kept[i] = true;
            }
        }
        rules.into_iter().zip(kept).filter_map(|(r, k)| if k { Some(r) } else { None }).collect()
    }
}

/// Number of `rc.positive_objects()` that `rc` currently covers — the
/// evaluation the global minimality checker compares across rules (spec
/// §4.8: "non-worse evaluation on every selected measure"; this crate's
/// resolution of that otherwise-undefined measure set is a single scalar,
/// positive coverage count, documented in `DESIGN.md`).
fn positive_coverage(rc: &RuleConditions) -> usize {
    let positive: BTreeSet<usize> = rc.positive_objects().iter().copied().collect();
    rc.covered_objects().iter().filter(|i| positive.contains(i)).count()
}

/// Is `rc` minimal against `accepted`? `rc` fails iff some already-accepted
/// rule's LHS is a superset of `rc`'s (modulo equivalence — exact `Condition`
/// equality here, since `Condition` is a plain value type) and that rule's
/// positive coverage is at least as large (spec §4.8, §3 glossary
/// "minimal").
pub fn is_minimal(rc: &RuleConditions, accepted: &[RuleConditions]) -> bool {
    !accepted.iter().any(|a| {
        let is_superset = rc.conditions().iter().all(|c| a.conditions().contains(c));
        is_superset && positive_coverage(a) >= positive_coverage(rc)
    })
}

/// The base (`B`) and allowed-coverage (`A`) object sets a rule of
/// `rule_type` is induced from, for the classical calculator (spec §4.8).
fn classical_base_and_allowed(union: &Rc<Union>, cones: &DominanceCones, rule_type: RuleType) -> (Vec<usize>, Vec<usize>) {
    let neutral = union.neutral_objects();
    match rule_type {
        RuleType::Certain => {
            let lower = lower_approximation(union, cones);
            let (positive, _, _) = classical_regions(union, cones);
            let allowed: BTreeSet<usize> = positive.into_iter().chain(neutral.iter().copied()).collect();
            (lower.to_vec(), allowed.into_iter().collect())
        }
        RuleType::Possible => {
            let upper = upper_approximation(union, cones);
            let (positive, _, boundary_region) = classical_regions(union, cones);
            let allowed: BTreeSet<usize> =
                positive.into_iter().chain(boundary_region.into_iter()).chain(neutral.iter().copied()).collect();
            (upper.to_vec(), allowed.into_iter().collect())
        }
        RuleType::Approximate => {
            let lower = lower_approximation(union, cones);
            let upper = upper_approximation(union, cones);
            let boundary_objects = boundary(&lower, &upper);
            let allowed: Vec<usize> = (0..union.table().num_objects()).collect();
            (boundary_objects, allowed)
        }
    }
}

/// Same as [`classical_base_and_allowed`], but under a variable-consistency
/// calculator's lower/upper approximations and regions.
fn vc_base_and_allowed(
    calc: &VariableConsistencyCalculator<'_>,
    union: &Rc<Union>,
    cones: &DominanceCones,
    rule_type: RuleType,
) -> (Vec<usize>, Vec<usize>) {
    let neutral = union.neutral_objects();
    match rule_type {
        RuleType::Certain => {
            let lower = calc.lower_approximation(union, cones);
            let (positive, _, _) = vc_regions(calc, union, cones);
            let allowed: BTreeSet<usize> = positive.into_iter().chain(neutral.iter().copied()).collect();
            (lower.to_vec(), allowed.into_iter().collect())
        }
        RuleType::Possible => {
            let upper = calc.upper_approximation(union, cones);
            let (positive, _, boundary_region) = vc_regions(calc, union, cones);
            let allowed: BTreeSet<usize> =
                positive.into_iter().chain(boundary_region.into_iter()).chain(neutral.iter().copied()).collect();
            (upper.to_vec(), allowed.into_iter().collect())
        }
        RuleType::Approximate => {
            let lower = calc.lower_approximation(union, cones);
            let upper = calc.upper_approximation(union, cones);
            let boundary_objects = boundary(&lower, &upper);
            let allowed: Vec<usize> = (0..union.table().num_objects()).collect();
            (boundary_objects, allowed)
        }
    }
}

/// Runs the sequential covering loop of spec §4.8 once `B`/`A` have been
/// chosen, then filters this union's rule-set-pruned output against the
/// global minimality checker (spec §4.8: "Per-union output is then filtered
/// by the minimality checker against the global set of already-accepted
/// rules") before folding the survivors into `accepted` for subsequent
/// unions to be checked against in turn.
fn cover(
    union: &Rc<Union>,
    mut base: Vec<usize>,
    allowed: Vec<usize>,
    rule_type: RuleType,
    evaluators: &[&dyn ConditionAdditionEvaluator],
    stopping: &dyn StoppingConditionChecker,
    condition_pruner: &dyn ConditionPruner,
    rule_set_pruner: &dyn RuleSetPruner,
    accepted: &mut Vec<RuleConditions>,
) -> Result<Vec<RuleConditions>, AlgoError> {
    base.sort_unstable();
    let base_at_start = base.clone();
    let mut emitted = Vec::new();

    while !base.is_empty() {
        let mut rc = RuleConditions::new(
            union.table().clone(),
            union.objects().to_vec(),
            base.clone(),
            allowed.clone(),
            union.neutral_objects().to_vec(),
        );
        let mut considered_objects = base.clone();

        while !stopping.is_satisfied(&rc) {
            match get_best_condition(&considered_objects, &rc, evaluators, union.union_type(), rule_type) {
                Ok(c) => {
                    rc.add_condition(c)?;
                    let covered: BTreeSet<usize> = rc.covered_objects().iter().copied().collect();
                    considered_objects.retain(|i| covered.contains(i));
                }
                Err(AlgoError::ElementaryConditionNotFound) => break,
                Err(e) => return Err(e),
            }
        }

        let conditions_before_pruning = rc.conditions().len();
        condition_pruner.prune(&mut rc, stopping)?;
        #[cfg(feature = "tracing")]
        if rc.conditions().len() < conditions_before_pruning {
            tracing::trace!(
                dropped = conditions_before_pruning - rc.conditions().len(),
                remaining = rc.conditions().len(),
                "condition pruner removed redundant conditions"
            );
        }

        let covered_in_base: BTreeSet<usize> = rc.covered_objects().iter().copied().filter(|i| base.binary_search(i).is_ok()).collect();
        let before = base.len();
        base.retain(|i| !covered_in_base.contains(i));
        #[cfg(feature = "tracing")]
        tracing::debug!(
            conditions = rc.conditions().len(),
            covered = rc.covered_objects().len(),
            remaining_base = base.len(),
            "emitted rule"
        );
        emitted.push(rc);
        if base.len() == before {
            #[cfg(feature = "tracing")]
            tracing::warn!(remaining_base = base.len(), "stopping condition never reached, base set stalled");
            return Err(AlgoError::ElementaryConditionNotFound);
        }
    }

    #[cfg(feature = "tracing")]
    tracing::trace!(emitted = emitted.len(), "rule-set pruning pass starting");
    let pruned = rule_set_pruner.prune(emitted, &base_at_start);

    let mut minimal = Vec::with_capacity(pruned.len());
    for rc in pruned {
        if is_minimal(&rc, accepted) {
            accepted.push(rc.clone());
            minimal.push(rc);
        } else {
            #[cfg(feature = "tracing")]
            tracing::debug!("dropped rule subsumed by an already-accepted rule with non-worse positive coverage");
        }
    }
    Ok(minimal)
}

/// Induces the `rule_type` rules for `union` under the classical DRSA
/// calculator, filtering against (and then extending) the caller's global
/// `accepted` set for cross-union minimality (spec §4.8).
pub fn induce_rules_for_union(
    union: &Rc<Union>,
    cones: &DominanceCones,
    rule_type: RuleType,
    evaluators: &[&dyn ConditionAdditionEvaluator],
    accepted: &mut Vec<RuleConditions>,
) -> Result<Vec<RuleConditions>, AlgoError> {
    let (base, allowed) = classical_base_and_allowed(union, cones, rule_type);
    cover(
        union,
        base,
        allowed,
        rule_type,
        evaluators,
        &ConsistentCoverageStoppingChecker,
        &FifoConditionPruner,
        &CoverageRuleSetPruner,
        accepted,
    )
}

/// Induces the `rule_type` rules for `union` under a variable-consistency
/// calculator, filtering against (and then extending) the caller's global
/// `accepted` set for cross-union minimality (spec §4.8).
pub fn induce_rules_for_union_vc(
    union: &Rc<Union>,
    cones: &DominanceCones,
    calc: &VariableConsistencyCalculator<'_>,
    rule_type: RuleType,
    evaluators: &[&dyn ConditionAdditionEvaluator],
    accepted: &mut Vec<RuleConditions>,
) -> Result<Vec<RuleConditions>, AlgoError> {
    let (base, allowed) = vc_base_and_allowed(calc, union, cones, rule_type);
    cover(
        union,
        base,
        allowed,
        rule_type,
        evaluators,
        &ConsistentCoverageStoppingChecker,
        &FifoConditionPruner,
        &CoverageRuleSetPruner,
        accepted,
    )
}
