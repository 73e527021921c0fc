//! Per-object dominance cones and their decision-class distributions
//! (spec §4.3).
//!
//! `D+(i)` and `D-(i)` are computed directly. The "inverted" cones are the
//! same relation with the roles of `i` and `j` swapped in the defining
//! formula, which makes `D+inv(i)` coincide with `D-(i)` and `D-inv(i)`
//! coincide with `D+(i)`; they are exposed as separate named accessors for
//! completeness, but consistency measures (epsilon included, §4.4.3) count
//! against the *standard* cone matching their union type — `D+(i)` for an
//! AT_LEAST union, `D-(i)` for AT_MOST — the same cone the classical lower
//! approximation tests, so that `epsilon(i, U) == 0` coincides exactly with
//! classical lower-approximation membership.

use alloc::collections::BTreeMap;
use alloc::vec;
use alloc::vec::Vec;

use drs_core::{CoreError, Decision, InformationTable};

/// One decision-class multiset: `decision -> count of objects with it`.
pub type DecisionDistribution = BTreeMap<Decision, usize>;

struct Cone {
    /// `members[i]` = sorted object indices belonging to the cone anchored
    /// at object `i`.
    members: Vec<Vec<usize>>,
    /// `distributions[i]` = decision multiset of `members[i]`.
    distributions: Vec<DecisionDistribution>,
}

/// All four dominance cones for every object of a table, computed once and
/// held read-only thereafter (spec §4.3, §5 "lazy caches... compute-once").
pub struct DominanceCones {
    positive_standard: Cone,
    negative_standard: Cone,
}

impl DominanceCones {
    /// Builds every cone and every per-object decision distribution.
    /// `O(n^2 * active_condition_attributes)`.
    pub fn build(table: &InformationTable) -> Result<Self, CoreError> {
        let n = table.num_objects();
        let mut positive_standard = Cone { members: vec![Vec::new(); n], distributions: vec![BTreeMap::new(); n] };
        let mut negative_standard = Cone { members: vec![Vec::new(); n], distributions: vec![BTreeMap::new(); n] };

        for i in 0..n {
            for j in 0..n {
                // j dominates i -> j belongs to D+(i).
                if dominates(table, j, i)? {
                    positive_standard.members[i].push(j);
                    if let Some(d) = table.decision(j) {
                        *positive_standard.distributions[i].entry(d).or_insert(0) += 1;
                    }
                }
                // i dominates j -> j belongs to D-(i).
                if dominates(table, i, j)? {
                    negative_standard.members[i].push(j);
                    if let Some(d) = table.decision(j) {
                        *negative_standard.distributions[i].entry(d).or_insert(0) += 1;
                    }
                }
            }
        }

        Ok(DominanceCones { positive_standard, negative_standard })
    }

    /// `D+(i)`: objects dominating `i`.
    pub fn positive_standard(&self, i: usize) -> &[usize] {
        &self.positive_standard.members[i]
    }

    /// `D-(i)`: objects dominated by `i`.
    pub fn negative_standard(&self, i: usize) -> &[usize] {
        &self.negative_standard.members[i]
    }

    /// `D+^-1(i)`: roles swapped in the `D+` formula, coincides with `D-(i)`.
    pub fn positive_inverted(&self, i: usize) -> &[usize] {
        &self.negative_standard.members[i]
    }

    /// `D-^-1(i)`: roles swapped in the `D-` formula, coincides with `D+(i)`.
    pub fn negative_inverted(&self, i: usize) -> &[usize] {
        &self.positive_standard.members[i]
    }

    pub fn positive_standard_distribution(&self, i: usize) -> &DecisionDistribution {
        &self.positive_standard.distributions[i]
    }

    pub fn negative_standard_distribution(&self, i: usize) -> &DecisionDistribution {
        &self.negative_standard.distributions[i]
    }

    pub fn positive_inverted_distribution(&self, i: usize) -> &DecisionDistribution {
        &self.negative_standard.distributions[i]
    }

    pub fn negative_inverted_distribution(&self, i: usize) -> &DecisionDistribution {
        &self.positive_standard.distributions[i]
    }
}

/// Does `a` dominate `b` on every active-condition attribute? Gain criteria
/// require `v(a) >= v(b)`, cost `v(a) <= v(b)`, non-preference attributes
/// equality — exactly `at_least_as_good(v(a), v(b), pref)`.
fn dominates(table: &InformationTable, a: usize, b: usize) -> Result<bool, CoreError> {
    for &idx in table.active_condition_attribute_indices() {
        let pref = table.attributes()[idx].preference;
        let va = table.get_field(a, idx)?;
        let vb = table.get_field(b, idx)?;
        if !drs_core::value::at_least_as_good(va, vb, pref).is_true() {
            return Ok(false);
        }
    }
    Ok(true)
}
