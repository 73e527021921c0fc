//! Lower/upper approximation calculators (spec §4.4.2, §4.4.3).
//!
//! The upper approximation is always duality-based (spec §9 Open Question:
//! "`calculateUpperApproximation` is unimplemented in the source; the spec
//! prescribes the duality-based definition") — `Upper(U) = objects(U) ∪
//! (complement(U) \ Lower(complement(U)))`, where `complement(U)` is read
//! via [`ComplementView`] rather than re-derived from a predecessor decision
//! class.

use alloc::rc::Rc;
use alloc::vec::Vec;

use crate::approximation::union::{ComplementView, Union, UnionType, UnionView};
use crate::consistency::{ConsistencyMeasure, Ratio};
use crate::dominance::DominanceCones;
use crate::errors::AlgoError;

pub(crate) fn cone_for<'a>(union_type: UnionType, dual: bool, cones: &'a DominanceCones, i: usize) -> &'a [usize] {
    let use_positive = match union_type {
        UnionType::AtLeast => !dual,
        UnionType::AtMost => dual,
    };
    if use_positive {
        cones.positive_standard(i)
    } else {
        cones.negative_standard(i)
    }
}

/// Is every member of `i`'s directed cone inside `members ∪ neutral`?
/// `members` is `U`'s own object list for the classical case, or
/// `complement(U)`'s for the dual (duality-upper) case; `neutral` is shared
/// between a union and its complement.
pub(crate) fn cone_contained(union_type: UnionType, dual: bool, cones: &DominanceCones, i: usize, members: &[usize], neutral: &[usize]) -> bool {
    cone_for(union_type, dual, cones, i)
        .iter()
        .all(|j| members.binary_search(j).is_ok() || neutral.binary_search(j).is_ok())
}

fn upper_from_lower_of_complement(union: &Union, lower_of_complement: &[usize]) -> Vec<usize> {
    let mut result: Vec<usize> = union.objects().to_vec();
    for &i in union.complement_objects() {
        if !lower_of_complement.contains(&i) {
            result.push(i);
        }
    }
    result.sort_unstable();
    result
}

/// Classical lower approximation: members of `U` whose directed cone lies
/// entirely inside `U ∪ Neutral` (spec §4.4.2).
pub fn lower_approximation(union: &Rc<Union>, cones: &DominanceCones) -> Rc<Vec<usize>> {
    if let Some(cached) = union.cached_lower() {
        return cached;
    }
    let result: Vec<usize> = union
        .objects()
        .iter()
        .copied()
        .filter(|&i| cone_contained(union.union_type(), false, cones, i, union.objects(), union.neutral_objects()))
        .collect();
    union.set_lower(result)
}

/// `Lower(complement(U))`, read via the dual cone direction — the same set
/// the classical upper approximation and the region algebra both need.
pub(crate) fn lower_of_complement_classical(union: &Union, cones: &DominanceCones) -> Vec<usize> {
    union
        .complement_objects()
        .iter()
        .copied()
        .filter(|&i| cone_contained(union.union_type(), true, cones, i, union.complement_objects(), union.neutral_objects()))
        .collect()
}

/// Classical upper approximation, via the duality formula above.
pub fn upper_approximation(union: &Rc<Union>, cones: &DominanceCones) -> Rc<Vec<usize>> {
    if let Some(cached) = union.cached_upper() {
        return cached;
    }
    let lower_of_complement = lower_of_complement_classical(union.as_ref(), cones);
    let result = upper_from_lower_of_complement(union.as_ref(), &lower_of_complement);
    union.set_upper(result)
}

/// `Boundary(U) = Upper(U) \ Lower(U)` (spec §3 invariant 1).
pub fn boundary(lower: &[usize], upper: &[usize]) -> Vec<usize> {
    upper.iter().copied().filter(|i| lower.binary_search(i).is_err()).collect()
}

/// A variable-consistency calculator (spec §4.4.3): a non-empty, equal-length
/// list of measures and required thresholds.
pub struct VariableConsistencyCalculator<'a> {
    measures: &'a [&'a dyn ConsistencyMeasure],
    thresholds: &'a [Ratio],
}

impl<'a> VariableConsistencyCalculator<'a> {
    pub fn new(measures: &'a [&'a dyn ConsistencyMeasure], thresholds: &'a [Ratio]) -> Result<Self, AlgoError> {
        if measures.is_empty() {
            return Err(AlgoError::EmptyConsistencyMeasures);
        }
        if measures.len() != thresholds.len() {
            return Err(AlgoError::MeasureThresholdCountMismatch {
                measures: measures.len(),
                thresholds: thresholds.len(),
            });
        }
        Ok(VariableConsistencyCalculator { measures, thresholds })
    }

    pub(crate) fn is_consistent(&self, i: usize, view: &dyn UnionView, cones: &DominanceCones) -> bool {
        self.measures.iter().zip(self.thresholds.iter()).all(|(m, &t)| m.is_satisfied(i, view, cones, t))
    }

    /// `Lower(complement(U))` under this calculator's measures — the VC
    /// analogue of [`lower_of_complement_classical`]. Mirrors
    /// [`Self::lower_approximation`]'s own operator (consistency-filtering
    /// alone, no `cone_contained` conjunct) so that `Upper(U) =
    /// ¬Lower(complement(U))` stays a true duality instead of silently
    /// shrinking the complement-side lower approximation.
    pub(crate) fn lower_of_complement(&self, union: &Union, cones: &DominanceCones) -> Vec<usize> {
        let complement = ComplementView(union);
        union.complement_objects().iter().copied().filter(|&i| self.is_consistent(i, &complement, cones)).collect()
    }

    /// `i ∈ Lower(U)` iff `i ∈ U` and every configured measure is satisfied.
    pub fn lower_approximation(&self, union: &Rc<Union>, cones: &DominanceCones) -> Rc<Vec<usize>> {
        if let Some(cached) = union.cached_lower() {
            return cached;
        }
        let result: Vec<usize> =
            union.objects().iter().copied().filter(|&i| self.is_consistent(i, union.as_ref(), cones)).collect();
        union.set_lower(result)
    }

    /// Duality-based upper approximation, consistent with the classical one
    /// above but additionally consistency-filtered on the complement side.
    pub fn upper_approximation(&self, union: &Rc<Union>, cones: &DominanceCones) -> Rc<Vec<usize>> {
        if let Some(cached) = union.cached_upper() {
            return cached;
        }
        let lower_of_complement = self.lower_of_complement(union.as_ref(), cones);
        let result = upper_from_lower_of_complement(union.as_ref(), &lower_of_complement);
        union.set_upper(result)
    }
}
