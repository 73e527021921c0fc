//! Positive/negative/boundary regions (spec §4.4.4).
//!
//! The source carries two competing definitions of `getPositiveRegion`; this
//! crate picks the cone-based one (spec §9 Open Question) because it is the
//! only one that stays consistent across the classical and variable-
//! consistency calculators: `PositiveRegion(U) = Lower(U) ∪ ⋃_{i ∈ Lower(U)}
//! Cone(i)`, where `Cone` is `D+` for an AT_LEAST union and `D-` for
//! AT_MOST. Regions cover the *full* object universe, neutral objects
//! included — unlike the approximations they're built from, which are
//! restricted to `objects ∪ complement_objects` (spec invariant 2: positive
//! ∪ negative ∪ boundary = all objects).

use alloc::collections::BTreeSet;
use alloc::rc::Rc;
use alloc::vec::Vec;

use crate::approximation::calculator::{cone_for, lower_of_complement_classical, VariableConsistencyCalculator};
use crate::approximation::union::Union;
use crate::dominance::DominanceCones;

/// `Lower(U) ∪ ⋃_{i ∈ lower} Cone(i)`, `Cone` in `U`'s own direction.
fn expand_own_cone(union_type: crate::approximation::union::UnionType, cones: &DominanceCones, lower: &[usize]) -> Vec<usize> {
    let mut set: BTreeSet<usize> = lower.iter().copied().collect();
    for &i in lower {
        set.extend(cone_for(union_type, false, cones, i).iter().copied());
    }
    set.into_iter().collect()
}

/// `Lower(complement(U))`'s positive region, read via the dual cone
/// direction (`PositiveRegion(complement(U))`, i.e. `NegativeRegion(U)`).
fn expand_dual_cone(union_type: crate::approximation::union::UnionType, cones: &DominanceCones, lower_of_complement: &[usize]) -> Vec<usize> {
    let mut set: BTreeSet<usize> = lower_of_complement.iter().copied().collect();
    for &i in lower_of_complement {
        set.extend(cone_for(union_type, true, cones, i).iter().copied());
    }
    set.into_iter().collect()
}

fn boundary_region(n: usize, positive: &[usize], negative: &[usize]) -> Vec<usize> {
    let covered: BTreeSet<usize> = positive.iter().chain(negative.iter()).copied().collect();
    (0..n).filter(|i| !covered.contains(i)).collect()
}

/// Classical positive/negative/boundary regions for `union` (spec §4.4.4).
pub fn classical_regions(union: &Rc<Union>, cones: &DominanceCones) -> (Vec<usize>, Vec<usize>, Vec<usize>) {
    let lower = crate::approximation::calculator::lower_approximation(union, cones);
    let positive = expand_own_cone(union.union_type(), cones, &lower);

    let lower_of_complement = lower_of_complement_classical(union.as_ref(), cones);
    let negative = expand_dual_cone(union.union_type(), cones, &lower_of_complement);

    let n = union.table().num_objects();
    let boundary = boundary_region(n, &positive, &negative);
    (positive, negative, boundary)
}

/// Variable-consistency positive/negative/boundary regions for `union`,
/// built from the calculator's own consistency-filtered lower approximation
/// on both sides of the duality.
pub fn vc_regions(
    calc: &VariableConsistencyCalculator<'_>,
    union: &Rc<Union>,
    cones: &DominanceCones,
) -> (Vec<usize>, Vec<usize>, Vec<usize>) {
    let lower = calc.lower_approximation(union, cones);
    let positive = expand_own_cone(union.union_type(), cones, &lower);

    let lower_of_complement = calc.lower_of_complement(union.as_ref(), cones);
    let negative = expand_dual_cone(union.union_type(), cones, &lower_of_complement);

    let n = union.table().num_objects();
    let boundary = boundary_region(n, &positive, &negative);
    (positive, negative, boundary)
}
