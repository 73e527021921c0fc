//! Ordered-class unions (spec §3, §4.4.1).
//!
//! A [`Union`] partitions a table's objects into three disjoint sets:
//! `objects` (concordant members), `neutral_objects` (decision uncomparable
//! with the limiting decision), and `complement_objects` (concordantly not a
//! member). Lower/upper approximations and their complementary-union link
//! are memoised behind `RefCell`s and become immutable on first read — the
//! "set-once, before materialization" rule from spec §9 is enforced by
//! [`Union::set_complementary`].

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use drs_core::attribute::PreferenceType;
use drs_core::decision::at_least_as_good as decision_at_least_as_good;
use drs_core::{Decision, InformationTable, TriLogic};

use crate::errors::AlgoError;

#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum UnionType {
    AtLeast,
    AtMost,
}

/// What a consistency measure needs from a union: its direction, its
/// complement cardinality, and a classifier for arbitrary decision values.
/// Implemented by [`Union`] itself and by [`ComplementView`], which presents
/// a union's set-complement as a union in its own right (duality-based
/// upper approximation, spec §9 Open Question) without re-deriving a
/// predecessor decision class.
pub trait UnionView {
    fn union_type(&self) -> UnionType;
    fn complement_size(&self) -> usize;
    fn classify_decision(&self, d: &Decision) -> TriLogic;
}

impl UnionView for Union {
    fn union_type(&self) -> UnionType {
        self.union_type
    }

    fn complement_size(&self) -> usize {
        self.complement_objects.len()
    }

    fn classify_decision(&self, d: &Decision) -> TriLogic {
        Union::classify_decision(self, d)
    }
}

/// A union's set-complement, viewed as a union: membership is the logical
/// negation of the wrapped union's classification (neutral stays neutral),
/// which is exact regardless of whether the decision domain has a
/// well-defined "predecessor class".
pub struct ComplementView<'a>(pub &'a Union);

impl<'a> UnionView for ComplementView<'a> {
    fn union_type(&self) -> UnionType {
        match self.0.union_type {
            UnionType::AtLeast => UnionType::AtMost,
            UnionType::AtMost => UnionType::AtLeast,
        }
    }

    fn complement_size(&self) -> usize {
        self.0.objects.len()
    }

    fn classify_decision(&self, d: &Decision) -> TriLogic {
        match self.0.classify_decision(d) {
            TriLogic::True => TriLogic::False,
            TriLogic::False => TriLogic::True,
            TriLogic::Uncomparable => TriLogic::Uncomparable,
        }
    }
}

pub struct Union {
    table: InformationTable,
    union_type: UnionType,
    limiting_decision: Decision,
    preferences: Vec<PreferenceType>,
    objects: Vec<usize>,
    neutral_objects: Vec<usize>,
    complement_objects: Vec<usize>,
    complementary: RefCell<Option<Rc<Union>>>,
    lower: RefCell<Option<Rc<Vec<usize>>>>,
    upper: RefCell<Option<Rc<Vec<usize>>>>,
}

impl Union {
    /// Builds a union for `table` anchored at `limiting_decision`. Fails if
    /// the table's active decision attribute is not an ordered criterion
    /// (spec §4.4.1 precondition).
    pub fn new(
        table: &InformationTable,
        union_type: UnionType,
        limiting_decision: Decision,
    ) -> Result<Rc<Union>, AlgoError> {
        let preferences = decision_preferences(table)?;

        let n = table.num_objects();
        let mut objects = Vec::new();
        let mut neutral_objects = Vec::new();
        let mut complement_objects = Vec::new();

        for i in 0..n {
            match classify(table, union_type, &limiting_decision, &preferences, i) {
                TriLogic::True => objects.push(i),
                TriLogic::False => complement_objects.push(i),
                TriLogic::Uncomparable => neutral_objects.push(i),
            }
        }

        Ok(Rc::new(Union {
            table: table.clone(),
            union_type,
            limiting_decision,
            preferences,
            objects,
            neutral_objects,
            complement_objects,
            complementary: RefCell::new(None),
            lower: RefCell::new(None),
            upper: RefCell::new(None),
        }))
    }

    pub fn table(&self) -> &InformationTable {
        &self.table
    }

    pub fn union_type(&self) -> UnionType {
        self.union_type
    }

    pub fn limiting_decision(&self) -> &Decision {
        &self.limiting_decision
    }

    pub fn objects(&self) -> &[usize] {
        &self.objects
    }

    pub fn neutral_objects(&self) -> &[usize] {
        &self.neutral_objects
    }

    pub fn complement_objects(&self) -> &[usize] {
        &self.complement_objects
    }

    pub fn complement_size(&self) -> usize {
        self.complement_objects.len()
    }

    /// `isConcordantWithDecision` (spec §3 invariant 3): `TRUE` if `i` is a
    /// member, `UNCOMPARABLE` if neutral, `FALSE` if in the complement.
    pub fn concordance(&self, i: usize) -> TriLogic {
        classify(&self.table, self.union_type, &self.limiting_decision, &self.preferences, i)
    }

    /// Same classification, applied to an arbitrary decision value rather
    /// than an object index (used by consistency measures reading a cone's
    /// decision-class distribution).
    pub fn classify_decision(&self, d: &Decision) -> TriLogic {
        match self.union_type {
            UnionType::AtLeast => decision_at_least_as_good(d, &self.limiting_decision, &self.preferences),
            UnionType::AtMost => decision_at_least_as_good(&self.limiting_decision, d, &self.preferences),
        }
    }

    /// Links this union with its complementary union. Allowed only before
    /// this union's upper approximation has been materialized (spec §4.4.4,
    /// §9): doing so afterward would let the cached upper approximation go
    /// stale relative to the newly linked complement.
    pub fn set_complementary(&self, other: Rc<Union>) -> Result<(), AlgoError> {
        if self.upper.borrow().is_some() {
            return Err(AlgoError::ComplementaryUnionAlreadySet);
        }
        *self.complementary.borrow_mut() = Some(other);
        Ok(())
    }

    pub fn complementary(&self) -> Option<Rc<Union>> {
        self.complementary.borrow().clone()
    }

    pub(crate) fn cached_lower(&self) -> Option<Rc<Vec<usize>>> {
        self.lower.borrow().clone()
    }

    pub(crate) fn set_lower(&self, v: Vec<usize>) -> Rc<Vec<usize>> {
        let rc = Rc::new(v);
        *self.lower.borrow_mut() = Some(Rc::clone(&rc));
        rc
    }

    pub(crate) fn cached_upper(&self) -> Option<Rc<Vec<usize>>> {
        self.upper.borrow().clone()
    }

    pub(crate) fn set_upper(&self, v: Vec<usize>) -> Rc<Vec<usize>> {
        let rc = Rc::new(v);
        *self.upper.borrow_mut() = Some(Rc::clone(&rc));
        rc
    }
}

fn classify(
    table: &InformationTable,
    union_type: UnionType,
    limiting_decision: &Decision,
    preferences: &[PreferenceType],
    i: usize,
) -> TriLogic {
    let d = table.decision(i).expect("union requires an active decision attribute");
    match union_type {
        UnionType::AtLeast => decision_at_least_as_good(&d, limiting_decision, preferences),
        UnionType::AtMost => decision_at_least_as_good(limiting_decision, &d, preferences),
    }
}

fn decision_preferences(table: &InformationTable) -> Result<Vec<PreferenceType>, AlgoError> {
    let idx = table
        .active_decision_attribute_index()
        .ok_or(AlgoError::NoOrdinalDecisionAttribute)?;
    let pref = table.attributes()[idx].preference;
    if matches!(pref, PreferenceType::None) {
        return Err(AlgoError::NoOrdinalDecisionAttribute);
    }
    Ok(alloc::vec![pref])
}
