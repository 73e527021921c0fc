//! Typed attribute (column) metadata (spec §3, §4.2).

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

pub use crate::value::MissingValueType;

/// Preference direction of an evaluation attribute. `None` marks a nominal
/// (non-criterion) attribute.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PreferenceType {
    Gain,
    Cost,
    None,
}

impl PreferenceType {
    /// `+1` for gain, `-1` for cost, `0` for non-preference attributes. Used
    /// by the condition generator to conflate an attribute's gain/cost
    /// direction with a union's AT_LEAST/AT_MOST semantics (spec §4.7 step 1).
    pub fn sign(self) -> i32 {
        match self {
            PreferenceType::Gain => 1,
            PreferenceType::Cost => -1,
            PreferenceType::None => 0,
        }
    }
}

/// The declared value type of an attribute's column.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum ValueType {
    Integer,
    Real,
    /// Nominal or ordinal domain; `domain` lists the element labels in the
    /// order their index is assigned (spec §3: "shared element list").
    Enumeration(Vec<String>),
    Pair(Box<ValueType>),
}

/// What role an attribute plays in the table.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum EvaluationKind {
    Condition,
    Decision,
    Description,
}

/// Top-level attribute kind (spec §3): either an evaluation attribute
/// (condition / decision / description) or an identification attribute.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum AttributeKind {
    Evaluation(EvaluationKind),
    Identification,
}

/// Named, typed column metadata.
#[derive(Clone, Debug)]
pub struct Attribute {
    pub name: String,
    pub active: bool,
    pub kind: AttributeKind,
    pub preference: PreferenceType,
    pub missing_value_type: MissingValueType,
    pub value_type: ValueType,
}

impl Attribute {
    pub fn is_active_decision(&self) -> bool {
        self.active && matches!(self.kind, AttributeKind::Evaluation(EvaluationKind::Decision))
    }

    pub fn is_active_identification(&self) -> bool {
        self.active && matches!(self.kind, AttributeKind::Identification)
    }

    pub fn is_active_condition(&self) -> bool {
        self.active && matches!(self.kind, AttributeKind::Evaluation(EvaluationKind::Condition))
    }

    /// An attribute is a *criterion* iff it carries a preference direction
    /// other than `None` (spec glossary: "Criterion").
    pub fn is_criterion(&self) -> bool {
        !matches!(self.preference, PreferenceType::None)
    }
}
