//! Error taxonomy for the approximation + rule-induction core (spec §7).

use core::fmt;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AlgoError {
    /// A limiting decision had no ordinal (criterion) active-decision
    /// contributor (spec §4.4.1 precondition).
    NoOrdinalDecisionAttribute,
    /// A variable-consistency calculator was built with zero measures.
    EmptyConsistencyMeasures,
    /// A variable-consistency calculator's measures and thresholds slices
    /// had different lengths.
    MeasureThresholdCountMismatch { measures: usize, thresholds: usize },
    /// The condition generator could not produce any new condition for the
    /// current rule conditions (spec §7: NotFound, recoverable locally).
    ElementaryConditionNotFound,
    /// A union's complementary union was already read (upper approximation
    /// materialized) when a second `set_complementary` was attempted.
    ComplementaryUnionAlreadySet,
    /// A condition-addition evaluator list changed monotonicity type more
    /// than once (spec §4.7 validation contract).
    EvaluatorMonotonicityMismatch,
    /// The condition generator was called with zero condition-addition
    /// evaluators.
    EmptyConditionEvaluators,
    /// Propagated bounds/structural error from `drs_core`.
    Core(drs_core::CoreError),
}

impl fmt::Display for AlgoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlgoError::NoOrdinalDecisionAttribute => {
                write!(f, "limiting decision has no ordinal active-decision contributor")
            }
            AlgoError::EmptyConsistencyMeasures => {
                write!(f, "variable-consistency calculator requires at least one measure")
            }
            AlgoError::MeasureThresholdCountMismatch { measures, thresholds } => write!(
                f,
                "consistency measure/threshold count mismatch: {measures} measures, {thresholds} thresholds"
            ),
            AlgoError::ElementaryConditionNotFound => {
                write!(f, "condition generator found no elementary condition to add")
            }
            AlgoError::ComplementaryUnionAlreadySet => {
                write!(f, "cannot set complementary union after upper approximation was materialized")
            }
            AlgoError::EvaluatorMonotonicityMismatch => {
                write!(f, "condition-addition evaluators switch monotonicity type more than once")
            }
            AlgoError::EmptyConditionEvaluators => {
                write!(f, "condition generator requires at least one condition-addition evaluator")
            }
            AlgoError::Core(e) => write!(f, "{e}"),
        }
    }
}

impl From<drs_core::CoreError> for AlgoError {
    fn from(e: drs_core::CoreError) -> Self {
        AlgoError::Core(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for AlgoError {}
