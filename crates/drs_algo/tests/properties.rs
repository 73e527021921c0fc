//! Property tests for the universal invariants of the approximation and
//! consistency layers (spec §8): lower ⊆ upper, region partition, epsilon
//! bounded in `[0, 1]`, and idempotent coverage bookkeeping. Run over small
//! randomly generated single-criterion tables rather than the fixed
//! hand-picked scenarios in the unit tests.

use std::collections::BTreeSet;

use proptest::prelude::*;

use drs_algo::approximation::calculator::{lower_approximation, upper_approximation};
use drs_algo::approximation::region::classical_regions;
use drs_algo::approximation::union::{Union, UnionType};
use drs_algo::consistency::{ConsistencyMeasure, Epsilon};
use drs_algo::dominance::DominanceCones;
use drs_algo::{induce_rules_with_characteristics, Ratio};
use drs_core::attribute::{Attribute, AttributeKind, EvaluationKind, PreferenceType, ValueType};
use drs_core::value::MissingValueType;
use drs_core::{Decision, InformationTable, ObjectIdGenerator, Value};

fn cond_attr() -> Attribute {
    Attribute {
        name: "q".to_string(),
        active: true,
        kind: AttributeKind::Evaluation(EvaluationKind::Condition),
        preference: PreferenceType::Gain,
        missing_value_type: MissingValueType::Mv15,
        value_type: ValueType::Integer,
    }
}

fn decision_attr() -> Attribute {
    Attribute {
        name: "class".to_string(),
        active: true,
        kind: AttributeKind::Evaluation(EvaluationKind::Decision),
        preference: PreferenceType::Gain,
        missing_value_type: MissingValueType::Mv15,
        value_type: ValueType::Integer,
    }
}

/// 2-9 objects, each a `(q, class)` pair with both values drawn from a
/// small range so ties and inconsistencies actually occur.
fn table_strategy() -> impl Strategy<Value = Vec<(i64, i64)>> {
    prop::collection::vec((0i64..6, 1i64..4), 2..10)
}

fn build_table(rows: &[(i64, i64)]) -> InformationTable {
    let attrs = vec![cond_attr(), decision_attr()];
    let values: Vec<Vec<Value>> = rows.iter().map(|&(q, c)| vec![Value::Integer(q), Value::Integer(c)]).collect();
    let gen = ObjectIdGenerator::new();
    InformationTable::from_rows(attrs, values, &gen).unwrap()
}

proptest! {
    /// Lower approximation is always a subset of upper approximation, for
    /// every class threshold present in the table.
    #[test]
    fn lower_is_subset_of_upper(rows in table_strategy()) {
        let table = build_table(&rows);
        let cones = DominanceCones::build(&table).unwrap();

        for class in 1..=3i64 {
            let union = match Union::new(&table, UnionType::AtLeast, Decision::simple(Value::Integer(class))) {
                Ok(u) => u,
                Err(_) => continue,
            };
            let lower = lower_approximation(&union, &cones);
            let upper = upper_approximation(&union, &cones);
            let upper_set: BTreeSet<usize> = upper.iter().copied().collect();
            for &i in lower.iter() {
                prop_assert!(upper_set.contains(&i));
            }
        }
    }

    /// Positive, negative and boundary regions always partition the full
    /// object universe with no overlap between positive and negative.
    #[test]
    fn regions_always_partition_objects(rows in table_strategy()) {
        let table = build_table(&rows);
        let cones = DominanceCones::build(&table).unwrap();
        let n = table.num_objects();

        for class in 1..=3i64 {
            let union = match Union::new(&table, UnionType::AtLeast, Decision::simple(Value::Integer(class))) {
                Ok(u) => u,
                Err(_) => continue,
            };
            let (positive, negative, boundary) = classical_regions(&union, &cones);

            let pos_set: BTreeSet<usize> = positive.iter().copied().collect();
            let neg_set: BTreeSet<usize> = negative.iter().copied().collect();
            prop_assert!(pos_set.is_disjoint(&neg_set));

            let mut all: Vec<usize> = positive.iter().chain(negative.iter()).chain(boundary.iter()).copied().collect();
            all.sort_unstable();
            all.dedup();
            prop_assert_eq!(all.len(), n);
            prop_assert_eq!(all, (0..n).collect::<Vec<_>>());
        }
    }

    /// Epsilon is always a ratio in `[0, 1]`, for every object and every
    /// class threshold.
    #[test]
    fn epsilon_is_bounded_in_unit_interval(rows in table_strategy()) {
        let table = build_table(&rows);
        let cones = DominanceCones::build(&table).unwrap();
        let zero = Ratio::new(0, 1);
        let one = Ratio::new(1, 1);

        for class in 1..=3i64 {
            let union = match Union::new(&table, UnionType::AtLeast, Decision::simple(Value::Integer(class))) {
                Ok(u) => u,
                Err(_) => continue,
            };
            for i in 0..table.num_objects() {
                let eps = Epsilon.evaluate(i, union.as_ref(), &cones);
                prop_assert!(zero.at_most(eps));
                prop_assert!(eps.at_most(one));
            }
        }
    }

    /// Recomputing a rule's coverage characteristics twice over the same
    /// table yields identical support/positive-covered/confidence figures.
    #[test]
    fn coverage_bookkeeping_is_idempotent(rows in table_strategy()) {
        let table = build_table(&rows);
        let Ok(first) = induce_rules_with_characteristics(&table) else { return Ok(()); };
        let Ok(second) = induce_rules_with_characteristics(&table) else { return Ok(()); };

        prop_assert_eq!(first.coverage.len(), second.coverage.len());
        for (a, b) in first.coverage.iter().zip(second.coverage.iter()) {
            prop_assert_eq!(a.support(), b.support());
            prop_assert_eq!(a.positive_covered(), b.positive_covered());
            prop_assert_eq!(a.confidence(), b.confidence());
        }
    }
}
