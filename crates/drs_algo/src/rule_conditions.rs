//! Incremental coverage bookkeeping for a rule under construction
//! (spec §4.6).
//!
//! `RuleConditions` holds the ordered condition list for one rule together
//! with a per-object `notCoveringConditionsCount` counter: object `i` is
//! covered iff its counter is zero. Both `addCondition`/`removeCondition`
//! update the counter and the covered-index list by an exact delta in
//! `O(num_objects)`, never by recomputing coverage from scratch.

use alloc::vec::Vec;

use drs_core::InformationTable;

use crate::conditions::Condition;
use crate::errors::AlgoError;

/// One rule's growing left-hand side plus the bookkeeping the sequential
/// coverer and condition generator need to evaluate candidate extensions
/// cheaply.
#[derive(Clone)]
pub struct RuleConditions {
    table: InformationTable,
    conditions: Vec<Condition>,
    /// Objects this rule is meant to cover (its union's members) — the
    /// positive set for minimality/evaluator computations.
    positive_objects: Vec<usize>,
    /// The base object set the induction loop is working through (Lower,
    /// Upper or Boundary, depending on rule type).
    base_objects: Vec<usize>,
    /// Objects this rule is allowed to cover besides `positive_objects`
    /// (the region + neutral objects, per spec §4.8).
    allowed_objects: Vec<usize>,
    neutral_objects: Vec<usize>,
    not_covering_count: Vec<u32>,
    covered: Vec<usize>,
}

impl RuleConditions {
    /// Starts a fresh, condition-free `RuleConditions` over `table`'s
    /// `num_objects` objects — initially every object is covered (zero
    /// conditions restrict nothing).
    pub fn new(
        table: InformationTable,
        positive_objects: Vec<usize>,
        base_objects: Vec<usize>,
        allowed_objects: Vec<usize>,
        neutral_objects: Vec<usize>,
    ) -> RuleConditions {
        let n = table.num_objects();
        RuleConditions {
            table,
            conditions: Vec::new(),
            positive_objects,
            base_objects,
            allowed_objects,
            neutral_objects,
            not_covering_count: alloc::vec![0u32; n],
            covered: (0..n).collect(),
        }
    }

    pub fn table(&self) -> &InformationTable {
        &self.table
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn positive_objects(&self) -> &[usize] {
        &self.positive_objects
    }

    pub fn base_objects(&self) -> &[usize] {
        &self.base_objects
    }

    pub fn allowed_objects(&self) -> &[usize] {
        &self.allowed_objects
    }

    pub fn neutral_objects(&self) -> &[usize] {
        &self.neutral_objects
    }

    /// `O(1)` lookup: is `i` currently covered by every stored condition?
    pub fn covers(&self, i: usize) -> bool {
        self.not_covering_count[i] == 0
    }

    /// `O(#conditions)` re-check, independent of the counter array (spec
    /// §4.6 `covers` contract's verification path).
    pub fn covers_recheck(&self, i: usize) -> Result<bool, AlgoError> {
        for c in &self.conditions {
            if !c.satisfied_by(i, &self.table)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Ascending indices of currently-covered objects.
    pub fn covered_objects(&self) -> &[usize] {
        &self.covered
    }

    pub fn has_condition_for_attribute(&self, attribute_index: usize) -> bool {
        self.conditions.iter().any(|c| c.attribute_index() == attribute_index)
    }

    /// Appends `c`; updates the counter and covered list by an exact delta
    /// (spec §4.6 `addCondition`).
    pub fn add_condition(&mut self, c: Condition) -> Result<(), AlgoError> {
        let n = self.table.num_objects();
        let mut newly_uncovered = Vec::new();
        for i in 0..n {
            if !c.satisfied_by(i, &self.table)? {
                let was_covered = self.not_covering_count[i] == 0;
                self.not_covering_count[i] += 1;
                if was_covered {
                    newly_uncovered.push(i);
                }
            }
        }
        if !newly_uncovered.is_empty() {
            let drop: alloc::collections::BTreeSet<usize> = newly_uncovered.into_iter().collect();
            self.covered.retain(|i| !drop.contains(i));
        }
        self.conditions.push(c);
        Ok(())
    }

    /// Removes the condition at `index`; reverses its delta exactly (spec
    /// §4.6 `removeCondition`). Covered-set re-insertion preserves ascending
    /// order.
    pub fn remove_condition(&mut self, index: usize) -> Result<Condition, AlgoError> {
        if index >= self.conditions.len() {
            return Err(AlgoError::Core(drs_core::CoreError::IndexOutOfRange { index, len: self.conditions.len() }));
        }
        let removed = self.conditions.remove(index);
        let n = self.table.num_objects();
        let mut newly_covered = Vec::new();
        for i in 0..n {
            if !removed.satisfied_by(i, &self.table)? {
                self.not_covering_count[i] -= 1;
                if self.not_covering_count[i] == 0 {
                    newly_covered.push(i);
                }
            }
        }
        if !newly_covered.is_empty() {
            self.covered.extend(newly_covered);
            self.covered.sort_unstable();
        }
        Ok(removed)
    }

    /// Re-inserts a previously removed condition at `index`, restoring the
    /// counter/covered-list delta exactly — the inverse of
    /// [`RuleConditions::remove_condition`], used by the condition pruner to
    /// undo a tentative removal that turned out to reduce coverage too far
    /// (spec §4.8 `conditionPruner`).
    pub fn insert_condition(&mut self, index: usize, c: Condition) -> Result<(), AlgoError> {
        if index > self.conditions.len() {
            return Err(AlgoError::Core(drs_core::CoreError::IndexOutOfRange { index, len: self.conditions.len() }));
        }
        let n = self.table.num_objects();
        let mut newly_uncovered = Vec::new();
        for i in 0..n {
            if !c.satisfied_by(i, &self.table)? {
                let was_covered = self.not_covering_count[i] == 0;
                self.not_covering_count[i] += 1;
                if was_covered {
                    newly_uncovered.push(i);
                }
            }
        }
        if !newly_uncovered.is_empty() {
            let drop: alloc::collections::BTreeSet<usize> = newly_uncovered.into_iter().collect();
            self.covered.retain(|i| !drop.contains(i));
        }
        self.conditions.insert(index, c);
        Ok(())
    }

    /// Non-destructive simulation: which currently-covered objects would
    /// remain covered if `c` were also required? (spec §4.6
    /// `getIndicesOfCoveredObjectsWithCondition`).
    pub fn indices_of_covered_objects_with_condition(&self, c: &Condition) -> Result<Vec<usize>, AlgoError> {
        let mut result = Vec::new();
        for &i in &self.covered {
            if c.satisfied_by(i, &self.table)? {
                result.push(i);
            }
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conditions::{build_condition, RuleType};
    use crate::approximation::union::UnionType;
    use drs_core::attribute::{Attribute, AttributeKind, EvaluationKind, PreferenceType, ValueType};
    use drs_core::value::MissingValueType;
    use drs_core::{ObjectIdGenerator, Value};
    use alloc::string::ToString;
    use alloc::vec;

    fn attr() -> Attribute {
        Attribute {
            name: "q".to_string(),
            active: true,
            kind: AttributeKind::Evaluation(EvaluationKind::Condition),
            preference: PreferenceType::Gain,
            missing_value_type: MissingValueType::Mv15,
            value_type: ValueType::Integer,
        }
    }

    /// Incremental coverage bookkeeping: 5 objects, one condition per
    /// attribute on 3 attributes, with c1 excluding {3}, c2 excluding
    /// {3, 4} and c3 excluding {4} — chosen to realize a known
    /// three-condition counter snapshot (`counters = [0,0,0,2,2]`,
    /// `covered = {0,1,2}`) after all three adds.
    #[test]
    fn s4_incremental_coverage_matches_scenario() {
        let attrs = vec![attr(), attr(), attr()];
        let rows = vec![
            vec![Value::Integer(5), Value::Integer(5), Value::Integer(5)], // 0
            vec![Value::Integer(5), Value::Integer(5), Value::Integer(5)], // 1
            vec![Value::Integer(5), Value::Integer(5), Value::Integer(5)], // 2
            vec![Value::Integer(0), Value::Integer(0), Value::Integer(5)], // 3: fails c1, c2
            vec![Value::Integer(5), Value::Integer(0), Value::Integer(0)], // 4: fails c2, c3
        ];
        let gen = ObjectIdGenerator::new();
        let table = InformationTable::from_rows(attrs, rows, &gen).unwrap();

        let mut rc = RuleConditions::new(table, vec![0, 1, 2], vec![0, 1, 2, 3, 4], vec![0, 1, 2, 3, 4], vec![]);

        let c1 = build_condition(RuleType::Certain, UnionType::AtLeast, PreferenceType::Gain, 0, Value::Integer(1));
        let c2 = build_condition(RuleType::Certain, UnionType::AtLeast, PreferenceType::Gain, 1, Value::Integer(1));
        let c3 = build_condition(RuleType::Certain, UnionType::AtLeast, PreferenceType::Gain, 2, Value::Integer(1));

        rc.add_condition(c1).unwrap();
        assert_eq!(rc.covered_objects(), &[0, 1, 2, 4]);

        rc.add_condition(c2).unwrap();
        assert_eq!(rc.covered_objects(), &[0, 1, 2]);

        rc.add_condition(c3).unwrap();
        assert_eq!(rc.covered_objects(), &[0, 1, 2]);
        assert_eq!(rc.not_covering_count_for_test(3), 2);
        assert_eq!(rc.not_covering_count_for_test(4), 2);

        // Remove c2 (index 1): both 3 and 4 lose one of their two
        // exclusions, but each is still excluded by the other remaining
        // condition, so the covered set is unchanged (spec §8 invariant 4:
        // removal weakly grows the covered set, not necessarily strictly).
        rc.remove_condition(1).unwrap();
        assert_eq!(rc.covered_objects(), &[0, 1, 2]);
        assert_eq!(rc.not_covering_count_for_test(3), 1);
        assert_eq!(rc.not_covering_count_for_test(4), 1);

        // Remove c1 (now index 0): object 3's last exclusion is gone.
        rc.remove_condition(0).unwrap();
        assert_eq!(rc.covered_objects(), &[0, 1, 2, 3]);
        assert_eq!(rc.not_covering_count_for_test(4), 1);
    }

    /// Add-then-remove idempotence (spec §8 invariant 7).
    #[test]
    fn add_then_remove_restores_state() {
        let attrs = vec![attr()];
        let rows = vec![
            vec![Value::Integer(5)],
            vec![Value::Integer(1)],
            vec![Value::Integer(5)],
        ];
        let gen = ObjectIdGenerator::new();
        let table = InformationTable::from_rows(attrs, rows, &gen).unwrap();
        let mut rc = RuleConditions::new(table, vec![0, 2], vec![0, 1, 2], vec![0, 1, 2], vec![]);

        let before_covered = rc.covered_objects().to_vec();
        let c = build_condition(RuleType::Certain, UnionType::AtLeast, PreferenceType::Gain, 0, Value::Integer(2));
        rc.add_condition(c).unwrap();
        assert_ne!(rc.covered_objects(), before_covered.as_slice());
        rc.remove_condition(0).unwrap();
        assert_eq!(rc.covered_objects(), before_covered.as_slice());
    }

    impl RuleConditions {
        fn not_covering_count_for_test(&self, i: usize) -> u32 {
            self.not_covering_count[i]
        }
    }
}
