//! Immutable, column-typed information table (spec §4.2).
//!
//! Construction validates the "at most one active decision / at most one
//! active identification attribute" rule and the per-row width invariant.
//! `select()` projects a new table view over the same underlying columns
//! (shared via `Arc`, never deep-copied) and an index→row map, so that
//! repeated indices are allowed and object identity survives projection.

use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::attribute::Attribute;
use crate::decision::Decision;
use crate::errors::CoreError;
use crate::ids::{ObjectId, ObjectIdGenerator};
use crate::value::Value;

struct TableData {
    attributes: Vec<Attribute>,
    /// Column-major storage: `columns[attr_idx][row_idx]`.
    columns: Vec<Vec<Value>>,
    /// Stable object id per underlying row.
    object_ids: Vec<ObjectId>,
    active_decision_index: Option<usize>,
    active_identification_index: Option<usize>,
    active_condition_indices: Vec<usize>,
}

/// An object×attribute table. Cheap to project (`select`); never mutated
/// after construction.
#[derive(Clone)]
pub struct InformationTable {
    data: Arc<TableData>,
    /// `row_map[object_index]` = underlying row index into `data.columns`.
    row_map: Vec<usize>,
}

impl InformationTable {
    /// Build a table from attribute metadata and row-major data. Each row's
    /// length must equal `attributes.len()`. `id_gen` assigns a fresh,
    /// globally unique [`ObjectId`] to every row.
    pub fn from_rows(
        attributes: Vec<Attribute>,
        rows: Vec<Vec<Value>>,
        id_gen: &ObjectIdGenerator,
    ) -> Result<Self, CoreError> {
        let decision_count = attributes.iter().filter(|a| a.is_active_decision()).count();
        if decision_count > 1 {
            return Err(CoreError::DuplicateActiveDecision);
        }
        let id_count = attributes.iter().filter(|a| a.is_active_identification()).count();
        if id_count > 1 {
            return Err(CoreError::DuplicateActiveIdentification);
        }

        let n_attrs = attributes.len();
        for row in &rows {
            if row.len() != n_attrs {
                return Err(CoreError::RowWidthMismatch { expected: n_attrs, actual: row.len() });
            }
        }

        let n_rows = rows.len();
        let mut columns: Vec<Vec<Value>> = (0..n_attrs).map(|_| Vec::with_capacity(n_rows)).collect();
        for row in rows {
            for (attr_idx, value) in row.into_iter().enumerate() {
                columns[attr_idx].push(value);
            }
        }

        let object_ids: Vec<ObjectId> = (0..n_rows).map(|_| id_gen.next_id()).collect();
        let active_decision_index = attributes.iter().position(|a| a.is_active_decision());
        let active_identification_index = attributes.iter().position(|a| a.is_active_identification());
        let active_condition_indices: Vec<usize> = attributes
            .iter()
            .enumerate()
            .filter(|(_, a)| a.is_active_condition())
            .map(|(i, _)| i)
            .collect();

        let data = Arc::new(TableData {
            attributes,
            columns,
            object_ids,
            active_decision_index,
            active_identification_index,
            active_condition_indices,
        });

        Ok(InformationTable { data, row_map: (0..n_rows).collect() })
    }

    pub fn num_objects(&self) -> usize {
        self.row_map.len()
    }

    pub fn num_attributes(&self) -> usize {
        self.data.attributes.len()
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.data.attributes
    }

    pub fn active_condition_attribute_indices(&self) -> &[usize] {
        &self.data.active_condition_indices
    }

    pub fn active_decision_attribute_index(&self) -> Option<usize> {
        self.data.active_decision_index
    }

    pub fn active_identification_attribute_index(&self) -> Option<usize> {
        self.data.active_identification_index
    }

    pub fn object_id(&self, obj: usize) -> Result<ObjectId, CoreError> {
        self.check_obj(obj)?;
        Ok(self.data.object_ids[self.row_map[obj]])
    }

    /// Bounds-checked field access.
    pub fn get_field(&self, obj: usize, attr: usize) -> Result<&Value, CoreError> {
        self.check_obj(obj)?;
        if attr >= self.data.attributes.len() {
            return Err(CoreError::IndexOutOfRange { index: attr, len: self.data.attributes.len() });
        }
        let row = self.row_map[obj];
        Ok(&self.data.columns[attr][row])
    }

    /// The object's decision, or `None` if the table has no active decision
    /// attribute (spec §7: this is a typed "absent" result, not an error).
    pub fn decision(&self, obj: usize) -> Option<Decision> {
        let idx = self.data.active_decision_index?;
        let v = self.get_field(obj, idx).ok()?;
        Some(Decision::simple(v.clone()))
    }

    /// The object's identification value, or `None` if the table has no
    /// active identification attribute.
    pub fn identification(&self, obj: usize) -> Option<&Value> {
        let idx = self.data.active_identification_index?;
        self.get_field(obj, idx).ok()
    }

    /// Project a new table view over `indices` (which may repeat). Object
    /// identity (`object_id`) is preserved per position.
    pub fn select(&self, indices: &[usize]) -> Result<InformationTable, CoreError> {
        let n = self.row_map.len();
        for &i in indices {
            if i >= n {
                return Err(CoreError::IndexOutOfRange { index: i, len: n });
            }
        }
        let row_map = indices.iter().map(|&i| self.row_map[i]).collect();
        Ok(InformationTable { data: Arc::clone(&self.data), row_map })
    }

    fn check_obj(&self, obj: usize) -> Result<(), CoreError> {
        if obj >= self.row_map.len() {
            Err(CoreError::IndexOutOfRange { index: obj, len: self.row_map.len() })
        } else {
            Ok(())
        }
    }
}
