//! drs_core — value model, information table, and ids for the DRSA /
//! VC-DomLEM rule induction engine.
//!
//! This crate is **I/O-free**. It defines the stable types shared by
//! `drs_algo` (the approximation + rule-induction core) and the thin
//! collaborator crates `drs_io` / `drs_report` / `drs_cli`:
//!
//! - [`value`]: ordered/unordered scalar values, pair values, missing-value
//!   semantics, three-valued comparison.
//! - [`attribute`]: typed column metadata (criteria, decision, identification).
//! - [`decision`]: the decision vector of an object.
//! - [`table`]: the immutable, column-typed information table.
//! - [`ids`]: the process-wide monotonic object-id generator.
//! - [`errors`]: the `InvalidInput` / `OutOfRange` error taxonomy.
//!
//! Serialization derives are gated behind the `serde` feature; `std::error::Error`
//! impls are gated behind `std` (on by default).

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod errors;
pub mod ids;
pub mod value;
pub mod attribute;
pub mod decision;
pub mod table;

pub use errors::CoreError;
pub use ids::{ObjectId, ObjectIdGenerator};
pub use value::{TriLogic, Value};
pub use attribute::{Attribute, AttributeKind, MissingValueType, PreferenceType, ValueType};
pub use decision::{Decision, SimpleDecision};
pub use table::InformationTable;
