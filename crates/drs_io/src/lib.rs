//! drs_io — attribute-list and row ingestion for the DRSA/VC-DomLEM rule
//! induction engine (spec §6).
//!
//! Deliberately thin and outside the algorithmic core: this crate only
//! turns JSON attribute metadata and CSV/JSON row data into the
//! `drs_core::table::InformationTable` constructor's inputs. It does not
//! build the table itself — callers call `drs_core::InformationTable::from_rows`
//! with the `Vec<Attribute>` and `Vec<Vec<Value>>` this crate produces.

#![forbid(unsafe_code)]

pub mod attributes;
pub mod errors;
pub mod rows;

pub use attributes::parse_attributes;
pub use errors::IoError;
pub use rows::{parse_csv_rows, parse_json_rows, CsvIngestOptions};
