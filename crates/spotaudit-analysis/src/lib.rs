//! Spotaudit Analysis - Batch coordinate analyzers
//!
//! Each analyzer is a pure function of the extracted record list with
//! no shared mutable state; the report module merges their outputs in a
//! fixed order so identical inputs produce identical reports.

pub mod bounds;
pub mod duplicates;
pub mod precision;
pub mod proximity;
pub mod report;

pub use report::{run_audit, AuditReport};
