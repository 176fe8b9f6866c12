//! Spotaudit Core - Domain models, region table, configuration, and
//! catalog extraction
//!
//! This crate contains the shared domain types consumed by the batch
//! analyzers and the online verifier.

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod regions;

pub use error::{Result, SpotauditError};
