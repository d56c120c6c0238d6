//! Core types and trait definitions for the Tally conduct ledger.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Storage backends implement [`store::ConductStore`]; everything else in
//! the workspace builds on that abstraction.

pub mod conduct;
pub mod counseling;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod report;
pub mod roster;
pub mod staff;
pub mod store;
pub mod student;
pub mod visibility;

pub use error::{Entity, Error, Result};
