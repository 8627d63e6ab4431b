//! Application layer managing form state and submission workflows.
//!
//! This module coordinates between the domain layer and presentation layer:
//! the form controller owns the active schema and values, and the ledger
//! keeps previously submitted records.

pub mod ledger;
pub mod state;

pub use ledger::*;
pub use state::*;
