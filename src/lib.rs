//! dynform - Schema-driven Forms Library
//!
//! Renders typed forms from a schema registry, tracks completion progress,
//! validates required fields and keeps an in-memory ledger of submissions.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;
pub mod config;

pub use domain::*;
pub use application::*;
