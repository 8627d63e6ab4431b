//! Infrastructure layer providing external service integrations.
//!
//! This module contains the file-facing concerns: loading schema files,
//! exporting submissions to CSV and routing log output.

pub mod errors;
pub mod export;
pub mod logging;
pub mod schema_file;

pub use errors::*;
pub use export::*;
pub use logging::*;
pub use schema_file::*;
