pub mod models;
pub mod registry;
pub mod services;
pub mod errors;

pub use models::*;
pub use registry::*;
pub use services::*;
pub use errors::*;
