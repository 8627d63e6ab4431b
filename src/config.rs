//! Command line configuration.

use crate::application::{DEFAULT_EXPORT_FILENAME, DEFAULT_FORM_TYPE};
use crate::domain::SchemaRegistry;
use crate::infrastructure::{InfrastructureResult, SchemaRepository};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "dynform", version, about = "Schema-driven forms in the terminal")]
pub struct Config {
    /// JSON file with form definitions; the built-in forms are used when omitted
    #[arg(long, value_name = "PATH")]
    pub schema_file: Option<PathBuf>,

    /// Form type selected at start-up
    #[arg(long, value_name = "KEY")]
    pub form_type: Option<String>,

    /// File that receives log output
    #[arg(long, value_name = "PATH", default_value = "dynform.log")]
    pub log_file: PathBuf,

    /// Default file name offered when exporting submissions
    #[arg(long, value_name = "PATH", default_value = DEFAULT_EXPORT_FILENAME)]
    pub export_file: String,
}

impl Config {
    pub fn load_registry(&self) -> InfrastructureResult<SchemaRegistry> {
        match &self.schema_file {
            Some(path) => SchemaRepository::load_registry(path),
            None => Ok(SchemaRegistry::builtin()),
        }
    }

    /// The form type to open with.
    ///
    /// An explicit `--form-type` is returned as given so an unknown key fails
    /// loudly; otherwise `userInfo` when the registry has it, else the first
    /// registered form.
    pub fn initial_form_type(&self, registry: &SchemaRegistry) -> String {
        match &self.form_type {
            Some(key) => key.clone(),
            None if registry.lookup(DEFAULT_FORM_TYPE).is_ok() => DEFAULT_FORM_TYPE.to_string(),
            None => registry.first().key.clone(),
        }
    }
}
