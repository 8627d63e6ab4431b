use super::errors::InfrastructureResult;
use std::fs::OpenOptions;
use std::path::Path;

/// Routes `log` output to `path`.
///
/// The terminal is owned by the UI, so log lines never go to stdout or
/// stderr. The level comes from `RUST_LOG` and defaults to `info`.
pub fn init_logging(path: &Path) -> InfrastructureResult<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .init();
    Ok(())
}
