use crate::error::AppError;
use tracing::Subscriber;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn default_level(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}

/// Log filter from `RUST_LOG`, falling back to the verbosity flag
pub fn build_filter(verbose: bool) -> Result<EnvFilter, AppError> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level(verbose)))
        .map_err(|e| AppError::Logging(format!("Failed to create log filter: {}", e)))
}

/// Filtered compact subscriber writing to stderr, not yet installed
pub fn build_subscriber(verbose: bool) -> Result<impl Subscriber + Send + Sync + 'static, AppError> {
    let env_filter = build_filter(verbose)?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .compact();

    Ok(tracing_subscriber::registry().with(env_filter).with(fmt_layer))
}

/// Initialize logging with environment-based log level filtering.
///
/// Logs go to stderr so answers printed on stdout stay clean.
pub fn init_logging(verbose: bool) -> Result<(), AppError> {
    build_subscriber(verbose)?
        .try_init()
        .map_err(|e| AppError::Logging(format!("Failed to initialize logging: {}", e)))?;

    Ok(())
}
