//! Tracing setup for the CLI

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize a tracing subscriber writing to stderr.
///
/// Uses `RUST_LOG` when set, otherwise `info`, or `debug` when `verbose`.
/// Stdout stays reserved for rendered documents.
pub fn init(verbose: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .with_level(true)
        .compact();

    let default_level = if verbose { "debug" } else { "info" };
    let filter_layer = if verbose {
        EnvFilter::try_new(default_level)?
    } else {
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?
    };

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::info;

    #[test]
    fn test_logging_init() {
        // We can only init once per process
        let _ = init(false);
        assert!(init(true).is_err());

        info!("This is an info message");
    }
}
