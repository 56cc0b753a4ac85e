use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::CliError;

/// Filter directive covering every fitdiff crate at `level`.
fn directive(level: &str) -> String {
    format!("fitdiff={level},fitdiff_recon={level},fitdiff_config={level}")
}

/// Install the stderr subscriber. `RUST_LOG` wins over `level` when set.
pub fn init_cli_logger(level: &str) -> Result<(), CliError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(directive(level))
            .map_err(|e| CliError::config(format!("invalid log level '{level}': {e}")))?,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();

    Ok(())
}
