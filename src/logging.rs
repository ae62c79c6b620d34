//! Tracing initialization for the binary.

use std::sync::Once;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding the log filter, e.g. `LINE_GROUPER_LOG=line_grouper=debug`.
pub const LOG_ENV: &str = "LINE_GROUPER_LOG";

const DEFAULT_FILTER: &str = "line_grouper=warn";

static INIT: Once = Once::new();

/// Install a stderr subscriber filtered by [`LOG_ENV`].
///
/// Falls back to warnings only when the variable is unset or invalid.
/// Calling it more than once is a no-op.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        // Another subscriber may already be installed by an embedding program.
        let _ = tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .with(filter)
            .try_init();
    });
}
