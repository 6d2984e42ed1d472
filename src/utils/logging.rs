//! Logging Setup
//!
//! Installs the global `tracing` subscriber for the command line binary.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT_TRACING: Once = Once::new();

/// Default directives: our crates at `level`, chromiumoxide's CDP chatter muted.
fn default_directives(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    format!(
        "{level},payslip_downloader={level},payslip_core={level},chromiumoxide=warn,tungstenite=warn"
    )
}

/// Initialize tracing once. `RUST_LOG` overrides the defaults.
pub fn init_tracing(verbose: bool) {
    INIT_TRACING.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init();
    });
}
