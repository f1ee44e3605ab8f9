use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const LOG_ENV: &str = "LOADOUT_LOG";

static INIT: Once = Once::new();

/// Installs the global subscriber once. Filter comes from `LOADOUT_LOG`
/// (e.g. `loadout_rank=debug`), falling back to `info`. Output goes to
/// stderr because stdout carries protocol frames.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_line_number(true),
            )
            .with(filter)
            .init();
    });
}
