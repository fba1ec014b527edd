pub mod api;
pub mod bridge;
pub mod commands;
pub mod consensus;
pub mod events;
pub mod gate;
pub mod session;
pub mod state;

#[cfg(test)]
pub(crate) mod testutil;

use tracing_subscriber::{fmt, EnvFilter};

/// Initialise logging for the client process.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("rencontre_client=debug,rencontre_net=debug,warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    tracing::info!("Starting Rencontre blind-date client");
}
