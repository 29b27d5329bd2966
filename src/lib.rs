pub mod app;
pub mod config;
mod error;
pub mod store;
pub mod web;

// re-export
pub use app::{serve, App, AppState};
pub use error::{Error, Result};
pub use store::WaitlistStore;

use tracing_subscriber::EnvFilter;

/// Console-oriented tracing for local development.
pub fn init_dbg_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_target(false)
        .init();
}

/// Production tracing: info level by default, no ANSI escapes in log output.
pub fn init_production_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .init();
}
