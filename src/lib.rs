//! Optimist
//!
//! Brand theming and profile caching for the Optimist social app.
//!
//! - [`theme`] derives light/dark CSS variables from the administrator's
//!   brand colors.
//! - [`storage`] provides the bounded, lifecycle-managed profile cache.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub use app_theme as theme;
pub use ::storage;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global `tracing` subscriber
///
/// The filter comes from `RUST_LOG`, falling back to `info`. Calling this more
/// than once keeps the first subscriber.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .try_init();

    tracing::debug!("Logging initialized");
}
