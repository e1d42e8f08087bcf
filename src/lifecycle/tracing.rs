//! # Observability & Tracing
//!
//! Every actor logs its operations as structured `tracing` events: `info!` when state changes,
//! `debug!` with full payloads, `warn!` when a request is rejected. Client methods carry
//! `#[instrument]` spans, so a request's log lines nest under the call that sent it.
//!
//! The subscriber uses the compact format without module paths. `RUST_LOG` wins over the
//! configured `[logging] filter` directive.
//!
//! ```bash
//! # Status changes only
//! RUST_LOG=info cargo run
//!
//! # Draft patches, lookups and armed timers
//! RUST_LOG=debug cargo run
//!
//! # Just the order simulator
//! RUST_LOG=fuel_swift::order_actor=debug cargo run
//! ```
//!
//! A placed order then reads like:
//!
//! ```text
//! INFO finalize: Order placed order_id=1767225600000 user_id=1767225599000 total=562.65
//! INFO Order status changed order_id=1767225600000 from=Searching for Captain to=Captain Assigned
//! INFO Order status changed order_id=1767225600000 from=Captain Assigned to=En Route
//! ```

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. `default_filter` applies when `RUST_LOG` is unset.
///
/// Calling it again, as every test may, leaves the first subscriber in place.
pub fn setup_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}
