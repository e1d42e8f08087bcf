//! # Lifecycle
//!
//! Startup, user binding and shutdown of the whole system.
//!
//! - [`fuel_system`] - [`FuelSystem`], which owns the actor tasks and their clients
//! - [`tracing`] - subscriber setup for the binary and the tests

pub mod fuel_system;
pub mod tracing;

pub use fuel_system::{FuelSystem, SystemError};
pub use tracing::setup_tracing;
