//! # fuel-swift
//!
//! The ordering core of a doorstep fuel-delivery app: sign-in, a per-user vehicle registry,
//! checkout and a simulated delivery that moves itself through five timed stages.
//!
//! ## Module Tour
//!
//! ### 1. The Stores ([`identity_actor`], [`vehicle_actor`], [`order_actor`])
//! Each store is an actor: one Tokio task that owns its state and answers requests in order,
//! so none of them need locks.
//! - **Identity** keeps the session and the profile behind each phone number.
//! - **Vehicles** is a generic [`ResourceActor`](actor_framework::ResourceActor) bound to the
//!   signed-in user's list.
//! - **Orders** holds the checkout draft and the order history, and runs the delivery timer
//!   of the active order.
//!
//! ### 2. The Interface ([`clients`])
//! Typed handles that hide the message passing. All of them are cheap to clone.
//!
//! ### 3. The Orchestrator ([`lifecycle`])
//! [`FuelSystem`](lifecycle::FuelSystem) starts the actors, rebinds the user-scoped stores on
//! sign-in and sign-out, runs the checkout flow and shuts everything down.
//!
//! ### 4. Supporting pieces
//! - [`model`] - the persisted records
//! - [`pricing`] - fuel quotes
//! - [`storage`] - the key-value persistence layer (memory or a JSON file)
//! - [`config`] - TOML configuration
//! - [`clock`] - wall-clock time and timestamp ids
//! - [`validation`] - phone and registration-plate formats
//!
//! ## Running the Demo
//!
//! ```bash
//! RUST_LOG=info cargo run -- --follow
//! ```

pub mod clients;
pub mod clock;
pub mod config;
pub mod identity_actor;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod pricing;
pub mod storage;
pub mod validation;
pub mod vehicle_actor;
