//! # Actor Framework
//!
//! Building blocks for type-safe, concurrent actor systems: a **Resource-Oriented** CRUD
//! surface (create, read, list, update, delete, custom actions) on top of the **Actor Model**
//! (one task owns the state, everyone else sends messages).
//!
//! - Isolated state: no shared memory, no locks
//! - Sequential processing within each actor eliminates race conditions
//! - Each resource type gets its own actor; resources coordinate through clients passed in as context
//!
//! **Further Reading**:
//! - [Actors in Rust](https://ryhl.io/blog/actors-with-tokio/) - Practical guide to implementing actors with Tokio
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - Your domain model and its lifecycle hooks
//! 2. **Runtime Layer** ([`ResourceActor`]) - Message processing, ordering and persistence
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) - Type-safe communication
//!
//! ## Scoped Persistence
//!
//! An actor may be attached to a [`CollectionStore`]. The list it manages then belongs to a
//! *scope* (for example one user's key), switched with [`ResourceClient::bind`]. Every
//! mutation is saved before it is acknowledged, and rolled back in memory when the save fails.
//!
//! ```rust
//! use actor_framework::{ActorEntity, CollectionStore, ResourceActor, StoreError};
//! use async_trait::async_trait;
//! use std::collections::HashMap;
//! use std::sync::{Arc, Mutex};
//!
//! #[derive(Clone, Debug)] struct Pin { id: String }
//! #[derive(Debug)] struct PinCreate;
//! #[derive(Debug)] struct PinUpdate;
//! #[derive(Debug)] enum PinAction {}
//! #[derive(Debug, thiserror::Error)] #[error("pin")] struct PinError;
//!
//! #[async_trait]
//! impl ActorEntity for Pin {
//!     type Id = String; type Create = PinCreate; type Update = PinUpdate; type Action = PinAction;
//!     type ActionResult = (); type Context = (); type Error = PinError;
//!     fn from_create_params(id: String, _: PinCreate) -> Result<Self, Self::Error> { Ok(Self { id }) }
//!     fn id(&self) -> &String { &self.id }
//!     async fn on_update(&mut self, _: PinUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, a: PinAction, _: &()) -> Result<(), Self::Error> { match a {} }
//! }
//!
//! #[derive(Default)]
//! struct Shelf(Mutex<HashMap<String, Vec<Pin>>>);
//!
//! #[async_trait]
//! impl CollectionStore<Pin> for Shelf {
//!     async fn load(&self, scope: &str) -> Result<Vec<Pin>, StoreError> {
//!         Ok(self.0.lock().unwrap().get(scope).cloned().unwrap_or_default())
//!     }
//!     async fn save(&self, scope: &str, items: &[Pin]) -> Result<(), StoreError> {
//!         self.0.lock().unwrap().insert(scope.to_string(), items.to_vec());
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let shelf = Arc::new(Shelf::default());
//!     let (actor, client) = ResourceActor::<Pin>::new(8, || "p1".to_string());
//!     tokio::spawn(actor.with_store(shelf.clone()).run(()));
//!
//!     // Unbound: mutations are refused
//!     assert!(client.create(PinCreate).await.is_err());
//!
//!     client.bind(Some("alice".into())).await.unwrap();
//!     client.create(PinCreate).await.unwrap();
//!     assert_eq!(shelf.load("alice").await.unwrap().len(), 1);
//! }
//! ```
//!
//! ## Context Injection Pattern
//!
//! Dependencies are injected at **runtime** via `run(context)`, not at construction time,
//! so actors can be created first and wired afterwards without circular references.
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers a real `ResourceClient<T>` from scripted expectations, for
//! testing logic around a client without spawning the actor behind it.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod store;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
pub use store::{CollectionStore, StoreError};
