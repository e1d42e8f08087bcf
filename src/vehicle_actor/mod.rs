//! # Vehicle Actor
//!
//! The signed-in user's vehicles, kept by a generic
//! [`ResourceActor`](actor_framework::ResourceActor) and persisted as one list per user
//! under `vehicles_{userId}`.
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Vehicle`]
//! - [`error`] - [`VehicleError`]
//!
//! The list is empty until the client is bound to an owner; adding, editing or removing a
//! vehicle before that fails with [`VehicleError::NotSignedIn`].

pub mod entity;
pub mod error;

pub use entity::VehicleAction;
pub use error::*;

use crate::clients::VehicleClient;
use crate::clock::IdSource;
use crate::model::{Vehicle, VehicleId};
use crate::storage::{JsonCollection, StorageService};
use actor_framework::ResourceActor;
use std::sync::Arc;

/// Creates a new Vehicle actor and its client.
pub fn new(ids: Arc<IdSource>, storage: StorageService) -> (ResourceActor<Vehicle>, VehicleClient) {
    let next_vehicle_id = move || VehicleId(ids.next_id());
    let (actor, generic_client) = ResourceActor::new(32, next_vehicle_id);
    let actor = actor.with_store(Arc::new(JsonCollection::<Vehicle>::new(storage)));
    (actor, VehicleClient::new(generic_client))
}
