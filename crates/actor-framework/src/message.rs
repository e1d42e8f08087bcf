//! # Generic Messages
//!
//! This module defines the generic message types used for communication between
//! the `ResourceClient` and `ResourceActor`.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor to request operations.
///
/// The variants map onto CRUD over a scoped list, plus `Action` for
/// resource-specific logic and `Bind` to switch the scope the list is loaded
/// from and persisted to.
///
/// - **Create**: appends a new resource built from [`ActorEntity::Create`].
/// - **Get**: fetches one resource by ID.
/// - **List**: every resource in insertion order.
/// - **Update**: applies [`ActorEntity::Update`] to one resource.
/// - **Delete**: removes one resource.
/// - **Action**: executes a custom [`ActorEntity::Action`].
/// - **Bind**: replaces the in-memory list with the one stored under `scope`
///   (or empties it when `scope` is `None`). Responds with the loaded count.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
    Bind {
        scope: Option<String>,
        respond_to: Response<usize>,
    },
}
