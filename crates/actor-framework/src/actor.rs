//! # Generic Actor Server
//!
//! This module defines the `ResourceActor`, the core component that manages the lifecycle
//! and state of entities. It implements the "Server" side of the Actor Model, processing
//! messages sequentially and ensuring exclusive access to the entity list.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use crate::store::CollectionStore;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages an ordered collection of entities.
///
/// This struct is the "Server" half of the actor. It owns the state (`store`) and
/// the receiver end of the channel. Each actor processes its own messages sequentially,
/// so the list needs no `Mutex` or `RwLock`.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `ResourceActor::new()` with an ID generator to get the `actor` and `client`.
/// 2.  **Attach** (optional): `with_store()` hooks a [`CollectionStore`] up for persistence.
/// 3.  **Wire & Run**: Spawn `actor.run(context)` in a background task.
///
/// ```rust
/// use actor_framework::{ActorEntity, ResourceActor};
/// use async_trait::async_trait;
/// use std::sync::atomic::{AtomicU32, Ordering};
///
/// #[derive(Clone, Debug)] struct Note { id: u32, text: String }
/// #[derive(Debug)] struct NoteCreate { text: String }
/// #[derive(Debug)] struct NoteUpdate;
/// #[derive(Debug)] enum NoteAction {}
/// #[derive(Debug, thiserror::Error)] #[error("note error")] struct NoteError;
///
/// #[async_trait]
/// impl ActorEntity for Note {
///     type Id = u32;
///     type Create = NoteCreate;
///     type Update = NoteUpdate;
///     type Action = NoteAction;
///     type ActionResult = ();
///     type Context = ();
///     type Error = NoteError;
///
///     fn from_create_params(id: u32, p: NoteCreate) -> Result<Self, Self::Error> {
///         Ok(Self { id, text: p.text })
///     }
///     fn id(&self) -> &u32 { &self.id }
///     async fn on_update(&mut self, _: NoteUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
///     async fn handle_action(&mut self, a: NoteAction, _: &()) -> Result<(), Self::Error> { match a {} }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let counter = AtomicU32::new(1);
///     let (actor, client) = ResourceActor::<Note>::new(10, move || counter.fetch_add(1, Ordering::SeqCst));
///     tokio::spawn(actor.run(()));
///
///     let id = client.create(NoteCreate { text: "hi".into() }).await.unwrap();
///     assert_eq!(client.list().await.unwrap()[0].id, id);
/// }
/// ```
///
/// ## Operations
///
/// * **Create**: mints an ID, builds the entity, runs `on_create`, appends it, persists.
/// * **Get** / **List**: clones out of the list; never touches storage.
/// * **Update** / **Action**: runs the hook on a copy, swaps it in, persists.
/// * **Delete**: runs `on_delete`, removes the entity, persists.
/// * **Bind**: loads the list for a scope, replacing whatever was in memory.
///
/// When a store is attached every mutation needs a bound scope ([`FrameworkError::Unbound`]
/// otherwise), and a failed save restores the list to its state before the mutation.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: Vec<T>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
    backing: Option<Arc<dyn CollectionStore<T>>>,
    scope: Option<String>,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - The capacity of the MPSC channel. If the channel is full,
    ///   calls to the client will wait until there is space.
    /// * `next_id_fn` - Mints the ID for every created entity.
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: Vec::new(),
            next_id_fn: Box::new(next_id_fn),
            backing: None,
            scope: None,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Attaches a persistence backend. The list stays empty until the first `Bind`.
    pub fn with_store(mut self, backing: Arc<dyn CollectionStore<T>>) -> Self {
        self.backing = Some(backing);
        self
    }

    fn position(&self, id: &T::Id) -> Option<usize> {
        self.store.iter().position(|item| item.id() == id)
    }

    fn ensure_bound(&self) -> Result<(), FrameworkError> {
        if self.backing.is_some() && self.scope.is_none() {
            return Err(FrameworkError::Unbound);
        }
        Ok(())
    }

    async fn persist(&self) -> Result<(), FrameworkError> {
        match (&self.backing, &self.scope) {
            (Some(backing), Some(scope)) => backing
                .save(scope, &self.store)
                .await
                .map_err(|e| FrameworkError::Storage(e.to_string())),
            _ => Ok(()),
        }
    }

    /// Runs the actor's event loop, processing messages until the channel closes.
    ///
    /// # Context Injection
    /// The `context` argument is injected into every entity hook. This allows entities
    /// to access external dependencies (like other clients) that were created *after*
    /// the actor was instantiated but *before* the loop started.
    pub async fn run(mut self, context: T::Context) {
        // Just the type name (e.g., "Vehicle" instead of "fuel_swift::model::vehicle::Vehicle")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    if let Err(e) = self.ensure_bound() {
                        warn!(entity_type, error = %e, "Create rejected");
                        let _ = respond_to.send(Err(e));
                        continue;
                    }
                    let id = (self.next_id_fn)();

                    let mut item = match T::from_create_params(id.clone(), params) {
                        Ok(item) => item,
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                    };
                    if let Err(e) = item.on_create(&context).await {
                        warn!(entity_type, error = %e, "on_create failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    self.store.push(item);
                    if let Err(e) = self.persist().await {
                        self.store.pop();
                        warn!(entity_type, %id, error = %e, "Persist failed, create rolled back");
                        let _ = respond_to.send(Err(e));
                        continue;
                    }
                    info!(entity_type, %id, size = self.store.len(), "Created");
                    let _ = respond_to.send(Ok(id));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.position(&id).map(|idx| self.store[idx].clone());
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    debug!(entity_type, size = self.store.len(), "List");
                    let _ = respond_to.send(Ok(self.store.clone()));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    if let Err(e) = self.ensure_bound() {
                        warn!(entity_type, %id, error = %e, "Update rejected");
                        let _ = respond_to.send(Err(e));
                        continue;
                    }
                    let Some(idx) = self.position(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    let mut item = self.store[idx].clone();
                    if let Err(e) = item.on_update(update, &context).await {
                        warn!(entity_type, %id, error = %e, "Update failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    let previous = std::mem::replace(&mut self.store[idx], item.clone());
                    if let Err(e) = self.persist().await {
                        self.store[idx] = previous;
                        warn!(entity_type, %id, error = %e, "Persist failed, update rolled back");
                        let _ = respond_to.send(Err(e));
                        continue;
                    }
                    info!(entity_type, %id, "Updated");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    if let Err(e) = self.ensure_bound() {
                        warn!(entity_type, %id, error = %e, "Delete rejected");
                        let _ = respond_to.send(Err(e));
                        continue;
                    }
                    let Some(idx) = self.position(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    if let Err(e) = self.store[idx].on_delete(&context).await {
                        warn!(entity_type, %id, error = %e, "on_delete failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    let removed = self.store.remove(idx);
                    if let Err(e) = self.persist().await {
                        self.store.insert(idx, removed);
                        warn!(entity_type, %id, error = %e, "Persist failed, delete rolled back");
                        let _ = respond_to.send(Err(e));
                        continue;
                    }
                    info!(entity_type, %id, size = self.store.len(), "Deleted");
                    let _ = respond_to.send(Ok(()));
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    if let Err(e) = self.ensure_bound() {
                        warn!(entity_type, %id, error = %e, "Action rejected");
                        let _ = respond_to.send(Err(e));
                        continue;
                    }
                    let Some(idx) = self.position(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    let mut item = self.store[idx].clone();
                    let result = match item.handle_action(action, &context).await {
                        Ok(result) => result,
                        Err(e) => {
                            warn!(entity_type, %id, error = %e, "Action failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                    };
                    let previous = std::mem::replace(&mut self.store[idx], item);
                    if let Err(e) = self.persist().await {
                        self.store[idx] = previous;
                        warn!(entity_type, %id, error = %e, "Persist failed, action rolled back");
                        let _ = respond_to.send(Err(e));
                        continue;
                    }
                    info!(entity_type, %id, "Action ok");
                    let _ = respond_to.send(Ok(result));
                }
                ResourceRequest::Bind { scope, respond_to } => {
                    let loaded = match (&self.backing, &scope) {
                        (Some(backing), Some(key)) => backing
                            .load(key)
                            .await
                            .map_err(|e| FrameworkError::Storage(e.to_string())),
                        _ => Ok(Vec::new()),
                    };
                    match loaded {
                        Ok(items) => {
                            self.store = items;
                            self.scope = scope;
                            info!(entity_type, scope = ?self.scope, size = self.store.len(), "Bound");
                            let _ = respond_to.send(Ok(self.store.len()));
                        }
                        Err(e) => {
                            warn!(entity_type, ?scope, error = %e, "Bind failed");
                            let _ = respond_to.send(Err(e));
                        }
                    }
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}
