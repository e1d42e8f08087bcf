use actor_framework::{
    ActorEntity, CollectionStore, FrameworkError, ResourceActor, ResourceClient, StoreError,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

// --- Test Entity ---

#[derive(Clone, Debug, PartialEq)]
struct Ticket {
    id: u32,
    label: String,
    punched: bool,
}

#[derive(Debug)]
struct TicketCreate {
    label: String,
}

#[derive(Debug)]
struct TicketUpdate {
    label: Option<String>,
}

#[derive(Debug)]
enum TicketAction {
    Punch,
}

#[derive(Debug, thiserror::Error)]
enum TicketError {
    #[error("label must not be empty")]
    EmptyLabel,
}

#[async_trait]
impl ActorEntity for Ticket {
    type Id = u32;
    type Create = TicketCreate;
    type Update = TicketUpdate;
    type Action = TicketAction;
    type ActionResult = bool;
    type Context = ();
    type Error = TicketError;

    fn from_create_params(id: u32, params: TicketCreate) -> Result<Self, Self::Error> {
        if params.label.is_empty() {
            return Err(TicketError::EmptyLabel);
        }
        Ok(Self {
            id,
            label: params.label,
            punched: false,
        })
    }

    fn id(&self) -> &u32 {
        &self.id
    }

    async fn on_update(
        &mut self,
        update: TicketUpdate,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        if let Some(label) = update.label {
            if label.is_empty() {
                return Err(TicketError::EmptyLabel);
            }
            self.label = label;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: TicketAction,
        _ctx: &Self::Context,
    ) -> Result<bool, Self::Error> {
        match action {
            TicketAction::Punch => {
                if self.punched {
                    Ok(false)
                } else {
                    self.punched = true;
                    Ok(true)
                }
            }
        }
    }
}

// --- Test Store ---

#[derive(Default)]
struct SharedShelf {
    lists: Mutex<HashMap<String, Vec<Ticket>>>,
    fail_saves: AtomicBool,
}

#[async_trait]
impl CollectionStore<Ticket> for SharedShelf {
    async fn load(&self, scope: &str) -> Result<Vec<Ticket>, StoreError> {
        Ok(self
            .lists
            .lock()
            .unwrap()
            .get(scope)
            .cloned()
            .unwrap_or_default())
    }

    async fn save(&self, scope: &str, items: &[Ticket]) -> Result<(), StoreError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err("disk full".into());
        }
        self.lists
            .lock()
            .unwrap()
            .insert(scope.to_string(), items.to_vec());
        Ok(())
    }
}

fn spawn_tickets(store: Option<Arc<SharedShelf>>) -> ResourceClient<Ticket> {
    let counter = AtomicU32::new(1);
    let (actor, client) = ResourceActor::new(10, move || counter.fetch_add(1, Ordering::SeqCst));
    let actor = match store {
        Some(store) => actor.with_store(store),
        None => actor,
    };
    tokio::spawn(actor.run(()));
    client
}

// --- Tests ---

#[tokio::test]
async fn test_framework_full_lifecycle() {
    let client = spawn_tickets(None);

    // 1. Create
    let id = client
        .create(TicketCreate {
            label: "Morning".into(),
        })
        .await
        .unwrap();
    assert_eq!(id, 1);

    // 2. Perform Action: Punch
    let changed = client
        .perform_action(id, TicketAction::Punch)
        .await
        .unwrap();
    assert!(changed);

    let ticket = client.get(id).await.unwrap().unwrap();
    assert!(ticket.punched);

    // 3. Punch again (no change)
    let changed_again = client
        .perform_action(id, TicketAction::Punch)
        .await
        .unwrap();
    assert!(!changed_again);

    // 4. Update
    let updated = client
        .update(
            id,
            TicketUpdate {
                label: Some("Evening".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.label, "Evening");

    // 5. Delete
    client.delete(id).await.unwrap();
    assert!(client.get(id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_keeps_insertion_order() {
    let client = spawn_tickets(None);

    for label in ["a", "b", "c"] {
        client
            .create(TicketCreate {
                label: label.into(),
            })
            .await
            .unwrap();
    }
    client.delete(2).await.unwrap();

    let labels: Vec<String> = client
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.label)
        .collect();
    assert_eq!(labels, vec!["a", "c"]);
}

#[tokio::test]
async fn test_rejected_create_and_update_leave_state_untouched() {
    let client = spawn_tickets(None);

    let err = client
        .create(TicketCreate {
            label: String::new(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, FrameworkError::EntityError(_)));

    let id = client
        .create(TicketCreate { label: "x".into() })
        .await
        .unwrap();
    let err = client
        .update(
            id,
            TicketUpdate {
                label: Some(String::new()),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, FrameworkError::EntityError(_)));
    assert_eq!(client.get(id).await.unwrap().unwrap().label, "x");

    let err = client.update(99, TicketUpdate { label: None }).await;
    assert!(matches!(err, Err(FrameworkError::NotFound(_))));
}

#[tokio::test]
async fn test_store_requires_bound_scope() {
    let shelf = Arc::new(SharedShelf::default());
    let client = spawn_tickets(Some(shelf));

    let err = client
        .create(TicketCreate { label: "x".into() })
        .await
        .unwrap_err();
    assert!(matches!(err, FrameworkError::Unbound));
    assert!(client.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_bind_loads_and_mutations_persist_per_scope() {
    let shelf = Arc::new(SharedShelf::default());
    let client = spawn_tickets(Some(shelf.clone()));

    assert_eq!(client.bind(Some("alice".into())).await.unwrap(), 0);
    client
        .create(TicketCreate {
            label: "first".into(),
        })
        .await
        .unwrap();
    let second = client
        .create(TicketCreate {
            label: "second".into(),
        })
        .await
        .unwrap();
    assert_eq!(shelf.load("alice").await.unwrap().len(), 2);

    // Another scope starts empty and does not see alice's tickets
    assert_eq!(client.bind(Some("bob".into())).await.unwrap(), 0);
    assert!(client.get(second).await.unwrap().is_none());

    // Back to alice: the list is reloaded from the store
    assert_eq!(client.bind(Some("alice".into())).await.unwrap(), 2);
    client.delete(second).await.unwrap();
    let stored = shelf.load("alice").await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].label, "first");

    // Unbinding empties memory but leaves storage alone
    assert_eq!(client.bind(None).await.unwrap(), 0);
    assert!(client.list().await.unwrap().is_empty());
    assert_eq!(shelf.load("alice").await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_failed_save_rolls_back() {
    let shelf = Arc::new(SharedShelf::default());
    let client = spawn_tickets(Some(shelf.clone()));
    client.bind(Some("alice".into())).await.unwrap();

    let id = client
        .create(TicketCreate { label: "keep".into() })
        .await
        .unwrap();

    shelf.fail_saves.store(true, Ordering::SeqCst);

    let err = client
        .create(TicketCreate { label: "lost".into() })
        .await
        .unwrap_err();
    assert!(matches!(err, FrameworkError::Storage(_)));

    let err = client
        .update(
            id,
            TicketUpdate {
                label: Some("renamed".into()),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, FrameworkError::Storage(_)));

    let err = client.delete(id).await.unwrap_err();
    assert!(matches!(err, FrameworkError::Storage(_)));

    let err = client
        .perform_action(id, TicketAction::Punch)
        .await
        .unwrap_err();
    assert!(matches!(err, FrameworkError::Storage(_)));

    let listed = client.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].label, "keep");
    assert!(!listed[0].punched);
}
