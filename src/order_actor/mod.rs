//! # Order Actor
//!
//! Checkout draft, order history and live delivery tracking for the signed-in user.
//!
//! - [`fsm`] - the pure delivery state machine
//! - [`captain`] - captain assignment and the handover code
//! - [`actor`] - the [`OrderActor`] loop that owns the history and the tracking timer
//! - [`message`] - [`OrderRequest`]
//! - [`error`] - [`OrderError`]
//!
//! Unlike the vehicle registry this actor is hand-written rather than a `ResourceActor`:
//! besides requests it has to wake up on its own when a delivery stage runs out.

pub mod actor;
pub mod captain;
pub mod error;
pub mod fsm;
pub mod message;

pub use actor::OrderActor;
pub use error::*;
pub use fsm::{OrderEvent, Transition};
pub use message::OrderRequest;

use crate::clients::OrderClient;
use crate::clock::{Clock, IdSource};
use crate::config::DeliveryConfig;
use crate::storage::StorageService;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

/// Creates a new Order actor and its client.
pub fn new(
    storage: StorageService,
    ids: Arc<IdSource>,
    clock: Arc<dyn Clock>,
    delivery: DeliveryConfig,
) -> (OrderActor, OrderClient) {
    let (sender, receiver) = mpsc::channel(32);
    let (active_tx, active_rx) = watch::channel(None);
    let actor = OrderActor::new(receiver, storage, ids, clock, delivery, active_tx);
    (actor, OrderClient::new(sender, active_rx))
}
