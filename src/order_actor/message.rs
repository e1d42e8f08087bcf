//! Requests understood by the Order actor.

use super::OrderError;
use crate::model::{Feedback, Order, OrderDraft, OrderId, UserId};
use tokio::sync::oneshot;

pub type Reply<T> = oneshot::Sender<Result<T, OrderError>>;

#[derive(Debug)]
pub enum OrderRequest {
    Bind {
        owner: Option<UserId>,
        respond_to: Reply<usize>,
    },
    UpdateDraft {
        patch: OrderDraft,
        respond_to: oneshot::Sender<OrderDraft>,
    },
    Draft {
        respond_to: oneshot::Sender<Option<OrderDraft>>,
    },
    ClearDraft {
        respond_to: oneshot::Sender<()>,
    },
    Finalize {
        respond_to: Reply<Order>,
    },
    Lookup {
        id: OrderId,
        respond_to: oneshot::Sender<Option<Order>>,
    },
    History {
        respond_to: oneshot::Sender<Vec<Order>>,
    },
    BeginTracking {
        id: OrderId,
        respond_to: oneshot::Sender<Option<Order>>,
    },
    Active {
        respond_to: oneshot::Sender<Option<Order>>,
    },
    StopTracking {
        respond_to: oneshot::Sender<()>,
    },
    Cancel {
        id: OrderId,
        respond_to: Reply<Order>,
    },
    Rate {
        id: OrderId,
        feedback: Feedback,
        respond_to: Reply<Order>,
    },
}
