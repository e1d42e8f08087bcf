//! # Order Client
//!
//! High-level API for the Order actor.
use crate::model::{Feedback, Order, OrderDraft, OrderId, UserId};
use crate::order_actor::{OrderError, OrderRequest};
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct OrderClient {
    sender: mpsc::Sender<OrderRequest>,
    active: watch::Receiver<Option<Order>>,
}

impl OrderClient {
    pub fn new(sender: mpsc::Sender<OrderRequest>, active: watch::Receiver<Option<Order>>) -> Self {
        Self { sender, active }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<R>) -> OrderRequest,
    ) -> Result<R, OrderError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|e| OrderError::ActorCommunicationError(e.to_string()))?;
        response
            .await
            .map_err(|e| OrderError::ActorCommunicationError(e.to_string()))
    }

    /// Loads `owner`'s order history, or empties it for `None`. Drops the draft and stops tracking.
    #[instrument(skip(self))]
    pub async fn bind(&self, owner: Option<&UserId>) -> Result<usize, OrderError> {
        debug!("Sending request");
        self.request(|respond_to| OrderRequest::Bind {
            owner: owner.cloned(),
            respond_to,
        })
        .await?
    }

    /// Merges the fields set in `patch` into the draft, starting one if needed.
    #[instrument(skip(self))]
    pub async fn update_draft(&self, patch: OrderDraft) -> Result<OrderDraft, OrderError> {
        debug!("Sending request");
        self.request(|respond_to| OrderRequest::UpdateDraft { patch, respond_to })
            .await
    }

    pub async fn draft(&self) -> Result<Option<OrderDraft>, OrderError> {
        self.request(|respond_to| OrderRequest::Draft { respond_to })
            .await
    }

    pub async fn clear_draft(&self) -> Result<(), OrderError> {
        self.request(|respond_to| OrderRequest::ClearDraft { respond_to })
            .await
    }

    /// Turns the draft into an order and starts tracking it.
    #[instrument(skip(self))]
    pub async fn finalize(&self) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.request(|respond_to| OrderRequest::Finalize { respond_to })
            .await?
    }

    pub async fn lookup(&self, id: OrderId) -> Result<Option<Order>, OrderError> {
        self.request(|respond_to| OrderRequest::Lookup { id, respond_to })
            .await
    }

    /// The owner's orders, newest first.
    pub async fn history(&self) -> Result<Vec<Order>, OrderError> {
        self.request(|respond_to| OrderRequest::History { respond_to })
            .await
    }

    /// Makes `id` the active order and resumes its timer. Returns `None` and clears the
    /// active order when `id` is unknown or already finished.
    #[instrument(skip(self))]
    pub async fn begin_tracking(&self, id: OrderId) -> Result<Option<Order>, OrderError> {
        debug!("Sending request");
        self.request(|respond_to| OrderRequest::BeginTracking { id, respond_to })
            .await
    }

    pub async fn active(&self) -> Result<Option<Order>, OrderError> {
        self.request(|respond_to| OrderRequest::Active { respond_to })
            .await
    }

    /// A receiver that sees every change to the active order.
    pub fn watch_active(&self) -> watch::Receiver<Option<Order>> {
        self.active.clone()
    }

    #[instrument(skip(self))]
    pub async fn stop_tracking(&self) -> Result<(), OrderError> {
        debug!("Sending request");
        self.request(|respond_to| OrderRequest::StopTracking { respond_to })
            .await
    }

    #[instrument(skip(self))]
    pub async fn cancel(&self, id: OrderId) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.request(|respond_to| OrderRequest::Cancel { id, respond_to })
            .await?
    }

    #[instrument(skip(self))]
    pub async fn rate(&self, id: OrderId, feedback: Feedback) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.request(|respond_to| OrderRequest::Rate {
            id,
            feedback,
            respond_to,
        })
        .await?
    }
}
