use super::captain;
use super::fsm::{self, Effect, OrderEvent};
use super::message::OrderRequest;
use super::OrderError;
use crate::clock::{Clock, IdSource};
use crate::config::DeliveryConfig;
use crate::model::{Feedback, Order, OrderDraft, OrderId, OrderStatus, UserId};
use crate::storage::keys::orders_key;
use crate::storage::StorageService;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// The one timer that may be pending: it belongs to the active order.
#[derive(Debug, Clone)]
struct PendingTimer {
    order_id: OrderId,
    deadline: Instant,
    event: OrderEvent,
}

enum Wake {
    Request(Option<OrderRequest>),
    Timer,
}

/// Owns the draft, the signed-in user's order history and the active-order pointer.
///
/// The active order is an id into `history`, never a copy, so what a tracking screen sees
/// and what the history shows cannot drift apart. Every status change rewrites the history
/// entry and persists the whole list before it becomes visible.
///
/// Timers are driven by `tokio::time`; at most one is pending and it always belongs to the
/// active order. Moving or clearing the active pointer drops it.
pub struct OrderActor {
    receiver: mpsc::Receiver<OrderRequest>,
    storage: StorageService,
    ids: Arc<IdSource>,
    clock: Arc<dyn Clock>,
    delivery: DeliveryConfig,
    owner: Option<UserId>,
    draft: Option<OrderDraft>,
    history: Vec<Order>,
    active: Option<OrderId>,
    timer: Option<PendingTimer>,
    active_tx: watch::Sender<Option<Order>>,
}

impl OrderActor {
    pub(super) fn new(
        receiver: mpsc::Receiver<OrderRequest>,
        storage: StorageService,
        ids: Arc<IdSource>,
        clock: Arc<dyn Clock>,
        delivery: DeliveryConfig,
        active_tx: watch::Sender<Option<Order>>,
    ) -> Self {
        Self {
            receiver,
            storage,
            ids,
            clock,
            delivery,
            owner: None,
            draft: None,
            history: Vec::new(),
            active: None,
            timer: None,
            active_tx,
        }
    }

    pub async fn run(mut self) {
        info!("Order actor started");

        loop {
            let armed = self.timer.is_some();
            let deadline = self
                .timer
                .as_ref()
                .map_or_else(Instant::now, |t| t.deadline);

            // A due timer is handled before the next request.
            let wake = tokio::select! {
                biased;
                _ = tokio::time::sleep_until(deadline), if armed => Wake::Timer,
                msg = self.receiver.recv() => Wake::Request(msg),
            };

            match wake {
                Wake::Request(Some(msg)) => self.handle(msg).await,
                Wake::Request(None) => break,
                Wake::Timer => self.fire_timer().await,
            }
        }

        info!(
            orders = self.history.len(),
            pending_timer = self.timer.is_some(),
            "Order actor shutdown"
        );
    }

    async fn handle(&mut self, msg: OrderRequest) {
        match msg {
            OrderRequest::Bind { owner, respond_to } => {
                let _ = respond_to.send(self.bind(owner).await);
            }
            OrderRequest::UpdateDraft { patch, respond_to } => {
                debug!(?patch, "Update draft");
                let draft = self.draft.get_or_insert_with(OrderDraft::default);
                draft.merge(patch);
                let _ = respond_to.send(draft.clone());
            }
            OrderRequest::Draft { respond_to } => {
                let _ = respond_to.send(self.draft.clone());
            }
            OrderRequest::ClearDraft { respond_to } => {
                self.draft = None;
                debug!("Draft cleared");
                let _ = respond_to.send(());
            }
            OrderRequest::Finalize { respond_to } => {
                let _ = respond_to.send(self.finalize().await);
            }
            OrderRequest::Lookup { id, respond_to } => {
                let order = self.position(&id).map(|idx| self.history[idx].clone());
                debug!(order_id = %id, found = order.is_some(), "Lookup");
                let _ = respond_to.send(order);
            }
            OrderRequest::History { respond_to } => {
                let _ = respond_to.send(self.history.clone());
            }
            OrderRequest::BeginTracking { id, respond_to } => {
                let _ = respond_to.send(self.begin_tracking(id));
            }
            OrderRequest::Active { respond_to } => {
                let _ = respond_to.send(self.active_order());
            }
            OrderRequest::StopTracking { respond_to } => {
                if let Some(id) = self.active.take() {
                    info!(order_id = %id, "Tracking stopped");
                }
                self.timer = None;
                self.publish_active();
                let _ = respond_to.send(());
            }
            OrderRequest::Cancel { id, respond_to } => {
                let result = self.apply(&id, OrderEvent::Cancel).await;
                if let Err(e) = &result {
                    warn!(order_id = %id, error = %e, "Cancel rejected");
                }
                let _ = respond_to.send(result);
            }
            OrderRequest::Rate {
                id,
                feedback,
                respond_to,
            } => {
                let _ = respond_to.send(self.rate(id, feedback).await);
            }
        }
    }

    fn position(&self, id: &OrderId) -> Option<usize> {
        self.history.iter().position(|order| &order.id == id)
    }

    fn active_order(&self) -> Option<Order> {
        let id = self.active.as_ref()?;
        self.position(id).map(|idx| self.history[idx].clone())
    }

    fn publish_active(&self) {
        let snapshot = self.active_order();
        self.active_tx.send_if_modified(|current| {
            if *current == snapshot {
                false
            } else {
                *current = snapshot;
                true
            }
        });
    }

    /// Arms the dwell timer of `status` for `id`, replacing any pending timer.
    fn arm(&mut self, id: &OrderId, status: OrderStatus) {
        self.timer = fsm::entry_schedule(status).map(|next| PendingTimer {
            order_id: id.clone(),
            deadline: Instant::now() + next.after,
            event: next.event,
        });
        if let Some(timer) = &self.timer {
            debug!(
                order_id = %id,
                %status,
                after_ms = (timer.deadline - Instant::now()).as_millis() as u64,
                "Timer armed"
            );
        }
    }

    async fn persist(&self) -> Result<(), OrderError> {
        let owner = self.owner.as_ref().ok_or(OrderError::NotSignedIn)?;
        self.storage
            .store(&orders_key(owner), &self.history)
            .await
            .map_err(OrderError::from)
    }

    async fn bind(&mut self, owner: Option<UserId>) -> Result<usize, OrderError> {
        if owner.is_some() && owner == self.owner {
            debug!(owner = ?self.owner, "Already bound, keeping draft and tracking");
            return Ok(self.history.len());
        }
        let history = match &owner {
            Some(user) => self
                .storage
                .retrieve::<Vec<Order>>(&orders_key(user))
                .await?
                .unwrap_or_default(),
            None => Vec::new(),
        };
        self.owner = owner;
        self.history = history;
        self.draft = None;
        self.active = None;
        self.timer = None;
        self.publish_active();
        info!(owner = ?self.owner, orders = self.history.len(), "Order history bound");
        Ok(self.history.len())
    }

    async fn finalize(&mut self) -> Result<Order, OrderError> {
        let Some(owner) = self.owner.clone() else {
            warn!("Finalize without a signed-in user");
            return Err(OrderError::NotSignedIn);
        };
        let draft = self.draft.clone().unwrap_or_default();
        let missing = draft.missing_required();
        let (Some(vehicle_id), Some(fuel_type), Some(total_amount), Some(delivery_address), true) = (
            draft.vehicle_id,
            draft.fuel_type,
            draft.total_amount,
            draft.delivery_address,
            missing.is_empty(),
        ) else {
            warn!(?missing, "Finalize rejected");
            return Err(OrderError::IncompleteDraft(missing));
        };

        let order = Order {
            id: OrderId(self.ids.next_id()),
            user_id: owner,
            vehicle_id,
            delivery_address,
            location: draft.location.unwrap_or(self.delivery.default_location),
            fuel_type,
            quantity_liters: draft.quantity_liters,
            quantity_rupees: draft.quantity_rupees,
            price_per_litre: draft.price_per_litre.unwrap_or_default(),
            fuel_cost: draft.fuel_cost.unwrap_or_default(),
            convenience_fee: draft.convenience_fee.unwrap_or_default(),
            gst_on_fee: draft.gst_on_fee.unwrap_or_default(),
            total_amount,
            payment_method: draft.payment_method,
            status: OrderStatus::SearchingCaptain,
            order_date: self.clock.now(),
            delivery_captain: None,
            otp: None,
            feedback: None,
        };

        self.history.insert(0, order.clone());
        if let Err(e) = self.persist().await {
            self.history.remove(0);
            warn!(error = %e, "Persist failed, order not placed");
            return Err(e);
        }
        self.draft = None;
        self.active = Some(order.id.clone());
        self.arm(&order.id, order.status);
        self.publish_active();
        info!(
            order_id = %order.id,
            user_id = %order.user_id,
            total = order.total_amount,
            "Order placed"
        );
        Ok(order)
    }

    fn begin_tracking(&mut self, id: OrderId) -> Option<Order> {
        let tracked = self
            .position(&id)
            .map(|idx| self.history[idx].clone())
            .filter(|order| !order.status.is_terminal());

        match tracked {
            Some(order) => {
                let already_running = self.active.as_ref() == Some(&id)
                    && self.timer.as_ref().is_some_and(|t| t.order_id == id);
                if !already_running {
                    self.active = Some(id.clone());
                    self.arm(&id, order.status);
                }
                info!(order_id = %id, status = %order.status, already_running, "Tracking");
                self.publish_active();
                Some(order)
            }
            None => {
                debug!(order_id = %id, "Not trackable, active order cleared");
                self.active = None;
                self.timer = None;
                self.publish_active();
                None
            }
        }
    }

    /// Runs one state-machine step on a history entry and persists it.
    async fn apply(&mut self, id: &OrderId, event: OrderEvent) -> Result<Order, OrderError> {
        let idx = self
            .position(id)
            .ok_or_else(|| OrderError::NotFound(id.to_string()))?;
        let transition = fsm::step(self.history[idx].status, event)?;

        let mut updated = self.history[idx].clone();
        updated.status = transition.to;
        if transition.effect == Some(Effect::AssignCaptain) {
            updated.delivery_captain = Some(captain::assign(
                updated.location,
                &self.delivery.captain_photo_url,
            ));
            updated.otp = Some(captain::one_time_code(&mut rand::thread_rng()));
        }

        let previous = std::mem::replace(&mut self.history[idx], updated.clone());
        if let Err(e) = self.persist().await {
            self.history[idx] = previous;
            return Err(e);
        }
        info!(
            order_id = %id,
            from = %transition.from,
            to = %transition.to,
            "Order status changed"
        );

        if self.active.as_ref() == Some(id) {
            self.timer = None;
            if let Some(next) = transition.schedule {
                self.timer = Some(PendingTimer {
                    order_id: id.clone(),
                    deadline: Instant::now() + next.after,
                    event: next.event,
                });
            }
            self.publish_active();
        }
        Ok(updated)
    }

    async fn fire_timer(&mut self) {
        let Some(timer) = self.timer.take() else {
            return;
        };
        if self.active.as_ref() != Some(&timer.order_id) {
            debug!(order_id = %timer.order_id, "Dropping timer of an inactive order");
            return;
        }
        if let Err(e) = self.apply(&timer.order_id, timer.event).await {
            warn!(order_id = %timer.order_id, error = %e, "Timed transition failed, retrying after a full dwell");
            if let Some(idx) = self.position(&timer.order_id) {
                let status = self.history[idx].status;
                self.arm(&timer.order_id, status);
            }
        }
    }

    async fn rate(&mut self, id: OrderId, feedback: Feedback) -> Result<Order, OrderError> {
        if !(1..=5).contains(&feedback.rating) {
            return Err(OrderError::Validation(format!(
                "rating must be between 1 and 5, got {}",
                feedback.rating
            )));
        }
        if feedback.tip.is_some_and(|tip| !(tip.is_finite() && tip >= 0.0)) {
            return Err(OrderError::Validation("tip must not be negative".into()));
        }
        let idx = self
            .position(&id)
            .ok_or_else(|| OrderError::NotFound(id.to_string()))?;
        if self.history[idx].status != OrderStatus::Completed {
            return Err(OrderError::InvalidTransition(format!(
                "only completed orders can be rated, order {id} is {}",
                self.history[idx].status
            )));
        }

        let previous = self.history[idx].feedback.replace(feedback);
        if let Err(e) = self.persist().await {
            self.history[idx].feedback = previous;
            return Err(e);
        }
        info!(order_id = %id, "Order rated");
        self.publish_active();
        Ok(self.history[idx].clone())
    }
}
