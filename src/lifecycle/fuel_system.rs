use crate::clients::{IdentityClient, OrderClient, VehicleClient};
use crate::clock::{Clock, IdSource, SystemClock};
use crate::config::{AppConfig, ConfigError, StorageBackend};
use crate::identity_actor::{Access, IdentityError};
use crate::model::{GeoPoint, Order, OrderDraft, PaymentMethod, UserProfile, Vehicle, VehicleId};
use crate::order_actor::OrderError;
use crate::pricing::{PricingError, QuantityRequest, Quote, Tariff};
use crate::storage::{FileStore, StorageError, StorageService};
use crate::vehicle_actor::VehicleError;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

#[derive(Debug, Error)]
pub enum SystemError {
    #[error(transparent)]
    Identity(#[from] IdentityError),
    #[error(transparent)]
    Vehicle(#[from] VehicleError),
    #[error(transparent)]
    Order(#[from] OrderError),
    #[error(transparent)]
    Pricing(#[from] PricingError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("Select a vehicle before choosing a quantity")]
    DraftMissingVehicle,
    #[error("Actor task failed: {0}")]
    ActorTask(String),
}

/// The running application: one task per store plus the clients that talk to them.
///
/// `FuelSystem` is the only place that knows who is signed in and keeps the vehicle registry
/// and order history bound to that user. Signing in or out rebinds both; a session restored
/// from storage is bound during startup.
///
/// # Example
///
/// ```rust
/// use fuel_swift::config::AppConfig;
/// use fuel_swift::lifecycle::FuelSystem;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let system = FuelSystem::launch(AppConfig::default()).await?;
///     system.sign_in("9876543210", "1234").await?;
///     system.complete_profile("Asha Rao", None).await?;
///     system.shutdown().await?;
///     Ok(())
/// }
/// ```
pub struct FuelSystem {
    pub identity: IdentityClient,
    pub vehicles: VehicleClient,
    pub orders: OrderClient,
    tariff: Tariff,
    handles: Vec<JoinHandle<()>>,
}

impl FuelSystem {
    /// Opens the configured storage and starts every actor on the system clock.
    pub async fn launch(config: AppConfig) -> Result<Self, SystemError> {
        let storage = match config.storage.backend {
            StorageBackend::Memory => StorageService::in_memory(),
            StorageBackend::File => {
                StorageService::new(Arc::new(FileStore::open(&config.storage.path).await?))
            }
        };
        Self::start(config, storage, Arc::new(SystemClock)).await
    }

    /// Starts every actor over `storage`, stamping records with `clock`.
    pub async fn start(
        config: AppConfig,
        storage: StorageService,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, SystemError> {
        let ids = Arc::new(IdSource::new(clock.clone()));

        let (identity_actor, identity) = crate::identity_actor::new(
            storage.clone(),
            ids.clone(),
            config.auth.accepted_code.clone(),
        );
        let (vehicle_actor, vehicles) = crate::vehicle_actor::new(ids.clone(), storage.clone());
        let (order_actor, orders) =
            crate::order_actor::new(storage, ids, clock, config.delivery.clone());

        let handles = vec![
            tokio::spawn(identity_actor.run()),
            tokio::spawn(vehicle_actor.run(())),
            tokio::spawn(order_actor.run()),
        ];

        let system = Self {
            identity,
            vehicles,
            orders,
            tariff: config.pricing,
            handles,
        };
        if let Some(profile) = system.identity.current().await? {
            info!(user_id = %profile.id, "Session restored");
            system.bind_user(Some(&profile)).await?;
        }
        info!(backend = ?config.storage.backend, "System started");
        Ok(system)
    }

    async fn bind_user(&self, profile: Option<&UserProfile>) -> Result<(), SystemError> {
        let owner = profile.map(|p| &p.id);
        let vehicles = self.vehicles.bind(owner).await?;
        let orders = self.orders.bind(owner).await?;
        info!(?owner, vehicles, orders, "Stores bound");
        Ok(())
    }

    /// Signs in and binds the stores to the profile. A failed bind signs the user out and
    /// unbinds the stores again.
    pub async fn sign_in(&self, mobile_number: &str, code: &str) -> Result<UserProfile, SystemError> {
        let profile = self.identity.login(mobile_number, code).await?;
        if let Err(e) = self.bind_user(Some(&profile)).await {
            warn!(user_id = %profile.id, error = %e, "Binding stores failed, signing out");
            if let Err(logout) = self.identity.logout().await {
                error!(error = %logout, "Sign-out after failed bind failed");
            }
            if let Err(unbind) = self.bind_user(None).await {
                error!(error = %unbind, "Unbinding stores failed");
            }
            return Err(e);
        }
        Ok(profile)
    }

    pub async fn complete_profile(
        &self,
        full_name: &str,
        email: Option<&str>,
    ) -> Result<UserProfile, SystemError> {
        Ok(self.identity.complete_profile(full_name, email).await?)
    }

    pub async fn sign_out(&self) -> Result<(), SystemError> {
        self.identity.logout().await?;
        self.bind_user(None).await
    }

    pub async fn access(&self) -> Result<Access, SystemError> {
        Ok(self.identity.access().await?)
    }

    pub fn tariff(&self) -> &Tariff {
        &self.tariff
    }

    /// Starts the checkout for `vehicle_id`, recording where to deliver and which fuel to bring.
    pub async fn select_vehicle(
        &self,
        vehicle_id: VehicleId,
        delivery_address: &str,
        location: Option<GeoPoint>,
    ) -> Result<OrderDraft, SystemError> {
        let vehicle = self.vehicles.require(vehicle_id).await?;
        let draft = self
            .orders
            .update_draft(OrderDraft {
                vehicle_id: Some(vehicle.id),
                delivery_address: Some(delivery_address.trim().to_string()),
                location,
                fuel_type: Some(vehicle.fuel_type),
                ..Default::default()
            })
            .await?;
        Ok(draft)
    }

    /// Prices `request` for the selected vehicle's fuel and writes the breakdown into the draft.
    pub async fn configure_quantity(&self, request: QuantityRequest) -> Result<Quote, SystemError> {
        let vehicle_id = self
            .orders
            .draft()
            .await?
            .and_then(|draft| draft.vehicle_id)
            .ok_or(SystemError::DraftMissingVehicle)?;
        let vehicle: Vehicle = self.vehicles.require(vehicle_id).await?;

        let quote = self.tariff.quote(vehicle.fuel_type, request)?;
        self.orders.update_draft(quote.to_draft()).await?;
        info!(total = quote.total_amount, litres = quote.litres, "Quantity configured");
        Ok(quote)
    }

    pub async fn choose_payment(&self, method: PaymentMethod) -> Result<OrderDraft, SystemError> {
        Ok(self
            .orders
            .update_draft(OrderDraft {
                payment_method: Some(method),
                ..Default::default()
            })
            .await?)
    }

    pub async fn place_order(&self) -> Result<Order, SystemError> {
        Ok(self.orders.finalize().await?)
    }

    /// Resumes tracking the newest unfinished order, if there is one.
    pub async fn resume_tracking(&self) -> Result<Option<Order>, SystemError> {
        let pending = self
            .orders
            .history()
            .await?
            .into_iter()
            .find(|order| !order.status.is_terminal());
        match pending {
            Some(order) => Ok(self.orders.begin_tracking(order.id).await?),
            None => Ok(None),
        }
    }

    /// Drops every client and waits for the actors to drain their queues and stop.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");

        drop(self.identity);
        drop(self.vehicles);
        drop(self.orders);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(SystemError::ActorTask(e.to_string()));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
