//! # Vehicle Client
//!
//! Wraps a `ResourceClient<Vehicle>` with the registry's domain methods.
use crate::model::{UserId, Vehicle, VehicleCreate, VehicleId, VehicleUpdate};
use crate::storage::keys::vehicles_key;
use crate::vehicle_actor::VehicleError;
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct VehicleClient {
    inner: ResourceClient<Vehicle>,
}

impl VehicleClient {
    pub fn new(inner: ResourceClient<Vehicle>) -> Self {
        Self { inner }
    }

    /// Loads `owner`'s vehicles, or empties the registry for `None`.
    #[instrument(skip(self))]
    pub async fn bind(&self, owner: Option<&UserId>) -> Result<usize, VehicleError> {
        debug!("Sending request");
        self.inner
            .bind(owner.map(vehicles_key))
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn add_vehicle(&self, params: VehicleCreate) -> Result<VehicleId, VehicleError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_vehicle(
        &self,
        id: VehicleId,
        update: VehicleUpdate,
    ) -> Result<Vehicle, VehicleError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn remove_vehicle(&self, id: VehicleId) -> Result<(), VehicleError> {
        self.delete(id).await
    }

    /// Like `get`, but a missing vehicle is an error.
    pub async fn require(&self, id: VehicleId) -> Result<Vehicle, VehicleError> {
        self.get(id.clone())
            .await?
            .ok_or_else(|| VehicleError::NotFound(id.to_string()))
    }
}

#[async_trait]
impl ActorClient<Vehicle> for VehicleClient {
    type Error = VehicleError;

    fn inner(&self) -> &ResourceClient<Vehicle> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::EntityError(inner) => match inner.downcast::<VehicleError>() {
                Ok(vehicle_error) => *vehicle_error,
                Err(other) => VehicleError::ActorCommunicationError(other.to_string()),
            },
            FrameworkError::NotFound(id) => VehicleError::NotFound(id),
            FrameworkError::Unbound => VehicleError::NotSignedIn,
            FrameworkError::Storage(msg) => VehicleError::Storage(msg),
            other => VehicleError::ActorCommunicationError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FuelType, VehicleType};
    use actor_framework::mock::MockClient;

    #[tokio::test]
    async fn test_require_reports_missing_vehicle() {
        let mut mock = MockClient::<Vehicle>::new();
        mock.expect_get("v9".into()).return_ok(None);
        mock.expect_get("v1".into()).return_ok(Some(Vehicle {
            id: "v1".into(),
            nickname: "Scooty".into(),
            registration_number: "KA05MN42".into(),
            fuel_type: FuelType::Petrol,
            vehicle_type: VehicleType::Bike,
        }));

        let client = VehicleClient::new(mock.client());
        assert_eq!(
            client.require("v9".into()).await,
            Err(VehicleError::NotFound("v9".into()))
        );
        assert_eq!(client.require("v1".into()).await.unwrap().nickname, "Scooty");
        mock.verify();
    }

    #[tokio::test]
    async fn test_framework_errors_map_to_vehicle_errors() {
        let mut mock = MockClient::<Vehicle>::new();
        mock.expect_create().return_err(FrameworkError::Unbound);
        mock.expect_create().return_err(FrameworkError::EntityError(Box::new(
            VehicleError::Validation("nickname is required".into()),
        )));
        mock.expect_delete("v1".into())
            .return_err(FrameworkError::Storage("disk full".into()));

        let client = VehicleClient::new(mock.client());
        let params = VehicleCreate {
            nickname: String::new(),
            registration_number: "MH01AB1234".into(),
            fuel_type: FuelType::Diesel,
            vehicle_type: VehicleType::Car,
        };

        assert_eq!(
            client.add_vehicle(params.clone()).await,
            Err(VehicleError::NotSignedIn)
        );
        assert_eq!(
            client.add_vehicle(params).await,
            Err(VehicleError::Validation("nickname is required".into()))
        );
        assert_eq!(
            client.remove_vehicle("v1".into()).await,
            Err(VehicleError::Storage("disk full".into()))
        );
        mock.verify();
    }
}
