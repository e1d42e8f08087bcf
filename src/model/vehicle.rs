use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleId(pub String);

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for VehicleId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for VehicleId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FuelType {
    Petrol,
    Diesel,
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FuelType::Petrol => write!(f, "Petrol"),
            FuelType::Diesel => write!(f, "Diesel"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleType {
    Car,
    Bike,
}

/// A registered vehicle, owned by the user whose key it is persisted under.
///
/// Managed by the vehicle [`ResourceActor`](actor_framework::ResourceActor); see
/// `vehicle_actor::entity` for validation of [`VehicleCreate`] and [`VehicleUpdate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: VehicleId,
    pub nickname: String,
    pub registration_number: String,
    pub fuel_type: FuelType,
    pub vehicle_type: VehicleType,
}

/// Payload for registering a vehicle.
#[derive(Debug, Clone)]
pub struct VehicleCreate {
    pub nickname: String,
    pub registration_number: String,
    pub fuel_type: FuelType,
    pub vehicle_type: VehicleType,
}

/// Partial update; `None` leaves the field as it is.
#[derive(Debug, Clone, Default)]
pub struct VehicleUpdate {
    pub nickname: Option<String>,
    pub registration_number: Option<String>,
    pub fuel_type: Option<FuelType>,
    pub vehicle_type: Option<VehicleType>,
}
