//! [`ActorEntity`] implementation for [`Vehicle`].
//!
//! Nicknames are trimmed and must not be empty; registration numbers must look like an
//! Indian plate and are stored upper-cased.

use super::VehicleError;
use crate::model::{Vehicle, VehicleCreate, VehicleId, VehicleUpdate};
use crate::validation::{is_valid_registration_number, normalize_registration_number};
use actor_framework::ActorEntity;
use async_trait::async_trait;

/// Vehicles have no custom actions.
#[derive(Debug)]
pub enum VehicleAction {}

fn nickname(input: &str) -> Result<String, VehicleError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(VehicleError::Validation("nickname is required".into()));
    }
    Ok(trimmed.to_string())
}

fn registration_number(input: &str) -> Result<String, VehicleError> {
    if !is_valid_registration_number(input) {
        return Err(VehicleError::Validation(format!(
            "invalid registration number {:?}",
            input.trim()
        )));
    }
    Ok(normalize_registration_number(input))
}

#[async_trait]
impl ActorEntity for Vehicle {
    type Id = VehicleId;
    type Create = VehicleCreate;
    type Update = VehicleUpdate;
    type Action = VehicleAction;
    type ActionResult = ();
    type Context = ();
    type Error = VehicleError;

    fn from_create_params(id: VehicleId, params: VehicleCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            nickname: nickname(&params.nickname)?,
            registration_number: registration_number(&params.registration_number)?,
            fuel_type: params.fuel_type,
            vehicle_type: params.vehicle_type,
        })
    }

    fn id(&self) -> &VehicleId {
        &self.id
    }

    async fn on_update(
        &mut self,
        update: VehicleUpdate,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        let nickname = update.nickname.as_deref().map(nickname).transpose()?;
        let plate = update
            .registration_number
            .as_deref()
            .map(registration_number)
            .transpose()?;

        if let Some(nickname) = nickname {
            self.nickname = nickname;
        }
        if let Some(plate) = plate {
            self.registration_number = plate;
        }
        if let Some(fuel_type) = update.fuel_type {
            self.fuel_type = fuel_type;
        }
        if let Some(vehicle_type) = update.vehicle_type {
            self.vehicle_type = vehicle_type;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: VehicleAction,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        match action {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FuelType, VehicleType};

    fn create(nickname: &str, plate: &str) -> VehicleCreate {
        VehicleCreate {
            nickname: nickname.into(),
            registration_number: plate.into(),
            fuel_type: FuelType::Petrol,
            vehicle_type: VehicleType::Car,
        }
    }

    #[test]
    fn create_normalizes_fields() {
        let vehicle =
            Vehicle::from_create_params("v1".into(), create("  City car ", " mh 01 ab 1234"))
                .unwrap();
        assert_eq!(vehicle.nickname, "City car");
        assert_eq!(vehicle.registration_number, "MH 01 AB 1234");
    }

    #[test]
    fn create_rejects_blank_nickname_and_bad_plate() {
        assert!(matches!(
            Vehicle::from_create_params("v1".into(), create("  ", "MH01AB1234")),
            Err(VehicleError::Validation(_))
        ));
        assert!(matches!(
            Vehicle::from_create_params("v1".into(), create("Bike", "not a plate")),
            Err(VehicleError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn rejected_update_changes_nothing() {
        let mut vehicle =
            Vehicle::from_create_params("v1".into(), create("Car", "MH01AB1234")).unwrap();
        let update = VehicleUpdate {
            nickname: Some("Renamed".into()),
            registration_number: Some("???".into()),
            ..Default::default()
        };
        assert!(vehicle.on_update(update, &()).await.is_err());
        assert_eq!(vehicle.nickname, "Car");

        let update = VehicleUpdate {
            fuel_type: Some(FuelType::Diesel),
            ..Default::default()
        };
        vehicle.on_update(update, &()).await.unwrap();
        assert_eq!(vehicle.fuel_type, FuelType::Diesel);
    }
}
