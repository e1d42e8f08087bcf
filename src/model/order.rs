use super::{FuelType, UserId, VehicleId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for OrderId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn offset(&self, d_lat: f64, d_lng: f64) -> Self {
        Self::new(self.lat + d_lat, self.lng + d_lng)
    }
}

/// Where an order is in its delivery.
///
/// Serialized with the labels shown to customers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "Searching for Captain")]
    SearchingCaptain,
    #[serde(rename = "Captain Assigned")]
    CaptainAssigned,
    #[serde(rename = "En Route")]
    EnRoute,
    Arrived,
    Fuelling,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::SearchingCaptain => "Searching for Captain",
            OrderStatus::CaptainAssigned => "Captain Assigned",
            OrderStatus::EnRoute => "En Route",
            OrderStatus::Arrived => "Arrived",
            OrderStatus::Fuelling => "Fuelling",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "UPI")]
    Upi,
    Card,
    NetBanking,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryCaptain {
    pub id: String,
    pub name: String,
    pub rating: f32,
    pub vehicle_number: String,
    pub photo_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_location: Option<GeoPoint>,
}

/// Post-delivery rating left on a completed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub rating: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tip: Option<f64>,
}

/// Order fields collected across checkout, all optional until finalization.
///
/// Merging a patch overwrites only the fields the patch sets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderDraft {
    pub vehicle_id: Option<VehicleId>,
    pub delivery_address: Option<String>,
    pub location: Option<GeoPoint>,
    pub fuel_type: Option<FuelType>,
    pub quantity_liters: Option<f64>,
    pub quantity_rupees: Option<f64>,
    pub price_per_litre: Option<f64>,
    pub fuel_cost: Option<f64>,
    pub convenience_fee: Option<f64>,
    pub gst_on_fee: Option<f64>,
    pub total_amount: Option<f64>,
    pub payment_method: Option<PaymentMethod>,
}

impl OrderDraft {
    pub fn merge(&mut self, patch: OrderDraft) {
        macro_rules! take {
            ($($field:ident),*) => {
                $(if patch.$field.is_some() { self.$field = patch.$field; })*
            };
        }
        take!(
            vehicle_id,
            delivery_address,
            location,
            fuel_type,
            quantity_liters,
            quantity_rupees,
            price_per_litre,
            fuel_cost,
            convenience_fee,
            gst_on_fee,
            total_amount,
            payment_method
        );
    }

    /// Names of the fields finalization requires but the draft lacks.
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.vehicle_id.is_none() {
            missing.push("vehicleId");
        }
        if self.fuel_type.is_none() {
            missing.push("fuelType");
        }
        if !self.total_amount.is_some_and(|total| total > 0.0) {
            missing.push("totalAmount");
        }
        if self
            .delivery_address
            .as_deref()
            .map_or(true, |address| address.trim().is_empty())
        {
            missing.push("deliveryAddress");
        }
        missing
    }
}

/// A placed order as kept in the owner's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub vehicle_id: VehicleId,
    pub delivery_address: String,
    pub location: GeoPoint,
    pub fuel_type: FuelType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity_liters: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity_rupees: Option<f64>,
    #[serde(default)]
    pub price_per_litre: f64,
    #[serde(default)]
    pub fuel_cost: f64,
    #[serde(default)]
    pub convenience_fee: f64,
    #[serde(default)]
    pub gst_on_fee: f64,
    pub total_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    pub status: OrderStatus,
    pub order_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_captain: Option<DeliveryCaptain>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub otp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<Feedback>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_keeps_fields_the_patch_leaves_unset() {
        let mut draft = OrderDraft {
            vehicle_id: Some("v1".into()),
            delivery_address: Some("Home".into()),
            ..Default::default()
        };
        draft.merge(OrderDraft {
            total_amount: Some(530.0),
            delivery_address: Some("Office".into()),
            ..Default::default()
        });

        assert_eq!(draft.vehicle_id, Some(VehicleId::from("v1")));
        assert_eq!(draft.delivery_address.as_deref(), Some("Office"));
        assert_eq!(draft.total_amount, Some(530.0));
    }

    #[test]
    fn missing_required_names_each_gap() {
        let draft = OrderDraft {
            total_amount: Some(0.0),
            delivery_address: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(
            draft.missing_required(),
            vec!["vehicleId", "fuelType", "totalAmount", "deliveryAddress"]
        );
    }

    #[test]
    fn status_serializes_with_display_labels() {
        let json = serde_json::to_string(&OrderStatus::SearchingCaptain).unwrap();
        assert_eq!(json, "\"Searching for Captain\"");
        let back: OrderStatus = serde_json::from_str("\"En Route\"").unwrap();
        assert_eq!(back, OrderStatus::EnRoute);
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(!OrderStatus::Fuelling.is_terminal());
    }
}
