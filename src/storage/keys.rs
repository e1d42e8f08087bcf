//! Key layout of the persisted namespace.

use crate::model::UserId;

/// The signed-in profile, if any.
pub const SESSION_KEY: &str = "fuelSwiftUser";

pub fn profile_key(mobile_number: &str) -> String {
    format!("user-{mobile_number}")
}

pub fn vehicles_key(user_id: &UserId) -> String {
    format!("vehicles_{user_id}")
}

pub fn orders_key(user_id: &UserId) -> String {
    format!("orders_{user_id}")
}
