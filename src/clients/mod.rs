//! Typed client handles, one per actor. All are cheap to clone.

pub mod identity_client;
pub mod order_client;
pub mod vehicle_client;

pub use identity_client::IdentityClient;
pub use order_client::OrderClient;
pub use vehicle_client::VehicleClient;
