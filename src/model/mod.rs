//! Plain data types shared by the stores. Field names serialize in camelCase so persisted
//! documents keep the layout the app has always written.

pub mod order;
pub mod user;
pub mod vehicle;

pub use order::*;
pub use user::*;
pub use vehicle::*;
