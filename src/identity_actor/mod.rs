//! # Identity Actor
//!
//! Holds the current session and the per-phone profile records behind it.
//!
//! - [`actor`] - the [`IdentityActor`] loop and its [`IdentityRequest`] messages
//! - [`error`] - [`IdentityError`]
//! - [`session`] - the [`Access`] gate derived from a session
//!
//! Sign-in is simulated: any well-formed mobile number is accepted together with the
//! configured verification code. The first sign-in for a number creates its profile with an
//! empty name; profile setup fills it in.
//!
//! ```rust
//! use fuel_swift::clock::{IdSource, SystemClock};
//! use fuel_swift::identity_actor::{self, Access};
//! use fuel_swift::storage::StorageService;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let ids = Arc::new(IdSource::new(Arc::new(SystemClock)));
//!     let (actor, client) = identity_actor::new(StorageService::in_memory(), ids, "1234");
//!     tokio::spawn(actor.run());
//!
//!     client.login("9876543210", "1234").await?;
//!     assert_eq!(client.access().await?, Access::ProfileSetup);
//!     Ok(())
//! }
//! ```

pub mod actor;
pub mod error;
pub mod session;

pub use actor::{IdentityActor, IdentityRequest};
pub use error::*;
pub use session::Access;

use crate::clients::IdentityClient;
use crate::clock::IdSource;
use crate::storage::StorageService;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Creates a new Identity actor and its client.
pub fn new(
    storage: StorageService,
    ids: Arc<IdSource>,
    accepted_code: impl Into<String>,
) -> (IdentityActor, IdentityClient) {
    let (sender, receiver) = mpsc::channel(32);
    let actor = IdentityActor::new(receiver, storage, ids, accepted_code.into());
    (actor, IdentityClient::new(sender))
}
