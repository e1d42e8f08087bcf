//! # Identity Client
//!
//! High-level API for the Identity actor.
use crate::identity_actor::{Access, IdentityError, IdentityRequest};
use crate::model::UserProfile;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct IdentityClient {
    sender: mpsc::Sender<IdentityRequest>,
}

impl IdentityClient {
    pub fn new(sender: mpsc::Sender<IdentityRequest>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<R>) -> IdentityRequest,
    ) -> Result<R, IdentityError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|e| IdentityError::ActorCommunicationError(e.to_string()))?;
        response
            .await
            .map_err(|e| IdentityError::ActorCommunicationError(e.to_string()))
    }

    /// Verifies `code` for `mobile_number` and signs in, creating the profile on first use.
    #[instrument(skip(self, code))]
    pub async fn login(&self, mobile_number: &str, code: &str) -> Result<UserProfile, IdentityError> {
        debug!("Sending request");
        self.request(|respond_to| IdentityRequest::Login {
            mobile_number: mobile_number.to_string(),
            code: code.to_string(),
            respond_to,
        })
        .await?
    }

    #[instrument(skip(self))]
    pub async fn complete_profile(
        &self,
        full_name: &str,
        email: Option<&str>,
    ) -> Result<UserProfile, IdentityError> {
        debug!("Sending request");
        self.request(|respond_to| IdentityRequest::CompleteProfile {
            full_name: full_name.to_string(),
            email: email.map(str::to_string),
            respond_to,
        })
        .await?
    }

    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), IdentityError> {
        debug!("Sending request");
        self.request(|respond_to| IdentityRequest::Logout { respond_to })
            .await?
    }

    pub async fn current(&self) -> Result<Option<UserProfile>, IdentityError> {
        self.request(|respond_to| IdentityRequest::Current { respond_to })
            .await
    }

    pub async fn access(&self) -> Result<Access, IdentityError> {
        Ok(Access::for_session(self.current().await?.as_ref()))
    }
}
