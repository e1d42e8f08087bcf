use super::IdentityError;
use crate::clock::IdSource;
use crate::model::{UserId, UserProfile};
use crate::storage::keys::{profile_key, SESSION_KEY};
use crate::storage::StorageService;
use crate::validation::is_valid_mobile_number;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

type Reply<T> = oneshot::Sender<Result<T, IdentityError>>;

#[derive(Debug)]
pub enum IdentityRequest {
    Login {
        mobile_number: String,
        code: String,
        respond_to: Reply<UserProfile>,
    },
    CompleteProfile {
        full_name: String,
        email: Option<String>,
        respond_to: Reply<UserProfile>,
    },
    Logout {
        respond_to: Reply<()>,
    },
    Current {
        respond_to: oneshot::Sender<Option<UserProfile>>,
    },
}

/// Owns the session: the signed-in profile, or nothing.
///
/// The session is mirrored under [`SESSION_KEY`] and each profile under its phone number's
/// key. A persisted session is restored when the actor starts. State only changes after the
/// write that records it has succeeded.
pub struct IdentityActor {
    receiver: mpsc::Receiver<IdentityRequest>,
    storage: StorageService,
    ids: Arc<IdSource>,
    accepted_code: String,
    session: Option<UserProfile>,
}

impl IdentityActor {
    pub(super) fn new(
        receiver: mpsc::Receiver<IdentityRequest>,
        storage: StorageService,
        ids: Arc<IdSource>,
        accepted_code: String,
    ) -> Self {
        Self {
            receiver,
            storage,
            ids,
            accepted_code,
            session: None,
        }
    }

    pub async fn run(mut self) {
        self.session = match self.storage.retrieve::<UserProfile>(SESSION_KEY).await {
            Ok(session) => session,
            Err(e) => {
                warn!(error = %e, "Stored session unreadable, starting signed out");
                None
            }
        };
        info!(
            restored = self.session.is_some(),
            "Identity actor started"
        );

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                IdentityRequest::Login {
                    mobile_number,
                    code,
                    respond_to,
                } => {
                    let result = self.login(mobile_number, code).await;
                    let _ = respond_to.send(result);
                }
                IdentityRequest::CompleteProfile {
                    full_name,
                    email,
                    respond_to,
                } => {
                    let result = self.complete_profile(full_name, email).await;
                    let _ = respond_to.send(result);
                }
                IdentityRequest::Logout { respond_to } => {
                    let result = self.logout().await;
                    let _ = respond_to.send(result);
                }
                IdentityRequest::Current { respond_to } => {
                    let _ = respond_to.send(self.session.clone());
                }
            }
        }

        info!(signed_in = self.session.is_some(), "Identity actor shutdown");
    }

    async fn login(
        &mut self,
        mobile_number: String,
        code: String,
    ) -> Result<UserProfile, IdentityError> {
        debug!(%mobile_number, "Login");
        if !is_valid_mobile_number(&mobile_number) {
            warn!(%mobile_number, "Login rejected: malformed number");
            return Err(IdentityError::InvalidPhone(mobile_number));
        }
        if code != self.accepted_code {
            warn!(%mobile_number, "Login rejected: wrong code");
            return Err(IdentityError::InvalidCode);
        }

        let key = profile_key(&mobile_number);
        let profile = match self.storage.retrieve::<UserProfile>(&key).await? {
            Some(existing) => existing,
            None => {
                let fresh = UserProfile::new(UserId(self.ids.next_id()), mobile_number.clone());
                self.storage.store(&key, &fresh).await?;
                info!(user_id = %fresh.id, %mobile_number, "Profile created");
                fresh
            }
        };
        self.storage.store(SESSION_KEY, &profile).await?;
        self.session = Some(profile.clone());
        info!(user_id = %profile.id, onboarded = profile.is_onboarded(), "Signed in");
        Ok(profile)
    }

    async fn complete_profile(
        &mut self,
        full_name: String,
        email: Option<String>,
    ) -> Result<UserProfile, IdentityError> {
        let Some(current) = self.session.as_ref() else {
            warn!("Profile completion without a session");
            return Err(IdentityError::NotAuthenticated);
        };
        let full_name = full_name.trim().to_string();
        if full_name.is_empty() {
            return Err(IdentityError::Validation("full name is required".into()));
        }
        let email = email
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());

        let mut updated = current.clone();
        updated.full_name = full_name;
        if email.is_some() {
            updated.email = email;
        }

        self.storage.store(SESSION_KEY, &updated).await?;
        self.storage
            .store(&profile_key(&updated.mobile_number), &updated)
            .await?;
        self.session = Some(updated.clone());
        info!(user_id = %updated.id, "Profile completed");
        Ok(updated)
    }

    async fn logout(&mut self) -> Result<(), IdentityError> {
        self.storage.remove(SESSION_KEY).await?;
        if let Some(profile) = self.session.take() {
            info!(user_id = %profile.id, "Signed out");
        }
        Ok(())
    }
}
