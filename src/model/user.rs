use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A signed-in user.
///
/// Created with an empty `full_name` the first time a phone number verifies; onboarding
/// fills the name in. Profiles are never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub mobile_number: String,
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UserProfile {
    pub fn new(id: UserId, mobile_number: impl Into<String>) -> Self {
        Self {
            id,
            mobile_number: mobile_number.into(),
            full_name: String::new(),
            email: None,
        }
    }

    /// True once profile setup has recorded a name.
    pub fn is_onboarded(&self) -> bool {
        !self.full_name.trim().is_empty()
    }
}
