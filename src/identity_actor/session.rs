//! Which part of the app a session may reach.

use crate::model::UserProfile;

/// Route gate derived from the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Nobody is signed in.
    SignIn,
    /// Signed in, but onboarding has not recorded a name yet.
    ProfileSetup,
    Granted,
}

impl Access {
    pub fn for_session(session: Option<&UserProfile>) -> Self {
        match session {
            None => Access::SignIn,
            Some(profile) if !profile.is_onboarded() => Access::ProfileSetup,
            Some(_) => Access::Granted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_follows_onboarding() {
        let mut profile = UserProfile::new("1".into(), "9876543210");
        assert_eq!(Access::for_session(None), Access::SignIn);
        assert_eq!(Access::for_session(Some(&profile)), Access::ProfileSetup);

        profile.full_name = "  ".into();
        assert_eq!(Access::for_session(Some(&profile)), Access::ProfileSetup);

        profile.full_name = "Asha Rao".into();
        assert_eq!(Access::for_session(Some(&profile)), Access::Granted);
    }
}
