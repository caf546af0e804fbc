//! User identity model: roles and profiles.
//!
//! A profile is written exactly once at registration and never updated or
//! deleted — the role an account chooses is immutable for its lifetime.
//! Unregistered accounts read back as the default (empty) profile so callers
//! can probe registration status without an error path.

use serde::{Deserialize, Serialize};

use crate::AccountId;

/// The role an account declared at registration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// No marketplace role. Such accounts fail every role gate.
    #[default]
    None,
    /// Can buy courses, book sessions, and submit reviews.
    Student,
    /// Can create courses and accept session offers.
    Instructor,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "NONE"),
            Self::Student => write!(f, "STUDENT"),
            Self::Instructor => write!(f, "INSTRUCTOR"),
        }
    }
}

/// A role-tagged user profile, created on first registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// The account this profile belongs to.
    pub account: AccountId,
    /// Display name chosen at registration. Pure data, no invariants.
    pub display_name: String,
    /// The role chosen at registration. Immutable.
    pub role: Role,
    /// Set exactly once, at registration. A default profile has it unset.
    pub registered: bool,
}

impl UserProfile {
    /// The empty profile returned for accounts that never registered.
    #[must_use]
    pub fn unregistered(account: AccountId) -> Self {
        Self {
            account,
            display_name: String::new(),
            role: Role::None,
            registered: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_display() {
        assert_eq!(Role::None.to_string(), "NONE");
        assert_eq!(Role::Student.to_string(), "STUDENT");
        assert_eq!(Role::Instructor.to_string(), "INSTRUCTOR");
    }

    #[test]
    fn unregistered_profile_is_empty() {
        let account = AccountId::new();
        let profile = UserProfile::unregistered(account);
        assert_eq!(profile.account, account);
        assert!(profile.display_name.is_empty());
        assert_eq!(profile.role, Role::None);
        assert!(!profile.registered);
    }

    #[test]
    fn profile_serde_roundtrip() {
        let profile = UserProfile {
            account: AccountId::new(),
            display_name: "Ada".into(),
            role: Role::Instructor,
            registered: true,
        };
        let json = serde_json::to_string(&profile).unwrap();
        let back: UserProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(profile, back);
    }
}
