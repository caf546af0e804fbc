//! The identity registry: register-once profiles and role guards.

use std::collections::HashMap;

use opentutor_types::{AccountId, OpentutorError, Result, Role, UserProfile};

/// Holds every registered profile, keyed by account.
pub struct IdentityRegistry {
    profiles: HashMap<AccountId, UserProfile>,
}

impl IdentityRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            profiles: HashMap::new(),
        }
    }

    /// Register a profile for `caller`. Happens at most once per account;
    /// the chosen role is immutable afterwards.
    ///
    /// Registering with [`Role::None`] is allowed — such an account exists
    /// but fails every role gate.
    ///
    /// # Errors
    /// Returns `AlreadyRegistered` if the caller already holds a profile.
    pub fn register_user(
        &mut self,
        caller: AccountId,
        display_name: impl Into<String>,
        role: Role,
    ) -> Result<()> {
        if self.profiles.contains_key(&caller) {
            return Err(OpentutorError::AlreadyRegistered(caller));
        }

        let profile = UserProfile {
            account: caller,
            display_name: display_name.into(),
            role,
            registered: true,
        };
        tracing::info!(account = %caller, %role, name = %profile.display_name, "user registered");
        self.profiles.insert(caller, profile);
        Ok(())
    }

    /// Read-only copy of an account's profile. Unregistered accounts get
    /// the default empty profile, so callers can probe registration status
    /// without an error path.
    #[must_use]
    pub fn profile(&self, account: AccountId) -> UserProfile {
        self.profiles
            .get(&account)
            .cloned()
            .unwrap_or_else(|| UserProfile::unregistered(account))
    }

    /// Whether the account has registered.
    #[must_use]
    pub fn is_registered(&self, account: AccountId) -> bool {
        self.profiles.contains_key(&account)
    }

    /// Guard: the account must be registered (any role).
    ///
    /// # Errors
    /// Returns `NotRegistered` otherwise.
    pub fn require_registered(&self, account: AccountId) -> Result<()> {
        if self.is_registered(account) {
            Ok(())
        } else {
            Err(OpentutorError::NotRegistered(account))
        }
    }

    /// Guard: the account must be a registered Student.
    ///
    /// # Errors
    /// Returns `NotRegistered` or `WrongRole`.
    pub fn require_student(&self, account: AccountId) -> Result<()> {
        self.require_role(account, Role::Student)
    }

    /// Guard: the account must be a registered Instructor.
    ///
    /// # Errors
    /// Returns `NotRegistered` or `WrongRole`.
    pub fn require_instructor(&self, account: AccountId) -> Result<()> {
        self.require_role(account, Role::Instructor)
    }

    fn require_role(&self, account: AccountId, required: Role) -> Result<()> {
        let profile = self
            .profiles
            .get(&account)
            .ok_or(OpentutorError::NotRegistered(account))?;
        if profile.role == required {
            Ok(())
        } else {
            Err(OpentutorError::WrongRole {
                required,
                actual: profile.role,
            })
        }
    }

    /// Number of registered profiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Whether no profile has been registered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl Default for IdentityRegistry {
    fn default() -> Self {
        Self::new()
    }
}
