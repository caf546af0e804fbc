//! Per-account balance tracking and custody accounting.
//!
//! All mutations are atomic: either the full movement commits or the vault
//! is unchanged. The custody pool is a single anonymous-looking bucket at
//! this layer, but the escrow attributes every custodied unit to a specific
//! offer, so `Vault::custodied()` must always equal the sum of amounts for
//! offers still awaiting completion or cancellation.

use std::collections::HashMap;

use opentutor_types::{AccountId, OpentutorError, Result};
use rust_decimal::Decimal;

/// Holds every account's available balance plus the escrow custody pool.
pub struct Vault {
    /// Available balance per account.
    accounts: HashMap<AccountId, Decimal>,
    /// Funds debited from accounts and held under escrow custody.
    custodied: Decimal,
}

impl Vault {
    /// Create an empty vault.
    #[must_use]
    pub fn new() -> Self {
        Self {
            accounts: HashMap::new(),
            custodied: Decimal::ZERO,
        }
    }

    /// Deposit funds into an account (increases available balance).
    pub fn deposit(&mut self, account: AccountId, amount: Decimal) {
        *self.accounts.entry(account).or_default() += amount;
    }

    /// Available balance for an account. Unknown accounts hold zero.
    #[must_use]
    pub fn balance(&self, account: AccountId) -> Decimal {
        self.accounts.get(&account).copied().unwrap_or_default()
    }

    /// Move funds directly between two accounts (course purchase payout).
    ///
    /// # Errors
    /// Returns `InsufficientBalance` if `from` holds less than `amount`;
    /// neither balance changes in that case.
    pub fn transfer(&mut self, from: AccountId, to: AccountId, amount: Decimal) -> Result<()> {
        self.debit(from, amount)?;
        *self.accounts.entry(to).or_default() += amount;
        tracing::debug!(%from, %to, %amount, "vault transfer");
        Ok(())
    }

    /// Debit an account into the custody pool (session offer funding).
    ///
    /// # Errors
    /// Returns `InsufficientBalance` if `from` holds less than `amount`.
    pub fn custody(&mut self, from: AccountId, amount: Decimal) -> Result<()> {
        self.debit(from, amount)?;
        self.custodied += amount;
        tracing::debug!(%from, %amount, custodied = %self.custodied, "funds custodied");
        Ok(())
    }

    /// Pay out of the custody pool to an account (release or refund).
    ///
    /// # Errors
    /// Returns `InsufficientCustody` if the pool holds less than `amount` —
    /// an accounting bug in the caller, never a user-facing condition.
    pub fn release(&mut self, to: AccountId, amount: Decimal) -> Result<()> {
        if self.custodied < amount {
            return Err(OpentutorError::InsufficientCustody);
        }
        self.custodied -= amount;
        *self.accounts.entry(to).or_default() += amount;
        tracing::debug!(%to, %amount, custodied = %self.custodied, "custody released");
        Ok(())
    }

    /// Funds currently held under escrow custody.
    #[must_use]
    pub fn custodied(&self) -> Decimal {
        self.custodied
    }

    /// Total supply across all accounts plus custody. Conserved by every
    /// operation except `deposit`.
    #[must_use]
    pub fn total_supply(&self) -> Decimal {
        self.accounts.values().copied().sum::<Decimal>() + self.custodied
    }

    fn debit(&mut self, from: AccountId, amount: Decimal) -> Result<()> {
        let available = self.accounts.get_mut(&from).ok_or(
            OpentutorError::InsufficientBalance {
                needed: amount,
                available: Decimal::ZERO,
            },
        )?;

        if *available < amount {
            return Err(OpentutorError::InsufficientBalance {
                needed: amount,
                available: *available,
            });
        }

        *available -= amount;
        Ok(())
    }
}

impl Default for Vault {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deposit_increases_available() {
        let mut vault = Vault::new();
        let user = AccountId::new();
        vault.deposit(user, Decimal::new(1000, 0));
        assert_eq!(vault.balance(user), Decimal::new(1000, 0));
        assert_eq!(vault.custodied(), Decimal::ZERO);
    }

    #[test]
    fn transfer_moves_between_accounts() {
        let mut vault = Vault::new();
        let a = AccountId::new();
        let b = AccountId::new();
        vault.deposit(a, Decimal::new(100, 0));
        vault.transfer(a, b, Decimal::new(40, 0)).unwrap();
        assert_eq!(vault.balance(a), Decimal::new(60, 0));
        assert_eq!(vault.balance(b), Decimal::new(40, 0));
    }

    #[test]
    fn transfer_insufficient_fails_unchanged() {
        let mut vault = Vault::new();
        let a = AccountId::new();
        let b = AccountId::new();
        vault.deposit(a, Decimal::new(10, 0));
        let err = vault.transfer(a, b, Decimal::new(20, 0)).unwrap_err();
        assert!(matches!(err, OpentutorError::InsufficientBalance { .. }));
        assert_eq!(vault.balance(a), Decimal::new(10, 0));
        assert_eq!(vault.balance(b), Decimal::ZERO);
    }

    #[test]
    fn transfer_from_unknown_account_fails() {
        let mut vault = Vault::new();
        let err = vault
            .transfer(AccountId::new(), AccountId::new(), Decimal::ONE)
            .unwrap_err();
        assert!(
            matches!(err, OpentutorError::InsufficientBalance { available, .. } if available == Decimal::ZERO)
        );
    }

    #[test]
    fn custody_then_release() {
        let mut vault = Vault::new();
        let student = AccountId::new();
        let instructor = AccountId::new();
        vault.deposit(student, Decimal::new(100, 0));

        vault.custody(student, Decimal::new(30, 0)).unwrap();
        assert_eq!(vault.balance(student), Decimal::new(70, 0));
        assert_eq!(vault.custodied(), Decimal::new(30, 0));

        vault.release(instructor, Decimal::new(30, 0)).unwrap();
        assert_eq!(vault.balance(instructor), Decimal::new(30, 0));
        assert_eq!(vault.custodied(), Decimal::ZERO);
    }

    #[test]
    fn release_beyond_custody_fails() {
        let mut vault = Vault::new();
        let err = vault.release(AccountId::new(), Decimal::ONE).unwrap_err();
        assert!(matches!(err, OpentutorError::InsufficientCustody));
    }

    #[test]
    fn supply_conserved_across_movements() {
        let mut vault = Vault::new();
        let a = AccountId::new();
        let b = AccountId::new();
        vault.deposit(a, Decimal::new(500, 0));
        vault.deposit(b, Decimal::new(250, 0));
        let supply = vault.total_supply();

        vault.transfer(a, b, Decimal::new(100, 0)).unwrap();
        assert_eq!(vault.total_supply(), supply);

        vault.custody(b, Decimal::new(200, 0)).unwrap();
        assert_eq!(vault.total_supply(), supply);

        vault.release(a, Decimal::new(200, 0)).unwrap();
        assert_eq!(vault.total_supply(), supply);
    }

    #[test]
    fn failed_custody_leaves_supply_unchanged() {
        let mut vault = Vault::new();
        let a = AccountId::new();
        vault.deposit(a, Decimal::new(5, 0));
        let supply = vault.total_supply();
        assert!(vault.custody(a, Decimal::new(10, 0)).is_err());
        assert_eq!(vault.total_supply(), supply);
        assert_eq!(vault.custodied(), Decimal::ZERO);
    }
}
