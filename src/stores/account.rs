use chrono::Utc;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::models::{Account, AccountWithPreferences, CreateAccountRequest, Preferences, SavePreferencesRequest};
use crate::services::storage::{read_json, write_json, LocalStore, StorageError, StorageKey};
use crate::stores::lock;

/// Errors that can occur when creating or saving account data
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Invalid {0} data")]
    Invalid(&'static str),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Account and preferences records
///
/// The two records live under separate keys but are cleared together:
/// a corrupt value in either one removes both.
pub struct AccountStore {
    store: Arc<dyn LocalStore>,
    // Serializes read-validate-clear sequences against writes
    guard: Mutex<()>,
}

impl AccountStore {
    pub fn new(store: Arc<dyn LocalStore>) -> Self {
        Self {
            store,
            guard: Mutex::new(()),
        }
    }

    /// Stored account, or `None` when missing or corrupt
    pub fn get_account(&self) -> Option<Account> {
        let _guard = lock(&self.guard);
        self.read_validated(StorageKey::ACCOUNT, Account::is_valid, "account")
    }

    pub fn get_preferences(&self) -> Option<Preferences> {
        let _guard = lock(&self.guard);
        self.read_validated(StorageKey::PREFERENCES, Preferences::is_valid, "preferences")
    }

    pub fn has_account(&self) -> bool {
        self.get_account().is_some()
    }

    /// Preferences are read first: corrupt preferences clear the account
    /// too, and the account read must observe that.
    pub fn get_with_preferences(&self) -> Option<AccountWithPreferences> {
        let _guard = lock(&self.guard);
        let preferences =
            self.read_validated(StorageKey::PREFERENCES, Preferences::is_valid, "preferences");
        let account = self.read_validated(StorageKey::ACCOUNT, Account::is_valid, "account")?;
        Some(AccountWithPreferences {
            account,
            preferences,
        })
    }

    fn read_validated<T>(&self, key: &str, is_valid: fn(&T) -> bool, label: &str) -> Option<T>
    where
        T: serde::de::DeserializeOwned,
    {
        match read_json::<T>(self.store.as_ref(), key) {
            Ok(Some(value)) if is_valid(&value) => Some(value),
            Ok(Some(_)) => {
                tracing::warn!("Invalid {} data found, clearing account", label);
                self.clear_locked();
                None
            }
            Ok(None) => None,
            Err(e) => {
                tracing::error!("Error parsing {} data: {}", label, e);
                self.clear_locked();
                None
            }
        }
    }

    /// Validate the form, stamp id and creation time, and save
    pub fn create(&self, request: CreateAccountRequest) -> Result<Account, AccountError> {
        request.validate()?;

        let account = Account::new(&request.business_name, request.email.as_deref(), Utc::now());
        self.save_account(&account)?;

        tracing::info!("Account created: {}", account.id);
        Ok(account)
    }

    pub fn save_account(&self, account: &Account) -> Result<(), AccountError> {
        if !account.is_valid() {
            return Err(AccountError::Invalid("account"));
        }
        let _guard = lock(&self.guard);
        write_json(self.store.as_ref(), StorageKey::ACCOUNT, account)?;
        Ok(())
    }

    pub fn save_preferences(&self, request: SavePreferencesRequest) -> Result<Preferences, AccountError> {
        request.validate()?;

        let preferences = request.into_preferences(Utc::now());
        if !preferences.is_valid() {
            return Err(AccountError::Invalid("preferences"));
        }

        let _guard = lock(&self.guard);
        write_json(self.store.as_ref(), StorageKey::PREFERENCES, &preferences)?;
        Ok(preferences)
    }

    /// Remove both account and preferences
    pub fn clear(&self) {
        let _guard = lock(&self.guard);
        self.clear_locked();
    }

    // Removal failures are logged, never raised
    fn clear_locked(&self) {
        for key in [StorageKey::ACCOUNT, StorageKey::PREFERENCES] {
            if let Err(e) = self.store.remove(key) {
                tracing::error!("Error clearing {}: {}", key, e);
            }
        }
    }
}
