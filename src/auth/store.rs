//! Credential store
//!
//! Owns the in-memory username -> stored-credential mapping for one table.
//! The mapping is loaded wholesale at construction and flushed back to the
//! table after every mutation. All policy logic lives here and in the
//! credential module; the persistence layer only moves strings.

use log::{info, warn};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::auth::credential::StoredCredential;
use crate::auth::policy::Policy;
use crate::config::ManagerConfig;
use crate::error::{AuthError, ManagerError};
use crate::storage::table;

/// Performs basic input sanitation to check for malformed usernames/passwords.
fn is_valid_input(input: &str, max_length: usize) -> bool {
    !input.trim().is_empty()
        && input.len() <= max_length
        && !input.contains([',', '\r', '\n', '\0'])
}

/// A credential store bound to one table location and one fixed policy.
///
/// Single-threaded and synchronous: every operation runs to completion,
/// including the table rewrite, before returning. Concurrent access to the
/// same table from several stores is a race with last-writer-wins outcome.
pub struct CredentialStore {
    policy: Policy,
    db_loc: PathBuf,
    records: HashMap<String, StoredCredential>,
    max_username_length: usize,
    max_password_length: usize,
}

impl CredentialStore {
    /// Open a store over an existing credential table.
    ///
    /// Fails if the table is missing or unreadable rather than starting
    /// empty. Records are parsed into structured credentials up front, so a
    /// table written under an incompatible salting setting is rejected here
    /// when the delimiter is absent.
    pub fn open(
        db_loc: impl Into<PathBuf>,
        policy: Policy,
        config: &ManagerConfig,
    ) -> Result<Self, ManagerError> {
        let db_loc = db_loc.into();
        let raw = table::load(&db_loc)?;

        let mut records = HashMap::with_capacity(raw.len());
        for (username, value) in raw {
            let credential = StoredCredential::from_table_value(policy, &username, &value)?;
            records.insert(username, credential);
        }

        info!(
            "Loaded {} credentials from {} ({} policy)",
            records.len(),
            db_loc.display(),
            policy
        );

        Ok(Self {
            policy,
            db_loc,
            records,
            max_username_length: config.max_username_length,
            max_password_length: config.max_password_length,
        })
    }

    /// Open a store from the two raw configuration flags
    pub fn open_with_flags(
        db_loc: impl Into<PathBuf>,
        hashed: bool,
        salted: bool,
        config: &ManagerConfig,
    ) -> Result<Self, ManagerError> {
        Self::open(db_loc, Policy::from_flags(hashed, salted), config)
    }

    /// Register a new user.
    ///
    /// Rejects duplicates without touching the mapping or the table.
    /// A successful insert rewrites the whole table before returning.
    pub fn register(&mut self, username: &str, password: &str) -> Result<(), ManagerError> {
        if !is_valid_input(username, self.max_username_length) {
            return Err(AuthError::MalformedInput("invalid username format".into()).into());
        }

        if !is_valid_input(password, self.max_password_length) {
            return Err(AuthError::MalformedInput("invalid password format".into()).into());
        }

        if self.records.contains_key(username) {
            warn!("Registration rejected, username already in use: {}", username);
            return Err(AuthError::UsernameTaken(username.to_string()).into());
        }

        let credential = StoredCredential::seal(self.policy, password);
        self.records.insert(username.to_string(), credential);
        self.persist()?;

        info!("Registered user {} under {} policy", username, self.policy);
        Ok(())
    }

    /// Verify a login attempt.
    ///
    /// An unknown username is a distinct `UsernameNotFound` error, not a
    /// plain `false`; callers that only need a boolean collapse the two.
    /// Never mutates state or writes to the table.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<bool, ManagerError> {
        match self.records.get(username) {
            Some(credential) => Ok(credential.matches(self.policy, password)),
            None => Err(AuthError::UsernameNotFound(username.to_string()).into()),
        }
    }

    /// Reset the mapping to empty and persist immediately.
    ///
    /// Destructive administrative action intended for test and setup use;
    /// not confirmation-guarded.
    pub fn clear(&mut self) -> Result<(), ManagerError> {
        self.records.clear();
        self.persist()?;
        warn!("Cleared credential table at {}", self.db_loc.display());
        Ok(())
    }

    /// The fixed policy this store was opened with
    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// Number of registered users
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether a username is registered
    pub fn contains(&self, username: &str) -> bool {
        self.records.contains_key(username)
    }

    // Full rewrite of the backing table, no incremental append.
    fn persist(&self) -> Result<(), ManagerError> {
        let mut rows = HashMap::with_capacity(self.records.len());
        for (username, credential) in &self.records {
            rows.insert(username.clone(), credential.to_table_value());
        }
        table::save(&self.db_loc, &rows)?;
        Ok(())
    }
}
