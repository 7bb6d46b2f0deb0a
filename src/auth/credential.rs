//! Stored credentials
//!
//! Implements the one-way transform pipeline: per-user salt generation, the
//! SHA-256 digest, and the structured stored-credential value. The salt and
//! credential body are kept as separate fields in memory and joined into the
//! `salt:body` table string only at the persistence boundary.

use rand::Rng;
use sha2::{Digest, Sha256};

use crate::auth::policy::Policy;
use crate::error::StorageError;

const SALT_LENGTH: usize = 7;
const SALT_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Generate a fresh per-user salt.
///
/// Uses the thread-local CSPRNG; salts are never checked for uniqueness
/// across users.
pub(crate) fn generate_salt() -> String {
    let mut rng = rand::thread_rng();
    (0..SALT_LENGTH)
        .map(|_| SALT_ALPHABET[rng.gen_range(0..SALT_ALPHABET.len())] as char)
        .collect()
}

/// Hex-encoded SHA-256 digest of the input string.
pub(crate) fn digest(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// The value stored for one user: an optional salt plus the credential body.
///
/// The body is the raw password under unhashed policies and the digest of the
/// (optionally salted) password under hashed policies. The salt never feeds
/// the comparison directly; it only feeds the digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredential {
    salt: Option<String>,
    body: String,
}

impl StoredCredential {
    /// Transform a raw password into its stored form under the given policy.
    ///
    /// A fresh salt is generated here when the policy calls for one; it is
    /// never regenerated afterwards.
    pub fn seal(policy: Policy, password: &str) -> Self {
        let salt = policy.salted().then(generate_salt);

        let body = if policy.hashed() {
            match &salt {
                Some(salt) => digest(&format!("{salt}:{password}")),
                None => digest(password),
            }
        } else {
            password.to_string()
        };

        Self { salt, body }
    }

    /// Check a login attempt against this credential.
    ///
    /// Rebuilds the candidate through the same pipeline as `seal`, reusing
    /// the stored salt, then compares with plain string equality. The
    /// comparison is not constant-time.
    pub fn matches(&self, policy: Policy, password: &str) -> bool {
        let candidate = if policy.hashed() {
            match &self.salt {
                Some(salt) => digest(&format!("{salt}:{password}")),
                None => digest(password),
            }
        } else {
            password.to_string()
        };

        candidate == self.body
    }

    /// The stored salt, if the policy carries one
    pub fn salt(&self) -> Option<&str> {
        self.salt.as_deref()
    }

    /// Serialize to the single-string form persisted in the table
    pub fn to_table_value(&self) -> String {
        match &self.salt {
            Some(salt) => format!("{}:{}", salt, self.body),
            None => self.body.clone(),
        }
    }

    /// Parse a persisted table value back into its structured form.
    ///
    /// Salted policies require a `salt:body` value; a record without the
    /// delimiter was written under a different policy and is rejected.
    pub fn from_table_value(
        policy: Policy,
        username: &str,
        value: &str,
    ) -> Result<Self, StorageError> {
        if policy.salted() {
            match value.split_once(':') {
                Some((salt, body)) => Ok(Self {
                    salt: Some(salt.to_string()),
                    body: body.to_string(),
                }),
                None => Err(StorageError::MalformedRecord(username.to_string())),
            }
        } else {
            Ok(Self {
                salt: None,
                body: value.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_salt_length_and_alphabet() {
        for _ in 0..20 {
            let salt = generate_salt();
            assert_eq!(salt.len(), SALT_LENGTH);
            assert!(salt.bytes().all(|b| SALT_ALPHABET.contains(&b)));
        }
    }

    #[test]
    fn test_digest_is_deterministic_hex_sha256() {
        assert_eq!(digest("pass"), digest("pass"));
        assert_ne!(digest("pass"), digest("word"));
        // SHA-256 hex output is 64 characters
        let d = digest("pass");
        assert_eq!(d.len(), 64);
        assert!(d.bytes().all(|b| b.is_ascii_hexdigit()));
    }

    #[test]
    fn test_seal_shapes_per_policy() {
        let plain = StoredCredential::seal(Policy::Plain, "pass");
        assert_eq!(plain.to_table_value(), "pass");

        let hashed = StoredCredential::seal(Policy::Hashed, "pass");
        assert_eq!(hashed.to_table_value(), digest("pass"));

        let salted = StoredCredential::seal(Policy::SaltedUnhashed, "pass");
        let salt = salted.salt().unwrap().to_string();
        assert_eq!(salted.to_table_value(), format!("{salt}:pass"));

        let salted_hashed = StoredCredential::seal(Policy::SaltedHashed, "pass");
        let salt = salted_hashed.salt().unwrap().to_string();
        assert_eq!(
            salted_hashed.to_table_value(),
            format!("{}:{}", salt, digest(&format!("{salt}:pass")))
        );
    }

    #[test]
    fn test_matches_right_and_wrong_password() {
        for policy in [
            Policy::Plain,
            Policy::Hashed,
            Policy::SaltedUnhashed,
            Policy::SaltedHashed,
        ] {
            let credential = StoredCredential::seal(policy, "pass");
            assert!(credential.matches(policy, "pass"), "policy {policy}");
            assert!(!credential.matches(policy, "word"), "policy {policy}");
        }
    }

    #[test]
    fn test_table_value_round_trip() {
        for policy in [Policy::Plain, Policy::SaltedHashed] {
            let credential = StoredCredential::seal(policy, "pass");
            let parsed =
                StoredCredential::from_table_value(policy, "mike", &credential.to_table_value())
                    .unwrap();
            assert_eq!(parsed, credential);
        }
    }

    #[test]
    fn test_salted_record_without_delimiter_rejected() {
        let result = StoredCredential::from_table_value(Policy::SaltedHashed, "mike", "nodelim");
        assert!(matches!(result, Err(StorageError::MalformedRecord(u)) if u == "mike"));
    }
}
