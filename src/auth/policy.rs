//! Protection policies
//!
//! A policy is the combination of hashing/salting flags governing how a
//! password is transformed before storage and comparison. It is chosen when a
//! store is constructed and fixed for the lifetime of that store.

use std::fmt;

/// Credential protection policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Raw password stored as-is
    Plain,
    /// One-way digest of the password
    Hashed,
    /// Per-user salt stored alongside the raw password (permitted but unusual)
    SaltedUnhashed,
    /// Per-user salt mixed into the password before hashing
    SaltedHashed,
}

impl Policy {
    /// Build a policy from the two independent configuration flags
    pub fn from_flags(hashed: bool, salted: bool) -> Self {
        match (hashed, salted) {
            (false, false) => Policy::Plain,
            (true, false) => Policy::Hashed,
            (false, true) => Policy::SaltedUnhashed,
            (true, true) => Policy::SaltedHashed,
        }
    }

    /// Whether passwords are run through the one-way digest
    pub fn hashed(&self) -> bool {
        matches!(self, Policy::Hashed | Policy::SaltedHashed)
    }

    /// Whether a per-user salt is generated and stored
    pub fn salted(&self) -> bool {
        matches!(self, Policy::SaltedUnhashed | Policy::SaltedHashed)
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::Plain => write!(f, "plain"),
            Policy::Hashed => write!(f, "hashed"),
            Policy::SaltedUnhashed => write!(f, "salted"),
            Policy::SaltedHashed => write!(f, "salted and hashed"),
        }
    }
}
