//! Authentication system
//!
//! Handles credential storage, protection policies, and login verification.

pub mod credential;
pub mod policy;
pub mod store;

pub use credential::StoredCredential;
pub use policy::Policy;
pub use store::CredentialStore;
