pub mod auth;
pub mod config;
pub mod error;
pub mod storage;

pub use auth::{CredentialStore, Policy};
pub use crate::config::ManagerConfig;
