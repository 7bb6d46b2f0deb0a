//! Error types
//!
//! Defines domain-specific error types for each module of the auth manager.

use std::fmt;
use std::io;

/// Authentication module errors
#[derive(Debug)]
pub enum AuthError {
    UsernameTaken(String),
    UsernameNotFound(String),
    MalformedInput(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::UsernameTaken(u) => write!(f, "Username already in use: {}", u),
            AuthError::UsernameNotFound(u) => write!(f, "Username not found: {}", u),
            AuthError::MalformedInput(s) => write!(f, "Malformed input: {}", s),
        }
    }
}

impl std::error::Error for AuthError {}

/// Storage module errors
#[derive(Debug)]
pub enum StorageError {
    TableNotFound(String),
    MalformedTable(String),
    MalformedRecord(String),
    CsvError(csv::Error),
    IoError(io::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::TableNotFound(p) => write!(f, "Credential table not found: {}", p),
            StorageError::MalformedTable(msg) => write!(f, "Malformed credential table: {}", msg),
            StorageError::MalformedRecord(u) => {
                write!(f, "Malformed credential record for user: {}", u)
            }
            StorageError::CsvError(e) => write!(f, "CSV error: {}", e),
            StorageError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<csv::Error> for StorageError {
    fn from(error: csv::Error) -> Self {
        StorageError::CsvError(error)
    }
}

impl From<io::Error> for StorageError {
    fn from(error: io::Error) -> Self {
        StorageError::IoError(error)
    }
}

/// General auth manager error that encompasses all error types
#[derive(Debug)]
pub enum ManagerError {
    Auth(AuthError),
    Storage(StorageError),
}

impl fmt::Display for ManagerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManagerError::Auth(e) => write!(f, "Authentication error: {}", e),
            ManagerError::Storage(e) => write!(f, "Storage error: {}", e),
        }
    }
}

impl std::error::Error for ManagerError {}

// Implement conversions from specific errors to ManagerError
impl From<AuthError> for ManagerError {
    fn from(error: AuthError) -> Self {
        ManagerError::Auth(error)
    }
}

impl From<StorageError> for ManagerError {
    fn from(error: StorageError) -> Self {
        ManagerError::Storage(error)
    }
}
