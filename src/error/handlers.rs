//! Error handlers
//!
//! Provides error handling and reporting functions.

use crate::error::types::ManagerError;
use log::error;

/// Handle an auth manager error
pub fn handle_error(err: &ManagerError) {
    error!("Auth Manager Error: {}", err);
}

/// Convert error to process exit code
pub fn error_to_exit_code(err: &ManagerError) -> i32 {
    match err {
        ManagerError::Auth(_) => 1,
        ManagerError::Storage(_) => 2,
    }
}
