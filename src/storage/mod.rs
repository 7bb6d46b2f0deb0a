//! Persistence layer
//!
//! Handles reading and writing the CSV credential tables.

pub mod table;

pub use table::{create_empty, load, save};
