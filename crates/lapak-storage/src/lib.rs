//! # lapak-storage
//!
//! SQLite persistence layer for the lapak marketplace backend.
//! Implements the `ICatalogStorage` and `IOrderStorage` traits.
//! Single write connection + read connection (WAL mode).

pub mod connection;
pub mod engine;
pub mod migrations;
pub mod queries;

pub use engine::StorageEngine;

use lapak_core::errors::StorageError;
use lapak_core::LapakError;

/// Helper to convert a string message into a `LapakError::Storage`.
pub fn to_storage_err(msg: String) -> LapakError {
    LapakError::Storage(StorageError::Sqlite { message: msg })
}
