//! pagekit store - persistence collaborator for the page kernel
//!
//! Provides:
//! - The `PageRepository` trait the engine is written against
//! - An in-memory repository for tests and embedding
//! - A SQLite repository with an embedded, checksummed migration runner

pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;

// Re-export key types
pub use errors::Result;
pub use repo::{InMemoryRepository, PageRepository, SqliteRepository};
