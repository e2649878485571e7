//! # Student Portal Database Crate
//!
//! This crate is the record store of the portal: it persists student records
//! and hands them back to the API service.
//!
//! ## Architectural Principles
//!
//! - **Passthrough Store:** The store enforces exactly one rule (a created record
//!   carries all four fields). Everything else is the caller's concern.
//! - **Swappable Backends:** Handlers only see the `StudentStore` trait. The
//!   PostgreSQL backend keeps one JSONB document per student; the in-memory
//!   backend serves development and tests.
//!
//! ## Public API
//!
//! - `open_store`: Builds the configured backend, running migrations for PostgreSQL.
//! - `StudentStore`: The create/read/update/delete interface.
//! - `DbRepository` / `MemoryRepository`: The two backends.
//! - `DbError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod memory;
pub mod repository;

use configuration::{DatabaseConfig, StoreBackend};
use std::sync::Arc;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, run_migrations};
pub use error::DbError;
pub use memory::MemoryRepository;
pub use repository::{DbRepository, StudentStore};

/// Opens the store selected by `config.backend`.
pub async fn open_store(config: &DatabaseConfig) -> Result<Arc<dyn StudentStore>, DbError> {
    match config.backend {
        StoreBackend::Postgres => {
            let pool = connect(config).await?;
            run_migrations(&pool).await?;
            tracing::info!("Connected to PostgreSQL and applied migrations.");
            Ok(Arc::new(DbRepository::new(pool)))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using the in-memory store; records will not survive a restart.");
            Ok(Arc::new(MemoryRepository::new()))
        }
    }
}
