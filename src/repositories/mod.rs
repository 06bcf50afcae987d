use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::info;

mod memory;
mod postgres;

pub use memory::InMemoryMappingRepository;
pub use postgres::MappingRepository;

use crate::config::{Config, StorageBackend};
use crate::db::{Database, DbResult};
use crate::errors::RepositoryError;
use crate::models::Mapping;

pub type Result<T> = std::result::Result<T, RepositoryError>;

/// Key-value persistence for mappings, keyed by shortcode.
///
/// Every method is atomic for its single key; nothing spans several keys.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingRepositoryTrait: Send + Sync {
    /// Checks whether a mapping with this shortcode exists
    async fn exists(&self, code: &str) -> Result<bool>;

    /// Finds a mapping by its shortcode without touching its statistics
    ///
    /// ### Returns
    /// * `Result<Option<Mapping>>` - The mapping if found, or `None` if not found
    async fn find_by_code(&self, code: &str) -> Result<Option<Mapping>>;

    /// Inserts a new mapping
    ///
    /// ### Errors
    /// * `RepositoryError::Conflict` - If the shortcode is already taken
    /// * `RepositoryError::Database` - If a database error occurs
    async fn insert(&self, mapping: &Mapping) -> Result<Mapping>;

    /// Replaces the target URL, leaving every other field alone
    ///
    /// ### Returns
    /// * `Result<Option<Mapping>>` - The updated mapping, or `None` if the shortcode is unknown
    async fn update_original_url(&self, code: &str, original_url: &str) -> Result<Option<Mapping>>;

    /// Counts one access: bumps `access_count` by one and moves `last_accessed_at`
    /// forward to `at`, as a single atomic step
    ///
    /// ### Returns
    /// * `Result<Option<Mapping>>` - The updated mapping, or `None` without any write
    async fn record_access(&self, code: &str, at: DateTime<Utc>) -> Result<Option<Mapping>>;

    /// Deletes a mapping, a no-op for unknown shortcodes
    ///
    /// ### Returns
    /// * `Result<bool>` - Whether a mapping was removed
    async fn delete(&self, code: &str) -> Result<bool>;
}

/// Builds the configured storage backend. The database handle is only present for Postgres.
pub async fn connect(
    config: &Config,
) -> DbResult<(Arc<dyn MappingRepositoryTrait>, Option<Database>)> {
    match config.storage {
        StorageBackend::Postgres => {
            let db = Database::connect(&config.db).await?;
            let repository = MappingRepository::new(db.clone());
            info!("Using postgres storage backend");
            Ok((Arc::new(repository), Some(db)))
        }
        StorageBackend::Memory => {
            info!("Using in-memory storage backend, mappings are lost on restart");
            Ok((Arc::new(InMemoryMappingRepository::new()), None))
        }
    }
}
