// src/repositories/postgres.rs - Data access
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, error};
use sqlx::PgPool;

use super::{MappingRepositoryTrait, Result};
use crate::db::Database;
use crate::errors::RepositoryError;
use crate::models::Mapping;

const MAPPING_COLUMNS: &str = "shortcode, original_url, created_at, last_accessed_at, access_count";

pub struct MappingRepository {
    pool: PgPool,
}

impl MappingRepository {
    pub fn new(db: Database) -> Self {
        Self {
            pool: db.get_pool().clone(),
        }
    }
}

#[async_trait]
impl MappingRepositoryTrait for MappingRepository {
    async fn exists(&self, code: &str) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM url_mappings WHERE shortcode = $1)")
                .bind(code)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Mapping>> {
        let query = format!(
            "SELECT {} FROM url_mappings WHERE shortcode = $1",
            MAPPING_COLUMNS
        );

        sqlx::query_as::<_, Mapping>(&query)
            .bind(code)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepositoryError::Database)
    }

    async fn insert(&self, mapping: &Mapping) -> Result<Mapping> {
        // A plain INSERT so the primary key rejects a shortcode taken since the existence check
        let query = format!(
            r#"
            INSERT INTO url_mappings
            (shortcode, original_url, created_at, last_accessed_at, access_count)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            MAPPING_COLUMNS
        );

        sqlx::query_as::<_, Mapping>(&query)
            .bind(&mapping.shortcode)
            .bind(&mapping.original_url)
            .bind(mapping.created_at)
            .bind(mapping.last_accessed_at)
            .bind(mapping.access_count)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                let err = RepositoryError::from(e);
                if !matches!(err, RepositoryError::Conflict(_)) {
                    error!("Failed to insert mapping '{}': {}", mapping.shortcode, err);
                }
                err
            })
    }

    async fn update_original_url(&self, code: &str, original_url: &str) -> Result<Option<Mapping>> {
        debug!("Updating original URL of '{}'", code);

        let query = format!(
            "UPDATE url_mappings SET original_url = $2 WHERE shortcode = $1 RETURNING {}",
            MAPPING_COLUMNS
        );

        sqlx::query_as::<_, Mapping>(&query)
            .bind(code)
            .bind(original_url)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepositoryError::from)
    }

    async fn record_access(&self, code: &str, at: DateTime<Utc>) -> Result<Option<Mapping>> {
        let query = format!(
            r#"
            UPDATE url_mappings
            SET access_count = access_count + 1,
                last_accessed_at = GREATEST(COALESCE(last_accessed_at, created_at), $2)
            WHERE shortcode = $1
            RETURNING {}
            "#,
            MAPPING_COLUMNS
        );

        sqlx::query_as::<_, Mapping>(&query)
            .bind(code)
            .bind(at)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepositoryError::from)
    }

    async fn delete(&self, code: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM url_mappings WHERE shortcode = $1")
            .bind(code)
            .execute(&self.pool)
            .await
            .map_err(RepositoryError::Database)?;

        Ok(result.rows_affected() > 0)
    }
}
