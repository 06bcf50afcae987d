// src/services/mapping.rs - Business logic
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info, warn};

use crate::errors::{RepositoryError, ServiceError};
use crate::models::Mapping;
use crate::repositories::MappingRepositoryTrait;
use crate::utils::shortcode::ShortcodeGenerator;

type Result<T> = std::result::Result<T, ServiceError>;

/// Lifecycle of shortcode mappings. `Ok(None)` means the shortcode is unknown.
#[async_trait]
pub trait MappingServiceTrait {
    /// Stores `original_url` under `shortcode`, or under a generated code when
    /// `shortcode` is `None` or empty
    async fn create(&self, original_url: String, shortcode: Option<String>) -> Result<Mapping>;

    /// Resolves a shortcode and counts the access
    async fn retrieve(&self, shortcode: &str) -> Result<Option<Mapping>>;

    /// Points an existing shortcode at a new URL
    async fn update(&self, shortcode: &str, original_url: String) -> Result<Option<Mapping>>;

    /// Removes a mapping, `false` when there was nothing to remove
    async fn delete(&self, shortcode: &str) -> Result<bool>;
}

pub struct MappingService<T: ?Sized> {
    repository: Arc<T>,
    generator: Arc<dyn ShortcodeGenerator>,
    max_attempts: usize,
}

impl<T: MappingRepositoryTrait + ?Sized> MappingService<T> {
    pub fn new(
        repository: Arc<T>,
        generator: Arc<dyn ShortcodeGenerator>,
        max_attempts: usize,
    ) -> Self {
        Self {
            repository,
            generator,
            max_attempts,
        }
    }

    async fn create_with_code(&self, mapping: Mapping) -> Result<Mapping> {
        if self.repository.exists(&mapping.shortcode).await? {
            return Err(ServiceError::DuplicateShortcode(mapping.shortcode));
        }

        match self.repository.insert(&mapping).await {
            Ok(saved) => Ok(saved),
            // Taken between the existence check and the insert
            Err(RepositoryError::Conflict(_)) => {
                Err(ServiceError::DuplicateShortcode(mapping.shortcode))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn create_with_generated_code(&self, original_url: String) -> Result<Mapping> {
        for attempt in 1..=self.max_attempts {
            let code = self.generator.generate();

            if self.repository.exists(&code).await? {
                debug!("Generated shortcode '{}' is taken (attempt {})", code, attempt);
                continue;
            }

            let mapping = Mapping::new(code, original_url.clone(), Utc::now());
            match self.repository.insert(&mapping).await {
                Ok(saved) => return Ok(saved),
                Err(RepositoryError::Conflict(_)) => {
                    debug!(
                        "Generated shortcode '{}' was claimed concurrently (attempt {})",
                        mapping.shortcode, attempt
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }

        warn!(
            "Giving up on shortcode generation after {} attempts",
            self.max_attempts
        );
        Err(ServiceError::CodeSpaceExhausted(self.max_attempts))
    }
}

#[async_trait]
impl<T: MappingRepositoryTrait + ?Sized> MappingServiceTrait for MappingService<T> {
    async fn create(&self, original_url: String, shortcode: Option<String>) -> Result<Mapping> {
        let mapping = match shortcode {
            Some(code) if !code.is_empty() => {
                self.create_with_code(Mapping::new(code, original_url, Utc::now()))
                    .await?
            }
            _ => self.create_with_generated_code(original_url).await?,
        };

        info!(
            "Created mapping '{}' -> {}",
            mapping.shortcode, mapping.original_url
        );
        Ok(mapping)
    }

    async fn retrieve(&self, shortcode: &str) -> Result<Option<Mapping>> {
        let mapping = self.repository.record_access(shortcode, Utc::now()).await?;
        if mapping.is_none() {
            debug!("Shortcode '{}' not found", shortcode);
        }
        Ok(mapping)
    }

    async fn update(&self, shortcode: &str, original_url: String) -> Result<Option<Mapping>> {
        if self.repository.find_by_code(shortcode).await?.is_none() {
            debug!("Cannot update unknown shortcode '{}'", shortcode);
            return Ok(None);
        }

        let updated = self
            .repository
            .update_original_url(shortcode, &original_url)
            .await?;
        if updated.is_some() {
            info!("Updated mapping '{}' -> {}", shortcode, original_url);
        }
        Ok(updated)
    }

    async fn delete(&self, shortcode: &str) -> Result<bool> {
        if !self.repository.exists(shortcode).await? {
            return Ok(false);
        }

        let deleted = self.repository.delete(shortcode).await?;
        if deleted {
            info!("Deleted mapping '{}'", shortcode);
        }
        Ok(deleted)
    }
}
