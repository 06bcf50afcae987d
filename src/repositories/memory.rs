use std::collections::hash_map::Entry;
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::{MappingRepositoryTrait, Result};
use crate::errors::RepositoryError;
use crate::models::Mapping;

/// Process-local storage. Every operation runs under one lock acquisition.
#[derive(Default)]
pub struct InMemoryMappingRepository {
    mappings: RwLock<HashMap<String, Mapping>>,
}

impl InMemoryMappingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.mappings.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.mappings.read().await.is_empty()
    }
}

#[async_trait]
impl MappingRepositoryTrait for InMemoryMappingRepository {
    async fn exists(&self, code: &str) -> Result<bool> {
        Ok(self.mappings.read().await.contains_key(code))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Mapping>> {
        Ok(self.mappings.read().await.get(code).cloned())
    }

    async fn insert(&self, mapping: &Mapping) -> Result<Mapping> {
        match self.mappings.write().await.entry(mapping.shortcode.clone()) {
            Entry::Occupied(_) => Err(RepositoryError::Conflict(format!(
                "Shortcode '{}' already exists",
                mapping.shortcode
            ))),
            Entry::Vacant(slot) => Ok(slot.insert(mapping.clone()).clone()),
        }
    }

    async fn update_original_url(&self, code: &str, original_url: &str) -> Result<Option<Mapping>> {
        let mut mappings = self.mappings.write().await;
        Ok(mappings.get_mut(code).map(|mapping| {
            mapping.original_url = original_url.to_string();
            mapping.clone()
        }))
    }

    async fn record_access(&self, code: &str, at: DateTime<Utc>) -> Result<Option<Mapping>> {
        let mut mappings = self.mappings.write().await;
        Ok(mappings.get_mut(code).map(|mapping| {
            mapping.record_access(at);
            mapping.clone()
        }))
    }

    async fn delete(&self, code: &str) -> Result<bool> {
        Ok(self.mappings.write().await.remove(code).is_some())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Duration;

    use super::*;

    fn mapping(code: &str) -> Mapping {
        Mapping::new(code, "https://example.com/a", Utc::now())
    }

    #[tokio::test]
    async fn insert_rejects_taken_shortcode() {
        let repo = InMemoryMappingRepository::new();
        repo.insert(&mapping("abc123")).await.unwrap();

        let mut second = mapping("abc123");
        second.original_url = "https://example.com/other".to_string();
        let err = repo.insert(&second).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));

        let stored = repo.find_by_code("abc123").await.unwrap().unwrap();
        assert_eq!(stored.original_url, "https://example.com/a");
    }

    #[tokio::test]
    async fn record_access_on_missing_code_writes_nothing() {
        let repo = InMemoryMappingRepository::new();
        assert_eq!(repo.record_access("nope", Utc::now()).await.unwrap(), None);
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn update_touches_only_the_url() {
        let repo = InMemoryMappingRepository::new();
        let original = repo.insert(&mapping("abc123")).await.unwrap();
        repo.record_access("abc123", Utc::now() + Duration::seconds(1))
            .await
            .unwrap();

        let updated = repo
            .update_original_url("abc123", "https://example.com/b")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.original_url, "https://example.com/b");
        assert_eq!(updated.created_at, original.created_at);
        assert_eq!(updated.access_count, 1);
        assert!(updated.last_accessed_at.is_some());

        assert_eq!(repo.update_original_url("nope", "https://x.io").await.unwrap(), None);
    }

    #[tokio::test]
    async fn delete_reports_whether_anything_was_removed() {
        let repo = InMemoryMappingRepository::new();
        repo.insert(&mapping("abc123")).await.unwrap();

        assert!(repo.delete("abc123").await.unwrap());
        assert!(!repo.delete("abc123").await.unwrap());
        assert!(!repo.exists("abc123").await.unwrap());
    }

    #[tokio::test]
    async fn concurrent_accesses_are_all_counted() {
        let repo = Arc::new(InMemoryMappingRepository::new());
        repo.insert(&mapping("hot")).await.unwrap();

        let tasks: Vec<_> = (0..64)
            .map(|_| {
                let repo = Arc::clone(&repo);
                tokio::spawn(async move { repo.record_access("hot", Utc::now()).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let stored = repo.find_by_code("hot").await.unwrap().unwrap();
        assert_eq!(stored.access_count, 64);
        assert_eq!(repo.len().await, 1);
    }
}
