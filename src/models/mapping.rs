// src/models/mapping.rs - Pure data structures
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::validations::{validate_shortcode, validate_url};

/// Body of a create request. An empty or missing shortcode asks for a generated one.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateMappingDto {
    #[serde(rename = "originalURL")]
    #[validate(custom(function = "validate_url"))]
    pub original_url: String,

    #[serde(default)]
    #[validate(custom(function = "validate_shortcode"))]
    pub shortcode: Option<String>,
}

/// Body of an update request
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateMappingDto {
    #[serde(rename = "originalURL")]
    #[validate(custom(function = "validate_url"))]
    pub original_url: String,
}

/// A shortcode → URL mapping with its access statistics
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Mapping {
    /// Primary key, never changes after creation
    pub shortcode: String,

    /// Where the shortcode points to
    pub original_url: String,

    pub created_at: DateTime<Utc>,

    /// When the mapping was last retrieved, `None` until the first retrieval
    pub last_accessed_at: Option<DateTime<Utc>>,

    /// Number of successful retrievals
    pub access_count: i64,
}

impl Mapping {
    /// A fresh, never accessed mapping created at `created_at`
    pub fn new(
        shortcode: impl Into<String>,
        original_url: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            shortcode: shortcode.into(),
            original_url: original_url.into(),
            created_at,
            last_accessed_at: None,
            access_count: 0,
        }
    }

    /// Applies one successful retrieval. The access time never moves backwards.
    pub fn record_access(&mut self, at: DateTime<Utc>) {
        let floor = self.last_accessed_at.unwrap_or(self.created_at);
        self.last_accessed_at = Some(at.max(floor));
        self.access_count += 1;
    }
}

// Wire shape, keeps the camelCase field names API clients expect
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingResponseDto {
    pub shortcode: String,
    #[serde(rename = "originalURL")]
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub last_accessed_at: Option<DateTime<Utc>>,
    pub access_count: i64,
}

impl From<Mapping> for MappingResponseDto {
    fn from(mapping: Mapping) -> Self {
        MappingResponseDto {
            shortcode: mapping.shortcode,
            original_url: mapping.original_url,
            created_at: mapping.created_at,
            last_accessed_at: mapping.last_accessed_at,
            access_count: mapping.access_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use serde_json::json;

    use super::*;

    #[test]
    fn new_mapping_starts_unaccessed() {
        let now = Utc::now();
        let mapping = Mapping::new("abc123", "https://example.com/a", now);
        assert_eq!(mapping.access_count, 0);
        assert_eq!(mapping.last_accessed_at, None);
        assert_eq!(mapping.created_at, now);
    }

    #[test]
    fn record_access_never_moves_backwards() {
        let created = Utc::now();
        let mut mapping = Mapping::new("abc123", "https://example.com/a", created);

        mapping.record_access(created - Duration::seconds(5));
        assert_eq!(mapping.last_accessed_at, Some(created));
        assert_eq!(mapping.access_count, 1);

        let later = created + Duration::seconds(10);
        mapping.record_access(later);
        mapping.record_access(later - Duration::seconds(3));
        assert_eq!(mapping.last_accessed_at, Some(later));
        assert_eq!(mapping.access_count, 3);
    }

    #[test]
    fn response_uses_original_field_names() {
        let mapping = Mapping::new("abc123", "https://example.com/a", Utc::now());
        let value = serde_json::to_value(MappingResponseDto::from(mapping)).unwrap();
        assert_eq!(value["shortcode"], "abc123");
        assert_eq!(value["originalURL"], "https://example.com/a");
        assert_eq!(value["accessCount"], 0);
        assert!(value["lastAccessedAt"].is_null());
        assert!(value.get("createdAt").is_some());
    }

    #[test]
    fn create_dto_accepts_missing_shortcode() {
        let dto: CreateMappingDto =
            serde_json::from_value(json!({ "originalURL": "https://example.com" })).unwrap();
        assert_eq!(dto.shortcode, None);
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn create_dto_rejects_bad_url() {
        let dto: CreateMappingDto =
            serde_json::from_value(json!({ "originalURL": "ftp://example.com", "shortcode": "ok" }))
                .unwrap();
        assert!(dto.validate().is_err());
    }
}
