use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::{
    config::StorageBackend,
    db::{Database, DatabaseHealth},
    errors::AppError,
};

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Serialize, Deserialize)]
pub struct ResponsePayload {
    pub status: i32,
    pub message: String,
}

#[derive(Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub storage: StorageBackend,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db_health: Option<DatabaseHealth>,
    pub uptime_seconds: u64,
}

// Shared application state
pub struct AppState {
    pub start_time: Instant,
    pub version: String,
    pub storage: StorageBackend,
    pub db: Option<Database>,
}
