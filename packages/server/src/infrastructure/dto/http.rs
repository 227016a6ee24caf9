//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Response body of `GET /`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootDto {
    pub message: String,
}

/// Response body of `GET /api/health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthDto {
    pub status: String,
    /// Number of joined clients
    pub clients: usize,
}
