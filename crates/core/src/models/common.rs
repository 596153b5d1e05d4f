//! Shared API envelope types

use serde::{Deserialize, Serialize};

/// Paginated list envelope used by every list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub size: u32,
    pub pages: u32,
}

impl<T> Default for Paginated<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page: 1,
            size: 0,
            pages: 0,
        }
    }
}

/// One row-level error from a bulk import
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportRowError {
    pub row: u32,
    pub message: String,
}

/// Result of a bulk import upload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportOutcome {
    pub success: bool,
    pub created: u32,
    #[serde(default)]
    pub errors: Vec<ImportRowError>,
}
