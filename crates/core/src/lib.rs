//! Folio Core - Shared data models, errors, and display formatting

pub mod errors;
pub mod format;
pub mod imports;
pub mod models;

pub use errors::{Error, Result};
pub use models::*;
