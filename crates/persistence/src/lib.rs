//! Folio Persistence - local token storage and encryption layer
//!
//! Only the session token is persisted between runs; portfolio data is
//! always fetched fresh from the backend.

pub mod encryption;
pub mod sqlite;

pub use encryption::derive_machine_key;
pub use encryption::TokenEncryptor;
pub use sqlite::Database;
