//! SQLite storage for the persisted session

pub mod connection;
pub mod session;

pub use connection::Database;
