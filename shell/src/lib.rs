//! Folio shell: local server hosting the portfolio dashboard UI
//!
//! The shell owns the session (token at rest, forced logout on 401) and
//! fronts the portfolio backend for the single-page UI it serves.

pub mod config;
pub mod server;
pub mod session;
pub mod state;
pub mod views;

pub use config::Config;
pub use server::{build_router, ShellState};
pub use session::SessionManager;
pub use state::AppState;
