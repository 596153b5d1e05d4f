//! Application state management

use folio_core::Result;
use folio_persistence::{Database, TokenEncryptor};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Global application state shared across route handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<RwLock<Option<Database>>>,
    pub encryptor: Arc<TokenEncryptor>,
    pub data_dir: PathBuf,
    /// Base URL of the portfolio backend API
    pub api_base: String,
}

impl AppState {
    /// Create new application state
    pub fn new(data_dir: PathBuf, api_base: &str, encryption_key: &[u8]) -> Result<Self> {
        let encryptor = TokenEncryptor::new(encryption_key)?;

        Ok(Self {
            db: Arc::new(RwLock::new(None)),
            encryptor: Arc::new(encryptor),
            data_dir,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    /// Initialize the database connection
    pub async fn init_db(&self) -> Result<()> {
        let db_path = self.data_dir.join("folio.db");
        let db = Database::connect(&db_path).await?;

        let mut db_lock = self.db.write().await;
        *db_lock = Some(db);

        Ok(())
    }

    /// Initialize with an in-memory database (for testing)
    pub async fn init_db_in_memory(&self) -> Result<()> {
        let db = Database::connect_in_memory().await?;

        let mut db_lock = self.db.write().await;
        *db_lock = Some(db);

        Ok(())
    }
}
