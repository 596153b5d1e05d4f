//! Persisted session token operations
//!
//! Only the encrypted token crosses restarts. The user record is
//! re-fetched from the backend on every startup.

use crate::encryption::EncryptedToken;
use folio_core::{Error, Result};
use sqlx::SqlitePool;

/// Store the encrypted session token, replacing any previous one
pub async fn save_token(pool: &SqlitePool, encrypted: &EncryptedToken) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO session (id, token_encrypted, iv, saved_at)
        VALUES (1, ?, ?, CURRENT_TIMESTAMP)
        ON CONFLICT(id) DO UPDATE SET
            token_encrypted = excluded.token_encrypted,
            iv = excluded.iv,
            saved_at = CURRENT_TIMESTAMP
        "#,
    )
    .bind(&encrypted.ciphertext)
    .bind(&encrypted.iv[..])
    .execute(pool)
    .await
    .map_err(|e| Error::StorageError(e.to_string()))?;

    Ok(())
}

/// Load the stored token, if one exists
pub async fn load_token(pool: &SqlitePool) -> Result<Option<EncryptedToken>> {
    let row: Option<(Vec<u8>, Vec<u8>)> =
        sqlx::query_as("SELECT token_encrypted, iv FROM session WHERE id = 1")
            .fetch_optional(pool)
            .await
            .map_err(|e| Error::StorageError(e.to_string()))?;

    match row {
        Some((ciphertext, iv_vec)) => {
            if iv_vec.len() != 12 {
                return Err(Error::StorageError("Invalid IV length".to_string()));
            }
            let mut iv = [0u8; 12];
            iv.copy_from_slice(&iv_vec);
            Ok(Some(EncryptedToken { ciphertext, iv }))
        }
        None => Ok(None),
    }
}

/// Remove the stored token
pub async fn clear_token(pool: &SqlitePool) -> Result<()> {
    sqlx::query("DELETE FROM session WHERE id = 1")
        .execute(pool)
        .await
        .map_err(|e| Error::StorageError(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encryption::TokenEncryptor;
    use crate::sqlite::Database;

    #[tokio::test]
    async fn test_save_load_roundtrip() {
        let db = Database::connect_in_memory().await.unwrap();
        let encryptor = TokenEncryptor::from_password("test_key").unwrap();

        let encrypted = encryptor.encrypt("session-token-abc").unwrap();
        save_token(db.pool(), &encrypted).await.unwrap();

        let loaded = load_token(db.pool()).await.unwrap().unwrap();
        assert_eq!(loaded.ciphertext, encrypted.ciphertext);
        assert_eq!(loaded.iv, encrypted.iv);
        assert_eq!(encryptor.decrypt(&loaded).unwrap(), "session-token-abc");
    }

    #[tokio::test]
    async fn test_save_replaces_previous_token() {
        let db = Database::connect_in_memory().await.unwrap();
        let encryptor = TokenEncryptor::from_password("test_key").unwrap();

        let first = encryptor.encrypt("first-token").unwrap();
        save_token(db.pool(), &first).await.unwrap();

        let second = encryptor.encrypt("second-token").unwrap();
        save_token(db.pool(), &second).await.unwrap();

        let loaded = load_token(db.pool()).await.unwrap().unwrap();
        assert_eq!(encryptor.decrypt(&loaded).unwrap(), "second-token");

        // Still a single row
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM session")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(count.0, 1);
    }

    #[tokio::test]
    async fn test_load_empty_returns_none() {
        let db = Database::connect_in_memory().await.unwrap();
        assert!(load_token(db.pool()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clear_token() {
        let db = Database::connect_in_memory().await.unwrap();
        let encryptor = TokenEncryptor::from_password("test_key").unwrap();

        let encrypted = encryptor.encrypt("doomed-token").unwrap();
        save_token(db.pool(), &encrypted).await.unwrap();

        clear_token(db.pool()).await.unwrap();
        assert!(load_token(db.pool()).await.unwrap().is_none());

        // Clearing an already-empty store is not an error
        clear_token(db.pool()).await.unwrap();
    }
}
