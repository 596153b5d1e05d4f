//! View controllers behind the single-page UI
//!
//! Each asset class exposes a search matcher and a form payload; the
//! shared plumbing here handles pagination envelopes, the search
//! filter, and the two-step delete confirmation.

pub mod dashboard;
pub mod equities;
pub mod fixed_income;
pub mod forms;
pub mod private_funds;
pub mod real_estate;

use folio_core::Paginated;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Query parameters shared by every list view
#[derive(Debug, Clone, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_size")]
    pub size: u32,
    #[serde(default)]
    pub search: String,
}

fn default_page() -> u32 {
    1
}

fn default_size() -> u32 {
    50
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            size: 50,
            search: String::new(),
        }
    }
}

/// A fetched page with the search filter applied
///
/// `total` and `pages` describe the unfiltered collection; the filter
/// narrows only the rows of the current page.
#[derive(Debug, Clone, Serialize)]
pub struct FilteredPage<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub size: u32,
    pub pages: u32,
    pub search: String,
}

impl<T> FilteredPage<T> {
    /// Apply a case-insensitive search filter to a fetched page
    pub fn from_page<F>(page: Paginated<T>, search: &str, matcher: F) -> Self
    where
        F: Fn(&T, &str) -> bool,
    {
        let needle = search.trim().to_lowercase();
        let items = if needle.is_empty() {
            page.items
        } else {
            page.items
                .into_iter()
                .filter(|item| matcher(item, &needle))
                .collect()
        };

        Self {
            items,
            total: page.total,
            page: page.page,
            size: page.size,
            pages: page.pages,
            search: search.to_string(),
        }
    }
}

/// Case-insensitive substring match against an optional field
pub fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Two-step delete confirmation
///
/// A delete request hands out a one-time token; the actual delete must
/// present it back. Cancelling or confirming consumes the token, so a
/// stale confirmation can never fire.
#[derive(Default)]
pub struct DeleteGate {
    pending: RwLock<HashMap<String, String>>,
}

impl DeleteGate {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(class: &str, id: &str) -> String {
        format!("{}:{}", class, id)
    }

    /// Register intent to delete, returning the confirmation token
    pub async fn request(&self, class: &str, id: &str) -> String {
        let mut bytes = [0u8; 16];
        rand::thread_rng().fill_bytes(&mut bytes);
        let token: String = bytes.iter().map(|b| format!("{:02x}", b)).collect();

        let mut pending = self.pending.write().await;
        pending.insert(Self::key(class, id), token.clone());
        token
    }

    /// Consume the token; the delete may proceed only on `true`
    pub async fn confirm(&self, class: &str, id: &str, token: &str) -> bool {
        let mut pending = self.pending.write().await;
        match pending.get(&Self::key(class, id)) {
            Some(expected) if expected == token => {
                pending.remove(&Self::key(class, id));
                true
            }
            _ => false,
        }
    }

    /// Withdraw a pending delete
    pub async fn cancel(&self, class: &str, id: &str) {
        let mut pending = self.pending.write().await;
        pending.remove(&Self::key(class, id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_of(items: Vec<&str>) -> Paginated<String> {
        Paginated {
            items: items.into_iter().map(String::from).collect(),
            total: 100,
            page: 1,
            size: 50,
            pages: 2,
        }
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let page = page_of(vec!["National Bank", "Zain Group", "Agility"]);
        let filtered =
            FilteredPage::from_page(page, "BANK", |item, q| contains_ci(item, q));
        assert_eq!(filtered.items, vec!["National Bank"]);
    }

    #[test]
    fn test_empty_search_keeps_all_rows() {
        let page = page_of(vec!["a", "b"]);
        let filtered = FilteredPage::from_page(page, "  ", |item, q| contains_ci(item, q));
        assert_eq!(filtered.items.len(), 2);
        // Envelope still describes the unfiltered collection
        assert_eq!(filtered.total, 100);
        assert_eq!(filtered.pages, 2);
    }

    #[tokio::test]
    async fn test_delete_requires_matching_token() {
        let gate = DeleteGate::new();
        let token = gate.request("equities", "eq1").await;

        assert!(!gate.confirm("equities", "eq1", "wrong-token").await);
        assert!(!gate.confirm("equities", "eq2", &token).await);
        assert!(gate.confirm("equities", "eq1", &token).await);
    }

    #[tokio::test]
    async fn test_delete_token_is_single_use() {
        let gate = DeleteGate::new();
        let token = gate.request("private-funds", "pf1").await;

        assert!(gate.confirm("private-funds", "pf1", &token).await);
        assert!(!gate.confirm("private-funds", "pf1", &token).await);
    }

    #[tokio::test]
    async fn test_cancel_withdraws_pending_delete() {
        let gate = DeleteGate::new();
        let token = gate.request("equities", "eq1").await;

        gate.cancel("equities", "eq1").await;
        assert!(!gate.confirm("equities", "eq1", &token).await);
    }
}
