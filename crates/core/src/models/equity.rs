//! Public equity holding models
//!
//! Monetary amounts are integer minor-unit values scaled by the
//! currency divisor (1000 for KWD, 100 otherwise); see [`crate::format`].

use serde::{Deserialize, Serialize};

/// Lifecycle status of an equity position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoldingStatus {
    Open,
    Closed,
    Partial,
}

impl std::fmt::Display for HoldingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HoldingStatus::Open => write!(f, "open"),
            HoldingStatus::Closed => write!(f, "closed"),
            HoldingStatus::Partial => write!(f, "partial"),
        }
    }
}

/// Equity holding as returned by `/holdings/equities`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquityHolding {
    pub id: String,
    pub ticker: String,
    pub name: String,
    pub exchange: String,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    pub quantity: i64,
    pub cost_basis_amount: i64,
    pub cost_basis_currency: String,
    #[serde(default)]
    pub current_price_amount: Option<i64>,
    #[serde(default)]
    pub current_price_currency: Option<String>,
    #[serde(default)]
    pub current_value_kwd: Option<i64>,
    #[serde(default)]
    pub realized_gain_loss: i64,
    #[serde(default)]
    pub unrealized_gain_loss: i64,
    pub status: HoldingStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// Flat field set submitted by the equity form (create and update)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EquityInput {
    pub ticker: String,
    pub name: String,
    pub exchange: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    pub quantity: i64,
    pub cost_basis_amount: i64,
    pub cost_basis_currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_price_amount: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_price_currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<HoldingStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
