//! Private fund models
//!
//! IRR/TVPI/DPI and fee terms are integer basis points, computed
//! server-side.

use serde::{Deserialize, Serialize};

/// Private fund as returned by `/private-funds`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrivateFund {
    pub id: String,
    pub name: String,
    pub fund_type: String,
    #[serde(default)]
    pub fund_manager: Option<String>,
    #[serde(default)]
    pub vintage_year: Option<i32>,
    #[serde(default)]
    pub geography: Option<String>,
    #[serde(default)]
    pub sector: Option<String>,
    pub committed_capital_amount: i64,
    pub committed_capital_currency: String,
    #[serde(default)]
    pub called_capital_amount: i64,
    #[serde(default)]
    pub uncalled_capital_amount: Option<i64>,
    #[serde(default)]
    pub distributions_declared: i64,
    #[serde(default)]
    pub distributions_received: i64,
    #[serde(default)]
    pub current_nav_amount: Option<i64>,
    #[serde(default)]
    pub current_nav_kwd: Option<i64>,
    #[serde(default)]
    pub irr_bps: Option<i64>,
    #[serde(default)]
    pub tvpi_bps: Option<i64>,
    #[serde(default)]
    pub dpi_bps: Option<i64>,
    #[serde(default)]
    pub management_fee_bps: Option<i64>,
    #[serde(default)]
    pub carried_interest_bps: Option<i64>,
    #[serde(default)]
    pub fund_term_years: Option<i32>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub created_at: String,
}

/// Flat field set submitted by the private fund form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrivateFundInput {
    pub name: String,
    pub fund_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fund_manager: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vintage_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geography: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    pub committed_capital_amount: i64,
    pub committed_capital_currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub called_capital_amount: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub management_fee_bps: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carried_interest_bps: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fund_term_years: Option<i32>,
}
