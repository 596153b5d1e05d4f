//! Fixed income holding models

use serde::{Deserialize, Serialize};

/// Fixed income holding as returned by `/holdings/fixed-income`
///
/// Dates are ISO `YYYY-MM-DD` strings; coupon and return figures are
/// integer basis points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedIncomeHolding {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub isin: Option<String>,
    pub instrument_type: String,
    #[serde(default)]
    pub issuer: Option<String>,
    pub face_value_amount: i64,
    pub face_value_currency: String,
    pub purchase_price_amount: i64,
    pub purchase_price_currency: String,
    pub purchase_date: String,
    #[serde(default)]
    pub coupon_rate: Option<i64>,
    #[serde(default)]
    pub coupon_frequency: Option<String>,
    #[serde(default)]
    pub maturity_date: Option<String>,
    #[serde(default)]
    pub current_market_value_amount: Option<i64>,
    #[serde(default)]
    pub current_value_kwd: Option<i64>,
    #[serde(default)]
    pub irr_bps: Option<i64>,
    #[serde(default)]
    pub expected_return_bps: Option<i64>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub created_at: String,
}

/// Flat field set submitted by the fixed income form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixedIncomeInput {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isin: Option<String>,
    pub instrument_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    pub face_value_amount: i64,
    pub face_value_currency: String,
    pub purchase_price_amount: i64,
    pub purchase_price_currency: String,
    pub purchase_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupon_rate: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupon_frequency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maturity_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_return_bps: Option<i64>,
}
