//! Portfolio aggregate read models
//!
//! Everything here is server-computed; the only local derivation is the
//! gain/loss percentage used on the dashboard.

use serde::{Deserialize, Serialize};

/// One slice of the allocation donut / exposure bars
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationItem {
    pub category: String,
    pub value_kwd: i64,
    pub percentage: f64,
    #[serde(default)]
    pub color: Option<String>,
}

/// Per-asset-class rollup inside the portfolio summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetClassSummary {
    pub asset_class: String,
    pub total_value_kwd: i64,
    pub cost_basis_kwd: i64,
    pub unrealized_gain_loss: i64,
    #[serde(default)]
    pub realized_gain_loss: i64,
    #[serde(default)]
    pub income_received: i64,
    #[serde(default)]
    pub irr_bps: Option<i64>,
    pub holdings_count: u32,
}

impl AssetClassSummary {
    /// Unrealized gain/loss as a percentage of cost basis
    pub fn gain_loss_percent(&self) -> f64 {
        gain_loss_percent(self.unrealized_gain_loss, self.cost_basis_kwd)
    }
}

/// Aggregate portfolio summary from `/portfolio/summary`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub total_value_kwd: i64,
    pub total_cost_basis_kwd: i64,
    pub total_unrealized_gain_loss: i64,
    #[serde(default)]
    pub total_realized_gain_loss: i64,
    #[serde(default)]
    pub total_income_kwd: i64,
    #[serde(default)]
    pub portfolio_irr_bps: Option<i64>,
    pub asset_class_breakdown: Vec<AssetClassSummary>,
    pub allocation: Vec<AllocationItem>,
    #[serde(default)]
    pub equities_count: u32,
    #[serde(default)]
    pub fixed_income_count: u32,
    #[serde(default)]
    pub properties_count: u32,
    #[serde(default)]
    pub units_count: u32,
    #[serde(default)]
    pub private_funds_count: u32,
    #[serde(default)]
    pub as_of_date: String,
}

impl PortfolioSummary {
    /// Total unrealized gain/loss as a percentage of total cost basis
    pub fn gain_loss_percent(&self) -> f64 {
        gain_loss_percent(self.total_unrealized_gain_loss, self.total_cost_basis_kwd)
    }
}

/// Exposure breakdown along one dimension (geography, currency, sector)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExposureBreakdown {
    pub dimension: String,
    pub items: Vec<AllocationItem>,
}

/// Gain/loss percentage guarded against a zero cost basis
fn gain_loss_percent(gain_loss: i64, cost_basis: i64) -> f64 {
    if cost_basis > 0 {
        (gain_loss as f64 / cost_basis as f64) * 100.0
    } else {
        0.0
    }
}
