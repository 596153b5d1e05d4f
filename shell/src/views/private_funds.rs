//! Private funds list view: search matcher and form payload

use super::{contains_ci, forms};
use folio_core::{PrivateFund, PrivateFundInput, Result};
use serde::Deserialize;

/// Search covers fund name and manager
pub fn matches(item: &PrivateFund, needle_lower: &str) -> bool {
    contains_ci(&item.name, needle_lower)
        || item
            .fund_manager
            .as_deref()
            .is_some_and(|manager| contains_ci(manager, needle_lower))
}

/// Raw form fields as submitted by the UI
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PrivateFundForm {
    pub name: String,
    pub fund_type: String,
    #[serde(default)]
    pub fund_manager: String,
    #[serde(default)]
    pub vintage_year: String,
    #[serde(default)]
    pub geography: String,
    #[serde(default)]
    pub sector: String,
    pub committed_capital_amount: String,
    pub committed_capital_currency: String,
    #[serde(default)]
    pub called_capital_amount: String,
    /// Annual management fee as a percentage, e.g. "2"
    #[serde(default)]
    pub management_fee: String,
    /// Carried interest as a percentage, e.g. "20"
    #[serde(default)]
    pub carried_interest: String,
    #[serde(default)]
    pub fund_term_years: String,
}

impl PrivateFundForm {
    pub fn into_input(self) -> Result<PrivateFundInput> {
        let currency = self.committed_capital_currency.trim().to_uppercase();

        Ok(PrivateFundInput {
            name: self.name.trim().to_string(),
            fund_type: self.fund_type.trim().to_string(),
            fund_manager: forms::opt_text(&self.fund_manager),
            vintage_year: forms::parse_whole_opt("vintage_year", &self.vintage_year)?
                .map(|y| y as i32),
            geography: forms::opt_text(&self.geography),
            sector: forms::opt_text(&self.sector),
            committed_capital_amount: forms::parse_money(
                "committed_capital_amount",
                &self.committed_capital_amount,
                &currency,
            )?,
            called_capital_amount: forms::parse_money_opt(
                "called_capital_amount",
                &self.called_capital_amount,
                &currency,
            )?,
            committed_capital_currency: currency,
            management_fee_bps: forms::parse_rate_bps_opt("management_fee", &self.management_fee)?,
            carried_interest_bps: forms::parse_rate_bps_opt(
                "carried_interest",
                &self.carried_interest,
            )?,
            fund_term_years: forms::parse_whole_opt("fund_term_years", &self.fund_term_years)?
                .map(|y| y as i32),
        })
    }
}
