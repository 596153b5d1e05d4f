//! Equities list view: search matcher and form payload

use super::{contains_ci, forms};
use folio_core::{EquityHolding, EquityInput, HoldingStatus, Result};
use serde::Deserialize;

/// Search covers ticker and company name
pub fn matches(item: &EquityHolding, needle_lower: &str) -> bool {
    contains_ci(&item.ticker, needle_lower) || contains_ci(&item.name, needle_lower)
}

/// Raw form fields as submitted by the UI; numbers arrive as text
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EquityForm {
    pub ticker: String,
    pub name: String,
    pub exchange: String,
    #[serde(default)]
    pub sector: String,
    #[serde(default)]
    pub country: String,
    pub quantity: String,
    pub cost_basis_amount: String,
    pub cost_basis_currency: String,
    #[serde(default)]
    pub current_price_amount: String,
    #[serde(default)]
    pub status: Option<HoldingStatus>,
    #[serde(default)]
    pub notes: String,
}

impl EquityForm {
    pub fn into_input(self) -> Result<EquityInput> {
        let currency = self.cost_basis_currency.trim().to_uppercase();
        let current_price_amount =
            forms::parse_money_opt("current_price_amount", &self.current_price_amount, &currency)?;

        Ok(EquityInput {
            ticker: self.ticker.trim().to_uppercase(),
            name: self.name.trim().to_string(),
            exchange: self.exchange.trim().to_string(),
            sector: forms::opt_text(&self.sector),
            country: forms::opt_text(&self.country),
            quantity: forms::parse_whole("quantity", &self.quantity)?,
            cost_basis_amount: forms::parse_money(
                "cost_basis_amount",
                &self.cost_basis_amount,
                &currency,
            )?,
            current_price_currency: current_price_amount.map(|_| currency.clone()),
            current_price_amount,
            cost_basis_currency: currency,
            status: self.status,
            notes: forms::opt_text(&self.notes),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holding(ticker: &str, name: &str) -> EquityHolding {
        EquityHolding {
            id: "eq1".into(),
            ticker: ticker.into(),
            name: name.into(),
            exchange: "Boursa Kuwait".into(),
            sector: None,
            country: None,
            quantity: 100,
            cost_basis_amount: 50_000,
            cost_basis_currency: "KWD".into(),
            current_price_amount: None,
            current_price_currency: None,
            current_value_kwd: None,
            realized_gain_loss: 0,
            unrealized_gain_loss: 0,
            status: HoldingStatus::Open,
            notes: None,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn test_matches_ticker_and_name() {
        let item = holding("NBK", "National Bank of Kuwait");
        assert!(matches(&item, "nbk"));
        assert!(matches(&item, "national"));
        assert!(!matches(&item, "zain"));
    }

    #[test]
    fn test_form_conversion() {
        let form = EquityForm {
            ticker: "nbk".into(),
            name: "National Bank of Kuwait".into(),
            exchange: "Boursa Kuwait".into(),
            quantity: "10000".into(),
            cost_basis_amount: "8500.000".into(),
            cost_basis_currency: "kwd".into(),
            ..Default::default()
        };

        let input = form.into_input().unwrap();
        assert_eq!(input.ticker, "NBK");
        assert_eq!(input.quantity, 10_000);
        assert_eq!(input.cost_basis_amount, 8_500_000);
        assert_eq!(input.cost_basis_currency, "KWD");
        assert_eq!(input.current_price_amount, None);
    }

    #[test]
    fn test_fractional_quantity_rejected() {
        let form = EquityForm {
            ticker: "NBK".into(),
            name: "NBK".into(),
            exchange: "Boursa Kuwait".into(),
            quantity: "100.5".into(),
            cost_basis_amount: "100".into(),
            cost_basis_currency: "KWD".into(),
            ..Default::default()
        };
        assert!(form.into_input().is_err());
    }
}
