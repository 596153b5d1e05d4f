//! Fixed income list view: search matcher and form payload

use super::{contains_ci, forms};
use folio_core::{FixedIncomeHolding, FixedIncomeInput, Result};
use serde::Deserialize;

/// Search covers instrument name and ISIN
pub fn matches(item: &FixedIncomeHolding, needle_lower: &str) -> bool {
    contains_ci(&item.name, needle_lower)
        || item
            .isin
            .as_deref()
            .is_some_and(|isin| contains_ci(isin, needle_lower))
}

/// Raw form fields as submitted by the UI
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FixedIncomeForm {
    pub name: String,
    #[serde(default)]
    pub isin: String,
    pub instrument_type: String,
    #[serde(default)]
    pub issuer: String,
    pub face_value_amount: String,
    pub face_value_currency: String,
    pub purchase_price_amount: String,
    #[serde(default)]
    pub purchase_price_currency: String,
    pub purchase_date: String,
    /// Annual coupon as a percentage, e.g. "4.25"
    #[serde(default)]
    pub coupon_rate: String,
    #[serde(default)]
    pub coupon_frequency: String,
    #[serde(default)]
    pub maturity_date: String,
    #[serde(default)]
    pub expected_return: String,
}

impl FixedIncomeForm {
    pub fn into_input(self) -> Result<FixedIncomeInput> {
        let face_currency = self.face_value_currency.trim().to_uppercase();
        // Purchase price defaults to the face value currency
        let purchase_currency = if self.purchase_price_currency.trim().is_empty() {
            face_currency.clone()
        } else {
            self.purchase_price_currency.trim().to_uppercase()
        };

        Ok(FixedIncomeInput {
            name: self.name.trim().to_string(),
            isin: forms::opt_text(&self.isin).map(|s| s.to_uppercase()),
            instrument_type: self.instrument_type.trim().to_string(),
            issuer: forms::opt_text(&self.issuer),
            face_value_amount: forms::parse_money(
                "face_value_amount",
                &self.face_value_amount,
                &face_currency,
            )?,
            face_value_currency: face_currency,
            purchase_price_amount: forms::parse_money(
                "purchase_price_amount",
                &self.purchase_price_amount,
                &purchase_currency,
            )?,
            purchase_price_currency: purchase_currency,
            purchase_date: self.purchase_date.trim().to_string(),
            coupon_rate: forms::parse_rate_bps_opt("coupon_rate", &self.coupon_rate)?,
            coupon_frequency: forms::opt_text(&self.coupon_frequency),
            maturity_date: forms::opt_text(&self.maturity_date),
            expected_return_bps: forms::parse_rate_bps_opt("expected_return", &self.expected_return)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holding(name: &str, isin: Option<&str>) -> FixedIncomeHolding {
        FixedIncomeHolding {
            id: "fi1".into(),
            name: name.into(),
            isin: isin.map(String::from),
            instrument_type: "sukuk".into(),
            issuer: None,
            face_value_amount: 1_000_000,
            face_value_currency: "USD".into(),
            purchase_price_amount: 980_000,
            purchase_price_currency: "USD".into(),
            purchase_date: "2023-06-01".into(),
            coupon_rate: Some(425),
            coupon_frequency: None,
            maturity_date: None,
            current_market_value_amount: None,
            current_value_kwd: None,
            irr_bps: None,
            expected_return_bps: None,
            status: "active".into(),
            created_at: String::new(),
        }
    }

    #[test]
    fn test_matches_name_and_isin() {
        let item = holding("KFH Sukuk 2027", Some("XS1234567890"));
        assert!(matches(&item, "kfh"));
        assert!(matches(&item, "xs1234"));
        assert!(!matches(&item, "treasury"));

        let no_isin = holding("Treasury Bond", None);
        assert!(!matches(&no_isin, "xs1234"));
    }

    #[test]
    fn test_coupon_rate_percent_to_bps() {
        let form = FixedIncomeForm {
            name: "KFH Sukuk".into(),
            instrument_type: "sukuk".into(),
            face_value_amount: "10000".into(),
            face_value_currency: "USD".into(),
            purchase_price_amount: "9800".into(),
            purchase_date: "2023-06-01".into(),
            coupon_rate: "4.25".into(),
            ..Default::default()
        };

        let input = form.into_input().unwrap();
        assert_eq!(input.coupon_rate, Some(425));
        assert_eq!(input.face_value_amount, 1_000_000);
        assert_eq!(input.purchase_price_currency, "USD");
    }

    #[test]
    fn test_sub_bps_coupon_rejected() {
        let form = FixedIncomeForm {
            name: "KFH Sukuk".into(),
            instrument_type: "sukuk".into(),
            face_value_amount: "10000".into(),
            face_value_currency: "USD".into(),
            purchase_price_amount: "9800".into(),
            purchase_date: "2023-06-01".into(),
            coupon_rate: "4.255".into(),
            ..Default::default()
        };
        assert!(form.into_input().is_err());
    }
}
