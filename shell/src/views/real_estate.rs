//! Real estate list view: search matcher, form payload, occupancy rollup

use super::{contains_ci, forms};
use folio_core::{OccupancyRow, Property, PropertyInput, Result};
use serde::{Deserialize, Serialize};

/// Search covers property name and city
pub fn matches(item: &Property, needle_lower: &str) -> bool {
    contains_ci(&item.name, needle_lower)
        || item
            .city
            .as_deref()
            .is_some_and(|city| contains_ci(city, needle_lower))
}

/// Raw form fields as submitted by the UI
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PropertyForm {
    pub name: String,
    pub property_type: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    pub country: String,
    pub purchase_price_amount: String,
    pub purchase_price_currency: String,
    pub purchase_date: String,
    #[serde(default)]
    pub current_value_amount: String,
    #[serde(default)]
    pub ownership_entity: String,
    /// Ownership share as a percentage, e.g. "100" or "33.33"
    pub ownership_percentage: String,
}

impl PropertyForm {
    pub fn into_input(self) -> Result<PropertyInput> {
        let currency = self.purchase_price_currency.trim().to_uppercase();
        let current_value_amount =
            forms::parse_money_opt("current_value_amount", &self.current_value_amount, &currency)?;

        Ok(PropertyInput {
            name: self.name.trim().to_string(),
            property_type: self.property_type.trim().to_string(),
            address: forms::opt_text(&self.address),
            city: forms::opt_text(&self.city),
            country: self.country.trim().to_string(),
            purchase_price_amount: forms::parse_money(
                "purchase_price_amount",
                &self.purchase_price_amount,
                &currency,
            )?,
            current_value_currency: current_value_amount.map(|_| currency.clone()),
            purchase_price_currency: currency,
            purchase_date: self.purchase_date.trim().to_string(),
            current_value_amount,
            ownership_entity: forms::opt_text(&self.ownership_entity),
            ownership_percentage: forms::parse_rate_bps(
                "ownership_percentage",
                &self.ownership_percentage,
            )?,
        })
    }
}

/// Portfolio-wide occupancy totals derived from the per-property report
#[derive(Debug, Clone, Serialize)]
pub struct OccupancySummary {
    pub total_units: u32,
    pub occupied_units: u32,
    pub vacant_units: u32,
    pub occupancy_rate: f64,
}

impl OccupancySummary {
    pub fn from_rows(rows: &[OccupancyRow]) -> Self {
        let total_units: u32 = rows.iter().map(|r| r.total_units).sum();
        let occupied_units: u32 = rows.iter().map(|r| r.occupied_units).sum();
        let vacant_units: u32 = rows.iter().map(|r| r.vacant_units).sum();
        let occupancy_rate = if total_units > 0 {
            occupied_units as f64 / total_units as f64 * 100.0
        } else {
            0.0
        };

        Self {
            total_units,
            occupied_units,
            vacant_units,
            occupancy_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn property(name: &str, city: Option<&str>) -> Property {
        Property {
            id: "p1".into(),
            name: name.into(),
            property_type: "residential".into(),
            address: None,
            city: city.map(String::from),
            country: "Kuwait".into(),
            purchase_price_amount: 500_000_000,
            purchase_price_currency: "KWD".into(),
            purchase_date: "2020-03-01".into(),
            current_value_amount: None,
            current_value_currency: None,
            ownership_entity: None,
            ownership_percentage: 10_000,
            irr_bps: None,
            units: vec![],
            created_at: String::new(),
        }
    }

    fn occ_row(total: u32, occupied: u32) -> OccupancyRow {
        OccupancyRow {
            property_id: "p1".into(),
            property_name: "Tower".into(),
            total_units: total,
            occupied_units: occupied,
            vacant_units: total - occupied,
            occupancy_rate: 0.0,
            total_monthly_rent: 0,
            total_collected: 0,
            total_outstanding: 0,
            currency: "KWD".into(),
        }
    }

    #[test]
    fn test_matches_name_and_city() {
        let item = property("Salmiya Tower", Some("Kuwait City"));
        assert!(matches(&item, "salmiya"));
        assert!(matches(&item, "kuwait city"));
        assert!(!matches(&item, "dubai"));
    }

    #[test]
    fn test_ownership_percentage_to_bps() {
        let form = PropertyForm {
            name: "Salmiya Tower".into(),
            property_type: "residential".into(),
            country: "Kuwait".into(),
            purchase_price_amount: "500000".into(),
            purchase_price_currency: "KWD".into(),
            purchase_date: "2020-03-01".into(),
            ownership_percentage: "33.33".into(),
            ..Default::default()
        };

        let input = form.into_input().unwrap();
        // 33.33% stored as 3333 basis points
        assert_eq!(input.ownership_percentage, 3_333);
        assert_eq!(input.purchase_price_amount, 500_000_000);
    }

    #[test]
    fn test_occupancy_summary_totals() {
        let rows = vec![occ_row(10, 8), occ_row(20, 16)];
        let summary = OccupancySummary::from_rows(&rows);
        assert_eq!(summary.total_units, 30);
        assert_eq!(summary.occupied_units, 24);
        assert_eq!(summary.vacant_units, 6);
        assert!((summary.occupancy_rate - 80.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_occupancy_summary_no_units() {
        let summary = OccupancySummary::from_rows(&[]);
        assert_eq!(summary.occupancy_rate, 0.0);
    }
}
