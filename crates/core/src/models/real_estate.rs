//! Real estate models: properties, units, occupancy rows

use serde::{Deserialize, Serialize};

/// Occupancy status of a rental unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitStatus {
    Occupied,
    Vacant,
    UnderMaintenance,
    Reserved,
}

/// Rental unit belonging to a property
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    pub id: String,
    pub property_id: String,
    pub unit_number: String,
    #[serde(default)]
    pub unit_type: Option<String>,
    #[serde(default)]
    pub floor: Option<i32>,
    pub status: UnitStatus,
    #[serde(default)]
    pub tenant_name: Option<String>,
    #[serde(default)]
    pub monthly_rent_amount: Option<i64>,
    #[serde(default)]
    pub monthly_rent_currency: String,
    #[serde(default)]
    pub outstanding_amount: i64,
}

/// Property as returned by `/real-estate/properties`
///
/// `ownership_percentage` is stored in basis points (10000 = 100%).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Property {
    pub id: String,
    pub name: String,
    pub property_type: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    pub country: String,
    pub purchase_price_amount: i64,
    pub purchase_price_currency: String,
    pub purchase_date: String,
    #[serde(default)]
    pub current_value_amount: Option<i64>,
    #[serde(default)]
    pub current_value_currency: Option<String>,
    #[serde(default)]
    pub ownership_entity: Option<String>,
    pub ownership_percentage: i64,
    #[serde(default)]
    pub irr_bps: Option<i64>,
    #[serde(default)]
    pub units: Vec<Unit>,
    #[serde(default)]
    pub created_at: String,
}

/// Flat field set submitted by the property form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PropertyInput {
    pub name: String,
    pub property_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    pub country: String,
    pub purchase_price_amount: i64,
    pub purchase_price_currency: String,
    pub purchase_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_value_amount: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_value_currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ownership_entity: Option<String>,
    pub ownership_percentage: i64,
}

/// Server-computed per-property occupancy aggregation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OccupancyRow {
    pub property_id: String,
    pub property_name: String,
    pub total_units: u32,
    pub occupied_units: u32,
    pub vacant_units: u32,
    pub occupancy_rate: f64,
    pub total_monthly_rent: i64,
    pub total_collected: i64,
    pub total_outstanding: i64,
    pub currency: String,
}
