//! Bulk import support: asset-class templates and client-side preview
//!
//! The authoritative parse and row validation happen server-side; the
//! preview exists so the user can sanity-check a file before uploading.
//! Parsing uses a real CSV reader, so quoted fields with embedded commas
//! survive intact.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Number of data rows shown in the upload preview
const PREVIEW_ROWS: usize = 5;

/// Asset classes accepted by the bulk import endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssetClass {
    Equities,
    FixedIncome,
    RealEstate,
    PrivateFunds,
}

impl AssetClass {
    pub const ALL: [AssetClass; 4] = [
        AssetClass::Equities,
        AssetClass::FixedIncome,
        AssetClass::RealEstate,
        AssetClass::PrivateFunds,
    ];

    /// Path segment used by `/import/{segment}` and template filenames
    pub fn path_segment(&self) -> &'static str {
        match self {
            AssetClass::Equities => "equities",
            AssetClass::FixedIncome => "fixed-income",
            AssetClass::RealEstate => "real-estate",
            AssetClass::PrivateFunds => "private-funds",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            AssetClass::Equities => "Equities",
            AssetClass::FixedIncome => "Fixed Income",
            AssetClass::RealEstate => "Real Estate",
            AssetClass::PrivateFunds => "Private Funds",
        }
    }

    /// Column set expected by the backend importer for this class
    pub fn template_fields(&self) -> &'static [&'static str] {
        match self {
            AssetClass::Equities => &[
                "ticker",
                "name",
                "exchange",
                "sector",
                "country",
                "quantity",
                "cost_basis_amount",
                "cost_basis_currency",
                "purchase_date",
            ],
            AssetClass::FixedIncome => &[
                "name",
                "isin",
                "instrument_type",
                "issuer",
                "face_value_amount",
                "face_value_currency",
                "purchase_price_amount",
                "purchase_date",
                "coupon_rate",
                "maturity_date",
            ],
            AssetClass::RealEstate => &[
                "name",
                "property_type",
                "address",
                "city",
                "country",
                "purchase_price_amount",
                "purchase_price_currency",
                "purchase_date",
                "ownership_entity",
                "ownership_percentage",
            ],
            AssetClass::PrivateFunds => &[
                "name",
                "fund_type",
                "fund_manager",
                "vintage_year",
                "geography",
                "sector",
                "committed_capital_amount",
                "committed_capital_currency",
            ],
        }
    }

    /// Parse a path segment back into an asset class
    pub fn from_segment(segment: &str) -> Option<AssetClass> {
        AssetClass::ALL
            .into_iter()
            .find(|c| c.path_segment() == segment)
    }
}

/// CSV template content for download: the header row only
pub fn template_csv(class: AssetClass) -> String {
    let mut content = class.template_fields().join(",");
    content.push('\n');
    content
}

/// Parsed preview of an uploaded file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportPreview {
    /// Detected headers, lower-cased and trimmed
    pub headers: Vec<String>,
    /// Up to the first five data rows, keyed by header
    pub rows: Vec<HashMap<String, String>>,
    /// Total number of data rows in the file
    pub total_rows: usize,
}

/// Parse raw file text into a preview of the first data rows
///
/// A file without at least one data row under the header is rejected
/// here, before any upload happens.
pub fn parse_preview(text: &str) -> Result<ImportPreview> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();

    if headers.iter().all(|h| h.is_empty()) {
        return Err(Error::ImportError("File appears to be empty".to_string()));
    }

    let mut rows = Vec::new();
    let mut total_rows = 0usize;
    for record in reader.records() {
        let record = record?;
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        total_rows += 1;
        if rows.len() >= PREVIEW_ROWS {
            continue;
        }
        let mut row = HashMap::with_capacity(headers.len());
        for (i, header) in headers.iter().enumerate() {
            let value = record.get(i).unwrap_or("").trim().to_string();
            row.insert(header.clone(), value);
        }
        rows.push(row);
    }

    if total_rows == 0 {
        return Err(Error::ImportError(
            "File has no data rows to import".to_string(),
        ));
    }

    Ok(ImportPreview {
        headers,
        rows,
        total_rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_two_data_rows() {
        let preview =
            parse_preview("Ticker,Name\nAAPL,Apple\nMSFT,Microsoft\n").unwrap();
        assert_eq!(preview.headers, vec!["ticker", "name"]);
        assert_eq!(preview.rows.len(), 2);
        assert_eq!(preview.rows[0]["ticker"], "AAPL");
        assert_eq!(preview.rows[1]["name"], "Microsoft");
    }

    #[test]
    fn test_preview_rejects_header_only_file() {
        let err = parse_preview("ticker,name\n").unwrap_err();
        assert!(matches!(err, Error::ImportError(_)));
    }

    #[test]
    fn test_preview_rejects_empty_file() {
        assert!(parse_preview("").is_err());
        assert!(parse_preview("\n\n").is_err());
    }

    #[test]
    fn test_preview_caps_at_five_rows() {
        let mut text = String::from("ticker\n");
        for i in 0..8 {
            text.push_str(&format!("T{}\n", i));
        }
        let preview = parse_preview(&text).unwrap();
        assert_eq!(preview.rows.len(), 5);
        assert_eq!(preview.total_rows, 8);
    }

    #[test]
    fn test_preview_handles_quoted_commas() {
        let preview =
            parse_preview("name,city\n\"Tower One, Block 4\",Kuwait City\n").unwrap();
        assert_eq!(preview.rows[0]["name"], "Tower One, Block 4");
        assert_eq!(preview.rows[0]["city"], "Kuwait City");
    }

    #[test]
    fn test_preview_short_rows_padded_with_empty() {
        let preview = parse_preview("a,b,c\n1,2\n").unwrap();
        assert_eq!(preview.rows[0]["c"], "");
    }

    #[test]
    fn test_template_csv_header_row() {
        let csv = template_csv(AssetClass::PrivateFunds);
        assert!(csv.starts_with("name,fund_type,"));
        assert!(csv.ends_with('\n'));
    }

    #[test]
    fn test_asset_class_segments_round_trip() {
        for class in AssetClass::ALL {
            assert_eq!(AssetClass::from_segment(class.path_segment()), Some(class));
        }
        assert_eq!(AssetClass::from_segment("bonds"), None);
    }
}
