//! Parsing of form field text into scaled integers
//!
//! Money amounts and rates arrive from the UI as strings. Parsing is
//! strict: a fractional part beyond what the target scale can hold is
//! rejected, never silently truncated.

use folio_core::{Error, Result};

/// Normalize an optional text field; blank means absent
pub fn opt_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parse a count field that must be a whole number
pub fn parse_whole(field: &str, raw: &str) -> Result<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidData(format!("{} is required", field)));
    }
    if trimmed.contains('.') {
        return Err(Error::InvalidData(format!(
            "{} must be a whole number, got '{}'",
            field, trimmed
        )));
    }
    trimmed
        .parse::<i64>()
        .map_err(|_| Error::InvalidData(format!("{} is not a valid number: '{}'", field, trimmed)))
}

/// Parse an optional whole-number field; blank means absent
pub fn parse_whole_opt(field: &str, raw: &str) -> Result<Option<i64>> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_whole(field, raw).map(Some)
}

fn currency_decimals(currency: &str) -> u32 {
    if currency == "KWD" {
        3
    } else {
        2
    }
}

/// Parse a money amount into scaled minor units for its currency
///
/// `"1,234.56"` in USD becomes `123456`; KWD takes three decimals.
/// More decimals than the currency carries is an error.
pub fn parse_money(field: &str, raw: &str, currency: &str) -> Result<i64> {
    let decimals = currency_decimals(currency);
    parse_scaled(field, raw, decimals)
}

/// Parse an optional money amount; blank means absent
pub fn parse_money_opt(field: &str, raw: &str, currency: &str) -> Result<Option<i64>> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_money(field, raw, currency).map(Some)
}

/// Parse a percentage string into integer basis points
///
/// `"2.5"` becomes `250`. At most two decimals; `"2.505"` cannot be
/// represented in basis points and is rejected.
pub fn parse_rate_bps(field: &str, raw: &str) -> Result<i64> {
    parse_scaled(field, raw, 2)
}

/// Parse an optional rate; blank means absent
pub fn parse_rate_bps_opt(field: &str, raw: &str) -> Result<Option<i64>> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_rate_bps(field, raw).map(Some)
}

/// Parse a decimal string into an integer scaled by 10^decimals
fn parse_scaled(field: &str, raw: &str, decimals: u32) -> Result<i64> {
    let trimmed = raw.trim().replace(',', "");
    if trimmed.is_empty() {
        return Err(Error::InvalidData(format!("{} is required", field)));
    }

    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.as_str()),
    };

    let (whole, frac) = match digits.split_once('.') {
        Some((w, f)) => (w, f),
        None => (digits, ""),
    };

    if whole.is_empty() && frac.is_empty() {
        return Err(Error::InvalidData(format!(
            "{} is not a valid number: '{}'",
            field, raw
        )));
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
        return Err(Error::InvalidData(format!(
            "{} is not a valid number: '{}'",
            field, raw
        )));
    }
    if frac.len() as u32 > decimals {
        return Err(Error::InvalidData(format!(
            "{} allows at most {} decimal places, got '{}'",
            field, decimals, raw
        )));
    }

    let scale = 10i64.pow(decimals);
    let whole_value: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| {
            Error::InvalidData(format!("{} is out of range: '{}'", field, raw))
        })?
    };

    let frac_scale = 10i64.pow(decimals - frac.len() as u32);
    let frac_value: i64 = if frac.is_empty() {
        0
    } else {
        frac.parse::<i64>().map_err(|_| {
            Error::InvalidData(format!("{} is out of range: '{}'", field, raw))
        })? * frac_scale
    };

    let magnitude = whole_value
        .checked_mul(scale)
        .and_then(|v| v.checked_add(frac_value))
        .ok_or_else(|| Error::InvalidData(format!("{} is out of range: '{}'", field, raw)))?;

    Ok(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_number_rejects_fraction() {
        // Fractional counts are an input error, never floored
        assert!(parse_whole("quantity", "10.5").is_err());
        assert!(parse_whole("quantity", "10.0").is_err());
        assert_eq!(parse_whole("quantity", "10").unwrap(), 10);
        assert_eq!(parse_whole("quantity", " 250 ").unwrap(), 250);
    }

    #[test]
    fn test_whole_number_rejects_garbage() {
        assert!(parse_whole("quantity", "ten").is_err());
        assert!(parse_whole("quantity", "").is_err());
    }

    #[test]
    fn test_money_scales_by_currency() {
        assert_eq!(parse_money("amount", "1234.56", "USD").unwrap(), 123_456);
        assert_eq!(parse_money("amount", "1.5", "KWD").unwrap(), 1_500);
        assert_eq!(parse_money("amount", "1,000", "KWD").unwrap(), 1_000_000);
    }

    #[test]
    fn test_money_rejects_excess_decimals() {
        // USD carries two decimals, KWD three
        assert!(parse_money("amount", "1.234", "USD").is_err());
        assert!(parse_money("amount", "1.2345", "KWD").is_err());
    }

    #[test]
    fn test_rate_to_basis_points() {
        assert_eq!(parse_rate_bps("coupon_rate", "2.5").unwrap(), 250);
        assert_eq!(parse_rate_bps("coupon_rate", "0.75").unwrap(), 75);
        assert_eq!(parse_rate_bps("coupon_rate", "100").unwrap(), 10_000);
        assert!(parse_rate_bps("coupon_rate", "2.505").is_err());
    }

    #[test]
    fn test_optional_fields_blank_is_none() {
        assert_eq!(parse_whole_opt("floor", "").unwrap(), None);
        assert_eq!(parse_money_opt("value", "  ", "KWD").unwrap(), None);
        assert_eq!(parse_rate_bps_opt("irr", "").unwrap(), None);
        assert_eq!(parse_rate_bps_opt("irr", "1.25").unwrap(), Some(125));
    }

    #[test]
    fn test_negative_amounts() {
        assert_eq!(parse_money("amount", "-12.34", "USD").unwrap(), -1_234);
    }
}
