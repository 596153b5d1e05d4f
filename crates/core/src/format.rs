//! Display formatting for scaled-integer money and basis-point figures
//!
//! The backend transmits money as integer minor-unit values (KWD scaled
//! by 1000, every other currency by 100) and rates as integer basis
//! points. These helpers do the display scaling with integer math so no
//! floating point drift can creep into rendered amounts.

use chrono::NaiveDate;

/// Divisor and decimal count for a currency code
fn money_scale(currency: &str) -> (u64, usize) {
    if currency == "KWD" {
        (1000, 3)
    } else {
        (100, 2)
    }
}

/// Group a whole number with thousands separators: 1234567 -> "1,234,567"
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Format a scaled-integer amount as `"KWD 1,000.000"` / `"USD 1,234.56"`
pub fn format_money(amount: i64, currency: &str) -> String {
    let (divisor, decimals) = money_scale(currency);
    let sign = if amount < 0 { "-" } else { "" };
    let abs = amount.unsigned_abs();
    let whole = abs / divisor;
    let frac = abs % divisor;
    format!(
        "{} {}{}.{:0width$}",
        currency,
        sign,
        group_thousands(whole),
        frac,
        width = decimals
    )
}

/// Format with a K/M suffix for large values: `"1.25M KWD"`, `"42.00K USD"`
///
/// The M suffix applies from one million display units, K from one
/// thousand; anything below falls back to the full format.
pub fn format_compact_money(amount: i64, currency: &str) -> String {
    let (divisor, _) = money_scale(currency);
    let value = amount as f64 / divisor as f64;

    if value >= 1_000_000.0 {
        format!("{:.2}M {}", value / 1_000_000.0, currency)
    } else if value >= 1_000.0 {
        format!("{:.2}K {}", value / 1_000.0, currency)
    } else {
        format_money(amount, currency)
    }
}

/// Format integer basis points as a percentage: 250 -> "2.50%"
pub fn format_bps(bps: i64) -> String {
    format!("{:.2}%", bps as f64 / 100.0)
}

/// Format a signed percentage with an explicit plus sign: "+2.50%"
pub fn format_percent(value: f64) -> String {
    if value >= 0.0 {
        format!("+{:.2}%", value)
    } else {
        format!("{:.2}%", value)
    }
}

/// Format a plain count with thousands separators
pub fn format_number(value: i64) -> String {
    let sign = if value < 0 { "-" } else { "" };
    format!("{}{}", sign, group_thousands(value.unsigned_abs()))
}

/// Format an ISO date (`2024-01-05`) as `"Jan 05, 2024"`
///
/// Unparseable input is returned unchanged rather than erroring; dates
/// only ever reach this from the backend.
pub fn format_date(iso: &str) -> String {
    // Timestamps are truncated to their date part first.
    let date_part = iso.split('T').next().unwrap_or(iso);
    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(date) => date.format("%b %d, %Y").to_string(),
        Err(_) => iso.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money_kwd_three_decimals() {
        // KWD is a 3-decimal currency scaled by 1000
        assert_eq!(format_money(1_000_000, "KWD"), "KWD 1,000.000");
        assert_eq!(format_money(1, "KWD"), "KWD 0.001");
    }

    #[test]
    fn test_format_money_other_currencies_two_decimals() {
        assert_eq!(format_money(1_000_000, "USD"), "USD 10,000.00");
        assert_eq!(format_money(123_456, "EUR"), "EUR 1,234.56");
    }

    #[test]
    fn test_format_money_zero() {
        assert_eq!(format_money(0, "KWD"), "KWD 0.000");
        assert_eq!(format_money(0, "USD"), "USD 0.00");
    }

    #[test]
    fn test_format_money_negative() {
        assert_eq!(format_money(-123_456, "USD"), "USD -1,234.56");
        assert_eq!(format_money(-1_500, "KWD"), "KWD -1.500");
    }

    #[test]
    fn test_format_bps() {
        assert_eq!(format_bps(250), "2.50%");
        assert_eq!(format_bps(0), "0.00%");
        assert_eq!(format_bps(10_000), "100.00%");
        assert_eq!(format_bps(-75), "-0.75%");
    }

    #[test]
    fn test_compact_money_million_boundary() {
        // Exactly one million display units gets the M suffix
        assert_eq!(format_compact_money(1_000_000_000, "KWD"), "1.00M KWD");
        // One scaled unit below stays in K territory
        assert_eq!(format_compact_money(999_999_999, "KWD"), "1000.00K KWD");
    }

    #[test]
    fn test_compact_money_thousand_boundary() {
        // Exactly one thousand display units gets the K suffix
        assert_eq!(format_compact_money(1_000_000, "KWD"), "1.00K KWD");
        // One scaled unit below falls back to the full format
        assert_eq!(format_compact_money(999_999, "KWD"), "KWD 999.999");
    }

    #[test]
    fn test_compact_money_below_thousand_full_format() {
        assert_eq!(format_compact_money(50_000, "USD"), "USD 500.00");
    }

    #[test]
    fn test_format_percent_sign() {
        assert_eq!(format_percent(2.5), "+2.50%");
        assert_eq!(format_percent(-1.2), "-1.20%");
        assert_eq!(format_percent(0.0), "+0.00%");
    }

    #[test]
    fn test_format_number_grouping() {
        assert_eq!(format_number(1_234_567), "1,234,567");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(-12_000), "-12,000");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-01-05"), "Jan 05, 2024");
        assert_eq!(format_date("2023-12-31T10:30:00Z"), "Dec 31, 2023");
        assert_eq!(format_date("not-a-date"), "not-a-date");
    }
}
