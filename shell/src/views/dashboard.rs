//! Dashboard aggregation with per-widget failure isolation
//!
//! The three widgets load independently; one failing fetch leaves the
//! others intact instead of blanking the whole page.

use folio_core::{Error, ExposureBreakdown, PortfolioSummary};
use folio_networking::PortfolioClient;
use serde::Serialize;
use tracing::warn;

/// Everything the dashboard page renders in one payload
#[derive(Debug, Clone, Serialize)]
pub struct DashboardData {
    pub summary: Option<PortfolioSummary>,
    pub geography: Option<ExposureBreakdown>,
    pub currency: Option<ExposureBreakdown>,
    /// One message per failed widget
    pub errors: Vec<String>,
}

impl DashboardData {
    pub fn is_empty(&self) -> bool {
        self.summary.is_none() && self.geography.is_none() && self.currency.is_none()
    }
}

/// Fetch all dashboard widgets concurrently
///
/// A 401 on any widget aborts the load so the caller can invalidate the
/// session; every other failure is recorded per widget.
pub async fn load(client: &PortfolioClient) -> Result<DashboardData, Error> {
    let (summary, geography, currency) = tokio::join!(
        client.portfolio_summary(),
        client.exposure("geography"),
        client.exposure("currency"),
    );

    let mut errors = Vec::new();

    let summary = collect(summary, "summary", &mut errors)?;
    let geography = collect(geography, "geography exposure", &mut errors)?;
    let currency = collect(currency, "currency exposure", &mut errors)?;

    Ok(DashboardData {
        summary,
        geography,
        currency,
        errors,
    })
}

fn collect<T>(
    result: Result<T, Error>,
    widget: &str,
    errors: &mut Vec<String>,
) -> Result<Option<T>, Error> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(Error::SessionExpired) => Err(Error::SessionExpired),
        Err(e) => {
            warn!("Dashboard widget '{}' failed: {}", widget, e);
            errors.push(format!("{}: {}", widget, e));
            Ok(None)
        }
    }
}
