//! Typed HTTP client for the portfolio backend with bearer authentication

use folio_core::{
    imports::AssetClass, EquityHolding, EquityInput, Error, ExposureBreakdown,
    FixedIncomeHolding, FixedIncomeInput, ImportOutcome, LoginRequest, OccupancyRow, Paginated,
    PortfolioSummary, PrivateFund, PrivateFundInput, Property, PropertyInput, Result, Token,
    User,
};
use reqwest::{multipart, Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, instrument};

/// HTTP client for the portfolio backend API
///
/// Every authenticated request carries the session token as a bearer
/// header. A 401 on any authenticated endpoint surfaces as
/// `Error::SessionExpired` so the caller can invalidate the session.
#[derive(Debug, Clone)]
pub struct PortfolioClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl PortfolioClient {
    /// Create an unauthenticated client against the given API base
    ///
    /// # Arguments
    /// * `base_url` - e.g. `http://127.0.0.1:8000/api/v1`, no trailing slash
    pub fn new(base_url: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Create a client that authenticates with an existing token
    pub fn with_token(base_url: &str, token: &str) -> Self {
        let mut client = Self::new(base_url);
        client.token = Some(token.to_string());
        client
    }

    /// Attach a session token to an existing client
    pub fn set_token(&mut self, token: &str) {
        self.token = Some(token.to_string());
    }

    /// Get the current session token, if any
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn bearer(&self) -> Result<&str> {
        self.token.as_deref().ok_or(Error::SessionExpired)
    }

    /// Check if a response indicates authentication failure
    fn check_auth_error(response: &Response) -> Option<Error> {
        match response.status().as_u16() {
            401 => Some(Error::SessionExpired),
            403 => Some(Error::AuthenticationError("Access forbidden".to_string())),
            _ => None,
        }
    }

    /// Parse a successful JSON response, mapping failures to typed errors
    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let response = response.error_for_status().map_err(|e| {
            error!("Request failed: {}", e);
            Error::ApiError(e.to_string())
        })?;

        response.json().await.map_err(|e| {
            error!("Failed to parse response: {}", e);
            Error::InvalidData(e.to_string())
        })
    }

    /// Authenticated GET returning deserialized JSON
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let response = self
            .http
            .get(self.url(path))
            .bearer_auth(self.bearer()?)
            .query(query)
            .send()
            .await?;

        if let Some(err) = Self::check_auth_error(&response) {
            return Err(err);
        }

        Self::read_json(response).await
    }

    /// Authenticated POST/PUT with a JSON body
    ///
    /// Mutating endpoints return validation details in the error body,
    /// so the body is preserved in the error instead of just the status.
    async fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self
            .http
            .request(method, self.url(path))
            .bearer_auth(self.bearer()?)
            .json(body)
            .send()
            .await?;

        if let Some(err) = Self::check_auth_error(&response) {
            return Err(err);
        }

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            error!("Request failed: HTTP {} - {}", status, body);
            return Err(Error::ApiError(format!("HTTP {}: {}", status, body)));
        }

        response.json().await.map_err(|e| {
            error!("Failed to parse response: {}", e);
            Error::InvalidData(e.to_string())
        })
    }

    async fn delete_path(&self, path: &str) -> Result<()> {
        let response = self
            .http
            .delete(self.url(path))
            .bearer_auth(self.bearer()?)
            .send()
            .await?;

        if let Some(err) = Self::check_auth_error(&response) {
            return Err(err);
        }

        response.error_for_status().map_err(|e| {
            error!("Delete failed: {}", e);
            Error::ApiError(e.to_string())
        })?;
        Ok(())
    }

    // ---- auth ----

    /// Exchange credentials for an access token
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<Token> {
        let url = self.url("/auth/login");
        debug!("Logging in via: {}", url);

        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        let response = self.http.post(&url).json(&request).send().await?;

        if response.status().as_u16() == 401 {
            return Err(Error::AuthenticationError(
                "Invalid username or password".to_string(),
            ));
        }

        let token: Token = Self::read_json(response).await?;
        debug!("Login succeeded for user: {}", username);
        Ok(token)
    }

    /// Fetch the authenticated user's profile
    #[instrument(skip(self))]
    pub async fn me(&self) -> Result<User> {
        let user: User = self.get_json("/auth/me", &[]).await?;
        debug!("Session verified for user: {}", user.username);
        Ok(user)
    }

    /// Tell the backend to discard the session
    ///
    /// An already-dead token is not an error here; the caller is about
    /// to drop it either way.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<()> {
        let response = self
            .http
            .post(self.url("/auth/logout"))
            .bearer_auth(self.bearer()?)
            .send()
            .await?;

        debug!("Logout response status: {}", response.status());
        Ok(())
    }

    // ---- portfolio aggregates ----

    /// Portfolio-wide totals, per-class breakdown and allocation
    #[instrument(skip(self))]
    pub async fn portfolio_summary(&self) -> Result<PortfolioSummary> {
        let summary: PortfolioSummary = self.get_json("/portfolio/summary", &[]).await?;
        debug!(
            "Summary fetched: total value {} KWD across {} classes",
            summary.total_value_kwd,
            summary.asset_class_breakdown.len()
        );
        Ok(summary)
    }

    /// Exposure breakdown along one dimension
    ///
    /// # Arguments
    /// * `dimension` - `geography`, `currency` or `sector`
    #[instrument(skip(self))]
    pub async fn exposure(&self, dimension: &str) -> Result<ExposureBreakdown> {
        let path = format!("/portfolio/exposure/{}", dimension);
        self.get_json(&path, &[]).await
    }

    // ---- equities ----

    #[instrument(skip(self))]
    pub async fn list_equities(&self, page: u32, size: u32) -> Result<Paginated<EquityHolding>> {
        self.get_json("/holdings/equities", &page_query(page, size))
            .await
    }

    pub async fn get_equity(&self, id: &str) -> Result<EquityHolding> {
        self.get_json(&format!("/holdings/equities/{}", id), &[])
            .await
    }

    #[instrument(skip(self, input))]
    pub async fn create_equity(&self, input: &EquityInput) -> Result<EquityHolding> {
        self.send_json(reqwest::Method::POST, "/holdings/equities", input)
            .await
    }

    #[instrument(skip(self, input))]
    pub async fn update_equity(&self, id: &str, input: &EquityInput) -> Result<EquityHolding> {
        self.send_json(
            reqwest::Method::PUT,
            &format!("/holdings/equities/{}", id),
            input,
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn delete_equity(&self, id: &str) -> Result<()> {
        self.delete_path(&format!("/holdings/equities/{}", id)).await
    }

    // ---- fixed income ----

    #[instrument(skip(self))]
    pub async fn list_fixed_income(
        &self,
        page: u32,
        size: u32,
    ) -> Result<Paginated<FixedIncomeHolding>> {
        self.get_json("/holdings/fixed-income", &page_query(page, size))
            .await
    }

    pub async fn get_fixed_income(&self, id: &str) -> Result<FixedIncomeHolding> {
        self.get_json(&format!("/holdings/fixed-income/{}", id), &[])
            .await
    }

    #[instrument(skip(self, input))]
    pub async fn create_fixed_income(
        &self,
        input: &FixedIncomeInput,
    ) -> Result<FixedIncomeHolding> {
        self.send_json(reqwest::Method::POST, "/holdings/fixed-income", input)
            .await
    }

    #[instrument(skip(self, input))]
    pub async fn update_fixed_income(
        &self,
        id: &str,
        input: &FixedIncomeInput,
    ) -> Result<FixedIncomeHolding> {
        self.send_json(
            reqwest::Method::PUT,
            &format!("/holdings/fixed-income/{}", id),
            input,
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn delete_fixed_income(&self, id: &str) -> Result<()> {
        self.delete_path(&format!("/holdings/fixed-income/{}", id))
            .await
    }

    // ---- real estate ----

    #[instrument(skip(self))]
    pub async fn list_properties(&self, page: u32, size: u32) -> Result<Paginated<Property>> {
        self.get_json("/real-estate/properties", &page_query(page, size))
            .await
    }

    pub async fn get_property(&self, id: &str) -> Result<Property> {
        self.get_json(&format!("/real-estate/properties/{}", id), &[])
            .await
    }

    #[instrument(skip(self, input))]
    pub async fn create_property(&self, input: &PropertyInput) -> Result<Property> {
        self.send_json(reqwest::Method::POST, "/real-estate/properties", input)
            .await
    }

    #[instrument(skip(self, input))]
    pub async fn update_property(&self, id: &str, input: &PropertyInput) -> Result<Property> {
        self.send_json(
            reqwest::Method::PUT,
            &format!("/real-estate/properties/{}", id),
            input,
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn delete_property(&self, id: &str) -> Result<()> {
        self.delete_path(&format!("/real-estate/properties/{}", id))
            .await
    }

    /// Per-property occupancy and rent collection report
    #[instrument(skip(self))]
    pub async fn occupancy_report(&self) -> Result<Vec<OccupancyRow>> {
        let rows: Vec<OccupancyRow> = self.get_json("/real-estate/occupancy-report", &[]).await?;
        debug!("Occupancy report fetched: {} properties", rows.len());
        Ok(rows)
    }

    // ---- private funds ----

    #[instrument(skip(self))]
    pub async fn list_private_funds(&self, page: u32, size: u32) -> Result<Paginated<PrivateFund>> {
        self.get_json("/private-funds", &page_query(page, size))
            .await
    }

    pub async fn get_private_fund(&self, id: &str) -> Result<PrivateFund> {
        self.get_json(&format!("/private-funds/{}", id), &[]).await
    }

    #[instrument(skip(self, input))]
    pub async fn create_private_fund(&self, input: &PrivateFundInput) -> Result<PrivateFund> {
        self.send_json(reqwest::Method::POST, "/private-funds", input)
            .await
    }

    #[instrument(skip(self, input))]
    pub async fn update_private_fund(
        &self,
        id: &str,
        input: &PrivateFundInput,
    ) -> Result<PrivateFund> {
        self.send_json(
            reqwest::Method::PUT,
            &format!("/private-funds/{}", id),
            input,
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn delete_private_fund(&self, id: &str) -> Result<()> {
        self.delete_path(&format!("/private-funds/{}", id)).await
    }

    // ---- import & reports ----

    /// Upload a CSV for bulk import of one asset class
    #[instrument(skip(self, bytes))]
    pub async fn import_csv(
        &self,
        class: AssetClass,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<ImportOutcome> {
        let url = self.url(&format!("/import/{}", class.path_segment()));
        debug!("Uploading {} bytes to: {}", bytes.len(), url);

        let part = multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str("text/csv")
            .map_err(|e| Error::ImportError(e.to_string()))?;
        let form = multipart::Form::new().part("file", part);

        let response = self
            .http
            .post(&url)
            .bearer_auth(self.bearer()?)
            .multipart(form)
            .send()
            .await?;

        if let Some(err) = Self::check_auth_error(&response) {
            return Err(err);
        }

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            error!("Import failed: HTTP {} - {}", status, body);
            return Err(Error::ImportError(format!("HTTP {}: {}", status, body)));
        }

        let outcome: ImportOutcome = response.json().await.map_err(|e| {
            error!("Failed to parse import response: {}", e);
            Error::InvalidData(e.to_string())
        })?;

        debug!(
            "Import finished: created {}, {} row errors",
            outcome.created,
            outcome.errors.len()
        );
        Ok(outcome)
    }

    /// Download a generated PDF report as raw bytes
    ///
    /// # Arguments
    /// * `report_type` - `summary`, `equities`, `real-estate` or `private-funds`
    #[instrument(skip(self))]
    pub async fn report_pdf(&self, report_type: &str) -> Result<Vec<u8>> {
        let response = self
            .http
            .get(self.url("/reports/pdf"))
            .bearer_auth(self.bearer()?)
            .query(&[("report_type", report_type)])
            .send()
            .await?;

        if let Some(err) = Self::check_auth_error(&response) {
            return Err(err);
        }

        let response = response.error_for_status().map_err(|e| {
            error!("Report request failed: {}", e);
            Error::ApiError(e.to_string())
        })?;

        let bytes = response.bytes().await?;
        debug!("Report downloaded: {} bytes", bytes.len());
        Ok(bytes.to_vec())
    }
}

fn page_query(page: u32, size: u32) -> [(&'static str, String); 2] {
    [("page", page.to_string()), ("size", size.to_string())]
}
