//! Shared mock of the portfolio backend for shell tests

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub const GOOD_TOKEN: &str = "integration-token";

#[derive(Clone, Default)]
pub struct BackendOptions {
    /// Make the geography exposure endpoint fail with a 500
    pub geography_fails: bool,
    /// Reject every bearer token, including the good one
    pub reject_all_tokens: bool,
    /// Flip at runtime to start rejecting tokens mid-test
    pub reject_switch: Arc<AtomicBool>,
}

#[derive(Clone)]
struct Backend {
    options: BackendOptions,
}

fn authorized(headers: &HeaderMap, backend: &Backend) -> Result<(), StatusCode> {
    if backend.options.reject_all_tokens || backend.options.reject_switch.load(Ordering::SeqCst) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    let expected = format!("Bearer {}", GOOD_TOKEN);
    match headers.get(header::AUTHORIZATION) {
        Some(v) if v.to_str().unwrap_or_default() == expected => Ok(()),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

async fn login(Json(body): Json<serde_json::Value>) -> impl IntoResponse {
    if body["username"] == "mariam" && body["password"] == "secret" {
        Json(json!({ "access_token": GOOD_TOKEN, "token_type": "bearer" })).into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "Invalid username or password" })),
        )
            .into_response()
    }
}

async fn me(
    State(backend): State<Backend>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, StatusCode> {
    authorized(&headers, &backend)?;
    Ok(Json(json!({
        "id": "u1",
        "username": "mariam",
        "role": "cfo",
        "is_active": true
    })))
}

async fn logout() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn summary(
    State(backend): State<Backend>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, StatusCode> {
    authorized(&headers, &backend)?;
    Ok(Json(json!({
        "total_value_kwd": 12_500_000_000i64,
        "total_cost_basis_kwd": 10_000_000_000i64,
        "total_unrealized_gain_loss": 2_500_000_000i64,
        "asset_class_breakdown": [{
            "asset_class": "equities",
            "total_value_kwd": 12_500_000_000i64,
            "cost_basis_kwd": 10_000_000_000i64,
            "unrealized_gain_loss": 2_500_000_000i64,
            "holdings_count": 3
        }],
        "allocation": [],
        "equities_count": 3
    })))
}

async fn exposure(
    State(backend): State<Backend>,
    headers: HeaderMap,
    axum::extract::Path(dimension): axum::extract::Path<String>,
) -> Result<impl IntoResponse, StatusCode> {
    authorized(&headers, &backend)?;
    if dimension == "geography" && backend.options.geography_fails {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    Ok(Json(json!({
        "dimension": dimension,
        "items": [{ "category": "Kuwait", "value_kwd": 12_500_000_000i64, "percentage": 100.0 }]
    })))
}

async fn equities(
    State(backend): State<Backend>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, StatusCode> {
    authorized(&headers, &backend)?;
    let item = |id: &str, ticker: &str, name: &str| {
        json!({
            "id": id,
            "ticker": ticker,
            "name": name,
            "exchange": "Boursa Kuwait",
            "quantity": 100,
            "cost_basis_amount": 50_000,
            "cost_basis_currency": "KWD",
            "status": "open"
        })
    };
    Ok(Json(json!({
        "items": [
            item("eq1", "NBK", "National Bank of Kuwait"),
            item("eq2", "ZAIN", "Zain Group"),
            item("eq3", "AGLTY", "Agility Logistics"),
        ],
        "total": 3,
        "page": 1,
        "size": 50,
        "pages": 1
    })))
}

async fn delete_equity(
    State(backend): State<Backend>,
    headers: HeaderMap,
) -> Result<StatusCode, StatusCode> {
    authorized(&headers, &backend)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn report_pdf(
    State(backend): State<Backend>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, StatusCode> {
    authorized(&headers, &backend)?;
    Ok((
        [(header::CONTENT_TYPE, "application/pdf")],
        b"%PDF-1.4 mock report".to_vec(),
    ))
}

/// Spawn the mock backend, returning its API base URL
pub async fn spawn_backend(options: BackendOptions) -> String {
    let backend = Backend { options };
    let router = Router::new()
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/auth/me", get(me))
        .route("/api/v1/auth/logout", post(logout))
        .route("/api/v1/portfolio/summary", get(summary))
        .route("/api/v1/portfolio/exposure/{dimension}", get(exposure))
        .route("/api/v1/holdings/equities", get(equities))
        .route("/api/v1/holdings/equities/{id}", delete(delete_equity))
        .route("/api/v1/reports/pdf", get(report_pdf))
        .with_state(backend);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/api/v1", addr)
}
