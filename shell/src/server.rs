//! Embedded HTTP server behind the single-page UI
//!
//! Serves the static shell plus a local API that fronts the portfolio
//! backend. Every protected route goes through the session layer; a 401
//! from the backend invalidates the session exactly once and surfaces
//! to the page as a forced logout.

use crate::session::SessionManager;
use crate::views::{self, dashboard, equities, fixed_income, private_funds, real_estate};
use crate::AppState;
use axum::{
    extract::{Path, Query, State as AxumState},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{Html, IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use folio_core::{imports, imports::AssetClass, Error, Paginated};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::error;

const REPORT_TYPES: [&str; 4] = ["summary", "equities", "real-estate", "private-funds"];

/// Shared state for the shell server
#[derive(Clone)]
pub struct ShellState {
    pub app: AppState,
    pub sessions: Arc<SessionManager>,
    pub delete_gate: Arc<views::DeleteGate>,
}

impl ShellState {
    pub fn new(app: AppState, sessions: Arc<SessionManager>) -> Self {
        Self {
            app,
            sessions,
            delete_gate: Arc::new(views::DeleteGate::new()),
        }
    }
}

/// Build the axum router with all routes and middleware
pub fn build_router(state: ShellState) -> Router {
    let public_routes = Router::new()
        .route("/", get(serve_shell))
        .route("/app.js", get(serve_shell_js))
        .route("/favicon.ico", get(serve_favicon))
        .route("/api/auth/login", post(handle_login))
        .route("/api/auth/session", get(handle_session_check));

    let protected_routes = Router::new()
        .route("/api/auth/logout", post(handle_logout))
        .route("/api/dashboard", get(handle_dashboard))
        .route("/api/views/{class}", get(handle_list).post(handle_create))
        .route(
            "/api/views/{class}/{id}",
            put(handle_update).delete(handle_delete),
        )
        .route(
            "/api/views/{class}/{id}/delete-request",
            post(handle_delete_request),
        )
        .route(
            "/api/views/{class}/{id}/delete-cancel",
            post(handle_delete_cancel),
        )
        .route("/api/real-estate/occupancy", get(handle_occupancy))
        .route("/api/import/{class}/template", get(handle_import_template))
        .route("/api/import/{class}/preview", post(handle_import_preview))
        .route("/api/import/{class}/upload", post(handle_import_upload))
        .route("/api/reports/{report_type}", get(handle_report))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ---- middleware ----

/// Reject protected requests when no session is active
async fn session_middleware(
    AxumState(state): AxumState<ShellState>,
    req: axum::extract::Request,
    next: Next,
) -> Result<Response, StatusCode> {
    if state.sessions.is_authenticated().await {
        return Ok(next.run(req).await);
    }
    Ok((
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "Not authenticated" })),
    )
        .into_response())
}

/// Map a client error onto an HTTP response, tearing down the session
/// when the backend rejected the token
async fn api_error(state: &ShellState, err: Error) -> Response {
    match err {
        Error::SessionExpired => {
            state.sessions.invalidate().await;
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Session expired", "session_expired": true })),
            )
                .into_response()
        }
        Error::AuthenticationError(msg) => {
            (StatusCode::UNAUTHORIZED, Json(json!({ "error": msg }))).into_response()
        }
        Error::InvalidData(msg) | Error::ImportError(msg) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": msg })),
        )
            .into_response(),
        Error::ApiError(msg) | Error::NetworkError(msg) => {
            error!("Backend request failed: {}", msg);
            (StatusCode::BAD_GATEWAY, Json(json!({ "error": msg }))).into_response()
        }
        other => {
            error!("Internal error: {}", other);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": other.to_string() })),
            )
                .into_response()
        }
    }
}

fn parse_class(segment: &str) -> Result<AssetClass, Response> {
    AssetClass::from_segment(segment).ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("Unknown asset class '{}'", segment) })),
        )
            .into_response()
    })
}

// ---- auth ----

#[derive(Deserialize)]
struct LoginBody {
    username: String,
    password: String,
}

/// POST /api/auth/login
async fn handle_login(
    AxumState(state): AxumState<ShellState>,
    Json(body): Json<LoginBody>,
) -> Response {
    match state.sessions.login(&body.username, &body.password).await {
        Ok(user) => Json(json!({ "authenticated": true, "user": user })).into_response(),
        Err(e) => api_error(&state, e).await,
    }
}

/// GET /api/auth/session — restore from the persisted token if possible
async fn handle_session_check(AxumState(state): AxumState<ShellState>) -> Response {
    match state.sessions.check_session().await {
        Ok(Some(user)) => Json(json!({ "authenticated": true, "user": user })).into_response(),
        Ok(None) => Json(json!({ "authenticated": false })).into_response(),
        Err(e) => api_error(&state, e).await,
    }
}

/// POST /api/auth/logout
async fn handle_logout(AxumState(state): AxumState<ShellState>) -> Response {
    state.sessions.logout().await;
    Json(json!({ "authenticated": false })).into_response()
}

// ---- dashboard ----

/// GET /api/dashboard — summary plus exposure widgets
async fn handle_dashboard(AxumState(state): AxumState<ShellState>) -> Response {
    let client = match state.sessions.client().await {
        Ok(client) => client,
        Err(e) => return api_error(&state, e).await,
    };

    match dashboard::load(&client).await {
        Ok(data) => Json(data).into_response(),
        Err(e) => api_error(&state, e).await,
    }
}

// ---- list views ----

fn page_json<T: Serialize>(
    page: Paginated<T>,
    search: &str,
    matcher: impl Fn(&T, &str) -> bool,
) -> Response {
    Json(views::FilteredPage::from_page(page, search, matcher)).into_response()
}

/// GET /api/views/{class} — one page, search filter applied
async fn handle_list(
    AxumState(state): AxumState<ShellState>,
    Path(class): Path<String>,
    Query(query): Query<views::ListQuery>,
) -> Response {
    let class = match parse_class(&class) {
        Ok(class) => class,
        Err(resp) => return resp,
    };
    let client = match state.sessions.client().await {
        Ok(client) => client,
        Err(e) => return api_error(&state, e).await,
    };

    let result = match class {
        AssetClass::Equities => client
            .list_equities(query.page, query.size)
            .await
            .map(|page| page_json(page, &query.search, equities::matches)),
        AssetClass::FixedIncome => client
            .list_fixed_income(query.page, query.size)
            .await
            .map(|page| page_json(page, &query.search, fixed_income::matches)),
        AssetClass::RealEstate => client
            .list_properties(query.page, query.size)
            .await
            .map(|page| page_json(page, &query.search, real_estate::matches)),
        AssetClass::PrivateFunds => client
            .list_private_funds(query.page, query.size)
            .await
            .map(|page| page_json(page, &query.search, private_funds::matches)),
    };

    match result {
        Ok(response) => response,
        Err(e) => api_error(&state, e).await,
    }
}

/// Parse the raw form body for one class and run the create/update call
async fn save_record(
    state: &ShellState,
    class: AssetClass,
    id: Option<&str>,
    body: serde_json::Value,
) -> Result<serde_json::Value, Error> {
    let client = state.sessions.client().await?;

    let from_value =
        |e: serde_json::Error| Error::InvalidData(format!("Invalid form payload: {}", e));

    match class {
        AssetClass::Equities => {
            let form: equities::EquityForm = serde_json::from_value(body).map_err(from_value)?;
            let input = form.into_input()?;
            let saved = match id {
                Some(id) => client.update_equity(id, &input).await?,
                None => client.create_equity(&input).await?,
            };
            serde_json::to_value(saved).map_err(Error::from)
        }
        AssetClass::FixedIncome => {
            let form: fixed_income::FixedIncomeForm =
                serde_json::from_value(body).map_err(from_value)?;
            let input = form.into_input()?;
            let saved = match id {
                Some(id) => client.update_fixed_income(id, &input).await?,
                None => client.create_fixed_income(&input).await?,
            };
            serde_json::to_value(saved).map_err(Error::from)
        }
        AssetClass::RealEstate => {
            let form: real_estate::PropertyForm =
                serde_json::from_value(body).map_err(from_value)?;
            let input = form.into_input()?;
            let saved = match id {
                Some(id) => client.update_property(id, &input).await?,
                None => client.create_property(&input).await?,
            };
            serde_json::to_value(saved).map_err(Error::from)
        }
        AssetClass::PrivateFunds => {
            let form: private_funds::PrivateFundForm =
                serde_json::from_value(body).map_err(from_value)?;
            let input = form.into_input()?;
            let saved = match id {
                Some(id) => client.update_private_fund(id, &input).await?,
                None => client.create_private_fund(&input).await?,
            };
            serde_json::to_value(saved).map_err(Error::from)
        }
    }
}

/// POST /api/views/{class}
async fn handle_create(
    AxumState(state): AxumState<ShellState>,
    Path(class): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> Response {
    let class = match parse_class(&class) {
        Ok(class) => class,
        Err(resp) => return resp,
    };
    match save_record(&state, class, None, body).await {
        Ok(saved) => (StatusCode::CREATED, Json(saved)).into_response(),
        Err(e) => api_error(&state, e).await,
    }
}

/// PUT /api/views/{class}/{id}
async fn handle_update(
    AxumState(state): AxumState<ShellState>,
    Path((class, id)): Path<(String, String)>,
    Json(body): Json<serde_json::Value>,
) -> Response {
    let class = match parse_class(&class) {
        Ok(class) => class,
        Err(resp) => return resp,
    };
    match save_record(&state, class, Some(&id), body).await {
        Ok(saved) => Json(saved).into_response(),
        Err(e) => api_error(&state, e).await,
    }
}

// ---- delete confirmation flow ----

/// POST /api/views/{class}/{id}/delete-request — first step
async fn handle_delete_request(
    AxumState(state): AxumState<ShellState>,
    Path((class, id)): Path<(String, String)>,
) -> Response {
    let class = match parse_class(&class) {
        Ok(class) => class,
        Err(resp) => return resp,
    };
    let token = state.delete_gate.request(class.path_segment(), &id).await;
    Json(json!({ "confirm_token": token })).into_response()
}

/// POST /api/views/{class}/{id}/delete-cancel
async fn handle_delete_cancel(
    AxumState(state): AxumState<ShellState>,
    Path((class, id)): Path<(String, String)>,
) -> Response {
    let class = match parse_class(&class) {
        Ok(class) => class,
        Err(resp) => return resp,
    };
    state.delete_gate.cancel(class.path_segment(), &id).await;
    StatusCode::NO_CONTENT.into_response()
}

#[derive(Deserialize, Default)]
struct ConfirmQuery {
    #[serde(default)]
    confirm: String,
}

/// DELETE /api/views/{class}/{id} — requires the confirmation token
async fn handle_delete(
    AxumState(state): AxumState<ShellState>,
    Path((class, id)): Path<(String, String)>,
    Query(query): Query<ConfirmQuery>,
) -> Response {
    let class = match parse_class(&class) {
        Ok(class) => class,
        Err(resp) => return resp,
    };

    if !state
        .delete_gate
        .confirm(class.path_segment(), &id, &query.confirm)
        .await
    {
        return (
            StatusCode::CONFLICT,
            Json(json!({ "error": "Delete was not confirmed" })),
        )
            .into_response();
    }

    let client = match state.sessions.client().await {
        Ok(client) => client,
        Err(e) => return api_error(&state, e).await,
    };

    let result = match class {
        AssetClass::Equities => client.delete_equity(&id).await,
        AssetClass::FixedIncome => client.delete_fixed_income(&id).await,
        AssetClass::RealEstate => client.delete_property(&id).await,
        AssetClass::PrivateFunds => client.delete_private_fund(&id).await,
    };

    match result {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => api_error(&state, e).await,
    }
}

// ---- real estate occupancy ----

/// GET /api/real-estate/occupancy — per-property rows plus totals
async fn handle_occupancy(AxumState(state): AxumState<ShellState>) -> Response {
    let client = match state.sessions.client().await {
        Ok(client) => client,
        Err(e) => return api_error(&state, e).await,
    };

    match client.occupancy_report().await {
        Ok(rows) => {
            let summary = real_estate::OccupancySummary::from_rows(&rows);
            Json(json!({ "rows": rows, "summary": summary })).into_response()
        }
        Err(e) => api_error(&state, e).await,
    }
}

// ---- import ----

/// GET /api/import/{class}/template — downloadable header-row CSV
async fn handle_import_template(Path(class): Path<String>) -> Response {
    let class = match parse_class(&class) {
        Ok(class) => class,
        Err(resp) => return resp,
    };

    let filename = format!("{}_import_template.csv", class.path_segment());
    (
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        imports::template_csv(class),
    )
        .into_response()
}

/// POST /api/import/{class}/preview — parse raw CSV text, no upload
async fn handle_import_preview(
    AxumState(state): AxumState<ShellState>,
    Path(class): Path<String>,
    body: String,
) -> Response {
    if let Err(resp) = parse_class(&class) {
        return resp;
    }

    match imports::parse_preview(&body) {
        Ok(preview) => Json(preview).into_response(),
        Err(e) => api_error(&state, e).await,
    }
}

#[derive(Deserialize)]
struct UploadBody {
    file_name: String,
    content: String,
}

/// POST /api/import/{class}/upload — re-validate, then send to the backend
async fn handle_import_upload(
    AxumState(state): AxumState<ShellState>,
    Path(class): Path<String>,
    Json(body): Json<UploadBody>,
) -> Response {
    let class = match parse_class(&class) {
        Ok(class) => class,
        Err(resp) => return resp,
    };

    // A file that fails the preview never leaves the shell
    if let Err(e) = imports::parse_preview(&body.content) {
        return api_error(&state, e).await;
    }

    let client = match state.sessions.client().await {
        Ok(client) => client,
        Err(e) => return api_error(&state, e).await,
    };

    match client
        .import_csv(class, &body.file_name, body.content.into_bytes())
        .await
    {
        Ok(outcome) => Json(outcome).into_response(),
        Err(e) => api_error(&state, e).await,
    }
}

// ---- reports ----

/// GET /api/reports/{report_type} — PDF passthrough with download headers
async fn handle_report(
    AxumState(state): AxumState<ShellState>,
    Path(report_type): Path<String>,
) -> Response {
    if !REPORT_TYPES.contains(&report_type.as_str()) {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("Unknown report type '{}'", report_type) })),
        )
            .into_response();
    }

    let client = match state.sessions.client().await {
        Ok(client) => client,
        Err(e) => return api_error(&state, e).await,
    };

    match client.report_pdf(&report_type).await {
        Ok(bytes) => (
            [
                (header::CONTENT_TYPE, "application/pdf".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!(
                        "attachment; filename=\"portfolio_report_{}.pdf\"",
                        report_type
                    ),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => api_error(&state, e).await,
    }
}

// ---- static shell ----

/// Serve the single-page shell
async fn serve_shell() -> impl IntoResponse {
    Html(include_str!("assets/dashboard.html"))
}

/// Serve the shell JavaScript
async fn serve_shell_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript")],
        include_str!("assets/app.js"),
    )
}

/// Serve favicon
async fn serve_favicon() -> impl IntoResponse {
    StatusCode::NO_CONTENT
}
