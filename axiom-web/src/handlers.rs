//! API request handlers

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use axiom_core::{DashboardController, DashboardView, FilterCategory, Phase};

/// Shared application state
pub struct AppState {
    pub dashboard: Mutex<DashboardController>,
}

impl AppState {
    pub fn new(dashboard: DashboardController) -> Arc<Self> {
        Arc::new(Self {
            dashboard: Mutex::new(dashboard),
        })
    }

    /// Refresh without holding the lock during the fetch.
    ///
    /// Overlapping refreshes are not coordinated: whichever fetch completes
    /// last decides the loaded set. A fetch still in flight at logout is
    /// dropped.
    async fn refresh(&self) {
        let pending = {
            let mut dashboard = self.dashboard.lock().await;
            dashboard.begin_refresh()
        };

        let result = pending.fetch().await;

        let mut dashboard = self.dashboard.lock().await;
        if !dashboard.complete_refresh(&pending, result) {
            info!("Refresh finished after logout, result dropped");
        }
    }

    /// Restore from cache or fetch when the dashboard has not been loaded yet
    async fn ensure_mounted(&self) {
        {
            let mut dashboard = self.dashboard.lock().await;
            if dashboard.phase() != &Phase::Idle || dashboard.load_cached() {
                return;
            }
        }
        self.refresh().await;
    }
}

/// Dashboard query parameters
#[derive(Debug, Deserialize)]
pub struct DashboardParams {
    /// all | frustrated | not-frustrated
    pub filter: Option<String>,
    /// Search text
    pub q: Option<String>,
}

/// Logout response
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "axiom-web",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Current view, applying `filter` and `q` when given
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DashboardParams>,
) -> Result<Json<DashboardView>, ApiError> {
    let filter = params
        .filter
        .as_deref()
        .map(str::parse::<FilterCategory>)
        .transpose()
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, e))?;

    state.ensure_mounted().await;

    let mut dashboard = state.dashboard.lock().await;
    if let Some(filter) = filter {
        dashboard.set_filter(filter);
    }
    if let Some(q) = params.q {
        dashboard.set_query(q);
    }

    let view = dashboard.view();
    debug!(
        "Dashboard view: {} of {} emails (filter={}, query={:?})",
        view.emails.len(),
        view.stats.total,
        view.filter,
        view.query
    );
    Ok(Json(view))
}

/// Re-fetch from the analysis backend
///
/// Answers 200 even when the fetch failed; the view's `error` says why.
pub async fn refresh_dashboard(State(state): State<Arc<AppState>>) -> Json<DashboardView> {
    info!("Refresh requested");
    state.refresh().await;

    let dashboard = state.dashboard.lock().await;
    Json(dashboard.view())
}

/// Clear the cached emails
pub async fn logout(
    State(state): State<Arc<AppState>>,
) -> Result<Json<LogoutResponse>, ApiError> {
    let mut dashboard = state.dashboard.lock().await;
    dashboard.logout().map_err(|e| {
        error!("Logout failed: {}", e);
        api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;

    Ok(Json(LogoutResponse { success: true }))
}
