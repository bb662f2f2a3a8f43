use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use serde_json::json;
use tracing::{error, info};

use crate::dashboard::{DashboardView, EditView};
use crate::form::FormData;
use crate::handler::update_program_from_form;
use crate::manager::FileProgramManager;
use crate::persistence::PersistenceError;
use crate::program::local_now;

/// Shared per-process state. The manager holds no program between requests,
/// so two edits submitted at once race and the later write wins.
#[derive(Clone)]
pub struct AppState {
    manager: Arc<FileProgramManager>,
}

impl AppState {
    pub fn new(manager: FileProgramManager) -> Self {
        Self {
            manager: Arc::new(manager),
        }
    }

    fn manager(&self) -> &FileProgramManager {
        &self.manager
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

#[derive(Debug, Serialize)]
struct EditResponse {
    message: &'static str,
    dashboard: DashboardView,
}

#[derive(Debug)]
enum ApiError {
    LoadFailed(String),
    SaveFailed(String),
}

impl From<PersistenceError> for ApiError {
    fn from(value: PersistenceError) -> Self {
        ApiError::LoadFailed(value.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::LoadFailed(message) => {
                error!("loading program failed: {message}");
                let body = Json(ErrorBody {
                    error: "load_failed",
                    message,
                });
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
            ApiError::SaveFailed(message) => {
                error!("saving program failed: {message}");
                let body = Json(ErrorBody {
                    error: "save_failed",
                    message: "Saving failed: check the log file.".to_string(),
                });
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}

/// `POST /edit` performs no authentication. Anything that exposes the router
/// beyond the local host needs an authenticating layer or proxy in front.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/dashboard", get(dashboard))
        .route("/program", get(edit_view))
        .route("/edit", post(edit))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, manager: FileProgramManager) -> std::io::Result<()> {
    let app = router(AppState::new(manager));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("dashboard listening on http://{addr}");
    axum::serve(listener, app).await
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn dashboard(State(state): State<AppState>) -> Result<Json<DashboardView>, ApiError> {
    let program = state.manager().load_program()?;
    Ok(Json(DashboardView::build(&program, local_now())))
}

async fn edit_view(State(state): State<AppState>) -> Result<Json<EditView>, ApiError> {
    let program = state.manager().load_program()?;
    Ok(Json(EditView::from_program(&program)))
}

async fn edit(State(state): State<AppState>, body: String) -> Result<Json<EditResponse>, ApiError> {
    let manager = state.manager();
    let program = manager.load_program()?;
    let form = FormData::from_urlencoded(&body);
    let updated = update_program_from_form(manager, program, &form)
        .map_err(|err| ApiError::SaveFailed(err.to_string()))?;
    Ok(Json(EditResponse {
        message: "Changes saved.",
        dashboard: DashboardView::build(&updated, local_now()),
    }))
}
