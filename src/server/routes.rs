use super::assets::INDEX_HTML;
use super::session::{SessionError, SessionHandle};
use crate::assets::AssetTicket;
use crate::interaction::{Event, ViewerError};
use crate::model::Generation;
use crate::style;
use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Application state shared across handlers
pub struct AppState {
    pub session: SessionHandle,
}

#[derive(Debug, Clone)]
pub struct ServeOptions {
    pub host: String,
    pub port: u16,
    pub open_browser: bool,
}

#[derive(Debug, Deserialize)]
struct ScopeQuery {
    name: String,
}

#[derive(Debug, Deserialize)]
struct AssetQuery {
    name: String,
    generation: u64,
}

#[derive(Debug, Deserialize)]
struct LayoutBody {
    zoom: f64,
}

#[derive(Debug, Deserialize)]
struct AnimationBody {
    enabled: bool,
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let status = match &self {
            SessionError::Viewer(ViewerError::Format(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            SessionError::Viewer(ViewerError::UnknownNode(_)) => StatusCode::NOT_FOUND,
            SessionError::Closed => StatusCode::SERVICE_UNAVAILABLE,
        };
        let body = serde_json::json!({ "error": self.to_string() });
        (status, Json(body)).into_response()
    }
}

pub fn router(session: SessionHandle) -> Router {
    let state = Arc::new(AppState { session });

    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/api/scope", post(scope_handler))
        .route("/api/assets", post(asset_handler))
        .route("/api/tap/node/{id}", post(tap_node_handler))
        .route("/api/tap/background", post(tap_background_handler))
        .route("/api/layout-complete", post(layout_handler))
        .route("/api/animation", post(animation_handler))
        .route("/api/updates", get(updates_handler))
        .route("/api/sync", get(sync_handler))
        .layer(cors)
        .with_state(state)
}

/// Start the HTTP server for the viewer session
pub async fn serve(session: SessionHandle, options: ServeOptions) -> std::io::Result<()> {
    let app = router(session);

    let addr = format!("{}:{}", options.host, options.port);
    let url = format!("http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "viewer listening");

    style::header("Scope viewer running");
    style::status(&format!("Open in browser: {}", style::url(&url)));
    style::hint("Press Ctrl+C to stop");

    if options.open_browser {
        if let Err(e) = open::that(&url) {
            style::warning(&format!("Could not open browser: {}", e));
        }
    }

    axum::serve(listener, app).await
}

async fn index_handler() -> impl IntoResponse {
    Html(INDEX_HTML)
}

async fn scope_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ScopeQuery>,
    body: String,
) -> Response {
    let event = Event::ScopeFileReady {
        filename: query.name,
        content: body,
    };
    respond(state.session.dispatch(event).await)
}

/// The browser reads depiction files itself and posts each one with the
/// generation that was active when its read started.
async fn asset_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AssetQuery>,
    body: Bytes,
) -> Response {
    let ticket = AssetTicket::new(Generation::new(query.generation), query.name);
    let event = Event::AssetFileReady {
        ticket,
        content: body.to_vec(),
    };
    respond(state.session.dispatch(event).await)
}

async fn tap_node_handler(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Response {
    respond(state.session.dispatch(Event::TapNode { id }).await)
}

async fn tap_background_handler(State(state): State<Arc<AppState>>) -> Response {
    respond(state.session.dispatch(Event::TapBackground).await)
}

async fn layout_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LayoutBody>,
) -> Response {
    let event = Event::LayoutComplete { zoom: body.zoom };
    respond(state.session.dispatch(event).await)
}

async fn animation_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AnimationBody>,
) -> Response {
    respond(state.session.set_animation(body.enabled).await)
}

async fn updates_handler(State(state): State<Arc<AppState>>) -> Response {
    respond(state.session.poll().await)
}

/// Called once by each page load, so a refreshed or late browser still gets
/// the scope that is already active.
async fn sync_handler(State(state): State<Arc<AppState>>) -> Response {
    respond(state.session.sync().await)
}

fn respond<T: serde::Serialize>(result: Result<T, SessionError>) -> Response {
    match result {
        Ok(body) => Json(body).into_response(),
        Err(e) => e.into_response(),
    }
}
