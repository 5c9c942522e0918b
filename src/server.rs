//! HTTP server: application state, routes and handlers
//!
//! Three JSON endpoints (ingest, plan, chapter) plus the static pages and a
//! health check. Handlers are stateless request/response functions; the only
//! shared state is the ingestor, the tutorial generator and the start time.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, Json as ResponseJson},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use crate::api::{ChapterRequest, ChapterResponse, GithubRequest, HealthResponse, PlanRequest, PlanResponse};
use crate::config::Config;
use crate::error::{Result, ServiceError};
use crate::ingest::RepoIngestor;
use crate::llm::ChatClient;
use crate::tutorial::TutorialGenerator;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    service: Arc<AppService>,
}

/// Holds the clients the handlers delegate to
pub struct AppService {
    ingestor: RepoIngestor,
    /// Absent when no LLM API key is configured; tutorial endpoints then
    /// answer with a configuration error instead of failing at startup
    generator: Option<TutorialGenerator>,
    start_time: DateTime<Utc>,
}

impl AppService {
    /// Builds the service from configuration
    pub fn new(config: &Config) -> Result<Self> {
        let ingestor = RepoIngestor::new(config)?;
        let generator = match ChatClient::new(config) {
            Ok(client) => Some(TutorialGenerator::new(client, config.limits.clone())),
            Err(e) => {
                info!("Tutorial generation disabled: {}", e);
                None
            }
        };

        Ok(Self { ingestor, generator, start_time: Utc::now() })
    }

    fn generator(&self) -> Result<&TutorialGenerator> {
        self.generator
            .as_ref()
            .ok_or_else(|| ServiceError::Config("GROQ_API_KEY not configured".into()))
    }
}

/// Create the main application with all routes
pub fn create_app(config: &Config) -> Result<Router> {
    let state = AppState { service: Arc::new(AppService::new(config)?) };

    let app = Router::new()
        // Static pages
        .route("/", get(index))
        .route("/signin", get(signin))
        // Health
        .route("/health", get(health_check))
        // API endpoints
        .route("/api/github", post(ingest_repository))
        .route("/api/tutorial/plan", post(plan_tutorial))
        .route("/api/tutorial/chapter", post(generate_chapter))
        // Middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

/// Landing/application page
async fn index() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

/// Sign-in page (presentational only)
async fn signin() -> Html<&'static str> {
    Html(include_str!("../static/signin.html"))
}

/// Health check endpoint
async fn health_check(State(state): State<AppState>) -> ResponseJson<HealthResponse> {
    let uptime = (Utc::now() - state.service.start_time).num_seconds().max(0) as u64;
    ResponseJson(HealthResponse {
        service: "repotutor".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        status: "healthy".to_string(),
        timestamp: Utc::now(),
        uptime,
    })
}

/// Ingest a repository endpoint
async fn ingest_repository(
    State(state): State<AppState>,
    Json(request): Json<GithubRequest>,
) -> std::result::Result<ResponseJson<Value>, (StatusCode, ResponseJson<Value>)> {
    info!("Ingesting repository: {}", request.repo_url);

    match state.service.ingestor.ingest(&request.repo_url).await {
        Ok(repo_map) => Ok(ResponseJson(json!(repo_map))),
        Err(e) => {
            error!("Repository ingestion failed: {}", e);
            Err(error_response(&e))
        }
    }
}

/// Plan tutorial chapters endpoint
async fn plan_tutorial(
    State(state): State<AppState>,
    Json(request): Json<PlanRequest>,
) -> std::result::Result<ResponseJson<Value>, (StatusCode, ResponseJson<Value>)> {
    let Some(repo_data) = request.repo_data else {
        return Err((StatusCode::BAD_REQUEST, ResponseJson(json!({ "error": "Missing repo data" }))));
    };

    let generator = state.service.generator().map_err(|e| error_response(&e))?;
    match generator.plan(&repo_data).await {
        Ok(chapters) => Ok(ResponseJson(json!(PlanResponse { chapters }))),
        Err(e) => {
            error!("Chapter planning failed: {}", e);
            Err(error_response(&e))
        }
    }
}

/// Generate a single chapter endpoint
async fn generate_chapter(
    State(state): State<AppState>,
    Json(request): Json<ChapterRequest>,
) -> std::result::Result<ResponseJson<Value>, (StatusCode, ResponseJson<Value>)> {
    let (Some(chapter), Some(repo_data)) = (request.chapter, request.repo_data) else {
        return Err((
            StatusCode::BAD_REQUEST,
            ResponseJson(json!({ "error": "Missing chapter or repo data" })),
        ));
    };

    let generator = state.service.generator().map_err(|e| error_response(&e))?;
    match generator.chapter(&chapter, &repo_data).await {
        Ok(content) => Ok(ResponseJson(json!(ChapterResponse { content }))),
        Err(e) => {
            error!("Chapter generation failed: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                ResponseJson(json!({ "error": "Chapter generation failed", "message": e.to_string() })),
            ))
        }
    }
}

/// Maps a service error to an HTTP status and JSON error body
fn error_response(error: &ServiceError) -> (StatusCode, ResponseJson<Value>) {
    let status = match error {
        ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
        ServiceError::GitHubApi(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let message = match error {
        ServiceError::Validation(msg)
        | ServiceError::GitHubApi(msg)
        | ServiceError::Llm(msg)
        | ServiceError::Config(msg)
        | ServiceError::Message(msg) => msg.clone(),
        other => other.to_string(),
    };

    (status, ResponseJson(json!({ "error": message })))
}
