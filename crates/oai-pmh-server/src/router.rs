//! HTTP routes.
//!
//! - `GET /` redirects to the default source
//! - `GET /{source}/` redirects to the source's Identify request
//! - `GET|POST /{source}/oai` answers protocol requests
//! - `GET /healthz` reports liveness

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{OriginalUri, Path, RawQuery, State};
use axum::http::{HeaderMap, Uri, header};
use axum::Router;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use tower_http::trace::TraceLayer;
use tracing::debug;

use oai_pmh_core::RequestParams;

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::registry::{DEFAULT_SOURCE, SourceRegistry};
use crate::xml;

/// Content type of every protocol response.
pub const XML_CONTENT_TYPE: &str = "text/xml; charset=utf-8";

/// State shared by all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub registry: Arc<SourceRegistry>,
}

impl AppState {
    pub fn new(config: ServerConfig, registry: SourceRegistry) -> Self {
        Self {
            config: Arc::new(config),
            registry: Arc::new(registry),
        }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(redirect_root))
        .route("/healthz", get(health))
        .route("/:source/", get(redirect_source))
        .route("/:source/oai", get(oai_get).post(oai_post))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Redirects
// ============================================================================

async fn redirect_root() -> Redirect {
    Redirect::to(&format!("/{DEFAULT_SOURCE}/"))
}

async fn redirect_source(
    State(state): State<AppState>,
    Path(source): Path<String>,
) -> Result<Redirect, ServerError> {
    if source == "favicon.ico" || state.registry.get(&source).is_none() {
        return Err(ServerError::UnknownSource(source));
    }
    Ok(Redirect::to(&format!("/{source}/oai?verb=Identify")))
}

async fn health() -> &'static str {
    "ok"
}

// ============================================================================
// Protocol endpoint
// ============================================================================

async fn oai_get(
    State(state): State<AppState>,
    Path(source): Path<String>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Result<Response, ServerError> {
    let params = parse_params(query.as_deref().unwrap_or_default().as_bytes());
    answer(&state, &source, &uri, &headers, params).await
}

async fn oai_post(
    State(state): State<AppState>,
    Path(source): Path<String>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ServerError> {
    let params = parse_params(&body);
    answer(&state, &source, &uri, &headers, params).await
}

/// Decode `application/x-www-form-urlencoded` pairs, keeping repeats.
fn parse_params(input: &[u8]) -> RequestParams {
    url::form_urlencoded::parse(input).collect()
}

async fn answer(
    state: &AppState,
    source: &str,
    uri: &Uri,
    headers: &HeaderMap,
    params: RequestParams,
) -> Result<Response, ServerError> {
    let provider = state
        .registry
        .get(source)
        .ok_or_else(|| ServerError::UnknownSource(source.to_string()))?;

    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok());
    let base_url = state.config.base_url(source, host, uri.path());
    debug!(%source, %base_url, "Dispatching request");

    let envelope = oai_pmh_core::respond(provider.as_ref(), &base_url, &params).await?;
    if let Err(err) = &envelope.outcome {
        debug!(%source, code = %err.code, message = %err.message, "Protocol error");
    }

    let body = xml::render(&envelope, provider.granularity())?;
    Ok(([(header::CONTENT_TYPE, XML_CONTENT_TYPE)], body).into_response())
}
