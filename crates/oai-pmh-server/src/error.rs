//! Errors surfaced by the HTTP layer.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use crate::xml::RenderError;

/// Failures that prevent a protocol response from being produced.
///
/// Protocol errors never end up here: they are rendered into a normal
/// `200` document.
#[derive(Debug, Error)]
pub enum ServerError {
    /// No data source is registered under the requested name.
    #[error("unknown source '{0}'")]
    UnknownSource(String),

    /// The data provider failed while answering the request.
    #[error("provider fault: {0}")]
    Engine(#[from] oai_pmh_core::Error),

    /// The response document could not be produced.
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        match self {
            ServerError::UnknownSource(_) => (StatusCode::NOT_FOUND, "Not Found").into_response(),
            err => {
                error!(error = %err, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}
