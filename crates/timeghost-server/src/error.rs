//! Error types for the Timeghost HTTP layer.
//!
//! [`WebError`] covers request-time failures and converts into an Axum
//! response carrying a JSON `{"error", "status"}` body. [`StartupError`]
//! covers building the shared state before the server binds.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use timeghost_catalog::CatalogError;
use timeghost_core::SelectError;

use crate::pages::TemplateError;

/// Errors that can occur while handling a request.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    /// A path or form field named an event that is not in the catalog.
    #[error("unknown event: {0}")]
    UnknownEvent(String),

    /// The selector gave up without a valid triple.
    #[error("could not find a valid pairing: {0}")]
    NoTimeghost(#[from] SelectError),

    /// An invalid query parameter was provided.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// A page template failed to render.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// Any other catalog failure.
    #[error("catalog error: {0}")]
    Catalog(CatalogError),
}

impl From<CatalogError> for WebError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::UnknownEvent(slug) => Self::UnknownEvent(slug),
            other => Self::Catalog(other),
        }
    }
}

impl WebError {
    /// The HTTP status this error maps to.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::UnknownEvent(_) => StatusCode::NOT_FOUND,
            Self::NoTimeghost(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            Self::Template(_) | Self::Catalog(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Errors that can occur while building the application state.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// The event catalog could not be loaded.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The page templates could not be loaded.
    #[error(transparent)]
    Template(#[from] TemplateError),
}
