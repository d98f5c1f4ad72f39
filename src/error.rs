use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

/// Startup-time configuration problems. Fatal before any request is served.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required credential {0} is not set")]
    MissingCredential(&'static str),
}

/// Web-search collaborator failures. Fatal for the primary query, skipped
/// for supplementary queries.
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("search request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("search provider error: {0}")]
    Provider(String),
}

/// Text-completion collaborator failures. Any stage failing aborts the run.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("completion request failed: {0}")]
    Provider(String),
}

/// Export rendering failures. Recoverable: the other export formats stay
/// available.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("no usable font family found for document output")]
    FontUnavailable,
    #[error("document generation failed: {0}")]
    Document(#[from] genpdf::error::Error),
}

/// Error surface of the HTTP layer. Every fatal error becomes a single
/// user-visible message; nothing is retried.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("research query must not be empty")]
    EmptyQuery,
    #[error("no completed research for this session")]
    UnknownSession,
    #[error(transparent)]
    Retrieval(#[from] RetrievalError),
    #[error(transparent)]
    Completion(#[from] CompletionError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::EmptyQuery => StatusCode::BAD_REQUEST,
            AppError::UnknownSession => StatusCode::NOT_FOUND,
            AppError::Retrieval(_) | AppError::Completion(_) => StatusCode::BAD_GATEWAY,
            AppError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() || status == StatusCode::BAD_GATEWAY {
            error!("request failed: {self}");
        }
        (status, self.to_string()).into_response()
    }
}
