use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use contacts_store::StoreError;
use tracing::error;

use crate::view;

/// Errors surfaced by loaders and actions. All of them render the error page.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A route was dispatched without data its handler relies on.
    #[error("Invariant failed: {0}")]
    Invariant(&'static str),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    /// Message shown to the browser. Store details stay in the log.
    pub fn public_message(&self) -> String {
        match self {
            Self::Invariant(_) => self.to_string(),
            Self::Store(_) => "Unexpected Server Error".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!(error = %self, "request failed");
        let status = self.status();
        let body = view::error_page("Oops!", &self.public_message());
        (status, Html(body)).into_response()
    }
}

/// Unwrap a value the router guarantees, or fail the request.
pub fn invariant<T>(value: Option<T>, message: &'static str) -> Result<T, AppError> {
    value.ok_or(AppError::Invariant(message))
}
