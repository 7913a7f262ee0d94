use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use log::{debug, error};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    #[error("provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider error: {0}")]
    Provider(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("OAuth state missing or mismatched")]
    InvalidState,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Database(_) | AppError::Template(_) => {
                error!("{}", self);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Http(_) | AppError::Provider(_) => {
                error!("{}", self);
                StatusCode::BAD_GATEWAY
            }
            AppError::BadRequest(_) | AppError::InvalidState => {
                debug!("Rejecting request: {}", self);
                StatusCode::BAD_REQUEST
            }
        };

        // Internal details stay in the log
        let body = match status {
            StatusCode::BAD_REQUEST => self.to_string(),
            _ => status
                .canonical_reason()
                .unwrap_or("Error")
                .to_string(),
        };

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
