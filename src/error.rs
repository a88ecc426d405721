use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use log::error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JournalError {
    #[error("both username and password are required")]
    InvalidInput,

    #[error("No entry found with id: {0}")]
    NotFound(i32),

    #[error("Login required")]
    Unauthorized,

    #[error("Database error: {0}")]
    Storage(#[from] diesel::result::Error),

    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("Auth ticket error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

pub type Result<T> = std::result::Result<T, JournalError>;

impl ResponseError for JournalError {
    fn status_code(&self) -> StatusCode {
        match self {
            JournalError::InvalidInput => StatusCode::BAD_REQUEST,
            JournalError::NotFound(_) => StatusCode::NOT_FOUND,
            JournalError::Unauthorized => StatusCode::FORBIDDEN,
            JournalError::Storage(_)
            | JournalError::Pool(_)
            | JournalError::Template(_)
            | JournalError::Token(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            // details stay in the log, the client only sees the status line
            error!("{}", self);
            return HttpResponse::build(status).body("Internal Server Error");
        }
        HttpResponse::build(status).body(self.to_string())
    }
}
