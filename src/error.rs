use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{entity}.{column} {reason}")]
    Validation { entity: String, column: String, reason: String },

    #[error("referenced record does not exist: {0}")]
    MissingReference(String),

    #[error("duplicate key: {0}")]
    Conflict(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("database unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Db(DbErr),
}

impl StoreError {
    /// Connectivity failures are the only kind worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}

impl From<DbErr> for StoreError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => return StoreError::Conflict(msg),
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => {
                return StoreError::MissingReference(msg);
            }
            _ => {}
        }
        let message = err.to_string();
        if message.contains("UNIQUE constraint failed") {
            return StoreError::Conflict(message);
        }
        if message.contains("FOREIGN KEY constraint failed") {
            return StoreError::MissingReference(message);
        }
        match err {
            DbErr::RecordNotFound(what) => StoreError::NotFound(what),
            DbErr::RecordNotUpdated => StoreError::NotFound("record".to_string()),
            DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => StoreError::Unavailable(message),
            other => StoreError::Db(other),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl AppError {
    fn status(&self) -> StatusCode {
        match self.0.downcast_ref::<StoreError>() {
            Some(StoreError::Validation { .. } | StoreError::MissingReference(_)) => {
                StatusCode::BAD_REQUEST
            }
            Some(StoreError::Conflict(_)) => StatusCode::CONFLICT,
            Some(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            Some(StoreError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            Some(StoreError::Db(_)) | None => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for AppError {}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self(err)
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        Self(anyhow::Error::new(err))
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        Self(anyhow::Error::new(StoreError::from(err)))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        let body = crate::templates::error_page(status, &self.to_string());
        (status, Html(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
