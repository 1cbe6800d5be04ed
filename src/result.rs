use std::fmt::Display;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::{models::ValidationError, store::DataAccessError};

#[derive(Debug)]
pub enum AppError {
    Validation(ValidationError),
    DataAccess(DataAccessError),
}

impl Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        return match self {
            AppError::Validation(err) => write!(f, "validation failed: {err}"),
            AppError::DataAccess(err) => write!(f, "data access failed: {err}"),
        };
    }
}

impl std::error::Error for AppError {}

pub type Result<T = (), E = AppError> = std::result::Result<T, E>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::Validation(err) => {
                tracing::debug!(code = err.code(), "rejected request: {err}");
                (StatusCode::BAD_REQUEST, err.code())
            }
            AppError::DataAccess(err) => {
                tracing::error!("data access failed: {err}");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        };

        return (status, Json(json!({ "error": code }))).into_response();
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        return Self::Validation(err);
    }
}

impl From<DataAccessError> for AppError {
    fn from(err: DataAccessError) -> Self {
        return Self::DataAccess(err);
    }
}
