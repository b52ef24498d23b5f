use crate::errors::{error::ErrorResponse, repository::RepositoryError, service::ServiceError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

pub const INTERNAL_SERVER_ERROR_MESSAGE: &str = "Internal server error!";

#[derive(Debug)]
pub enum HttpError {
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    Conflict(String),
    Internal(String),
}

impl HttpError {
    pub fn status(&self) -> StatusCode {
        match self {
            HttpError::BadRequest(_) => StatusCode::BAD_REQUEST,
            HttpError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            HttpError::Forbidden(_) => StatusCode::FORBIDDEN,
            HttpError::NotFound(_) => StatusCode::NOT_FOUND,
            HttpError::Conflict(_) => StatusCode::CONFLICT,
            HttpError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for HttpError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(msg) => HttpError::NotFound(msg),

            ServiceError::Validation(errors) => HttpError::BadRequest(errors.join("; ")),

            ServiceError::Jwt(_) => HttpError::Unauthorized("Invalid token".into()),

            ServiceError::TokenExpired => HttpError::Unauthorized("Token expired".into()),

            ServiceError::Repo(repo_err) => match repo_err {
                RepositoryError::NotFound => HttpError::NotFound("Not found".into()),
                RepositoryError::AlreadyExists(msg) => HttpError::Conflict(msg),
                RepositoryError::Sqlx(e) => HttpError::Internal(e.to_string()),
            },

            ServiceError::Media(msg) => HttpError::Internal(msg),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match self {
            HttpError::Internal(detail) => {
                error!("💥 Internal server error: {detail}");
                INTERNAL_SERVER_ERROR_MESSAGE.to_string()
            }
            HttpError::BadRequest(msg)
            | HttpError::Unauthorized(msg)
            | HttpError::Forbidden(msg)
            | HttpError::NotFound(msg)
            | HttpError::Conflict(msg) => msg,
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_keeps_its_message() {
        let err = HttpError::from(ServiceError::NotFound("Product not found!".into()));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert!(matches!(err, HttpError::NotFound(ref m) if m == "Product not found!"));
    }

    #[test]
    fn duplicate_rows_map_to_conflict() {
        let err = HttpError::from(ServiceError::Repo(RepositoryError::AlreadyExists(
            "coupons_code_key".into(),
        )));
        assert_eq!(err.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn token_failures_are_unauthorized() {
        let err = HttpError::from(ServiceError::TokenExpired);
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        assert!(matches!(err, HttpError::Unauthorized(ref m) if m == "Token expired"));
    }

    #[test]
    fn database_failures_are_internal() {
        let err = HttpError::from(ServiceError::Repo(RepositoryError::Sqlx(
            sqlx::Error::PoolTimedOut,
        )));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn media_failures_are_internal() {
        let err = HttpError::from(ServiceError::Media("upload rejected".into()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn validation_messages_are_joined() {
        let err = HttpError::from(ServiceError::Validation(vec![
            "name: Name is required".into(),
            "price: Price must not be negative".into(),
        ]));
        assert!(matches!(
            err,
            HttpError::BadRequest(ref m) if m == "name: Name is required; price: Price must not be negative"
        ));
    }
}
