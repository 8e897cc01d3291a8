use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::errors::{ServiceError, error_chain};

pub const PROBLEM_CONTENT_TYPE: &str = "application/problem+json";
const SERVER_ERROR_DETAIL: &str = "server error, please contact support";

/// Error answered to the client as `{status, detail}`
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

#[derive(Serialize)]
struct ProblemBody<'a> {
    status: u16,
    detail: &'a str,
}

impl ApiError {
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            detail: detail.into(),
        }
    }

    pub fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: SERVER_ERROR_DETAIL.to_string(),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(detail) => Self::bad_request(detail),
            ServiceError::Storage { .. } => {
                log::error!("an error occurred: {}", error_chain(&err));
                Self::internal()
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ProblemBody {
            status: self.status.as_u16(),
            detail: &self.detail,
        };
        (
            self.status,
            [(header::CONTENT_TYPE, PROBLEM_CONTENT_TYPE)],
            Json(body),
        )
            .into_response()
    }
}
