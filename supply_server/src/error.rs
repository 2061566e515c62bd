use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToResponse;

#[derive(Debug, Serialize, ToResponse)]
pub struct ErrorServer {
    pub message: String,
    pub status: u16,
}

impl ErrorServer {
    pub fn unavailable(what: &str) -> Self {
        Self {
            message: format!("{} is not yet available", what),
            status: StatusCode::SERVICE_UNAVAILABLE.into(),
        }
    }
}

impl std::fmt::Display for ErrorServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl IntoResponse for ErrorServer {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}
