use crate::store::StoreError;
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use robotops_protocol::ErrorDetail;
use tracing::error;

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    /// 404 naming the missing entity, e.g. `"Robot not found"`.
    pub fn not_found(entity: &str) -> Self {
        Self { status: StatusCode::NOT_FOUND, detail: format!("{entity} not found") }
    }

    pub fn unprocessable(detail: impl Into<String>) -> Self {
        Self { status: StatusCode::UNPROCESSABLE_ENTITY, detail: detail.into() }
    }

    pub fn route_not_found() -> Self {
        Self { status: StatusCode::NOT_FOUND, detail: "Not Found".to_string() }
    }

    pub fn method_not_allowed() -> Self {
        Self { status: StatusCode::METHOD_NOT_ALLOWED, detail: "Method Not Allowed".to_string() }
    }

    pub fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: "internal server error".to_string(),
        }
    }

    #[cfg(test)]
    fn status(&self) -> StatusCode {
        self.status
    }

    #[cfg(test)]
    fn detail(&self) -> &str {
        &self.detail
    }
}

impl From<StoreError> for ApiError {
    fn from(value: StoreError) -> Self {
        error!(error = %value, "store operation failed");
        Self::internal()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        Self::unprocessable(value.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(value: PathRejection) -> Self {
        Self::unprocessable(value.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(value: QueryRejection) -> Self {
        Self::unprocessable(value.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorDetail::new(self.detail))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_the_entity() {
        let err = ApiError::not_found("Mission");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.detail(), "Mission not found");
    }

    #[test]
    fn store_errors_hide_the_cause_from_clients() {
        let err = ApiError::from(StoreError::Sqlite(rusqlite::Error::InvalidQuery));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.detail(), "internal server error");
    }

    #[test]
    fn unrouted_requests_keep_the_detail_shape() {
        let err = ApiError::route_not_found();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.detail(), "Not Found");

        let err = ApiError::method_not_allowed();
        assert_eq!(err.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(err.detail(), "Method Not Allowed");
    }
}
