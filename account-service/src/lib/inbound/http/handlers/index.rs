use axum::http::StatusCode;
use serde::Serialize;

use super::ApiSuccess;

pub async fn index() -> ApiSuccess<IndexResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        IndexResponseData {
            message: "Welcome to the account service",
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexResponseData {
    pub message: &'static str,
}
