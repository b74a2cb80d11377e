use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;

pub async fn status(
    Extension(current): Extension<AuthenticatedUser>,
) -> ApiSuccess<StatusResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        StatusResponseData {
            status: "authenticated",
            version: "v2",
            user_id: current.user_id.to_string(),
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusResponseData {
    pub status: &'static str,
    pub version: &'static str,
    pub user_id: String,
}
