use axum::{http::StatusCode, response::IntoResponse, Json};

use crate::context::CurrentUser;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn whoami(user: CurrentUser) -> impl IntoResponse {
    Json(serde_json::json!({
        "user_id": user.id.to_string(),
        "role": user.role.as_str(),
    }))
}
