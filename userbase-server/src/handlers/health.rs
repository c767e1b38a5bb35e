use crate::response::SuccessResponse;
use axum::Json;

pub async fn health() -> Json<SuccessResponse<()>> {
    Json(SuccessResponse::empty())
}
