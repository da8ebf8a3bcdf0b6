use axum::Json;

use super::HandlerResult;
use crate::http::dto::{ChatRequest, ChatResponse};
use crate::http::extract::{ApiJson, CurrentUser};
use crate::services::chat::reply;

/// POST /api/chat
pub async fn chat(
    _user: CurrentUser,
    ApiJson(request): ApiJson<ChatRequest>,
) -> HandlerResult<ChatResponse> {
    let response = reply(&request.message)?;
    Ok(Json(ChatResponse { response }))
}
