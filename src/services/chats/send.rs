use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ChatService, is_group_member};
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, chats::requests::SendMessageRequest};

// 消息长度上限（字符数）
const MAX_MESSAGE_LEN: usize = 2000;

pub async fn handle_send(
    service: &ChatService,
    send_request: SendMessageRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Authentication required",
            )));
        }
    };

    let content = send_request.content.trim();
    if content.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Message content cannot be empty",
        )));
    }
    if content.chars().count() > MAX_MESSAGE_LEN {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Message content is too long",
        )));
    }

    let storage = service.get_storage(request);

    let group = match storage.get_chat_group_by_id(send_request.group_id).await {
        Ok(Some(group)) => group,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ChatGroupNotFound,
                "Chat group not found",
            )));
        }
        Err(e) => {
            tracing::error!("Chat group lookup failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Message send failed",
                )),
            );
        }
    };

    // 过期群组只读不可写
    if !group.is_active(chrono::Utc::now()) {
        return Ok(HttpResponse::Gone().json(ApiResponse::error_empty(
            ErrorCode::ChatGroupExpired,
            "Chat group has expired",
        )));
    }

    match is_group_member(&storage, &group, &user).await {
        Ok(true) => {}
        Ok(false) => {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::Forbidden,
                "Access denied.",
            )));
        }
        Err(e) => {
            tracing::error!("Group membership check failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Message send failed",
                )),
            );
        }
    }

    match storage
        .insert_chat_message(group.id, Some(user.id), content)
        .await
    {
        Ok(message) => Ok(HttpResponse::Created().json(ApiResponse::success(message, "Message sent"))),
        Err(e) => {
            tracing::error!("Message send failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Message send failed",
                )),
            )
        }
    }
}
