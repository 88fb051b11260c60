use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ChatService, is_group_member};
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, common::pagination::PaginationQuery};

/// 群组消息，升序分页；过期群组不可读
pub async fn handle_messages(
    service: &ChatService,
    group_id: i64,
    pagination: PaginationQuery,
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

    let storage = service.get_storage(request);

    let group = match storage.get_chat_group_by_id(group_id).await {
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
                    "Chat message list failed",
                )),
            );
        }
    };

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
                    "Chat message list failed",
                )),
            );
        }
    }

    match storage
        .list_chat_messages(group.id, pagination.page, pagination.size)
        .await
    {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(page, "OK"))),
        Err(e) => {
            tracing::error!("Chat message list failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Chat message list failed",
                )),
            )
        }
    }
}
