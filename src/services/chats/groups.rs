use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ChatService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, users::entities::UserRole};

/// 角色决定可见范围：学生看本班级的群组，教师看自己布置作业的群组
pub async fn handle_groups(service: &ChatService, request: &HttpRequest) -> ActixResult<HttpResponse> {
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

    let groups = match user.role {
        UserRole::Student => {
            let Some(class_id) = user.affiliation.class_id else {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::ClassNotFound,
                    "Student has no class assigned",
                )));
            };
            storage.list_chat_groups_for_class(class_id).await
        }
        UserRole::Teacher => storage.list_chat_groups_for_teacher(user.id).await,
    };

    match groups {
        Ok(groups) => Ok(HttpResponse::Ok().json(ApiResponse::success(groups, "OK"))),
        Err(e) => {
            tracing::error!("Chat group list failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Chat group list failed",
                )),
            )
        }
    }
}
