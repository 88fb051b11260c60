use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, assignments::requests::CreateAssignmentRequest};

use super::AssignmentService;

pub async fn handle_create(
    service: &AssignmentService,
    create_request: CreateAssignmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let teacher = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Authentication required",
            )));
        }
    };

    // 校验班级存在
    match storage.get_class_by_id(create_request.class_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ClassNotFound,
                "Class not found",
            )));
        }
        Err(e) => {
            tracing::error!("Class lookup failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Assignment creation failed",
                )),
            );
        }
    }

    // 聊天群组随作业过期
    let expires_at = create_request.due_date;
    let welcome_message = format!(
        "Assignment \"{}\" has been posted. Use this chat for questions.",
        create_request.title
    );

    match storage
        .create_assignment_with_chat_group(teacher.id, create_request, expires_at, &welcome_message)
        .await
    {
        Ok(assignment) => {
            tracing::info!(
                "Teacher {} created assignment {} for class {}",
                teacher.id,
                assignment.id,
                assignment.class_id
            );
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(assignment, "Assignment created")))
        }
        Err(e) => {
            tracing::error!("Assignment creation failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::AssignmentCreationFailed,
                    "Assignment creation failed",
                )),
            )
        }
    }
}
