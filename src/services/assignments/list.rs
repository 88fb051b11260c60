use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};

use super::AssignmentService;

/// 学生视角：按所属班级过滤
pub async fn handle_list_for_student(
    service: &AssignmentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let student = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Authentication required",
            )));
        }
    };

    let Some(class_id) = student.affiliation.class_id else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ClassNotFound,
            "Student has no class assigned",
        )));
    };

    match storage.list_assignments_for_class(class_id).await {
        Ok(assignments) => Ok(HttpResponse::Ok().json(ApiResponse::success(assignments, "OK"))),
        Err(e) => {
            tracing::error!("Assignment list failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Assignment list failed",
                )),
            )
        }
    }
}

/// 教师视角：按布置者过滤，带班级/课程展示字段
pub async fn handle_list_for_teacher(
    service: &AssignmentService,
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

    match storage.list_assignments_for_teacher(teacher.id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(items, "OK"))),
        Err(e) => {
            tracing::error!("Assignment list failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Assignment list failed",
                )),
            )
        }
    }
}
