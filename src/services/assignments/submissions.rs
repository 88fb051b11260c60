use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{ApiResponse, ErrorCode};

use super::AssignmentService;

/// 某作业的提交列表（教师视角，带学生展示字段）
pub async fn handle_submissions(
    service: &AssignmentService,
    assignment_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_assignment_by_id(assignment_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AssignmentNotFound,
                "Assignment not found",
            )));
        }
        Err(e) => {
            tracing::error!("Assignment lookup failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Submission list failed",
                )),
            );
        }
    }

    match storage.list_submissions_for_assignment(assignment_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(items, "OK"))),
        Err(e) => {
            tracing::error!("Submission list failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Submission list failed",
                )),
            )
        }
    }
}
