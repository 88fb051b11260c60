use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::RemarkService;
use crate::errors::AssignMateError;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, remarks::requests::CreateRemarkRequest};

pub async fn handle_create(
    service: &RemarkService,
    create_request: CreateRemarkRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let teacher = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Authentication required",
            )));
        }
    };

    if create_request.message.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Remark message cannot be empty",
        )));
    }

    // 重交截止时间必须在未来
    if create_request.resubmission_required
        && let Some(deadline) = create_request.resubmission_deadline
        && deadline <= chrono::Utc::now()
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Resubmission deadline must be in the future",
        )));
    }

    let storage = service.get_storage(request);
    match storage.create_remark(teacher.id, create_request).await {
        Ok(remark) => {
            tracing::info!(
                "Teacher {} created remark {} on submission {}",
                teacher.id,
                remark.id,
                remark.submission_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(remark, "Remark created")))
        }
        Err(AssignMateError::NotFound(_)) => Ok(HttpResponse::NotFound().json(
            ApiResponse::error_empty(ErrorCode::SubmissionNotFound, "Submission not found"),
        )),
        Err(e) => {
            tracing::error!("Remark creation failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RemarkCreationFailed,
                    "Remark creation failed",
                )),
            )
        }
    }
}
