use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::RemarkService;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode, remarks::requests::ListRemarksQuery, users::entities::UserRole,
};

/// 某提交的评语列表
///
/// 教师可查看任意提交的评语，学生只能查看本人提交的。
pub async fn handle_list(
    service: &RemarkService,
    query: ListRemarksQuery,
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

    let submission = match storage.get_submission_by_id(query.submission_id).await {
        Ok(Some(submission)) => submission,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SubmissionNotFound,
                "Submission not found",
            )));
        }
        Err(e) => {
            tracing::error!("Submission lookup failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Remark list failed",
                )),
            );
        }
    };

    if user.role == UserRole::Student && submission.student_id != user.id {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "Access denied.",
        )));
    }

    match storage.list_remarks_for_submission(submission.id).await {
        Ok(remarks) => Ok(HttpResponse::Ok().json(ApiResponse::success(remarks, "OK"))),
        Err(e) => {
            tracing::error!("Remark list failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Remark list failed",
                )),
            )
        }
    }
}
