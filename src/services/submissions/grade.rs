use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::models::{
    ApiResponse, ErrorCode,
    submissions::{requests::GradeSubmissionRequest, responses::SubmissionWithStudent},
};

pub const MAX_MARKS: i32 = 100;

pub async fn handle_grade(
    service: &SubmissionService,
    submission_id: i64,
    grade_request: GradeSubmissionRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    // 分数范围在服务端校验，不信任客户端
    if !(0..=MAX_MARKS).contains(&grade_request.marks) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::MarksOutOfRange,
            format!("Marks must be between 0 and {MAX_MARKS}"),
        )));
    }

    let storage = service.get_storage(request);

    let graded = match storage
        .grade_submission(submission_id, grade_request.marks, grade_request.feedback)
        .await
    {
        Ok(Some(submission)) => submission,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SubmissionNotFound,
                "Submission not found",
            )));
        }
        Err(e) => {
            tracing::error!("Grading failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Grading failed",
                )),
            );
        }
    };

    // DTO 带学生展示字段
    let student = storage.get_user_by_id(graded.student_id).await.ok().flatten();
    let response = SubmissionWithStudent {
        student_name: student
            .as_ref()
            .map(|u| u.full_name.clone())
            .unwrap_or_default(),
        student_prn: student.and_then(|u| u.prn),
        submission: graded,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Submission graded")))
}
