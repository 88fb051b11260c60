use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::{DateTime, Utc};

use super::receive::{Received, receive_pdf_upload};
use super::{SubmissionService, new_file_token};
use crate::errors::AssignMateError;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode, remarks::entities::Remark, submissions::entities::Submission,
};

/// 重交前置校验：评语要求重交、截止未过、提交归属本人
///
/// 纯函数，事务外先行拒绝明显非法的请求；
/// 评语的原子消耗仍由存储层事务保证。
pub(crate) fn validate_resubmission(
    remark: &Remark,
    submission: &Submission,
    student_id: i64,
    now: DateTime<Utc>,
) -> Result<(), (ErrorCode, &'static str)> {
    if !remark.resubmission_required {
        return Err((
            ErrorCode::ResubmissionNotRequired,
            "Remark does not request resubmission",
        ));
    }

    if let Some(deadline) = remark.resubmission_deadline
        && now > deadline
    {
        return Err((
            ErrorCode::ResubmissionDeadlinePassed,
            "Resubmission deadline has passed",
        ));
    }

    if submission.student_id != student_id {
        return Err((
            ErrorCode::SubmissionOwnershipMismatch,
            "Submission belongs to another student",
        ));
    }

    Ok(())
}

pub async fn handle_resubmit(
    service: &SubmissionService,
    request: &HttpRequest,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    // 1. 接收 multipart：remark_id 文本字段 + 单个 PDF
    let (fields, file) = match receive_pdf_upload(payload).await? {
        Received::Upload { fields, file } => (fields, file),
        Received::Rejected(response) => return Ok(response),
    };

    let Some(remark_id) = fields.get("remark_id").and_then(|v| v.parse::<i64>().ok()) else {
        file.discard();
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Missing or invalid remark_id field",
        )));
    };

    let student = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            file.discard();
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Authentication required",
            )));
        }
    };

    // 2. 评语与提交必须存在
    let storage = service.get_storage(request);
    let remark = match storage.get_remark_by_id(remark_id).await {
        Ok(Some(remark)) => remark,
        Ok(None) => {
            file.discard();
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::RemarkNotFound,
                "Remark not found",
            )));
        }
        Err(e) => {
            file.discard();
            tracing::error!("Remark lookup failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Resubmission failed",
                )),
            );
        }
    };

    let submission = match storage.get_submission_by_id(remark.submission_id).await {
        Ok(Some(submission)) => submission,
        Ok(None) => {
            file.discard();
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SubmissionNotFound,
                "Submission not found",
            )));
        }
        Err(e) => {
            file.discard();
            tracing::error!("Submission lookup failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Resubmission failed",
                )),
            );
        }
    };

    // 3. 状态机守卫
    if let Err((code, message)) =
        validate_resubmission(&remark, &submission, student.id, chrono::Utc::now())
    {
        file.discard();
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message)));
    }

    // 4. 新文件先入存储
    let file_store = service.get_file_store(request);
    let file_token = new_file_token();
    if let Err(e) = file_store.put(&file_token, &file.tmp_path).await {
        file.discard();
        tracing::error!("File store put failed: {}", e);
        return Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::FileUploadFailed,
                "Failed to store uploaded file",
            )),
        );
    }

    // 5. 事务内替换提交并消耗评语
    match storage
        .resubmit_submission(submission.id, remark.id, &file_token, &file.original_name)
        .await
    {
        Ok((updated, old_token)) => {
            // 旧文件尽力删除，失败只记日志
            if let Err(e) = file_store.delete(&old_token).await {
                tracing::warn!("Failed to delete replaced file {}: {}", old_token, e);
            }

            tracing::info!(
                "Student {} resubmitted submission {} (remark {} consumed)",
                student.id,
                updated.id,
                remark.id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(updated, "Resubmission successful")))
        }
        // 并发重交把评语先消耗掉了，事务已回滚
        Err(AssignMateError::NotFound(_)) => {
            if let Err(e) = file_store.delete(&file_token).await {
                tracing::warn!("Failed to clean up stored file {}: {}", file_token, e);
            }
            Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::RemarkNotFound,
                "Remark already processed",
            )))
        }
        Err(e) => {
            if let Err(del) = file_store.delete(&file_token).await {
                tracing::warn!("Failed to clean up stored file {}: {}", file_token, del);
            }
            tracing::error!("Resubmission failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Resubmission failed",
                )),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::submissions::entities::SubmissionStatus;
    use chrono::Duration;

    fn remark(required: bool, deadline: Option<DateTime<Utc>>) -> Remark {
        Remark {
            id: 1,
            submission_id: 10,
            teacher_id: 2,
            message: "Please fix the second section".to_string(),
            resubmission_required: required,
            resubmission_deadline: deadline,
            created_at: Utc::now(),
        }
    }

    fn submission(student_id: i64) -> Submission {
        Submission {
            id: 10,
            assignment_id: 5,
            student_id,
            file_token: "t.pdf".to_string(),
            file_name: "hw.pdf".to_string(),
            status: SubmissionStatus::ResubmissionRequested,
            marks: None,
            feedback: None,
            submitted_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_valid_resubmission_passes() {
        let now = Utc::now();
        let remark = remark(true, Some(now + Duration::days(1)));
        assert!(validate_resubmission(&remark, &submission(3), 3, now).is_ok());
    }

    #[test]
    fn test_no_deadline_passes() {
        let now = Utc::now();
        let remark = remark(true, None);
        assert!(validate_resubmission(&remark, &submission(3), 3, now).is_ok());
    }

    #[test]
    fn test_not_required_rejected() {
        let now = Utc::now();
        let remark = remark(false, None);
        let err = validate_resubmission(&remark, &submission(3), 3, now).unwrap_err();
        assert_eq!(err.0, ErrorCode::ResubmissionNotRequired);
    }

    #[test]
    fn test_deadline_passed_rejected() {
        let now = Utc::now();
        let remark = remark(true, Some(now - Duration::hours(1)));
        let err = validate_resubmission(&remark, &submission(3), 3, now).unwrap_err();
        assert_eq!(err.0, ErrorCode::ResubmissionDeadlinePassed);
    }

    #[test]
    fn test_ownership_mismatch_rejected() {
        let now = Utc::now();
        let remark = remark(true, None);
        let err = validate_resubmission(&remark, &submission(3), 4, now).unwrap_err();
        assert_eq!(err.0, ErrorCode::SubmissionOwnershipMismatch);
    }

    #[test]
    fn test_deadline_exactly_now_still_allowed() {
        let now = Utc::now();
        let remark = remark(true, Some(now));
        assert!(validate_resubmission(&remark, &submission(3), 3, now).is_ok());
    }
}
