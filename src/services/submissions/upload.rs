use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::receive::{Received, receive_pdf_upload};
use super::{SubmissionService, new_file_token};
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};

pub async fn handle_upload(
    service: &SubmissionService,
    request: &HttpRequest,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    // 1. 接收 multipart：assignment_id 文本字段 + 单个 PDF
    let (fields, file) = match receive_pdf_upload(payload).await? {
        Received::Upload { fields, file } => (fields, file),
        Received::Rejected(response) => return Ok(response),
    };

    let Some(assignment_id) = fields.get("assignment_id").and_then(|v| v.parse::<i64>().ok())
    else {
        file.discard();
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Missing or invalid assignment_id field",
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

    // 2. 作业必须存在且属于学生所在班级
    let storage = service.get_storage(request);
    let assignment = match storage.get_assignment_by_id(assignment_id).await {
        Ok(Some(assignment)) => assignment,
        Ok(None) => {
            file.discard();
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AssignmentNotFound,
                "Assignment not found",
            )));
        }
        Err(e) => {
            file.discard();
            tracing::error!("Assignment lookup failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Upload failed",
                )),
            );
        }
    };

    if student.affiliation.class_id != Some(assignment.class_id) {
        file.discard();
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "Assignment does not belong to your class",
        )));
    }

    // 3. 先推入文件存储，成功后才写数据库
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

    // 4. upsert 当前提交
    match storage
        .upsert_submission(assignment_id, student.id, &file_token, &file.original_name)
        .await
    {
        Ok((submission, old_token)) => {
            // 替换下来的旧文件尽力删除，失败只记日志
            if let Some(old_token) = old_token
                && let Err(e) = file_store.delete(&old_token).await
            {
                tracing::warn!("Failed to delete replaced file {}: {}", old_token, e);
            }

            tracing::info!(
                "Student {} submitted {} bytes for assignment {}",
                student.id,
                file.size,
                assignment_id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(submission, "Submission uploaded")))
        }
        Err(e) => {
            // 数据库失败时回收刚存入的文件
            if let Err(del) = file_store.delete(&file_token).await {
                tracing::warn!("Failed to clean up stored file {}: {}", file_token, del);
            }
            tracing::error!("Submission upsert failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Upload failed",
                )),
            )
        }
    }
}
