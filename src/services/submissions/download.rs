use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::header};

use super::SubmissionService;
use crate::errors::AssignMateError;
use crate::models::{ApiResponse, ErrorCode};

pub async fn handle_download(
    service: &SubmissionService,
    submission_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let submission = match storage.get_submission_by_id(submission_id).await {
        Ok(Some(s)) => s,
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
                    "Download failed",
                )),
            );
        }
    };

    let file_store = service.get_file_store(request);
    let content = match file_store.fetch(&submission.file_token).await {
        Ok(bytes) => bytes,
        Err(AssignMateError::NotFound(_)) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::FileNotFound,
                "Stored file not found",
            )));
        }
        Err(e) => {
            tracing::error!("File store fetch failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Download failed",
                )),
            );
        }
    };

    // 使用数据库中的原始文件名
    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, "application/pdf"))
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", submission.file_name),
        ))
        .body(content))
}
