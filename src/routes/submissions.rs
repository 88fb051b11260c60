use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::submissions::requests::GradeSubmissionRequest;
use crate::models::users::entities::UserRole;
use crate::services::SubmissionService;
use crate::utils::SafeIDI64;

// 懒加载的全局 SubmissionService 实例
static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);

// 上传提交（multipart）
pub async fn upload_submission(req: HttpRequest, payload: Multipart) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.upload(&req, payload).await
}

// 下载提交的 PDF
pub async fn download_submission(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.download(path.0, &req).await
}

// 评分
pub async fn grade_submission(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<GradeSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.grade(path.0, body.into_inner(), &req).await
}

// 重新提交（multipart，消耗评语）
pub async fn resubmit_submission(
    req: HttpRequest,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.resubmit(&req, payload).await
}

// 配置路由
pub fn configure_submission_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/submission")
            .wrap(middlewares::RequireJWT)
            // 上传提交 - 仅学生
            .service(
                web::resource("/upload")
                    .route(web::post().to(upload_submission))
                    .wrap(middlewares::RequireRole::new(&UserRole::Student)),
            )
            // 下载提交 - 仅教师
            .service(
                web::resource("/download/{id}")
                    .route(web::get().to(download_submission))
                    .wrap(middlewares::RequireRole::new(&UserRole::Teacher)),
            )
            // 评分 - 仅教师
            .service(
                web::resource("/grade/{id}")
                    .route(web::post().to(grade_submission))
                    .wrap(middlewares::RequireRole::new(&UserRole::Teacher)),
            )
            // 重新提交 - 仅学生
            .service(
                web::resource("/resubmit")
                    .route(web::post().to(resubmit_submission))
                    .wrap(middlewares::RequireRole::new(&UserRole::Student)),
            ),
    );
}
