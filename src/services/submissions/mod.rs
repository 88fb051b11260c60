pub mod download;
pub mod grade;
mod receive;
pub mod resubmit;
pub mod upload;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use uuid::Uuid;

use crate::storage::{FileStore, Storage};

pub struct SubmissionService {
    storage: Option<Arc<dyn Storage>>,
}

impl SubmissionService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub(crate) fn get_file_store(&self, request: &HttpRequest) -> Arc<dyn FileStore> {
        request
            .app_data::<actix_web::web::Data<Arc<dyn FileStore>>>()
            .expect("FileStore not found in app data")
            .get_ref()
            .clone()
    }

    // 上传提交（multipart）
    pub async fn upload(
        &self,
        request: &HttpRequest,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        upload::handle_upload(self, request, payload).await
    }

    // 下载提交的 PDF
    pub async fn download(
        &self,
        submission_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        download::handle_download(self, submission_id, request).await
    }

    // 评分
    pub async fn grade(
        &self,
        submission_id: i64,
        grade_request: crate::models::submissions::requests::GradeSubmissionRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        grade::handle_grade(self, submission_id, grade_request, request).await
    }

    // 重新提交（multipart，消耗评语）
    pub async fn resubmit(
        &self,
        request: &HttpRequest,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        resubmit::handle_resubmit(self, request, payload).await
    }
}

// 生成存储用的文件 token（不透明文件名）
pub(crate) fn new_file_token() -> String {
    format!("{}-{}.pdf", chrono::Utc::now().timestamp(), Uuid::new_v4())
}
