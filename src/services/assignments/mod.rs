pub mod create;
pub mod detail;
pub mod list;
pub mod submissions;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::storage::Storage;

pub struct AssignmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl AssignmentService {
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

    // 创建作业（同一事务内建立聊天群组）
    pub async fn create(
        &self,
        create_request: crate::models::assignments::requests::CreateAssignmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::handle_create(self, create_request, request).await
    }

    // 作业详情
    pub async fn detail(&self, assignment_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        detail::handle_detail(self, assignment_id, request).await
    }

    // 学生视角的作业列表
    pub async fn list_for_student(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::handle_list_for_student(self, request).await
    }

    // 教师视角的作业列表
    pub async fn list_for_teacher(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::handle_list_for_teacher(self, request).await
    }

    // 某作业的提交列表
    pub async fn submissions(
        &self,
        assignment_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        submissions::handle_submissions(self, assignment_id, request).await
    }
}
