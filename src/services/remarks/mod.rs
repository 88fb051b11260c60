pub mod create;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::remarks::requests::{CreateRemarkRequest, ListRemarksQuery};
use crate::storage::Storage;

pub struct RemarkService {
    storage: Option<Arc<dyn Storage>>,
}

impl RemarkService {
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

    // 创建评语（要求重交时同步更新提交状态）
    pub async fn create(
        &self,
        create_request: CreateRemarkRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::handle_create(self, create_request, request).await
    }

    // 某提交的评语列表
    pub async fn list(
        &self,
        query: ListRemarksQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::handle_list(self, query, request).await
    }
}
