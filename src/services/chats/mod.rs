pub mod groups;
pub mod messages;
pub mod send;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::Result;
use crate::models::{
    chats::{entities::ChatGroup, requests::SendMessageRequest},
    common::pagination::PaginationQuery,
    users::entities::{User, UserRole},
};
use crate::storage::Storage;

pub struct ChatService {
    storage: Option<Arc<dyn Storage>>,
}

impl ChatService {
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

    // 当前用户可见的聊天群组
    pub async fn groups(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        groups::handle_groups(self, request).await
    }

    // 群组消息（按发送时间升序分页）
    pub async fn messages(
        &self,
        group_id: i64,
        pagination: PaginationQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        messages::handle_messages(self, group_id, pagination, request).await
    }

    // 发送消息
    pub async fn send(
        &self,
        send_request: SendMessageRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        send::handle_send(self, send_request, request).await
    }
}

/// 群组成员判定：教师是布置该作业的人，学生属于作业所在班级
pub(super) async fn is_group_member(
    storage: &Arc<dyn Storage>,
    group: &ChatGroup,
    user: &User,
) -> Result<bool> {
    let Some(assignment) = storage.get_assignment_by_id(group.assignment_id).await? else {
        return Ok(false);
    };

    Ok(match user.role {
        UserRole::Teacher => assignment.teacher_id == user.id,
        UserRole::Student => user.affiliation.class_id == Some(assignment.class_id),
    })
}
