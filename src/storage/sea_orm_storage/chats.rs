//! 聊天存储操作
//!
//! 群组的活跃标志在读取时由 expires_at 计算，从不落库。

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::assignments::{Column as AssignmentColumn, Entity as Assignments};
use crate::entity::chat_groups::{Column as GroupColumn, Entity as ChatGroups};
use crate::entity::chat_messages::{ActiveModel, Column, Entity as ChatMessages};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{AssignMateError, Result};
use crate::models::users::entities::UserRole;
use crate::models::{
    PaginatedResponse, PaginationInfo,
    chats::{
        entities::{ChatGroup, ChatMessage},
        responses::{ChatGroupView, ChatMessageView},
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 通过 ID 获取聊天群组
    pub async fn get_chat_group_by_id_impl(&self, id: i64) -> Result<Option<ChatGroup>> {
        let result = ChatGroups::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AssignMateError::database_operation(format!("查询聊天群组失败: {e}")))?;

        Ok(result.map(|m| m.into_chat_group()))
    }

    /// 某班级可见的聊天群组（学生视角）
    pub async fn list_chat_groups_for_class_impl(
        &self,
        class_id: i64,
    ) -> Result<Vec<ChatGroupView>> {
        let assignments = Assignments::find()
            .filter(AssignmentColumn::ClassId.eq(class_id))
            .all(&self.db)
            .await
            .map_err(|e| AssignMateError::database_operation(format!("查询作业列表失败: {e}")))?;

        self.build_group_views(assignments).await
    }

    /// 某教师的聊天群组
    pub async fn list_chat_groups_for_teacher_impl(
        &self,
        teacher_id: i64,
    ) -> Result<Vec<ChatGroupView>> {
        let assignments = Assignments::find()
            .filter(AssignmentColumn::TeacherId.eq(teacher_id))
            .all(&self.db)
            .await
            .map_err(|e| AssignMateError::database_operation(format!("查询作业列表失败: {e}")))?;

        self.build_group_views(assignments).await
    }

    /// 群组消息，按发送时间升序分页（同一时刻按 ID 升序保证稳定顺序）
    pub async fn list_chat_messages_impl(
        &self,
        group_id: i64,
        page: i64,
        size: i64,
    ) -> Result<PaginatedResponse<ChatMessageView>> {
        let page = page.max(1) as u64;
        let size = size.clamp(1, 200) as u64;

        let select = ChatMessages::find()
            .filter(Column::GroupId.eq(group_id))
            .order_by_asc(Column::SentAt)
            .order_by_asc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| AssignMateError::database_operation(format!("查询消息总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| AssignMateError::database_operation(format!("查询消息页数失败: {e}")))?;

        let messages = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| AssignMateError::database_operation(format!("查询消息列表失败: {e}")))?;

        let sender_map = self.load_senders(&messages).await?;
        let items = messages
            .into_iter()
            .map(|m| message_view(m, &sender_map))
            .collect();

        Ok(PaginatedResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 写入消息；user_id 为 None 表示系统消息
    pub async fn insert_chat_message_impl(
        &self,
        group_id: i64,
        user_id: Option<i64>,
        content: &str,
    ) -> Result<ChatMessage> {
        let now = chrono::Utc::now().timestamp();

        let result = ActiveModel {
            group_id: Set(group_id),
            user_id: Set(user_id),
            content: Set(content.to_string()),
            sent_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| AssignMateError::database_operation(format!("写入消息失败: {e}")))?;

        Ok(result.into_chat_message())
    }

    /// 由作业列表组装群组视图（含最近一条消息）
    async fn build_group_views(
        &self,
        assignments: Vec<crate::entity::assignments::Model>,
    ) -> Result<Vec<ChatGroupView>> {
        if assignments.is_empty() {
            return Ok(vec![]);
        }

        let title_map: HashMap<i64, String> = assignments
            .iter()
            .map(|a| (a.id, a.title.clone()))
            .collect();
        let assignment_ids: Vec<i64> = assignments.iter().map(|a| a.id).collect();

        let mut groups = ChatGroups::find()
            .filter(GroupColumn::AssignmentId.is_in(assignment_ids))
            .all(&self.db)
            .await
            .map_err(|e| AssignMateError::database_operation(format!("查询聊天群组失败: {e}")))?;

        // 最新过期的群组排在前面
        groups.sort_by(|a, b| b.expires_at.cmp(&a.expires_at));

        let now = chrono::Utc::now();
        let mut views = Vec::with_capacity(groups.len());
        for group in groups {
            let latest = ChatMessages::find()
                .filter(Column::GroupId.eq(group.id))
                .order_by_desc(Column::SentAt)
                .order_by_desc(Column::Id)
                .one(&self.db)
                .await
                .map_err(|e| {
                    AssignMateError::database_operation(format!("查询最近消息失败: {e}"))
                })?;

            let latest_view = match latest {
                Some(msg) => {
                    let sender_map = self.load_senders(std::slice::from_ref(&msg)).await?;
                    Some(message_view(msg, &sender_map))
                }
                None => None,
            };

            let group = group.into_chat_group();
            views.push(ChatGroupView {
                id: group.id,
                assignment_id: group.assignment_id,
                assignment_title: title_map
                    .get(&group.assignment_id)
                    .cloned()
                    .unwrap_or_default(),
                expires_at: group.expires_at,
                active: group.is_active(now),
                latest_message: latest_view,
            });
        }

        Ok(views)
    }

    /// 批量加载消息发送者
    async fn load_senders(
        &self,
        messages: &[crate::entity::chat_messages::Model],
    ) -> Result<HashMap<i64, crate::entity::users::Model>> {
        let sender_ids: Vec<i64> = messages
            .iter()
            .filter_map(|m| m.user_id)
            .collect::<std::collections::HashSet<_>>()
            .into_iter()
            .collect();

        if sender_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let users = Users::find()
            .filter(UserColumn::Id.is_in(sender_ids))
            .all(&self.db)
            .await
            .map_err(|e| AssignMateError::database_operation(format!("查询发送者失败: {e}")))?;

        Ok(users.into_iter().map(|u| (u.id, u)).collect())
    }
}

// 组装消息视图；发送者缺失（系统消息或已注销）时 sender 字段为空
fn message_view(
    msg: crate::entity::chat_messages::Model,
    sender_map: &HashMap<i64, crate::entity::users::Model>,
) -> ChatMessageView {
    let sender = msg.user_id.and_then(|id| sender_map.get(&id));
    let sender_name = sender.map(|u| u.full_name.clone());
    let sender_role = sender.map(|u| u.role.parse::<UserRole>().unwrap_or(UserRole::Student));
    let msg = msg.into_chat_message();

    ChatMessageView {
        id: msg.id,
        group_id: msg.group_id,
        sender_id: msg.user_id,
        sender_name,
        sender_role,
        content: msg.content,
        sent_at: msg.sent_at,
    }
}
