//! 聊天消息实体
//!
//! user_id 为空表示系统消息（作业创建时的欢迎语）。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "chat_messages")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub group_id: i64,
    pub user_id: Option<i64>,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub sent_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::chat_groups::Entity",
        from = "Column::GroupId",
        to = "super::chat_groups::Column::Id"
    )]
    Group,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    Sender,
}

impl Related<super::chat_groups::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Group.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sender.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_chat_message(self) -> crate::models::chats::entities::ChatMessage {
        use chrono::{DateTime, Utc};

        crate::models::chats::entities::ChatMessage {
            id: self.id,
            group_id: self.group_id,
            user_id: self.user_id,
            content: self.content,
            sent_at: DateTime::<Utc>::from_timestamp(self.sent_at, 0).unwrap_or_default(),
        }
    }
}
