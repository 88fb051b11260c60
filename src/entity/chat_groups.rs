//! 聊天群组实体
//!
//! 是否活跃由 expires_at 与当前时间比较得出，从不落库。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "chat_groups")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub assignment_id: i64,
    pub expires_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assignments::Entity",
        from = "Column::AssignmentId",
        to = "super::assignments::Column::Id"
    )]
    Assignment,
    #[sea_orm(has_many = "super::chat_messages::Entity")]
    Messages,
}

impl Related<super::assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignment.def()
    }
}

impl Related<super::chat_messages::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Messages.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_chat_group(self) -> crate::models::chats::entities::ChatGroup {
        use chrono::{DateTime, Utc};

        crate::models::chats::entities::ChatGroup {
            id: self.id,
            assignment_id: self.assignment_id,
            expires_at: DateTime::<Utc>::from_timestamp(self.expires_at, 0).unwrap_or_default(),
        }
    }
}
