use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::users::entities::UserRole;

// 消息 + 发送者展示字段；系统消息的 sender 字段为空
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/chat.ts")]
pub struct ChatMessageView {
    pub id: i64,
    pub group_id: i64,
    pub sender_id: Option<i64>,
    pub sender_name: Option<String>,
    pub sender_role: Option<UserRole>,
    pub content: String,
    pub sent_at: chrono::DateTime<chrono::Utc>,
}

// 群组列表项：作业标题、过期时间、计算出的活跃标志与最近一条消息
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/chat.ts")]
pub struct ChatGroupView {
    pub id: i64,
    pub assignment_id: i64,
    pub assignment_title: String,
    pub expires_at: chrono::DateTime<chrono::Utc>,
    pub active: bool,
    pub latest_message: Option<ChatMessageView>,
}
