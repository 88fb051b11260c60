use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct Assignment {
    // 唯一 ID
    pub id: i64,
    // 目标班级 ID
    pub class_id: i64,
    // 布置作业的教师 ID
    pub teacher_id: i64,
    // 作业标题
    pub title: String,
    // 作业描述
    pub description: Option<String>,
    // 截止时间，同时决定聊天群组的过期时间
    pub due_date: chrono::DateTime<chrono::Utc>,
    // 布置时间
    pub created_at: chrono::DateTime<chrono::Utc>,
}
