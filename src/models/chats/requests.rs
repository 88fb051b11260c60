use serde::Deserialize;
use ts_rs::TS;

// 发送消息请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/chat.ts")]
pub struct SendMessageRequest {
    pub group_id: i64,
    pub content: String,
}
