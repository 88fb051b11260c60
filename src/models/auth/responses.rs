use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::users::entities::User;

// 登录响应，令牌同时写入 HttpOnly Cookie
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct LoginResponse {
    pub session_token: String,
    /// 有效期（秒）
    pub expires_in: i64,
    pub user: User,
}
