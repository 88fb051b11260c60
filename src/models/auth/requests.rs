use serde::Deserialize;
use ts_rs::TS;

use crate::models::users::entities::UserRole;

// 用户注册请求（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    /// 注册后角色即固定，不可变更
    pub role: UserRole,
    pub college_id: Option<i64>,
    pub faculty_id: Option<i64>,
    pub course_id: Option<i64>,
    pub class_id: Option<i64>,
    /// 学号
    pub prn: Option<String>,
}

// 用户登录请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}
