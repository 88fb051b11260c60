use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 教师针对某次提交的评语，可要求限期重新提交；
// 学生成功重交后评语即被消费（删除）。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/remark.ts")]
pub struct Remark {
    pub id: i64,
    pub submission_id: i64,
    pub teacher_id: i64,
    pub message: String,
    pub resubmission_required: bool,
    pub resubmission_deadline: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
