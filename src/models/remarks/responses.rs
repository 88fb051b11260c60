use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::Remark;

// 评语 + 教师展示字段
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/remark.ts")]
pub struct RemarkWithTeacher {
    #[serde(flatten)]
    pub remark: Remark,
    pub teacher_name: String,
}
