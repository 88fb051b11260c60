use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::Submission;

// 提交 + 学生展示字段
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionWithStudent {
    #[serde(flatten)]
    pub submission: Submission,
    pub student_name: String,
    /// 学号
    pub student_prn: Option<String>,
}
