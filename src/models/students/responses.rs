use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::assignments::entities::Assignment;
use crate::models::submissions::entities::Submission;

// 学生视角的作业条目：作业 + 本人提交（如有）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentAssignmentView {
    #[serde(flatten)]
    pub assignment: Assignment,
    pub is_submitted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission: Option<Submission>,
}
