use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::Assignment;

// 作业详情：作业 + 教师/班级/课程展示字段
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentDetailResponse {
    #[serde(flatten)]
    pub assignment: Assignment,
    pub teacher_name: String,
    pub class_name: String,
    pub course_name: String,
}

// 教师视角的作业列表项，带班级/课程展示字段
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct TeacherAssignmentListItem {
    #[serde(flatten)]
    pub assignment: Assignment,
    pub class_name: String,
    pub course_name: String,
}
