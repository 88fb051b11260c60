use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 学院 → 院系 → 课程 → 班级 四级层级，仅作为归属/查找数据

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/affiliation.ts")]
pub struct College {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/affiliation.ts")]
pub struct Faculty {
    pub id: i64,
    pub college_id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/affiliation.ts")]
pub struct Course {
    pub id: i64,
    pub faculty_id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/affiliation.ts")]
pub struct Class {
    pub id: i64,
    pub course_id: i64,
    pub faculty_id: i64,
    pub name: String,
}
