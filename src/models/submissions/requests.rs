use serde::Deserialize;
use ts_rs::TS;

// 评分请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct GradeSubmissionRequest {
    /// 0 到 100 分（含两端）
    pub marks: i32,
    pub feedback: Option<String>,
}
