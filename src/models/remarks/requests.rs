use serde::Deserialize;
use ts_rs::TS;

// 创建评语请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/remark.ts")]
pub struct CreateRemarkRequest {
    pub submission_id: i64,
    pub message: String,
    #[serde(default)]
    pub resubmission_required: bool,
    pub resubmission_deadline: Option<chrono::DateTime<chrono::Utc>>,
}

// 评语列表查询参数
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/remark.ts")]
pub struct ListRemarksQuery {
    pub submission_id: i64,
}
