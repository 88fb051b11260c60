use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 提交状态机：
// Pending --评分--> Graded --要求重交的评语--> ResubmissionRequested --重新提交--> Pending
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub enum SubmissionStatus {
    Pending,               // 已提交待批改
    Graded,                // 已批改
    ResubmissionRequested, // 教师要求重新提交
}

impl<'de> Deserialize<'de> for SubmissionStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<SubmissionStatus>().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionStatus::Pending => write!(f, "pending"),
            SubmissionStatus::Graded => write!(f, "graded"),
            SubmissionStatus::ResubmissionRequested => write!(f, "resubmission_requested"),
        }
    }
}

impl std::str::FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(SubmissionStatus::Pending),
            "graded" => Ok(SubmissionStatus::Graded),
            "resubmission_requested" => Ok(SubmissionStatus::ResubmissionRequested),
            _ => Err(format!("Invalid submission status: {s}")),
        }
    }
}

// 提交实体，每个 (assignment, student) 对只有一条当前记录
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct Submission {
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    /// 文件存储返回的不透明引用
    pub file_token: String,
    /// 学生上传时的原始文件名
    pub file_name: String,
    pub status: SubmissionStatus,
    pub marks: Option<i32>,
    pub feedback: Option<String>,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [
            SubmissionStatus::Pending,
            SubmissionStatus::Graded,
            SubmissionStatus::ResubmissionRequested,
        ] {
            assert_eq!(
                status.to_string().parse::<SubmissionStatus>().unwrap(),
                status
            );
        }
        assert!("unknown".parse::<SubmissionStatus>().is_err());
    }
}
