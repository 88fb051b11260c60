pub mod error_code;
pub mod pagination;
pub mod response;

/// 程序启动时间，注入 app data 供诊断使用
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
