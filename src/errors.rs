//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_assignmate_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum AssignMateError {
            $($variant(String),)*
        }

        impl AssignMateError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(AssignMateError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(AssignMateError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(AssignMateError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl AssignMateError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        AssignMateError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_assignmate_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    FileOperation("E004", "File Operation Error"),
    ExternalStorage("E005", "External Storage Error"),
    Validation("E006", "Validation Error"),
    NotFound("E007", "Resource Not Found"),
    BusinessRule("E008", "Business Rule Violation"),
    Serialization("E009", "Serialization Error"),
    DateParse("E010", "Date Parse Error"),
    Authentication("E011", "Authentication Error"),
    Authorization("E012", "Authorization Error"),
    CacheConnection("E013", "Cache Connection Error"),
    Conflict("E014", "Resource Conflict"),
}

impl AssignMateError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for AssignMateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for AssignMateError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for AssignMateError {
    fn from(err: sea_orm::DbErr) -> Self {
        AssignMateError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for AssignMateError {
    fn from(err: std::io::Error) -> Self {
        AssignMateError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for AssignMateError {
    fn from(err: serde_json::Error) -> Self {
        AssignMateError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for AssignMateError {
    fn from(err: chrono::ParseError) -> Self {
        AssignMateError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AssignMateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(AssignMateError::database_config("test").code(), "E001");
        assert_eq!(AssignMateError::external_storage("test").code(), "E005");
        assert_eq!(AssignMateError::validation("test").code(), "E006");
        assert_eq!(AssignMateError::authentication("test").code(), "E011");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            AssignMateError::business_rule("test").error_type(),
            "Business Rule Violation"
        );
        assert_eq!(
            AssignMateError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = AssignMateError::validation("Invalid input");
        assert_eq!(err.message(), "Invalid input");
    }

    #[test]
    fn test_format_simple() {
        let err = AssignMateError::not_found("Assignment 42");
        let formatted = err.format_simple();
        assert!(formatted.contains("Resource Not Found"));
        assert!(formatted.contains("Assignment 42"));
    }
}
