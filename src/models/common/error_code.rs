/// 业务错误码，随 ApiResponse 返回给前端
///
/// 0 表示成功；1xxx 为通用 HTTP 层错误；2xxx 认证/用户；
/// 3xxx 作业；4xxx 提交与文件；5xxx 评语；6xxx 聊天。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1002,
    NotFound = 1003,
    InternalServerError = 1004,

    AuthFailed = 2000,
    UserAlreadyExists = 2001,
    UserNotFound = 2002,
    InvalidEmail = 2003,
    AffiliationNotFound = 2004,

    AssignmentNotFound = 3000,
    ClassNotFound = 3001,
    AssignmentCreationFailed = 3002,

    SubmissionNotFound = 4000,
    FileTypeNotAllowed = 4001,
    FileSizeExceeded = 4002,
    EmptyFile = 4003,
    FileUploadFailed = 4004,
    FileNotFound = 4005,
    MarksOutOfRange = 4006,
    ResubmissionNotRequired = 4007,
    ResubmissionDeadlinePassed = 4008,
    SubmissionOwnershipMismatch = 4009,

    RemarkNotFound = 5000,
    RemarkCreationFailed = 5001,

    ChatGroupNotFound = 6000,
    ChatGroupExpired = 6001,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success as i32, 0);
        assert_eq!(ErrorCode::Unauthorized as i32, 1001);
        assert_eq!(ErrorCode::MarksOutOfRange as i32, 4006);
        assert_eq!(ErrorCode::ChatGroupExpired as i32, 6001);
    }
}
