//! 路径参数提取器：非法 ID 直接返回 400 统一错误体

use actix_web::error::InternalError;
use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload};
use std::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

/// 路径末段的正整数 ID
///
/// 解析失败或非正数时返回 400，不进入业务层。
pub struct SafeIDI64(pub i64);

impl FromRequest for SafeIDI64 {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let parsed = req
            .match_info()
            .iter()
            .last()
            .and_then(|(_, value)| value.parse::<i64>().ok())
            .filter(|id| *id > 0);

        ready(match parsed {
            Some(id) => Ok(SafeIDI64(id)),
            None => {
                let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::BadRequest,
                    "Invalid ID in path",
                ));
                Err(InternalError::from_response("invalid path id", response).into())
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_valid_id() {
        let req = TestRequest::with_uri("/api/assignment/42")
            .param("id", "42")
            .to_http_request();
        let id = SafeIDI64::extract(&req).await.unwrap();
        assert_eq!(id.0, 42);
    }

    #[actix_web::test]
    async fn test_non_numeric_id_rejected() {
        let req = TestRequest::with_uri("/api/assignment/abc")
            .param("id", "abc")
            .to_http_request();
        assert!(SafeIDI64::extract(&req).await.is_err());
    }

    #[actix_web::test]
    async fn test_negative_id_rejected() {
        let req = TestRequest::with_uri("/api/assignment/-1")
            .param("id", "-1")
            .to_http_request();
        assert!(SafeIDI64::extract(&req).await.is_err());
    }
}
