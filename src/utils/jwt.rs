use crate::config::AppConfig;
use actix_web::cookie::{Cookie, SameSite};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

pub const SESSION_COOKIE: &str = "session_token";
const BEARER_PREFIX: &str = "Bearer ";

// JWT Claims 结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,   // Subject (user ID)
    pub email: String, // 用户邮箱
    pub role: String,  // 用户角色
    pub exp: usize,    // Expiration time (时间戳)
    pub iat: usize,    // Issued at (签发时间)
}

pub struct JwtUtils;

impl JwtUtils {
    // 获取 JWT 密钥
    fn get_secret() -> String {
        AppConfig::get().jwt.secret.clone()
    }

    // 生成会话令牌，有效期由配置决定（默认 60 分钟）
    pub fn generate_session_token(
        user_id: i64,
        email: &str,
        role: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let config = AppConfig::get();
        let now = chrono::Utc::now();
        let expiration = now + chrono::Duration::minutes(config.jwt.session_token_expiry);

        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            exp: expiration.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        let secret = Self::get_secret();
        let encoding_key = EncodingKey::from_secret(secret.as_ref());

        encode(&Header::default(), &claims, &encoding_key)
    }

    // 验证会话令牌
    pub fn verify_session_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let secret = Self::get_secret();
        let decoding_key = DecodingKey::from_secret(secret.as_ref());
        let validation = Validation::default();

        decode::<Claims>(token, &decoding_key, &validation).map(|token_data| token_data.claims)
    }

    /// 创建会话令牌 Cookie
    pub fn create_session_cookie(session_token: &str) -> Cookie<'static> {
        let config = AppConfig::get();
        Cookie::build(SESSION_COOKIE, session_token.to_string())
            .path("/")
            .max_age(actix_web::cookie::time::Duration::minutes(
                config.jwt.session_token_expiry,
            ))
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(config.is_production()) // 生产环境下使用 HTTPS
            .finish()
    }

    /// 从请求中提取会话令牌：优先 Cookie，其次 Authorization Bearer 头
    pub fn extract_session_token(req: &actix_web::HttpRequest) -> Option<String> {
        if let Some(cookie) = req.cookie(SESSION_COOKIE) {
            return Some(cookie.value().to_string());
        }

        req.headers()
            .get(actix_web::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.strip_prefix(BEARER_PREFIX))
            .map(|s| s.to_string())
    }
}
