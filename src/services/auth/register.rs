use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::AssignMateError;
use crate::models::{ApiResponse, ErrorCode, auth::requests::RegisterRequest};
use crate::storage::Storage;
use crate::utils::is_valid_email;
use crate::utils::password::hash_password;

use super::AuthService;

pub async fn handle_register(
    service: &AuthService,
    register_request: RegisterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 1. 校验邮箱格式
    if !is_valid_email(&register_request.email) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::InvalidEmail,
            "Invalid email format",
        )));
    }

    // 2. 检查邮箱是否已注册
    match storage.get_user_by_email(&register_request.email).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::UserAlreadyExists,
                "Email already registered",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            tracing::error!("Register email lookup failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Registration failed",
                )),
            );
        }
    }

    // 3. 校验归属层级（提供了哪级就校验哪级）
    if let Err(response) = check_affiliations(&storage, &register_request).await {
        return Ok(response);
    }

    // 4. 哈希密码并创建用户
    let password_hash = match hash_password(&register_request.password) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!("Password hashing failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Registration failed",
                )),
            );
        }
    };

    match storage.create_user(register_request, password_hash).await {
        Ok(user) => {
            tracing::info!("User {} registered as {}", user.email, user.role);
            Ok(HttpResponse::Created().json(ApiResponse::success(user, "Registration successful")))
        }
        // 预检通过后并发注册撞上唯一索引
        Err(AssignMateError::Conflict(_)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::UserAlreadyExists, "Email already registered"),
        )),
        Err(e) => {
            tracing::error!("User creation failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Registration failed",
                )),
            )
        }
    }
}

// 校验提供的归属 ID 都指向存在的记录
async fn check_affiliations(
    storage: &Arc<dyn Storage>,
    req: &RegisterRequest,
) -> Result<(), HttpResponse> {
    if let Some(college_id) = req.college_id {
        check_exists(
            storage.get_college_by_id(college_id).await.map(|c| c.is_some()),
            "College not found",
        )?;
    }
    if let Some(faculty_id) = req.faculty_id {
        check_exists(
            storage.get_faculty_by_id(faculty_id).await.map(|f| f.is_some()),
            "Faculty not found",
        )?;
    }
    if let Some(course_id) = req.course_id {
        check_exists(
            storage.get_course_by_id(course_id).await.map(|c| c.is_some()),
            "Course not found",
        )?;
    }
    if let Some(class_id) = req.class_id {
        check_exists(
            storage.get_class_by_id(class_id).await.map(|c| c.is_some()),
            "Class not found",
        )?;
    }
    Ok(())
}

fn check_exists(
    found: crate::errors::Result<bool>,
    message: &str,
) -> Result<(), HttpResponse> {
    match found {
        Ok(true) => Ok(()),
        Ok(false) => Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::AffiliationNotFound,
            message,
        ))),
        Err(e) => {
            tracing::error!("Affiliation lookup failed: {}", e);
            Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Registration failed",
                )),
            )
        }
    }
}
