use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::users::entities::UserRole;
use crate::services::StudentService;

// 懒加载的全局 StudentService 实例
static STUDENT_SERVICE: Lazy<StudentService> = Lazy::new(StudentService::new_lazy);

// 学生视角的作业列表（合并本人提交状态）
pub async fn list_student_assignments(req: HttpRequest) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.assignments(&req).await
}

// 配置路由
pub fn configure_student_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/student")
            .wrap(middlewares::RequireRole::new(&UserRole::Student))
            .wrap(middlewares::RequireJWT)
            .route("/assignments", web::get().to(list_student_assignments)),
    );
}
