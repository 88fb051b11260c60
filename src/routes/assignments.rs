use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::assignments::requests::CreateAssignmentRequest;
use crate::models::users::entities::UserRole;
use crate::services::AssignmentService;
use crate::utils::SafeIDI64;

// 懒加载的全局 AssignmentService 实例
static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);

// 创建作业
pub async fn create_assignment(
    req: HttpRequest,
    body: web::Json<CreateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.create(body.into_inner(), &req).await
}

// 作业详情
pub async fn get_assignment(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.detail(path.0, &req).await
}

// 某作业的提交列表
pub async fn list_assignment_submissions(
    req: HttpRequest,
    path: SafeIDI64,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.submissions(path.0, &req).await
}

// 学生视角的作业列表
pub async fn list_assignments_for_student(req: HttpRequest) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.list_for_student(&req).await
}

// 教师视角的作业列表
pub async fn list_assignments_for_teacher(req: HttpRequest) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.list_for_teacher(&req).await
}

// 配置路由
pub fn configure_assignment_routes(cfg: &mut web::ServiceConfig) {
    // 固定路径段先注册，避免被 /{id} 吞掉
    cfg.service(
        web::scope("/api/assignment")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 创建作业 - 仅教师
                    .route(
                        web::post()
                            .to(create_assignment)
                            .wrap(middlewares::RequireRole::new(&UserRole::Teacher)),
                    ),
            )
            // 学生作业列表 - 仅学生
            .service(
                web::resource("/get/student")
                    .route(web::get().to(list_assignments_for_student))
                    .wrap(middlewares::RequireRole::new(&UserRole::Student)),
            )
            // 教师作业列表 - 仅教师
            .service(
                web::resource("/get/teacher")
                    .route(web::get().to(list_assignments_for_teacher))
                    .wrap(middlewares::RequireRole::new(&UserRole::Teacher)),
            )
            // 某作业的提交列表 - 仅教师
            .service(
                web::resource("/submission/{assignmentId}")
                    .route(web::get().to(list_assignment_submissions))
                    .wrap(middlewares::RequireRole::new(&UserRole::Teacher)),
            )
            // 作业详情 - 仅教师
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_assignment))
                    .wrap(middlewares::RequireRole::new(&UserRole::Teacher)),
            ),
    );
}
