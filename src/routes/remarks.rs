use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::remarks::requests::{CreateRemarkRequest, ListRemarksQuery};
use crate::models::users::entities::UserRole;
use crate::services::RemarkService;

// 懒加载的全局 RemarkService 实例
static REMARK_SERVICE: Lazy<RemarkService> = Lazy::new(RemarkService::new_lazy);

// 某提交的评语列表
pub async fn list_remarks(
    req: HttpRequest,
    query: web::Query<ListRemarksQuery>,
) -> ActixResult<HttpResponse> {
    REMARK_SERVICE.list(query.into_inner(), &req).await
}

// 创建评语
pub async fn create_remark(
    req: HttpRequest,
    body: web::Json<CreateRemarkRequest>,
) -> ActixResult<HttpResponse> {
    REMARK_SERVICE.create(body.into_inner(), &req).await
}

// 配置路由
pub fn configure_remark_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/remark")
            .wrap(middlewares::RequireJWT)
            // 评语列表 - 所有登录用户（业务层校验提交归属）
            .service(web::resource("").route(web::get().to(list_remarks)))
            // 创建评语 - 仅教师
            .service(
                web::resource("/create")
                    .route(web::post().to(create_remark))
                    .wrap(middlewares::RequireRole::new(&UserRole::Teacher)),
            ),
    );
}
