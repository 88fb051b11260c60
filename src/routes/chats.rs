use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::chats::requests::SendMessageRequest;
use crate::models::common::pagination::PaginationQuery;
use crate::services::ChatService;
use crate::utils::SafeIDI64;

// 懒加载的全局 ChatService 实例
static CHAT_SERVICE: Lazy<ChatService> = Lazy::new(ChatService::new_lazy);

// 当前用户可见的聊天群组
pub async fn list_chat_groups(req: HttpRequest) -> ActixResult<HttpResponse> {
    CHAT_SERVICE.groups(&req).await
}

// 群组消息（升序分页）
pub async fn list_chat_messages(
    req: HttpRequest,
    path: SafeIDI64,
    query: web::Query<PaginationQuery>,
) -> ActixResult<HttpResponse> {
    CHAT_SERVICE.messages(path.0, query.into_inner(), &req).await
}

// 发送消息
pub async fn send_chat_message(
    req: HttpRequest,
    body: web::Json<SendMessageRequest>,
) -> ActixResult<HttpResponse> {
    CHAT_SERVICE.send(body.into_inner(), &req).await
}

// 配置路由；群组成员资格在业务层校验
pub fn configure_chat_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/chat")
            .wrap(middlewares::RequireJWT)
            .route("/groups", web::get().to(list_chat_groups))
            .route("/messages/{groupId}", web::get().to(list_chat_messages))
            .route("/send", web::post().to(send_chat_message)),
    );
}
