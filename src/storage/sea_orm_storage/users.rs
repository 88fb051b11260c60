use super::SeaOrmStorage;
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{AssignMateError, Result};
use crate::models::{auth::requests::RegisterRequest, users::entities::User};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set, SqlErr};

impl SeaOrmStorage {
    /// 创建用户
    ///
    /// 邮箱唯一索引冲突映射为 Conflict，并发注册同一邮箱时第二个请求拿到它。
    pub async fn create_user_impl(
        &self,
        req: RegisterRequest,
        password_hash: String,
    ) -> Result<User> {
        let now = chrono::Utc::now().timestamp();
        let email = req.email.clone();

        let model = ActiveModel {
            full_name: Set(req.full_name),
            email: Set(req.email),
            password_hash: Set(password_hash),
            role: Set(req.role.to_string()),
            college_id: Set(req.college_id),
            faculty_id: Set(req.faculty_id),
            course_id: Set(req.course_id),
            class_id: Set(req.class_id),
            prn: Set(req.prn),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                AssignMateError::conflict(format!("邮箱已被注册: {email}"))
            } else {
                AssignMateError::database_operation(format!("创建用户失败: {e}"))
            }
        })?;

        Ok(result.into_user())
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AssignMateError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过邮箱获取用户
    pub async fn get_user_by_email_impl(&self, email: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| AssignMateError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }
}
