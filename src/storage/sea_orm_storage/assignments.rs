//! 作业存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments};
use crate::entity::chat_groups::ActiveModel as ChatGroupActiveModel;
use crate::entity::chat_messages::ActiveModel as ChatMessageActiveModel;
use crate::entity::classes::{Column as ClassColumn, Entity as Classes};
use crate::entity::courses::{Column as CourseColumn, Entity as Courses};
use crate::entity::users::Entity as Users;
use crate::errors::{AssignMateError, Result};
use crate::models::assignments::{
    entities::Assignment,
    requests::CreateAssignmentRequest,
    responses::{AssignmentDetailResponse, TeacherAssignmentListItem},
};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建作业
    ///
    /// 作业、聊天群组和欢迎消息在同一事务内写入，
    /// 任何一步失败都不会留下没有群组的作业。
    pub async fn create_assignment_with_chat_group_impl(
        &self,
        teacher_id: i64,
        req: CreateAssignmentRequest,
        expires_at: DateTime<Utc>,
        welcome_message: &str,
    ) -> Result<Assignment> {
        let now = chrono::Utc::now().timestamp();

        let txn = self.db.begin().await.map_err(|e| {
            AssignMateError::database_operation(format!("开启事务失败: {e}"))
        })?;

        let assignment = ActiveModel {
            class_id: Set(req.class_id),
            teacher_id: Set(teacher_id),
            title: Set(req.title),
            description: Set(req.description),
            due_date: Set(req.due_date.timestamp()),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| AssignMateError::database_operation(format!("创建作业失败: {e}")))?;

        let group = ChatGroupActiveModel {
            assignment_id: Set(assignment.id),
            expires_at: Set(expires_at.timestamp()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| AssignMateError::database_operation(format!("创建聊天群组失败: {e}")))?;

        // 系统欢迎消息，user_id 为空
        ChatMessageActiveModel {
            group_id: Set(group.id),
            user_id: Set(None),
            content: Set(welcome_message.to_string()),
            sent_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| AssignMateError::database_operation(format!("写入欢迎消息失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| AssignMateError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(assignment.into_assignment())
    }

    /// 通过 ID 获取作业
    pub async fn get_assignment_by_id_impl(&self, id: i64) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AssignMateError::database_operation(format!("查询作业失败: {e}")))?;

        Ok(result.map(|m| m.into_assignment()))
    }

    /// 获取作业详情（带教师/班级/课程展示字段）
    pub async fn get_assignment_detail_impl(
        &self,
        id: i64,
    ) -> Result<Option<AssignmentDetailResponse>> {
        let Some(assignment) = Assignments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AssignMateError::database_operation(format!("查询作业失败: {e}")))?
        else {
            return Ok(None);
        };

        let teacher = Users::find_by_id(assignment.teacher_id)
            .one(&self.db)
            .await
            .map_err(|e| AssignMateError::database_operation(format!("查询教师失败: {e}")))?;

        let class = Classes::find_by_id(assignment.class_id)
            .one(&self.db)
            .await
            .map_err(|e| AssignMateError::database_operation(format!("查询班级失败: {e}")))?;

        let course = if let Some(ref class) = class {
            Courses::find_by_id(class.course_id)
                .one(&self.db)
                .await
                .map_err(|e| AssignMateError::database_operation(format!("查询课程失败: {e}")))?
        } else {
            None
        };

        Ok(Some(AssignmentDetailResponse {
            assignment: assignment.into_assignment(),
            teacher_name: teacher.map(|t| t.full_name).unwrap_or_default(),
            class_name: class.map(|c| c.name).unwrap_or_default(),
            course_name: course.map(|c| c.name).unwrap_or_default(),
        }))
    }

    /// 某班级的作业列表（学生视角），最新布置的在前
    pub async fn list_assignments_for_class_impl(&self, class_id: i64) -> Result<Vec<Assignment>> {
        let results = Assignments::find()
            .filter(Column::ClassId.eq(class_id))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| AssignMateError::database_operation(format!("查询作业列表失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_assignment()).collect())
    }

    /// 某教师布置的作业列表，带班级/课程展示字段
    pub async fn list_assignments_for_teacher_impl(
        &self,
        teacher_id: i64,
    ) -> Result<Vec<TeacherAssignmentListItem>> {
        let assignments = Assignments::find()
            .filter(Column::TeacherId.eq(teacher_id))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| AssignMateError::database_operation(format!("查询作业列表失败: {e}")))?;

        // 批量查询班级与课程名称
        let class_ids: Vec<i64> = assignments
            .iter()
            .map(|a| a.class_id)
            .collect::<std::collections::HashSet<_>>()
            .into_iter()
            .collect();

        let classes = Classes::find()
            .filter(ClassColumn::Id.is_in(class_ids))
            .all(&self.db)
            .await
            .map_err(|e| AssignMateError::database_operation(format!("查询班级信息失败: {e}")))?;

        let course_ids: Vec<i64> = classes.iter().map(|c| c.course_id).collect();
        let courses = Courses::find()
            .filter(CourseColumn::Id.is_in(course_ids))
            .all(&self.db)
            .await
            .map_err(|e| AssignMateError::database_operation(format!("查询课程信息失败: {e}")))?;

        let course_map: HashMap<i64, String> =
            courses.into_iter().map(|c| (c.id, c.name)).collect();
        let class_map: HashMap<i64, (String, i64)> = classes
            .into_iter()
            .map(|c| (c.id, (c.name, c.course_id)))
            .collect();

        let items = assignments
            .into_iter()
            .map(|a| {
                let class = class_map.get(&a.class_id);
                TeacherAssignmentListItem {
                    class_name: class.map(|(name, _)| name.clone()).unwrap_or_default(),
                    course_name: class
                        .and_then(|(_, course_id)| course_map.get(course_id).cloned())
                        .unwrap_or_default(),
                    assignment: a.into_assignment(),
                }
            })
            .collect();

        Ok(items)
    }
}
