//! 评语存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::remarks::{ActiveModel, Column, Entity as Remarks};
use crate::entity::submissions::{
    ActiveModel as SubmissionActiveModel, Entity as Submissions,
};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{AssignMateError, Result};
use crate::models::remarks::{
    entities::Remark, requests::CreateRemarkRequest, responses::RemarkWithTeacher,
};
use crate::models::submissions::entities::SubmissionStatus;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建评语
    ///
    /// 要求重交时在同一事务内把提交状态置为待重交。
    pub async fn create_remark_impl(
        &self,
        teacher_id: i64,
        req: CreateRemarkRequest,
    ) -> Result<Remark> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AssignMateError::database_operation(format!("开启事务失败: {e}")))?;

        Submissions::find_by_id(req.submission_id)
            .one(&txn)
            .await
            .map_err(|e| AssignMateError::database_operation(format!("查询提交失败: {e}")))?
            .ok_or_else(|| {
                AssignMateError::not_found(format!("提交不存在: {}", req.submission_id))
            })?;

        let remark = ActiveModel {
            submission_id: Set(req.submission_id),
            teacher_id: Set(teacher_id),
            message: Set(req.message),
            resubmission_required: Set(req.resubmission_required),
            resubmission_deadline: Set(req.resubmission_deadline.map(|d| d.timestamp())),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| AssignMateError::database_operation(format!("创建评语失败: {e}")))?;

        if req.resubmission_required {
            SubmissionActiveModel {
                id: Set(req.submission_id),
                status: Set(SubmissionStatus::ResubmissionRequested.to_string()),
                updated_at: Set(now),
                ..Default::default()
            }
            .update(&txn)
            .await
            .map_err(|e| {
                AssignMateError::database_operation(format!("更新提交状态失败: {e}"))
            })?;
        }

        txn.commit()
            .await
            .map_err(|e| AssignMateError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(remark.into_remark())
    }

    /// 通过 ID 获取评语
    pub async fn get_remark_by_id_impl(&self, id: i64) -> Result<Option<Remark>> {
        let result = Remarks::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AssignMateError::database_operation(format!("查询评语失败: {e}")))?;

        Ok(result.map(|m| m.into_remark()))
    }

    /// 某提交的评语列表（带教师展示字段），最新的在前
    pub async fn list_remarks_for_submission_impl(
        &self,
        submission_id: i64,
    ) -> Result<Vec<RemarkWithTeacher>> {
        let remarks = Remarks::find()
            .filter(Column::SubmissionId.eq(submission_id))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| AssignMateError::database_operation(format!("查询评语列表失败: {e}")))?;

        // 批量查询教师信息
        let teacher_ids: Vec<i64> = remarks
            .iter()
            .map(|r| r.teacher_id)
            .collect::<std::collections::HashSet<_>>()
            .into_iter()
            .collect();

        let teachers = Users::find()
            .filter(UserColumn::Id.is_in(teacher_ids))
            .all(&self.db)
            .await
            .map_err(|e| AssignMateError::database_operation(format!("查询教师信息失败: {e}")))?;

        let teacher_map: HashMap<i64, String> =
            teachers.into_iter().map(|u| (u.id, u.full_name)).collect();

        let items = remarks
            .into_iter()
            .map(|r| RemarkWithTeacher {
                teacher_name: teacher_map
                    .get(&r.teacher_id)
                    .cloned()
                    .unwrap_or_else(|| "未知教师".to_string()),
                remark: r.into_remark(),
            })
            .collect();

        Ok(items)
    }
}
