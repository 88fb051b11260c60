//! 提交存储操作
//!
//! 每对 (assignment_id, student_id) 只保留一条当前提交，
//! 首次上传与重新上传共用同一条 upsert 路径。

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::remarks::Entity as Remarks;
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{AssignMateError, Result};
use crate::models::submissions::{
    entities::{Submission, SubmissionStatus},
    responses::SubmissionWithStudent,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 插入或更新当前提交
    ///
    /// 已有提交时替换文件并重置为待批改，返回被替换的旧文件 token
    /// 以便调用方清理外部存储。
    pub async fn upsert_submission_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
        file_token: &str,
        file_name: &str,
    ) -> Result<(Submission, Option<String>)> {
        let now = chrono::Utc::now().timestamp();

        let existing = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| AssignMateError::database_operation(format!("查询提交失败: {e}")))?;

        match existing {
            Some(model) => {
                let old_token = model.file_token.clone();

                let updated = ActiveModel {
                    id: Set(model.id),
                    file_token: Set(file_token.to_string()),
                    file_name: Set(file_name.to_string()),
                    status: Set(SubmissionStatus::Pending.to_string()),
                    marks: Set(None),
                    feedback: Set(None),
                    submitted_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .update(&self.db)
                .await
                .map_err(|e| AssignMateError::database_operation(format!("更新提交失败: {e}")))?;

                Ok((updated.into_submission(), Some(old_token)))
            }
            None => {
                let inserted = ActiveModel {
                    assignment_id: Set(assignment_id),
                    student_id: Set(student_id),
                    file_token: Set(file_token.to_string()),
                    file_name: Set(file_name.to_string()),
                    status: Set(SubmissionStatus::Pending.to_string()),
                    marks: Set(None),
                    feedback: Set(None),
                    submitted_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .insert(&self.db)
                .await
                .map_err(|e| AssignMateError::database_operation(format!("创建提交失败: {e}")))?;

                Ok((inserted.into_submission(), None))
            }
        }
    }

    /// 通过 ID 获取提交
    pub async fn get_submission_by_id_impl(&self, id: i64) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AssignMateError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 获取某学生在某作业的当前提交
    pub async fn get_submission_by_assignment_and_student_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| AssignMateError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 某作业的全部提交（教师视角，带学生展示字段）
    pub async fn list_submissions_for_assignment_impl(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<SubmissionWithStudent>> {
        let submissions = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .order_by_desc(Column::SubmittedAt)
            .all(&self.db)
            .await
            .map_err(|e| AssignMateError::database_operation(format!("查询提交列表失败: {e}")))?;

        // 批量查询学生信息
        let student_ids: Vec<i64> = submissions
            .iter()
            .map(|s| s.student_id)
            .collect::<std::collections::HashSet<_>>()
            .into_iter()
            .collect();

        let students = Users::find()
            .filter(UserColumn::Id.is_in(student_ids))
            .all(&self.db)
            .await
            .map_err(|e| AssignMateError::database_operation(format!("查询学生信息失败: {e}")))?;

        let student_map: HashMap<i64, _> = students.into_iter().map(|u| (u.id, u)).collect();

        let items = submissions
            .into_iter()
            .map(|s| {
                let student = student_map.get(&s.student_id);
                SubmissionWithStudent {
                    student_name: student
                        .map(|u| u.full_name.clone())
                        .unwrap_or_else(|| "未知学生".to_string()),
                    student_prn: student.and_then(|u| u.prn.clone()),
                    submission: s.into_submission(),
                }
            })
            .collect();

        Ok(items)
    }

    /// 某学生的全部提交
    pub async fn list_submissions_by_student_impl(
        &self,
        student_id: i64,
    ) -> Result<Vec<Submission>> {
        let results = Submissions::find()
            .filter(Column::StudentId.eq(student_id))
            .all(&self.db)
            .await
            .map_err(|e| AssignMateError::database_operation(format!("查询提交列表失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_submission()).collect())
    }

    /// 评分
    pub async fn grade_submission_impl(
        &self,
        submission_id: i64,
        marks: i32,
        feedback: Option<String>,
    ) -> Result<Option<Submission>> {
        let existing = Submissions::find_by_id(submission_id)
            .one(&self.db)
            .await
            .map_err(|e| AssignMateError::database_operation(format!("查询提交失败: {e}")))?;

        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let updated = ActiveModel {
            id: Set(submission_id),
            status: Set(SubmissionStatus::Graded.to_string()),
            marks: Set(Some(marks)),
            feedback: Set(feedback),
            updated_at: Set(now),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| AssignMateError::database_operation(format!("评分失败: {e}")))?;

        Ok(Some(updated.into_submission()))
    }

    /// 重新提交
    ///
    /// 替换文件、重置状态并删除触发重交的评语，单事务完成。
    /// 评语已被并发请求消耗时整个事务回滚，提交保持原样。
    pub async fn resubmit_submission_impl(
        &self,
        submission_id: i64,
        remark_id: i64,
        file_token: &str,
        file_name: &str,
    ) -> Result<(Submission, String)> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AssignMateError::database_operation(format!("开启事务失败: {e}")))?;

        let existing = Submissions::find_by_id(submission_id)
            .one(&txn)
            .await
            .map_err(|e| AssignMateError::database_operation(format!("查询提交失败: {e}")))?
            .ok_or_else(|| {
                AssignMateError::not_found(format!("提交不存在: {submission_id}"))
            })?;

        let old_token = existing.file_token.clone();

        let updated = ActiveModel {
            id: Set(submission_id),
            file_token: Set(file_token.to_string()),
            file_name: Set(file_name.to_string()),
            status: Set(SubmissionStatus::Pending.to_string()),
            marks: Set(None),
            feedback: Set(None),
            submitted_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .update(&txn)
        .await
        .map_err(|e| AssignMateError::database_operation(format!("更新提交失败: {e}")))?;

        // 消耗评语；已被其他请求消耗时回滚
        let deleted = Remarks::delete_by_id(remark_id)
            .exec(&txn)
            .await
            .map_err(|e| AssignMateError::database_operation(format!("删除评语失败: {e}")))?;

        if deleted.rows_affected == 0 {
            txn.rollback().await.map_err(|e| {
                AssignMateError::database_operation(format!("回滚事务失败: {e}"))
            })?;
            return Err(AssignMateError::not_found(format!(
                "评语不存在或已被处理: {remark_id}"
            )));
        }

        txn.commit()
            .await
            .map_err(|e| AssignMateError::database_operation(format!("提交事务失败: {e}")))?;

        Ok((updated.into_submission(), old_token))
    }
}
