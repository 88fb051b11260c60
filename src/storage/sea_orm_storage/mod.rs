//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod affiliations;
mod assignments;
mod chats;
mod remarks;
mod submissions;
mod users;

#[cfg(test)]
mod tests;

use crate::config::AppConfig;
use crate::errors::{AssignMateError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| AssignMateError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| AssignMateError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| AssignMateError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| AssignMateError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(AssignMateError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::errors::Result as StorageResult;
use crate::models::{
    PaginatedResponse,
    affiliations::entities::{Class, College, Course, Faculty},
    assignments::{
        entities::Assignment,
        requests::CreateAssignmentRequest,
        responses::{AssignmentDetailResponse, TeacherAssignmentListItem},
    },
    auth::requests::RegisterRequest,
    chats::{
        entities::{ChatGroup, ChatMessage},
        responses::{ChatGroupView, ChatMessageView},
    },
    remarks::{entities::Remark, requests::CreateRemarkRequest, responses::RemarkWithTeacher},
    submissions::{entities::Submission, responses::SubmissionWithStudent},
    users::entities::User,
};
use crate::storage::Storage;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(
        &self,
        req: RegisterRequest,
        password_hash: String,
    ) -> StorageResult<User> {
        self.create_user_impl(req, password_hash).await
    }

    async fn get_user_by_id(&self, id: i64) -> StorageResult<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> StorageResult<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    // 组织结构模块
    async fn get_college_by_id(&self, id: i64) -> StorageResult<Option<College>> {
        self.get_college_by_id_impl(id).await
    }

    async fn get_faculty_by_id(&self, id: i64) -> StorageResult<Option<Faculty>> {
        self.get_faculty_by_id_impl(id).await
    }

    async fn get_course_by_id(&self, id: i64) -> StorageResult<Option<Course>> {
        self.get_course_by_id_impl(id).await
    }

    async fn get_class_by_id(&self, id: i64) -> StorageResult<Option<Class>> {
        self.get_class_by_id_impl(id).await
    }

    async fn create_college(&self, name: &str) -> StorageResult<College> {
        self.create_college_impl(name).await
    }

    async fn create_faculty(&self, college_id: i64, name: &str) -> StorageResult<Faculty> {
        self.create_faculty_impl(college_id, name).await
    }

    async fn create_course(&self, faculty_id: i64, name: &str) -> StorageResult<Course> {
        self.create_course_impl(faculty_id, name).await
    }

    async fn create_class(&self, course_id: i64, name: &str) -> StorageResult<Class> {
        self.create_class_impl(course_id, name).await
    }

    async fn count_colleges(&self) -> StorageResult<u64> {
        self.count_colleges_impl().await
    }

    // 作业模块
    async fn create_assignment_with_chat_group(
        &self,
        teacher_id: i64,
        req: CreateAssignmentRequest,
        expires_at: DateTime<Utc>,
        welcome_message: &str,
    ) -> StorageResult<Assignment> {
        self.create_assignment_with_chat_group_impl(teacher_id, req, expires_at, welcome_message)
            .await
    }

    async fn get_assignment_by_id(&self, id: i64) -> StorageResult<Option<Assignment>> {
        self.get_assignment_by_id_impl(id).await
    }

    async fn get_assignment_detail(
        &self,
        id: i64,
    ) -> StorageResult<Option<AssignmentDetailResponse>> {
        self.get_assignment_detail_impl(id).await
    }

    async fn list_assignments_for_class(&self, class_id: i64) -> StorageResult<Vec<Assignment>> {
        self.list_assignments_for_class_impl(class_id).await
    }

    async fn list_assignments_for_teacher(
        &self,
        teacher_id: i64,
    ) -> StorageResult<Vec<TeacherAssignmentListItem>> {
        self.list_assignments_for_teacher_impl(teacher_id).await
    }

    // 提交模块
    async fn upsert_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
        file_token: &str,
        file_name: &str,
    ) -> StorageResult<(Submission, Option<String>)> {
        self.upsert_submission_impl(assignment_id, student_id, file_token, file_name)
            .await
    }

    async fn get_submission_by_id(&self, id: i64) -> StorageResult<Option<Submission>> {
        self.get_submission_by_id_impl(id).await
    }

    async fn get_submission_by_assignment_and_student(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> StorageResult<Option<Submission>> {
        self.get_submission_by_assignment_and_student_impl(assignment_id, student_id)
            .await
    }

    async fn list_submissions_for_assignment(
        &self,
        assignment_id: i64,
    ) -> StorageResult<Vec<SubmissionWithStudent>> {
        self.list_submissions_for_assignment_impl(assignment_id)
            .await
    }

    async fn list_submissions_by_student(
        &self,
        student_id: i64,
    ) -> StorageResult<Vec<Submission>> {
        self.list_submissions_by_student_impl(student_id).await
    }

    async fn grade_submission(
        &self,
        submission_id: i64,
        marks: i32,
        feedback: Option<String>,
    ) -> StorageResult<Option<Submission>> {
        self.grade_submission_impl(submission_id, marks, feedback)
            .await
    }

    async fn resubmit_submission(
        &self,
        submission_id: i64,
        remark_id: i64,
        file_token: &str,
        file_name: &str,
    ) -> StorageResult<(Submission, String)> {
        self.resubmit_submission_impl(submission_id, remark_id, file_token, file_name)
            .await
    }

    // 评语模块
    async fn create_remark(
        &self,
        teacher_id: i64,
        req: CreateRemarkRequest,
    ) -> StorageResult<Remark> {
        self.create_remark_impl(teacher_id, req).await
    }

    async fn get_remark_by_id(&self, id: i64) -> StorageResult<Option<Remark>> {
        self.get_remark_by_id_impl(id).await
    }

    async fn list_remarks_for_submission(
        &self,
        submission_id: i64,
    ) -> StorageResult<Vec<RemarkWithTeacher>> {
        self.list_remarks_for_submission_impl(submission_id).await
    }

    // 聊天模块
    async fn get_chat_group_by_id(&self, id: i64) -> StorageResult<Option<ChatGroup>> {
        self.get_chat_group_by_id_impl(id).await
    }

    async fn list_chat_groups_for_class(
        &self,
        class_id: i64,
    ) -> StorageResult<Vec<ChatGroupView>> {
        self.list_chat_groups_for_class_impl(class_id).await
    }

    async fn list_chat_groups_for_teacher(
        &self,
        teacher_id: i64,
    ) -> StorageResult<Vec<ChatGroupView>> {
        self.list_chat_groups_for_teacher_impl(teacher_id).await
    }

    async fn list_chat_messages(
        &self,
        group_id: i64,
        page: i64,
        size: i64,
    ) -> StorageResult<PaginatedResponse<ChatMessageView>> {
        self.list_chat_messages_impl(group_id, page, size).await
    }

    async fn insert_chat_message(
        &self,
        group_id: i64,
        user_id: Option<i64>,
        content: &str,
    ) -> StorageResult<ChatMessage> {
        self.insert_chat_message_impl(group_id, user_id, content)
            .await
    }
}
