use std::sync::Arc;

use chrono::{DateTime, Utc};

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

use crate::errors::Result;

pub mod file_store;
pub mod sea_orm_storage;

pub use file_store::{FileStore, create_file_store};

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（密码已在服务层哈希）
    async fn create_user(&self, req: RegisterRequest, password_hash: String) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// 学院/院系/课程/班级管理方法
    async fn get_college_by_id(&self, id: i64) -> Result<Option<College>>;
    async fn get_faculty_by_id(&self, id: i64) -> Result<Option<Faculty>>;
    async fn get_course_by_id(&self, id: i64) -> Result<Option<Course>>;
    async fn get_class_by_id(&self, id: i64) -> Result<Option<Class>>;
    async fn create_college(&self, name: &str) -> Result<College>;
    async fn create_faculty(&self, college_id: i64, name: &str) -> Result<Faculty>;
    async fn create_course(&self, faculty_id: i64, name: &str) -> Result<Course>;
    // 班级的院系由所属课程推导，保证两者一致
    async fn create_class(&self, course_id: i64, name: &str) -> Result<Class>;
    async fn count_colleges(&self) -> Result<u64>;

    /// 作业管理方法
    // 创建作业，同一事务内建立聊天群组并写入欢迎消息
    async fn create_assignment_with_chat_group(
        &self,
        teacher_id: i64,
        req: CreateAssignmentRequest,
        expires_at: DateTime<Utc>,
        welcome_message: &str,
    ) -> Result<Assignment>;
    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>>;
    // 作业详情（带教师/班级/课程展示字段）
    async fn get_assignment_detail(&self, id: i64) -> Result<Option<AssignmentDetailResponse>>;
    // 某班级的作业列表（学生视角）
    async fn list_assignments_for_class(&self, class_id: i64) -> Result<Vec<Assignment>>;
    // 某教师布置的作业列表
    async fn list_assignments_for_teacher(
        &self,
        teacher_id: i64,
    ) -> Result<Vec<TeacherAssignmentListItem>>;

    /// 提交管理方法
    // 插入或更新当前提交，返回提交与被替换的旧文件 token
    async fn upsert_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
        file_token: &str,
        file_name: &str,
    ) -> Result<(Submission, Option<String>)>;
    async fn get_submission_by_id(&self, id: i64) -> Result<Option<Submission>>;
    async fn get_submission_by_assignment_and_student(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>>;
    // 某作业的全部提交（教师视角，带学生展示字段）
    async fn list_submissions_for_assignment(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<SubmissionWithStudent>>;
    // 某学生的全部提交
    async fn list_submissions_by_student(&self, student_id: i64) -> Result<Vec<Submission>>;
    // 评分（0-100 已在服务层校验）
    async fn grade_submission(
        &self,
        submission_id: i64,
        marks: i32,
        feedback: Option<String>,
    ) -> Result<Option<Submission>>;
    // 重新提交：替换文件、清空成绩、消耗评语，单事务完成
    async fn resubmit_submission(
        &self,
        submission_id: i64,
        remark_id: i64,
        file_token: &str,
        file_name: &str,
    ) -> Result<(Submission, String)>;

    /// 评语管理方法
    // 创建评语，要求重交时同步更新提交状态
    async fn create_remark(&self, teacher_id: i64, req: CreateRemarkRequest) -> Result<Remark>;
    async fn get_remark_by_id(&self, id: i64) -> Result<Option<Remark>>;
    async fn list_remarks_for_submission(
        &self,
        submission_id: i64,
    ) -> Result<Vec<RemarkWithTeacher>>;

    /// 聊天管理方法
    async fn get_chat_group_by_id(&self, id: i64) -> Result<Option<ChatGroup>>;
    // 某班级可见的聊天群组（学生视角）
    async fn list_chat_groups_for_class(&self, class_id: i64) -> Result<Vec<ChatGroupView>>;
    // 某教师的聊天群组
    async fn list_chat_groups_for_teacher(&self, teacher_id: i64) -> Result<Vec<ChatGroupView>>;
    // 群组消息，按发送时间升序分页
    async fn list_chat_messages(
        &self,
        group_id: i64,
        page: i64,
        size: i64,
    ) -> Result<PaginatedResponse<ChatMessageView>>;
    // 写入消息；user_id 为 None 表示系统消息
    async fn insert_chat_message(
        &self,
        group_id: i64,
        user_id: Option<i64>,
        content: &str,
    ) -> Result<ChatMessage>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
