//! 存储层集成测试，运行在内存 SQLite 上

use chrono::{Duration, Utc};
use migration::{Migrator, MigratorTrait};
use sea_orm::Database;

use super::SeaOrmStorage;
use crate::models::{
    affiliations::entities::Class,
    assignments::{entities::Assignment, requests::CreateAssignmentRequest},
    auth::requests::RegisterRequest,
    remarks::requests::CreateRemarkRequest,
    submissions::entities::SubmissionStatus,
    users::entities::{User, UserRole},
};
use crate::storage::Storage;

async fn test_storage() -> SeaOrmStorage {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("connect in-memory sqlite");
    Migrator::up(&db, None).await.expect("run migrations");
    SeaOrmStorage { db }
}

async fn seed_class(storage: &SeaOrmStorage) -> Class {
    let college = storage.create_college("Test College").await.unwrap();
    let faculty = storage
        .create_faculty(college.id, "Test Faculty")
        .await
        .unwrap();
    let course = storage.create_course(faculty.id, "Test Course").await.unwrap();
    storage.create_class(course.id, "Test Class").await.unwrap()
}

async fn register_user(
    storage: &SeaOrmStorage,
    email: &str,
    role: UserRole,
    class: Option<&Class>,
) -> User {
    let req = RegisterRequest {
        full_name: format!("User {email}"),
        email: email.to_string(),
        password: "unused".to_string(),
        role: role.clone(),
        college_id: None,
        faculty_id: class.map(|c| c.faculty_id),
        course_id: class.map(|c| c.course_id),
        class_id: class.map(|c| c.id),
        prn: match role {
            UserRole::Student => Some("PRN0001".to_string()),
            UserRole::Teacher => None,
        },
    };
    storage.create_user(req, "hash".to_string()).await.unwrap()
}

async fn create_assignment(
    storage: &SeaOrmStorage,
    teacher: &User,
    class: &Class,
) -> Assignment {
    let due_date = Utc::now() + Duration::days(7);
    storage
        .create_assignment_with_chat_group(
            teacher.id,
            CreateAssignmentRequest {
                class_id: class.id,
                title: "Lab Report 1".to_string(),
                description: Some("Submit as PDF".to_string()),
                due_date,
            },
            due_date,
            "Welcome to the assignment chat",
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    let storage = test_storage().await;
    register_user(&storage, "dup@example.com", UserRole::Student, None).await;

    let req = RegisterRequest {
        full_name: "Second".to_string(),
        email: "dup@example.com".to_string(),
        password: "unused".to_string(),
        role: UserRole::Teacher,
        college_id: None,
        faculty_id: None,
        course_id: None,
        class_id: None,
        prn: None,
    };
    // 唯一索引冲突要映射为 Conflict，而不是笼统的数据库错误
    let err = storage.create_user(req, "hash".to_string()).await.unwrap_err();
    assert!(matches!(err, crate::errors::AssignMateError::Conflict(_)));
}

#[tokio::test]
async fn test_class_inherits_faculty_from_course() {
    let storage = test_storage().await;
    let class = seed_class(&storage).await;

    let course = storage
        .get_course_by_id(class.course_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(class.faculty_id, course.faculty_id);
}

#[tokio::test]
async fn test_assignment_creates_chat_group_with_welcome_message() {
    let storage = test_storage().await;
    let class = seed_class(&storage).await;
    let teacher = register_user(&storage, "t@example.com", UserRole::Teacher, None).await;
    let assignment = create_assignment(&storage, &teacher, &class).await;

    let groups = storage.list_chat_groups_for_class(class.id).await.unwrap();
    assert_eq!(groups.len(), 1);
    let group = &groups[0];
    assert_eq!(group.assignment_id, assignment.id);
    assert_eq!(group.expires_at.timestamp(), assignment.due_date.timestamp());
    assert!(group.active);

    // 欢迎消息是系统消息，没有发送者
    let page = storage.list_chat_messages(group.id, 1, 50).await.unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].content, "Welcome to the assignment chat");
    assert!(page.items[0].sender_id.is_none());
    assert!(page.items[0].sender_name.is_none());
}

#[tokio::test]
async fn test_upsert_keeps_single_row_per_pair() {
    let storage = test_storage().await;
    let class = seed_class(&storage).await;
    let teacher = register_user(&storage, "t@example.com", UserRole::Teacher, None).await;
    let student = register_user(&storage, "s@example.com", UserRole::Student, Some(&class)).await;
    let assignment = create_assignment(&storage, &teacher, &class).await;

    let (first, old) = storage
        .upsert_submission(assignment.id, student.id, "token-1.pdf", "v1.pdf")
        .await
        .unwrap();
    assert!(old.is_none());
    assert_eq!(first.status, SubmissionStatus::Pending);

    // 先评分再重新上传，成绩必须被清空
    storage
        .grade_submission(first.id, 80, Some("Good".to_string()))
        .await
        .unwrap();

    let (second, old) = storage
        .upsert_submission(assignment.id, student.id, "token-2.pdf", "v2.pdf")
        .await
        .unwrap();
    assert_eq!(second.id, first.id);
    assert_eq!(old.as_deref(), Some("token-1.pdf"));
    assert_eq!(second.status, SubmissionStatus::Pending);
    assert!(second.marks.is_none());
    assert!(second.feedback.is_none());

    let current = storage
        .get_submission_by_assignment_and_student(assignment.id, student.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(current.file_token, "token-2.pdf");
}

#[tokio::test]
async fn test_grade_submission_sets_marks_and_status() {
    let storage = test_storage().await;
    let class = seed_class(&storage).await;
    let teacher = register_user(&storage, "t@example.com", UserRole::Teacher, None).await;
    let student = register_user(&storage, "s@example.com", UserRole::Student, Some(&class)).await;
    let assignment = create_assignment(&storage, &teacher, &class).await;

    let (submission, _) = storage
        .upsert_submission(assignment.id, student.id, "token.pdf", "hw.pdf")
        .await
        .unwrap();

    let graded = storage
        .grade_submission(submission.id, 92, Some("Well done".to_string()))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(graded.status, SubmissionStatus::Graded);
    assert_eq!(graded.marks, Some(92));

    assert!(storage.grade_submission(9999, 50, None).await.unwrap().is_none());
}

#[tokio::test]
async fn test_remark_requiring_resubmission_updates_status() {
    let storage = test_storage().await;
    let class = seed_class(&storage).await;
    let teacher = register_user(&storage, "t@example.com", UserRole::Teacher, None).await;
    let student = register_user(&storage, "s@example.com", UserRole::Student, Some(&class)).await;
    let assignment = create_assignment(&storage, &teacher, &class).await;

    let (submission, _) = storage
        .upsert_submission(assignment.id, student.id, "token.pdf", "hw.pdf")
        .await
        .unwrap();

    let remark = storage
        .create_remark(
            teacher.id,
            CreateRemarkRequest {
                submission_id: submission.id,
                message: "Missing the conclusion section".to_string(),
                resubmission_required: true,
                resubmission_deadline: Some(Utc::now() + Duration::days(3)),
            },
        )
        .await
        .unwrap();
    assert!(remark.resubmission_required);

    let updated = storage
        .get_submission_by_id(submission.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.status, SubmissionStatus::ResubmissionRequested);

    let listed = storage.list_remarks_for_submission(submission.id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].teacher_name, teacher.full_name);
}

#[tokio::test]
async fn test_resubmit_consumes_remark_exactly_once() {
    let storage = test_storage().await;
    let class = seed_class(&storage).await;
    let teacher = register_user(&storage, "t@example.com", UserRole::Teacher, None).await;
    let student = register_user(&storage, "s@example.com", UserRole::Student, Some(&class)).await;
    let assignment = create_assignment(&storage, &teacher, &class).await;

    let (submission, _) = storage
        .upsert_submission(assignment.id, student.id, "token-1.pdf", "v1.pdf")
        .await
        .unwrap();
    storage
        .grade_submission(submission.id, 40, Some("Please redo".to_string()))
        .await
        .unwrap();
    let remark = storage
        .create_remark(
            teacher.id,
            CreateRemarkRequest {
                submission_id: submission.id,
                message: "Redo section 2".to_string(),
                resubmission_required: true,
                resubmission_deadline: None,
            },
        )
        .await
        .unwrap();

    let (resubmitted, old_token) = storage
        .resubmit_submission(submission.id, remark.id, "token-2.pdf", "v2.pdf")
        .await
        .unwrap();
    assert_eq!(old_token, "token-1.pdf");
    assert_eq!(resubmitted.status, SubmissionStatus::Pending);
    assert!(resubmitted.marks.is_none());
    assert_eq!(resubmitted.file_token, "token-2.pdf");

    // 评语已被消耗
    assert!(storage.get_remark_by_id(remark.id).await.unwrap().is_none());

    // 同一评语的第二次重交失败，提交保持不变
    let err = storage
        .resubmit_submission(submission.id, remark.id, "token-3.pdf", "v3.pdf")
        .await;
    assert!(err.is_err());
    let current = storage
        .get_submission_by_id(submission.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(current.file_token, "token-2.pdf");
}

#[tokio::test]
async fn test_chat_messages_ordered_and_paginated() {
    let storage = test_storage().await;
    let class = seed_class(&storage).await;
    let teacher = register_user(&storage, "t@example.com", UserRole::Teacher, None).await;
    let student = register_user(&storage, "s@example.com", UserRole::Student, Some(&class)).await;
    create_assignment(&storage, &teacher, &class).await;

    let groups = storage.list_chat_groups_for_class(class.id).await.unwrap();
    let group_id = groups[0].id;

    storage
        .insert_chat_message(group_id, Some(student.id), "first question")
        .await
        .unwrap();
    storage
        .insert_chat_message(group_id, Some(teacher.id), "first answer")
        .await
        .unwrap();

    // 欢迎消息 + 2 条，共 3 条，升序
    let page = storage.list_chat_messages(group_id, 1, 2).await.unwrap();
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.pagination.total, 3);
    assert_eq!(page.pagination.total_pages, 2);
    assert!(page.items[0].sent_at <= page.items[1].sent_at);

    let last = storage.list_chat_messages(group_id, 2, 2).await.unwrap();
    assert_eq!(last.items.len(), 1);
    assert_eq!(last.items[0].content, "first answer");
    assert_eq!(last.items[0].sender_name.as_deref(), Some(teacher.full_name.as_str()));
    assert_eq!(last.items[0].sender_role, Some(UserRole::Teacher));
}

#[tokio::test]
async fn test_teacher_assignment_list_includes_class_and_course() {
    let storage = test_storage().await;
    let class = seed_class(&storage).await;
    let teacher = register_user(&storage, "t@example.com", UserRole::Teacher, None).await;
    let assignment = create_assignment(&storage, &teacher, &class).await;

    let items = storage.list_assignments_for_teacher(teacher.id).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].assignment.id, assignment.id);
    assert_eq!(items[0].class_name, "Test Class");
    assert_eq!(items[0].course_name, "Test Course");
}
