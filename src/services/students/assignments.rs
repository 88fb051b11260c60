use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode,
    assignments::entities::Assignment,
    students::responses::StudentAssignmentView,
    submissions::entities::Submission,
};

/// 班级作业与本人提交按 assignment_id 合并
pub(crate) fn merge_assignment_submissions(
    assignments: Vec<Assignment>,
    submissions: Vec<Submission>,
) -> Vec<StudentAssignmentView> {
    let mut by_assignment: HashMap<i64, Submission> = submissions
        .into_iter()
        .map(|s| (s.assignment_id, s))
        .collect();

    assignments
        .into_iter()
        .map(|assignment| {
            let submission = by_assignment.remove(&assignment.id);
            StudentAssignmentView {
                is_submitted: submission.is_some(),
                submission,
                assignment,
            }
        })
        .collect()
}

pub async fn handle_assignments(
    service: &StudentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let student = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Authentication required",
            )));
        }
    };

    let Some(class_id) = student.affiliation.class_id else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ClassNotFound,
            "Student has no class assigned",
        )));
    };

    let storage = service.get_storage(request);

    let assignments = match storage.list_assignments_for_class(class_id).await {
        Ok(assignments) => assignments,
        Err(e) => {
            tracing::error!("Assignment list failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Assignment list failed",
                )),
            );
        }
    };

    let submissions = match storage.list_submissions_by_student(student.id).await {
        Ok(submissions) => submissions,
        Err(e) => {
            tracing::error!("Submission list failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Assignment list failed",
                )),
            );
        }
    };

    let views = merge_assignment_submissions(assignments, submissions);
    Ok(HttpResponse::Ok().json(ApiResponse::success(views, "OK")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::submissions::entities::SubmissionStatus;
    use chrono::Utc;

    fn assignment(id: i64) -> Assignment {
        Assignment {
            id,
            class_id: 1,
            teacher_id: 2,
            title: format!("Assignment {id}"),
            description: None,
            due_date: Utc::now(),
            created_at: Utc::now(),
        }
    }

    fn submission(id: i64, assignment_id: i64) -> Submission {
        Submission {
            id,
            assignment_id,
            student_id: 3,
            file_token: format!("{id}.pdf"),
            file_name: "hw.pdf".to_string(),
            status: SubmissionStatus::Pending,
            marks: None,
            feedback: None,
            submitted_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_merge_marks_submitted_assignments() {
        let assignments = vec![assignment(1), assignment(2), assignment(3)];
        let submissions = vec![submission(10, 1), submission(11, 3)];

        let views = merge_assignment_submissions(assignments, submissions);

        assert_eq!(views.len(), 3);
        assert!(views[0].is_submitted);
        assert_eq!(views[0].submission.as_ref().unwrap().id, 10);
        assert!(!views[1].is_submitted);
        assert!(views[1].submission.is_none());
        assert!(views[2].is_submitted);
        assert_eq!(views[2].submission.as_ref().unwrap().id, 11);
    }

    #[test]
    fn test_merge_keeps_assignment_order() {
        let assignments = vec![assignment(5), assignment(4)];
        let views = merge_assignment_submissions(assignments, vec![]);
        assert_eq!(views[0].assignment.id, 5);
        assert_eq!(views[1].assignment.id, 4);
    }

    #[test]
    fn test_merge_ignores_submissions_for_other_classes() {
        // 其他班级作业的历史提交不会出现在结果里
        let views = merge_assignment_submissions(vec![assignment(1)], vec![submission(9, 99)]);
        assert_eq!(views.len(), 1);
        assert!(!views[0].is_submitted);
    }

    #[test]
    fn test_merge_empty_inputs() {
        assert!(merge_assignment_submissions(vec![], vec![]).is_empty());
    }
}
