//! 学院/院系/课程/班级存储操作
//!
//! 组织结构只在启动时播种和注册时校验，没有对外的增删改接口。

use super::SeaOrmStorage;
use crate::entity::classes::{ActiveModel as ClassActiveModel, Entity as Classes};
use crate::entity::colleges::{ActiveModel as CollegeActiveModel, Entity as Colleges};
use crate::entity::courses::{ActiveModel as CourseActiveModel, Entity as Courses};
use crate::entity::faculties::{ActiveModel as FacultyActiveModel, Entity as Faculties};
use crate::errors::{AssignMateError, Result};
use crate::models::affiliations::entities::{Class, College, Course, Faculty};
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, Set};

impl SeaOrmStorage {
    pub async fn get_college_by_id_impl(&self, id: i64) -> Result<Option<College>> {
        let result = Colleges::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AssignMateError::database_operation(format!("查询学院失败: {e}")))?;

        Ok(result.map(|m| m.into_college()))
    }

    pub async fn get_faculty_by_id_impl(&self, id: i64) -> Result<Option<Faculty>> {
        let result = Faculties::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AssignMateError::database_operation(format!("查询院系失败: {e}")))?;

        Ok(result.map(|m| m.into_faculty()))
    }

    pub async fn get_course_by_id_impl(&self, id: i64) -> Result<Option<Course>> {
        let result = Courses::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AssignMateError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }

    pub async fn get_class_by_id_impl(&self, id: i64) -> Result<Option<Class>> {
        let result = Classes::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AssignMateError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.map(|m| m.into_class()))
    }

    pub async fn create_college_impl(&self, name: &str) -> Result<College> {
        let model = CollegeActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| AssignMateError::database_operation(format!("创建学院失败: {e}")))?;

        Ok(result.into_college())
    }

    pub async fn create_faculty_impl(&self, college_id: i64, name: &str) -> Result<Faculty> {
        let model = FacultyActiveModel {
            college_id: Set(college_id),
            name: Set(name.to_string()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| AssignMateError::database_operation(format!("创建院系失败: {e}")))?;

        Ok(result.into_faculty())
    }

    pub async fn create_course_impl(&self, faculty_id: i64, name: &str) -> Result<Course> {
        let model = CourseActiveModel {
            faculty_id: Set(faculty_id),
            name: Set(name.to_string()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| AssignMateError::database_operation(format!("创建课程失败: {e}")))?;

        Ok(result.into_course())
    }

    /// 创建班级
    ///
    /// 班级的 faculty_id 由所属课程推导，保证班级与课程属于同一院系。
    pub async fn create_class_impl(&self, course_id: i64, name: &str) -> Result<Class> {
        let course = self
            .get_course_by_id_impl(course_id)
            .await?
            .ok_or_else(|| AssignMateError::not_found(format!("课程不存在: {course_id}")))?;

        let model = ClassActiveModel {
            course_id: Set(course_id),
            faculty_id: Set(course.faculty_id),
            name: Set(name.to_string()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| AssignMateError::database_operation(format!("创建班级失败: {e}")))?;

        Ok(result.into_class())
    }

    pub async fn count_colleges_impl(&self) -> Result<u64> {
        let count = Colleges::find()
            .count(&self.db)
            .await
            .map_err(|e| AssignMateError::database_operation(format!("统计学院数量失败: {e}")))?;

        Ok(count)
    }
}
