//! 院系实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "faculties")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub college_id: i64,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::colleges::Entity",
        from = "Column::CollegeId",
        to = "super::colleges::Column::Id"
    )]
    College,
    #[sea_orm(has_many = "super::courses::Entity")]
    Courses,
}

impl Related<super::colleges::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::College.def()
    }
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Courses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_faculty(self) -> crate::models::affiliations::entities::Faculty {
        crate::models::affiliations::entities::Faculty {
            id: self.id,
            college_id: self.college_id,
            name: self.name,
        }
    }
}
