//! 学院实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "colleges")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::faculties::Entity")]
    Faculties,
}

impl Related<super::faculties::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Faculties.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_college(self) -> crate::models::affiliations::entities::College {
        crate::models::affiliations::entities::College {
            id: self.id,
            name: self.name,
        }
    }
}
