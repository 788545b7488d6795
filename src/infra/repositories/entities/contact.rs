//! Contact database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Contact;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "contacts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub birthday: Option<Date>,
    pub company: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::group_member::Entity")]
    GroupMember,
}

impl Related<super::group_member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GroupMember.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Contact {
    fn from(model: Model) -> Self {
        Contact {
            id: model.id,
            name: model.name,
            email: model.email,
            phone: model.phone,
            birthday: model.birthday,
            company: model.company,
        }
    }
}
