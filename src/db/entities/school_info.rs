use base_entity_derive::base_entity;
use sea_orm::entity::prelude::*;

#[base_entity]
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, DeriveEntityModel)]
#[sea_orm(table_name = "school_infos")]
pub struct Model {
    #[sea_orm(indexed)]
    pub edu_office_code: String,
    #[sea_orm(indexed)]
    pub standard_school_code: String,
    #[sea_orm(has_many)]
    pub meals: HasMany<super::meal::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
