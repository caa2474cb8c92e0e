use base_entity_derive::base_entity;
use sea_orm::FromJsonQueryResult;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::{Meal, MealName};

#[base_entity]
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, DeriveEntityModel)]
#[sea_orm(table_name = "meals")]
pub struct Model {
    #[sea_orm(indexed)]
    pub school_info_id: i32,
    pub name: MealName,
    #[sea_orm(column_type = "Text")]
    pub dish_name: String,
    pub calorie: f64,
    pub date: Date,
    pub comments: MealComments,
    #[sea_orm(belongs_to, from = "school_info_id", to = "id", on_delete = "Cascade")]
    pub school_info: HasOne<super::school_info::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}

/// Comment bodies attached to a meal, stored as a JSON array.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct MealComments(pub Vec<String>);

impl Model {
    pub fn to_entity(&self) -> Meal {
        Meal {
            name: self.name,
            dish_name: self.dish_name.clone(),
            calorie: self.calorie,
            date: self.date,
            comments: self.comments.0.clone(),
        }
    }
}
