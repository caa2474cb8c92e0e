use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Meal slot of a school day, persisted with the Korean labels used by the
/// NEIS school meal service.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum MealName {
    #[sea_orm(string_value = "조식")]
    #[serde(rename = "조식")]
    Breakfast,
    #[sea_orm(string_value = "중식")]
    #[serde(rename = "중식")]
    Lunch,
    #[sea_orm(string_value = "석식")]
    #[serde(rename = "석식")]
    Dinner,
}

impl MealName {
    pub fn as_str(self) -> &'static str {
        match self {
            MealName::Breakfast => "조식",
            MealName::Lunch => "중식",
            MealName::Dinner => "석식",
        }
    }
}

impl fmt::Display for MealName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown meal name '{0}'; expected 조식, 중식, or 석식")]
pub struct ParseMealNameError(pub String);

impl FromStr for MealName {
    type Err = ParseMealNameError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "조식" => Ok(MealName::Breakfast),
            "중식" => Ok(MealName::Lunch),
            "석식" => Ok(MealName::Dinner),
            other => Err(ParseMealNameError(other.to_string())),
        }
    }
}

/// One menu record of a school for a given date and slot.
///
/// Carries no storage id; lookups that need one return it alongside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub name: MealName,
    pub dish_name: String,
    pub calorie: f64,
    pub date: NaiveDate,
    pub comments: Vec<String>,
}

impl Meal {
    pub fn new(
        name: MealName,
        dish_name: impl Into<String>,
        calorie: f64,
        date: NaiveDate,
    ) -> Self {
        Self {
            name,
            dish_name: dish_name.into(),
            calorie,
            date,
            comments: Vec::new(),
        }
    }
}

/// Reason a meal could not be created. Returned as a value, not raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CreateMealStatus {
    #[error("school info not found")]
    SchoolInfoNotFound,
}
