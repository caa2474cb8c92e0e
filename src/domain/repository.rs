use async_trait::async_trait;
use chrono::NaiveDate;

use super::{CreateMealStatus, Meal, MealName};
use crate::db::dao::DaoResult;

/// Meal storage as seen by the application layer.
///
/// Absence is never an error: lookups yield `None` or an empty list and
/// creation yields a [`CreateMealStatus`]. Only storage failures surface
/// through the outer [`DaoResult`].
///
/// School code pairs are not unique in storage. When several schools share a
/// pair, `get_by_code` and `get_with_id_by_code` return the meals of all of
/// them, while `create_by_code` and `get_id_by_code` use the lowest matching
/// school and meal id instead of failing.
#[async_trait]
pub trait MealRepository: Send + Sync {
    async fn get_by_code(
        &self,
        edu_office_code: &str,
        standard_school_code: &str,
        date: NaiveDate,
    ) -> DaoResult<Vec<Meal>>;

    async fn get_by_id(&self, meal_id: i32) -> DaoResult<Option<Meal>>;

    async fn get_with_id_by_code(
        &self,
        edu_office_code: &str,
        standard_school_code: &str,
        date: NaiveDate,
    ) -> DaoResult<Vec<(i32, Meal)>>;

    async fn get_id_by_code(
        &self,
        edu_office_code: &str,
        standard_school_code: &str,
        date: NaiveDate,
        meal_name: MealName,
    ) -> DaoResult<Option<i32>>;

    async fn create_by_code(
        &self,
        edu_office_code: &str,
        standard_school_code: &str,
        meal: &Meal,
    ) -> DaoResult<Result<i32, CreateMealStatus>>;
}
