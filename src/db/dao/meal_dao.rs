use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use tracing::{debug, info, warn};

use super::{DaoBase, DaoResult, RowId, SchoolInfoDao};
use crate::db::entities::meal::{self, MealComments};
use crate::db::entities::prelude::Meal as MealEntity;
use crate::domain::{CreateMealStatus, Meal, MealName, MealRepository};

#[derive(Clone)]
pub struct MealDao {
    db: DatabaseConnection,
}

impl DaoBase for MealDao {
    type Entity = MealEntity;

    fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl MealDao {
    fn school_info_dao(&self) -> SchoolInfoDao {
        SchoolInfoDao::new(&self.db)
    }

    /// Meal rows of every school matching both codes, restricted to `date`.
    async fn find_rows_by_code(
        &self,
        edu_office_code: &str,
        standard_school_code: &str,
        date: NaiveDate,
    ) -> DaoResult<Vec<meal::Model>> {
        let txn = self.begin().await?;
        let school_ids = self
            .school_info_dao()
            .find_ids_by_code(&txn, edu_office_code, standard_school_code)
            .await?;

        let rows = if school_ids.is_empty() {
            Vec::new()
        } else {
            MealEntity::find()
                .filter(meal::Column::SchoolInfoId.is_in(school_ids))
                .filter(meal::Column::Date.eq(date))
                .order_by_asc(meal::Column::SchoolInfoId)
                .order_by_asc(meal::Column::Id)
                .all(&txn)
                .await?
        };
        txn.commit().await?;

        debug!(
            edu_office_code,
            standard_school_code,
            %date,
            found = rows.len(),
            "loaded meals by school code"
        );
        Ok(rows)
    }
}

#[async_trait]
impl MealRepository for MealDao {
    async fn get_by_code(
        &self,
        edu_office_code: &str,
        standard_school_code: &str,
        date: NaiveDate,
    ) -> DaoResult<Vec<Meal>> {
        let rows = self
            .find_rows_by_code(edu_office_code, standard_school_code, date)
            .await?;
        Ok(rows.iter().map(meal::Model::to_entity).collect())
    }

    async fn get_by_id(&self, meal_id: i32) -> DaoResult<Option<Meal>> {
        let row = self.find_optional_by_id(meal_id).await?;
        Ok(row.map(|row| row.to_entity()))
    }

    async fn get_with_id_by_code(
        &self,
        edu_office_code: &str,
        standard_school_code: &str,
        date: NaiveDate,
    ) -> DaoResult<Vec<(i32, Meal)>> {
        let rows = self
            .find_rows_by_code(edu_office_code, standard_school_code, date)
            .await?;
        Ok(rows.iter().map(|row| (row.id, row.to_entity())).collect())
    }

    async fn get_id_by_code(
        &self,
        edu_office_code: &str,
        standard_school_code: &str,
        date: NaiveDate,
        meal_name: MealName,
    ) -> DaoResult<Option<i32>> {
        let txn = self.begin().await?;
        let row = MealEntity::find()
            .select_only()
            .column(meal::Column::Id)
            .filter(meal::Column::SchoolInfoId.in_subquery(SchoolInfoDao::id_subquery(
                edu_office_code,
                standard_school_code,
            )))
            .filter(meal::Column::Date.eq(date))
            .filter(meal::Column::Name.eq(meal_name))
            .order_by_asc(meal::Column::Id)
            .into_model::<RowId>()
            .one(&txn)
            .await?;
        txn.commit().await?;

        Ok(row.map(|row| row.id))
    }

    async fn create_by_code(
        &self,
        edu_office_code: &str,
        standard_school_code: &str,
        meal: &Meal,
    ) -> DaoResult<Result<i32, CreateMealStatus>> {
        let txn = self.begin().await?;
        let Some(school_info_id) = self
            .school_info_dao()
            .find_id_by_code(&txn, edu_office_code, standard_school_code)
            .await?
        else {
            txn.commit().await?;
            warn!(
                edu_office_code,
                standard_school_code, "meal not created: school info not found"
            );
            return Ok(Err(CreateMealStatus::SchoolInfoNotFound));
        };

        let active = meal::ActiveModel {
            school_info_id: Set(school_info_id),
            name: Set(meal.name),
            dish_name: Set(meal.dish_name.clone()),
            calorie: Set(meal.calorie),
            date: Set(meal.date),
            comments: Set(MealComments::default()),
            ..Default::default()
        };
        let row = self.insert_in(&txn, active).await?;
        txn.commit().await?;

        info!(
            meal_id = row.id,
            school_info_id,
            name = %row.name,
            date = %row.date,
            "meal created"
        );
        Ok(Ok(row.id))
    }
}
