use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, QueryTrait, Set, sea_query::SelectStatement,
};

use super::{DaoBase, DaoResult, RowId};
use crate::db::entities::{prelude::SchoolInfo, school_info};

#[derive(Clone)]
pub struct SchoolInfoDao {
    db: DatabaseConnection,
}

impl DaoBase for SchoolInfoDao {
    type Entity = SchoolInfo;

    fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl SchoolInfoDao {
    fn select_ids_by_code(
        edu_office_code: &str,
        standard_school_code: &str,
    ) -> sea_orm::Select<SchoolInfo> {
        SchoolInfo::find()
            .select_only()
            .column(school_info::Column::Id)
            .filter(school_info::Column::EduOfficeCode.eq(edu_office_code))
            .filter(school_info::Column::StandardSchoolCode.eq(standard_school_code))
    }

    /// `SELECT id FROM school_infos WHERE <codes match>`, for embedding in
    /// another statement.
    pub fn id_subquery(edu_office_code: &str, standard_school_code: &str) -> SelectStatement {
        Self::select_ids_by_code(edu_office_code, standard_school_code).into_query()
    }

    pub async fn find_id_by_code<C>(
        &self,
        conn: &C,
        edu_office_code: &str,
        standard_school_code: &str,
    ) -> DaoResult<Option<i32>>
    where
        C: ConnectionTrait,
    {
        let row = Self::select_ids_by_code(edu_office_code, standard_school_code)
            .into_model::<RowId>()
            .one(conn)
            .await?;
        Ok(row.map(|row| row.id))
    }

    pub async fn find_ids_by_code<C>(
        &self,
        conn: &C,
        edu_office_code: &str,
        standard_school_code: &str,
    ) -> DaoResult<Vec<i32>>
    where
        C: ConnectionTrait,
    {
        let rows = Self::select_ids_by_code(edu_office_code, standard_school_code)
            .order_by_asc(school_info::Column::Id)
            .into_model::<RowId>()
            .all(conn)
            .await?;
        Ok(rows.into_iter().map(|row| row.id).collect())
    }

    pub async fn create_school_info(
        &self,
        edu_office_code: &str,
        standard_school_code: &str,
    ) -> DaoResult<school_info::Model> {
        let model = school_info::ActiveModel {
            edu_office_code: Set(edu_office_code.to_string()),
            standard_school_code: Set(standard_school_code.to_string()),
            ..Default::default()
        };
        self.create(model).await
    }
}
