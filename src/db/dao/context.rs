use sea_orm::DatabaseConnection;

use super::{DaoBase, MealDao, SchoolInfoDao};

#[derive(Clone)]
pub struct DaoContext {
    db: DatabaseConnection,
}

impl DaoContext {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    pub fn meal(&self) -> MealDao {
        DaoBase::new(&self.db)
    }

    pub fn school_info(&self) -> SchoolInfoDao {
        DaoBase::new(&self.db)
    }
}
