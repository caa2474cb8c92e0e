pub mod base;
pub mod base_traits;
mod context;
pub mod error;
pub mod meal_dao;
pub mod school_info_dao;

pub use base::{DaoBase, RowId};
pub use base_traits::{HasIdModel, TimestampedActiveModel};
pub use context::DaoContext;
pub use error::{DaoLayerError, DaoResult};
pub use meal_dao::MealDao;
pub use school_info_dao::SchoolInfoDao;
