pub mod meal;
pub mod repository;

pub use meal::{CreateMealStatus, Meal, MealName, ParseMealNameError};
pub use repository::MealRepository;
