#[allow(unused_imports)]
pub mod prelude {
    pub use super::meal::Entity as Meal;
    pub use super::school_info::Entity as SchoolInfo;
}

pub mod meal;
pub mod school_info;
