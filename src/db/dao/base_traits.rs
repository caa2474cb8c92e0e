pub trait HasIdModel {
    fn row_id(&self) -> i32;
}

pub trait TimestampedActiveModel {
    fn set_created_at(&mut self, ts: sea_orm::entity::prelude::DateTimeWithTimeZone);
}
