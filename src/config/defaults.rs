pub const DEFAULT_RUST_LOG: &str = "info,sqlx=warn";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://school_meal.db?mode=rwc";
pub const DEFAULT_DB_MAX_CONNECTIONS: i64 = 10;
pub const DEFAULT_DB_MIN_IDLE: i64 = 2;
pub const DEFAULT_DB_CONNECT_TIMEOUT_SECS: i64 = 5;
pub const DEFAULT_DB_SYNC_SCHEMA: bool = true;
