use anyhow::{Result, bail};

use super::AppConfig;

pub fn validate(cfg: &AppConfig) -> Result<()> {
    let mut errors: Vec<String> = Vec::new();

    if cfg.logging.rust_log.trim().is_empty() {
        errors.push("logging.rust_log must not be empty".to_string());
    }

    let database = &cfg.database;
    if database.url.trim().is_empty() {
        errors.push("database.url must not be empty".to_string());
    }

    if database.max_connections == 0 {
        errors.push("database.max_connections must be > 0".to_string());
    }

    if database.min_idle > database.max_connections {
        errors.push(format!(
            "database.min_idle ({}) must be <= database.max_connections ({})",
            database.min_idle, database.max_connections
        ));
    }

    if database.connect_timeout_secs == 0 {
        errors.push("database.connect_timeout_secs must be > 0".to_string());
    }

    if errors.is_empty() {
        return Ok(());
    }

    bail!("invalid app config:\n- {}", errors.join("\n- "))
}

#[cfg(test)]
mod tests {
    use ::config as config_rs;

    use super::validate;
    use crate::config::{AppConfig, EnvConfig};

    #[test]
    fn defaults_are_valid() {
        validate(&AppConfig::default()).expect("default config should validate");
    }

    #[test]
    fn collects_every_problem() {
        let mut cfg = AppConfig::default();
        cfg.database.url = "  ".to_string();
        cfg.database.max_connections = 1;
        cfg.database.min_idle = 4;

        let err = validate(&cfg).expect_err("config should be rejected");
        let message = err.to_string();
        assert!(message.contains("database.url must not be empty"));
        assert!(message.contains("database.min_idle (4) must be <= database.max_connections (1)"));
    }

    #[test]
    fn nested_keys_override_defaults() {
        let settings = config_rs::Config::builder()
            .set_override("database.url", "sqlite::memory:")
            .expect("override url")
            .set_override("database.max_connections", 1_i64)
            .expect("override max connections")
            .set_override("database.min_idle", 0_i64)
            .expect("override min idle")
            .build()
            .expect("build settings");

        let cfg = AppConfig::from_settings(settings).expect("config should load");
        assert_eq!(cfg.database.url, "sqlite::memory:");
        assert_eq!(cfg.database.max_connections, 1);
        assert_eq!(cfg.database.min_idle, 0);
        assert!(cfg.database.sync_schema);
        assert_eq!(cfg.logging.rust_log, "info,sqlx=warn");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let settings = config_rs::Config::builder()
            .set_override("database.password", "secret")
            .expect("override unknown key")
            .build()
            .expect("build settings");

        assert!(AppConfig::from_settings(settings).is_err());
    }
}
