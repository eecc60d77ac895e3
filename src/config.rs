use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    pub token_ttl_minutes: i64,
    pub page_size: i64,
    pub bcrypt_cost: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8000,
            database_url: "sqlite://snippets.db?mode=rwc".into(),
            jwt_secret: String::new(),
            token_ttl_minutes: 60,
            page_size: 10,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl Settings {
    /// Defaults, then `snippets.toml` if present, then the environment.
    /// `jwt_secret` has no default and must come from one of the sources.
    pub fn new() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("host", "127.0.0.1")?
            .set_default("port", 8000_i64)?
            .set_default("database_url", "sqlite://snippets.db?mode=rwc")?
            .set_default("jwt_secret", "")?
            .set_default("token_ttl_minutes", 60_i64)?
            .set_default("page_size", 10_i64)?
            .set_default("bcrypt_cost", i64::from(bcrypt::DEFAULT_COST))?
            .add_source(
                File::with_name("snippets.toml")
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(Environment::default().try_parsing(true))
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        if settings.jwt_secret.is_empty() {
            return Err(ConfigError::Message("JWT_SECRET must not be empty".into()));
        }
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::{remove_var, set_var};

    #[test]
    fn test_settings() {
        set_var("JWT_SECRET", "from-the-environment");
        set_var("PAGE_SIZE", "25");
        let settings = Settings::new().unwrap();
        remove_var("PAGE_SIZE");

        assert_eq!(settings.jwt_secret, "from-the-environment");
        assert_eq!(settings.page_size, 25);
        assert_eq!(settings.token_ttl_minutes, 60);
    }

    #[test]
    fn default_settings_use_bcrypt_default_cost() {
        let settings = Settings::default();
        assert_eq!(settings.bcrypt_cost, bcrypt::DEFAULT_COST);
        assert_eq!(settings.page_size, 10);
    }
}
