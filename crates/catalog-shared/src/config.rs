//! Configuration management

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub jwt: JwtSettings,
    pub log: LogSettings,
    pub cors: CorsSettings,
    pub rate_limit: RateLimitSettings,
    pub catalog: CatalogSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_seconds: u64,
    pub run_migrations: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtSettings {
    pub secret: String,
    pub issuer: String,
    pub access_token_expiry: i64,
    pub refresh_token_expiry: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogSettings {
    pub level: String,
    pub json: bool,
    /// Daily rolling log files are written here when set.
    pub directory: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorsSettings {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RateLimitSettings {
    pub login_per_minute: u32,
    pub login_burst: u32,
    /// Key clients by `X-Forwarded-For`. Only for deployments behind a proxy
    /// that overwrites the header; otherwise the socket address is used.
    pub trust_forwarded: bool,
    /// How often idle per-address state is purged from the limiter.
    pub cleanup_interval_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogSettings {
    pub default_page_size: u32,
    pub max_page_size: u32,
    /// Storefront accounts are created active when true.
    pub auto_activate_customers: bool,
    /// Prefix for stored product image file names.
    pub image_base_url: String,
    /// Customer role code that unlocks new-design series.
    pub vip_role_code: String,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        Self::builder(&env)?.build()?.try_deserialize()
    }

    fn builder(
        env: &str,
    ) -> Result<config::builder::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Ok(Config::builder()
            .set_default("app.env", env)?
            .set_default("app.host", "127.0.0.1")?
            .set_default("app.port", 8080)?
            .set_default("app.name", "catalog-server")?
            .set_default("database.max_connections", 20)?
            .set_default("database.min_connections", 2)?
            .set_default("database.acquire_timeout_seconds", 3)?
            .set_default("database.run_migrations", false)?
            .set_default("jwt.issuer", "eyewear-catalog")?
            .set_default("jwt.access_token_expiry", crate::constants::DEFAULT_ACCESS_TOKEN_EXPIRY)?
            .set_default("jwt.refresh_token_expiry", crate::constants::DEFAULT_REFRESH_TOKEN_EXPIRY)?
            .set_default("log.level", "info")?
            .set_default("log.json", true)?
            .set_default("cors.allowed_origins", Vec::<String>::new())?
            .set_default("rate_limit.login_per_minute", 10)?
            .set_default("rate_limit.login_burst", 5)?
            .set_default("rate_limit.trust_forwarded", false)?
            .set_default("rate_limit.cleanup_interval_seconds", 300)?
            .set_default("catalog.default_page_size", crate::constants::DEFAULT_PAGE_SIZE)?
            .set_default("catalog.max_page_size", crate::constants::MAX_PAGE_SIZE)?
            .set_default("catalog.auto_activate_customers", false)?
            .set_default("catalog.image_base_url", "/static")?
            .set_default("catalog.vip_role_code", "vip")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::default().separator("__").try_parsing(true)))
    }

    pub fn is_production(&self) -> bool {
        self.app.env.eq_ignore_ascii_case("production")
    }

    /// Refuses to start a production deployment on a placeholder JWT secret.
    pub fn check_secrets(&self) -> Result<(), ConfigError> {
        if !self.is_production() {
            return Ok(());
        }
        let secret = self.jwt.secret.trim();
        if secret.len() < MIN_PRODUCTION_SECRET_LENGTH || PLACEHOLDER_SECRETS.contains(&secret) {
            return Err(ConfigError::Message(format!(
                "jwt.secret must be a random value of at least {} characters in production",
                MIN_PRODUCTION_SECRET_LENGTH
            )));
        }
        Ok(())
    }
}

const MIN_PRODUCTION_SECRET_LENGTH: usize = 32;
const PLACEHOLDER_SECRETS: [&str; 2] = ["change-me-in-production", "replace-with-a-long-random-secret"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_everything_but_secrets() {
        let config = AppConfig::builder("test")
            .unwrap()
            .set_override("database.url", "postgres://localhost/catalog")
            .unwrap()
            .set_override("jwt.secret", "test-secret")
            .unwrap()
            .build()
            .unwrap();
        let cfg: AppConfig = config.try_deserialize().unwrap();

        assert_eq!(cfg.app.port, 8080);
        assert_eq!(cfg.app.env, "test");
        assert_eq!(cfg.catalog.default_page_size, 10);
        assert_eq!(cfg.rate_limit.login_per_minute, 10);
        assert!(!cfg.rate_limit.trust_forwarded);
        assert_eq!(cfg.catalog.vip_role_code, "vip");
        assert!(cfg.log.directory.is_none());
        assert!(!cfg.is_production());
        assert!(cfg.check_secrets().is_ok());
    }

    fn production(secret: &str) -> AppConfig {
        AppConfig::builder("production")
            .unwrap()
            .set_override("database.url", "postgres://localhost/catalog")
            .unwrap()
            .set_override("jwt.secret", secret)
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_production_rejects_weak_secrets() {
        assert!(production("change-me-in-production").check_secrets().is_err());
        assert!(production("short").check_secrets().is_err());
        assert!(production("k2VqW9x0cTzL7mYp4RbN8sJd3HfG6aE1").check_secrets().is_ok());
    }
}
