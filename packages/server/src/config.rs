use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    /// Key material for signing the session cookie. Must be at least
    /// 64 bytes; there is deliberately no default.
    pub secret: String,
    /// Cookie max-age in seconds. Sessions expire after this much
    /// inactivity.
    pub max_age_secs: u64,
    /// Set the `Secure` cookie attribute. Disable only for local
    /// plain-HTTP development.
    pub secure: bool,
    /// How often the background task purges expired session rows.
    pub cleanup_interval_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Root directory of the content-addressed blob store.
    pub root: String,
    /// Maximum accepted blob size in bytes.
    pub max_blob_size: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GuestbookConfig {
    /// Name of the hidden honeypot form field.
    pub honeypot_field: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub session: SessionConfig,
    pub storage: StorageConfig,
    pub guestbook: GuestbookConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("database.url", "sqlite://tattr.db?mode=rwc")?
            .set_default("session.max_age_secs", 3600)?
            .set_default("session.secure", true)?
            .set_default("session.cleanup_interval_secs", 3600)?
            .set_default("storage.root", "./blobs")?
            .set_default("storage.max_blob_size", 32 * 1024 * 1024)?
            .set_default("guestbook.honeypot_field", "name__confirm")?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., TATTR__SESSION__SECRET)
            .add_source(Environment::with_prefix("TATTR").separator("__"))
            .build()?;

        let config: AppConfig = s.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.session.secret.len() < 64 {
            return Err(ConfigError::Message(
                "session.secret must be at least 64 bytes".into(),
            ));
        }
        Ok(())
    }
}
