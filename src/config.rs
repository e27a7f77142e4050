use derive_more::Display;
use rand::Rng;
use std::env;

/// Minimum key length accepted by the identity cookie policy.
pub const MIN_SECRET_LEN: usize = 32;

#[derive(Debug, Display, PartialEq)]
pub enum ConfigError {
    #[display(fmt = "{} must be a number, got {:?}", _0, _1)]
    NotANumber(&'static str, String),

    #[display(fmt = "{} must be true or false, got {:?}", _0, _1)]
    NotABool(&'static str, String),

    #[display(fmt = "SECRET_KEY must be at least {} bytes", MIN_SECRET_LEN)]
    ShortSecret,
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub secret_key: Vec<u8>,
    pub calendar_year: i32,
    pub cookie_secure: bool,
}

impl Default for Config {
    fn default() -> Self {
        let secret_key: [u8; MIN_SECRET_LEN] = rand::thread_rng().gen();

        Config {
            host: "127.0.0.1".to_string(),
            port: 8080,
            database_url: "calendar.db".to_string(),
            secret_key: secret_key.to_vec(),
            calendar_year: 2024,
            cookie_secure: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup, falling back to the
    /// defaults for missing keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(host) = lookup("HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("PORT") {
            config.port = port
                .parse()
                .map_err(|_| ConfigError::NotANumber("PORT", port))?;
        }
        if let Some(database_url) = lookup("DATABASE_URL") {
            config.database_url = database_url;
        }
        if let Some(secret_key) = lookup("SECRET_KEY") {
            if secret_key.len() < MIN_SECRET_LEN {
                return Err(ConfigError::ShortSecret);
            }
            config.secret_key = secret_key.into_bytes();
        } else {
            warn!("SECRET_KEY not set, sessions will not survive a restart");
        }
        if let Some(year) = lookup("CALENDAR_YEAR") {
            config.calendar_year = year
                .parse()
                .map_err(|_| ConfigError::NotANumber("CALENDAR_YEAR", year))?;
        }
        if let Some(secure) = lookup("COOKIE_SECURE") {
            config.cookie_secure = match secure.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => return Err(ConfigError::NotABool("COOKIE_SECURE", secure)),
            };
        }

        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
