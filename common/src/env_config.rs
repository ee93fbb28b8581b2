use std::{env, str::FromStr, sync::Arc};

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Clone, Debug, PartialEq)]
/// Configuration struct for the server.
///
/// Holds everything needed to start the HTTP server: bind address and
/// workers, the account store backend, JWT and cookie settings, document
/// storage settings and logging preferences.
pub struct Config {
    // development or production
    pub environment: String,
    /// The hostname or IP address the server will bind to.
    pub server_host: String,
    /// The port number the server will listen on.
    pub server_port: u16,
    /// The number of worker threads to spawn for handling requests.
    pub num_workers: usize,
    /// The allowed origin for CORS. `*` allows any origin.
    pub cors_allowed_origin: String,
    /// Whether console and file logging is enabled.
    pub console_logging_enabled: bool,
    pub log_level: log::LevelFilter,
    pub log_file: String,
    /// Which account store to open at startup.
    pub store: StoreConfig,
    /// Configuration for session tokens.
    pub jwt_config: JwtConfig,
    /// Whether the session cookie carries the `Secure` attribute.
    pub cookie_secure: bool,
    /// Shared key for the admin endpoints. Admin routes reject every request when unset.
    pub admin_api_key: Option<String>,
    /// Upper bound for a single uploaded document, in bytes.
    pub max_upload_bytes: usize,
    pub storage: StorageConfig,
}

#[derive(Clone, Debug, PartialEq)]
pub enum StoreConfig {
    Postgres {
        database_url: String,
        max_connections: u32,
    },
    Memory,
}

#[derive(Clone, Debug, PartialEq)]
/// Configuration for session tokens.
///
/// Contains the secret key used to sign tokens and their lifetime in hours.
pub struct JwtConfig {
    /// The secret key used to sign and verify tokens.
    pub secret: String,
    /// The expiration time for tokens in hours.
    pub expiration_hours: i64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StorageConfig {
    /// Root folder every document path is placed under.
    pub folder: String,
    pub backend: StorageBackend,
}

#[derive(Clone, Debug, PartialEq)]
pub enum StorageBackend {
    Cloudinary {
        cloud_name: String,
        api_key: String,
        api_secret: String,
    },
    Local {
        dir: String,
        public_url: String,
    },
    Memory,
}

impl Config {
    /// Creates a new `Config` instance from environment variables.
    ///
    /// Loads `.env` first when present. See `Config::from_lookup` for the
    /// variables read and their defaults.
    pub fn from_env() -> Result<Arc<Self>, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok()).map(Arc::new)
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// Required:
    /// - `JWT_TOKEN_SECRET`
    /// - `DATABASE_URL` when `STORE_BACKEND` is `postgres` (the default)
    /// - `CLOUDINARY_*` when `STORAGE_BACKEND` is `cloudinary` (the default)
    ///
    /// Optional (with defaults):
    /// - `ENVIRONMENT`: "development"
    /// - `IP`: "127.0.0.1"
    /// - `PORT`: 3000
    /// - `WORKERS`: 4
    /// - `CORS_ALLOWED_ORIGIN`: "*"
    /// - `ENABLE_CONSOLE_LOGGING`: true
    /// - `LOG_LEVEL`: "debug" (off, error, warn, info, debug or trace)
    /// - `LOG_FILE`: "roam.log"
    /// - `DATABASE_MAX_CONNECTIONS`: 10
    /// - `JWT_EXPIRATION_HOURS`: 240
    /// - `COOKIE_SECURE`: true
    /// - `MAX_UPLOAD_BYTES`: 5 MiB
    /// - `STORAGE_FOLDER`: "roam"
    /// - `STORAGE_LOCAL_DIR`: "public/uploads"
    /// - `STORAGE_PUBLIC_URL`: "http://localhost:3000/uploads"
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(lookup);

        let store = match vars.or("STORE_BACKEND", "postgres").to_lowercase().as_str() {
            "postgres" => StoreConfig::Postgres {
                database_url: vars.required("DATABASE_URL")?,
                max_connections: vars.parsed("DATABASE_MAX_CONNECTIONS", 10)?,
            },
            "memory" => StoreConfig::Memory,
            other => {
                return Err(ConfigError::Invalid {
                    name: "STORE_BACKEND",
                    value: other.to_string(),
                });
            }
        };

        let backend = match vars.or("STORAGE_BACKEND", "cloudinary").to_lowercase().as_str() {
            "cloudinary" => StorageBackend::Cloudinary {
                cloud_name: vars.required("CLOUDINARY_CLOUD_NAME")?,
                api_key: vars.required("CLOUDINARY_API_KEY")?,
                api_secret: vars.required("CLOUDINARY_API_SECRET")?,
            },
            "local" => StorageBackend::Local {
                dir: vars.or("STORAGE_LOCAL_DIR", "public/uploads"),
                public_url: vars.or("STORAGE_PUBLIC_URL", "http://localhost:3000/uploads"),
            },
            "memory" => StorageBackend::Memory,
            other => {
                return Err(ConfigError::Invalid {
                    name: "STORAGE_BACKEND",
                    value: other.to_string(),
                });
            }
        };

        Ok(Config {
            environment: vars.or("ENVIRONMENT", "development"),
            server_host: vars.or("IP", "127.0.0.1"),
            server_port: vars.parsed("PORT", 3000)?,
            num_workers: vars.parsed("WORKERS", 4)?,
            cors_allowed_origin: vars.or("CORS_ALLOWED_ORIGIN", "*"),
            console_logging_enabled: vars.flag("ENABLE_CONSOLE_LOGGING", true),
            log_level: vars.parsed("LOG_LEVEL", log::LevelFilter::Debug)?,
            log_file: vars.or("LOG_FILE", "roam.log"),
            store,
            jwt_config: JwtConfig {
                secret: vars.required("JWT_TOKEN_SECRET")?,
                expiration_hours: vars.parsed("JWT_EXPIRATION_HOURS", 240)?,
            },
            cookie_secure: vars.flag("COOKIE_SECURE", true),
            admin_api_key: vars.get("ADMIN_API_KEY"),
            max_upload_bytes: vars.parsed("MAX_UPLOAD_BYTES", 5 * 1024 * 1024)?,
            storage: StorageConfig {
                folder: vars.or("STORAGE_FOLDER", "roam"),
                backend,
            },
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

struct Vars<F>(F);

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, name: &str) -> Option<String> {
        (self.0)(name).filter(|value| !value.trim().is_empty())
    }

    fn or(&self, name: &str, default: &str) -> String {
        self.get(name).unwrap_or_else(|| default.to_string())
    }

    fn required(&self, name: &'static str) -> Result<String, ConfigError> {
        self.get(name).ok_or(ConfigError::Missing(name))
    }

    fn flag(&self, name: &str, default: bool) -> bool {
        self.get(name)
            .map(|value| value.to_lowercase() == "true")
            .unwrap_or(default)
    }

    fn parsed<T: FromStr>(&self, name: &'static str, default: T) -> Result<T, ConfigError> {
        match self.get(name) {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::Invalid { name, value }),
            None => Ok(default),
        }
    }
}
