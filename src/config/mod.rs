use std::env;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}

/// Which document store backs the `users` and `recipes` collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheBackend {
    None,
    Memory,
    Redis,
}

/// Authentication strategy guarding the mutating and search routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    None,
    Session,
    Bearer,
}

impl FromStr for StoreBackend {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            _ => Err(()),
        }
    }
}

impl FromStr for CacheBackend {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "memory" => Ok(Self::Memory),
            "redis" => Ok(Self::Redis),
            _ => Err(()),
        }
    }
}

impl FromStr for AuthMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "session" => Ok(Self::Session),
            "bearer" => Ok(Self::Bearer),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub store_backend: StoreBackend,
    pub database_url: Option<String>,
    pub database_name: Option<String>,
    pub database_max_connections: u32,
    pub cache_backend: CacheBackend,
    pub redis_url: Option<String>,
    pub auth_mode: AuthMode,
    pub jwt_secret: Option<String>,
    pub jwt_expiration_secs: u64,
    pub session_ttl_secs: u64,
    pub session_cookie_secure: bool,
    pub bcrypt_cost: u32,
    pub seed_users: Vec<(String, String)>,
}

/// Self-contained local profile: in-memory store and cache, session auth.
impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: "0.0.0.0".into(),
            server_port: 3000,
            store_backend: StoreBackend::Memory,
            database_url: None,
            database_name: None,
            database_max_connections: 10,
            cache_backend: CacheBackend::Memory,
            redis_url: None,
            auth_mode: AuthMode::Session,
            jwt_secret: None,
            jwt_expiration_secs: 10 * 60,
            session_ttl_secs: 24 * 3600,
            session_cookie_secure: false,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            seed_users: Vec::new(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let store_backend = parse_or(&var, "STORE_BACKEND", StoreBackend::Postgres)?;
        let cache_backend = parse_or(&var, "CACHE_BACKEND", CacheBackend::Redis)?;
        let auth_mode = parse_or(&var, "AUTH_MODE", defaults.auth_mode)?;

        let database_url = var("DATABASE_URL");
        if store_backend == StoreBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }

        let redis_url = var("REDIS_URL");
        if cache_backend == CacheBackend::Redis && redis_url.is_none() {
            return Err(ConfigError::Missing("REDIS_URL"));
        }

        let jwt_secret = var("JWT_SECRET");
        if auth_mode == AuthMode::Bearer && jwt_secret.is_none() {
            return Err(ConfigError::Missing("JWT_SECRET"));
        }

        let jwt_expiration_mins = parse_period(
            &var,
            "JWT_EXPIRATION",
            'm',
            defaults.jwt_expiration_secs / 60,
        )?;
        let session_ttl_hours =
            parse_period(&var, "SESSION_TTL", 'h', defaults.session_ttl_secs / 3600)?;

        Ok(Config {
            server_host: var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: parse_or(&var, "SERVER_PORT", defaults.server_port)?,
            store_backend,
            database_url,
            database_name: var("DATABASE_NAME"),
            database_max_connections: parse_or(
                &var,
                "DATABASE_MAX_CONNECTIONS",
                defaults.database_max_connections,
            )?,
            cache_backend,
            redis_url,
            auth_mode,
            jwt_secret,
            jwt_expiration_secs: jwt_expiration_mins * 60,
            session_ttl_secs: session_ttl_hours * 3600,
            session_cookie_secure: parse_or(&var, "SESSION_COOKIE_SECURE", false)?,
            bcrypt_cost: parse_or(&var, "BCRYPT_COST", defaults.bcrypt_cost)?,
            seed_users: match var("SEED_USERS") {
                Some(raw) => parse_seed_users(&raw)?,
                None => Vec::new(),
            },
        })
    }

    pub fn jwt_expiration(&self) -> Duration {
        Duration::from_secs(self.jwt_expiration_secs)
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }
}

fn parse_value<T: FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value: raw.to_string(),
    })
}

fn parse_or<T, F>(var: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match var(key) {
        Some(raw) => parse_value(key, &raw),
        None => Ok(default),
    }
}

/// A positive whole number of `unit`s, e.g. `15m` or `24h`.
fn parse_period<F>(var: &F, key: &'static str, unit: char, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = var(key) else {
        return Ok(default);
    };

    match parse_value(key, raw.trim_end_matches(unit))? {
        0 => Err(ConfigError::Invalid { key, value: raw }),
        amount => Ok(amount),
    }
}

fn parse_seed_users(raw: &str) -> Result<Vec<(String, String)>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| match entry.split_once(':') {
            Some((username, password)) if !username.is_empty() && !password.is_empty() => {
                Ok((username.to_string(), password.to_string()))
            }
            _ => Err(ConfigError::Invalid {
                key: "SEED_USERS",
                value: entry.to_string(),
            }),
        })
        .collect()
}
