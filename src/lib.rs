use std::sync::Arc;

use auth::{AuthStrategy, BearerIssuer, SessionIssuer};
use cache::{
    MemoryRecipeCache, MemorySessionStore, RecipeCache, RedisRecipeCache, RedisSessionStore,
    SessionStore,
};
use config::{AuthMode, CacheBackend, Config, ConfigError, StoreBackend};
use database::{
    CredentialStore, MemoryCredentialStore, MemoryRecipeRepository, PgCredentialStore,
    PgRecipeRepository, RecipeRepository,
};
use error::AppResult;
use redis::Client as RedisClient;
use service::RecipeService;
use utils::{JwtKeys, PasswordHasher};

pub mod auth;
pub mod cache;
pub mod common;
pub mod config;
pub mod database;
pub mod error;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod service;
pub mod utils;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub recipes: RecipeService,
    pub auth: AuthStrategy,
}

impl AppState {
    /// Connects the configured backends, seeds users and wires the service.
    pub async fn from_config(config: Config) -> AppResult<Self> {
        // Redis client, shared by the recipe cache and session store
        let redis = match &config.redis_url {
            Some(url) => Some(Arc::new(RedisClient::open(url.as_str())?)),
            None => None,
        };

        // Document store
        let (repository, credentials): (Arc<dyn RecipeRepository>, Arc<dyn CredentialStore>) =
            match config.store_backend {
                StoreBackend::Postgres => {
                    let url = config
                        .database_url
                        .as_deref()
                        .ok_or(ConfigError::Missing("DATABASE_URL"))?;
                    let pool = database::connect_postgres(url, &config).await?;
                    (
                        Arc::new(PgRecipeRepository::new(pool.clone())) as Arc<dyn RecipeRepository>,
                        Arc::new(PgCredentialStore::new(pool)) as Arc<dyn CredentialStore>,
                    )
                }
                StoreBackend::Memory => {
                    tracing::warn!("Using in-memory document store, data is lost on restart");
                    (
                        Arc::new(MemoryRecipeRepository::default()) as Arc<dyn RecipeRepository>,
                        Arc::new(MemoryCredentialStore::default()) as Arc<dyn CredentialStore>,
                    )
                }
            };

        // Recipe cache
        let cache: Option<Arc<dyn RecipeCache>> = match config.cache_backend {
            CacheBackend::None => None,
            CacheBackend::Memory => Some(Arc::new(MemoryRecipeCache::default()) as Arc<dyn RecipeCache>),
            CacheBackend::Redis => {
                let redis = redis.clone().ok_or(ConfigError::Missing("REDIS_URL"))?;
                Some(Arc::new(RedisRecipeCache::new(redis)) as Arc<dyn RecipeCache>)
            }
        };

        // Seed accounts
        let hasher = PasswordHasher::new(config.bcrypt_cost);
        database::seed_users(credentials.as_ref(), &hasher, &config.seed_users).await?;

        // Auth strategy
        let auth = match config.auth_mode {
            AuthMode::None => {
                tracing::warn!("Authentication disabled, every route is public");
                AuthStrategy::None
            }
            AuthMode::Session => {
                let sessions: Arc<dyn SessionStore> = match redis {
                    Some(redis) => Arc::new(RedisSessionStore::new(redis)),
                    None => Arc::new(MemorySessionStore::default()),
                };
                AuthStrategy::Session(SessionIssuer::new(
                    credentials,
                    sessions,
                    hasher,
                    config.session_ttl(),
                ))
            }
            AuthMode::Bearer => {
                let secret = config
                    .jwt_secret
                    .as_deref()
                    .ok_or(ConfigError::Missing("JWT_SECRET"))?;
                AuthStrategy::Bearer(BearerIssuer::new(
                    credentials,
                    hasher,
                    JwtKeys::new(secret, config.jwt_expiration()),
                ))
            }
        };

        Ok(AppState {
            recipes: RecipeService::new(repository, cache),
            auth,
            config,
        })
    }
}
