pub mod recipe;
pub mod session;

pub use recipe::RedisRecipeCache;
pub use session::RedisSessionStore;
