pub mod recipe;
pub mod user;

pub use recipe::PgRecipeRepository;
pub use user::PgCredentialStore;
