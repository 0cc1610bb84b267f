pub mod recipe;
pub mod user;

pub use recipe::{Recipe, RecipeFields};
pub use user::UserEntity;
