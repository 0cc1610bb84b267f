mod handler;
mod model;

pub use handler::{create_recipe, delete_recipe, list_recipes, search_recipes, update_recipe};
