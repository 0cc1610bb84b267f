use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
};

use crate::{
    AppState,
    common::MessageResponse,
    database::{Recipe, RecipeFields},
    error::{AppError, AppResult},
};

use super::model::SearchQuery;

fn parse_body(payload: Result<Json<RecipeFields>, JsonRejection>) -> AppResult<RecipeFields> {
    payload
        .map(|Json(fields)| fields)
        .map_err(|rejection| AppError::Validation(rejection.body_text()))
}

#[axum::debug_handler]
pub async fn create_recipe(
    State(state): State<AppState>,
    payload: Result<Json<RecipeFields>, JsonRejection>,
) -> AppResult<Json<Recipe>> {
    let fields = parse_body(payload)?;
    let recipe = state.recipes.create(fields).await?;
    Ok(Json(recipe))
}

#[axum::debug_handler]
pub async fn list_recipes(State(state): State<AppState>) -> AppResult<Json<Vec<Recipe>>> {
    Ok(Json(state.recipes.list().await?))
}

/// Succeeds even when no recipe has this id.
#[axum::debug_handler]
pub async fn update_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<RecipeFields>, JsonRejection>,
) -> AppResult<Json<MessageResponse>> {
    let fields = parse_body(payload)?;
    state.recipes.update(&id, fields).await?;
    Ok(Json(MessageResponse::new("Recipe has been updated")))
}

#[axum::debug_handler]
pub async fn delete_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    state.recipes.delete(&id).await?;
    Ok(Json(MessageResponse::new("Recipe has been deleted")))
}

#[axum::debug_handler]
pub async fn search_recipes(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<Recipe>>> {
    Ok(Json(state.recipes.search(&query.tag).await?))
}
