use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::{
    AppState,
    error::AppResult,
    middleware::AuthUser,
    models::{
        DeleteResponse, Favorite, FavoriteDto, InsertResponse, UpdateFavoriteInput, UpdateResponse,
    },
};

#[derive(Debug, Deserialize)]
pub struct FavoritesQuery {
    pub email: String,
}

pub async fn create_favorite(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(favorite): Json<Favorite>,
) -> AppResult<Json<InsertResponse>> {
    let response = state
        .news_service
        .add_favorite(&claims.email, favorite)
        .await?;

    Ok(Json(response))
}

pub async fn list_favorites(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Query(query): Query<FavoritesQuery>,
) -> AppResult<Json<Vec<FavoriteDto>>> {
    let favorites = state
        .news_service
        .list_favorites(&claims.email, &query.email)
        .await?;

    Ok(Json(favorites))
}

pub async fn update_favorite(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
    Json(input): Json<UpdateFavoriteInput>,
) -> AppResult<Json<UpdateResponse>> {
    let response = state
        .news_service
        .update_favorite_status(&claims.email, &id, input)
        .await?;

    Ok(Json(response))
}

pub async fn delete_favorite(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteResponse>> {
    let response = state.news_service.delete_favorite(&claims.email, &id).await?;

    Ok(Json(response))
}
