use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_json::{Value, json};

use crate::{
    AppState,
    error::{AppError, AppResult},
    models::{InsertResponse, ListNewsQuery, NewsDto},
};

pub async fn list_news(
    State(state): State<AppState>,
    Query(query): Query<ListNewsQuery>,
) -> AppResult<Json<Vec<NewsDto>>> {
    let news = state.news_service.list(query).await?;

    Ok(Json(news))
}

pub async fn news_count(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let count = state.news_service.count().await?;

    Ok(Json(json!({ "count": count })))
}

/// A missing article renders as a JSON null body, not a 404; only a
/// malformed id is a client error.
pub async fn get_news(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Option<NewsDto>>> {
    let news = state.news_service.get(&id).await?;

    Ok(Json(news))
}

/// No schema is imposed: any JSON object is accepted as an article.
pub async fn create_news(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> AppResult<Json<InsertResponse>> {
    let doc = bson::to_document(&payload)
        .map_err(|_| AppError::Validation("article must be a JSON object".to_string()))?;

    let response = state.news_service.create(doc).await?;

    Ok(Json(response))
}
