use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use crate::{AppState, handlers};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::welcome))
        .route("/jwt", post(handlers::issue_token))
        .route("/logout", post(handlers::logout))
        .route("/all-news", get(handlers::list_news))
        .route("/all-news-count", get(handlers::news_count))
        .route("/news/{id}", get(handlers::get_news))
        .route("/news", post(handlers::create_news))
        .route("/fav-news", get(handlers::list_favorites))
        .route("/fav-news", post(handlers::create_favorite))
        .route("/fav-news/{id}", patch(handlers::update_favorite))
        .route("/fav-news/{id}", delete(handlers::delete_favorite))
        .with_state(state)
}
