mod auth;
mod favorites;
mod health;
mod news;

pub use auth::{issue_token, logout};
pub use favorites::{create_favorite, delete_favorite, list_favorites, update_favorite};
pub use health::welcome;
pub use news::{create_news, get_news, list_news, news_count};
