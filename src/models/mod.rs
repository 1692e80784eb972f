mod article;
mod auth;
mod favorite;

pub use article::{InsertResponse, ListNewsQuery, NewsDto};
pub use auth::IdentityInput;
pub use favorite::{DeleteResponse, Favorite, FavoriteDto, UpdateFavoriteInput, UpdateResponse};
