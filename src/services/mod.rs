mod auth;
mod news;

pub use auth::{AuthService, Claims};
pub use news::NewsService;
