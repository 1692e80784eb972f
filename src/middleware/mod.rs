mod auth;

pub use auth::{AuthUser, TOKEN_COOKIE};
