use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::CookieJar;

use crate::{AppState, error::AppError, services::Claims};

pub const TOKEN_COOKIE: &str = "token";

/// Gate for user-scoped routes: pulls the `token` cookie and validates it
/// before any handler logic runs. A missing cookie and an invalid or expired
/// token both reject with 401.
pub struct AuthUser(pub Claims);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        let token = jar
            .get(TOKEN_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .ok_or(AppError::Unauthorized)?;

        let claims = state.auth_service.validate_token(&token)?;

        Ok(AuthUser(claims))
    }
}
