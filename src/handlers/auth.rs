use axum::{Json, extract::State};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde_json::{Value, json};
use time::Duration;

use crate::{AppState, error::AppResult, middleware::TOKEN_COOKIE, models::IdentityInput};

/// POST /jwt: signs the supplied identity and sets the `token` cookie.
/// Cross-site clients require SameSite=None together with Secure.
pub async fn issue_token(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(input): Json<IdentityInput>,
) -> AppResult<(CookieJar, Json<Value>)> {
    let token = state.auth_service.issue_token(&input.email)?;

    let cookie = Cookie::build((TOKEN_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .max_age(Duration::hours(state.auth_service.token_ttl_hours()))
        .build();

    Ok((jar.add(cookie), Json(json!({ "success": true }))))
}

/// POST /logout: clears the cookie client-side. Already-issued tokens stay
/// valid until natural expiry; there is no revocation list.
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<Value>) {
    let removal = Cookie::build((TOKEN_COOKIE, "")).path("/").build();

    (jar.remove(removal), Json(json!({ "success": true })))
}
