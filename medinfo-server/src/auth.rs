//! Admin authentication: login/logout/check handlers and the gate that
//! protects every other `/admin` route.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{Json, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use medinfo_core::{Envelope, LoginRequest};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::error::{ApiError, ApiResult};
use crate::handlers::ApiJson;
use crate::session::AdminSession;
use crate::AppState;

/// Resolve the session cookie of a request, if any
async fn current_session(state: &AppState, jar: &CookieJar) -> Option<AdminSession> {
    let token = jar.get(&state.config.auth.cookie_name)?;
    state.sessions.get(token.value()).await
}

/// Admin gate. Inserts the `AdminSession` extension or answers 401.
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(session) = current_session(&state, &jar).await else {
        tracing::debug!(path = %request.uri().path(), "Rejected admin request without session");
        return Err(ApiError::unauthorized("Unauthorized"));
    };

    request.extensions_mut().insert(session);
    Ok(next.run(request).await)
}

fn session_cookie(state: &AppState, token: String) -> Cookie<'static> {
    Cookie::build((state.config.auth.cookie_name.clone(), token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config.auth.secure_cookie)
        .build()
}

/// POST /admin/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    ApiJson(request): ApiJson<LoginRequest>,
) -> ApiResult<(CookieJar, Json<Envelope<Value>>)> {
    let email = request.email.trim().to_string();
    if email.is_empty() || request.password.is_empty() {
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    // Argon2 verification is CPU-bound
    let verify_state = state.clone();
    let verify_email = email.clone();
    let admin = tokio::task::spawn_blocking(move || {
        verify_state
            .store
            .verify_admin(&verify_email, &request.password)
    })
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "Login verification task failed");
        ApiError::new(axum::http::StatusCode::INTERNAL_SERVER_ERROR, "Login failed")
    })??;

    let Some(admin) = admin else {
        tracing::warn!(email = %email, "Failed admin login");
        return Err(ApiError::unauthorized("Invalid credentials"));
    };

    let token = state.sessions.create(&admin).await;
    tracing::info!(admin = %admin.email, "Admin logged in");

    let jar = jar.add(session_cookie(&state, token));
    Ok((
        jar,
        Json(Envelope::ok(json!({ "name": admin.name })).with_message("Login successful")),
    ))
}

/// POST /admin/logout
pub async fn logout(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> (CookieJar, Json<Envelope<()>>) {
    let cookie_name = state.config.auth.cookie_name.clone();
    if let Some(cookie) = jar.get(&cookie_name)
        && state.sessions.revoke(cookie.value()).await
    {
        tracing::info!("Admin logged out");
    }

    let jar = jar.remove(Cookie::build(cookie_name).path("/"));
    (jar, Json(Envelope::done("Logged out")))
}

/// GET /admin/check. Always 200; `success` tells whether the session is live.
pub async fn check(State(state): State<Arc<AppState>>, jar: CookieJar) -> Json<Envelope<Value>> {
    match current_session(&state, &jar).await {
        Some(session) => Json(Envelope::ok(json!({
            "name": session.name,
            "email": session.email,
        }))),
        None => Json(Envelope::failure()),
    }
}
