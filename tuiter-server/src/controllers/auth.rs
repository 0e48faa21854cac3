use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Extension, Json, Router};
use tracing::info;
use tuiter_common::{Credentials, User};

use crate::error::{AppError, Result};
use crate::gate::Action;
use crate::password;
use crate::session::Session;
use crate::State;

pub fn routes() -> Router {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/auth/profile", post(profile))
        .route("/auth/logout", post(logout))
}

/// Creates the user, provisions their privileges and logs them in.
pub async fn register(
    Extension(state): Extension<State>,
    session: Session,
    Json(mut user): Json<User>,
) -> Result<impl IntoResponse> {
    if user.username.is_empty() || user.password.is_empty() {
        return Err(AppError::BadRequest("userName and password are required".into()));
    }
    if state.users.find_user_by_username(&user.username)?.is_some() {
        return Err(AppError::Forbidden("username taken"));
    }
    user.password = password::spawn_hash(user.password).await?;
    let user = state.users.create_user(user)?;
    state.privileges.create_privilege(&user.id)?;
    info!(user = %user.id, "registered {}", user.username);

    let sid = state.sessions.bind(session.id.as_deref(), user.clone());
    Ok(([(SET_COOKIE, state.sessions.set_cookie(&sid))], Json(user.redacted())))
}

pub async fn login(
    Extension(state): Extension<State>,
    session: Session,
    Json(credentials): Json<Credentials>,
) -> Result<impl IntoResponse> {
    let user = state
        .users
        .find_user_by_username(&credentials.username)?
        .ok_or(AppError::Forbidden("bad credentials"))?;
    if !password::spawn_verify(credentials.password, user.password.clone()).await? {
        return Err(AppError::Forbidden("bad credentials"));
    }
    state.gate.check(&user.id, Action::SignIn)?;

    let sid = state.sessions.bind(session.id.as_deref(), user.clone());
    info!(user = %user.id, "logged in");
    Ok(([(SET_COOKIE, state.sessions.set_cookie(&sid))], Json(user.redacted())))
}

pub async fn profile(session: Session) -> Result<Json<User>> {
    session.profile.map(Json).ok_or(AppError::Forbidden("not logged in"))
}

pub async fn logout(Extension(state): Extension<State>, session: Session) -> impl IntoResponse {
    if let Some(sid) = &session.id {
        state.sessions.destroy(sid);
    }
    ([(SET_COOKIE, state.sessions.clear_cookie())], StatusCode::OK)
}
