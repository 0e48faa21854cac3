use axum::extract::Path;
use axum::routing::{delete, get};
use axum::{Extension, Json, Router};
use tuiter_common::{DeleteStatus, UpdateStatus, User, UserId};

use crate::error::{AppError, Result};
use crate::password;
use crate::State;

pub fn routes() -> Router {
    Router::new()
        .route("/users", get(find_all_users).post(create_user).delete(delete_all_users))
        .route("/users/:uid", get(find_user_by_id).put(update_user).delete(delete_user))
        .route("/users/username/:username", delete(delete_users_by_username))
}

pub async fn find_all_users(Extension(state): Extension<State>) -> Result<Json<Vec<User>>> {
    let users = state.users.find_all_users()?;
    Ok(Json(users.into_iter().map(User::redacted).collect()))
}

pub async fn find_user_by_id(Extension(state): Extension<State>, Path(uid): Path<UserId>) -> Result<Json<User>> {
    let user = state.users.find_user_by_id(&uid)?.ok_or(AppError::NotFound)?;
    Ok(Json(user.redacted()))
}

/// Admin create: like registration, minus the session.
pub async fn create_user(Extension(state): Extension<State>, Json(mut user): Json<User>) -> Result<Json<User>> {
    if user.username.is_empty() {
        return Err(AppError::BadRequest("userName is required".into()));
    }
    if state.users.find_user_by_username(&user.username)?.is_some() {
        return Err(AppError::Conflict(format!("username {} taken", user.username)));
    }
    if !user.password.is_empty() {
        user.password = password::spawn_hash(user.password).await?;
    }
    let user = state.users.create_user(user)?;
    state.privileges.create_privilege(&user.id)?;
    Ok(Json(user.redacted()))
}

pub async fn update_user(
    Extension(state): Extension<State>,
    Path(uid): Path<UserId>,
    Json(mut patch): Json<User>,
) -> Result<Json<UpdateStatus>> {
    if !patch.password.is_empty() {
        patch.password = password::spawn_hash(patch.password).await?;
    }
    Ok(Json(state.users.update_user(&uid, patch)?))
}

pub async fn delete_user(Extension(state): Extension<State>, Path(uid): Path<UserId>) -> Result<Json<DeleteStatus>> {
    let status = state.users.delete_user(&uid)?;
    state.privileges.delete_privileges_user(&uid)?;
    state.sessions.destroy_user(&uid);
    Ok(Json(status))
}

pub async fn delete_all_users(Extension(state): Extension<State>) -> Result<Json<DeleteStatus>> {
    let status = state.users.delete_all_users()?;
    state.privileges.delete_all_privileges()?;
    state.sessions.clear();
    Ok(Json(status))
}

pub async fn delete_users_by_username(
    Extension(state): Extension<State>,
    Path(username): Path<String>,
) -> Result<Json<DeleteStatus>> {
    if let Some(user) = state.users.find_user_by_username(&username)? {
        state.privileges.delete_privileges_user(&user.id)?;
        state.sessions.destroy_user(&user.id);
    }
    Ok(Json(state.users.delete_users_by_username(&username)?))
}
