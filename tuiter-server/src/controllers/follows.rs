use axum::extract::Path;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use tuiter_common::{DeleteStatus, Follow, UserId, UserRef};

use crate::error::Result;
use crate::session::Session;
use crate::State;

pub fn routes() -> Router {
    Router::new()
        .route(
            "/users/:uid/follows/:other",
            post(user_follows_another_user).delete(user_unfollows_another_user),
        )
        .route("/users/:uid/followers", get(find_all_followers))
        .route("/users/:uid/following", get(find_all_following))
}

pub async fn user_follows_another_user(
    Extension(state): Extension<State>,
    session: Session,
    Path((uid, other)): Path<(UserRef, UserId)>,
) -> Result<Json<Follow>> {
    let uid = session.resolve(&uid)?;
    Ok(Json(state.follows.user_follows_another_user(&uid, &other)?))
}

pub async fn user_unfollows_another_user(
    Extension(state): Extension<State>,
    session: Session,
    Path((uid, other)): Path<(UserRef, UserId)>,
) -> Result<Json<DeleteStatus>> {
    let uid = session.resolve(&uid)?;
    Ok(Json(state.follows.user_unfollows_another_user(&uid, &other)?))
}

pub async fn find_all_followers(
    Extension(state): Extension<State>,
    session: Session,
    Path(uid): Path<UserRef>,
) -> Result<Json<Vec<Follow>>> {
    let uid = session.resolve(&uid)?;
    Ok(Json(state.follows.find_all_followers(&uid)?))
}

pub async fn find_all_following(
    Extension(state): Extension<State>,
    session: Session,
    Path(uid): Path<UserRef>,
) -> Result<Json<Vec<Follow>>> {
    let uid = session.resolve(&uid)?;
    Ok(Json(state.follows.find_all_following(&uid)?))
}
