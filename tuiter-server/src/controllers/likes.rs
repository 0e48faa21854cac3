use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Extension, Json, Router};
use tuiter_common::{Tuit, TuitId, User, UserRef};

use crate::error::Result;
use crate::session::Session;
use crate::State;

pub fn routes() -> Router {
    Router::new()
        .route("/users/:uid/likes", get(find_all_tuits_liked_by_user))
        .route("/users/:uid/dislikes", get(find_all_tuits_disliked_by_user))
        .route("/users/:uid/likes/:tid", put(user_toggles_tuit_likes))
        .route("/users/:uid/dislikes/:tid", put(user_toggles_tuit_dislikes))
        .route("/tuits/:tid/likes", get(find_all_users_that_liked_tuit))
}

pub async fn find_all_tuits_liked_by_user(
    Extension(state): Extension<State>,
    session: Session,
    Path(uid): Path<UserRef>,
) -> Result<Json<Vec<Tuit>>> {
    let uid = session.resolve(&uid)?;
    Ok(Json(state.likes.find_all_tuits_by_user(&uid)?))
}

pub async fn find_all_tuits_disliked_by_user(
    Extension(state): Extension<State>,
    session: Session,
    Path(uid): Path<UserRef>,
) -> Result<Json<Vec<Tuit>>> {
    let uid = session.resolve(&uid)?;
    Ok(Json(state.dislikes.find_all_tuits_by_user(&uid)?))
}

pub async fn find_all_users_that_liked_tuit(
    Extension(state): Extension<State>,
    Path(tid): Path<TuitId>,
) -> Result<Json<Vec<User>>> {
    Ok(Json(state.likes.find_all_users_on_tuit(&tid)?))
}

pub async fn user_toggles_tuit_likes(
    Extension(state): Extension<State>,
    session: Session,
    Path((uid, tid)): Path<(UserRef, TuitId)>,
) -> Result<StatusCode> {
    let uid = session.resolve(&uid)?;
    state.toggles.toggle_like(&uid, &tid)?;
    Ok(StatusCode::OK)
}

pub async fn user_toggles_tuit_dislikes(
    Extension(state): Extension<State>,
    session: Session,
    Path((uid, tid)): Path<(UserRef, TuitId)>,
) -> Result<StatusCode> {
    let uid = session.resolve(&uid)?;
    state.toggles.toggle_dislike(&uid, &tid)?;
    Ok(StatusCode::OK)
}
