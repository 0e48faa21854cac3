use axum::extract::Path;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use tuiter_common::{Bookmark, DeleteStatus, TuitId, UserRef};

use crate::error::Result;
use crate::session::Session;
use crate::State;

pub fn routes() -> Router {
    Router::new()
        .route(
            "/users/:uid/bookmarks/:tid",
            post(user_bookmarks_tuit).delete(user_unbookmarks_tuit),
        )
        .route("/users/:uid/bookmarks", get(find_all_tuits_bookmarked_by_user))
        .route("/tuits/:tid/bookmarks", get(find_all_users_that_bookmarked_tuit))
}

pub async fn user_bookmarks_tuit(
    Extension(state): Extension<State>,
    session: Session,
    Path((uid, tid)): Path<(UserRef, TuitId)>,
) -> Result<Json<Bookmark>> {
    let uid = session.resolve(&uid)?;
    Ok(Json(state.bookmarks.user_bookmarks_tuit(&uid, &tid)?))
}

pub async fn user_unbookmarks_tuit(
    Extension(state): Extension<State>,
    session: Session,
    Path((uid, tid)): Path<(UserRef, TuitId)>,
) -> Result<Json<DeleteStatus>> {
    let uid = session.resolve(&uid)?;
    Ok(Json(state.bookmarks.user_unbookmarks_tuit(&uid, &tid)?))
}

pub async fn find_all_tuits_bookmarked_by_user(
    Extension(state): Extension<State>,
    session: Session,
    Path(uid): Path<UserRef>,
) -> Result<Json<Vec<Bookmark>>> {
    let uid = session.resolve(&uid)?;
    Ok(Json(state.bookmarks.find_all_tuits_bookmarked_by_user(&uid)?))
}

pub async fn find_all_users_that_bookmarked_tuit(
    Extension(state): Extension<State>,
    Path(tid): Path<TuitId>,
) -> Result<Json<Vec<Bookmark>>> {
    Ok(Json(state.bookmarks.find_all_users_that_bookmarked_tuit(&tid)?))
}
