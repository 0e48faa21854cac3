use axum::extract::Path;
use axum::routing::get;
use axum::{Extension, Json, Router};
use tuiter_common::{DeleteStatus, Tuit, TuitDraft, TuitId, UpdateStatus, UserRef};

use crate::error::{AppError, Result};
use crate::gate::Action;
use crate::session::Session;
use crate::State;

pub fn routes() -> Router {
    Router::new()
        .route("/tuits", get(find_all_tuits))
        .route("/tuits/:tid", get(find_tuit_by_id).put(update_tuit).delete(delete_tuit))
        .route("/users/:uid/tuits", get(find_tuits_by_user).post(create_tuit))
}

pub async fn find_all_tuits(Extension(state): Extension<State>) -> Result<Json<Vec<Tuit>>> {
    Ok(Json(state.tuits.find_all_tuits()?))
}

pub async fn find_tuit_by_id(Extension(state): Extension<State>, Path(tid): Path<TuitId>) -> Result<Json<Tuit>> {
    state.tuits.find_tuit_by_id(&tid)?.map(Json).ok_or(AppError::NotFound)
}

pub async fn find_tuits_by_user(
    Extension(state): Extension<State>,
    session: Session,
    Path(uid): Path<UserRef>,
) -> Result<Json<Vec<Tuit>>> {
    let uid = session.resolve(&uid)?;
    Ok(Json(state.tuits.find_tuits_by_user(&uid)?))
}

pub async fn create_tuit(
    Extension(state): Extension<State>,
    session: Session,
    Path(uid): Path<UserRef>,
    Json(draft): Json<TuitDraft>,
) -> Result<Json<Tuit>> {
    let uid = session.resolve(&uid)?;
    state.gate.check(&uid, Action::CreateTuit)?;
    Ok(Json(state.tuits.create_tuit(&uid, draft)?))
}

pub async fn update_tuit(
    Extension(state): Extension<State>,
    Path(tid): Path<TuitId>,
    Json(draft): Json<TuitDraft>,
) -> Result<Json<UpdateStatus>> {
    Ok(Json(state.tuits.update_tuit(&tid, draft)?))
}

pub async fn delete_tuit(Extension(state): Extension<State>, Path(tid): Path<TuitId>) -> Result<Json<DeleteStatus>> {
    Ok(Json(state.tuits.delete_tuit(&tid)?))
}
