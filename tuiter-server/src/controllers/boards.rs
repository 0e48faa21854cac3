use axum::extract::Path;
use axum::routing::{delete, get, post};
use axum::{Extension, Json, Router};
use tuiter_common::{Board, BoardId, BoardOwner, DeleteStatus, Tuit, TuitBoardMap, TuitId, UserRef};

use crate::error::{AppError, Result};
use crate::session::Session;
use crate::State;

pub fn routes() -> Router {
    Router::new()
        .route("/users/:uid/boards", get(find_all_boards_by_user))
        .route("/users/:uid/boards/:name", post(create_board_by_user))
        .route("/boards/:bid", delete(delete_board))
        .route("/boards/:bid/tuits", get(find_all_tuits_from_board))
        .route(
            "/boards/:bid/tuits/:tid",
            post(add_tuit_to_board).delete(remove_tuit_from_board),
        )
}

/// Resolves the body's owner and checks they created `bid`.
fn owned_board(state: &State, session: &Session, bid: &BoardId, owner: &UserRef) -> Result<Board> {
    let uid = session.resolve(owner)?;
    state.boards.find_board_by_user(bid, &uid)?.ok_or(AppError::NotFound)
}

pub async fn create_board_by_user(
    Extension(state): Extension<State>,
    session: Session,
    Path((uid, name)): Path<(UserRef, String)>,
) -> Result<Json<Board>> {
    let uid = session.resolve(&uid)?;
    if state.boards.find_board_of_user_by_name(&uid, &name)?.is_some() {
        return Err(AppError::Conflict(format!("board {name} already exists")));
    }
    Ok(Json(state.boards.create_board_by_user(&uid, &name)?))
}

pub async fn find_all_boards_by_user(
    Extension(state): Extension<State>,
    session: Session,
    Path(uid): Path<UserRef>,
) -> Result<Json<Vec<Board>>> {
    let uid = session.resolve(&uid)?;
    Ok(Json(state.boards.find_all_boards_by_user(&uid)?))
}

pub async fn delete_board(
    Extension(state): Extension<State>,
    session: Session,
    Path(bid): Path<BoardId>,
    Json(owner): Json<BoardOwner>,
) -> Result<Json<DeleteStatus>> {
    let board = owned_board(&state, &session, &bid, &owner.id)?;
    state.tuit_board_maps.remove_all_tuits_from_board(&board.id)?;
    Ok(Json(state.boards.delete_board(&board.id)?))
}

pub async fn add_tuit_to_board(
    Extension(state): Extension<State>,
    session: Session,
    Path((bid, tid)): Path<(BoardId, TuitId)>,
    Json(owner): Json<BoardOwner>,
) -> Result<Json<TuitBoardMap>> {
    let board = owned_board(&state, &session, &bid, &owner.id)?;
    state.tuits.find_tuit_by_id(&tid)?.ok_or(AppError::NotFound)?;
    Ok(Json(state.tuit_board_maps.add_tuit_to_board(&board.id, &tid)?))
}

pub async fn remove_tuit_from_board(
    Extension(state): Extension<State>,
    session: Session,
    Path((bid, tid)): Path<(BoardId, TuitId)>,
    Json(owner): Json<BoardOwner>,
) -> Result<Json<DeleteStatus>> {
    let board = owned_board(&state, &session, &bid, &owner.id)?;
    Ok(Json(state.tuit_board_maps.remove_tuit_from_board(&board.id, &tid)?))
}

pub async fn find_all_tuits_from_board(
    Extension(state): Extension<State>,
    Path(bid): Path<BoardId>,
) -> Result<Json<Vec<Tuit>>> {
    let maps = state.tuit_board_maps.find_all_tuits_from_board(&bid)?;
    Ok(Json(maps.into_iter().filter_map(|map| map.tuit.into_doc()).collect()))
}
