use axum::extract::Path;
use axum::routing::{delete, get, post};
use axum::{Extension, Json, Router};
use tuiter_common::{DeleteStatus, Message, MessageId, NewMessage, UserId, UserRef};

use crate::error::Result;
use crate::session::Session;
use crate::State;

pub fn routes() -> Router {
    Router::new()
        .route("/users/sender/:uid/receiver/:other", post(user_messages_another_user))
        .route("/messages/:mid", delete(user_deletes_message))
        .route("/users/:uid/messages/sent", get(find_all_messages_sent))
        .route("/users/:uid/messages/received", get(find_all_messages_received))
}

pub async fn user_messages_another_user(
    Extension(state): Extension<State>,
    session: Session,
    Path((uid, other)): Path<(UserRef, UserId)>,
    Json(body): Json<NewMessage>,
) -> Result<Json<Message>> {
    let uid = session.resolve(&uid)?;
    Ok(Json(state.messages.user_messages_another_user(&uid, &other, body)?))
}

pub async fn user_deletes_message(
    Extension(state): Extension<State>,
    Path(mid): Path<MessageId>,
) -> Result<Json<DeleteStatus>> {
    Ok(Json(state.messages.user_deletes_message(&mid)?))
}

pub async fn find_all_messages_sent(
    Extension(state): Extension<State>,
    session: Session,
    Path(uid): Path<UserRef>,
) -> Result<Json<Vec<Message>>> {
    let uid = session.resolve(&uid)?;
    Ok(Json(state.messages.find_all_messages_sent(&uid)?))
}

pub async fn find_all_messages_received(
    Extension(state): Extension<State>,
    session: Session,
    Path(uid): Path<UserRef>,
) -> Result<Json<Vec<Message>>> {
    let uid = session.resolve(&uid)?;
    Ok(Json(state.messages.find_all_messages_received(&uid)?))
}
