use axum::extract::Path;
use axum::routing::{get, put};
use axum::{Extension, Json, Router};
use tracing::info;
use tuiter_common::{Privilege, PrivilegeFlag, UpdateStatus, UserId};

use crate::error::{AppError, Result};
use crate::State;

pub fn routes() -> Router {
    Router::new()
        .route("/privileges", get(get_privileges))
        .route("/users/:uid/privileges", get(get_privileges_user))
        .route("/users/:uid/privilegesTrue/:flag", put(set_privilege_true))
        .route("/users/:uid/privilegesFalse/:flag", put(set_privilege_false))
}

pub async fn get_privileges(Extension(state): Extension<State>) -> Result<Json<Vec<Privilege>>> {
    Ok(Json(state.privileges.get_privileges()?))
}

pub async fn get_privileges_user(
    Extension(state): Extension<State>,
    Path(uid): Path<UserId>,
) -> Result<Json<Privilege>> {
    state.privileges.get_privileges_user(&uid)?.map(Json).ok_or(AppError::NotFound)
}

pub async fn set_privilege_true(
    Extension(state): Extension<State>,
    Path((uid, flag)): Path<(UserId, String)>,
) -> Result<Json<UpdateStatus>> {
    set_privilege(&state, &uid, &flag, true)
}

pub async fn set_privilege_false(
    Extension(state): Extension<State>,
    Path((uid, flag)): Path<(UserId, String)>,
) -> Result<Json<UpdateStatus>> {
    set_privilege(&state, &uid, &flag, false)
}

fn set_privilege(state: &State, uid: &UserId, flag: &str, value: bool) -> Result<Json<UpdateStatus>> {
    let flag: PrivilegeFlag = flag.parse().map_err(|err| AppError::BadRequest(format!("{err}")))?;
    let status = state.privileges.set_privilege(uid, flag, value)?;
    info!(user = %uid, %flag, value, "privilege changed");
    Ok(Json(status))
}
