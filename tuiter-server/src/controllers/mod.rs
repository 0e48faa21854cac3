//! HTTP routes, one module per resource.

pub mod auth;
pub mod boards;
pub mod bookmarks;
pub mod follows;
pub mod likes;
pub mod messages;
pub mod privileges;
pub mod tuits;
pub mod users;

use axum::routing::get;
use axum::Router;

pub fn router() -> Router {
    Router::new()
        .route("/", get(root))
        .merge(auth::routes())
        .merge(users::routes())
        .merge(tuits::routes())
        .merge(likes::routes())
        .merge(follows::routes())
        .merge(bookmarks::routes())
        .merge(messages::routes())
        .merge(boards::routes())
        .merge(privileges::routes())
}

async fn root() -> &'static str {
    "Welcome!"
}
