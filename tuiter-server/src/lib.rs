pub mod config;
pub mod controllers;
pub mod daos;
pub mod error;
pub mod gate;
pub mod identity;
pub mod password;
pub mod session;
pub mod store;
pub mod toggles;

use std::sync::Arc;

use anyhow::Result;
use axum::{Extension, Router};

use config::Config;
use daos::{
    BoardDao, BookmarkDao, DislikeDao, FollowDao, LikeDao, MessageDao, PrivilegeDao, TuitBoardMapDao, TuitDao,
    UserDao,
};
use gate::PrivilegeGate;
use session::SessionStore;
use store::Store;
use toggles::ReactionToggles;

/// Everything a handler can reach. Cloned into each request; all fields are
/// handles onto shared storage.
#[derive(Clone)]
pub struct State {
    pub config: Arc<Config>,
    pub sessions: SessionStore,
    pub users: UserDao,
    pub tuits: TuitDao,
    pub likes: LikeDao,
    pub dislikes: DislikeDao,
    pub follows: FollowDao,
    pub bookmarks: BookmarkDao,
    pub messages: MessageDao,
    pub boards: BoardDao,
    pub tuit_board_maps: TuitBoardMapDao,
    pub privileges: PrivilegeDao,
    pub gate: PrivilegeGate,
    pub toggles: ReactionToggles,
}

impl State {
    pub fn new(store: &Store, config: Config) -> Result<Self> {
        let privileges = PrivilegeDao::new(store)?;
        let gate = PrivilegeGate::new(privileges.clone(), config.missing_privilege);
        let tuits = TuitDao::new(store)?;
        let likes = LikeDao::new(store)?;
        let dislikes = DislikeDao::new(store)?;
        let toggles = ReactionToggles::new(likes.clone(), dislikes.clone(), tuits.clone(), gate.clone());
        Ok(Self {
            sessions: SessionStore::new(config.session_cookie.clone(), config.secure_cookies),
            config: Arc::new(config),
            users: UserDao::new(store)?,
            tuits,
            likes,
            dislikes,
            follows: FollowDao::new(store)?,
            bookmarks: BookmarkDao::new(store)?,
            messages: MessageDao::new(store)?,
            boards: BoardDao::new(store)?,
            tuit_board_maps: TuitBoardMapDao::new(store)?,
            privileges,
            gate,
            toggles,
        })
    }
}

pub fn app(state: State) -> Router {
    controllers::router().layer(Extension(state))
}
