//! Data-access objects. Each one wraps the collections it reads and keeps
//! no state of its own, so cloning one is cheap.

pub mod boards;
pub mod bookmarks;
pub mod follows;
pub mod messages;
pub mod privileges;
pub mod reactions;
pub mod tuit_board_maps;
pub mod tuits;
pub mod users;

pub use boards::BoardDao;
pub use bookmarks::BookmarkDao;
pub use follows::FollowDao;
pub use messages::MessageDao;
pub use privileges::PrivilegeDao;
pub use reactions::{DislikeDao, LikeDao, ReactionDao, ReactionKind};
pub use tuit_board_maps::TuitBoardMapDao;
pub use tuits::TuitDao;
pub use users::UserDao;

use tuiter_common::{DeleteStatus, UpdateStatus};

pub(crate) fn deleted(count: u64) -> DeleteStatus {
    DeleteStatus { deleted_count: count }
}

pub(crate) fn updated(found: bool) -> UpdateStatus {
    let count = found as u64;
    UpdateStatus {
        matched_count: count,
        modified_count: count,
    }
}
