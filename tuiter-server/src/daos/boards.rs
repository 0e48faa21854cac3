use anyhow::Result;
use tuiter_common::{Board, BoardId, DeleteStatus, Expandable, User, UserId};

use super::deleted;
use crate::store::{Collection, Document, Store};

impl Document for Board {
    const COLLECTION: &'static str = "boards";
    fn key(&self) -> &str {
        self.id.as_str()
    }
}

#[derive(Clone)]
pub struct BoardDao {
    boards: Collection<Board>,
    users: Collection<User>,
}

impl BoardDao {
    pub fn new(store: &Store) -> Result<Self> {
        Ok(Self {
            boards: store.collection()?,
            users: store.collection()?,
        })
    }

    pub fn create_board_by_user(&self, uid: &UserId, board_name: &str) -> Result<Board> {
        let board = Board {
            id: BoardId(self.boards.next_id()?),
            board_name: board_name.to_string(),
            created_by: Expandable::Id(uid.clone()),
        };
        self.boards.insert(&board)?;
        Ok(board)
    }

    pub fn delete_board(&self, bid: &BoardId) -> Result<DeleteStatus> {
        Ok(deleted(self.boards.remove(bid)? as u64))
    }

    pub fn find_all_boards_by_user(&self, uid: &UserId) -> Result<Vec<Board>> {
        let mut boards = self.boards.find(|board| board.created_by.id() == uid)?;
        for board in &mut boards {
            let link = board.created_by.clone();
            board.created_by = self.users.populate(link)?.map_doc(User::redacted);
        }
        Ok(boards)
    }

    pub fn find_board_of_user_by_name(&self, uid: &UserId, board_name: &str) -> Result<Option<Board>> {
        self.boards
            .find_one(|board| board.created_by.id() == uid && board.board_name == board_name)
    }

    /// The board, provided `uid` owns it.
    pub fn find_board_by_user(&self, bid: &BoardId, uid: &UserId) -> Result<Option<Board>> {
        Ok(self.boards.get(bid)?.filter(|board| board.created_by.id() == uid))
    }
}
