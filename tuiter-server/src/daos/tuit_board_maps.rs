use anyhow::Result;
use tuiter_common::{BoardId, DeleteStatus, Expandable, Tuit, TuitBoardMap, TuitId};

use super::deleted;
use crate::store::{Collection, Document, Store};

impl Document for TuitBoardMap {
    const COLLECTION: &'static str = "tuit_board_map";
    fn key(&self) -> &str {
        &self.id
    }
}

#[derive(Clone)]
pub struct TuitBoardMapDao {
    maps: Collection<TuitBoardMap>,
    tuits: Collection<Tuit>,
}

impl TuitBoardMapDao {
    pub fn new(store: &Store) -> Result<Self> {
        Ok(Self {
            maps: store.collection()?,
            tuits: store.collection()?,
        })
    }

    pub fn add_tuit_to_board(&self, bid: &BoardId, tid: &TuitId) -> Result<TuitBoardMap> {
        let map = TuitBoardMap {
            id: self.maps.next_id()?,
            board: Expandable::Id(bid.clone()),
            tuit: Expandable::Id(tid.clone()),
        };
        self.maps.insert(&map)?;
        Ok(map)
    }

    pub fn remove_tuit_from_board(&self, bid: &BoardId, tid: &TuitId) -> Result<DeleteStatus> {
        let removed = self
            .maps
            .remove_one_where(|map| map.board.id() == bid && map.tuit.id() == tid)?;
        Ok(deleted(removed))
    }

    pub fn remove_all_tuits_from_board(&self, bid: &BoardId) -> Result<DeleteStatus> {
        Ok(deleted(self.maps.remove_where(|map| map.board.id() == bid)?))
    }

    pub fn find_all_tuits_from_board(&self, bid: &BoardId) -> Result<Vec<TuitBoardMap>> {
        let mut maps = self.maps.find(|map| map.board.id() == bid)?;
        for map in &mut maps {
            let link = map.tuit.clone();
            map.tuit = self.tuits.populate(link)?;
        }
        Ok(maps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::daos::TuitDao;
    use tuiter_common::{TuitDraft, UserId};

    #[test]
    fn board_lists_its_tuits_until_cleared() -> Result<()> {
        let store = Store::temporary()?;
        let tuits = TuitDao::new(&store)?;
        let maps = TuitBoardMapDao::new(&store)?;
        let author = UserId::from("author");
        let first = tuits.create_tuit(&author, TuitDraft { tuit: "one".into(), ..Default::default() })?;
        let second = tuits.create_tuit(&author, TuitDraft { tuit: "two".into(), ..Default::default() })?;
        let bid = BoardId::from("board");

        maps.add_tuit_to_board(&bid, &first.id)?;
        maps.add_tuit_to_board(&bid, &second.id)?;
        maps.add_tuit_to_board(&BoardId::from("elsewhere"), &first.id)?;
        let listed: Vec<_> = maps
            .find_all_tuits_from_board(&bid)?
            .into_iter()
            .filter_map(|map| map.tuit.into_doc())
            .map(|tuit| tuit.tuit)
            .collect();
        assert_eq!(listed, ["one", "two"]);

        assert_eq!(maps.remove_tuit_from_board(&bid, &first.id)?.deleted_count, 1);
        assert_eq!(maps.remove_all_tuits_from_board(&bid)?.deleted_count, 1);
        assert!(maps.find_all_tuits_from_board(&bid)?.is_empty());
        Ok(())
    }
}
