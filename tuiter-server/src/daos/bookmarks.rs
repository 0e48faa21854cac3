use anyhow::Result;
use tuiter_common::{Bookmark, DeleteStatus, Expandable, Tuit, TuitId, User, UserId};

use super::deleted;
use crate::store::{Collection, Document, Store};

impl Document for Bookmark {
    const COLLECTION: &'static str = "bookmarks";
    fn key(&self) -> &str {
        &self.id
    }
}

#[derive(Clone)]
pub struct BookmarkDao {
    bookmarks: Collection<Bookmark>,
    tuits: Collection<Tuit>,
    users: Collection<User>,
}

impl BookmarkDao {
    pub fn new(store: &Store) -> Result<Self> {
        Ok(Self {
            bookmarks: store.collection()?,
            tuits: store.collection()?,
            users: store.collection()?,
        })
    }

    pub fn user_bookmarks_tuit(&self, uid: &UserId, tid: &TuitId) -> Result<Bookmark> {
        let bookmark = Bookmark {
            id: self.bookmarks.next_id()?,
            tuit: Expandable::Id(tid.clone()),
            bookmarked_by: Expandable::Id(uid.clone()),
        };
        self.bookmarks.insert(&bookmark)?;
        Ok(bookmark)
    }

    pub fn user_unbookmarks_tuit(&self, uid: &UserId, tid: &TuitId) -> Result<DeleteStatus> {
        let removed = self
            .bookmarks
            .remove_one_where(|b| b.bookmarked_by.id() == uid && b.tuit.id() == tid)?;
        Ok(deleted(removed))
    }

    pub fn find_all_tuits_bookmarked_by_user(&self, uid: &UserId) -> Result<Vec<Bookmark>> {
        let mut bookmarks = self.bookmarks.find(|b| b.bookmarked_by.id() == uid)?;
        for bookmark in &mut bookmarks {
            let link = bookmark.tuit.clone();
            bookmark.tuit = self.tuits.populate(link)?;
        }
        Ok(bookmarks)
    }

    pub fn find_all_users_that_bookmarked_tuit(&self, tid: &TuitId) -> Result<Vec<Bookmark>> {
        let mut bookmarks = self.bookmarks.find(|b| b.tuit.id() == tid)?;
        for bookmark in &mut bookmarks {
            let link = bookmark.bookmarked_by.clone();
            bookmark.bookmarked_by = self.users.populate(link)?.map_doc(User::redacted);
        }
        Ok(bookmarks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::daos::{TuitDao, UserDao};
    use tuiter_common::TuitDraft;

    #[test]
    fn bookmarks_expand_the_other_side() -> Result<()> {
        let store = Store::temporary()?;
        let users = UserDao::new(&store)?;
        let tuits = TuitDao::new(&store)?;
        let bookmarks = BookmarkDao::new(&store)?;
        let alice = users.create_user(User {
            username: "alice".into(),
            password: "hash".into(),
            ..Default::default()
        })?;
        let tuit = tuits.create_tuit(&alice.id, TuitDraft { tuit: "keep".into(), ..Default::default() })?;

        bookmarks.user_bookmarks_tuit(&alice.id, &tuit.id)?;
        let mine = bookmarks.find_all_tuits_bookmarked_by_user(&alice.id)?;
        assert_eq!(mine[0].tuit.doc().map(|t| t.tuit.as_str()), Some("keep"));
        let on_tuit = bookmarks.find_all_users_that_bookmarked_tuit(&tuit.id)?;
        let who = on_tuit[0].bookmarked_by.doc().unwrap();
        assert_eq!(who.username, "alice");
        assert!(who.password.is_empty());

        assert_eq!(bookmarks.user_unbookmarks_tuit(&alice.id, &tuit.id)?.deleted_count, 1);
        assert!(bookmarks.find_all_tuits_bookmarked_by_user(&alice.id)?.is_empty());
        Ok(())
    }
}
