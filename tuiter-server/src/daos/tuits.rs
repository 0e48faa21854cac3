use anyhow::Result;
use chrono::Utc;
use tuiter_common::{DeleteStatus, Expandable, Stats, Tuit, TuitDraft, TuitId, UpdateStatus, User, UserId};

use super::{deleted, updated};
use crate::store::{Collection, Document, Store};

impl Document for Tuit {
    const COLLECTION: &'static str = "tuits";
    fn key(&self) -> &str {
        self.id.as_str()
    }
}

#[derive(Clone)]
pub struct TuitDao {
    tuits: Collection<Tuit>,
    users: Collection<User>,
}

impl TuitDao {
    pub fn new(store: &Store) -> Result<Self> {
        Ok(Self {
            tuits: store.collection()?,
            users: store.collection()?,
        })
    }

    fn with_author(&self, mut tuit: Tuit) -> Result<Tuit> {
        tuit.posted_by = self.users.populate(tuit.posted_by)?.map_doc(User::redacted);
        Ok(tuit)
    }

    pub fn find_all_tuits(&self) -> Result<Vec<Tuit>> {
        self.tuits
            .all()?
            .into_iter()
            .map(|tuit| self.with_author(tuit))
            .collect()
    }

    pub fn find_tuits_by_user(&self, uid: &UserId) -> Result<Vec<Tuit>> {
        self.tuits
            .find(|tuit| tuit.posted_by.id() == uid)?
            .into_iter()
            .map(|tuit| self.with_author(tuit))
            .collect()
    }

    pub fn find_tuit_by_id(&self, tid: &TuitId) -> Result<Option<Tuit>> {
        self.tuits.get(tid)?.map(|tuit| self.with_author(tuit)).transpose()
    }

    pub fn create_tuit(&self, uid: &UserId, draft: TuitDraft) -> Result<Tuit> {
        let TuitDraft {
            tuit,
            image,
            youtube,
            avatar_logo,
            image_overlay,
        } = draft;
        let tuit = Tuit {
            id: TuitId(self.tuits.next_id()?),
            tuit,
            posted_by: Expandable::Id(uid.clone()),
            posted_on: Utc::now(),
            image,
            youtube,
            avatar_logo,
            image_overlay,
            stats: Stats::default(),
        };
        self.tuits.insert(&tuit)?;
        Ok(tuit)
    }

    /// Replaces the content fields; author, timestamp and stats stay.
    pub fn update_tuit(&self, tid: &TuitId, draft: TuitDraft) -> Result<UpdateStatus> {
        let found = self.tuits.update(tid, |tuit| {
            tuit.tuit = draft.tuit;
            tuit.image = draft.image;
            tuit.youtube = draft.youtube;
            tuit.avatar_logo = draft.avatar_logo;
            tuit.image_overlay = draft.image_overlay;
        })?;
        Ok(updated(found.is_some()))
    }

    pub fn update_stats(&self, tid: &TuitId, stats: Stats) -> Result<UpdateStatus> {
        let found = self.tuits.update(tid, |tuit| tuit.stats = stats)?;
        Ok(updated(found.is_some()))
    }

    pub fn delete_tuit(&self, tid: &TuitId) -> Result<DeleteStatus> {
        Ok(deleted(self.tuits.remove(tid)? as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::daos::UserDao;

    #[test]
    fn tuits_come_back_with_author_expanded() -> Result<()> {
        let store = Store::temporary()?;
        let users = UserDao::new(&store)?;
        let tuits = TuitDao::new(&store)?;
        let author = users.create_user(User {
            username: "alice".into(),
            password: "secret-hash".into(),
            ..Default::default()
        })?;

        let draft = TuitDraft {
            tuit: "hello".into(),
            ..Default::default()
        };
        let created = tuits.create_tuit(&author.id, draft)?;
        assert_eq!(created.stats, Stats::default());

        let found = tuits.find_tuit_by_id(&created.id)?.unwrap();
        let posted_by = found.posted_by.doc().unwrap();
        assert_eq!(posted_by.username, "alice");
        assert!(posted_by.password.is_empty());

        assert_eq!(tuits.find_tuits_by_user(&author.id)?.len(), 1);
        assert!(tuits.find_tuits_by_user(&UserId::from("nobody"))?.is_empty());
        Ok(())
    }

    #[test]
    fn stats_write_touches_nothing_else() -> Result<()> {
        let store = Store::temporary()?;
        let tuits = TuitDao::new(&store)?;
        let draft = TuitDraft {
            tuit: "counting".into(),
            ..Default::default()
        };
        let created = tuits.create_tuit(&UserId::from("u1"), draft)?;
        let stats = Stats {
            likes: 3,
            dislikes: 1,
            ..Default::default()
        };
        assert_eq!(tuits.update_stats(&created.id, stats)?.modified_count, 1);
        let stored = tuits.find_tuit_by_id(&created.id)?.unwrap();
        assert_eq!(stored.stats, stats);
        assert_eq!(stored.tuit, "counting");
        assert_eq!(tuits.update_stats(&TuitId::from("missing"), stats)?.matched_count, 0);
        Ok(())
    }
}
