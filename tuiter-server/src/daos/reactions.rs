//! Likes and dislikes share one shape: a (user, tuit) pair plus the stats
//! counter it feeds.

use anyhow::Result;
use tuiter_common::{DeleteStatus, Dislike, Expandable, Like, Stats, Tuit, TuitId, TuitLink, User, UserId, UserLink};

use super::deleted;
use crate::store::{Collection, Document, Store};

pub trait ReactionKind: Document {
    const NAME: &'static str;

    fn new(id: String, user: UserId, tuit: TuitId) -> Self;
    fn user(&self) -> &UserLink;
    fn tuit(&self) -> &TuitLink;
    fn user_mut(&mut self) -> &mut UserLink;
    fn tuit_mut(&mut self) -> &mut TuitLink;
    /// The counter on a tuit's stats that tracks this reaction.
    fn counter(stats: &mut Stats) -> &mut u64;

    fn is_pair(&self, uid: &UserId, tid: &TuitId) -> bool {
        self.user().id() == uid && self.tuit().id() == tid
    }
}

impl Document for Like {
    const COLLECTION: &'static str = "likes";
    fn key(&self) -> &str {
        &self.id
    }
}

impl ReactionKind for Like {
    const NAME: &'static str = "like";

    fn new(id: String, user: UserId, tuit: TuitId) -> Self {
        Like {
            id,
            tuit: Expandable::Id(tuit),
            liked_by: Expandable::Id(user),
        }
    }
    fn user(&self) -> &UserLink {
        &self.liked_by
    }
    fn tuit(&self) -> &TuitLink {
        &self.tuit
    }
    fn user_mut(&mut self) -> &mut UserLink {
        &mut self.liked_by
    }
    fn tuit_mut(&mut self) -> &mut TuitLink {
        &mut self.tuit
    }
    fn counter(stats: &mut Stats) -> &mut u64 {
        &mut stats.likes
    }
}

impl Document for Dislike {
    const COLLECTION: &'static str = "dislikes";
    fn key(&self) -> &str {
        &self.id
    }
}

impl ReactionKind for Dislike {
    const NAME: &'static str = "dislike";

    fn new(id: String, user: UserId, tuit: TuitId) -> Self {
        Dislike {
            id,
            tuit: Expandable::Id(tuit),
            disliked_by: Expandable::Id(user),
        }
    }
    fn user(&self) -> &UserLink {
        &self.disliked_by
    }
    fn tuit(&self) -> &TuitLink {
        &self.tuit
    }
    fn user_mut(&mut self) -> &mut UserLink {
        &mut self.disliked_by
    }
    fn tuit_mut(&mut self) -> &mut TuitLink {
        &mut self.tuit
    }
    fn counter(stats: &mut Stats) -> &mut u64 {
        &mut stats.dislikes
    }
}

pub type LikeDao = ReactionDao<Like>;
pub type DislikeDao = ReactionDao<Dislike>;

pub struct ReactionDao<R> {
    reactions: Collection<R>,
    tuits: Collection<Tuit>,
    users: Collection<User>,
}

impl<R> Clone for ReactionDao<R> {
    fn clone(&self) -> Self {
        Self {
            reactions: self.reactions.clone(),
            tuits: self.tuits.clone(),
            users: self.users.clone(),
        }
    }
}

impl<R: ReactionKind> ReactionDao<R> {
    pub fn new(store: &Store) -> Result<Self> {
        Ok(Self {
            reactions: store.collection()?,
            tuits: store.collection()?,
            users: store.collection()?,
        })
    }

    pub fn user_reacts(&self, uid: &UserId, tid: &TuitId) -> Result<R> {
        let reaction = R::new(self.reactions.next_id()?, uid.clone(), tid.clone());
        self.reactions.insert(&reaction)?;
        Ok(reaction)
    }

    pub fn user_unreacts(&self, uid: &UserId, tid: &TuitId) -> Result<DeleteStatus> {
        Ok(deleted(self.reactions.remove_one_where(|r| r.is_pair(uid, tid))?))
    }

    pub fn find_user_reaction(&self, uid: &UserId, tid: &TuitId) -> Result<Option<R>> {
        self.reactions.find_one(|r| r.is_pair(uid, tid))
    }

    pub fn count_for_tuit(&self, tid: &TuitId) -> Result<u64> {
        self.reactions.count(|r| r.tuit().id() == tid)
    }

    /// Reactions by `uid`, each with its tuit expanded.
    pub fn find_all_by_user(&self, uid: &UserId) -> Result<Vec<R>> {
        let mut found = self.reactions.find(|r| r.user().id() == uid)?;
        for reaction in &mut found {
            let link = reaction.tuit().clone();
            *reaction.tuit_mut() = self.tuits.populate(link)?;
        }
        Ok(found)
    }

    /// Reactions on `tid`, each with its user expanded.
    pub fn find_all_on_tuit(&self, tid: &TuitId) -> Result<Vec<R>> {
        let mut found = self.reactions.find(|r| r.tuit().id() == tid)?;
        for reaction in &mut found {
            let link = reaction.user().clone();
            *reaction.user_mut() = self.users.populate(link)?.map_doc(User::redacted);
        }
        Ok(found)
    }

    /// Tuits `uid` reacted to. Reactions pointing at deleted tuits are skipped.
    pub fn find_all_tuits_by_user(&self, uid: &UserId) -> Result<Vec<Tuit>> {
        Ok(self
            .find_all_by_user(uid)?
            .into_iter()
            .filter_map(|r| r.tuit().doc().cloned())
            .collect())
    }

    /// Users who reacted to `tid`. Reactions from deleted users are skipped.
    pub fn find_all_users_on_tuit(&self, tid: &TuitId) -> Result<Vec<User>> {
        Ok(self
            .find_all_on_tuit(tid)?
            .into_iter()
            .filter_map(|r| r.user().doc().cloned())
            .collect())
    }
}
