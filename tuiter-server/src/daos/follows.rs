use anyhow::Result;
use chrono::Utc;
use tuiter_common::{DeleteStatus, Expandable, Follow, User, UserId};

use super::deleted;
use crate::store::{Collection, Document, Store};

impl Document for Follow {
    const COLLECTION: &'static str = "follows";
    fn key(&self) -> &str {
        &self.id
    }
}

#[derive(Clone)]
pub struct FollowDao {
    follows: Collection<Follow>,
    users: Collection<User>,
}

impl FollowDao {
    pub fn new(store: &Store) -> Result<Self> {
        Ok(Self {
            follows: store.collection()?,
            users: store.collection()?,
        })
    }

    /// `uid` starts following `other`.
    pub fn user_follows_another_user(&self, uid: &UserId, other: &UserId) -> Result<Follow> {
        let follow = Follow {
            id: self.follows.next_id()?,
            user_following: Expandable::Id(uid.clone()),
            user_followed: Expandable::Id(other.clone()),
            followed_on: Utc::now(),
        };
        self.follows.insert(&follow)?;
        Ok(follow)
    }

    pub fn user_unfollows_another_user(&self, uid: &UserId, other: &UserId) -> Result<DeleteStatus> {
        let removed = self.follows.remove_one_where(|follow| {
            follow.user_following.id() == uid && follow.user_followed.id() == other
        })?;
        Ok(deleted(removed))
    }

    /// Follows pointing at `uid`, with the follower expanded.
    pub fn find_all_followers(&self, uid: &UserId) -> Result<Vec<Follow>> {
        let mut follows = self.follows.find(|follow| follow.user_followed.id() == uid)?;
        for follow in &mut follows {
            let link = follow.user_following.clone();
            follow.user_following = self.users.populate(link)?.map_doc(User::redacted);
        }
        Ok(follows)
    }

    /// Follows made by `uid`, with the followed user expanded.
    pub fn find_all_following(&self, uid: &UserId) -> Result<Vec<Follow>> {
        let mut follows = self.follows.find(|follow| follow.user_following.id() == uid)?;
        for follow in &mut follows {
            let link = follow.user_followed.clone();
            follow.user_followed = self.users.populate(link)?.map_doc(User::redacted);
        }
        Ok(follows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn followers_and_following_are_mirror_images() -> Result<()> {
        let store = Store::temporary()?;
        let follows = FollowDao::new(&store)?;
        let (alice, bob, carol) = (UserId::from("alice"), UserId::from("bob"), UserId::from("carol"));

        follows.user_follows_another_user(&alice, &bob)?;
        follows.user_follows_another_user(&carol, &bob)?;
        follows.user_follows_another_user(&bob, &alice)?;

        let followers: Vec<_> = follows
            .find_all_followers(&bob)?
            .into_iter()
            .map(|f| f.user_following.id().clone())
            .collect();
        assert_eq!(followers, [alice.clone(), carol.clone()]);
        assert_eq!(follows.find_all_following(&bob)?.len(), 1);

        assert_eq!(follows.user_unfollows_another_user(&alice, &bob)?.deleted_count, 1);
        assert_eq!(follows.find_all_followers(&bob)?.len(), 1);
        assert_eq!(follows.user_unfollows_another_user(&alice, &bob)?.deleted_count, 0);
        Ok(())
    }
}
