//! Like/dislike toggling. A user holds at most one of the two reactions on a
//! tuit, and the tuit's `stats` mirror the reaction counts.
//!
//! Every step is its own round trip to the store: the reaction lookups,
//! the counts, the tuit read and the final stats write. Two users toggling
//! the same tuit at once can leave the counters off by one; nothing here
//! serialises them.

use anyhow::{bail, Context, Result};
use tracing::{debug, warn};
use tuiter_common::{Stats, TuitId, UserId};

use crate::daos::{DislikeDao, LikeDao, ReactionDao, ReactionKind, TuitDao};
use crate::error::AppError;
use crate::gate::{Action, PrivilegeGate};

#[derive(Clone)]
pub struct ReactionToggles {
    likes: LikeDao,
    dislikes: DislikeDao,
    tuits: TuitDao,
    gate: PrivilegeGate,
}

impl ReactionToggles {
    pub fn new(likes: LikeDao, dislikes: DislikeDao, tuits: TuitDao, gate: PrivilegeGate) -> Self {
        Self {
            likes,
            dislikes,
            tuits,
            gate,
        }
    }

    pub fn toggle_like(&self, uid: &UserId, tid: &TuitId) -> Result<Stats, AppError> {
        self.gate.check(uid, Action::Like)?;
        toggle(&self.likes, &self.dislikes, &self.tuits, uid, tid).map_err(not_found)
    }

    pub fn toggle_dislike(&self, uid: &UserId, tid: &TuitId) -> Result<Stats, AppError> {
        self.gate.check(uid, Action::Like)?;
        toggle(&self.dislikes, &self.likes, &self.tuits, uid, tid).map_err(not_found)
    }
}

fn not_found(err: anyhow::Error) -> AppError {
    warn!("reaction toggle failed: {err:#}");
    AppError::NotFound
}

/// Flips `uid`'s `primary` reaction on `tid`. Adding it also withdraws an
/// `opposite` reaction if there was one.
fn toggle<P, O>(
    primary: &ReactionDao<P>,
    opposite: &ReactionDao<O>,
    tuits: &TuitDao,
    uid: &UserId,
    tid: &TuitId,
) -> Result<Stats>
where
    P: ReactionKind,
    O: ReactionKind,
{
    let already = primary.find_user_reaction(uid, tid)?.is_some();
    let opposed = opposite.find_user_reaction(uid, tid)?.is_some();
    let primary_count = primary.count_for_tuit(tid)?;
    let opposite_count = opposite.count_for_tuit(tid)?;

    let mut stats = tuits
        .find_tuit_by_id(tid)?
        .with_context(|| format!("tuit {tid} not found"))?
        .stats;

    if already {
        primary.user_unreacts(uid, tid)?;
        *P::counter(&mut stats) = primary_count.saturating_sub(1);
    } else {
        primary.user_reacts(uid, tid)?;
        *P::counter(&mut stats) = primary_count + 1;
        if opposed {
            opposite.user_unreacts(uid, tid)?;
            *O::counter(&mut stats) = opposite_count.saturating_sub(1);
        }
    }

    write_stats(tuits, tid, stats)?;
    debug!(user = %uid, tuit = %tid, reaction = P::NAME, added = !already, "toggled");
    Ok(stats)
}

/// The tuit can disappear between the read and this write; that counts as
/// a failed toggle.
fn write_stats(tuits: &TuitDao, tid: &TuitId, stats: Stats) -> Result<()> {
    if tuits.update_stats(tid, stats)?.matched_count == 0 {
        bail!("tuit {tid} was deleted during the toggle");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use tuiter_common::{PrivilegeFlag, TuitDraft};

    use super::*;
    use crate::config::MissingPrivilege;
    use crate::daos::PrivilegeDao;
    use crate::store::Store;

    struct Fixture {
        toggles: ReactionToggles,
        likes: LikeDao,
        dislikes: DislikeDao,
        tuits: TuitDao,
        privileges: PrivilegeDao,
        tid: TuitId,
    }

    fn fixture(store: &Store) -> Result<Fixture> {
        let likes = LikeDao::new(store)?;
        let dislikes = DislikeDao::new(store)?;
        let tuits = TuitDao::new(store)?;
        let privileges = PrivilegeDao::new(store)?;
        let gate = PrivilegeGate::new(privileges.clone(), MissingPrivilege::Allow);
        let tid = tuits
            .create_tuit(&UserId::from("author"), TuitDraft { tuit: "x".into(), ..Default::default() })?
            .id;
        Ok(Fixture {
            toggles: ReactionToggles::new(likes.clone(), dislikes.clone(), tuits.clone(), gate),
            likes,
            dislikes,
            tuits,
            privileges,
            tid,
        })
    }

    fn stats(f: &Fixture) -> Stats {
        f.tuits.find_tuit_by_id(&f.tid).unwrap().unwrap().stats
    }

    #[test]
    fn like_then_dislike_then_dislike() -> Result<()> {
        let store = Store::temporary()?;
        let f = fixture(&store)?;
        let a = UserId::from("userA");

        f.toggles.toggle_like(&a, &f.tid)?;
        assert_eq!((stats(&f).likes, stats(&f).dislikes), (1, 0));
        assert!(f.likes.find_user_reaction(&a, &f.tid)?.is_some());

        f.toggles.toggle_dislike(&a, &f.tid)?;
        assert_eq!((stats(&f).likes, stats(&f).dislikes), (0, 1));
        assert!(f.likes.find_user_reaction(&a, &f.tid)?.is_none());
        assert!(f.dislikes.find_user_reaction(&a, &f.tid)?.is_some());

        f.toggles.toggle_dislike(&a, &f.tid)?;
        assert_eq!((stats(&f).likes, stats(&f).dislikes), (0, 0));
        assert!(f.dislikes.find_user_reaction(&a, &f.tid)?.is_none());
        Ok(())
    }

    #[test]
    fn parity_of_toggles_decides_the_outcome() -> Result<()> {
        let store = Store::temporary()?;
        let f = fixture(&store)?;
        let others = [UserId::from("b"), UserId::from("c")];
        for other in &others {
            f.toggles.toggle_like(other, &f.tid)?;
        }
        let baseline = stats(&f).likes;
        let a = UserId::from("a");

        for round in 1..=5 {
            f.toggles.toggle_like(&a, &f.tid)?;
            let liked = f.likes.find_user_reaction(&a, &f.tid)?.is_some();
            assert_eq!(liked, round % 2 == 1);
            assert_eq!(stats(&f).likes, baseline + liked as u64);
        }
        Ok(())
    }

    #[test]
    fn liking_withdraws_a_dislike() -> Result<()> {
        let store = Store::temporary()?;
        let f = fixture(&store)?;
        let a = UserId::from("a");
        f.toggles.toggle_dislike(&UserId::from("b"), &f.tid)?;
        f.toggles.toggle_dislike(&a, &f.tid)?;
        assert_eq!(stats(&f).dislikes, 2);

        let after = f.toggles.toggle_like(&a, &f.tid)?;
        assert_eq!(after.likes, 1);
        assert_eq!(after.dislikes, 1);
        assert!(f.dislikes.find_user_reaction(&a, &f.tid)?.is_none());
        Ok(())
    }

    #[test]
    fn denied_user_changes_nothing() -> Result<()> {
        let store = Store::temporary()?;
        let f = fixture(&store)?;
        let a = UserId::from("a");
        f.privileges.set_privilege(&a, PrivilegeFlag::AllowLikes, false)?;

        let err = f.toggles.toggle_like(&a, &f.tid).unwrap_err();
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
        let err = f.toggles.toggle_dislike(&a, &f.tid).unwrap_err();
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(stats(&f), Stats::default());
        assert_eq!(f.likes.count_for_tuit(&f.tid)?, 0);
        Ok(())
    }

    #[test]
    fn unknown_tuit_is_not_found_and_writes_nothing() -> Result<()> {
        let store = Store::temporary()?;
        let f = fixture(&store)?;
        let missing = TuitId::from("missing");
        let err = f.toggles.toggle_like(&UserId::from("a"), &missing).unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(f.likes.count_for_tuit(&missing)?, 0);
        Ok(())
    }

    #[test]
    fn stats_write_fails_once_the_tuit_is_gone() -> Result<()> {
        let store = Store::temporary()?;
        let f = fixture(&store)?;
        let stats = Stats {
            likes: 1,
            ..Stats::default()
        };
        write_stats(&f.tuits, &f.tid, stats)?;
        assert_eq!(self::stats(&f).likes, 1);

        f.tuits.delete_tuit(&f.tid)?;
        assert!(write_stats(&f.tuits, &f.tid, stats).is_err());
        assert!(f.tuits.find_tuit_by_id(&f.tid)?.is_none());
        Ok(())
    }
}
