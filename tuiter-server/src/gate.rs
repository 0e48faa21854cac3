use anyhow::Result;
use tracing::info;
use tuiter_common::{PrivilegeFlag, UserId};

use crate::config::MissingPrivilege;
use crate::daos::PrivilegeDao;
use crate::error::AppError;

/// Something a user may be barred from doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SignIn,
    CreateTuit,
    Like,
}

impl Action {
    pub fn flag(self) -> PrivilegeFlag {
        match self {
            Action::SignIn => PrivilegeFlag::AllowSignIn,
            Action::CreateTuit => PrivilegeFlag::AllowTuits,
            Action::Like => PrivilegeFlag::AllowLikes,
        }
    }

    /// Sign-in denials look like bad credentials; the rest are 503.
    fn denied(self) -> AppError {
        match self {
            Action::SignIn => AppError::Forbidden("sign-in not allowed"),
            Action::CreateTuit => AppError::Unavailable("tuiting not allowed"),
            Action::Like => AppError::Unavailable("reacting not allowed"),
        }
    }
}

#[derive(Clone)]
pub struct PrivilegeGate {
    privileges: PrivilegeDao,
    missing: MissingPrivilege,
}

impl PrivilegeGate {
    pub fn new(privileges: PrivilegeDao, missing: MissingPrivilege) -> Self {
        Self { privileges, missing }
    }

    pub fn permits(&self, uid: &UserId, action: Action) -> Result<bool> {
        Ok(match self.privileges.get_privileges_user(uid)? {
            Some(privilege) => privilege.get(action.flag()),
            None => self.missing == MissingPrivilege::Allow,
        })
    }

    pub fn check(&self, uid: &UserId, action: Action) -> Result<(), AppError> {
        if self.permits(uid, action)? {
            Ok(())
        } else {
            info!(user = %uid, ?action, "privilege gate denied action");
            Err(action.denied())
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;
    use crate::store::Store;

    fn gate(store: &Store, missing: MissingPrivilege) -> (PrivilegeDao, PrivilegeGate) {
        let privileges = PrivilegeDao::new(store).unwrap();
        (privileges.clone(), PrivilegeGate::new(privileges, missing))
    }

    #[test]
    fn flags_gate_their_own_action() -> Result<()> {
        let store = Store::temporary()?;
        let (privileges, gate) = gate(&store, MissingPrivilege::Deny);
        let uid = UserId::from("u1");
        privileges.create_privilege(&uid)?;
        privileges.set_privilege(&uid, PrivilegeFlag::AllowLikes, false)?;

        assert!(gate.check(&uid, Action::SignIn).is_ok());
        assert!(gate.check(&uid, Action::CreateTuit).is_ok());
        let denied = gate.check(&uid, Action::Like).unwrap_err();
        assert_eq!(denied.status(), StatusCode::SERVICE_UNAVAILABLE);
        Ok(())
    }

    #[test]
    fn sign_in_denial_is_forbidden() -> Result<()> {
        let store = Store::temporary()?;
        let (privileges, gate) = gate(&store, MissingPrivilege::Allow);
        let uid = UserId::from("u1");
        privileges.set_privilege(&uid, PrivilegeFlag::AllowSignIn, false)?;
        let denied = gate.check(&uid, Action::SignIn).unwrap_err();
        assert_eq!(denied.status(), StatusCode::FORBIDDEN);
        Ok(())
    }

    #[test]
    fn missing_record_follows_policy() -> Result<()> {
        let store = Store::temporary()?;
        let uid = UserId::from("ghost");
        let (_, permissive) = gate(&store, MissingPrivilege::Allow);
        let (_, restrictive) = gate(&store, MissingPrivilege::Deny);
        assert!(permissive.permits(&uid, Action::Like)?);
        assert!(!restrictive.permits(&uid, Action::Like)?);
        Ok(())
    }
}
