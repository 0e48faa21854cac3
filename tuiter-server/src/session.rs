//! Server-side sessions. The browser only ever holds an opaque id in a
//! cookie; the profile it maps to lives here until logout.

use std::sync::Arc;

use anyhow::anyhow;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::headers::{Cookie, HeaderMapExt};
use axum::http::request::Parts;
use dashmap::DashMap;
use tuiter_common::{User, UserId, UserRef};
use uuid::Uuid;

use crate::error::AppError;
use crate::identity;
use crate::State;

#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<DashMap<String, User>>,
    cookie_name: Arc<str>,
    secure: bool,
}

impl SessionStore {
    pub fn new(cookie_name: impl Into<String>, secure: bool) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            cookie_name: Arc::from(cookie_name.into()),
            secure,
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Binds `profile` to a fresh session id, dropping `previous` if the
    /// client already had one.
    pub fn bind(&self, previous: Option<&str>, profile: User) -> String {
        if let Some(previous) = previous {
            self.sessions.remove(previous);
        }
        let sid = Uuid::new_v4().simple().to_string();
        self.sessions.insert(sid.clone(), profile.redacted());
        sid
    }

    pub fn profile(&self, sid: &str) -> Option<User> {
        self.sessions.get(sid).map(|entry| entry.value().clone())
    }

    pub fn destroy(&self, sid: &str) -> bool {
        self.sessions.remove(sid).is_some()
    }

    /// Ends every session bound to `uid`. Returns how many there were.
    pub fn destroy_user(&self, uid: &UserId) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, profile| &profile.id != uid);
        before - self.sessions.len()
    }

    pub fn clear(&self) {
        self.sessions.clear();
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn set_cookie(&self, sid: &str) -> String {
        let secure = if self.secure { "; Secure" } else { "" };
        format!("{}={sid}; Path=/; HttpOnly; SameSite=Lax{secure}", self.cookie_name)
    }

    pub fn clear_cookie(&self) -> String {
        format!("{}=; Path=/; HttpOnly; Max-Age=0", self.cookie_name)
    }
}

/// The caller's session as seen by a handler: the cookie's id, and the
/// profile bound to it if the id is live.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub id: Option<String>,
    pub profile: Option<User>,
}

impl Session {
    pub fn resolve(&self, user: &UserRef) -> Result<UserId, AppError> {
        identity::resolve(user, self.profile.as_ref())
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let sessions = parts
            .extensions
            .get::<State>()
            .map(|state| state.sessions.clone())
            .ok_or_else(|| anyhow!("State extension missing, is the router layered?"))?;
        let id = parts
            .headers
            .typed_get::<Cookie>()
            .and_then(|cookie| cookie.get(sessions.cookie_name()).map(str::to_string));
        let profile = id.as_deref().and_then(|sid| sessions.profile(sid));
        Ok(Session { id, profile })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> User {
        User {
            id: UserId::from("a1"),
            username: "alice".into(),
            password: "$argon2id$hash".into(),
            ..Default::default()
        }
    }

    #[test]
    fn bound_profiles_are_redacted() {
        let sessions = SessionStore::new("tuiter.sid", false);
        let sid = sessions.bind(None, alice());
        let profile = sessions.profile(&sid).unwrap();
        assert_eq!(profile.username, "alice");
        assert!(profile.password.is_empty());
    }

    #[test]
    fn rebinding_drops_the_old_session() {
        let sessions = SessionStore::new("tuiter.sid", false);
        let first = sessions.bind(None, alice());
        let second = sessions.bind(Some(&first), alice());
        assert_ne!(first, second);
        assert!(sessions.profile(&first).is_none());
        assert_eq!(sessions.len(), 1);
        assert!(sessions.destroy(&second));
        assert!(sessions.is_empty());
    }

    #[test]
    fn destroying_a_user_ends_all_their_sessions() {
        let sessions = SessionStore::new("tuiter.sid", false);
        let first = sessions.bind(None, alice());
        let second = sessions.bind(None, alice());
        let bob = User {
            id: UserId::from("b1"),
            ..alice()
        };
        let other = sessions.bind(None, bob);

        assert_eq!(sessions.destroy_user(&UserId::from("a1")), 2);
        assert!(sessions.profile(&first).is_none());
        assert!(sessions.profile(&second).is_none());
        assert!(sessions.profile(&other).is_some());
    }

    #[test]
    fn cookies_carry_name_and_flags() {
        let sessions = SessionStore::new("sid", true);
        assert_eq!(sessions.set_cookie("abc"), "sid=abc; Path=/; HttpOnly; SameSite=Lax; Secure");
        assert!(sessions.clear_cookie().contains("Max-Age=0"));
    }
}
