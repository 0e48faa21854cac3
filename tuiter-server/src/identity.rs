use tuiter_common::{User, UserId, UserRef};

use crate::error::AppError;

/// Turns a path-supplied user into a concrete id. `me` needs a logged-in
/// profile; without one the caller gets 503.
pub fn resolve(user: &UserRef, profile: Option<&User>) -> Result<UserId, AppError> {
    match (user, profile) {
        (UserRef::Id(id), _) => Ok(id.clone()),
        (UserRef::Me, Some(profile)) => Ok(profile.id.clone()),
        (UserRef::Me, None) => Err(AppError::Unavailable("no session bound to `me`")),
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;

    #[test]
    fn me_resolves_through_profile() {
        let profile = User {
            id: UserId::from("42"),
            username: "alice".into(),
            ..Default::default()
        };
        assert_eq!(resolve(&UserRef::Me, Some(&profile)).unwrap(), UserId::from("42"));
    }

    #[test]
    fn me_without_session_is_unavailable() {
        let err = resolve(&UserRef::Me, None).unwrap_err();
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn explicit_ids_pass_through() {
        let explicit = UserRef::Id(UserId::from("7"));
        assert_eq!(resolve(&explicit, None).unwrap(), UserId::from("7"));
    }
}
