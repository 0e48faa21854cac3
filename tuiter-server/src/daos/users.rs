use anyhow::Result;
use chrono::Utc;
use tuiter_common::{DeleteStatus, UpdateStatus, User, UserId};

use super::{deleted, updated};
use crate::store::{Collection, Document, Store};

impl Document for User {
    const COLLECTION: &'static str = "users";
    fn key(&self) -> &str {
        self.id.as_str()
    }
}

#[derive(Clone)]
pub struct UserDao {
    users: Collection<User>,
}

impl UserDao {
    pub fn new(store: &Store) -> Result<Self> {
        Ok(Self {
            users: store.collection()?,
        })
    }

    pub fn find_all_users(&self) -> Result<Vec<User>> {
        self.users.all()
    }

    pub fn find_user_by_id(&self, uid: &UserId) -> Result<Option<User>> {
        self.users.get(uid)
    }

    pub fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.users.find_one(|user| user.username == username)
    }

    /// Stores a new user under a fresh id. The password must already be hashed.
    pub fn create_user(&self, mut user: User) -> Result<User> {
        user.id = UserId(self.users.next_id()?);
        user.joined_on.get_or_insert_with(Utc::now);
        self.users.insert(&user)?;
        Ok(user)
    }

    /// Applies the fields `patch` sets. Identity and join date never change;
    /// empty strings and absent optionals keep the stored value.
    pub fn update_user(&self, uid: &UserId, patch: User) -> Result<UpdateStatus> {
        let found = self.users.update(uid, |user| {
            let User {
                id: _,
                username,
                password,
                email,
                first_name,
                last_name,
                profile_photo,
                header_image,
                account_type,
                marital_status,
                biography,
                date_of_birth,
                joined_on: _,
                location,
            } = patch;
            if !username.is_empty() {
                user.username = username;
            }
            if !password.is_empty() {
                user.password = password;
            }
            if !email.is_empty() {
                user.email = email;
            }
            merge(&mut user.first_name, first_name);
            merge(&mut user.last_name, last_name);
            merge(&mut user.profile_photo, profile_photo);
            merge(&mut user.header_image, header_image);
            merge(&mut user.account_type, account_type);
            merge(&mut user.marital_status, marital_status);
            merge(&mut user.biography, biography);
            merge(&mut user.date_of_birth, date_of_birth);
            merge(&mut user.location, location);
        })?;
        Ok(updated(found.is_some()))
    }

    pub fn delete_user(&self, uid: &UserId) -> Result<DeleteStatus> {
        Ok(deleted(self.users.remove(uid)? as u64))
    }

    pub fn delete_all_users(&self) -> Result<DeleteStatus> {
        Ok(deleted(self.users.clear()?))
    }

    pub fn delete_users_by_username(&self, username: &str) -> Result<DeleteStatus> {
        Ok(deleted(self.users.remove_one_where(|user| user.username == username)?))
    }
}

fn merge<T>(stored: &mut Option<T>, patch: Option<T>) {
    if patch.is_some() {
        *stored = patch;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> User {
        User {
            username: "alice".into(),
            password: "hash".into(),
            email: "alice@tuiter.dev".into(),
            biography: Some("first".into()),
            ..Default::default()
        }
    }

    #[test]
    fn update_keeps_identity_and_credentials() -> Result<()> {
        let store = Store::temporary()?;
        let users = UserDao::new(&store)?;
        let created = users.create_user(alice())?;
        assert!(created.joined_on.is_some());

        let patch = User {
            biography: Some("second".into()),
            ..Default::default()
        };
        assert_eq!(users.update_user(&created.id, patch)?.modified_count, 1);

        let stored = users.find_user_by_id(&created.id)?.unwrap();
        assert_eq!(stored.id, created.id);
        assert_eq!(stored.username, "alice");
        assert_eq!(stored.password, "hash");
        assert_eq!(stored.biography.as_deref(), Some("second"));
        assert_eq!(stored.joined_on, created.joined_on);
        Ok(())
    }

    #[test]
    fn partial_update_keeps_unset_profile_fields() -> Result<()> {
        let store = Store::temporary()?;
        let users = UserDao::new(&store)?;
        let created = users.create_user(User {
            first_name: Some("Dave".into()),
            ..alice()
        })?;

        let patch = User {
            email: "dave@new.test".into(),
            ..Default::default()
        };
        users.update_user(&created.id, patch)?;

        let stored = users.find_user_by_id(&created.id)?.unwrap();
        assert_eq!(stored.email, "dave@new.test");
        assert_eq!(stored.biography.as_deref(), Some("first"));
        assert_eq!(stored.first_name.as_deref(), Some("Dave"));
        Ok(())
    }

    #[test]
    fn delete_by_username() -> Result<()> {
        let store = Store::temporary()?;
        let users = UserDao::new(&store)?;
        users.create_user(alice())?;
        assert!(users.find_user_by_username("alice")?.is_some());
        assert_eq!(users.delete_users_by_username("alice")?.deleted_count, 1);
        assert_eq!(users.delete_users_by_username("alice")?.deleted_count, 0);
        assert!(users.find_all_users()?.is_empty());
        Ok(())
    }
}
