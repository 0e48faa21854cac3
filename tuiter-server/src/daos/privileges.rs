use anyhow::Result;
use tuiter_common::{Privilege, PrivilegeFlag, UpdateStatus, User, UserId};

use crate::store::{Collection, Document, Store};

impl Document for Privilege {
    const COLLECTION: &'static str = "privilege";
    fn key(&self) -> &str {
        &self.id
    }
}

#[derive(Clone)]
pub struct PrivilegeDao {
    privileges: Collection<Privilege>,
    users: Collection<User>,
}

impl PrivilegeDao {
    pub fn new(store: &Store) -> Result<Self> {
        Ok(Self {
            privileges: store.collection()?,
            users: store.collection()?,
        })
    }

    /// Provisions the all-allowed record for `uid`.
    pub fn create_privilege(&self, uid: &UserId) -> Result<Privilege> {
        let privilege = Privilege::new(self.privileges.next_id()?, uid.clone());
        self.privileges.insert(&privilege)?;
        Ok(privilege)
    }

    pub fn get_privileges(&self) -> Result<Vec<Privilege>> {
        let mut privileges = self.privileges.all()?;
        for privilege in &mut privileges {
            let link = privilege.user.clone();
            privilege.user = self.users.populate(link)?.map_doc(User::redacted);
        }
        Ok(privileges)
    }

    pub fn get_privileges_user(&self, uid: &UserId) -> Result<Option<Privilege>> {
        self.privileges.find_one(|p| p.user.id() == uid)
    }

    /// Sets one flag, provisioning the record first if the user has none.
    pub fn set_privilege(&self, uid: &UserId, flag: PrivilegeFlag, value: bool) -> Result<UpdateStatus> {
        let mut privilege = match self.get_privileges_user(uid)? {
            Some(privilege) => privilege,
            None => self.create_privilege(uid)?,
        };
        let modified = privilege.get(flag) != value;
        privilege.set(flag, value);
        self.privileges.insert(&privilege)?;
        Ok(UpdateStatus {
            matched_count: 1,
            modified_count: modified as u64,
        })
    }

    pub fn delete_privileges_user(&self, uid: &UserId) -> Result<u64> {
        self.privileges.remove_where(|p| p.user.id() == uid)
    }

    pub fn delete_all_privileges(&self) -> Result<u64> {
        self.privileges.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_privilege_upserts() -> Result<()> {
        let store = Store::temporary()?;
        let privileges = PrivilegeDao::new(&store)?;
        let uid = UserId::from("u1");
        assert!(privileges.get_privileges_user(&uid)?.is_none());

        let status = privileges.set_privilege(&uid, PrivilegeFlag::AllowLikes, false)?;
        assert_eq!(status.modified_count, 1);
        let stored = privileges.get_privileges_user(&uid)?.unwrap();
        assert!(!stored.allow_likes);
        assert!(stored.allow_tuits && stored.allow_sign_in);

        let again = privileges.set_privilege(&uid, PrivilegeFlag::AllowLikes, false)?;
        assert_eq!(again.modified_count, 0);
        assert_eq!(privileges.get_privileges()?.len(), 1);
        Ok(())
    }

    #[test]
    fn delete_all_privileges_empties_the_collection() -> Result<()> {
        let store = Store::temporary()?;
        let privileges = PrivilegeDao::new(&store)?;
        privileges.create_privilege(&UserId::from("u1"))?;
        privileges.create_privilege(&UserId::from("u2"))?;
        assert_eq!(privileges.delete_all_privileges()?, 2);
        assert!(privileges.get_privileges()?.is_empty());
        Ok(())
    }
}
