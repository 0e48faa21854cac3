use std::marker::PhantomData;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sled::{Db, Tree};
use tuiter_common::{Expandable, Identified};

/// A record kept as a JSON document in its own sled tree.
pub trait Document: Serialize + DeserializeOwned {
    const COLLECTION: &'static str;
    fn key(&self) -> &str;
}

#[derive(Clone)]
pub struct Store {
    db: Db,
}

impl Store {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let db = sled::open(path).with_context(|| format!("Error opening database at {}", path.display()))?;
        Ok(Self { db })
    }

    /// A database that lives only as long as this handle.
    pub fn temporary() -> Result<Self> {
        let db = sled::Config::new()
            .temporary(true)
            .open()
            .context("Error opening temporary database")?;
        Ok(Self { db })
    }

    pub fn collection<T: Document>(&self) -> Result<Collection<T>> {
        let tree = self
            .db
            .open_tree(T::COLLECTION)
            .with_context(|| format!("Error opening collection {}", T::COLLECTION))?;
        Ok(Collection {
            tree,
            db: self.db.clone(),
            _doc: PhantomData,
        })
    }

    pub async fn flush(&self) -> Result<()> {
        self.db.flush_async().await?;
        Ok(())
    }
}

pub struct Collection<T> {
    tree: Tree,
    db: Db,
    _doc: PhantomData<fn() -> T>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
            db: self.db.clone(),
            _doc: PhantomData,
        }
    }
}

impl<T: Document> Collection<T> {
    /// Ids are sled's monotonic counter in fixed-width hex, so a scan
    /// returns documents in insertion order.
    pub fn next_id(&self) -> Result<String> {
        Ok(format!("{:016x}", self.db.generate_id()?))
    }

    pub fn get(&self, key: impl AsRef<str>) -> Result<Option<T>> {
        let key = key.as_ref();
        self.tree
            .get(key)?
            .map(|bytes| decode::<T>(&bytes))
            .transpose()
            .with_context(|| format!("Error reading {}/{key}", T::COLLECTION))
    }

    pub fn insert(&self, doc: &T) -> Result<()> {
        self.tree.insert(doc.key(), serde_json::to_vec(doc)?)?;
        Ok(())
    }

    /// Read, mutate and write back one document. Returns `None` when the key
    /// does not exist.
    pub fn update(&self, key: impl AsRef<str>, func: impl FnOnce(&mut T)) -> Result<Option<T>> {
        self.try_update(key, |doc| {
            func(doc);
            Ok(())
        })
    }

    pub fn try_update(
        &self,
        key: impl AsRef<str>,
        func: impl FnOnce(&mut T) -> Result<()>,
    ) -> Result<Option<T>> {
        let key = key.as_ref();
        let Some(mut doc) = self.get(key)? else {
            return Ok(None);
        };
        func(&mut doc)?;
        self.tree.insert(key, serde_json::to_vec(&doc)?)?;
        Ok(Some(doc))
    }

    pub fn remove(&self, key: impl AsRef<str>) -> Result<bool> {
        Ok(self.tree.remove(key.as_ref())?.is_some())
    }

    pub fn iter(&self) -> impl Iterator<Item = Result<T>> + '_ {
        self.tree.iter().values().map(|value| {
            let bytes = value?;
            decode::<T>(&bytes).with_context(|| format!("Error reading {}", T::COLLECTION))
        })
    }

    pub fn all(&self) -> Result<Vec<T>> {
        self.iter().collect()
    }

    pub fn find(&self, pred: impl Fn(&T) -> bool) -> Result<Vec<T>> {
        let mut found = Vec::new();
        for doc in self.iter() {
            let doc = doc?;
            if pred(&doc) {
                found.push(doc);
            }
        }
        Ok(found)
    }

    pub fn find_one(&self, pred: impl Fn(&T) -> bool) -> Result<Option<T>> {
        for doc in self.iter() {
            let doc = doc?;
            if pred(&doc) {
                return Ok(Some(doc));
            }
        }
        Ok(None)
    }

    pub fn count(&self, pred: impl Fn(&T) -> bool) -> Result<u64> {
        let mut count = 0;
        for doc in self.iter() {
            if pred(&doc?) {
                count += 1;
            }
        }
        Ok(count)
    }

    /// Removes the first match only.
    pub fn remove_one_where(&self, pred: impl Fn(&T) -> bool) -> Result<u64> {
        match self.find_one(pred)? {
            Some(doc) => Ok(self.remove(doc.key())? as u64),
            None => Ok(0),
        }
    }

    pub fn remove_where(&self, pred: impl Fn(&T) -> bool) -> Result<u64> {
        let mut removed = 0;
        for doc in self.find(pred)? {
            if self.remove(doc.key())? {
                removed += 1;
            }
        }
        Ok(removed)
    }

    pub fn clear(&self) -> Result<u64> {
        let len = self.tree.len() as u64;
        self.tree.clear()?;
        Ok(len)
    }
}

impl<T> Collection<T>
where
    T: Document + Identified,
    T::Id: AsRef<str>,
{
    /// Swaps an id reference for the document it points at. A dangling id is
    /// left as it is.
    pub fn populate(&self, link: Expandable<T::Id, T>) -> Result<Expandable<T::Id, T>> {
        match link {
            Expandable::Id(id) => Ok(match self.get(&id)? {
                Some(doc) => Expandable::Doc(Box::new(doc)),
                None => Expandable::Id(id),
            }),
            doc => Ok(doc),
        }
    }
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    Ok(serde_json::from_slice(bytes)?)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        id: String,
        body: String,
    }

    impl Document for Note {
        const COLLECTION: &'static str = "notes";
        fn key(&self) -> &str {
            &self.id
        }
    }

    fn note(notes: &Collection<Note>, body: &str) -> Note {
        let note = Note {
            id: notes.next_id().unwrap(),
            body: body.to_string(),
        };
        notes.insert(&note).unwrap();
        note
    }

    #[test]
    fn scans_in_insertion_order() -> Result<()> {
        let store = Store::temporary()?;
        let notes = store.collection::<Note>()?;
        for body in ["a", "b", "c", "d"] {
            note(&notes, body);
        }
        let bodies: Vec<_> = notes.all()?.into_iter().map(|n| n.body).collect();
        assert_eq!(bodies, ["a", "b", "c", "d"]);
        Ok(())
    }

    #[test]
    fn update_missing_key_is_none() -> Result<()> {
        let store = Store::temporary()?;
        let notes = store.collection::<Note>()?;
        assert!(notes.update("nope", |n| n.body.clear())?.is_none());

        let saved = note(&notes, "draft");
        let updated = notes.update(&saved.id, |n| n.body = "final".into())?;
        assert_eq!(updated.map(|n| n.body), Some("final".to_string()));
        assert_eq!(notes.get(&saved.id)?.map(|n| n.body), Some("final".to_string()));
        Ok(())
    }

    #[test]
    fn remove_one_where_leaves_other_matches() -> Result<()> {
        let store = Store::temporary()?;
        let notes = store.collection::<Note>()?;
        note(&notes, "dup");
        note(&notes, "dup");
        note(&notes, "other");

        assert_eq!(notes.remove_one_where(|n| n.body == "dup")?, 1);
        assert_eq!(notes.count(|n| n.body == "dup")?, 1);
        assert_eq!(notes.remove_where(|_| true)?, 2);
        assert!(notes.all()?.is_empty());
        Ok(())
    }
}
