pub mod models;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use models::*;

#[derive(Eq, PartialEq, Ord, PartialOrd, Hash, Clone, Debug, Serialize, Deserialize, Default)]
pub struct Url(pub String);

impl Url {
    pub fn join(&self, path: impl AsRef<str>) -> String {
        let base = self.0.trim_end_matches('/');
        let path = path.as_ref();
        if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    }
}

macro_rules! id_type {
    ($($name:ident),* $(,)?) => {$(
        #[derive(Eq, PartialEq, Ord, PartialOrd, Hash, Clone, Debug, Serialize, Deserialize, Default)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    )*};
}

id_type!(UserId, TuitId, BoardId, MessageId);

/// A document that carries its own primary key.
pub trait Identified {
    type Id;
    fn id(&self) -> &Self::Id;
}

/// A reference to another document. Stored as the bare id, and replaced by
/// the whole document when a read asks for it to be expanded.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Expandable<I, T> {
    Id(I),
    Doc(Box<T>),
}

impl<I, T> Expandable<I, T>
where
    T: Identified<Id = I>,
{
    pub fn id(&self) -> &I {
        match self {
            Expandable::Id(id) => id,
            Expandable::Doc(doc) => doc.id(),
        }
    }

    pub fn doc(&self) -> Option<&T> {
        match self {
            Expandable::Id(_) => None,
            Expandable::Doc(doc) => Some(doc),
        }
    }

    pub fn into_doc(self) -> Option<T> {
        match self {
            Expandable::Id(_) => None,
            Expandable::Doc(doc) => Some(*doc),
        }
    }

    /// Drops an embedded document back down to its id.
    pub fn collapse(self) -> Self
    where
        I: Clone,
    {
        match self {
            Expandable::Doc(doc) => Expandable::Id(doc.id().clone()),
            id => id,
        }
    }
}

impl<I, T> Expandable<I, T> {
    pub fn map_doc(self, func: impl FnOnce(T) -> T) -> Self {
        match self {
            Expandable::Doc(doc) => Expandable::Doc(Box::new(func(*doc))),
            id => id,
        }
    }
}

impl<I, T> From<I> for Expandable<I, T> {
    fn from(id: I) -> Self {
        Expandable::Id(id)
    }
}

pub const ME: &str = "me";
pub const MY: &str = "my";

/// The user named by a path segment: either the caller's own session
/// (`me`, or `my` on tuit routes) or an explicit id.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum UserRef {
    Me,
    Id(UserId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyUserRef;

impl fmt::Display for EmptyUserRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("user reference must not be empty")
    }
}

impl std::error::Error for EmptyUserRef {}

impl FromStr for UserRef {
    type Err = EmptyUserRef;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Err(EmptyUserRef),
            ME | MY => Ok(UserRef::Me),
            id => Ok(UserRef::Id(UserId(id.to_string()))),
        }
    }
}

impl TryFrom<String> for UserRef {
    type Error = EmptyUserRef;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<UserRef> for String {
    fn from(value: UserRef) -> Self {
        value.to_string()
    }
}

impl From<UserId> for UserRef {
    fn from(value: UserId) -> Self {
        UserRef::Id(value)
    }
}

impl From<&UserId> for UserRef {
    fn from(value: &UserId) -> Self {
        UserRef::Id(value.clone())
    }
}

impl fmt::Display for UserRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRef::Me => f.write_str(ME),
            UserRef::Id(id) => f.write_str(id.as_str()),
        }
    }
}
