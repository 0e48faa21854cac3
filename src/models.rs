use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{BoardId, Expandable, Identified, MessageId, TuitId, UserId, UserRef};

pub type UserLink = Expandable<UserId, User>;
pub type TuitLink = Expandable<TuitId, Tuit>;
pub type BoardLink = Expandable<BoardId, Board>;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountType {
    Personal,
    Academic,
    Professional,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum MaritalStatus {
    Married,
    Single,
    Widowed,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub id: UserId,
    #[serde(default, rename = "userName", alias = "username")]
    pub username: String,
    /// PHC-format hash at rest. Emptied before a user leaves the server.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_photo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_type: Option<AccountType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marital_status: Option<MaritalStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biography: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joined_on: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl User {
    pub fn redacted(mut self) -> Self {
        self.password.clear();
        self
    }
}

impl Identified for User {
    type Id = UserId;
    fn id(&self) -> &UserId {
        &self.id
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Stats {
    #[serde(default)]
    pub replies: u64,
    #[serde(default)]
    pub retuits: u64,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub dislikes: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Tuit {
    pub id: TuitId,
    pub tuit: String,
    pub posted_by: UserLink,
    pub posted_on: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_overlay: Option<String>,
    #[serde(default)]
    pub stats: Stats,
}

impl Identified for Tuit {
    type Id = TuitId;
    fn id(&self) -> &TuitId {
        &self.id
    }
}

/// Body of a tuit create or edit. Author, timestamp and stats are owned by
/// the server.
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TuitDraft {
    pub tuit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_overlay: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Like {
    pub id: String,
    pub tuit: TuitLink,
    pub liked_by: UserLink,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Dislike {
    pub id: String,
    pub tuit: TuitLink,
    pub disliked_by: UserLink,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Follow {
    pub id: String,
    pub user_following: UserLink,
    pub user_followed: UserLink,
    pub followed_on: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: String,
    pub tuit: TuitLink,
    pub bookmarked_by: UserLink,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    pub message: String,
    pub message_to: UserLink,
    pub message_from: UserLink,
    pub sent_on: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct NewMessage {
    pub message: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: BoardId,
    pub board_name: String,
    pub created_by: UserLink,
}

impl Identified for Board {
    type Id = BoardId;
    fn id(&self) -> &BoardId {
        &self.id
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TuitBoardMap {
    pub id: String,
    pub board: BoardLink,
    pub tuit: TuitLink,
}

/// Names the user acting on a board.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BoardOwner {
    pub id: UserRef,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum PrivilegeFlag {
    AllowTuits,
    AllowSignIn,
    AllowLikes,
}

impl PrivilegeFlag {
    pub const ALL: [PrivilegeFlag; 3] = [
        PrivilegeFlag::AllowTuits,
        PrivilegeFlag::AllowSignIn,
        PrivilegeFlag::AllowLikes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PrivilegeFlag::AllowTuits => "allowTuits",
            PrivilegeFlag::AllowSignIn => "allowSignIn",
            PrivilegeFlag::AllowLikes => "allowLikes",
        }
    }
}

impl fmt::Display for PrivilegeFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPrivilegeFlag(pub String);

impl fmt::Display for UnknownPrivilegeFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown privilege flag `{}`", self.0)
    }
}

impl std::error::Error for UnknownPrivilegeFlag {}

impl FromStr for PrivilegeFlag {
    type Err = UnknownPrivilegeFlag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PrivilegeFlag::ALL
            .into_iter()
            .find(|flag| flag.as_str() == s)
            .ok_or_else(|| UnknownPrivilegeFlag(s.to_string()))
    }
}

fn allowed() -> bool {
    true
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Privilege {
    pub id: String,
    pub user: UserLink,
    #[serde(default = "allowed")]
    pub allow_tuits: bool,
    #[serde(default = "allowed")]
    pub allow_sign_in: bool,
    #[serde(default = "allowed")]
    pub allow_likes: bool,
}

impl Privilege {
    /// A freshly provisioned record: everything allowed.
    pub fn new(id: String, user: UserId) -> Self {
        Self {
            id,
            user: Expandable::Id(user),
            allow_tuits: true,
            allow_sign_in: true,
            allow_likes: true,
        }
    }

    pub fn get(&self, flag: PrivilegeFlag) -> bool {
        match flag {
            PrivilegeFlag::AllowTuits => self.allow_tuits,
            PrivilegeFlag::AllowSignIn => self.allow_sign_in,
            PrivilegeFlag::AllowLikes => self.allow_likes,
        }
    }

    pub fn set(&mut self, flag: PrivilegeFlag, value: bool) {
        match flag {
            PrivilegeFlag::AllowTuits => self.allow_tuits = value,
            PrivilegeFlag::AllowSignIn => self.allow_sign_in = value,
            PrivilegeFlag::AllowLikes => self.allow_likes = value,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    #[serde(rename = "userName", alias = "username")]
    pub username: String,
    pub password: String,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeleteStatus {
    pub deleted_count: u64,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatus {
    pub matched_count: u64,
    pub modified_count: u64,
}
