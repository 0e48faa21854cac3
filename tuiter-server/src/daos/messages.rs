use anyhow::Result;
use chrono::Utc;
use tuiter_common::{DeleteStatus, Expandable, Message, MessageId, NewMessage, User, UserId};

use super::deleted;
use crate::store::{Collection, Document, Store};

impl Document for Message {
    const COLLECTION: &'static str = "messages";
    fn key(&self) -> &str {
        self.id.as_str()
    }
}

#[derive(Clone)]
pub struct MessageDao {
    messages: Collection<Message>,
    users: Collection<User>,
}

impl MessageDao {
    pub fn new(store: &Store) -> Result<Self> {
        Ok(Self {
            messages: store.collection()?,
            users: store.collection()?,
        })
    }

    pub fn user_messages_another_user(&self, from: &UserId, to: &UserId, body: NewMessage) -> Result<Message> {
        let message = Message {
            id: MessageId(self.messages.next_id()?),
            message: body.message,
            message_to: Expandable::Id(to.clone()),
            message_from: Expandable::Id(from.clone()),
            sent_on: Utc::now(),
        };
        self.messages.insert(&message)?;
        Ok(message)
    }

    pub fn user_deletes_message(&self, mid: &MessageId) -> Result<DeleteStatus> {
        Ok(deleted(self.messages.remove(mid)? as u64))
    }

    /// Messages sent by `uid`, with the recipient expanded.
    pub fn find_all_messages_sent(&self, uid: &UserId) -> Result<Vec<Message>> {
        let mut messages = self.messages.find(|m| m.message_from.id() == uid)?;
        for message in &mut messages {
            let link = message.message_to.clone();
            message.message_to = self.users.populate(link)?.map_doc(User::redacted);
        }
        Ok(messages)
    }

    /// Messages received by `uid`, with the sender expanded.
    pub fn find_all_messages_received(&self, uid: &UserId) -> Result<Vec<Message>> {
        let mut messages = self.messages.find(|m| m.message_to.id() == uid)?;
        for message in &mut messages {
            let link = message.message_from.clone();
            message.message_from = self.users.populate(link)?.map_doc(User::redacted);
        }
        Ok(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sent_and_received_are_split_by_direction() -> Result<()> {
        let store = Store::temporary()?;
        let messages = MessageDao::new(&store)?;
        let (alice, bob) = (UserId::from("alice"), UserId::from("bob"));
        let hi = NewMessage { message: "hi".into() };
        let sent = messages.user_messages_another_user(&alice, &bob, hi)?;

        assert_eq!(messages.find_all_messages_sent(&alice)?.len(), 1);
        assert!(messages.find_all_messages_sent(&bob)?.is_empty());
        assert_eq!(messages.find_all_messages_received(&bob)?[0].message, "hi");

        assert_eq!(messages.user_deletes_message(&sent.id)?.deleted_count, 1);
        assert!(messages.find_all_messages_received(&bob)?.is_empty());
        Ok(())
    }
}
