use anyhow::Result;
use reqwest::Client;

pub mod client {
    use anyhow::Result;
    use reqwest::{Client, RequestBuilder};
    use serde::de::DeserializeOwned;
    use serde_json::Value;
    use tuiter_common::{
        Board, BoardId, BoardOwner, Bookmark, Credentials, DeleteStatus, Follow, Message, MessageId, NewMessage,
        Privilege, PrivilegeFlag, Tuit, TuitBoardMap, TuitDraft, TuitId, UpdateStatus, Url, User, UserId, UserRef,
    };

    /// Sends the request and decodes the body, surfacing non-2xx statuses as errors.
    async fn json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
        Ok(request.send().await?.error_for_status()?.json::<T>().await?)
    }

    async fn empty(request: RequestBuilder) -> Result<()> {
        request.send().await?.error_for_status()?;
        Ok(())
    }

    pub async fn register(client: &Client, url: &Url, user: &User) -> Result<User> {
        json(client.post(url.join("/auth/register")).json(user)).await
    }
    pub async fn login(client: &Client, url: &Url, credentials: &Credentials) -> Result<User> {
        json(client.post(url.join("/auth/login")).json(credentials)).await
    }
    pub async fn profile(client: &Client, url: &Url) -> Result<User> {
        json(client.post(url.join("/auth/profile"))).await
    }
    pub async fn logout(client: &Client, url: &Url) -> Result<()> {
        empty(client.post(url.join("/auth/logout"))).await
    }

    pub async fn find_all_users(client: &Client, url: &Url) -> Result<Vec<User>> {
        json(client.get(url.join("/users"))).await
    }
    pub async fn find_user_by_id(client: &Client, url: &Url, uid: &UserId) -> Result<User> {
        json(client.get(url.join(format!("/users/{uid}")))).await
    }
    pub async fn create_user(client: &Client, url: &Url, user: &User) -> Result<User> {
        json(client.post(url.join("/users")).json(user)).await
    }
    /// `patch` carries only the fields to change.
    pub async fn update_user(client: &Client, url: &Url, uid: &UserId, patch: &Value) -> Result<UpdateStatus> {
        json(client.put(url.join(format!("/users/{uid}"))).json(patch)).await
    }
    pub async fn delete_user(client: &Client, url: &Url, uid: &UserId) -> Result<DeleteStatus> {
        json(client.delete(url.join(format!("/users/{uid}")))).await
    }
    pub async fn delete_all_users(client: &Client, url: &Url) -> Result<DeleteStatus> {
        json(client.delete(url.join("/users"))).await
    }
    pub async fn delete_users_by_username(client: &Client, url: &Url, username: &str) -> Result<DeleteStatus> {
        json(client.delete(url.join(format!("/users/username/{username}")))).await
    }

    pub async fn find_all_tuits(client: &Client, url: &Url) -> Result<Vec<Tuit>> {
        json(client.get(url.join("/tuits"))).await
    }
    pub async fn find_tuit_by_id(client: &Client, url: &Url, tid: &TuitId) -> Result<Tuit> {
        json(client.get(url.join(format!("/tuits/{tid}")))).await
    }
    pub async fn find_tuits_by_user(client: &Client, url: &Url, user: &UserRef) -> Result<Vec<Tuit>> {
        json(client.get(url.join(format!("/users/{user}/tuits")))).await
    }
    pub async fn create_tuit(client: &Client, url: &Url, user: &UserRef, draft: &TuitDraft) -> Result<Tuit> {
        json(client.post(url.join(format!("/users/{user}/tuits"))).json(draft)).await
    }
    pub async fn update_tuit(client: &Client, url: &Url, tid: &TuitId, draft: &TuitDraft) -> Result<UpdateStatus> {
        json(client.put(url.join(format!("/tuits/{tid}"))).json(draft)).await
    }
    pub async fn delete_tuit(client: &Client, url: &Url, tid: &TuitId) -> Result<DeleteStatus> {
        json(client.delete(url.join(format!("/tuits/{tid}")))).await
    }

    pub async fn toggle_like(client: &Client, url: &Url, user: &UserRef, tid: &TuitId) -> Result<()> {
        empty(client.put(url.join(format!("/users/{user}/likes/{tid}")))).await
    }
    pub async fn toggle_dislike(client: &Client, url: &Url, user: &UserRef, tid: &TuitId) -> Result<()> {
        empty(client.put(url.join(format!("/users/{user}/dislikes/{tid}")))).await
    }
    pub async fn find_liked_tuits(client: &Client, url: &Url, user: &UserRef) -> Result<Vec<Tuit>> {
        json(client.get(url.join(format!("/users/{user}/likes")))).await
    }
    pub async fn find_disliked_tuits(client: &Client, url: &Url, user: &UserRef) -> Result<Vec<Tuit>> {
        json(client.get(url.join(format!("/users/{user}/dislikes")))).await
    }
    pub async fn find_users_that_liked(client: &Client, url: &Url, tid: &TuitId) -> Result<Vec<User>> {
        json(client.get(url.join(format!("/tuits/{tid}/likes")))).await
    }

    pub async fn follow(client: &Client, url: &Url, user: &UserRef, other: &UserId) -> Result<Follow> {
        json(client.post(url.join(format!("/users/{user}/follows/{other}")))).await
    }
    pub async fn unfollow(client: &Client, url: &Url, user: &UserRef, other: &UserId) -> Result<DeleteStatus> {
        json(client.delete(url.join(format!("/users/{user}/follows/{other}")))).await
    }
    pub async fn find_followers(client: &Client, url: &Url, user: &UserRef) -> Result<Vec<Follow>> {
        json(client.get(url.join(format!("/users/{user}/followers")))).await
    }
    pub async fn find_following(client: &Client, url: &Url, user: &UserRef) -> Result<Vec<Follow>> {
        json(client.get(url.join(format!("/users/{user}/following")))).await
    }

    pub async fn bookmark(client: &Client, url: &Url, user: &UserRef, tid: &TuitId) -> Result<Bookmark> {
        json(client.post(url.join(format!("/users/{user}/bookmarks/{tid}")))).await
    }
    pub async fn unbookmark(client: &Client, url: &Url, user: &UserRef, tid: &TuitId) -> Result<DeleteStatus> {
        json(client.delete(url.join(format!("/users/{user}/bookmarks/{tid}")))).await
    }
    pub async fn find_bookmarks(client: &Client, url: &Url, user: &UserRef) -> Result<Vec<Bookmark>> {
        json(client.get(url.join(format!("/users/{user}/bookmarks")))).await
    }
    pub async fn find_bookmarks_of_tuit(client: &Client, url: &Url, tid: &TuitId) -> Result<Vec<Bookmark>> {
        json(client.get(url.join(format!("/tuits/{tid}/bookmarks")))).await
    }

    pub async fn send_message(
        client: &Client,
        url: &Url,
        sender: &UserRef,
        receiver: &UserId,
        message: &str,
    ) -> Result<Message> {
        let body = NewMessage { message: message.to_string() };
        json(client.post(url.join(format!("/users/sender/{sender}/receiver/{receiver}"))).json(&body)).await
    }
    pub async fn delete_message(client: &Client, url: &Url, mid: &MessageId) -> Result<DeleteStatus> {
        json(client.delete(url.join(format!("/messages/{mid}")))).await
    }
    pub async fn find_messages_sent(client: &Client, url: &Url, user: &UserRef) -> Result<Vec<Message>> {
        json(client.get(url.join(format!("/users/{user}/messages/sent")))).await
    }
    pub async fn find_messages_received(client: &Client, url: &Url, user: &UserRef) -> Result<Vec<Message>> {
        json(client.get(url.join(format!("/users/{user}/messages/received")))).await
    }

    pub async fn create_board(client: &Client, url: &Url, user: &UserRef, name: &str) -> Result<Board> {
        json(client.post(url.join(format!("/users/{user}/boards/{name}")))).await
    }
    pub async fn find_boards(client: &Client, url: &Url, user: &UserRef) -> Result<Vec<Board>> {
        json(client.get(url.join(format!("/users/{user}/boards")))).await
    }
    pub async fn delete_board(client: &Client, url: &Url, bid: &BoardId, owner: &UserRef) -> Result<DeleteStatus> {
        let body = BoardOwner { id: owner.clone() };
        json(client.delete(url.join(format!("/boards/{bid}"))).json(&body)).await
    }
    pub async fn add_tuit_to_board(
        client: &Client,
        url: &Url,
        bid: &BoardId,
        tid: &TuitId,
        owner: &UserRef,
    ) -> Result<TuitBoardMap> {
        let body = BoardOwner { id: owner.clone() };
        json(client.post(url.join(format!("/boards/{bid}/tuits/{tid}"))).json(&body)).await
    }
    pub async fn remove_tuit_from_board(
        client: &Client,
        url: &Url,
        bid: &BoardId,
        tid: &TuitId,
        owner: &UserRef,
    ) -> Result<DeleteStatus> {
        let body = BoardOwner { id: owner.clone() };
        json(client.delete(url.join(format!("/boards/{bid}/tuits/{tid}"))).json(&body)).await
    }
    pub async fn find_board_tuits(client: &Client, url: &Url, bid: &BoardId) -> Result<Vec<Tuit>> {
        json(client.get(url.join(format!("/boards/{bid}/tuits")))).await
    }

    pub async fn get_privileges(client: &Client, url: &Url) -> Result<Vec<Privilege>> {
        json(client.get(url.join("/privileges"))).await
    }
    pub async fn get_privileges_user(client: &Client, url: &Url, uid: &UserId) -> Result<Privilege> {
        json(client.get(url.join(format!("/users/{uid}/privileges")))).await
    }
    pub async fn set_privilege(
        client: &Client,
        url: &Url,
        uid: &UserId,
        flag: PrivilegeFlag,
        value: bool,
    ) -> Result<UpdateStatus> {
        let route = if value { "privilegesTrue" } else { "privilegesFalse" };
        json(client.put(url.join(format!("/users/{uid}/{route}/{flag}")))).await
    }
}

/// A client that keeps the session cookie between calls, so `me` routes work
/// after a login.
pub fn new_client() -> Result<Client> {
    Ok(Client::builder().cookie_store(true).build()?)
}
