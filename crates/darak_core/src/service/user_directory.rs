//! Account registration, login and the friend graph.
//!
//! # Responsibility
//! - Manage the flat `users` entry and the current-session pointer.
//! - Enforce friend-graph validation rules.
//!
//! # Invariants
//! - The session pointer persists independently of record data and is only
//!   cleared by an explicit logout.
//! - `add_friend` mutates the caller's list only; the relation is directed
//!   and never made reciprocal.
//! - All validation outcomes are typed results, never panics.

use crate::model::user::User;
use crate::repo::kv_repo::{KvStore, KEY_CURRENT_USER, KEY_USERS};
use crate::repo::RepoError;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type DirectoryResult<T> = Result<T, DirectoryError>;

#[derive(Debug)]
pub enum DirectoryError {
    DuplicateId(String),
    /// No stored user matches both id and secret. Deliberately carries no
    /// detail about which of the two was wrong.
    InvalidCredential,
    NotAuthenticated,
    SelfReference,
    AlreadyFriend(String),
    UnknownUser(String),
    Storage(RepoError),
}

impl Display for DirectoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateId(id) => write!(f, "user id `{id}` already exists"),
            Self::InvalidCredential => write!(f, "invalid id or credential"),
            Self::NotAuthenticated => write!(f, "no active session"),
            Self::SelfReference => write!(f, "cannot add yourself as a friend"),
            Self::AlreadyFriend(id) => write!(f, "`{id}` is already a friend"),
            Self::UnknownUser(id) => write!(f, "user `{id}` not found"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DirectoryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for DirectoryError {
    fn from(value: RepoError) -> Self {
        Self::Storage(value)
    }
}

/// Flat-entry backed account directory and session holder.
pub struct UserDirectory<'conn> {
    kv: KvStore<'conn>,
}

impl<'conn> UserDirectory<'conn> {
    pub fn new(kv: KvStore<'conn>) -> Self {
        Self { kv }
    }

    /// Registers a new account and auto-authenticates it.
    pub fn register(&self, id: &str, secret: &str) -> DirectoryResult<User> {
        let mut users = self.load_users()?;
        if users.iter().any(|user| user.id == id) {
            return Err(DirectoryError::DuplicateId(id.to_string()));
        }

        let user = User::create(id, secret);
        users.push(user.clone());
        self.store_users(&users)?;
        self.set_session(&user)?;
        info!("event=register module=directory status=ok user={id}");
        Ok(user)
    }

    /// Authenticates against the stored directory and opens a session.
    pub fn login(&self, id: &str, secret: &str) -> DirectoryResult<User> {
        let users = self.load_users()?;
        let user = users
            .into_iter()
            .find(|user| user.id == id && user.verify_credential(secret))
            .ok_or(DirectoryError::InvalidCredential)?;

        self.set_session(&user)?;
        info!("event=login module=directory status=ok user={id}");
        Ok(user)
    }

    /// Explicitly clears the session pointer.
    pub fn logout(&self) -> DirectoryResult<()> {
        self.kv.remove(KEY_CURRENT_USER)?;
        info!("event=logout module=directory status=ok");
        Ok(())
    }

    pub fn current_user(&self) -> DirectoryResult<Option<User>> {
        Ok(self.kv.get_json(KEY_CURRENT_USER)?)
    }

    /// Adds `friend_id` to the current user's friend list only.
    pub fn add_friend(&self, friend_id: &str) -> DirectoryResult<User> {
        let session = self
            .current_user()?
            .ok_or(DirectoryError::NotAuthenticated)?;
        if session.id == friend_id {
            return Err(DirectoryError::SelfReference);
        }
        if session.is_friend_of(friend_id) {
            return Err(DirectoryError::AlreadyFriend(friend_id.to_string()));
        }

        let mut users = self.load_users()?;
        if !users.iter().any(|user| user.id == friend_id) {
            return Err(DirectoryError::UnknownUser(friend_id.to_string()));
        }

        let caller = users
            .iter_mut()
            .find(|user| user.id == session.id)
            .ok_or(DirectoryError::NotAuthenticated)?;
        caller.friends.push(friend_id.to_string());
        let updated = caller.clone();

        self.store_users(&users)?;
        // Keep the session copy in sync with the directory.
        self.set_session(&updated)?;
        info!(
            "event=add_friend module=directory status=ok user={} friend={friend_id}",
            updated.id
        );
        Ok(updated)
    }

    /// The current user's friend list, empty without a session.
    pub fn friends(&self) -> DirectoryResult<Vec<String>> {
        Ok(self
            .current_user()?
            .map(|user| user.friends)
            .unwrap_or_default())
    }

    fn load_users(&self) -> DirectoryResult<Vec<User>> {
        Ok(self.kv.get_json(KEY_USERS)?.unwrap_or_default())
    }

    fn store_users(&self, users: &[User]) -> DirectoryResult<()> {
        self.kv.put_json(KEY_USERS, &users)?;
        Ok(())
    }

    fn set_session(&self, user: &User) -> DirectoryResult<()> {
        self.kv.put_json(KEY_CURRENT_USER, user)?;
        Ok(())
    }
}
