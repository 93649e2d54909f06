//! User account domain model.
//!
//! # Invariants
//! - `id` is unique across the directory.
//! - Secrets are stored as salted SHA-256 digests, never as plaintext.
//! - `friends` is a directed adjacency list: membership here says nothing
//!   about the other user's list.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// A registered account with its directed friend list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub salt: String,
    pub credential_hash: String,
    #[serde(default)]
    pub friends: Vec<String>,
}

impl User {
    /// Creates an account for `id`, salting and digesting `secret`.
    pub fn create(id: impl Into<String>, secret: &str) -> Self {
        let salt = Uuid::new_v4().simple().to_string();
        let credential_hash = digest_credential(&salt, secret);
        Self {
            id: id.into(),
            salt,
            credential_hash,
            friends: Vec::new(),
        }
    }

    /// Whether `secret` matches the stored digest.
    pub fn verify_credential(&self, secret: &str) -> bool {
        digest_credential(&self.salt, secret) == self.credential_hash
    }

    /// Whether this user has added `user_id` as a friend.
    pub fn is_friend_of(&self, user_id: &str) -> bool {
        self.friends.iter().any(|friend| friend == user_id)
    }
}

fn digest_credential(salt: &str, secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(secret.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::User;

    #[test]
    fn verify_accepts_matching_secret_only() {
        let user = User::create("alice", "open sesame");
        assert!(user.verify_credential("open sesame"));
        assert!(!user.verify_credential("open says me"));
        assert!(!user.verify_credential(""));
    }

    #[test]
    fn same_secret_digests_differently_per_account() {
        let first = User::create("alice", "hunter2");
        let second = User::create("bob", "hunter2");
        assert_ne!(first.salt, second.salt);
        assert_ne!(first.credential_hash, second.credential_hash);
    }

    #[test]
    fn friend_membership_is_directed() {
        let mut alice = User::create("alice", "pw");
        alice.friends.push("bob".to_string());
        assert!(alice.is_friend_of("bob"));
        assert!(!alice.is_friend_of("carol"));
    }
}
