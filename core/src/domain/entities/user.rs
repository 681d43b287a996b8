//! User entity representing a registered account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    /// Registered, email not yet verified
    Pending,
    /// Email verified
    Active,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Pending => "pending",
            UserStatus::Active => "active",
        }
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(UserStatus::Pending),
            "active" => Ok(UserStatus::Active),
            other => Err(format!("unknown user status: {}", other)),
        }
    }
}

/// User entity representing a registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Store-generated identifier
    pub id: i64,

    pub username: String,

    /// Unique across all users
    pub email: String,

    /// bcrypt hash; never serialized
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    pub status: UserStatus,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Whether the account has completed email verification
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    /// Marks a pending account active; returns false if it already was
    pub fn activate(&mut self) -> bool {
        if self.is_active() {
            return false;
        }
        self.status = UserStatus::Active;
        self.updated_at = Utc::now();
        true
    }
}

/// A user about to be persisted; the store assigns the id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub status: UserStatus,
}

impl NewUser {
    /// A freshly registered account, always `pending`
    pub fn pending(
        username: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            status: UserStatus::Pending,
        }
    }

    /// Materialize with the identifier and timestamps the store assigned
    pub fn into_user(self, id: i64, now: DateTime<Utc>) -> User {
        User {
            id,
            username: self.username,
            email: self.email,
            password_hash: self.password_hash,
            status: self.status,
            created_at: now,
            updated_at: now,
        }
    }
}
