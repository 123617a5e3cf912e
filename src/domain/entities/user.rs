use chrono::{DateTime, Utc};

use crate::domain::value_objects::{Email, UserId};

/// Registered user. Only the password hash is ever held here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    email: Email,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted: bool,
}

impl User {
    pub fn new(id: UserId, email: Email, password_hash: String, now: DateTime<Utc>) -> Self {
        Self {
            id,
            email,
            password_hash,
            created_at: now,
            updated_at: now,
            deleted: false,
        }
    }

    pub fn reconstruct(
        id: UserId,
        email: Email,
        password_hash: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        deleted: bool,
    ) -> Self {
        Self {
            id,
            email,
            password_hash,
            created_at,
            updated_at,
            deleted,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }
}
