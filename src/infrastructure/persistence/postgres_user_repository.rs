use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::TableNames;
use crate::application::ports::{RepositoryError, UserRepository};
use crate::domain::entities::User;
use crate::domain::value_objects::{Email, UserId};

pub struct PostgresUserRepository {
    pool: PgPool,
    tables: TableNames,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool, tables: TableNames) -> Self {
        Self { pool, tables }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create_user(&self, user: &User) -> Result<UserId, RepositoryError> {
        let result = sqlx::query(&format!(
            r#"
            INSERT INTO {users} (id, email, password_hash, created_at, updated_at, deleted)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
            users = self.tables.users
        ))
        .bind(user.id().as_uuid())
        .bind(user.email().as_str())
        .bind(user.password_hash())
        .bind(user.created_at())
        .bind(user.updated_at())
        .bind(user.is_deleted())
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) if done.rows_affected() == 1 => Ok(*user.id()),
            Ok(_) => Err(RepositoryError::NotCreated(format!("user {}", user.id()))),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => Err(
                RepositoryError::Conflict(format!("email {} is taken", user.email())),
            ),
            Err(e) => Err(e.into()),
        }
    }

    async fn get_user_by_email(&self, email: &Email) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            SELECT id, email, password_hash, created_at, updated_at, deleted
            FROM {users}
            WHERE email = $1
            "#,
            users = self.tables.users
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(r) => r.into_domain(),
            None => Err(RepositoryError::NotFound("user".to_string())),
        }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted: bool,
}

impl UserRow {
    fn into_domain(self) -> Result<User, RepositoryError> {
        let email = Email::parse(&self.email)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        Ok(User::reconstruct(
            UserId::from_uuid(self.id),
            email,
            self.password_hash,
            self.created_at,
            self.updated_at,
            self.deleted,
        ))
    }
}
