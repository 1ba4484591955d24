use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::users::model::{Role, User};
use crate::utils::errors::AppError;

pub struct UserService;

impl UserService {
    #[instrument(skip(db))]
    pub async fn find_by_id(db: &PgPool, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, role, avatar, phone, is_active, created_at, updated_at
             FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch user by ID")
        .map_err(AppError::database)?;

        Ok(user)
    }

    #[instrument(skip(db))]
    pub async fn find_by_email(db: &PgPool, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, role, avatar, phone, is_active, created_at, updated_at
             FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(db)
        .await
        .context("Failed to fetch user by email")
        .map_err(AppError::database)?;

        Ok(user)
    }

    /// Inserts a new user. The password must already be hashed by the caller;
    /// the RETURNING clause selects public columns only, so the hash never
    /// travels back out of the store.
    #[instrument(skip(db, password_hash))]
    pub async fn insert(
        db: &PgPool,
        name: &str,
        email: &str,
        password_hash: &str,
        role: Role,
    ) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (name, email, password, role)
             VALUES ($1, $2, $3, $4)
             RETURNING id, name, email, role, avatar, phone, is_active, created_at, updated_at",
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::bad_request(anyhow::anyhow!("Email already registered"));
                }
            }
            AppError::database(anyhow::Error::from(e))
        })?;

        Ok(user)
    }

    /// Hard-deletes a user, returning the deleted snapshot. The owned teacher
    /// profile goes with it (FK cascade) and ratings authored by the user are
    /// anonymized (FK set-null).
    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: Uuid) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            "DELETE FROM users WHERE id = $1
             RETURNING id, name, email, role, avatar, phone, is_active, created_at, updated_at",
        )
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to delete user")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))?;

        Ok(user)
    }
}
