use sqlx::PgPool;

use crate::modules::users::model::{Role, User};
use crate::utils::password::hash_password;

/// Inserts an admin account. Admins cannot be registered through the HTTP
/// API; this is their only provisioning path.
pub async fn create_admin(
    db: &PgPool,
    name: &str,
    email: &str,
    password: &str,
) -> Result<User, Box<dyn std::error::Error>> {
    let hashed_password = hash_password(password)
        .map_err(|e| format!("Failed to hash password: {}", e.error))?;

    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (name, email, password, role)
         VALUES ($1, $2, $3, $4)
         ON CONFLICT (email) DO NOTHING
         RETURNING id, name, email, role, avatar, phone, is_active, created_at, updated_at",
    )
    .bind(name)
    .bind(email)
    .bind(hashed_password)
    .bind(Role::Admin)
    .fetch_optional(db)
    .await?
    .ok_or("User with this email already exists")?;

    Ok(user)
}
