use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::modules::users::model::{Role, User};
use crate::modules::users::service::UserService;
use crate::utils::errors::AppError;
use crate::utils::jwt::create_token;
use crate::utils::password::{hash_password, verify_password};

use super::model::{LoginRequest, LoginResponse, RegisterRequestDto};

pub struct AuthService;

impl AuthService {
    /// Creates a student or teacher account. The password is hashed exactly
    /// here, the only code path that sets it through the API.
    #[instrument(skip(db, dto))]
    pub async fn register(db: &PgPool, dto: RegisterRequestDto) -> Result<User, AppError> {
        // Admin accounts come from the CLI provisioning path only.
        if dto.role == Role::Admin {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Role must be student or teacher"
            )));
        }

        if UserService::find_by_email(db, &dto.email).await?.is_some() {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Email already registered"
            )));
        }

        let hashed_password = hash_password(&dto.password)?;

        // The unique constraint on email backstops the pre-check above if two
        // registrations race.
        UserService::insert(db, &dto.name, &dto.email, &hashed_password, dto.role).await
    }

    #[instrument(skip(db, dto, jwt_config))]
    pub async fn login(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        #[derive(sqlx::FromRow)]
        struct UserWithPassword {
            id: Uuid,
            role: Role,
            password: String,
        }

        // Unknown email and wrong password produce the same response so the
        // API does not reveal which emails are registered.
        let user = sqlx::query_as::<_, UserWithPassword>(
            "SELECT id, role, password FROM users WHERE email = $1",
        )
        .bind(&dto.email)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::bad_request(anyhow::anyhow!("Invalid credentials")))?;

        if !verify_password(&dto.password, &user.password)? {
            return Err(AppError::bad_request(anyhow::anyhow!("Invalid credentials")));
        }

        let token = create_token(user.id, user.role, jwt_config)?;

        Ok(LoginResponse { token })
    }

    #[instrument(skip(db))]
    pub async fn delete_account(db: &PgPool, id: Uuid) -> Result<User, AppError> {
        UserService::delete(db, id).await
    }
}
