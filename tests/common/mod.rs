use proffinder::config::cors::CorsConfig;
use proffinder::config::jwt::JwtConfig;
use proffinder::modules::users::model::Role;
use proffinder::router::init_router;
use proffinder::state::AppState;
use proffinder::utils::jwt::create_token;
use proffinder::utils::password::hash_password;
use sqlx::PgPool;
use uuid::Uuid;

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        token_expiry: 3600,
    }
}

pub fn setup_test_app(pool: PgPool) -> axum::Router {
    let state = AppState {
        db: pool,
        jwt_config: test_jwt_config(),
        cors_config: CorsConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        },
    };
    init_router(state)
}

#[allow(dead_code)]
pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[allow(dead_code)]
pub async fn create_test_user(
    pool: &PgPool,
    name: &str,
    email: &str,
    password: &str,
    role: Role,
) -> TestUser {
    let hashed = hash_password(password).unwrap();

    let id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO users (name, email, password, role)
         VALUES ($1, $2, $3, $4)
         RETURNING id",
    )
    .bind(name)
    .bind(email)
    .bind(hashed)
    .bind(role)
    .fetch_one(pool)
    .await
    .unwrap();

    TestUser {
        id,
        email: email.to_string(),
        password: password.to_string(),
        role,
    }
}

/// Mints a token the test app accepts for the given user.
#[allow(dead_code)]
pub fn token_for(user: &TestUser) -> String {
    create_token(user.id, user.role, &test_jwt_config()).unwrap()
}

#[allow(dead_code)]
pub async fn create_test_profile(
    pool: &PgPool,
    user_id: Uuid,
    subjects: &[&str],
    price_per_hour: f64,
) -> Uuid {
    let subjects: Vec<String> = subjects.iter().map(|s| s.to_string()).collect();

    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO teacher_profiles (user_id, subjects, bio, price_per_hour)
         VALUES ($1, $2, NULL, $3)
         RETURNING id",
    )
    .bind(user_id)
    .bind(subjects)
    .bind(price_per_hour)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}
