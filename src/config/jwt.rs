use std::env;

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    /// Token lifetime in seconds from issuance.
    pub token_expiry: i64,
}

impl JwtConfig {
    /// Reads the signing configuration from the environment. A missing
    /// secret is startup-fatal: a request-time failure here would surface
    /// as intermittent 500s, so it is checked up front instead.
    pub fn from_env() -> Self {
        Self {
            secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            token_expiry: env::var("TOKEN_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(86400), // 1 day
        }
    }
}
