use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use uuid::Uuid;

use crate::modules::users::model::{Role, User};
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::verify_token;

/// Extractor that validates the bearer token and yields the authenticated
/// user. The user is re-fetched from the store on every request, so the role
/// and identity reflect current state rather than what the token was issued
/// with; the password hash is never part of the fetched row.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl CurrentUser {
    pub fn id(&self) -> Uuid {
        self.0.id
    }

    pub fn role(&self) -> Role {
        self.0.role
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Not authorized".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized("Not authorized".to_string()))?;

        let claims = verify_token(token, &state.jwt_config)?;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::unauthorized("Token invalid".to_string()))?;

        // The token can outlive the account; a vanished subject is treated
        // the same as a bad token.
        let user = UserService::find_by_id(&state.db, user_id)
            .await?
            .ok_or_else(|| AppError::unauthorized("Token invalid".to_string()))?;

        Ok(CurrentUser(user))
    }
}
