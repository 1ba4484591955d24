//! Role-based authorization middleware.
//!
//! Each gate authenticates the request itself (via
//! [`CurrentUser::from_request_parts`]) before checking the role, so the
//! role check can never observe an unauthenticated request.

#![allow(dead_code)]

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::middleware::auth::CurrentUser;
use crate::modules::users::model::Role;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Middleware that checks whether the authenticated user holds one of the
/// allowed roles.
///
/// # Usage with axum::middleware::from_fn_with_state
///
/// ```rust,ignore
/// let protected = Router::new()
///     .route("/", post(handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), require_teacher));
/// ```
pub async fn require_roles(
    State(state): State<AppState>,
    req: Request,
    next: Next,
    allowed_roles: Vec<Role>,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let current_user = CurrentUser::from_request_parts(&mut parts, &state).await?;

    if !allowed_roles.contains(&current_user.role()) {
        return Err(AppError::forbidden("Access denied".to_string()));
    }

    let req = Request::from_parts(parts, body);
    Ok(next.run(req).await)
}

pub async fn require_teacher(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(State(state), req, next, vec![Role::Teacher]).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

pub async fn require_student(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(State(state), req, next, vec![Role::Student]).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

pub async fn require_student_or_admin(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    match require_roles(State(state), req, next, vec![Role::Student, Role::Admin]).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(State(state), req, next, vec![Role::Admin]).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

/// Checks a single role requirement inside handler or service logic.
pub fn check_role(user: &CurrentUser, required_role: Role) -> Result<(), AppError> {
    if user.role() != required_role {
        return Err(AppError::forbidden("Access denied".to_string()));
    }

    Ok(())
}

/// Checks that the user holds any of the allowed roles.
pub fn check_any_role(user: &CurrentUser, allowed_roles: &[Role]) -> Result<(), AppError> {
    if !allowed_roles.contains(&user.role()) {
        return Err(AppError::forbidden("Access denied".to_string()));
    }

    Ok(())
}
