use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::CurrentUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{CreateProfileDto, RateTeacherDto, Rating, TeacherFilterParams, TeacherProfile};
use super::service::TeacherService;

/// Health probe for the teachers routes
#[utoipa::path(
    get,
    path = "/api/teachers/test",
    responses(
        (status = 200, description = "Teachers routes are reachable", body = String)
    ),
    tag = "Teachers"
)]
pub async fn test_route() -> &'static str {
    "Teachers route working!"
}

/// Create the authenticated teacher's profile
#[utoipa::path(
    post,
    path = "/api/teachers",
    request_body = CreateProfileDto,
    responses(
        (status = 201, description = "Profile created", body = TeacherProfile),
        (status = 400, description = "Profile already exists or validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - teachers only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Teachers"
)]
#[instrument(skip(state, current_user, dto))]
pub async fn create_teacher_profile(
    State(state): State<AppState>,
    current_user: CurrentUser,
    ValidatedJson(dto): ValidatedJson<CreateProfileDto>,
) -> Result<(StatusCode, Json<TeacherProfile>), AppError> {
    let profile = TeacherService::create_profile(&state.db, &current_user.0, dto).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

/// List teacher profiles, optionally filtered
#[utoipa::path(
    get,
    path = "/api/teachers",
    params(
        TeacherFilterParams
    ),
    responses(
        (status = 200, description = "Matching teacher profiles", body = Vec<TeacherProfile>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - students and admins only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Teachers"
)]
#[instrument(skip(state))]
pub async fn get_teachers(
    State(state): State<AppState>,
    Query(params): Query<TeacherFilterParams>,
) -> Result<Json<Vec<TeacherProfile>>, AppError> {
    let teachers = TeacherService::list_teachers(&state.db, params).await?;
    Ok(Json(teachers))
}

/// Fetch a teacher profile by ID
#[utoipa::path(
    get,
    path = "/api/teachers/{id}",
    params(
        ("id" = Uuid, Path, description = "Teacher profile ID")
    ),
    responses(
        (status = 200, description = "Teacher profile", body = TeacherProfile),
        (status = 400, description = "Invalid teacher ID", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Teacher not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Teachers"
)]
#[instrument(skip(state, _current_user))]
pub async fn get_teacher(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<TeacherProfile>, AppError> {
    let teacher = TeacherService::get_teacher_by_id(&state.db, &id).await?;
    Ok(Json(teacher))
}

/// Rate a teacher (students only)
#[utoipa::path(
    post,
    path = "/api/teachers/{id}/rate",
    params(
        ("id" = Uuid, Path, description = "Teacher profile ID")
    ),
    request_body = RateTeacherDto,
    responses(
        (status = 200, description = "Updated ratings list", body = Vec<Rating>),
        (status = 400, description = "Invalid rating or teacher ID", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - students only", body = ErrorResponse),
        (status = 404, description = "Teacher not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Teachers"
)]
#[instrument(skip(state, current_user, dto))]
pub async fn rate_teacher(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<String>,
    ValidatedJson(dto): ValidatedJson<RateTeacherDto>,
) -> Result<Json<Vec<Rating>>, AppError> {
    let ratings = TeacherService::rate_teacher(&state.db, &current_user.0, &id, dto).await?;
    Ok(Json(ratings))
}
