//! Teacher profile data models and DTOs.
//!
//! Wire field names are camelCase (`pricePerHour`, `minPrice`, ...) per the
//! public API contract; internal code and database columns stay snake_case.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Public fields of the user owning a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct TeacherUserInfo {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// A rating left by a student. `student` is null when the rating author has
/// since been deleted.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub id: Uuid,
    pub student: Option<Uuid>,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A teacher's public listing with its owner resolved and all ratings in
/// append order.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeacherProfile {
    pub id: Uuid,
    pub user: TeacherUserInfo,
    pub subjects: Vec<String>,
    pub bio: Option<String>,
    pub price_per_hour: f64,
    pub ratings: Vec<Rating>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfileDto {
    #[serde(default)]
    pub subjects: Vec<String>,
    pub bio: Option<String>,
    pub price_per_hour: f64,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RateTeacherDto {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,
    pub comment: Option<String>,
}

/// Query filters for the teacher listing. All filters are optional and
/// combined with AND; price bounds are inclusive.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct TeacherFilterParams {
    /// Exact membership match against the subjects list.
    pub subject: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    /// Case-insensitive substring match against the owner's name.
    pub name: Option<String>,
}
