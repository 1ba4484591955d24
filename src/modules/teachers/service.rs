use std::collections::HashMap;

use anyhow::Context;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::users::model::{Role, User};
use crate::utils::errors::AppError;

use super::model::{
    CreateProfileDto, RateTeacherDto, Rating, TeacherFilterParams, TeacherProfile, TeacherUserInfo,
};

#[derive(sqlx::FromRow)]
struct ProfileRow {
    id: Uuid,
    user_id: Uuid,
    subjects: Vec<String>,
    bio: Option<String>,
    price_per_hour: f64,
    created_at: DateTime<Utc>,
    user_name: String,
    user_email: String,
}

impl ProfileRow {
    fn into_profile(self, ratings: Vec<Rating>) -> TeacherProfile {
        TeacherProfile {
            id: self.id,
            user: TeacherUserInfo {
                id: self.user_id,
                name: self.user_name,
                email: self.user_email,
            },
            subjects: self.subjects,
            bio: self.bio,
            price_per_hour: self.price_per_hour,
            ratings,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct RatingRow {
    id: Uuid,
    profile_id: Uuid,
    student_id: Option<Uuid>,
    rating: i32,
    comment: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<RatingRow> for Rating {
    fn from(row: RatingRow) -> Self {
        Rating {
            id: row.id,
            student: row.student_id,
            rating: row.rating,
            comment: row.comment,
            created_at: row.created_at,
        }
    }
}

pub struct TeacherService;

impl TeacherService {
    /// Creates the caller's teacher profile with an empty ratings list.
    #[instrument(skip(db, user, dto))]
    pub async fn create_profile(
        db: &PgPool,
        user: &User,
        dto: CreateProfileDto,
    ) -> Result<TeacherProfile, AppError> {
        if user.role != Role::Teacher {
            return Err(AppError::forbidden(
                "Only teachers can create profiles".to_string(),
            ));
        }

        let existing =
            sqlx::query_scalar::<_, Uuid>("SELECT id FROM teacher_profiles WHERE user_id = $1")
                .bind(user.id)
                .fetch_optional(db)
                .await
                .context("Failed to check for existing profile")
                .map_err(AppError::database)?;

        if existing.is_some() {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Profile already exists"
            )));
        }

        #[derive(sqlx::FromRow)]
        struct InsertedProfile {
            id: Uuid,
            subjects: Vec<String>,
            bio: Option<String>,
            price_per_hour: f64,
            created_at: DateTime<Utc>,
        }

        let row = sqlx::query_as::<_, InsertedProfile>(
            "INSERT INTO teacher_profiles (user_id, subjects, bio, price_per_hour)
             VALUES ($1, $2, $3, $4)
             RETURNING id, subjects, bio, price_per_hour, created_at",
        )
        .bind(user.id)
        .bind(&dto.subjects)
        .bind(&dto.bio)
        .bind(dto.price_per_hour)
        .fetch_one(db)
        .await
        .map_err(|e| {
            // Two concurrent creations can both pass the pre-check; the
            // unique constraint on user_id decides the loser here.
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::bad_request(anyhow::anyhow!("Profile already exists"));
                }
            }
            AppError::database(anyhow::Error::from(e))
        })?;

        Ok(TeacherProfile {
            id: row.id,
            user: TeacherUserInfo {
                id: user.id,
                name: user.name.clone(),
                email: user.email.clone(),
            },
            subjects: row.subjects,
            bio: row.bio,
            price_per_hour: row.price_per_hour,
            ratings: Vec::new(),
            created_at: row.created_at,
        })
    }

    /// Lists teacher profiles matching the filter. Filters are conjunctive;
    /// an empty filter returns everything.
    #[instrument(skip(db))]
    pub async fn list_teachers(
        db: &PgPool,
        filter: TeacherFilterParams,
    ) -> Result<Vec<TeacherProfile>, AppError> {
        let rows = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT tp.id, tp.user_id, tp.subjects, tp.bio, tp.price_per_hour, tp.created_at,
                   u.name AS user_name, u.email AS user_email
            FROM teacher_profiles tp
            JOIN users u ON u.id = tp.user_id
            WHERE ($1::TEXT IS NULL OR $1 = ANY(tp.subjects))
              AND ($2::DOUBLE PRECISION IS NULL OR tp.price_per_hour >= $2)
              AND ($3::DOUBLE PRECISION IS NULL OR tp.price_per_hour <= $3)
              AND ($4::TEXT IS NULL OR u.name ILIKE '%' || $4 || '%')
            ORDER BY tp.created_at
            "#,
        )
        .bind(&filter.subject)
        .bind(filter.min_price)
        .bind(filter.max_price)
        .bind(&filter.name)
        .fetch_all(db)
        .await
        .context("Failed to fetch teacher profiles")
        .map_err(AppError::database)?;

        let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
        let mut ratings = Self::fetch_ratings(db, &ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let profile_ratings = ratings.remove(&row.id).unwrap_or_default();
                row.into_profile(profile_ratings)
            })
            .collect())
    }

    #[instrument(skip(db))]
    pub async fn get_teacher_by_id(db: &PgPool, id: &str) -> Result<TeacherProfile, AppError> {
        let profile_id = Uuid::parse_str(id)
            .map_err(|_| AppError::bad_request(anyhow::anyhow!("Invalid teacher ID")))?;

        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT tp.id, tp.user_id, tp.subjects, tp.bio, tp.price_per_hour, tp.created_at,
                   u.name AS user_name, u.email AS user_email
            FROM teacher_profiles tp
            JOIN users u ON u.id = tp.user_id
            WHERE tp.id = $1
            "#,
        )
        .bind(profile_id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch teacher profile")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Teacher not found")))?;

        let mut ratings = Self::fetch_ratings(db, &[profile_id]).await?;
        Ok(row.into_profile(ratings.remove(&profile_id).unwrap_or_default()))
    }

    /// Appends a rating and returns the full updated list in append order.
    /// The same student may rate the same profile more than once.
    #[instrument(skip(db, rater, dto))]
    pub async fn rate_teacher(
        db: &PgPool,
        rater: &User,
        id: &str,
        dto: RateTeacherDto,
    ) -> Result<Vec<Rating>, AppError> {
        if rater.role != Role::Student {
            return Err(AppError::forbidden(
                "Only students can rate teachers".to_string(),
            ));
        }

        if !(1..=5).contains(&dto.rating) {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Rating must be between 1 and 5"
            )));
        }

        let profile_id = Uuid::parse_str(id)
            .map_err(|_| AppError::bad_request(anyhow::anyhow!("Invalid teacher ID")))?;

        let exists =
            sqlx::query_scalar::<_, Uuid>("SELECT id FROM teacher_profiles WHERE id = $1")
                .bind(profile_id)
                .fetch_optional(db)
                .await
                .context("Failed to check teacher profile")
                .map_err(AppError::database)?;

        if exists.is_none() {
            return Err(AppError::not_found(anyhow::anyhow!("Teacher not found")));
        }

        // Appending a row is atomic, so concurrent raters cannot clobber each
        // other. The FK mapping covers a profile deleted after the check.
        sqlx::query(
            "INSERT INTO ratings (profile_id, student_id, rating, comment)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(profile_id)
        .bind(rater.id)
        .bind(dto.rating)
        .bind(&dto.comment)
        .execute(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_foreign_key_violation() {
                    return AppError::not_found(anyhow::anyhow!("Teacher not found"));
                }
            }
            AppError::database(anyhow::Error::from(e))
        })?;

        let mut ratings = Self::fetch_ratings(db, &[profile_id]).await?;
        Ok(ratings.remove(&profile_id).unwrap_or_default())
    }

    async fn fetch_ratings(
        db: &PgPool,
        profile_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<Rating>>, AppError> {
        if profile_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, RatingRow>(
            "SELECT id, profile_id, student_id, rating, comment, created_at
             FROM ratings
             WHERE profile_id = ANY($1)
             ORDER BY created_at",
        )
        .bind(profile_ids)
        .fetch_all(db)
        .await
        .context("Failed to fetch ratings")
        .map_err(AppError::database)?;

        let mut grouped: HashMap<Uuid, Vec<Rating>> = HashMap::new();
        for row in rows {
            grouped.entry(row.profile_id).or_default().push(row.into());
        }
        Ok(grouped)
    }
}
