use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{LoginRequest, LoginResponse, RegisterRequestDto};
use crate::modules::teachers::model::{
    CreateProfileDto, RateTeacherDto, Rating, TeacherProfile, TeacherUserInfo,
};
use crate::modules::users::model::{Role, User};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::delete_user,
        crate::modules::teachers::controller::test_route,
        crate::modules::teachers::controller::create_teacher_profile,
        crate::modules::teachers::controller::get_teachers,
        crate::modules::teachers::controller::get_teacher,
        crate::modules::teachers::controller::rate_teacher,
    ),
    components(
        schemas(
            User,
            Role,
            RegisterRequestDto,
            LoginRequest,
            LoginResponse,
            ErrorResponse,
            TeacherProfile,
            TeacherUserInfo,
            Rating,
            CreateProfileDto,
            RateTeacherDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login, and account deletion"),
        (name = "Teachers", description = "Teacher profiles, search, and ratings")
    ),
    info(
        title = "Proffinder API",
        version = "0.1.0",
        description = "A tutor-matching REST API built with Rust, Axum, and PostgreSQL featuring JWT-based authentication.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
