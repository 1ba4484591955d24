use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::middleware::role::{require_student, require_student_or_admin, require_teacher};
use crate::state::AppState;

use super::controller::{
    create_teacher_profile, get_teacher, get_teachers, rate_teacher, test_route,
};

pub fn init_teachers_router(state: AppState) -> Router<AppState> {
    // GET /{id} is open to any authenticated role; the CurrentUser extractor
    // in the handler does the authentication there.
    Router::new()
        .route("/test", get(test_route))
        .route("/{id}", get(get_teacher))
        .merge(
            Router::new()
                .route("/", post(create_teacher_profile))
                .route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    require_teacher,
                )),
        )
        .merge(
            Router::new()
                .route("/", get(get_teachers))
                .route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    require_student_or_admin,
                )),
        )
        .merge(
            Router::new()
                .route("/{id}/rate", post(rate_teacher))
                .route_layer(middleware::from_fn_with_state(state, require_student)),
        )
}
