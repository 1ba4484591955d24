use axum::{
    Router, middleware,
    routing::{delete, post},
};

use crate::middleware::role::require_admin;
use crate::state::AppState;

use super::controller::{delete_user, login_user, register_user};

pub fn init_auth_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/register", post(register_user))
        .route("/login", post(login_user))
        // The original surface left deletion ungated; it is admin-only here.
        .merge(
            Router::new()
                .route("/delete/{id}", delete(delete_user))
                .route_layer(middleware::from_fn_with_state(state, require_admin)),
        )
}
