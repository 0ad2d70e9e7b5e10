pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::randomuser::handlers;
use crate::state::AppState;
use crate::users::handlers::handle_create_user;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/ping", get(health::ping_handler))
        .route("/random-person", get(handlers::handle_random_person))
        .route("/random-address", get(handlers::handle_random_address))
        .route("/random-login", get(handlers::handle_random_login))
        .route("/users", post(handle_create_user))
        .with_state(state)
}
