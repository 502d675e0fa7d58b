use crate::{
    auth::auth_extractor::ApiContext,
    controllers::auth_controller::{get_current_user, login, logout, register, update_current_user},
    controllers::user_controller::{delete_user, get_all_users},
};
use axum::{
    Router,
    routing::{delete, get, post},
};

pub fn auth_routes() -> Router<ApiContext> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/me", get(get_current_user).put(update_current_user))
        .route("/", get(get_all_users))
        .route("/users/{id}", delete(delete_user))
}
