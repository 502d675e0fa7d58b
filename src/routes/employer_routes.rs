use crate::{
    auth::auth_extractor::ApiContext,
    controllers::auth_controller::change_password,
    controllers::employer_controller::{
        create_employer, delete_employer, delete_me, get_all_employers, get_employer_by_id, get_me,
        update_employer, update_me,
    },
};
use axum::{
    Router,
    routing::{get, post},
};

pub fn employer_routes() -> Router<ApiContext> {
    Router::new()
        .route(
            "/employers/me",
            get(get_me).put(update_me).delete(delete_me),
        )
        .route("/employers/me/password", post(change_password))
        .route("/employers", get(get_all_employers).post(create_employer))
        .route(
            "/employers/{id}",
            get(get_employer_by_id)
                .put(update_employer)
                .delete(delete_employer),
        )
}
