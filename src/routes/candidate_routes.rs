use crate::{
    auth::auth_extractor::ApiContext,
    controllers::auth_controller::change_password,
    controllers::candidate_controller::{
        create_candidate, delete_candidate, delete_me, get_all_candidates, get_candidate_by_id,
        get_me, update_candidate, update_me,
    },
};
use axum::{
    Router,
    routing::{get, post},
};

pub fn candidate_routes() -> Router<ApiContext> {
    Router::new()
        .route(
            "/candidates/me",
            get(get_me).put(update_me).delete(delete_me),
        )
        .route("/candidates/me/password", post(change_password))
        .route("/candidates", get(get_all_candidates).post(create_candidate))
        .route(
            "/candidates/{id}",
            get(get_candidate_by_id)
                .put(update_candidate)
                .delete(delete_candidate),
        )
}
