use crate::{
    auth::auth_extractor::ApiContext,
    controllers::application_controller::{
        create_application, delete_application, get_applications_by_candidate,
        get_applications_by_job, get_my_applications, update_application_status,
    },
};
use axum::{
    Router,
    routing::{delete, get, post, put},
};

pub fn application_routes() -> Router<ApiContext> {
    Router::new()
        .route("/applications", post(create_application))
        .route("/applications/me", get(get_my_applications))
        .route("/applications/job/{job_id}", get(get_applications_by_job))
        .route(
            "/applications/candidate/{candidate_id}",
            get(get_applications_by_candidate),
        )
        .route(
            "/applications/{application_id}/status",
            put(update_application_status),
        )
        .route("/applications/{application_id}", delete(delete_application))
}
