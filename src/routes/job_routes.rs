use crate::{
    auth::auth_extractor::ApiContext,
    controllers::application_controller::apply_to_job,
    controllers::job_controller::{
        create_job, delete_job, get_all_jobs, get_job_by_id, get_my_jobs, get_open_jobs,
        search_jobs, update_job,
    },
};
use axum::{
    Router,
    routing::{get, post},
};

pub fn job_routes() -> Router<ApiContext> {
    Router::new()
        .route("/jobs/me", get(get_my_jobs))
        .route("/jobs/open", get(get_open_jobs))
        .route("/jobs/search", get(search_jobs))
        .route("/jobs", get(get_all_jobs).post(create_job))
        .route(
            "/jobs/{id}",
            get(get_job_by_id).put(update_job).delete(delete_job),
        )
        .route("/jobs/{id}/apply", post(apply_to_job))
}
