pub mod application_routes;
pub mod auth_routes;
pub mod candidate_routes;
pub mod employer_routes;
pub mod job_routes;

use crate::auth::auth_extractor::ApiContext;
use axum::Router;

/// Everything the API exposes, mounted by main under `/api`.
pub fn api_routes() -> Router<ApiContext> {
    Router::new()
        .merge(auth_routes::auth_routes())
        .merge(employer_routes::employer_routes())
        .merge(candidate_routes::candidate_routes())
        .merge(job_routes::job_routes())
        .merge(application_routes::application_routes())
}
