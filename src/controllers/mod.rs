pub mod application_controller;
pub mod auth_controller;
pub mod candidate_controller;
pub mod employer_controller;
pub mod job_controller;
pub mod user_controller;
