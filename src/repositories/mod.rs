pub mod application_repository;
pub mod candidate_repository;
pub mod employer_repository;
pub mod job_repository;
pub mod user_repository;
