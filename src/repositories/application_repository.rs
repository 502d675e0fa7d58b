use crate::{
    error::AppResult,
    models::application::{
        Application, ApplicationStatus, CandidateApplication, EmployerApplication, JobApplicant,
    },
};
use sqlx::PgPool;

const APPLICATION_COLUMNS: &str =
    "application_id, job_id, candidate_id, cover_letter, status, applied_at";

pub struct ApplicationRepository;

impl ApplicationRepository {
    /// Atomic insert-if-absent: the (job_id, candidate_id) uniqueness
    /// invariant is enforced by the store, so a concurrent double apply
    /// yields exactly one row. Returns `None` when the pair already exists.
    pub async fn create(
        pool: &PgPool,
        job_id: i64,
        candidate_id: i64,
        cover_letter: &str,
    ) -> AppResult<Option<Application>> {
        let application = sqlx::query_as::<_, Application>(&format!(
            "INSERT INTO applications (job_id, candidate_id, cover_letter, status)
             VALUES ($1, $2, $3, 'pending')
             ON CONFLICT (job_id, candidate_id) DO NOTHING
             RETURNING {APPLICATION_COLUMNS}"
        ))
        .bind(job_id)
        .bind(candidate_id)
        .bind(cover_letter)
        .fetch_optional(pool)
        .await?;
        Ok(application)
    }

    pub async fn find_by_id(pool: &PgPool, application_id: i64) -> AppResult<Option<Application>> {
        let application = sqlx::query_as::<_, Application>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications WHERE application_id = $1"
        ))
        .bind(application_id)
        .fetch_optional(pool)
        .await?;
        Ok(application)
    }

    pub async fn find_by_job(pool: &PgPool, job_id: i64) -> AppResult<Vec<JobApplicant>> {
        let applicants = sqlx::query_as::<_, JobApplicant>(
            "SELECT a.application_id, a.job_id, a.candidate_id, a.cover_letter,
                    a.status, a.applied_at,
                    c.full_name, c.phone_number, c.resume_url
             FROM applications a
             JOIN candidates c ON a.candidate_id = c.user_id
             WHERE a.job_id = $1
             ORDER BY a.applied_at DESC",
        )
        .bind(job_id)
        .fetch_all(pool)
        .await?;
        Ok(applicants)
    }

    pub async fn find_by_candidate(
        pool: &PgPool,
        candidate_id: i64,
    ) -> AppResult<Vec<CandidateApplication>> {
        let applications = sqlx::query_as::<_, CandidateApplication>(
            "SELECT a.application_id, a.job_id, a.candidate_id, a.cover_letter,
                    a.status, a.applied_at,
                    j.title, j.description, j.location, j.salary_range,
                    j.status AS job_status
             FROM applications a
             JOIN jobs j ON a.job_id = j.job_id
             WHERE a.candidate_id = $1
             ORDER BY a.applied_at DESC",
        )
        .bind(candidate_id)
        .fetch_all(pool)
        .await?;
        Ok(applications)
    }

    pub async fn find_by_employer(
        pool: &PgPool,
        employer_id: i64,
    ) -> AppResult<Vec<EmployerApplication>> {
        let applications = sqlx::query_as::<_, EmployerApplication>(
            "SELECT a.application_id, a.job_id, a.candidate_id, a.cover_letter,
                    a.status, a.applied_at,
                    j.title AS job_title,
                    c.full_name, c.phone_number, c.resume_url
             FROM applications a
             JOIN jobs j ON a.job_id = j.job_id
             JOIN candidates c ON a.candidate_id = c.user_id
             WHERE j.employer_id = $1
             ORDER BY a.applied_at DESC",
        )
        .bind(employer_id)
        .fetch_all(pool)
        .await?;
        Ok(applications)
    }

    /// Unconditional status write, admin only.
    pub async fn update_status(
        pool: &PgPool,
        application_id: i64,
        status: ApplicationStatus,
    ) -> AppResult<bool> {
        let updated = sqlx::query("UPDATE applications SET status = $2 WHERE application_id = $1")
            .bind(application_id)
            .bind(status)
            .execute(pool)
            .await?
            .rows_affected();
        Ok(updated > 0)
    }

    /// Conditional status write for employers: only a pending application
    /// may be decided, checked in the same statement.
    pub async fn update_status_from_pending(
        pool: &PgPool,
        application_id: i64,
        status: ApplicationStatus,
    ) -> AppResult<bool> {
        let updated = sqlx::query(
            "UPDATE applications SET status = $2
             WHERE application_id = $1 AND status = 'pending'",
        )
        .bind(application_id)
        .bind(status)
        .execute(pool)
        .await?
        .rows_affected();
        Ok(updated > 0)
    }

    pub async fn delete(pool: &PgPool, application_id: i64) -> AppResult<bool> {
        let deleted = sqlx::query("DELETE FROM applications WHERE application_id = $1")
            .bind(application_id)
            .execute(pool)
            .await?
            .rows_affected();
        Ok(deleted > 0)
    }
}
