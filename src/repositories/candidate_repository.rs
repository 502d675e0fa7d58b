use crate::{
    error::{AppError, AppResult},
    models::candidate::Candidate,
};
use sqlx::PgPool;
use time::Date;

const CANDIDATE_COLUMNS: &str =
    "user_id, full_name, date_of_birth, phone_number, resume_url, skills";

pub struct CandidateProfile<'a> {
    pub full_name: &'a str,
    pub date_of_birth: Option<Date>,
    pub phone_number: Option<&'a str>,
    pub resume_url: Option<&'a str>,
    pub skills: Option<&'a str>,
}

pub struct CandidateRepository;

impl CandidateRepository {
    /// Unlike employers there is no upsert: a candidate profile is created
    /// explicitly, and updates fail when no row exists yet.
    pub async fn create(
        pool: &PgPool,
        user_id: i64,
        profile: &CandidateProfile<'_>,
    ) -> AppResult<Candidate> {
        let result = sqlx::query_as::<_, Candidate>(&format!(
            "INSERT INTO candidates
                 (user_id, full_name, date_of_birth, phone_number, resume_url, skills)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {CANDIDATE_COLUMNS}"
        ))
        .bind(user_id)
        .bind(profile.full_name)
        .bind(profile.date_of_birth)
        .bind(profile.phone_number)
        .bind(profile.resume_url)
        .bind(profile.skills)
        .fetch_one(pool)
        .await;

        match result {
            Ok(candidate) => Ok(candidate),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(AppError::Duplicate(
                "Candidate profile already exists".to_string(),
            )),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn update(
        pool: &PgPool,
        user_id: i64,
        profile: &CandidateProfile<'_>,
    ) -> AppResult<Option<Candidate>> {
        let candidate = sqlx::query_as::<_, Candidate>(&format!(
            "UPDATE candidates SET
                 full_name = $2,
                 date_of_birth = $3,
                 phone_number = $4,
                 resume_url = $5,
                 skills = $6
             WHERE user_id = $1
             RETURNING {CANDIDATE_COLUMNS}"
        ))
        .bind(user_id)
        .bind(profile.full_name)
        .bind(profile.date_of_birth)
        .bind(profile.phone_number)
        .bind(profile.resume_url)
        .bind(profile.skills)
        .fetch_optional(pool)
        .await?;
        Ok(candidate)
    }

    pub async fn find_by_user_id(pool: &PgPool, user_id: i64) -> AppResult<Option<Candidate>> {
        let candidate = sqlx::query_as::<_, Candidate>(&format!(
            "SELECT {CANDIDATE_COLUMNS} FROM candidates WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
        Ok(candidate)
    }

    /// Candidate profiles have always been keyed on the user id; this alias
    /// exists for callers holding the legacy name.
    pub async fn find_by_id(pool: &PgPool, id: i64) -> AppResult<Option<Candidate>> {
        Self::find_by_user_id(pool, id).await
    }

    pub async fn get_all(pool: &PgPool) -> AppResult<Vec<Candidate>> {
        let candidates = sqlx::query_as::<_, Candidate>(&format!(
            "SELECT {CANDIDATE_COLUMNS} FROM candidates ORDER BY user_id"
        ))
        .fetch_all(pool)
        .await?;
        Ok(candidates)
    }

    pub async fn delete(pool: &PgPool, user_id: i64) -> AppResult<bool> {
        let deleted = sqlx::query("DELETE FROM candidates WHERE user_id = $1")
            .bind(user_id)
            .execute(pool)
            .await?
            .rows_affected();
        Ok(deleted > 0)
    }
}
