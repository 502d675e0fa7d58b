use crate::{
    error::AppResult,
    models::job::{Job, JobStatus},
};
use sqlx::PgPool;

const JOB_COLUMNS: &str = "job_id, employer_id, title, description, requirements, location, \
                           salary_range, status, created_at";

pub struct JobFields<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub requirements: Option<&'a str>,
    pub location: Option<&'a str>,
    pub salary_range: Option<&'a str>,
    pub status: JobStatus,
}

/// Escapes LIKE metacharacters and wraps the term for substring matching.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

pub struct JobRepository;

impl JobRepository {
    pub async fn create(pool: &PgPool, employer_id: i64, fields: &JobFields<'_>) -> AppResult<Job> {
        let job = sqlx::query_as::<_, Job>(&format!(
            "INSERT INTO jobs
                 (employer_id, title, description, requirements, location, salary_range, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {JOB_COLUMNS}"
        ))
        .bind(employer_id)
        .bind(fields.title)
        .bind(fields.description)
        .bind(fields.requirements)
        .bind(fields.location)
        .bind(fields.salary_range)
        .bind(fields.status)
        .fetch_one(pool)
        .await?;
        Ok(job)
    }

    pub async fn find_by_id(pool: &PgPool, job_id: i64) -> AppResult<Option<Job>> {
        let job = sqlx::query_as::<_, Job>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE job_id = $1"
        ))
        .bind(job_id)
        .fetch_optional(pool)
        .await?;
        Ok(job)
    }

    pub async fn find_by_employer(pool: &PgPool, employer_id: i64) -> AppResult<Vec<Job>> {
        let jobs = sqlx::query_as::<_, Job>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE employer_id = $1 ORDER BY created_at DESC"
        ))
        .bind(employer_id)
        .fetch_all(pool)
        .await?;
        Ok(jobs)
    }

    pub async fn get_all(pool: &PgPool) -> AppResult<Vec<Job>> {
        let jobs = sqlx::query_as::<_, Job>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs ORDER BY created_at DESC"
        ))
        .fetch_all(pool)
        .await?;
        Ok(jobs)
    }

    pub async fn get_open(pool: &PgPool) -> AppResult<Vec<Job>> {
        let jobs = sqlx::query_as::<_, Job>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE status = 'open' ORDER BY created_at DESC"
        ))
        .fetch_all(pool)
        .await?;
        Ok(jobs)
    }

    /// Keyword matches title, description and requirements; location matches
    /// the location column. Both are case-insensitive substring matches and
    /// the scope is always open jobs.
    pub async fn search(
        pool: &PgPool,
        keyword: Option<&str>,
        location: Option<&str>,
    ) -> AppResult<Vec<Job>> {
        let keyword_pattern = keyword.map(like_pattern);
        let location_pattern = location.map(like_pattern);

        let jobs = sqlx::query_as::<_, Job>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs
             WHERE status = 'open'
               AND ($1::text IS NULL
                    OR title ILIKE $1
                    OR description ILIKE $1
                    OR requirements ILIKE $1)
               AND ($2::text IS NULL OR location ILIKE $2)
             ORDER BY created_at DESC"
        ))
        .bind(keyword_pattern)
        .bind(location_pattern)
        .fetch_all(pool)
        .await?;
        Ok(jobs)
    }

    /// Unconditional update, admin only.
    pub async fn update(
        pool: &PgPool,
        job_id: i64,
        fields: &JobFields<'_>,
    ) -> AppResult<Option<Job>> {
        let job = sqlx::query_as::<_, Job>(&format!(
            "UPDATE jobs SET
                 title = $2, description = $3, requirements = $4,
                 location = $5, salary_range = $6, status = $7
             WHERE job_id = $1
             RETURNING {JOB_COLUMNS}"
        ))
        .bind(job_id)
        .bind(fields.title)
        .bind(fields.description)
        .bind(fields.requirements)
        .bind(fields.location)
        .bind(fields.salary_range)
        .bind(fields.status)
        .fetch_optional(pool)
        .await?;
        Ok(job)
    }

    /// Conditional update: only touches the row when the employer still owns
    /// it, so an ownership check cannot be raced between read and write.
    pub async fn update_owned(
        pool: &PgPool,
        job_id: i64,
        employer_id: i64,
        fields: &JobFields<'_>,
    ) -> AppResult<Option<Job>> {
        let job = sqlx::query_as::<_, Job>(&format!(
            "UPDATE jobs SET
                 title = $3, description = $4, requirements = $5,
                 location = $6, salary_range = $7, status = $8
             WHERE job_id = $1 AND employer_id = $2
             RETURNING {JOB_COLUMNS}"
        ))
        .bind(job_id)
        .bind(employer_id)
        .bind(fields.title)
        .bind(fields.description)
        .bind(fields.requirements)
        .bind(fields.location)
        .bind(fields.salary_range)
        .bind(fields.status)
        .fetch_optional(pool)
        .await?;
        Ok(job)
    }

    /// Deletes a job and its applications together.
    pub async fn delete(pool: &PgPool, job_id: i64) -> AppResult<bool> {
        Self::delete_where(pool, job_id, None).await
    }

    pub async fn delete_owned(pool: &PgPool, job_id: i64, employer_id: i64) -> AppResult<bool> {
        Self::delete_where(pool, job_id, Some(employer_id)).await
    }

    async fn delete_where(
        pool: &PgPool,
        job_id: i64,
        employer_id: Option<i64>,
    ) -> AppResult<bool> {
        let mut tx = pool.begin().await?;

        let deleted = sqlx::query(
            "DELETE FROM jobs
             WHERE job_id = $1 AND ($2::bigint IS NULL OR employer_id = $2)",
        )
        .bind(job_id)
        .bind(employer_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if deleted > 0 {
            sqlx::query("DELETE FROM applications WHERE job_id = $1")
                .bind(job_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_wraps_and_escapes() {
        assert_eq!(like_pattern("rust"), "%rust%");
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("c:\\dir"), "%c:\\\\dir%");
        assert_eq!(like_pattern(""), "%%");
    }
}
