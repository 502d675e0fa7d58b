use crate::{error::AppResult, models::employer::Employer};
use sqlx::PgPool;

const EMPLOYER_COLUMNS: &str = "user_id, employer_name, company_name, company_address, \
                                company_website, email, contact_number";

pub struct EmployerProfile<'a> {
    pub employer_name: &'a str,
    pub company_name: &'a str,
    pub company_address: Option<&'a str>,
    pub company_website: Option<&'a str>,
    pub email: &'a str,
    pub contact_number: Option<&'a str>,
}

pub struct EmployerRepository;

impl EmployerRepository {
    /// Update-or-create in a single statement, keyed on the owning user.
    pub async fn upsert(
        pool: &PgPool,
        user_id: i64,
        profile: &EmployerProfile<'_>,
    ) -> AppResult<Employer> {
        let employer = sqlx::query_as::<_, Employer>(&format!(
            "INSERT INTO employers
                 (user_id, employer_name, company_name, company_address,
                  company_website, email, contact_number)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             ON CONFLICT (user_id) DO UPDATE SET
                 employer_name = EXCLUDED.employer_name,
                 company_name = EXCLUDED.company_name,
                 company_address = EXCLUDED.company_address,
                 company_website = EXCLUDED.company_website,
                 email = EXCLUDED.email,
                 contact_number = EXCLUDED.contact_number
             RETURNING {EMPLOYER_COLUMNS}"
        ))
        .bind(user_id)
        .bind(profile.employer_name)
        .bind(profile.company_name)
        .bind(profile.company_address)
        .bind(profile.company_website)
        .bind(profile.email)
        .bind(profile.contact_number)
        .fetch_one(pool)
        .await?;
        Ok(employer)
    }

    /// Update-only path used by the admin CRUD; `None` when no profile row
    /// exists for the id.
    pub async fn update(
        pool: &PgPool,
        user_id: i64,
        profile: &EmployerProfile<'_>,
    ) -> AppResult<Option<Employer>> {
        let employer = sqlx::query_as::<_, Employer>(&format!(
            "UPDATE employers SET
                 employer_name = $2,
                 company_name = $3,
                 company_address = $4,
                 company_website = $5,
                 email = $6,
                 contact_number = $7
             WHERE user_id = $1
             RETURNING {EMPLOYER_COLUMNS}"
        ))
        .bind(user_id)
        .bind(profile.employer_name)
        .bind(profile.company_name)
        .bind(profile.company_address)
        .bind(profile.company_website)
        .bind(profile.email)
        .bind(profile.contact_number)
        .fetch_optional(pool)
        .await?;
        Ok(employer)
    }

    pub async fn find_by_user_id(pool: &PgPool, user_id: i64) -> AppResult<Option<Employer>> {
        let employer = sqlx::query_as::<_, Employer>(&format!(
            "SELECT {EMPLOYER_COLUMNS} FROM employers WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
        Ok(employer)
    }

    /// Legacy accessor: older callers hold a free-standing profile id, which
    /// in this schema is the same column as the user id.
    pub async fn find_by_id(pool: &PgPool, id: i64) -> AppResult<Option<Employer>> {
        Self::find_by_user_id(pool, id).await
    }

    pub async fn get_all(pool: &PgPool) -> AppResult<Vec<Employer>> {
        let employers = sqlx::query_as::<_, Employer>(&format!(
            "SELECT {EMPLOYER_COLUMNS} FROM employers ORDER BY user_id"
        ))
        .fetch_all(pool)
        .await?;
        Ok(employers)
    }

    pub async fn delete(pool: &PgPool, user_id: i64) -> AppResult<bool> {
        let deleted = sqlx::query("DELETE FROM employers WHERE user_id = $1")
            .bind(user_id)
            .execute(pool)
            .await?
            .rows_affected();
        Ok(deleted > 0)
    }
}
