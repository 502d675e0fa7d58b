use crate::{
    error::{AppError, AppResult},
    models::user::{Role, User},
};
use sqlx::{FromRow, PgPool};

const USER_COLUMNS: &str = "user_id, username, email, role, created_at";

#[derive(FromRow)]
struct UserWithPassword {
    user_id: i64,
    username: String,
    email: String,
    role: Role,
    created_at: time::OffsetDateTime,
    password_hash: String,
}

impl From<UserWithPassword> for (User, String) {
    fn from(row: UserWithPassword) -> Self {
        (
            User {
                user_id: row.user_id,
                username: row.username,
                email: row.email,
                role: row.role,
                created_at: row.created_at,
            },
            row.password_hash,
        )
    }
}

pub struct UserRepository;

impl UserRepository {
    pub async fn create_user(
        pool: &PgPool,
        username: &str,
        password_hash: &str,
        email: &str,
        role: Role,
    ) -> AppResult<User> {
        let result = sqlx::query_as::<_, User>(
            "INSERT INTO users (username, password_hash, email, role)
             VALUES ($1, $2, $3, $4)
             RETURNING user_id, username, email, role, created_at",
        )
        .bind(username)
        .bind(password_hash)
        .bind(email)
        .bind(role)
        .fetch_one(pool)
        .await;

        match result {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(AppError::Duplicate("Username already taken".to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn get_user_by_id(pool: &PgPool, user_id: i64) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
        Ok(user)
    }

    pub async fn get_user_by_username(pool: &PgPool, username: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(pool)
        .await?;
        Ok(user)
    }

    pub async fn get_user_with_password(
        pool: &PgPool,
        username: &str,
    ) -> AppResult<Option<(User, String)>> {
        let row = sqlx::query_as::<_, UserWithPassword>(
            "SELECT user_id, username, email, role, created_at, password_hash
             FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(Into::into))
    }

    pub async fn get_user_with_password_by_id(
        pool: &PgPool,
        user_id: i64,
    ) -> AppResult<Option<(User, String)>> {
        let row = sqlx::query_as::<_, UserWithPassword>(
            "SELECT user_id, username, email, role, created_at, password_hash
             FROM users WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(Into::into))
    }

    pub async fn get_all_users(pool: &PgPool) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC"
        ))
        .fetch_all(pool)
        .await?;
        Ok(users)
    }

    pub async fn update_user(
        pool: &PgPool,
        user_id: i64,
        username: &str,
        email: &str,
    ) -> AppResult<Option<User>> {
        let result = sqlx::query_as::<_, User>(
            "UPDATE users SET username = $2, email = $3
             WHERE user_id = $1
             RETURNING user_id, username, email, role, created_at",
        )
        .bind(user_id)
        .bind(username)
        .bind(email)
        .fetch_optional(pool)
        .await;

        match result {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(AppError::Duplicate("Username already taken".to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn update_password(pool: &PgPool, user_id: i64, password_hash: &str) -> AppResult<()> {
        sqlx::query("UPDATE users SET password_hash = $2 WHERE user_id = $1")
            .bind(user_id)
            .bind(password_hash)
            .execute(pool)
            .await?;
        Ok(())
    }

    pub async fn username_exists(pool: &PgPool, username: &str) -> AppResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)",
        )
        .bind(username)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }

    /// Deletes a user and everything hanging off them in one transaction:
    /// their own applications, applications under their jobs, their jobs,
    /// and both profile rows. The store has no cascade guarantee for jobs
    /// and applications, so each step is explicit.
    pub async fn delete_user(pool: &PgPool, user_id: i64) -> AppResult<bool> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM applications WHERE candidate_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            "DELETE FROM applications
             WHERE job_id IN (SELECT job_id FROM jobs WHERE employer_id = $1)",
        )
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM jobs WHERE employer_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM candidates WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM employers WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        let deleted = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        Ok(deleted > 0)
    }
}
