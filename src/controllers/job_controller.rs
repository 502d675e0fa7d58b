use crate::{
    auth::auth_extractor::{ApiContext, AuthUser, RequireRole},
    error::{AppError, AppResult},
    models::{
        job::{Job, JobStatus},
        user::Role,
    },
    repositories::job_repository::{JobFields, JobRepository},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Debug, Deserialize)]
pub struct JobRequest {
    pub title: String,
    pub description: String,
    pub requirements: Option<String>,
    pub location: Option<String>,
    pub salary_range: Option<String>,
    #[serde(default = "default_status")]
    pub status: JobStatus,
    /// Only honored for admins; employers always post under their own id.
    pub employer_id: Option<i64>,
}

fn default_status() -> JobStatus {
    JobStatus::Open
}

impl JobRequest {
    fn validate(&self) -> AppResult<()> {
        if self.title.is_empty() || self.description.is_empty() {
            return Err(AppError::Validation(
                "title and description required".to_string(),
            ));
        }
        Ok(())
    }

    fn as_fields(&self) -> JobFields<'_> {
        JobFields {
            title: &self.title,
            description: &self.description,
            requirements: self.requirements.as_deref(),
            location: self.location.as_deref(),
            salary_range: self.salary_range.as_deref(),
            status: self.status,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MyJobsQuery {
    pub employer_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub keyword: Option<String>,
    pub location: Option<String>,
}

pub async fn create_job(
    auth_user: AuthUser,
    State(ctx): State<ApiContext>,
    Json(data): Json<JobRequest>,
) -> AppResult<(StatusCode, Json<Value>)> {
    RequireRole::employer().check(&auth_user)?;
    data.validate()?;

    let employer_id = match (auth_user.role, data.employer_id) {
        (Role::Admin, Some(id)) => id,
        _ => auth_user.resolve_id(&ctx).await?,
    };

    let job = JobRepository::create(&ctx.db, employer_id, &data.as_fields()).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Job created", "job": job })),
    ))
}

pub async fn get_job_by_id(
    auth_user: AuthUser,
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
) -> AppResult<Json<Job>> {
    RequireRole::employer().check(&auth_user)?;

    let job = JobRepository::find_by_id(&ctx.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;

    if auth_user.role != Role::Admin {
        let user_id = auth_user.resolve_id(&ctx).await?;
        if job.employer_id != user_id {
            return Err(AppError::Forbidden("not your job".to_string()));
        }
    }

    Ok(Json(job))
}

pub async fn update_job(
    auth_user: AuthUser,
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
    Json(data): Json<JobRequest>,
) -> AppResult<Json<Value>> {
    RequireRole::employer().check(&auth_user)?;
    data.validate()?;

    let job = JobRepository::find_by_id(&ctx.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;

    let updated = if auth_user.role == Role::Admin {
        JobRepository::update(&ctx.db, id, &data.as_fields()).await?
    } else {
        let user_id = auth_user.resolve_id(&ctx).await?;
        if job.employer_id != user_id {
            return Err(AppError::Forbidden("not your job".to_string()));
        }
        // Ownership is re-checked inside the statement.
        JobRepository::update_owned(&ctx.db, id, user_id, &data.as_fields()).await?
    };

    let job = updated.ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;

    Ok(Json(json!({ "message": "Job updated", "job": job })))
}

pub async fn delete_job(
    auth_user: AuthUser,
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
) -> AppResult<Json<Value>> {
    RequireRole::employer().check(&auth_user)?;

    let job = JobRepository::find_by_id(&ctx.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;

    let deleted = if auth_user.role == Role::Admin {
        JobRepository::delete(&ctx.db, id).await?
    } else {
        let user_id = auth_user.resolve_id(&ctx).await?;
        if job.employer_id != user_id {
            return Err(AppError::Forbidden("not your job".to_string()));
        }
        JobRepository::delete_owned(&ctx.db, id, user_id).await?
    };

    if !deleted {
        return Err(AppError::NotFound("Job not found".to_string()));
    }

    Ok(Json(json!({ "message": "Job deleted" })))
}

/// Admin sees every job, an employer only their own. Candidates are turned
/// away by the role gate.
pub async fn get_all_jobs(
    auth_user: AuthUser,
    State(ctx): State<ApiContext>,
) -> AppResult<Json<Vec<Job>>> {
    RequireRole::employer().check(&auth_user)?;

    let jobs = if auth_user.role == Role::Admin {
        JobRepository::get_all(&ctx.db).await?
    } else {
        let user_id = auth_user.resolve_id(&ctx).await?;
        JobRepository::find_by_employer(&ctx.db, user_id).await?
    };

    Ok(Json(jobs))
}

pub async fn get_my_jobs(
    auth_user: AuthUser,
    State(ctx): State<ApiContext>,
    Query(query): Query<MyJobsQuery>,
) -> AppResult<Json<Vec<Job>>> {
    RequireRole::employer().check(&auth_user)?;

    let jobs = if auth_user.role == Role::Admin {
        match query.employer_id {
            Some(employer_id) => JobRepository::find_by_employer(&ctx.db, employer_id).await?,
            None => JobRepository::get_all(&ctx.db).await?,
        }
    } else {
        let user_id = auth_user.resolve_id(&ctx).await?;
        JobRepository::find_by_employer(&ctx.db, user_id).await?
    };

    Ok(Json(jobs))
}

pub async fn get_open_jobs(
    auth_user: AuthUser,
    State(ctx): State<ApiContext>,
) -> AppResult<Json<Vec<Job>>> {
    RequireRole::candidate().check(&auth_user)?;

    let jobs = JobRepository::get_open(&ctx.db).await?;
    Ok(Json(jobs))
}

pub async fn search_jobs(
    auth_user: AuthUser,
    State(ctx): State<ApiContext>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<Job>>> {
    RequireRole::any().check(&auth_user)?;

    let keyword = query.keyword.as_deref().filter(|k| !k.is_empty());
    let location = query.location.as_deref().filter(|l| !l.is_empty());

    let jobs = JobRepository::search(&ctx.db, keyword, location).await?;
    Ok(Json(jobs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_request_requires_title_and_description() {
        let req: JobRequest =
            serde_json::from_str(r#"{"title":"","description":"build things"}"#).unwrap();
        assert!(req.validate().is_err());

        let req: JobRequest =
            serde_json::from_str(r#"{"title":"Backend Engineer","description":""}"#).unwrap();
        assert!(req.validate().is_err());

        let req: JobRequest =
            serde_json::from_str(r#"{"title":"Backend Engineer","description":"build things"}"#)
                .unwrap();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn job_request_defaults_to_open() {
        let req: JobRequest =
            serde_json::from_str(r#"{"title":"Backend Engineer","description":"..."}"#).unwrap();
        assert_eq!(req.status, JobStatus::Open);

        let req: JobRequest = serde_json::from_str(
            r#"{"title":"Backend Engineer","description":"...","status":"closed"}"#,
        )
        .unwrap();
        assert_eq!(req.status, JobStatus::Closed);
    }
}
