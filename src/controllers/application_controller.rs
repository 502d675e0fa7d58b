use crate::{
    auth::auth_extractor::{ApiContext, AuthUser, RequireRole},
    error::{AppError, AppResult},
    models::{
        application::{Application, ApplicationStatus},
        job::JobStatus,
        user::Role,
    },
    repositories::{
        application_repository::ApplicationRepository, candidate_repository::CandidateRepository,
        job_repository::JobRepository,
    },
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Debug, Deserialize)]
pub struct CreateApplicationRequest {
    pub job_id: i64,
    /// Only honored for admins applying on a candidate's behalf.
    pub candidate_id: Option<i64>,
    #[serde(default)]
    pub cover_letter: String,
}

#[derive(Debug, Deserialize)]
pub struct ApplyRequest {
    #[serde(default)]
    pub cover_letter: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Shared application path: the job must exist and be open, the candidate
/// profile must exist, and the (job, candidate) pair must be new. The last
/// check is atomic in the store, so a concurrent double apply cannot slip
/// through.
async fn submit_application(
    ctx: &ApiContext,
    job_id: i64,
    candidate_id: i64,
    cover_letter: &str,
) -> AppResult<Application> {
    let job = JobRepository::find_by_id(&ctx.db, job_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;

    if job.status != JobStatus::Open {
        return Err(AppError::JobNotOpen);
    }

    if CandidateRepository::find_by_user_id(&ctx.db, candidate_id)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound(
            "Candidate profile not found".to_string(),
        ));
    }

    ApplicationRepository::create(&ctx.db, job_id, candidate_id, cover_letter)
        .await?
        .ok_or_else(|| AppError::Duplicate("You have already applied to this job".to_string()))
}

pub async fn create_application(
    auth_user: AuthUser,
    State(ctx): State<ApiContext>,
    Json(data): Json<CreateApplicationRequest>,
) -> AppResult<(StatusCode, Json<Value>)> {
    RequireRole::candidate().check(&auth_user)?;

    let candidate_id = match (auth_user.role, data.candidate_id) {
        (Role::Admin, Some(id)) => id,
        (Role::Admin, None) => {
            return Err(AppError::Validation(
                "job_id and candidate_id are required".to_string(),
            ));
        }
        // Candidates always apply as themselves.
        _ => auth_user.resolve_id(&ctx).await?,
    };

    let application = submit_application(&ctx, data.job_id, candidate_id, &data.cover_letter).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Application submitted successfully",
            "application": application,
        })),
    ))
}

pub async fn apply_to_job(
    auth_user: AuthUser,
    State(ctx): State<ApiContext>,
    Path(job_id): Path<i64>,
    Json(data): Json<ApplyRequest>,
) -> AppResult<(StatusCode, Json<Value>)> {
    RequireRole::candidate().check(&auth_user)?;

    let candidate_id = auth_user.resolve_id(&ctx).await?;

    let application = submit_application(&ctx, job_id, candidate_id, &data.cover_letter).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Application submitted",
            "application": application,
        })),
    ))
}

pub async fn get_applications_by_job(
    auth_user: AuthUser,
    State(ctx): State<ApiContext>,
    Path(job_id): Path<i64>,
) -> AppResult<Json<Value>> {
    RequireRole::employer().check(&auth_user)?;

    let job = JobRepository::find_by_id(&ctx.db, job_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;

    if auth_user.role != Role::Admin {
        let user_id = auth_user.resolve_id(&ctx).await?;
        if job.employer_id != user_id {
            return Err(AppError::Forbidden("not your job".to_string()));
        }
    }

    let applications = ApplicationRepository::find_by_job(&ctx.db, job_id).await?;

    Ok(Json(json!({
        "count": applications.len(),
        "applications": applications,
    })))
}

pub async fn get_applications_by_candidate(
    auth_user: AuthUser,
    State(ctx): State<ApiContext>,
    Path(candidate_id): Path<i64>,
) -> AppResult<Json<Value>> {
    RequireRole::candidate().check(&auth_user)?;

    if auth_user.role != Role::Admin {
        let user_id = auth_user.resolve_id(&ctx).await?;
        if candidate_id != user_id {
            return Err(AppError::Forbidden("not your applications".to_string()));
        }
    }

    let applications = ApplicationRepository::find_by_candidate(&ctx.db, candidate_id).await?;

    Ok(Json(json!({
        "count": applications.len(),
        "applications": applications,
    })))
}

/// All applications across the acting employer's jobs.
pub async fn get_my_applications(
    auth_user: AuthUser,
    State(ctx): State<ApiContext>,
) -> AppResult<Json<Value>> {
    RequireRole::employer().check(&auth_user)?;

    let employer_id = auth_user.resolve_id(&ctx).await?;

    let applications = ApplicationRepository::find_by_employer(&ctx.db, employer_id).await?;

    Ok(Json(json!({
        "count": applications.len(),
        "applications": applications,
    })))
}

pub async fn update_application_status(
    auth_user: AuthUser,
    State(ctx): State<ApiContext>,
    Path(application_id): Path<i64>,
    Json(data): Json<UpdateStatusRequest>,
) -> AppResult<Json<Value>> {
    RequireRole::employer().check(&auth_user)?;

    let status = ApplicationStatus::parse(&data.status).ok_or_else(|| {
        AppError::Validation(
            "Invalid status. Must be one of: pending, rejected, accepted".to_string(),
        )
    })?;

    let application = ApplicationRepository::find_by_id(&ctx.db, application_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Application not found".to_string()))?;

    if auth_user.role == Role::Admin {
        // Admins may set any status, including resetting to pending.
        if !ApplicationRepository::update_status(&ctx.db, application_id, status).await? {
            return Err(AppError::NotFound("Application not found".to_string()));
        }
    } else {
        let user_id = auth_user.resolve_id(&ctx).await?;

        let job = JobRepository::find_by_id(&ctx.db, application.job_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;

        if job.employer_id != user_id {
            return Err(AppError::Forbidden("not your job".to_string()));
        }

        if !ApplicationStatus::employer_may_transition(application.status, status) {
            return Err(AppError::Validation(
                "Only pending applications can be accepted or rejected".to_string(),
            ));
        }

        // The pending precondition is re-checked inside the statement.
        if !ApplicationRepository::update_status_from_pending(&ctx.db, application_id, status)
            .await?
        {
            return Err(AppError::Validation(
                "Only pending applications can be accepted or rejected".to_string(),
            ));
        }
    }

    Ok(Json(json!({
        "message": "Application status updated successfully",
        "status": status,
    })))
}

/// Withdrawal or removal: permitted for the candidate who applied, the
/// employer owning the parent job, or an admin.
pub async fn delete_application(
    auth_user: AuthUser,
    State(ctx): State<ApiContext>,
    Path(application_id): Path<i64>,
) -> AppResult<Json<Value>> {
    RequireRole::any().check(&auth_user)?;

    let application = ApplicationRepository::find_by_id(&ctx.db, application_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Application not found".to_string()))?;

    match auth_user.role {
        Role::Admin => {}
        Role::Candidate => {
            let user_id = auth_user.resolve_id(&ctx).await?;
            if application.candidate_id != user_id {
                return Err(AppError::Forbidden("not your application".to_string()));
            }
        }
        Role::Employer => {
            let user_id = auth_user.resolve_id(&ctx).await?;
            let owns_job = JobRepository::find_by_id(&ctx.db, application.job_id)
                .await?
                .is_some_and(|job| job.employer_id == user_id);
            if !owns_job {
                return Err(AppError::Forbidden("not your job".to_string()));
            }
        }
    }

    if !ApplicationRepository::delete(&ctx.db, application_id).await? {
        return Err(AppError::NotFound("Application not found".to_string()));
    }

    Ok(Json(json!({ "message": "Application deleted successfully" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_defaults_cover_letter_to_empty() {
        let req: CreateApplicationRequest = serde_json::from_str(r#"{"job_id":5}"#).unwrap();

        assert_eq!(req.job_id, 5);
        assert_eq!(req.candidate_id, None);
        assert_eq!(req.cover_letter, "");
    }

    #[test]
    fn status_request_is_plain_string_until_validated() {
        let req: UpdateStatusRequest =
            serde_json::from_str(r#"{"status":"shortlisted"}"#).unwrap();

        assert!(ApplicationStatus::parse(&req.status).is_none());
    }
}
