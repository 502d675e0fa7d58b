use crate::{
    auth::auth_extractor::{ApiContext, AuthUser, RequireRole},
    error::{AppError, AppResult},
    models::candidate::Candidate,
    repositories::candidate_repository::{CandidateProfile, CandidateRepository},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::{Value, json};
use time::Date;

#[derive(Debug, Deserialize)]
pub struct CandidateProfileRequest {
    pub full_name: String,
    pub date_of_birth: Option<Date>,
    pub phone_number: Option<String>,
    pub resume_url: Option<String>,
    pub skills: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCandidateRequest {
    pub user_id: i64,
    #[serde(flatten)]
    pub profile: CandidateProfileRequest,
}

impl CandidateProfileRequest {
    fn validate(&self) -> AppResult<()> {
        if self.full_name.is_empty() {
            return Err(AppError::Validation("full_name required".to_string()));
        }
        Ok(())
    }

    fn as_fields(&self) -> CandidateProfile<'_> {
        CandidateProfile {
            full_name: &self.full_name,
            date_of_birth: self.date_of_birth,
            phone_number: self.phone_number.as_deref(),
            resume_url: self.resume_url.as_deref(),
            skills: self.skills.as_deref(),
        }
    }
}

pub async fn get_me(
    auth_user: AuthUser,
    State(ctx): State<ApiContext>,
) -> AppResult<Json<Candidate>> {
    RequireRole::candidate().check(&auth_user)?;

    let user_id = auth_user.resolve_id(&ctx).await?;

    let candidate = CandidateRepository::find_by_user_id(&ctx.db, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Candidate profile not found".to_string()))?;

    Ok(Json(candidate))
}

/// No implicit create here: the profile must already exist, unlike the
/// employer upsert.
pub async fn update_me(
    auth_user: AuthUser,
    State(ctx): State<ApiContext>,
    Json(data): Json<CandidateProfileRequest>,
) -> AppResult<Json<Value>> {
    RequireRole::candidate().check(&auth_user)?;
    data.validate()?;

    let user_id = auth_user.resolve_id(&ctx).await?;

    let candidate = CandidateRepository::update(&ctx.db, user_id, &data.as_fields())
        .await?
        .ok_or_else(|| AppError::NotFound("Candidate profile not found".to_string()))?;

    Ok(Json(json!({ "message": "Updated", "candidate": candidate })))
}

pub async fn delete_me(
    auth_user: AuthUser,
    State(ctx): State<ApiContext>,
) -> AppResult<Json<Value>> {
    RequireRole::candidate().check(&auth_user)?;

    let user_id = auth_user.resolve_id(&ctx).await?;

    if !CandidateRepository::delete(&ctx.db, user_id).await? {
        return Err(AppError::NotFound(
            "Candidate profile not found".to_string(),
        ));
    }

    Ok(Json(json!({ "message": "Candidate profile deleted" })))
}

pub async fn get_all_candidates(
    auth_user: AuthUser,
    State(ctx): State<ApiContext>,
) -> AppResult<Json<Vec<Candidate>>> {
    RequireRole::admin().check(&auth_user)?;

    let candidates = CandidateRepository::get_all(&ctx.db).await?;
    Ok(Json(candidates))
}

pub async fn get_candidate_by_id(
    auth_user: AuthUser,
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
) -> AppResult<Json<Candidate>> {
    RequireRole::admin().check(&auth_user)?;

    let candidate = CandidateRepository::find_by_id(&ctx.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Candidate not found".to_string()))?;

    Ok(Json(candidate))
}

pub async fn create_candidate(
    auth_user: AuthUser,
    State(ctx): State<ApiContext>,
    Json(data): Json<CreateCandidateRequest>,
) -> AppResult<(StatusCode, Json<Value>)> {
    RequireRole::admin().check(&auth_user)?;
    data.profile.validate()?;

    let candidate =
        CandidateRepository::create(&ctx.db, data.user_id, &data.profile.as_fields()).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Candidate created", "candidate": candidate })),
    ))
}

pub async fn update_candidate(
    auth_user: AuthUser,
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
    Json(data): Json<CandidateProfileRequest>,
) -> AppResult<Json<Value>> {
    RequireRole::admin().check(&auth_user)?;
    data.validate()?;

    let candidate = CandidateRepository::update(&ctx.db, id, &data.as_fields())
        .await?
        .ok_or_else(|| AppError::NotFound("Candidate not found".to_string()))?;

    Ok(Json(json!({ "message": "Updated", "candidate": candidate })))
}

pub async fn delete_candidate(
    auth_user: AuthUser,
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
) -> AppResult<Json<Value>> {
    RequireRole::admin().check(&auth_user)?;

    if !CandidateRepository::delete(&ctx.db, id).await? {
        return Err(AppError::NotFound("Candidate not found".to_string()));
    }

    Ok(Json(json!({ "message": "Deleted" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_request_requires_full_name() {
        let req: CandidateProfileRequest = serde_json::from_str(r#"{"full_name":""}"#).unwrap();
        assert!(req.validate().is_err());

        let req: CandidateProfileRequest =
            serde_json::from_str(r#"{"full_name":"Jane Doe","skills":"rust, sql"}"#).unwrap();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn date_of_birth_parses_iso_date() {
        let req: CandidateProfileRequest =
            serde_json::from_str(r#"{"full_name":"Jane","date_of_birth":"1995-04-02"}"#).unwrap();

        let dob = req.date_of_birth.unwrap();
        assert_eq!(dob.year(), 1995);
        assert_eq!(u8::from(dob.month()), 4);
        assert_eq!(dob.day(), 2);
    }
}
