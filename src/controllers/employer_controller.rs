use crate::{
    auth::auth_extractor::{ApiContext, AuthUser, RequireRole},
    error::{AppError, AppResult},
    models::employer::Employer,
    repositories::employer_repository::{EmployerProfile, EmployerRepository},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Debug, Deserialize)]
pub struct EmployerProfileRequest {
    pub employer_name: String,
    pub company_name: String,
    pub company_address: Option<String>,
    pub company_website: Option<String>,
    // Older frontends send `employer_email`.
    #[serde(default, alias = "employer_email")]
    pub email: String,
    pub contact_number: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateEmployerRequest {
    pub user_id: i64,
    #[serde(flatten)]
    pub profile: EmployerProfileRequest,
}

impl EmployerProfileRequest {
    fn validate(&self) -> AppResult<()> {
        if self.employer_name.is_empty() || self.company_name.is_empty() {
            return Err(AppError::Validation(
                "employer_name and company_name required".to_string(),
            ));
        }
        Ok(())
    }

    fn as_fields(&self) -> EmployerProfile<'_> {
        EmployerProfile {
            employer_name: &self.employer_name,
            company_name: &self.company_name,
            company_address: self.company_address.as_deref(),
            company_website: self.company_website.as_deref(),
            email: &self.email,
            contact_number: self.contact_number.as_deref(),
        }
    }
}

pub async fn get_me(
    auth_user: AuthUser,
    State(ctx): State<ApiContext>,
) -> AppResult<Json<Employer>> {
    RequireRole::employer().check(&auth_user)?;

    let user_id = auth_user.resolve_id(&ctx).await?;

    let employer = EmployerRepository::find_by_user_id(&ctx.db, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Employer profile not found".to_string()))?;

    Ok(Json(employer))
}

/// Update-or-create keyed on the authenticated user; the client never sends
/// a user_id here.
pub async fn update_me(
    auth_user: AuthUser,
    State(ctx): State<ApiContext>,
    Json(data): Json<EmployerProfileRequest>,
) -> AppResult<Json<Value>> {
    RequireRole::employer().check(&auth_user)?;
    data.validate()?;

    let user_id = auth_user.resolve_id(&ctx).await?;

    let employer = EmployerRepository::upsert(&ctx.db, user_id, &data.as_fields()).await?;

    Ok(Json(json!({ "message": "Profile saved", "employer": employer })))
}

pub async fn delete_me(
    auth_user: AuthUser,
    State(ctx): State<ApiContext>,
) -> AppResult<Json<Value>> {
    RequireRole::employer().check(&auth_user)?;

    let user_id = auth_user.resolve_id(&ctx).await?;

    if !EmployerRepository::delete(&ctx.db, user_id).await? {
        return Err(AppError::NotFound("Employer profile not found".to_string()));
    }

    Ok(Json(json!({ "message": "Employer profile deleted" })))
}

pub async fn get_all_employers(
    auth_user: AuthUser,
    State(ctx): State<ApiContext>,
) -> AppResult<Json<Vec<Employer>>> {
    RequireRole::admin().check(&auth_user)?;

    let employers = EmployerRepository::get_all(&ctx.db).await?;
    Ok(Json(employers))
}

pub async fn get_employer_by_id(
    auth_user: AuthUser,
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
) -> AppResult<Json<Employer>> {
    RequireRole::admin().check(&auth_user)?;

    let employer = EmployerRepository::find_by_id(&ctx.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Employer not found".to_string()))?;

    Ok(Json(employer))
}

pub async fn create_employer(
    auth_user: AuthUser,
    State(ctx): State<ApiContext>,
    Json(data): Json<CreateEmployerRequest>,
) -> AppResult<(StatusCode, Json<Value>)> {
    RequireRole::admin().check(&auth_user)?;
    data.profile.validate()?;

    let employer =
        EmployerRepository::upsert(&ctx.db, data.user_id, &data.profile.as_fields()).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Employer created", "employer": employer })),
    ))
}

pub async fn update_employer(
    auth_user: AuthUser,
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
    Json(data): Json<EmployerProfileRequest>,
) -> AppResult<Json<Value>> {
    RequireRole::admin().check(&auth_user)?;
    data.validate()?;

    let employer = EmployerRepository::update(&ctx.db, id, &data.as_fields())
        .await?
        .ok_or_else(|| AppError::NotFound("Employer not found".to_string()))?;

    Ok(Json(json!({ "message": "Updated", "employer": employer })))
}

pub async fn delete_employer(
    auth_user: AuthUser,
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
) -> AppResult<Json<Value>> {
    RequireRole::admin().check(&auth_user)?;

    if !EmployerRepository::delete(&ctx.db, id).await? {
        return Err(AppError::NotFound("Employer not found".to_string()));
    }

    Ok(Json(json!({ "message": "Deleted" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_request_accepts_legacy_email_alias() {
        let req: EmployerProfileRequest = serde_json::from_str(
            r#"{"employer_name":"Jo","company_name":"Acme","employer_email":"hr@acme.example"}"#,
        )
        .unwrap();

        assert_eq!(req.email, "hr@acme.example");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn profile_request_requires_names() {
        let req: EmployerProfileRequest =
            serde_json::from_str(r#"{"employer_name":"","company_name":"Acme"}"#).unwrap();

        assert!(req.validate().is_err());
    }
}
