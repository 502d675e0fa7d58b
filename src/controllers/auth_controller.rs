use crate::{
    auth::{
        auth_extractor::{ApiContext, AuthUser},
        utils::{hash_password, verify_password},
    },
    error::{AppError, AppResult, ErrorResponse},
    models::user::{Role, UserInfo},
    repositories::user_repository::UserRepository,
};
use axum::{Json, extract::State, http::StatusCode};
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use serde::{Deserialize, Serialize};
use time::Duration;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "acme")]
    pub username: String,

    #[schema(example = "pw123456", min_length = 8)]
    pub password: String,

    #[serde(default)]
    #[schema(example = "hr@acme.example")]
    pub email: String,

    #[serde(default = "default_role")]
    #[schema(example = "employer")]
    pub role: Role,
}

fn default_role() -> Role {
    Role::Candidate
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "acme")]
    pub username: String,

    #[schema(example = "pw123456")]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    #[schema(example = "eyJhbGciOiJIUzM4NCJ9...")]
    pub token: String,

    pub user: UserInfo,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    #[schema(example = "User created")]
    pub message: String,

    pub user: UserInfo,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateMeRequest {
    pub username: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ChangePasswordRequest {
    #[schema(example = "pw123456")]
    pub current_password: String,

    #[schema(example = "pw654321", min_length = 8)]
    pub new_password: String,
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = RegisterResponse),
        (status = 400, description = "Missing fields or username taken", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
pub async fn register(
    State(ctx): State<ApiContext>,
    Json(data): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    if data.username.is_empty() || data.password.is_empty() {
        return Err(AppError::Validation(
            "username and password required".to_string(),
        ));
    }

    if data.password.len() < 8 {
        return Err(AppError::Validation(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    if UserRepository::username_exists(&ctx.db, &data.username).await? {
        return Err(AppError::Duplicate("Username already taken".to_string()));
    }

    let password_hash = hash_password(&data.password).await?;

    let user = UserRepository::create_user(
        &ctx.db,
        &data.username,
        &password_hash,
        &data.email,
        data.role,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User created".to_string(),
            user: user.into(),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = AuthResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
pub async fn login(
    State(ctx): State<ApiContext>,
    Json(data): Json<LoginRequest>,
) -> AppResult<(CookieJar, Json<AuthResponse>)> {
    if data.username.is_empty() || data.password.is_empty() {
        return Err(AppError::Validation(
            "username and password required".to_string(),
        ));
    }

    // Unknown username and bad password fail identically.
    let (user, password_hash) = UserRepository::get_user_with_password(&ctx.db, &data.username)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    verify_password(&data.password, &password_hash).await?;

    let auth_user = AuthUser {
        user_id: Some(user.user_id),
        username: user.username.clone(),
        role: user.role,
    };
    let token = auth_user.to_jwt(&ctx)?;

    let cookie = Cookie::build(("jwt", token.clone()))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Strict)
        .max_age(Duration::seconds(ctx.jwt_expires_secs))
        .path("/")
        .build();

    let jar = CookieJar::new().add(cookie);

    Ok((
        jar,
        Json(AuthResponse {
            token,
            user: user.into(),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses((status = 200, description = "Session cookie cleared")),
    tag = "Authentication"
)]
pub async fn logout(jar: CookieJar) -> AppResult<CookieJar> {
    let cookie = Cookie::build("jwt")
        .path("/")
        .max_age(Duration::seconds(0))
        .build();

    Ok(jar.remove(cookie))
}

#[utoipa::path(
    get,
    path = "/api/me",
    responses(
        (status = 200, description = "Current user", body = UserInfo),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
pub async fn get_current_user(
    auth_user: AuthUser,
    State(ctx): State<ApiContext>,
) -> AppResult<Json<UserInfo>> {
    let user_id = auth_user.resolve_id(&ctx).await?;

    let user = UserRepository::get_user_by_id(&ctx.db, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(UserInfo::from(user)))
}

pub async fn update_current_user(
    auth_user: AuthUser,
    State(ctx): State<ApiContext>,
    Json(data): Json<UpdateMeRequest>,
) -> AppResult<Json<UserInfo>> {
    if data.username.is_empty() {
        return Err(AppError::Validation("username required".to_string()));
    }

    let user_id = auth_user.resolve_id(&ctx).await?;

    let user = UserRepository::update_user(&ctx.db, user_id, &data.username, &data.email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(UserInfo::from(user)))
}

/// Self-scoped password change, mounted under both profile namespaces.
/// Requires proof of the current password.
#[utoipa::path(
    post,
    path = "/api/employers/me/password",
    request_body = ChangePasswordRequest,
    responses(
        (status = 204, description = "Password updated"),
        (status = 401, description = "Current password incorrect", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
pub async fn change_password(
    auth_user: AuthUser,
    State(ctx): State<ApiContext>,
    Json(data): Json<ChangePasswordRequest>,
) -> AppResult<StatusCode> {
    if data.current_password.is_empty() || data.new_password.is_empty() {
        return Err(AppError::Validation(
            "currentPassword and newPassword required".to_string(),
        ));
    }

    if data.new_password.len() < 8 {
        return Err(AppError::Validation(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    let user_id = auth_user.resolve_id(&ctx).await?;

    let (_, current_hash) = UserRepository::get_user_with_password_by_id(&ctx.db, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    verify_password(&data.current_password, &current_hash).await?;

    let new_hash = hash_password(&data.new_password).await?;

    UserRepository::update_password(&ctx.db, user_id, &new_hash).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_defaults_to_candidate_role() {
        let req: RegisterRequest =
            serde_json::from_str(r#"{"username":"jane","password":"pw123456"}"#).unwrap();

        assert_eq!(req.role, Role::Candidate);
        assert_eq!(req.email, "");
    }

    #[test]
    fn register_accepts_explicit_role() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{"username":"acme","password":"pw123456","email":"hr@acme.example","role":"employer"}"#,
        )
        .unwrap();

        assert_eq!(req.role, Role::Employer);
    }
}
