use crate::{
    auth::auth_extractor::{ApiContext, AuthUser, RequireRole},
    error::{AppError, AppResult},
    models::user::UserInfo,
    repositories::user_repository::UserRepository,
};
use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Value, json};

pub async fn get_all_users(
    auth_user: AuthUser,
    State(ctx): State<ApiContext>,
) -> AppResult<Json<Vec<UserInfo>>> {
    RequireRole::admin().check(&auth_user)?;

    let users = UserRepository::get_all_users(&ctx.db).await?;

    Ok(Json(users.into_iter().map(UserInfo::from).collect()))
}

pub async fn delete_user(
    auth_user: AuthUser,
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
) -> AppResult<Json<Value>> {
    RequireRole::admin().check(&auth_user)?;

    if !UserRepository::delete_user(&ctx.db, id).await? {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    Ok(Json(json!({ "message": "User deleted" })))
}
