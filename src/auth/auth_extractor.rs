use crate::{error::AppError, models::user::Role, repositories::user_repository::UserRepository};
use axum::{
    RequestPartsExt,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    TypedHeader,
    extract::CookieJar,
    headers::{Authorization, authorization::Bearer},
};
use hmac::{Hmac, Mac};
use jwt::VerifyWithKey;
use serde::{Deserialize, Serialize};
use sha2::Sha384;
use time::OffsetDateTime;

/// Identity decoded from a verified token, threaded explicitly into every
/// handler. `user_id` is optional: older tokens carried only a username, so
/// callers that need an id go through [`AuthUser::resolve_id`].
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Option<i64>,
    pub username: String,
    pub role: Role,
}

#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<AuthUser>);

#[derive(Debug, Serialize, Deserialize)]
struct AuthUserClaims {
    #[serde(default)]
    sub: Option<i64>,
    username: String,
    role: Role,
    exp: i64,
}

#[derive(Clone)]
pub struct ApiContext {
    pub db: sqlx::PgPool,
    pub jwt_secret: String,
    pub jwt_expires_secs: i64,
}

impl AuthUser {
    pub fn from_token(ctx: &ApiContext, token: &str) -> Result<Self, AppError> {
        let hmac = Hmac::<Sha384>::new_from_slice(ctx.jwt_secret.as_bytes())
            .map_err(|e| AppError::Auth(format!("Invalid HMAC key: {}", e)))?;

        let claims: AuthUserClaims = token.verify_with_key(&hmac).map_err(|e| {
            tracing::debug!("JWT failed to verify: {}", e);
            AppError::Auth("Invalid token".to_string())
        })?;

        if claims.exp < OffsetDateTime::now_utc().unix_timestamp() {
            tracing::debug!("Token expired");
            return Err(AppError::Auth("Token expired".to_string()));
        }

        Ok(Self {
            user_id: claims.sub,
            username: claims.username,
            role: claims.role,
        })
    }

    pub fn to_jwt(&self, ctx: &ApiContext) -> Result<String, AppError> {
        use jwt::SignWithKey;
        use time::Duration;

        let hmac = Hmac::<Sha384>::new_from_slice(ctx.jwt_secret.as_bytes())
            .map_err(|e| AppError::Auth(format!("Invalid HMAC key: {}", e)))?;

        let claims = AuthUserClaims {
            sub: self.user_id,
            username: self.username.clone(),
            role: self.role,
            exp: (OffsetDateTime::now_utc() + Duration::seconds(ctx.jwt_expires_secs))
                .unix_timestamp(),
        };

        claims
            .sign_with_key(&hmac)
            .map_err(|e| AppError::Auth(format!("Failed to sign JWT: {}", e)))
    }

    /// Resolves the acting user's id, falling back to a username lookup when
    /// the token lacks one. The fallback is best-effort: a failed lookup is
    /// logged and surfaces as 401 here, at the point an id is required.
    pub async fn resolve_id(&self, ctx: &ApiContext) -> Result<i64, AppError> {
        if let Some(id) = self.user_id {
            return Ok(id);
        }

        match UserRepository::get_user_by_username(&ctx.db, &self.username).await {
            Ok(Some(user)) => Ok(user.user_id),
            Ok(None) => {
                tracing::warn!(username = %self.username, "token identity unresolved");
                Err(AppError::Auth("Unauthenticated".to_string()))
            }
            Err(e) => {
                tracing::warn!(username = %self.username, "identity lookup failed: {}", e);
                Err(AppError::Auth("Unauthenticated".to_string()))
            }
        }
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    ApiContext: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match MaybeAuthUser::from_request_parts(parts, state).await? {
            MaybeAuthUser(Some(auth_user)) => Ok(auth_user),
            MaybeAuthUser(None) => Err(AppError::Auth("Not authenticated".to_string())),
        }
    }
}

impl<S> FromRequestParts<S> for MaybeAuthUser
where
    S: Send + Sync,
    ApiContext: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let ctx: ApiContext = ApiContext::from_ref(state);

        if let Some(TypedHeader(Authorization(bearer))) = parts
            .extract::<Option<TypedHeader<Authorization<Bearer>>>>()
            .await
            .ok()
            .flatten()
        {
            let user = AuthUser::from_token(&ctx, bearer.token())?;
            return Ok(Self(Some(user)));
        }

        let Ok(jar) = parts.extract::<CookieJar>().await;

        if let Some(cookie) = jar.get("jwt") {
            let user = AuthUser::from_token(&ctx, cookie.value())?;
            return Ok(Self(Some(user)));
        }

        Ok(Self(None))
    }
}

/// Role gate evaluated against the verified claims, not the database.
#[derive(Debug, Clone)]
pub struct RequireRole {
    pub roles: Vec<Role>,
}

impl RequireRole {
    pub fn new(roles: Vec<Role>) -> Self {
        Self { roles }
    }

    pub fn admin() -> Self {
        Self::new(vec![Role::Admin])
    }

    pub fn employer() -> Self {
        Self::new(vec![Role::Employer, Role::Admin])
    }

    pub fn candidate() -> Self {
        Self::new(vec![Role::Candidate, Role::Admin])
    }

    pub fn any() -> Self {
        Self::new(vec![Role::Admin, Role::Employer, Role::Candidate])
    }

    pub fn check(&self, auth_user: &AuthUser) -> Result<(), AppError> {
        if !self.roles.contains(&auth_user.role) {
            return Err(AppError::Forbidden("insufficient role".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jwt::SignWithKey;
    use sqlx::postgres::PgPoolOptions;

    fn test_ctx(expires_secs: i64) -> ApiContext {
        // connect_lazy parses the URL without opening a connection; the token
        // layer never touches the pool.
        let db = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/jobboard_test")
            .unwrap();

        ApiContext {
            db,
            jwt_secret: "test-secret".to_string(),
            jwt_expires_secs: expires_secs,
        }
    }

    #[tokio::test]
    async fn token_roundtrips_identity() {
        let ctx = test_ctx(3600);
        let user = AuthUser {
            user_id: Some(7),
            username: "acme".to_string(),
            role: Role::Employer,
        };

        let token = user.to_jwt(&ctx).unwrap();
        let decoded = AuthUser::from_token(&ctx, &token).unwrap();

        assert_eq!(decoded.user_id, Some(7));
        assert_eq!(decoded.username, "acme");
        assert_eq!(decoded.role, Role::Employer);
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let ctx = test_ctx(-10);
        let user = AuthUser {
            user_id: Some(1),
            username: "old".to_string(),
            role: Role::Candidate,
        };

        let token = user.to_jwt(&ctx).unwrap();
        assert!(AuthUser::from_token(&ctx, &token).is_err());
    }

    #[tokio::test]
    async fn tampered_token_is_rejected() {
        let ctx = test_ctx(3600);
        let user = AuthUser {
            user_id: Some(1),
            username: "acme".to_string(),
            role: Role::Candidate,
        };

        let mut token = user.to_jwt(&ctx).unwrap();
        token.push('x');
        assert!(AuthUser::from_token(&ctx, &token).is_err());

        let other = ApiContext {
            jwt_secret: "other-secret".to_string(),
            ..test_ctx(3600)
        };
        let forged = user.to_jwt(&other).unwrap();
        assert!(AuthUser::from_token(&ctx, &forged).is_err());
    }

    #[tokio::test]
    async fn legacy_token_without_id_still_verifies() {
        let ctx = test_ctx(3600);
        let hmac = Hmac::<Sha384>::new_from_slice(ctx.jwt_secret.as_bytes()).unwrap();

        let claims = AuthUserClaims {
            sub: None,
            username: "legacy".to_string(),
            role: Role::Candidate,
            exp: (OffsetDateTime::now_utc() + time::Duration::hours(1)).unix_timestamp(),
        };
        let token = claims.sign_with_key(&hmac).unwrap();

        let decoded = AuthUser::from_token(&ctx, &token).unwrap();
        assert_eq!(decoded.user_id, None);
        assert_eq!(decoded.username, "legacy");
    }

    #[test]
    fn role_gate_checks_claims() {
        let employer = AuthUser {
            user_id: Some(1),
            username: "acme".to_string(),
            role: Role::Employer,
        };
        let admin = AuthUser {
            user_id: Some(2),
            username: "root".to_string(),
            role: Role::Admin,
        };
        let candidate = AuthUser {
            user_id: Some(3),
            username: "jane".to_string(),
            role: Role::Candidate,
        };

        assert!(RequireRole::employer().check(&employer).is_ok());
        assert!(RequireRole::employer().check(&admin).is_ok());
        assert!(RequireRole::employer().check(&candidate).is_err());

        assert!(RequireRole::admin().check(&admin).is_ok());
        assert!(RequireRole::admin().check(&employer).is_err());

        assert!(RequireRole::candidate().check(&candidate).is_ok());
        assert!(RequireRole::candidate().check(&employer).is_err());

        assert!(RequireRole::any().check(&candidate).is_ok());
    }
}
