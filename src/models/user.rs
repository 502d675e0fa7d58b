use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use time::OffsetDateTime;
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, Type, Clone, Copy, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Employer,
    Candidate,
}

#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct User {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub role: Role,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserInfo {
    #[schema(example = 42)]
    pub user_id: i64,

    #[schema(example = "acme")]
    pub username: String,

    #[schema(example = "hr@acme.example")]
    pub email: String,

    #[schema(example = "employer")]
    pub role: Role,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            username: user.username,
            email: user.email,
            role: user.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(
            serde_json::to_string(&Role::Employer).unwrap(),
            "\"employer\""
        );
        assert_eq!(
            serde_json::to_string(&Role::Candidate).unwrap(),
            "\"candidate\""
        );
    }

    #[test]
    fn role_deserializes_lowercase_only() {
        assert_eq!(
            serde_json::from_str::<Role>("\"candidate\"").unwrap(),
            Role::Candidate
        );
        assert!(serde_json::from_str::<Role>("\"Candidate\"").is_err());
        assert!(serde_json::from_str::<Role>("\"superuser\"").is_err());
    }
}
