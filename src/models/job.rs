use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use time::OffsetDateTime;

/// Job lifecycle. Both directions are allowed: an employer may reopen a
/// closed posting.
#[derive(Debug, Serialize, Deserialize, Type, Clone, Copy, PartialEq, Eq)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Open,
    Closed,
}

#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Job {
    pub job_id: i64,
    pub employer_id: i64,
    pub title: String,
    pub description: String,
    pub requirements: Option<String>,
    pub location: Option<String>,
    pub salary_range: Option<String>,
    pub status: JobStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_roundtrips_lowercase() {
        assert_eq!(serde_json::to_string(&JobStatus::Open).unwrap(), "\"open\"");
        assert_eq!(
            serde_json::from_str::<JobStatus>("\"closed\"").unwrap(),
            JobStatus::Closed
        );
        assert!(serde_json::from_str::<JobStatus>("\"paused\"").is_err());
    }
}
