use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use time::OffsetDateTime;

use crate::models::job::JobStatus;

#[derive(Debug, Serialize, Deserialize, Type, Clone, Copy, PartialEq, Eq)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    /// Parses the wire form used by the status-update endpoint. Anything
    /// outside {pending, accepted, rejected} is a validation failure.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "accepted" => Some(Self::Accepted),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Employers may only decide a pending application. Admins bypass this
    /// and may set any status.
    pub fn employer_may_transition(from: Self, to: Self) -> bool {
        from == Self::Pending && matches!(to, Self::Accepted | Self::Rejected)
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Application {
    pub application_id: i64,
    pub job_id: i64,
    pub candidate_id: i64,
    pub cover_letter: String,
    pub status: ApplicationStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub applied_at: OffsetDateTime,
}

/// Application joined with candidate contact fields, for the employer's
/// per-job applicant list.
#[derive(Debug, Serialize, FromRow)]
pub struct JobApplicant {
    pub application_id: i64,
    pub job_id: i64,
    pub candidate_id: i64,
    pub cover_letter: String,
    pub status: ApplicationStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub applied_at: OffsetDateTime,
    pub full_name: String,
    pub phone_number: Option<String>,
    pub resume_url: Option<String>,
}

/// Application joined with job fields, for the candidate's own view.
#[derive(Debug, Serialize, FromRow)]
pub struct CandidateApplication {
    pub application_id: i64,
    pub job_id: i64,
    pub candidate_id: i64,
    pub cover_letter: String,
    pub status: ApplicationStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub applied_at: OffsetDateTime,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub salary_range: Option<String>,
    pub job_status: JobStatus,
}

/// Application joined with job title and candidate contact fields, for the
/// employer's cross-job inbox.
#[derive(Debug, Serialize, FromRow)]
pub struct EmployerApplication {
    pub application_id: i64,
    pub job_id: i64,
    pub candidate_id: i64,
    pub cover_letter: String,
    pub status: ApplicationStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub applied_at: OffsetDateTime,
    pub job_title: String,
    pub full_name: String,
    pub phone_number: Option<String>,
    pub resume_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_only_known_statuses() {
        assert_eq!(
            ApplicationStatus::parse("pending"),
            Some(ApplicationStatus::Pending)
        );
        assert_eq!(
            ApplicationStatus::parse("accepted"),
            Some(ApplicationStatus::Accepted)
        );
        assert_eq!(
            ApplicationStatus::parse("rejected"),
            Some(ApplicationStatus::Rejected)
        );
        assert_eq!(ApplicationStatus::parse("withdrawn"), None);
        assert_eq!(ApplicationStatus::parse("Accepted"), None);
        assert_eq!(ApplicationStatus::parse(""), None);
    }

    #[test]
    fn employer_transitions_restricted_to_pending_source() {
        use ApplicationStatus::*;

        assert!(ApplicationStatus::employer_may_transition(Pending, Accepted));
        assert!(ApplicationStatus::employer_may_transition(Pending, Rejected));
        assert!(!ApplicationStatus::employer_may_transition(Pending, Pending));
        assert!(!ApplicationStatus::employer_may_transition(
            Accepted, Rejected
        ));
        assert!(!ApplicationStatus::employer_may_transition(
            Rejected, Pending
        ));
    }
}
