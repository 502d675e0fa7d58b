use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Employer profile, 1:1 with a user. The `user_id` column doubles as the
/// legacy free-standing profile id older callers still pass around.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Employer {
    pub user_id: i64,
    pub employer_name: String,
    pub company_name: String,
    pub company_address: Option<String>,
    pub company_website: Option<String>,
    pub email: String,
    pub contact_number: Option<String>,
}
