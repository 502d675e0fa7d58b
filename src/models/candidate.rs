use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::Date;

#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Candidate {
    pub user_id: i64,
    pub full_name: String,
    pub date_of_birth: Option<Date>,
    pub phone_number: Option<String>,
    pub resume_url: Option<String>,
    pub skills: Option<String>,
}
