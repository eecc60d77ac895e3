use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

// ______________________________________ User ______________________________________
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub date_joined: DateTime<Utc>,
}
