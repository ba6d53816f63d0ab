use serde::{Deserialize, Serialize};
use sqlx::types::Decimal;
use sqlx::FromRow;

/// Freelancer profile row, owned one-to-one by a user. The owning
/// `user_id` is set at creation and never changes.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Profile {
    pub id: i64,
    pub user_id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub hourly_rate: Decimal,
    pub skills: Vec<String>,
    pub portfolio: Option<String>, // free-form text, unbounded
}

/// Insertable profile fields. The owning user id is supplied
/// separately, so a draft can never carry a stale owner.
#[derive(Debug, Clone, Default)]
pub struct ProfileDraft {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub hourly_rate: Decimal,
    pub skills: Vec<String>,
    pub portfolio: Option<String>,
}
