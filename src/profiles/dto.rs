use serde::Deserialize;
use sqlx::types::Decimal;

/// Payload for creating or replacing a freelancer profile.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewProfile {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub hourly_rate: Decimal,
    #[serde(default)]
    pub skills: Vec<String>,
    pub portfolio: Option<String>,
}
