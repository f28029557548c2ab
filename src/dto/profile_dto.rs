use crate::models::profile::Gender;
use crate::models::stats::UserStats;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ProfileUpdateRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(max = 50))]
    pub class: Option<String>,
    #[validate(length(max = 100))]
    pub school: Option<String>,
    pub gender: Option<Gender>,
    #[validate(length(max = 20))]
    pub date_of_birth: Option<String>,
    pub notifications: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: UserStats,
    pub average_score: f64,
}

impl From<UserStats> for StatsResponse {
    fn from(stats: UserStats) -> Self {
        let average_score = stats.average_score();
        Self {
            stats,
            average_score,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TheoryMinutesRequest {
    #[validate(range(min = 0.0, max = 1440.0))]
    pub minutes: f64,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SettingsRequest {
    /// Empty string clears the stored key.
    #[validate(length(max = 200))]
    pub api_key: Option<String>,
    #[validate(length(max = 100))]
    pub model: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SettingsResponse {
    pub has_api_key: bool,
    pub model: String,
}
