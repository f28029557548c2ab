use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Persisted progress record, merged with defaults on every load so old
/// snapshots missing newer fields still deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserStats {
    pub solved: u32,
    /// Cumulative normalized score: each finished quiz contributes its
    /// result on a 10-point scale.
    pub total_score: f64,
    /// Minutes spent in quiz sessions.
    pub exercise_time: f64,
    /// Minutes spent reading generated theory.
    pub theory_time: f64,
    pub questions_done: u32,
    pub streak: u32,
    pub last_active_date: Option<NaiveDate>,
}

impl Default for UserStats {
    fn default() -> Self {
        Self {
            solved: 0,
            total_score: 0.0,
            exercise_time: 0.0,
            theory_time: 0.0,
            questions_done: 0,
            streak: 0,
            last_active_date: None,
        }
    }
}

impl UserStats {
    /// Daily streak bookkeeping. At most one increment per calendar day;
    /// a gap of more than one day resets the count to 1.
    pub fn register_activity(&mut self, today: NaiveDate) {
        match self.last_active_date {
            Some(last) if last == today => {
                if self.streak == 0 {
                    self.streak = 1;
                }
            }
            Some(last) if crate::utils::time::is_yesterday_of(last, today) => {
                self.streak += 1;
                self.last_active_date = Some(today);
            }
            _ => {
                self.streak = 1;
                self.last_active_date = Some(today);
            }
        }
    }

    pub fn average_score(&self) -> f64 {
        if self.solved == 0 {
            0.0
        } else {
            self.total_score / self.solved as f64
        }
    }
}
