use crate::error::Result;
use crate::models::stats::UserStats;
use crate::store::KvStore;
use crate::utils::time;

pub const STATS_STORE_KEY: &str = "userStats";

/// Read-merge-write access to the persisted progress record. Single writer
/// by convention; there is no cross-process locking.
#[derive(Clone)]
pub struct StatsService {
    store: KvStore,
}

impl StatsService {
    pub fn new(store: KvStore) -> Self {
        Self { store }
    }

    pub fn load(&self) -> UserStats {
        self.store
            .get_as::<UserStats>(STATS_STORE_KEY)
            .unwrap_or_default()
    }

    fn save(&self, stats: &UserStats) -> Result<()> {
        self.store.set(STATS_STORE_KEY, stats)
    }

    /// Side effects of finishing a quiz, applied exactly once per
    /// completion by the caller.
    pub fn record_quiz_completion(
        &self,
        score: usize,
        total: usize,
        elapsed_minutes: f64,
    ) -> Result<UserStats> {
        let mut stats = self.load();
        stats.solved += 1;
        stats.total_score += score as f64 / total as f64 * 10.0;
        stats.exercise_time += elapsed_minutes;
        stats.questions_done += total as u32;
        stats.register_activity(time::today());
        self.save(&stats)?;
        Ok(stats)
    }

    /// Reading time reported when the learner closes a theory view.
    pub fn record_theory_minutes(&self, minutes: f64) -> Result<UserStats> {
        let mut stats = self.load();
        stats.theory_time += minutes;
        stats.register_activity(time::today());
        self.save(&stats)?;
        Ok(stats)
    }

    /// First chat message of the day keeps the streak alive even without a
    /// finished quiz.
    pub fn register_daily_activity(&self) -> Result<UserStats> {
        let mut stats = self.load();
        stats.register_activity(time::today());
        self.save(&stats)?;
        Ok(stats)
    }
}
