use crate::error::{Error, Result};
use crate::models::session::{Advance, AnswerOutcome, QuizSession, QUIZ_LEN};
use crate::services::ai_service::GeminiService;
use crate::services::stats_service::StatsService;
use crate::utils::time;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct QuizResult {
    pub score: usize,
    pub total: usize,
    pub normalized_score: f64,
    pub elapsed_seconds: i64,
}

#[derive(Debug, Clone)]
pub enum QuizAdvance {
    Next(usize),
    Finished(QuizResult),
}

/// In-memory session registry plus the generation guard: at most one quiz
/// may be generating at a time, and fallback attempts inside that one call
/// are already strictly sequential.
#[derive(Clone, Default)]
pub struct QuizService {
    sessions: Arc<Mutex<HashMap<Uuid, QuizSession>>>,
    generating: Arc<AtomicBool>,
}

impl QuizService {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn start(
        &self,
        ai: &GeminiService,
        grade: String,
        lesson_title: String,
    ) -> Result<QuizSession> {
        if self
            .generating
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(Error::Conflict(
                "Một đề bài khác đang được tạo. Vui lòng chờ.".to_string(),
            ));
        }

        let generated = ai.generate_quiz(&lesson_title, &grade).await;
        self.generating.store(false, Ordering::SeqCst);

        // On failure no session starts and no stats are touched.
        let questions = generated?;
        let session = QuizSession::new(grade, lesson_title, questions);
        let mut sessions = self.sessions.lock().expect("session registry poisoned");
        sessions.insert(session.id, session.clone());
        Ok(session)
    }

    pub fn answer(&self, id: Uuid, answer: String) -> Result<(AnswerOutcome, QuizSession)> {
        self.with_session(id, |session| {
            let outcome = session.submit_answer(answer);
            Ok((outcome, session.clone()))
        })
    }

    pub fn confirm(&self, id: Uuid) -> Result<(AnswerOutcome, QuizSession)> {
        self.with_session(id, |session| {
            let outcome = session.confirm_current();
            Ok((outcome, session.clone()))
        })
    }

    /// Advance past a confirmed step; completing the last step reveals the
    /// result and persists the progress side effects exactly once.
    pub fn advance(&self, id: Uuid, stats: &StatsService) -> Result<QuizAdvance> {
        self.with_session(id, |session| match session.advance() {
            None => Err(Error::BadRequest(
                "Câu hỏi hiện tại chưa được xác nhận.".to_string(),
            )),
            Some(Advance::Next(index)) => Ok(QuizAdvance::Next(index)),
            Some(Advance::Finished) => {
                let result = QuizResult {
                    score: session.score(),
                    total: QUIZ_LEN,
                    normalized_score: session.score() as f64 / QUIZ_LEN as f64 * 10.0,
                    elapsed_seconds: session.elapsed_seconds(),
                };
                if !session.stats_recorded {
                    stats.record_quiz_completion(
                        result.score,
                        result.total,
                        time::elapsed_minutes(session.started_at),
                    )?;
                    session.stats_recorded = true;
                }
                Ok(QuizAdvance::Finished(result))
            }
        })
    }

    /// Practice the same generated set again; no new generation request.
    pub fn retry(&self, id: Uuid) -> Result<QuizSession> {
        self.with_session(id, |session| {
            if !session.result_revealed {
                return Err(Error::BadRequest(
                    "Chỉ có thể làm lại sau khi xem kết quả.".to_string(),
                ));
            }
            session.reset_for_retry();
            Ok(session.clone())
        })
    }

    /// Closing a session discards its in-memory state with no persisted
    /// side effects.
    pub fn discard(&self, id: Uuid) -> Result<()> {
        let mut sessions = self.sessions.lock().expect("session registry poisoned");
        sessions
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| Error::NotFound("Không tìm thấy phiên làm bài.".to_string()))
    }

    pub fn snapshot(&self, id: Uuid) -> Result<QuizSession> {
        self.with_session(id, |session| Ok(session.clone()))
    }

    fn with_session<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut QuizSession) -> Result<R>,
    ) -> Result<R> {
        let mut sessions = self.sessions.lock().expect("session registry poisoned");
        let session = sessions
            .get_mut(&id)
            .ok_or_else(|| Error::NotFound("Không tìm thấy phiên làm bài.".to_string()))?;
        f(session)
    }
}
