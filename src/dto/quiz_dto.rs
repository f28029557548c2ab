use crate::models::question::Question;
use crate::models::session::{AnswerOutcome, Phase, QuizSession};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct StartQuizRequest {
    #[validate(length(min = 1, max = 8))]
    pub grade: String,
    #[validate(length(min = 1, max = 200))]
    pub lesson_title: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizSessionResponse {
    pub session_id: Uuid,
    pub grade: String,
    pub lesson_title: String,
    pub total_questions: usize,
    pub current_index: usize,
    pub started_at: DateTime<Utc>,
    pub questions: Vec<Question>,
}

impl From<&QuizSession> for QuizSessionResponse {
    fn from(session: &QuizSession) -> Self {
        Self {
            session_id: session.id,
            grade: session.grade.clone(),
            lesson_title: session.lesson_title.clone(),
            total_questions: session.questions.len(),
            current_index: session.current_index,
            started_at: session.started_at,
            questions: session.questions.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AnswerRequest {
    #[validate(length(min = 1, max = 500))]
    pub answer: String,
}

/// Feedback for the step the learner just acted on. Correct answer and
/// explanation are only revealed once the step is confirmed.
#[derive(Debug, Clone, Serialize)]
pub struct StepResponse {
    pub current_index: usize,
    pub recorded: bool,
    pub confirmed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl StepResponse {
    pub fn new(outcome: AnswerOutcome, session: &QuizSession) -> Self {
        let question = session.current_question();
        let (correct_answer, explanation) = if outcome.confirmed {
            (
                Some(question.correct_answer.clone()),
                Some(question.explanation.clone()),
            )
        } else {
            (None, None)
        };
        Self {
            current_index: session.current_index,
            recorded: outcome.recorded,
            confirmed: outcome.confirmed,
            correct: outcome.correct,
            correct_answer,
            explanation,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum AdvanceResponse {
    Active {
        current_index: usize,
    },
    Result {
        score: usize,
        total: usize,
        normalized_score: f64,
        elapsed_seconds: i64,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizStatusResponse {
    pub session_id: Uuid,
    pub phase: Phase,
    pub current_index: usize,
    pub total_questions: usize,
    pub elapsed_seconds: i64,
    pub answered: Vec<usize>,
    pub confirmed: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<usize>,
}

impl From<&QuizSession> for QuizStatusResponse {
    fn from(session: &QuizSession) -> Self {
        let mut answered: Vec<usize> = session.answers.keys().copied().collect();
        answered.sort_unstable();
        let mut confirmed: Vec<usize> = session
            .confirmed
            .iter()
            .filter(|(_, done)| **done)
            .map(|(idx, _)| *idx)
            .collect();
        confirmed.sort_unstable();

        Self {
            session_id: session.id,
            phase: session.phase(),
            current_index: session.current_index,
            total_questions: session.questions.len(),
            elapsed_seconds: session.elapsed_seconds(),
            answered,
            confirmed,
            score: (session.phase() == Phase::Result).then(|| session.score()),
        }
    }
}
