use crate::models::question::{answer_matches, Question};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

pub const QUIZ_LEN: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Active,
    Result,
}

/// One in-progress attempt at a generated question set. The question list is
/// immutable for the session's lifetime; retry clears only the attempt state
/// so the learner can practice the same set again.
#[derive(Debug, Clone)]
pub struct QuizSession {
    pub id: Uuid,
    pub grade: String,
    pub lesson_title: String,
    pub questions: Vec<Question>,
    pub current_index: usize,
    pub answers: HashMap<usize, String>,
    pub confirmed: HashMap<usize, bool>,
    pub started_at: DateTime<Utc>,
    pub result_revealed: bool,
    pub stats_recorded: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnswerOutcome {
    pub recorded: bool,
    pub confirmed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Next(usize),
    Finished,
}

impl QuizSession {
    pub fn new(grade: String, lesson_title: String, questions: Vec<Question>) -> Self {
        Self {
            id: Uuid::new_v4(),
            grade,
            lesson_title,
            questions,
            current_index: 0,
            answers: HashMap::new(),
            confirmed: HashMap::new(),
            started_at: Utc::now(),
            result_revealed: false,
            stats_recorded: false,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.result_revealed {
            Phase::Result
        } else {
            Phase::Active
        }
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.current_index]
    }

    pub fn is_confirmed(&self, index: usize) -> bool {
        self.confirmed.get(&index).copied().unwrap_or(false)
    }

    /// Record an answer for the current step. Locked (already confirmed)
    /// steps ignore further answers. Choice-style questions confirm
    /// immediately; short answers wait for an explicit confirmation.
    pub fn submit_answer(&mut self, answer: String) -> AnswerOutcome {
        let index = self.current_index;
        if self.result_revealed || self.is_confirmed(index) {
            return AnswerOutcome {
                recorded: false,
                confirmed: self.is_confirmed(index),
                correct: self.correctness(index),
            };
        }

        self.answers.insert(index, answer);
        if self.questions[index].is_auto_confirm() {
            self.confirmed.insert(index, true);
        }

        AnswerOutcome {
            recorded: true,
            confirmed: self.is_confirmed(index),
            correct: self.correctness(index),
        }
    }

    /// Explicit confirmation for short-answer steps. Confirming with no
    /// answer entered is a silent no-op, not an error.
    pub fn confirm_current(&mut self) -> AnswerOutcome {
        let index = self.current_index;
        if !self.result_revealed && !self.is_confirmed(index) && self.answers.contains_key(&index)
        {
            self.confirmed.insert(index, true);
        }
        AnswerOutcome {
            recorded: false,
            confirmed: self.is_confirmed(index),
            correct: self.correctness(index),
        }
    }

    /// Advancing requires the current step to be confirmed; from the last
    /// step it reveals the result instead.
    pub fn advance(&mut self) -> Option<Advance> {
        if self.result_revealed || !self.is_confirmed(self.current_index) {
            return None;
        }
        if self.current_index + 1 < self.questions.len() {
            self.current_index += 1;
            Some(Advance::Next(self.current_index))
        } else {
            self.result_revealed = true;
            Some(Advance::Finished)
        }
    }

    /// Restart the attempt over the same question set.
    pub fn reset_for_retry(&mut self) {
        self.current_index = 0;
        self.answers.clear();
        self.confirmed.clear();
        self.started_at = Utc::now();
        self.result_revealed = false;
        self.stats_recorded = false;
    }

    pub fn score(&self) -> usize {
        self.questions
            .iter()
            .enumerate()
            .filter(|(idx, q)| {
                self.answers
                    .get(idx)
                    .map(|a| answer_matches(a, &q.correct_answer))
                    .unwrap_or(false)
            })
            .count()
    }

    pub fn elapsed_seconds(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds().max(0)
    }

    /// Correctness is only revealed once the step is confirmed.
    fn correctness(&self, index: usize) -> Option<bool> {
        if !self.is_confirmed(index) {
            return None;
        }
        let answer = self.answers.get(&index)?;
        Some(answer_matches(answer, &self.questions[index].correct_answer))
    }
}
