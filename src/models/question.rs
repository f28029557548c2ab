use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    #[serde(default)]
    pub id: i64,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(rename = "correctAnswer")]
    pub correct_answer: String,
    pub difficulty: Difficulty,
    pub explanation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
    ShortAnswer,
}

/// Bloom-style levels used by the curriculum: recall, comprehension,
/// application. The wire names are the Vietnamese ones the question
/// generator is prompted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    NhanBiet,
    ThongHieu,
    VanDung,
}

/// Answers compare equal after trimming surrounding whitespace and Unicode
/// case folding, so "đúng " matches "Đúng". No partial credit beyond that.
pub fn answer_matches(submitted: &str, correct: &str) -> bool {
    normalize(submitted) == normalize(correct)
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

impl Question {
    pub fn is_auto_confirm(&self) -> bool {
        matches!(
            self.question_type,
            QuestionType::MultipleChoice | QuestionType::TrueFalse
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_trims_and_case_folds() {
        assert!(answer_matches("đúng ", "Đúng"));
        assert!(answer_matches("  SAI", "Sai"));
        assert!(!answer_matches("đúng", "Sai"));
    }

    #[test]
    fn wire_names_match_generator_schema() {
        let raw = serde_json::json!({
            "id": 3,
            "type": "true_false",
            "question": "Nước sôi ở 100°C?",
            "correctAnswer": "Đúng",
            "difficulty": "nhan_biet",
            "explanation": "Ở áp suất khí quyển tiêu chuẩn."
        });
        let q: Question = serde_json::from_value(raw).unwrap();
        assert_eq!(q.question_type, QuestionType::TrueFalse);
        assert_eq!(q.difficulty, Difficulty::NhanBiet);
        assert!(q.options.is_none());
    }
}
