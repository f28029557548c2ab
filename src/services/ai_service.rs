use crate::error::{Error, Result};
use crate::models::question::{Question, QuestionType};
use crate::store::KvStore;
use futures_util::StreamExt;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value as JsonValue};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

/// Known backend generation variants, in the fixed order used after the
/// preferred one. Names are opaque preferences, not a capability ranking.
pub const AVAILABLE_MODELS: [&str; 3] = [
    "gemini-3-flash-preview",
    "gemini-3-pro-preview",
    "gemini-2.5-flash",
];

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

pub const API_KEY_STORE_KEY: &str = "GEMINI_API_KEY";
pub const MODEL_STORE_KEY: &str = "GEMINI_MODEL";

pub const QUIZ_LEN: usize = 15;

#[derive(Debug, Clone)]
pub struct Attachment {
    pub mime_type: String,
    /// Base64-encoded payload, already validated at the API boundary.
    pub data: String,
}

#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub prompt: String,
    pub system_instruction: Option<String>,
    pub attachment: Option<Attachment>,
    pub temperature: f32,
    pub response_schema: Option<JsonValue>,
}

impl GenerationRequest {
    pub fn text(prompt: impl Into<String>, temperature: f32) -> Self {
        Self {
            prompt: prompt.into(),
            system_instruction: None,
            attachment: None,
            temperature,
            response_schema: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HintMode {
    Gentle,
    Detailed,
}

/// Candidate order for one logical request: the preferred identifier first,
/// then the rest of the known list, each identifier exactly once.
pub fn fallback_order(preferred: &str) -> Vec<String> {
    let mut order = vec![preferred.to_string()];
    order.extend(
        AVAILABLE_MODELS
            .iter()
            .filter(|m| **m != preferred)
            .map(|m| m.to_string()),
    );
    order
}

/// Client for the generative-language backend. Every request walks the
/// candidate order sequentially and short-circuits on the first success;
/// only when every candidate has failed does the caller see an error.
#[derive(Clone)]
pub struct GeminiService {
    client: Client,
    store: KvStore,
    base_url: String,
    env_api_key: Option<String>,
}

impl GeminiService {
    pub fn new(
        client: Client,
        store: KvStore,
        base_url: String,
        env_api_key: Option<String>,
    ) -> Self {
        Self {
            client,
            store,
            base_url,
            env_api_key,
        }
    }

    /// The user-supplied key wins over the environment fallback. Absence is
    /// a precondition failure: no request is attempted without a key.
    fn api_key(&self) -> Result<String> {
        self.store
            .get_as::<String>(API_KEY_STORE_KEY)
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.env_api_key.clone())
            .ok_or_else(|| {
                Error::Config("Vui lòng nhập API Key trong phần Cài đặt.".to_string())
            })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key().is_ok()
    }

    pub fn preferred_model(&self) -> String {
        self.store
            .get_as::<String>(MODEL_STORE_KEY)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string())
    }

    /// Plain-text generation with fallback across the candidate order.
    pub async fn generate_text(&self, req: &GenerationRequest) -> Result<String> {
        let api_key = self.api_key()?;
        let mut attempts: Vec<(String, String)> = Vec::new();

        for model in fallback_order(&self.preferred_model()) {
            tracing::debug!("Attempting with model: {}", model);
            match self.generate_once(&api_key, &model, req).await {
                Ok(text) => return Ok(text),
                Err(e) => {
                    let reason = format!("{:#}", e);
                    tracing::warn!("Model {} failed: {}", model, reason);
                    attempts.push((model, reason));
                }
            }
        }

        Err(exhausted(attempts))
    }

    /// Structured generation: the response text must parse as `T` and pass
    /// the caller's structural check. A parse or validation failure is
    /// treated exactly like a backend failure and triggers fallback.
    pub async fn generate_json<T, F>(&self, req: &GenerationRequest, validate: F) -> Result<T>
    where
        T: DeserializeOwned,
        F: Fn(&T) -> std::result::Result<(), String>,
    {
        let api_key = self.api_key()?;
        let mut attempts: Vec<(String, String)> = Vec::new();

        for model in fallback_order(&self.preferred_model()) {
            tracing::debug!("Attempting with model: {}", model);
            let outcome = match self.generate_once(&api_key, &model, req).await {
                Ok(text) => match serde_json::from_str::<T>(text.trim()) {
                    Ok(parsed) => match validate(&parsed) {
                        Ok(()) => return Ok(parsed),
                        Err(reason) => reason,
                    },
                    Err(e) => format!("unparseable structured response: {}", e),
                },
                Err(e) => format!("{:#}", e),
            };
            tracing::warn!("Model {} failed: {}", model, outcome);
            attempts.push((model, outcome));
        }

        Err(exhausted(attempts))
    }

    /// Generate the fixed 15-question quiz for a lesson.
    pub async fn generate_quiz(&self, lesson_title: &str, grade: &str) -> Result<Vec<Question>> {
        let req = GenerationRequest {
            prompt: quiz_prompt(lesson_title, grade),
            system_instruction: None,
            attachment: None,
            temperature: 0.5,
            response_schema: Some(quiz_schema()),
        };
        self.generate_json(&req, validate_quiz).await
    }

    /// Open a token stream, falling back across candidates during the
    /// connection phase only. Once fragments have been handed out the
    /// stream is never restarted on another candidate: an interruption
    /// appends one diagnostic fragment and ends. A total connection
    /// failure also surfaces in-band, as a single terminal fragment.
    pub async fn stream_generate(&self, req: GenerationRequest) -> Result<ReceiverStream<String>> {
        let api_key = self.api_key()?;
        let order = fallback_order(&self.preferred_model());
        let (tx, rx) = mpsc::channel::<String>(32);

        let client = self.client.clone();
        let base_url = self.base_url.clone();
        tokio::spawn(async move {
            stream_task(client, base_url, api_key, order, req, tx).await;
        });

        Ok(ReceiverStream::new(rx))
    }

    /// Chat-tutor stream with the mode-specific system instruction.
    pub async fn stream_tutor(
        &self,
        prompt: String,
        mode: HintMode,
        attachment: Option<Attachment>,
    ) -> Result<ReceiverStream<String>> {
        let req = GenerationRequest {
            system_instruction: Some(tutor_instruction(mode, attachment.is_some())),
            prompt,
            attachment,
            temperature: 0.7,
            response_schema: None,
        };
        self.stream_generate(req).await
    }

    async fn generate_once(
        &self,
        api_key: &str,
        model: &str,
        req: &GenerationRequest,
    ) -> anyhow::Result<String> {
        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, model);
        let res = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&request_body(req))
            .timeout(Duration::from_secs(120))
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            anyhow::bail!("Backend error {}: {}", status, text);
        }

        let body: JsonValue = res.json().await?;
        extract_text(&body).ok_or_else(|| anyhow::anyhow!("AI không trả về nội dung"))
    }
}

fn exhausted(attempts: Vec<(String, String)>) -> Error {
    tracing::error!("All models failed: {:?}", attempts);
    let last = attempts
        .last()
        .map(|(_, reason)| reason.clone())
        .unwrap_or_else(|| "no candidate models configured".to_string());
    Error::ExhaustedFallback {
        attempts: attempts.len(),
        last,
    }
}

/// The backend expects a binary attachment part ahead of the text part.
fn request_body(req: &GenerationRequest) -> JsonValue {
    let mut parts = Vec::new();
    if let Some(att) = &req.attachment {
        parts.push(json!({
            "inline_data": { "mime_type": att.mime_type, "data": att.data }
        }));
    }
    parts.push(json!({ "text": req.prompt }));

    let mut generation_config = json!({ "temperature": req.temperature });
    if let Some(schema) = &req.response_schema {
        generation_config["responseMimeType"] = json!("application/json");
        generation_config["responseSchema"] = schema.clone();
    }

    let mut body = json!({
        "contents": [{ "parts": parts }],
        "generationConfig": generation_config,
    });
    if let Some(instruction) = &req.system_instruction {
        body["systemInstruction"] = json!({ "parts": [{ "text": instruction }] });
    }
    body
}

/// Concatenated text of the first candidate's parts. `None` when the
/// response carries no content structure at all.
fn extract_text(body: &JsonValue) -> Option<String> {
    let parts = body
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .as_array()?;
    Some(
        parts
            .iter()
            .filter_map(|p| p.get("text").and_then(|t| t.as_str()))
            .collect::<Vec<_>>()
            .concat(),
    )
}

async fn stream_task(
    client: Client,
    base_url: String,
    api_key: String,
    order: Vec<String>,
    req: GenerationRequest,
    tx: mpsc::Sender<String>,
) {
    let body = request_body(&req);

    let mut response = None;
    let mut last_err = String::new();
    for model in &order {
        tracing::debug!("Stream connecting to: {}", model);
        let url = format!(
            "{}/v1beta/models/{}:streamGenerateContent?alt=sse",
            base_url, model
        );
        let attempt = client
            .post(&url)
            .header("x-goog-api-key", &api_key)
            .json(&body)
            .send()
            .await;
        match attempt {
            Ok(res) if res.status().is_success() => {
                response = Some(res);
                break;
            }
            Ok(res) => {
                let status = res.status();
                let text = res.text().await.unwrap_or_default();
                last_err = format!("Backend error {}: {}", status, text);
                tracing::warn!("Stream connection failed for {}: {}", model, last_err);
            }
            Err(e) => {
                last_err = e.to_string();
                tracing::warn!("Stream connection failed for {}: {}", model, last_err);
            }
        }
    }

    let Some(response) = response else {
        let _ = tx
            .send(format!(
                "Lỗi kết nối API: {}. Vui lòng kiểm tra API Key hoặc thử lại sau.",
                last_err
            ))
            .await;
        return;
    };

    let mut buf = String::new();
    let mut chunks = response.bytes_stream();
    while let Some(chunk) = chunks.next().await {
        match chunk {
            Ok(chunk) => {
                buf.push_str(&String::from_utf8_lossy(&chunk));
                while let Some(pos) = buf.find('\n') {
                    let line = buf[..pos].trim_end_matches('\r').to_string();
                    buf.drain(..=pos);
                    if let Some(fragment) = parse_sse_line(&line) {
                        if tx.send(fragment).await.is_err() {
                            // Receiver is gone; stop consuming the stream.
                            return;
                        }
                    }
                }
            }
            Err(e) => {
                tracing::error!("Stream interrupted: {}", e);
                let _ = tx
                    .send("\n[Kết nối bị gián đoạn. Vui lòng thử lại]".to_string())
                    .await;
                return;
            }
        }
    }
    if let Some(fragment) = parse_sse_line(buf.trim_end()) {
        let _ = tx.send(fragment).await;
    }
}

fn parse_sse_line(line: &str) -> Option<String> {
    let payload = line.strip_prefix("data:")?.trim();
    if payload.is_empty() || payload == "[DONE]" {
        return None;
    }
    let value: JsonValue = serde_json::from_str(payload).ok()?;
    let text = extract_text(&value)?;
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Structural check applied after JSON parsing; any violation sends the
/// fallback loop to the next candidate.
fn validate_quiz(questions: &Vec<Question>) -> std::result::Result<(), String> {
    if questions.len() != QUIZ_LEN {
        return Err(format!(
            "expected {} questions, got {}",
            QUIZ_LEN,
            questions.len()
        ));
    }
    for q in questions {
        match q.question_type {
            QuestionType::ShortAnswer => {
                return Err("generated quizzes must not contain short_answer items".to_string());
            }
            QuestionType::MultipleChoice => {
                let count = q.options.as_ref().map(|o| o.len()).unwrap_or(0);
                if count < 2 {
                    return Err(format!(
                        "multiple_choice question {} has {} options",
                        q.id, count
                    ));
                }
            }
            QuestionType::TrueFalse => {}
        }
        if q.correct_answer.trim().is_empty() {
            return Err(format!("question {} is missing its correct answer", q.id));
        }
    }
    Ok(())
}

fn quiz_prompt(lesson_title: &str, grade: &str) -> String {
    format!(
        r#"Bạn là một chuyên gia giáo dục và gia sư khoa học nghiêm túc. Hãy tạo một bộ đề bài tập gồm ĐÚNG 15 câu hỏi cho bài học: "{lesson_title}" trong chương trình Khoa học tự nhiên lớp {grade} (Sách Kết nối tri thức với cuộc sống).

Yêu cầu TỐI QUAN TRỌNG:
1. Nội dung câu hỏi và đáp án phải CHÍNH XÁC TUYỆT ĐỐI, bám sát từng chi tiết nhỏ trong bài học của sách giáo khoa Kết nối tri thức. Không bịa đặt kiến thức ngoài SGK.
2. Đáp án đúng phải là duy nhất và không gây tranh cãi.
3. Cấu trúc đề:
   - 5 câu mức độ "nhan_biet" (Dễ - Nhớ kiến thức SGK).
   - 5 câu mức độ "thong_hieu" (Trung bình - Hiểu bản chất).
   - 5 câu mức độ "van_dung" (Khó - Vận dụng giải quyết vấn đề).
4. Các loại câu hỏi phải trộn lẫn giữa 2 dạng sau:
   - Trắc nghiệm khách quan 4 phương án (type: "multiple_choice", options: ["A...", "B...", "C...", "D..."]).
   - Trắc nghiệm Đúng/Sai (type: "true_false", correctAnswer: "Đúng" hoặc "Sai").
5. TUYỆT ĐỐI KHÔNG tạo câu hỏi trả lời ngắn.
6. Sử dụng LaTeX cho các công thức hóa học (ví dụ: $H_2O$) hoặc vật lý nếu có.
7. Phản hồi bằng định dạng JSON chuẩn theo schema."#
    )
}

fn quiz_schema() -> JsonValue {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "id": { "type": "NUMBER" },
                "type": { "type": "STRING", "description": "multiple_choice or true_false" },
                "question": { "type": "STRING" },
                "options": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" },
                    "description": "Chỉ dành cho multiple_choice. Cung cấp đúng 4 phương án."
                },
                "correctAnswer": {
                    "type": "STRING",
                    "description": "Đáp án đúng chính xác hoặc \"Đúng\"/\"Sai\" cho câu hỏi true_false"
                },
                "difficulty": { "type": "STRING", "description": "nhan_biet, thong_hieu, hoặc van_dung" },
                "explanation": { "type": "STRING" }
            },
            "required": ["id", "type", "question", "correctAnswer", "difficulty", "explanation"]
        }
    })
}

fn tutor_instruction(mode: HintMode, has_attachment: bool) -> String {
    let mut instruction = String::from(
        "Bạn là Gia sư KHTN Thông minh (Vật lý, Hóa học, Sinh học). Nhiệm vụ của bạn là giải đáp thắc mắc và hỗ trợ giải bài tập. ",
    );

    if has_attachment {
        instruction.push_str(
            "
KHI PHÂN TÍCH HÌNH ẢNH/TÀI LIỆU:
1. Đọc kỹ đề bài, số liệu, đồ thị hoặc sơ đồ trong ảnh.
2. Tóm tắt lại yêu cầu của bài toán trong ảnh.
3. Nếu ảnh mờ hoặc không rõ, hãy hỏi lại học sinh.
",
        );
    }

    match mode {
        HintMode::Gentle => instruction.push_str(
            "
CHẾ ĐỘ GỢI Ý NHẸ (TƯ DUY):
- Tuyệt đối KHÔNG đưa ra đáp án cuối cùng ngay lập tức.
- Chỉ đưa ra các gợi ý về phương pháp, nhắc lại định lý hoặc công thức liên quan.
- Đặt câu hỏi gợi mở để học sinh tự suy nghĩ và tìm ra hướng giải.
- Khuyến khích tư duy logic.
",
        ),
        HintMode::Detailed => instruction.push_str(
            "
CHẾ ĐỘ GỢI Ý CHI TIẾT (CẦM TAY CHỈ VIỆC):
- Hướng dẫn giải từng bước cụ thể (Step-by-step).
- Cung cấp rõ ràng công thức, phép toán cần sử dụng.
- Giải thích chi tiết tại sao lại làm như vậy.
",
        ),
    }

    instruction
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::Difficulty;

    #[test]
    fn fallback_order_puts_preferred_first_without_duplicates() {
        let order = fallback_order("gemini-3-pro-preview");
        assert_eq!(order[0], "gemini-3-pro-preview");
        assert_eq!(order.len(), AVAILABLE_MODELS.len());
        let mut sorted = order.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), order.len());
    }

    #[test]
    fn fallback_order_keeps_unknown_preferred_in_front() {
        let order = fallback_order("experimental-model");
        assert_eq!(order[0], "experimental-model");
        assert_eq!(order.len(), AVAILABLE_MODELS.len() + 1);
    }

    fn question(question_type: QuestionType, options: Option<Vec<String>>) -> Question {
        Question {
            id: 1,
            question_type,
            question: "?".into(),
            options,
            correct_answer: "Đúng".into(),
            difficulty: Difficulty::NhanBiet,
            explanation: String::new(),
        }
    }

    fn valid_quiz() -> Vec<Question> {
        (0..QUIZ_LEN)
            .map(|_| question(QuestionType::TrueFalse, None))
            .collect()
    }

    #[test]
    fn quiz_validation_accepts_a_complete_set() {
        assert!(validate_quiz(&valid_quiz()).is_ok());
    }

    #[test]
    fn quiz_validation_rejects_wrong_count() {
        let mut quiz = valid_quiz();
        quiz.pop();
        assert!(validate_quiz(&quiz).is_err());
    }

    #[test]
    fn quiz_validation_rejects_short_answer_items() {
        let mut quiz = valid_quiz();
        quiz[3] = question(QuestionType::ShortAnswer, None);
        assert!(validate_quiz(&quiz).is_err());
    }

    #[test]
    fn quiz_validation_rejects_choice_without_options() {
        let mut quiz = valid_quiz();
        quiz[0] = question(QuestionType::MultipleChoice, None);
        assert!(validate_quiz(&quiz).is_err());
    }

    #[test]
    fn quiz_validation_rejects_empty_correct_answer() {
        let mut quiz = valid_quiz();
        quiz[0].correct_answer = "  ".into();
        assert!(validate_quiz(&quiz).is_err());
    }

    #[test]
    fn attachment_part_precedes_text() {
        let req = GenerationRequest {
            prompt: "giải giúp mình".into(),
            system_instruction: None,
            attachment: Some(Attachment {
                mime_type: "image/png".into(),
                data: "aGVsbG8=".into(),
            }),
            temperature: 0.7,
            response_schema: None,
        };
        let body = request_body(&req);
        let parts = body["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 2);
        assert!(parts[0].get("inline_data").is_some());
        assert_eq!(parts[1]["text"], "giải giúp mình");
    }

    #[test]
    fn sse_lines_yield_fragments() {
        let line = r#"data: {"candidates":[{"content":{"parts":[{"text":"Xin chào"}]}}]}"#;
        assert_eq!(parse_sse_line(line).unwrap(), "Xin chào");
        assert_eq!(parse_sse_line("event: ping"), None);
        assert_eq!(parse_sse_line("data: [DONE]"), None);
    }

    #[test]
    fn tutor_instruction_varies_by_mode() {
        let gentle = tutor_instruction(HintMode::Gentle, false);
        assert!(gentle.contains("KHÔNG đưa ra đáp án"));
        let detailed = tutor_instruction(HintMode::Detailed, true);
        assert!(detailed.contains("Step-by-step"));
        assert!(detailed.contains("HÌNH ẢNH"));
    }
}
