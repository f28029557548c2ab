use crate::error::{Error, Result};
use crate::services::ai_service::{GeminiService, GenerationRequest};
use crate::store::KvStore;

const EMPTY_THEORY_FALLBACK: &str = "Không tìm thấy nội dung lý thuyết.";

#[derive(Debug, Clone)]
pub struct TheoryContent {
    pub content: String,
    pub cached: bool,
}

/// Lesson theory with an unconditional, append-only cache keyed by lesson
/// and grade. Cached entries never expire and are never invalidated; the
/// `v1` marker exists so a future format change can abandon them wholesale.
#[derive(Clone)]
pub struct TheoryService {
    store: KvStore,
}

impl TheoryService {
    pub fn new(store: KvStore) -> Self {
        Self { store }
    }

    pub fn cache_key(grade: &str, lesson_title: &str) -> String {
        format!("theory_v1_{}_{}", grade, lesson_title)
    }

    /// Cache hit short-circuits with no network activity. On a miss the
    /// generated text is stored whatever it says; only a terminal
    /// all-candidates failure skips the cache and is surfaced as an
    /// apologetic message instead of an error.
    pub async fn lesson_theory(
        &self,
        ai: &GeminiService,
        grade: &str,
        lesson_title: &str,
    ) -> Result<TheoryContent> {
        let key = Self::cache_key(grade, lesson_title);
        if let Some(content) = self.store.get_as::<String>(&key) {
            return Ok(TheoryContent {
                content,
                cached: true,
            });
        }

        let req = GenerationRequest::text(theory_prompt(lesson_title, grade), 0.3);
        match ai.generate_text(&req).await {
            Ok(text) => {
                let content = if text.trim().is_empty() {
                    EMPTY_THEORY_FALLBACK.to_string()
                } else {
                    text
                };
                self.store.set(&key, &content)?;
                Ok(TheoryContent {
                    content,
                    cached: false,
                })
            }
            Err(err @ Error::ExhaustedFallback { .. }) => {
                tracing::error!("Theory generation error: {}", err);
                Ok(TheoryContent {
                    content: format!(
                        "Lỗi hệ thống: {}. Vui lòng kiểm tra API Key hoặc thử lại sau.",
                        err
                    ),
                    cached: false,
                })
            }
            Err(err) => Err(err),
        }
    }

    /// One self-contained HTML file simulating the lesson's key concept.
    /// Unlike theory, failures here propagate: the caller shows an error.
    pub async fn lesson_simulation(
        &self,
        ai: &GeminiService,
        lesson_title: &str,
        user_request: Option<&str>,
    ) -> Result<String> {
        let req = GenerationRequest::text(simulation_prompt(lesson_title, user_request), 0.7);
        let code = ai.generate_text(&req).await?;
        Ok(strip_html_fences(&code))
    }
}

fn strip_html_fences(code: &str) -> String {
    code.replace("```html", "").replace("```", "").trim().to_string()
}

fn theory_prompt(lesson_title: &str, grade: &str) -> String {
    format!(
        r#"Nhiệm vụ: Tóm tắt lý thuyết bài học "{lesson_title}" - KHTN Lớp {grade} (Sách Kết nối tri thức).

Yêu cầu đầu ra:
1. Nội dung phải cực kỳ CÔ ĐỌNG, NGẮN GỌN, súc tích (dạng Cheat Sheet).
2. Chỉ giữ lại:
   - Các định nghĩa cốt lõi nhất.
   - Các công thức quan trọng (Bắt buộc dùng LaTeX, ví dụ: $v = \frac{{s}}{{t}}$).
   - 1-2 ví dụ minh họa hoặc lưu ý quan trọng.
3. Trình bày bằng Markdown đẹp mắt:
   - Dùng **in đậm** cho từ khóa.
   - Dùng gạch đầu dòng cho các ý.
4. Không viết lời dẫn, vào thẳng nội dung."#
    )
}

fn simulation_prompt(lesson_title: &str, user_request: Option<&str>) -> String {
    let request = user_request
        .filter(|r| !r.trim().is_empty())
        .unwrap_or("Mô phỏng khái niệm quan trọng nhất của bài học này");
    format!(
        r#"Bạn là một kỹ sư Frontend và chuyên gia giáo dục.
Nhiệm vụ: Tạo một file HTML đơn duy nhất (Single File HTML) chứa CSS và JavaScript để mô phỏng trực quan kiến thức khoa học.

Bài học: "{lesson_title}"
Yêu cầu cụ thể của người dùng: "{request}"

Yêu cầu kỹ thuật:
1. Output CHỈ LÀ CODE HTML. Không kèm lời dẫn, không markdown fences (```html).
2. Code phải bao gồm đầy đủ:
   - CSS (trong thẻ <style>): Giao diện đẹp, hiện đại, dùng màu sắc tươi sáng, font chữ dễ đọc. Center nội dung.
   - HTML: Cấu trúc rõ ràng, có tiêu đề, vùng mô phỏng (canvas hoặc div), và các nút điều khiển (nếu cần).
   - JS (trong thẻ <script>): Logic mô phỏng. Nên dùng HTML5 Canvas API cho chuyển động mượt mà hoặc DOM manipulation.
3. Tính tương tác:
   - Phải có ít nhất 1 yếu tố tương tác (slider thay đổi thông số, nút bấm Bắt đầu/Dừng, hoặc kéo thả).
   - Ví dụ: Nếu là bài "Áp suất", cho slider chỉnh độ cao cột nước. Nếu là "Tế bào", cho click vào các bộ phận để hiện tên.
4. Đảm bảo code chạy được ngay lập tức khi mở trên trình duyệt mà không cần thư viện ngoài (hoặc dùng CDN phổ biến như Tailwind nếu cần thiết)."#
    )
}
