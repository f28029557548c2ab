use serde::Serialize;

/// Static reference table of the grade 6-9 natural-science curriculum
/// (Kết nối tri thức textbook series). Read-only; quiz and theory prompts
/// embed the lesson titles verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Subject {
    Physics,
    Chemistry,
    Biology,
    General,
}

#[derive(Debug, Clone, Serialize)]
pub struct Lesson {
    pub id: u32,
    pub title: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Chapter {
    pub id: &'static str,
    pub title: &'static str,
    pub subject: Subject,
    pub lessons: &'static [Lesson],
}

pub const GRADES: [&str; 4] = ["6", "7", "8", "9"];

pub fn chapters_for(grade: &str) -> Option<&'static [Chapter]> {
    match grade {
        "6" => Some(GRADE_6),
        "7" => Some(GRADE_7),
        "8" => Some(GRADE_8),
        "9" => Some(GRADE_9),
        _ => None,
    }
}

macro_rules! lessons {
    ($(($id:expr, $title:expr)),* $(,)?) => {
        &[$(Lesson { id: $id, title: $title }),*]
    };
}

static GRADE_6: &[Chapter] = &[
    Chapter {
        id: "I",
        title: "Chương I: Mở đầu về KHTN",
        subject: Subject::General,
        lessons: lessons![
            (1, "Giới thiệu về Khoa học tự nhiên"),
            (2, "An toàn trong phòng thực hành"),
            (3, "Sử dụng kính lúp"),
            (4, "Sử dụng kính hiển vi quang học"),
            (5, "Đo chiều dài"),
            (6, "Đo khối lượng"),
            (7, "Đo thời gian"),
            (8, "Đo nhiệt độ"),
        ],
    },
    Chapter {
        id: "II",
        title: "Chương II: Chất quanh ta",
        subject: Subject::Chemistry,
        lessons: lessons![
            (9, "Sự đa dạng của chất"),
            (10, "Các thể của chất và sự chuyển thể"),
            (11, "Oxygen. Không khí"),
        ],
    },
    Chapter {
        id: "III",
        title: "Chương III: Vật liệu, Nhiên liệu",
        subject: Subject::Chemistry,
        lessons: lessons![
            (12, "Một số vật liệu"),
            (13, "Một số nguyên liệu"),
            (14, "Một số nhiên liệu"),
            (15, "Một số lương thực, thực phẩm"),
        ],
    },
    Chapter {
        id: "IV",
        title: "Chương IV: Hỗn hợp",
        subject: Subject::Chemistry,
        lessons: lessons![
            (16, "Hỗn hợp các chất"),
            (17, "Tách chất khỏi hỗn hợp"),
        ],
    },
    Chapter {
        id: "V",
        title: "Chương V: Tế bào",
        subject: Subject::Biology,
        lessons: lessons![
            (18, "Tế bào - Đơn vị cơ bản của sự sống"),
            (19, "Cấu tạo và chức năng các thành phần của tế bào"),
            (20, "Sự lớn lên và sinh sản của tế bào"),
        ],
    },
    Chapter {
        id: "VI",
        title: "Chương VI: Từ tế bào đến cơ thể",
        subject: Subject::Biology,
        lessons: lessons![
            (22, "Cơ thể sinh vật"),
            (23, "Tổ chức cơ thể đa bào"),
        ],
    },
    Chapter {
        id: "VII",
        title: "Chương VII: Đa dạng thế giới sống",
        subject: Subject::Biology,
        lessons: lessons![
            (25, "Hệ thống phân loại sinh vật"),
            (27, "Vi khuẩn"),
            (29, "Virus"),
            (30, "Nguyên sinh vật"),
            (32, "Nấm"),
            (34, "Thực vật"),
            (36, "Động vật"),
            (38, "Đa dạng sinh học"),
        ],
    },
    Chapter {
        id: "VIII",
        title: "Chương VIII: Lực trong đời sống",
        subject: Subject::Physics,
        lessons: lessons![
            (40, "Lực là gì?"),
            (41, "Biểu diễn lực"),
            (42, "Biến dạng của lò xo"),
            (43, "Trọng lượng, lực hấp dẫn"),
            (44, "Lực ma sát"),
        ],
    },
    Chapter {
        id: "IX",
        title: "Chương IX: Năng lượng",
        subject: Subject::Physics,
        lessons: lessons![
            (46, "Năng lượng và sự truyền năng lượng"),
            (47, "Một số dạng năng lượng"),
            (48, "Sự chuyển hóa năng lượng"),
            (50, "Năng lượng tái tạo"),
        ],
    },
    Chapter {
        id: "X",
        title: "Chương X: Trái đất và Bầu trời",
        subject: Subject::Physics,
        lessons: lessons![
            (52, "Chuyển động nhìn thấy của Mặt trời"),
            (53, "Mặt trăng"),
            (54, "Hệ Mặt trời"),
            (55, "Ngân Hà"),
        ],
    },
];

static GRADE_7: &[Chapter] = &[
    Chapter {
        id: "I",
        title: "Chương I: Nguyên tử & Bảng tuần hoàn",
        subject: Subject::Chemistry,
        lessons: lessons![
            (1, "Phương pháp và kĩ năng học tập môn KHTN"),
            (2, "Nguyên tử"),
            (3, "Nguyên tố hóa học"),
            (4, "Sơ lược về bảng tuần hoàn các nguyên tố hóa học"),
        ],
    },
    Chapter {
        id: "II",
        title: "Chương II: Phân tử & Liên kết hóa học",
        subject: Subject::Chemistry,
        lessons: lessons![
            (5, "Phân tử - Đơn chất - Hợp chất"),
            (6, "Giới thiệu về liên kết hóa học"),
            (7, "Hóa trị và công thức hóa học"),
        ],
    },
    Chapter {
        id: "III",
        title: "Chương III: Tốc độ",
        subject: Subject::Physics,
        lessons: lessons![
            (8, "Tốc độ chuyển động"),
            (9, "Đo tốc độ"),
            (10, "Đồ thị quãng đường - thời gian"),
            (11, "Thảo luận về ảnh hưởng của tốc độ trong an toàn giao thông"),
        ],
    },
    Chapter {
        id: "IV",
        title: "Chương IV: Âm thanh",
        subject: Subject::Physics,
        lessons: lessons![
            (12, "Sóng âm"),
            (13, "Độ to và độ cao của âm"),
            (14, "Phản xạ âm, chống ô nhiễm tiếng ồn"),
        ],
    },
    Chapter {
        id: "V",
        title: "Chương V: Ánh sáng",
        subject: Subject::Physics,
        lessons: lessons![
            (15, "Năng lượng ánh sáng. Tia sáng, vùng tối"),
            (16, "Sự phản xạ ánh sáng"),
            (17, "Ảnh của vật qua gương phẳng"),
        ],
    },
    Chapter {
        id: "VI",
        title: "Chương VI: Từ trường",
        subject: Subject::Physics,
        lessons: lessons![
            (18, "Nam châm"),
            (19, "Từ trường"),
            (20, "Chế tạo nam châm điện đơn giản"),
        ],
    },
    Chapter {
        id: "VII",
        title: "Chương VII: Trao đổi chất & Chuyển hóa năng lượng",
        subject: Subject::Biology,
        lessons: lessons![
            (21, "Khái quát về trao đổi chất và chuyển hóa năng lượng"),
            (22, "Quang hợp ở thực vật"),
            (23, "Hô hấp tế bào"),
            (24, "Trao đổi khí ở sinh vật"),
            (25, "Trao đổi nước và chất dinh dưỡng ở thực vật"),
            (26, "Trao đổi nước và chất dinh dưỡng ở động vật"),
        ],
    },
    Chapter {
        id: "VIII",
        title: "Chương VIII: Cảm ứng ở sinh vật",
        subject: Subject::Biology,
        lessons: lessons![
            (27, "Cảm ứng ở thực vật"),
            (28, "Cảm ứng ở động vật"),
            (29, "Tập tính ở động vật"),
        ],
    },
    Chapter {
        id: "IX",
        title: "Chương IX: Sinh trưởng và phát triển",
        subject: Subject::Biology,
        lessons: lessons![
            (30, "Sinh trưởng và phát triển ở thực vật"),
            (31, "Sinh trưởng và phát triển ở động vật"),
        ],
    },
    Chapter {
        id: "X",
        title: "Chương X: Sinh sản ở sinh vật",
        subject: Subject::Biology,
        lessons: lessons![
            (32, "Sinh sản vô tính ở sinh vật"),
            (33, "Sinh sản hữu tính ở sinh vật"),
            (34, "Các yếu tố ảnh hưởng đến sinh sản"),
        ],
    },
];

static GRADE_8: &[Chapter] = &[
    Chapter {
        id: "I",
        title: "Chương I: Phản ứng hóa học",
        subject: Subject::Chemistry,
        lessons: lessons![
            (1, "Biến đổi vật lí và biến đổi hóa học"),
            (2, "Phản ứng hóa học"),
            (3, "Định luật bảo toàn khối lượng"),
            (4, "Phương trình hóa học"),
            (5, "Tính theo phương trình hóa học"),
        ],
    },
    Chapter {
        id: "II",
        title: "Chương II: Một số hợp chất thông dụng",
        subject: Subject::Chemistry,
        lessons: lessons![
            (6, "Acid"),
            (7, "Base"),
            (8, "Thang đo pH"),
            (9, "Oxide"),
            (10, "Muối"),
            (11, "Phân bón hóa học"),
        ],
    },
    Chapter {
        id: "III",
        title: "Chương III: Khối lượng riêng & Áp suất",
        subject: Subject::Physics,
        lessons: lessons![
            (12, "Khối lượng riêng"),
            (13, "Áp suất"),
            (14, "Áp suất chất lỏng"),
            (15, "Áp suất khí quyển"),
            (16, "Lực đẩy Archimedes"),
        ],
    },
    Chapter {
        id: "IV",
        title: "Chương IV: Tác dụng làm quay của lực",
        subject: Subject::Physics,
        lessons: lessons![(17, "Moment lực"), (18, "Đòn bẩy")],
    },
    Chapter {
        id: "V",
        title: "Chương V: Điện",
        subject: Subject::Physics,
        lessons: lessons![
            (19, "Điện tích. Dòng điện"),
            (20, "Mạch điện và các bộ phận của mạch điện"),
            (21, "Tác dụng của dòng điện"),
            (22, "Cường độ dòng điện và Hiệu điện thế"),
        ],
    },
    Chapter {
        id: "VI",
        title: "Chương VI: Nhiệt",
        subject: Subject::Physics,
        lessons: lessons![
            (23, "Năng lượng nhiệt"),
            (24, "Sự truyền nhiệt"),
            (25, "Sự nở vì nhiệt"),
        ],
    },
    Chapter {
        id: "VII",
        title: "Chương VII: Cơ thể người",
        subject: Subject::Biology,
        lessons: lessons![
            (26, "Hệ vận động"),
            (27, "Dinh dưỡng và Tiêu hóa"),
            (28, "Máu và Hệ tuần hoàn"),
            (29, "Hệ hô hấp"),
            (30, "Hệ bài tiết"),
            (31, "Hệ thần kinh và các giác quan"),
            (32, "Hệ nội tiết"),
            (33, "Da và điều hòa thân nhiệt"),
            (34, "Sinh sản ở người"),
        ],
    },
    Chapter {
        id: "VIII",
        title: "Chương VIII: Sinh vật và môi trường",
        subject: Subject::Biology,
        lessons: lessons![
            (35, "Môi trường sống và các nhân tố sinh thái"),
            (36, "Quần thể sinh vật"),
            (37, "Quần xã sinh vật"),
            (38, "Hệ sinh thái"),
            (39, "Cân bằng tự nhiên"),
            (40, "Bảo vệ môi trường"),
        ],
    },
];

static GRADE_9: &[Chapter] = &[
    Chapter {
        id: "I",
        title: "Chương I: Năng lượng cơ học",
        subject: Subject::Physics,
        lessons: lessons![
            (1, "Động năng. Thế năng"),
            (2, "Cơ năng"),
            (3, "Công và Công suất"),
        ],
    },
    Chapter {
        id: "II",
        title: "Chương II: Ánh sáng",
        subject: Subject::Physics,
        lessons: lessons![
            (4, "Khúc xạ ánh sáng"),
            (5, "Thấu kính hội tụ"),
            (6, "Thấu kính phân kì"),
            (7, "Mắt và các tật của mắt"),
            (8, "Kính lúp"),
        ],
    },
    Chapter {
        id: "III",
        title: "Chương III: Điện tích & Từ trường",
        subject: Subject::Physics,
        lessons: lessons![
            (9, "Định luật Ohm"),
            (10, "Đoạn mạch nối tiếp và song song"),
            (11, "Điện năng và công suất điện"),
            (12, "Cảm ứng điện từ"),
            (13, "Dòng điện xoay chiều"),
        ],
    },
    Chapter {
        id: "IV",
        title: "Chương IV: Kim loại",
        subject: Subject::Chemistry,
        lessons: lessons![
            (14, "Tính chất chung của kim loại"),
            (15, "Dãy hoạt động hóa học của kim loại"),
            (16, "Hợp kim. Sự ăn mòn kim loại"),
        ],
    },
    Chapter {
        id: "V",
        title: "Chương V: Hóa học hữu cơ",
        subject: Subject::Chemistry,
        lessons: lessons![
            (17, "Hợp chất hữu cơ"),
            (18, "Methane. Ethylene"),
            (19, "Acetylene"),
            (20, "Rượu Etylic (Ethanol)"),
            (21, "Acid Acetic"),
            (22, "Chất béo"),
            (23, "Glucose. Saccharose. Tinh bột. Cellulose"),
            (24, "Protein. Polymer"),
        ],
    },
    Chapter {
        id: "VI",
        title: "Chương VI: Di truyền và Biến dị",
        subject: Subject::Biology,
        lessons: lessons![
            (25, "Mendel và Khái niệm di truyền"),
            (26, "Nhiễm sắc thể"),
            (27, "DNA và Gene"),
            (28, "Đột biến gen"),
            (29, "Đột biến nhiễm sắc thể"),
        ],
    },
    Chapter {
        id: "VII",
        title: "Chương VII: Tiến hóa",
        subject: Subject::Biology,
        lessons: lessons![
            (30, "Bằng chứng tiến hóa"),
            (31, "Cơ chế tiến hóa"),
            (32, "Sự phát sinh loài người"),
        ],
    },
];
