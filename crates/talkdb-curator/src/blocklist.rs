//! Static keyword lists applied before and instead of the model.

/// Political names and terms; any news item mentioning one never reaches the model.
pub const POLITICAL_KEYWORDS: &[&str] = &[
    "이재명", "한동훈", "트럼프", "바이든", "푸틴", "시진핑",
    "대통령", "국회", "의원", "장관", "정부", "여당", "야당",
    "민주당", "국민의힘", "정치", "선거", "투표", "공약",
    "탄핵", "특검", "검찰", "법원", "재판", "기소",
    "국정", "정책", "법안", "국회의원", "청와대", "당대표",
];

/// Title terms excluded by the keyword fallback.
pub const FALLBACK_EXCLUDE: &[&str] = &["정치", "선거", "국회", "살인", "폭행", "사망"];

/// Question-style endings rejected in generated topic titles.
pub const QUESTION_SUFFIXES: &[&str] = &["아세요", "보셨어요", "하시나요", "하셨나요"];

/// Case-insensitive substring match of `title` and `description` against
/// [`POLITICAL_KEYWORDS`].
#[must_use]
pub fn is_political(title: &str, description: &str) -> bool {
    let text = format!("{title} {description}").to_lowercase();
    POLITICAL_KEYWORDS
        .iter()
        .any(|keyword| text.contains(&keyword.to_lowercase()))
}

#[must_use]
pub fn has_question_suffix(topic: &str) -> bool {
    QUESTION_SUFFIXES.iter().any(|s| topic.contains(s))
}
