//! Rule-based keyword extraction for the keyword cloud.
//!
//! Only pure-Hangul tokens are counted. Particles, copulas, question endings,
//! time words and verb-final forms are discarded so that the remaining tokens
//! are mostly nouns (people, titles, products, places).

use std::collections::HashMap;

use serde::Serialize;

/// Tokens never reported as keywords.
pub(crate) const STOP_WORDS: &[&str] = &[
    // particles, copulas, basic verbs
    "하다", "되다", "있다", "없다", "이다", "아니다", "같다", "보다", "하는", "있는", "없는",
    "에서", "으로", "부터", "까지", "에게", "한테", "처럼", "만큼", "위해", "위한",
    // question endings
    "요즘", "아세요", "보셨어요", "해보셨어요", "아시나요", "하시나요", "하셨나요",
    // time words
    "오늘", "어제", "내일", "이번", "지난", "다음", "최근", "올해", "작년", "내년",
    "시간", "동안",
    // counting words
    "하나", "다섯",
    // reporting verbs and event nouns
    "말했다", "밝혔다", "전했다", "열린", "열렸다", "진행", "시작",
    "발표", "공개", "출시", "개최", "예정",
    // filler
    "대화", "주제", "이야기", "얘기", "관련", "통해", "대한", "대표", "해당", "이후", "이날",
    "경기는", "경기가", "기록했다", "위를", "등을", "가장", "글로벌", "핵심",
    "국내", "해외", "한국", "우리나라",
];

/// Color tags cycled in rank order.
pub const PALETTE: &[&str] = &[
    "red", "orange", "amber", "yellow", "lime", "green", "emerald", "teal", "cyan", "sky",
    "blue", "indigo", "violet", "purple", "fuchsia", "pink", "rose",
];

const MIN_TOKEN_CHARS: usize = 2;
const MAX_TOKEN_CHARS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordConfig {
    pub max_keywords: usize,
    pub min_count: usize,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            max_keywords: 25,
            min_count: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordTag {
    pub keyword: String,
    pub count: usize,
    pub color: &'static str,
}

/// Extract ranked keywords from `(topic, description)` pairs.
///
/// Ranking is by count descending, ties broken by the keyword in ascending
/// order, so the output is fully determined by the input multiset.
pub fn extract_keywords<'a, I>(records: I, config: &KeywordConfig) -> Vec<KeywordTag>
where
    I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
{
    let mut counts: HashMap<String, usize> = HashMap::new();

    for (topic, description) in records {
        let text = format!("{topic} {}", description.unwrap_or_default());
        for token in tokenize(&text) {
            *counts.entry(token).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    ranked
        .into_iter()
        .take(config.max_keywords)
        .filter(|(_, count)| *count >= config.min_count)
        .enumerate()
        .map(|(rank, (keyword, count))| KeywordTag {
            keyword,
            count,
            color: PALETTE[rank % PALETTE.len()],
        })
        .collect()
}

fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_ascii_digit())
        .map(|c| match c {
            '?' | ',' | '!' | '.' | '\'' | '"' | '(' | ')' => ' ',
            other => other,
        })
        .collect();

    cleaned
        .split_whitespace()
        .filter(|word| is_candidate(word))
        .map(ToOwned::to_owned)
        .collect()
}

fn is_candidate(word: &str) -> bool {
    let len = word.chars().count();
    if !(MIN_TOKEN_CHARS..=MAX_TOKEN_CHARS).contains(&len) {
        return false;
    }
    if STOP_WORDS.contains(&word) {
        return false;
    }
    if !word.chars().all(is_hangul_syllable) {
        return false;
    }
    // verb-final forms (-다, -ㄴ다, -는다)
    !word.ends_with('다')
}

fn is_hangul_syllable(c: char) -> bool {
    ('가'..='힣').contains(&c)
}
