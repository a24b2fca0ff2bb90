//! Headline cleanup and near-duplicate detection.

use std::sync::LazyLock;

use regex::Regex;

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));

/// Strip markup tags and decode the handful of entities the search API emits.
///
/// `&amp;` is decoded after `&quot;`/`&apos;` and before `&lt;`/`&gt;`, so
/// `&amp;lt;` becomes `<`.
#[must_use]
pub fn clean_text(raw: &str) -> String {
    TAG_RE
        .replace_all(raw, "")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
}

/// Share of `a`'s space-separated words that also appear in `b`, divided by
/// the longer word count.
#[must_use]
pub fn title_similarity(a: &str, b: &str) -> f64 {
    let words_a: Vec<&str> = a.split(' ').collect();
    let words_b: Vec<&str> = b.split(' ').collect();

    let matches = words_a.iter().filter(|w| words_b.contains(w)).count();
    let longest = words_a.len().max(words_b.len());

    #[allow(clippy::cast_precision_loss)]
    let ratio = matches as f64 / longest as f64;
    ratio
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_bold_tags_from_search_hits() {
        assert_eq!(clean_text("<b>손흥민</b> 시즌 10호골"), "손흥민 시즌 10호골");
    }

    #[test]
    fn decodes_entities() {
        assert_eq!(
            clean_text("&quot;대박&quot; &apos;신상&apos; A&amp;B 1&lt;2&gt;0"),
            "\"대박\" '신상' A&B 1<2>0"
        );
    }

    #[test]
    fn amp_is_decoded_before_lt() {
        assert_eq!(clean_text("&amp;lt;"), "<");
    }

    #[test]
    fn identical_titles_are_fully_similar() {
        let t = "삼성 신제품 스마트폰 공개 행사";
        assert!((title_similarity(t, t) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn similarity_uses_longer_title_as_denominator() {
        let sim = title_similarity("a b c", "a b c d e");
        assert!((sim - 0.6).abs() < 1e-9);
    }

    #[test]
    fn disjoint_titles_have_zero_similarity() {
        assert!(title_similarity("맛집 추천", "우승 경기").abs() < f64::EPSILON);
    }
}
