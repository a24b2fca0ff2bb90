//! Template topics built straight from headlines when the model yields nothing.

use talkdb_core::{AgeGroup, Category, NewTalk, NewsItem, Situation, NEWS_SOURCE};

use crate::blocklist::FALLBACK_EXCLUDE;

const MAX_TITLE_CHARS: usize = 40;
const CUT_TITLE_CHARS: usize = 37;
const MAX_DESCRIPTION_CHARS: usize = 100;

/// Up to `limit` unverified talks from headlines that avoid [`FALLBACK_EXCLUDE`].
#[must_use]
pub fn fallback_talks(news: &[NewsItem], limit: usize) -> Vec<NewTalk> {
    news.iter()
        .filter(|item| !FALLBACK_EXCLUDE.iter().any(|kw| item.title.contains(kw)))
        .take(limit)
        .map(|item| NewTalk {
            talk_topic: question_topic(&item.title),
            description: Some(item.description.chars().take(MAX_DESCRIPTION_CHARS).collect()),
            conversation_tip: None,
            category: Category::Life,
            situations: vec![Situation::Company, Situation::Friend],
            age_group: AgeGroup::All,
            source: NEWS_SOURCE.to_string(),
            source_url: source_url(item),
            published_at: item.published_at,
            is_verified: false,
        })
        .collect()
}

fn question_topic(title: &str) -> String {
    if title.chars().count() > MAX_TITLE_CHARS {
        let cut: String = title.chars().take(CUT_TITLE_CHARS).collect();
        format!("{cut}... 아세요?")
    } else {
        format!("{title} 아세요?")
    }
}

/// Prefer the publisher's link over the portal link.
pub(crate) fn source_url(item: &NewsItem) -> Option<String> {
    item.original_link
        .clone()
        .or_else(|| Some(item.link.clone()).filter(|l| !l.is_empty()))
}
