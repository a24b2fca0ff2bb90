//! News collection: many small keyword searches merged into one
//! deduplicated, newest-first list.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::time::Duration;

use chrono::{DateTime, Utc};
use talkdb_core::{AppConfig, NewsItem};

use crate::clean::{clean_text, title_similarity};
use crate::{NewsSearch, RawNewsItem};

/// Broad topical search terms covering trends, entertainment, sports, food,
/// tech and lifestyle. Each term is queried once per run.
pub const SEARCH_QUERIES: &[&str] = &[
    // trends
    "요즘", "화제", "인기", "뜨는", "유행", "핫한", "대박", "신기록", "최고", "역대급", "신상",
    "출시",
    // entertainment
    "영화", "드라마", "예능", "음악", "공연", "전시", "신곡", "컴백", "데뷔", "1위",
    // sports
    "승리", "우승", "경기", "득점", "기록", "시즌", "결승", "메달",
    // food
    "맛집", "카페", "신메뉴", "디저트", "레시피", "베이커리", "편의점", "배달",
    // tech
    "신제품", "업데이트", "앱", "게임", "기능", "스마트폰", "인공지능",
    // lifestyle
    "여행", "패션", "뷰티", "건강", "취미", "반려동물", "인테리어", "꿀팁",
    // general
    "추천", "붐", "mz", "트렌드", "신규", "베스트", "오픈", "론칭", "화제작", "이벤트", "축제",
    "체험", "방문",
];

#[derive(Debug, Clone)]
pub struct CollectorSettings {
    /// Items requested per search term.
    pub per_query: u32,
    /// Cleaned titles shorter than this many characters are dropped.
    pub min_title_chars: usize,
    /// Titles whose similarity to an accepted title is strictly greater are dropped.
    pub similarity_threshold: f64,
    /// Pause between consecutive search requests.
    pub query_delay: Duration,
}

impl CollectorSettings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            per_query: config.news_per_query,
            min_title_chars: config.news_min_title_chars,
            similarity_threshold: config.news_similarity_threshold,
            query_delay: Duration::from_millis(config.news_query_delay_ms),
        }
    }
}

impl Default for CollectorSettings {
    fn default() -> Self {
        Self {
            per_query: 3,
            min_title_chars: 15,
            similarity_threshold: 0.7,
            query_delay: Duration::from_millis(150),
        }
    }
}

/// Outcome of one collection run.
#[derive(Debug, Clone, Default)]
pub struct CollectionReport {
    /// Deduplicated items, newest first, at most `target` long.
    pub items: Vec<NewsItem>,
    /// Search terms whose request failed and were skipped.
    pub failed_queries: Vec<String>,
}

/// Run every term in [`SEARCH_QUERIES`] against `search` and merge the hits.
///
/// A failing term is logged, recorded in [`CollectionReport::failed_queries`]
/// and skipped. An empty result is not an error.
pub async fn collect_news<S>(
    search: &S,
    settings: &CollectorSettings,
    target: usize,
) -> CollectionReport
where
    S: NewsSearch + ?Sized,
{
    collect_from_queries(search, SEARCH_QUERIES, settings, target).await
}

pub(crate) async fn collect_from_queries<S>(
    search: &S,
    queries: &[&str],
    settings: &CollectorSettings,
    target: usize,
) -> CollectionReport
where
    S: NewsSearch + ?Sized,
{
    let mut accepted = TitleSet::default();
    let mut items: Vec<NewsItem> = Vec::new();
    let mut failed_queries = Vec::new();

    for (index, query) in queries.iter().enumerate() {
        if index > 0 && !settings.query_delay.is_zero() {
            tokio::time::sleep(settings.query_delay).await;
        }

        let hits = match search.search(query, settings.per_query).await {
            Ok(hits) => hits,
            Err(e) => {
                tracing::warn!(query, error = %e, "news search failed, skipping term");
                failed_queries.push((*query).to_string());
                continue;
            }
        };

        let before = items.len();
        for hit in hits {
            if let Some(item) = accept(hit, &mut accepted, settings) {
                items.push(item);
            }
        }

        let added = items.len() - before;
        if added > 0 {
            tracing::debug!(query, added, "news search added items");
        }
    }

    sort_newest_first(&mut items);
    items.truncate(target);

    tracing::info!(
        collected = items.len(),
        failed = failed_queries.len(),
        "news collection complete"
    );

    CollectionReport {
        items,
        failed_queries,
    }
}

#[derive(Default)]
struct TitleSet {
    exact: HashSet<String>,
    ordered: Vec<String>,
}

impl TitleSet {
    fn admits(&self, title: &str, threshold: f64) -> bool {
        !self.exact.contains(title)
            && !self
                .ordered
                .iter()
                .any(|existing| title_similarity(title, existing) > threshold)
    }

    fn insert(&mut self, title: &str) {
        self.exact.insert(title.to_string());
        self.ordered.push(title.to_string());
    }
}

fn accept(
    hit: RawNewsItem,
    accepted: &mut TitleSet,
    settings: &CollectorSettings,
) -> Option<NewsItem> {
    let title = clean_text(&hit.title);
    if title.chars().count() < settings.min_title_chars {
        return None;
    }
    if !accepted.admits(&title, settings.similarity_threshold) {
        return None;
    }
    accepted.insert(&title);

    let original_link = Some(hit.original_link).filter(|link| !link.is_empty());

    Some(NewsItem {
        title,
        description: clean_text(&hit.description),
        link: hit.link,
        original_link,
        published_at: parse_pub_date(&hit.pub_date),
    })
}

/// Parse the RFC 2822 `pubDate` the search API returns.
fn parse_pub_date(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(raw.trim())
        .ok()
        .map(|d| d.with_timezone(&Utc))
}

/// Stable sort by publish time, newest first; undated items go last.
fn sort_newest_first(items: &mut [NewsItem]) {
    items.sort_by(|a, b| match (a.published_at, b.published_at) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}
