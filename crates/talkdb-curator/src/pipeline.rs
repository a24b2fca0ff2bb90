//! Daily update: collect, classify, deduplicate, persist, log.

use std::collections::HashSet;
use std::time::Instant;

use chrono::{TimeDelta, Utc};
use serde::Serialize;
use talkdb_core::{
    AppConfig, CronStatus, NewCronLog, NewTalk, NewsItem, TalkStore, NEWS_SOURCE,
};
use talkdb_news::{collect_news, CollectorSettings, NewsSearch};

use crate::classifier::{classify_news, ClassifierSettings};
use crate::error::PipelineError;
use crate::fallback::{fallback_talks, source_url};
use crate::parse::CandidateTopic;
use crate::TextGenerator;

#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub collector: CollectorSettings,
    pub classifier: ClassifierSettings,
    /// News items requested from the collector.
    pub target_count: usize,
    /// Topics created within this window are not inserted again.
    pub dedup_window: TimeDelta,
    pub fallback_limit: usize,
}

impl PipelineSettings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            collector: CollectorSettings::from_app_config(config),
            classifier: ClassifierSettings::from_app_config(config),
            target_count: config.news_target_count,
            dedup_window: TimeDelta::hours(i64::from(config.dedup_window_hours)),
            fallback_limit: config.fallback_limit,
        }
    }
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            collector: CollectorSettings::default(),
            classifier: ClassifierSettings::default(),
            target_count: 100,
            dedup_window: TimeDelta::hours(6),
            fallback_limit: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    Ai,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub collected: usize,
    /// Topics accepted by the classifier, before deduplication.
    pub filtered: usize,
    pub saved: usize,
    pub mode: RunMode,
    pub duration_ms: u64,
}

/// Run one full update and append exactly one cron-log row describing it.
///
/// If every model batch comes back empty, unverified template topics are
/// built from the headlines instead. Both paths skip topics already created
/// within [`PipelineSettings::dedup_window`].
///
/// # Errors
///
/// Returns [`PipelineError::NoNewsCollected`] when the collector finds nothing
/// and [`PipelineError::Store`] when reading recent topics or inserting fails.
/// A failure to write the cron log is logged and does not change the result.
pub async fn run_daily_update<N, G, S>(
    news: &N,
    generator: &G,
    store: &S,
    settings: &PipelineSettings,
) -> Result<RunSummary, PipelineError>
where
    N: NewsSearch + ?Sized,
    G: TextGenerator + ?Sized,
    S: TalkStore + ?Sized,
{
    let started = Instant::now();
    tracing::info!("daily update started");

    let result = run_steps(news, generator, store, settings).await;
    let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    let log = match &result {
        Ok(counts) => NewCronLog {
            status: CronStatus::Success,
            error_message: None,
            news_collected: Some(counts.collected),
            topics_filtered: Some(counts.filtered),
            topics_saved: Some(counts.saved),
            duration_ms,
        },
        Err(e) => NewCronLog {
            status: CronStatus::Error,
            error_message: Some(e.to_string()),
            news_collected: None,
            topics_filtered: None,
            topics_saved: None,
            duration_ms,
        },
    };
    if let Err(e) = store.append_cron_log(&log).await {
        tracing::warn!(error = %e, "failed to write cron log");
    }

    match result {
        Ok(counts) => {
            tracing::info!(
                collected = counts.collected,
                filtered = counts.filtered,
                saved = counts.saved,
                mode = ?counts.mode,
                duration_ms,
                "daily update completed"
            );
            Ok(RunSummary {
                collected: counts.collected,
                filtered: counts.filtered,
                saved: counts.saved,
                mode: counts.mode,
                duration_ms,
            })
        }
        Err(e) => {
            tracing::error!(error = %e, duration_ms, "daily update failed");
            Err(e)
        }
    }
}

struct RunCounts {
    collected: usize,
    filtered: usize,
    saved: usize,
    mode: RunMode,
}

async fn run_steps<N, G, S>(
    news: &N,
    generator: &G,
    store: &S,
    settings: &PipelineSettings,
) -> Result<RunCounts, PipelineError>
where
    N: NewsSearch + ?Sized,
    G: TextGenerator + ?Sized,
    S: TalkStore + ?Sized,
{
    let collection = collect_news(news, &settings.collector, settings.target_count).await;
    let items = collection.items;
    if items.is_empty() {
        return Err(PipelineError::NoNewsCollected);
    }

    let classification = classify_news(generator, &items, &settings.classifier).await;
    let filtered = classification.topics.len();

    let (drafts, mode) = if filtered == 0 {
        let drafts = fallback_talks(&items, settings.fallback_limit);
        if drafts.is_empty() {
            (drafts, RunMode::Ai)
        } else {
            tracing::warn!(
                topics = drafts.len(),
                "model returned no topics, using keyword fallback"
            );
            (drafts, RunMode::Fallback)
        }
    } else {
        let drafts = classification
            .topics
            .into_iter()
            .map(|topic| to_new_talk(topic, &items))
            .collect();
        (drafts, RunMode::Ai)
    };

    let since = Utc::now() - settings.dedup_window;
    let existing = store.topics_created_since(since).await?;
    let fresh = dedupe(drafts, &existing);

    let saved = if fresh.is_empty() {
        0
    } else {
        store.insert_talks(&fresh).await?
    };

    Ok(RunCounts {
        collected: items.len(),
        filtered,
        saved,
        mode,
    })
}

fn to_new_talk(topic: CandidateTopic, news: &[NewsItem]) -> NewTalk {
    let origin = news.iter().find(|item| item.title == topic.original_title);
    NewTalk {
        talk_topic: topic.talk_topic,
        description: Some(topic.description).filter(|d| !d.is_empty()),
        conversation_tip: topic.conversation_tip.filter(|t| !t.is_empty()),
        category: topic.category,
        situations: topic.situations,
        age_group: topic.age_group,
        source: NEWS_SOURCE.to_string(),
        source_url: origin.and_then(source_url),
        published_at: origin.and_then(|item| item.published_at),
        is_verified: true,
    }
}

/// Drop talks whose lowercase topic is in `existing` or already seen in this run.
fn dedupe(drafts: Vec<NewTalk>, existing: &[String]) -> Vec<NewTalk> {
    let mut seen: HashSet<String> = existing.iter().map(|t| t.to_lowercase()).collect();
    let total = drafts.len();
    let fresh: Vec<NewTalk> = drafts
        .into_iter()
        .filter(|talk| seen.insert(talk.talk_topic.to_lowercase()))
        .collect();
    if fresh.len() < total {
        tracing::debug!(skipped = total - fresh.len(), "skipped duplicate topics");
    }
    fresh
}
