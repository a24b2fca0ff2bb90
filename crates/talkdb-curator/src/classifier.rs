//! Batch classification of news headlines into safe conversation topics.

use std::time::Duration;

use talkdb_core::{AppConfig, NewsItem};

use crate::blocklist::{has_question_suffix, is_political};
use crate::parse::{parse_ai_response, CandidateTopic, ParseOutcome};
use crate::prompt::build_prompt;
use crate::TextGenerator;

#[derive(Debug, Clone)]
pub struct ClassifierSettings {
    pub batch_size: usize,
    /// Only the first `max_items` news items are considered.
    pub max_items: usize,
    /// Pause between consecutive model requests.
    pub batch_delay: Duration,
}

impl ClassifierSettings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            batch_size: config.ai_batch_size,
            max_items: config.ai_max_items,
            batch_delay: Duration::from_millis(config.ai_batch_delay_ms),
        }
    }
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            batch_size: 5,
            max_items: 50,
            batch_delay: Duration::from_millis(1500),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    /// Model answered; `kept` topics passed the safety and title checks.
    Accepted { kept: usize, rejected: usize },
    /// Every item in the batch hit the blocklist; the model was not called.
    Skipped,
    /// Model answered with nothing usable.
    Empty,
    Malformed(String),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    /// Zero-based batch number.
    pub index: usize,
    /// Items sent to the model after the blocklist.
    pub sent: usize,
    pub outcome: BatchOutcome,
}

#[derive(Debug, Clone, Default)]
pub struct ClassificationReport {
    pub topics: Vec<CandidateTopic>,
    pub batches: Vec<BatchReport>,
}

/// Classify `news` in fixed-size batches.
///
/// A failed or unparsable batch contributes nothing and the run moves on.
pub async fn classify_news<G>(
    generator: &G,
    news: &[NewsItem],
    settings: &ClassifierSettings,
) -> ClassificationReport
where
    G: TextGenerator + ?Sized,
{
    let considered = &news[..news.len().min(settings.max_items)];
    let mut report = ClassificationReport::default();
    let mut requested = false;

    for (index, batch) in considered.chunks(settings.batch_size.max(1)).enumerate() {
        let allowed: Vec<&NewsItem> = batch
            .iter()
            .filter(|item| !is_political(&item.title, &item.description))
            .collect();

        if allowed.is_empty() {
            tracing::debug!(batch = index + 1, "all items blocklisted, skipping batch");
            report.batches.push(BatchReport {
                index,
                sent: 0,
                outcome: BatchOutcome::Skipped,
            });
            continue;
        }

        if requested && !settings.batch_delay.is_zero() {
            tokio::time::sleep(settings.batch_delay).await;
        }
        requested = true;

        let outcome = match generator.generate(&build_prompt(&allowed)).await {
            Err(e) => {
                tracing::warn!(batch = index + 1, error = %e, "model request failed");
                BatchOutcome::Failed(e.to_string())
            }
            Ok(text) => match parse_ai_response(&text) {
                ParseOutcome::Parsed(candidates) => {
                    let total = candidates.len();
                    let before = report.topics.len();
                    report.topics.extend(
                        candidates
                            .into_iter()
                            .filter(|t| t.is_safe && !has_question_suffix(&t.talk_topic)),
                    );
                    let kept = report.topics.len() - before;
                    tracing::info!(batch = index + 1, kept, "model batch classified");
                    BatchOutcome::Accepted {
                        kept,
                        rejected: total - kept,
                    }
                }
                ParseOutcome::Empty => BatchOutcome::Empty,
                ParseOutcome::Malformed(reason) => {
                    tracing::warn!(batch = index + 1, reason = %reason, "unparsable model answer");
                    BatchOutcome::Malformed(reason)
                }
            },
        };

        report.batches.push(BatchReport {
            index,
            sent: allowed.len(),
            outcome,
        });
    }

    tracing::info!(
        topics = report.topics.len(),
        batches = report.batches.len(),
        "classification complete"
    );
    report
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::CuratorError;

    /// Replays canned answers in order and records the prompts it saw.
    struct ScriptedGenerator {
        answers: Mutex<Vec<Result<String, CuratorError>>>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedGenerator {
        fn new(answers: Vec<Result<String, CuratorError>>) -> Self {
            Self {
                answers: Mutex::new(answers.into_iter().rev().collect()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn generate(&self, prompt: &str) -> Result<String, CuratorError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.answers
                .lock()
                .unwrap()
                .pop()
                .unwrap_or(Ok("[]".to_string()))
        }
    }

    fn news(title: &str) -> NewsItem {
        NewsItem {
            title: title.to_string(),
            description: String::new(),
            link: String::new(),
            original_link: None,
            published_at: None,
        }
    }

    fn topic_json(topic: &str, is_safe: bool) -> String {
        format!(
            r#"{{"original_title":"t","is_safe":{is_safe},"talk_topic":"{topic}","description":"d","category":"life","situation":["friend"],"age_group":"all"}}"#
        )
    }

    fn settings(batch_size: usize, max_items: usize) -> ClassifierSettings {
        ClassifierSettings {
            batch_size,
            max_items,
            batch_delay: Duration::ZERO,
        }
    }

    #[tokio::test]
    async fn keeps_only_safe_non_question_topics() {
        let answer = format!(
            "[{},{},{}]",
            topic_json("성수동 팝업스토어", true),
            topic_json("사건 사고", false),
            topic_json("새 영화 보셨어요", true)
        );
        let generator = ScriptedGenerator::new(vec![Ok(answer)]);
        let items = vec![news("a"), news("b"), news("c")];

        let report = classify_news(&generator, &items, &settings(5, 50)).await;
        assert_eq!(report.topics.len(), 1);
        assert_eq!(report.topics[0].talk_topic, "성수동 팝업스토어");
        assert_eq!(
            report.batches[0].outcome,
            BatchOutcome::Accepted {
                kept: 1,
                rejected: 2
            }
        );
    }

    #[tokio::test]
    async fn caps_input_and_batches_it() {
        let generator = ScriptedGenerator::new(vec![]);
        let items: Vec<NewsItem> = (0..12).map(|i| news(&format!("제목 {i}"))).collect();

        let report = classify_news(&generator, &items, &settings(5, 10)).await;
        assert_eq!(generator.calls(), 2);
        assert_eq!(report.batches.len(), 2);
        assert!(report
            .batches
            .iter()
            .all(|b| b.outcome == BatchOutcome::Empty));
    }

    #[tokio::test]
    async fn blocklisted_batch_is_skipped_without_model_call() {
        let generator = ScriptedGenerator::new(vec![]);
        let items = vec![news("국회 본회의 개최"), news("대통령 순방")];

        let report = classify_news(&generator, &items, &settings(5, 50)).await;
        assert_eq!(generator.calls(), 0);
        assert_eq!(report.batches[0].outcome, BatchOutcome::Skipped);
    }

    #[tokio::test]
    async fn blocklisted_items_are_left_out_of_prompt() {
        let generator = ScriptedGenerator::new(vec![]);
        let items = vec![news("국회 소식"), news("신상 디저트 출시")];

        let report = classify_news(&generator, &items, &settings(5, 50)).await;
        assert_eq!(report.batches[0].sent, 1);
        let prompts = generator.prompts.lock().unwrap();
        assert!(prompts[0].contains("1. 신상 디저트 출시"));
        assert!(!prompts[0].contains("국회 소식"));
    }

    #[tokio::test]
    async fn failed_and_malformed_batches_do_not_stop_the_run() {
        let generator = ScriptedGenerator::new(vec![
            Err(CuratorError::EmptyResponse),
            Ok("모르겠어요".to_string()),
            Ok(format!("[{}]", topic_json("야구 개막전", true))),
        ]);
        let items: Vec<NewsItem> = (0..3).map(|i| news(&format!("제목 {i}"))).collect();

        let report = classify_news(&generator, &items, &settings(1, 50)).await;
        assert!(matches!(report.batches[0].outcome, BatchOutcome::Failed(_)));
        assert!(matches!(
            report.batches[1].outcome,
            BatchOutcome::Malformed(_)
        ));
        assert_eq!(report.topics.len(), 1);
    }
}
