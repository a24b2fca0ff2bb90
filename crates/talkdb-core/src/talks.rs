//! Talk domain types shared by the collector, curator, database and API layers.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Topic category shown as a filter chip in the browsing UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Entertain,
    Sports,
    Food,
    Tech,
    Life,
}

impl Category {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Entertain => "entertain",
            Self::Sports => "sports",
            Self::Food => "food",
            Self::Tech => "tech",
            Self::Life => "life",
        }
    }
}

impl FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "entertain" => Ok(Self::Entertain),
            "sports" => Ok(Self::Sports),
            "food" => Ok(Self::Food),
            "tech" => Ok(Self::Tech),
            "life" => Ok(Self::Life),
            other => Err(CoreError::InvalidTag {
                kind: "category",
                value: other.to_string(),
            }),
        }
    }
}

/// Social situation a topic suits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Situation {
    Company,
    Date,
    Friend,
}

impl Situation {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Company => "company",
            Self::Date => "date",
            Self::Friend => "friend",
        }
    }
}

impl FromStr for Situation {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "company" => Ok(Self::Company),
            "date" => Ok(Self::Date),
            "friend" => Ok(Self::Friend),
            other => Err(CoreError::InvalidTag {
                kind: "situation",
                value: other.to_string(),
            }),
        }
    }
}

/// Target age band. `All` matches every age filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeGroup {
    #[serde(rename = "20s")]
    Twenties,
    #[serde(rename = "30s")]
    Thirties,
    #[serde(rename = "40s")]
    Forties,
    #[serde(rename = "all")]
    All,
}

impl AgeGroup {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Twenties => "20s",
            Self::Thirties => "30s",
            Self::Forties => "40s",
            Self::All => "all",
        }
    }
}

impl FromStr for AgeGroup {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "20s" => Ok(Self::Twenties),
            "30s" => Ok(Self::Thirties),
            "40s" => Ok(Self::Forties),
            "all" => Ok(Self::All),
            other => Err(CoreError::InvalidTag {
                kind: "age_group",
                value: other.to_string(),
            }),
        }
    }
}

/// A cleaned news headline produced by the collector. Never persisted directly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewsItem {
    pub title: String,
    pub description: String,
    pub link: String,
    pub original_link: Option<String>,
    /// `None` when the upstream date could not be parsed; such items sort last.
    pub published_at: Option<DateTime<Utc>>,
}

/// Source tag written on talks created from the news-search feed.
pub const NEWS_SOURCE: &str = "naver_news";

/// A talk ready to be inserted into the `talks` table.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTalk {
    pub talk_topic: String,
    pub description: Option<String>,
    pub conversation_tip: Option<String>,
    pub category: Category,
    pub situations: Vec<Situation>,
    pub age_group: AgeGroup,
    pub source: String,
    pub source_url: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub is_verified: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CronStatus {
    Success,
    Error,
}

impl CronStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// One append-only row describing a pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCronLog {
    pub status: CronStatus,
    pub error_message: Option<String>,
    pub news_collected: Option<usize>,
    pub topics_filtered: Option<usize>,
    pub topics_saved: Option<usize>,
    pub duration_ms: u64,
}

/// Browsing filter over situation, age group and category.
///
/// `None` in any field disables that filter, mirroring the "all" chip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TalkFilter {
    pub situation: Option<Situation>,
    pub age_group: Option<AgeGroup>,
    pub category: Option<Category>,
}

impl TalkFilter {
    /// Build a filter from raw query-string values, treating `"all"` and
    /// empty strings as "no filter".
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTag`] for values that are not a known tag.
    pub fn from_params(
        situation: Option<&str>,
        age_group: Option<&str>,
        category: Option<&str>,
    ) -> Result<Self, CoreError> {
        fn active(value: Option<&str>) -> Option<&str> {
            value.map(str::trim).filter(|v| !v.is_empty() && *v != "all")
        }

        Ok(Self {
            situation: active(situation).map(str::parse).transpose()?,
            age_group: active(age_group).map(str::parse).transpose()?,
            category: active(category).map(str::parse).transpose()?,
        })
    }

    /// A talk tagged `AgeGroup::All` passes any age filter.
    #[must_use]
    pub fn matches(
        &self,
        category: Category,
        situations: &[Situation],
        age_group: AgeGroup,
    ) -> bool {
        let situation_ok = self.situation.is_none_or(|s| situations.contains(&s));
        let age_ok = self
            .age_group
            .is_none_or(|a| age_group == a || age_group == AgeGroup::All);
        let category_ok = self.category.is_none_or(|c| category == c);
        situation_ok && age_ok && category_ok
    }
}
