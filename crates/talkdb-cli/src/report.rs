//! Command handlers that print to stdout.

use anyhow::Context;
use chrono::{NaiveDate, NaiveTime};
use sqlx::PgPool;
use talkdb_core::elements::{analyze_team, Element, MemberProfile};
use talkdb_core::keywords::{extract_keywords, KeywordConfig};
use talkdb_core::AppConfig;
use talkdb_curator::DailyUpdate;
use talkdb_db::PgTalkStore;
use talkdb_news::{collect_news, CollectorSettings, NaverNewsClient};

/// Parse `name:YYYY-MM-DD[:HH:MM]`.
pub(crate) fn parse_member(raw: &str) -> anyhow::Result<MemberProfile> {
    let (name, rest) = raw
        .split_once(':')
        .with_context(|| format!("member '{raw}' must look like name:YYYY-MM-DD[:HH:MM]"))?;
    let name = name.trim();
    anyhow::ensure!(!name.is_empty(), "member '{raw}' has an empty name");

    let (date, time) = match rest.split_once(':') {
        Some((date, time)) => (date, Some(time)),
        None => (rest, None),
    };
    let birth_date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .with_context(|| format!("invalid birth date '{date}' for {name}"))?;
    let birth_time = time
        .map(|t| {
            NaiveTime::parse_from_str(t, "%H:%M")
                .with_context(|| format!("invalid birth time '{t}' for {name}"))
        })
        .transpose()?;

    Ok(MemberProfile {
        name: name.to_string(),
        birth_date,
        birth_time,
    })
}

pub(crate) fn run_elements(raw_members: &[String]) -> anyhow::Result<()> {
    let members = raw_members
        .iter()
        .map(|m| parse_member(m))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let analysis = analyze_team(&members)?;

    let header = Element::ALL
        .iter()
        .map(|e| format!("{:<6}", e.label()))
        .collect::<String>();
    println!("{:<12}{header}", "NAME");
    for member in &analysis.members {
        let counts = Element::ALL
            .iter()
            .map(|e| format!("{:<6}", member.elements.get(*e)))
            .collect::<String>();
        println!("{:<12}{counts}", member.name);
    }
    println!();
    println!("compatibility: {:.1}", analysis.compatibility);
    for insight in &analysis.insights {
        println!("- {insight}");
    }
    for pair in &analysis.relationships {
        println!("{} / {}: {}", pair.person1, pair.person2, pair.description);
    }

    Ok(())
}

pub(crate) async fn run_keywords(pool: &PgPool, limit: i64) -> anyhow::Result<()> {
    let sources = talkdb_db::list_keyword_sources(pool, limit.max(1)).await?;
    let tags = extract_keywords(
        sources
            .iter()
            .map(|(topic, description)| (topic.as_str(), description.as_deref())),
        &KeywordConfig::default(),
    );

    if tags.is_empty() {
        println!("no keywords yet; run `pipeline run` first");
        return Ok(());
    }

    println!("{:<12}{:<8}COLOR", "KEYWORD", "COUNT");
    for tag in &tags {
        println!("{:<12}{:<8}{}", tag.keyword, tag.count, tag.color);
    }
    Ok(())
}

fn news_client(config: &AppConfig) -> anyhow::Result<NaverNewsClient> {
    let (Some(id), Some(secret)) = (
        config.naver_client_id.as_deref(),
        config.naver_client_secret.as_deref(),
    ) else {
        anyhow::bail!("NAVER_CLIENT_ID and NAVER_CLIENT_SECRET must be set");
    };
    Ok(NaverNewsClient::new(id, secret, config.http_timeout_secs)?)
}

pub(crate) async fn run_news_collect(config: &AppConfig, count: usize) -> anyhow::Result<()> {
    let client = news_client(config)?;
    let settings = CollectorSettings::from_app_config(config);
    let report = collect_news(&client, &settings, count).await;

    println!("{:<26}TITLE", "PUBLISHED");
    for item in &report.items {
        let published = item
            .published_at
            .map_or_else(|| "-".to_string(), |d| d.format("%Y-%m-%d %H:%M").to_string());
        println!("{published:<26}{}", item.title);
    }
    if !report.failed_queries.is_empty() {
        println!();
        println!("failed queries: {}", report.failed_queries.join(", "));
    }
    Ok(())
}

pub(crate) async fn run_pipeline(config: &AppConfig, pool: PgPool) -> anyhow::Result<()> {
    let update = DailyUpdate::from_app_config(config)?
        .context("pipeline needs NAVER_CLIENT_ID, NAVER_CLIENT_SECRET and GEMINI_API_KEY")?;

    let summary = update.run(&PgTalkStore::new(pool)).await?;
    println!(
        "collected {} / filtered {} / saved {} ({:?}, {} ms)",
        summary.collected, summary.filtered, summary.saved, summary.mode, summary.duration_ms
    );
    Ok(())
}
