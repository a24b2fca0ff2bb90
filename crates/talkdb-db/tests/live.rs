//! Live integration tests for talkdb-db using `#[sqlx::test]`.
//!
//! Each test gets a fresh, migrated Postgres database from the sqlx test
//! harness, so `DATABASE_URL` must point at a server the tests can create
//! databases on. Run with `cargo test -p talkdb-db -- --ignored`.

use chrono::{TimeDelta, Utc};
use talkdb_core::{AgeGroup, Category, CronStatus, NewCronLog, NewTalk, Situation, TalkStore};
use talkdb_db::{
    increment_like_count, increment_view_count, insert_cron_log, insert_talks,
    list_cron_logs, list_keyword_sources, list_recent_talks, list_topics_since, DbError,
    PgTalkStore,
};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_talk(topic: &str) -> NewTalk {
    NewTalk {
        talk_topic: topic.to_string(),
        description: Some(format!("{topic} 설명")),
        conversation_tip: None,
        category: Category::Food,
        situations: vec![Situation::Company, Situation::Friend],
        age_group: AgeGroup::All,
        source: "naver_news".to_string(),
        source_url: Some("https://press.example/1".to_string()),
        published_at: Some(Utc::now()),
        is_verified: true,
    }
}

// ---------------------------------------------------------------------------
// talks
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires a live Postgres via DATABASE_URL"]
async fn insert_and_list_recent_talks(pool: sqlx::PgPool) {
    let inserted = insert_talks(&pool, &[new_talk("딸기 디저트"), new_talk("겨울 축제")])
        .await
        .expect("insert should succeed");
    assert_eq!(inserted, 2);

    let rows = list_recent_talks(&pool, 10).await.expect("list should succeed");
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.view_count == 0 && r.like_count == 0));
    assert_eq!(rows[0].situation, vec!["company", "friend"]);
    assert_eq!(rows[0].category, "food");
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires a live Postgres via DATABASE_URL"]
async fn insert_empty_batch_is_noop(pool: sqlx::PgPool) {
    assert_eq!(insert_talks(&pool, &[]).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires a live Postgres via DATABASE_URL"]
async fn like_and_view_increment_by_exactly_one(pool: sqlx::PgPool) {
    insert_talks(&pool, &[new_talk("야구 개막전")]).await.unwrap();
    let id = list_recent_talks(&pool, 1).await.unwrap()[0].id;

    assert_eq!(increment_like_count(&pool, id).await.unwrap(), 1);
    assert_eq!(increment_like_count(&pool, id).await.unwrap(), 2);
    assert_eq!(increment_view_count(&pool, id).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires a live Postgres via DATABASE_URL"]
async fn concurrent_likes_are_not_lost(pool: sqlx::PgPool) {
    insert_talks(&pool, &[new_talk("동시 좋아요")]).await.unwrap();
    let id = list_recent_talks(&pool, 1).await.unwrap()[0].id;

    let (a, b) = tokio::join!(
        increment_like_count(&pool, id),
        increment_like_count(&pool, id)
    );
    a.unwrap();
    b.unwrap();

    let rows = list_recent_talks(&pool, 1).await.unwrap();
    assert_eq!(rows[0].like_count, 2);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires a live Postgres via DATABASE_URL"]
async fn increment_unknown_id_is_not_found(pool: sqlx::PgPool) {
    let err = increment_like_count(&pool, Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, DbError::NotFound));
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires a live Postgres via DATABASE_URL"]
async fn topics_since_and_keyword_sources(pool: sqlx::PgPool) {
    insert_talks(&pool, &[new_talk("카페 신메뉴")]).await.unwrap();

    let recent = list_topics_since(&pool, Utc::now() - TimeDelta::hours(6))
        .await
        .unwrap();
    assert_eq!(recent, vec!["카페 신메뉴".to_string()]);

    let future = list_topics_since(&pool, Utc::now() + TimeDelta::hours(1))
        .await
        .unwrap();
    assert!(future.is_empty());

    let sources = list_keyword_sources(&pool, 100).await.unwrap();
    assert_eq!(sources[0].1.as_deref(), Some("카페 신메뉴 설명"));
}

// ---------------------------------------------------------------------------
// cron_logs + store
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires a live Postgres via DATABASE_URL"]
async fn cron_logs_round_trip(pool: sqlx::PgPool) {
    let log = NewCronLog {
        status: CronStatus::Error,
        error_message: Some("no news collected".to_string()),
        news_collected: None,
        topics_filtered: None,
        topics_saved: None,
        duration_ms: 1234,
    };
    let row = insert_cron_log(&pool, &log).await.unwrap();
    assert_eq!(row.status, "error");
    assert_eq!(row.duration_ms, 1234);
    assert!(row.run_at <= Utc::now());

    let rows = list_cron_logs(&pool, 10).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].error_message.as_deref(), Some("no news collected"));
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires a live Postgres via DATABASE_URL"]
async fn pg_store_implements_pipeline_seam(pool: sqlx::PgPool) {
    let store = PgTalkStore::new(pool.clone());
    let saved = store.insert_talks(&[new_talk("반려동물 간식")]).await.unwrap();
    assert_eq!(saved, 1);

    let topics = store
        .topics_created_since(Utc::now() - TimeDelta::hours(6))
        .await
        .unwrap();
    assert_eq!(topics.len(), 1);

    store
        .append_cron_log(&NewCronLog {
            status: CronStatus::Success,
            error_message: None,
            news_collected: Some(10),
            topics_filtered: Some(3),
            topics_saved: Some(1),
            duration_ms: 50,
        })
        .await
        .unwrap();
    assert_eq!(list_cron_logs(&pool, 10).await.unwrap()[0].topics_saved, Some(1));
}
