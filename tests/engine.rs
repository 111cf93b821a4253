//! Integration tests for the rendering engine
//!
//! These tests drive `Engine` over an in-memory item source with artificial
//! per-item delays, so completion order can be controlled without a network.

use hn_threads::item::{Item, ItemKind};
use hn_threads::source::StaticItemSource;
use hn_threads::{Engine, HnError, ItemId, MarkdownRenderer};
use std::sync::Arc;
use std::time::Duration;

fn story(id: ItemId, title: &str, kids: Vec<ItemId>) -> Item {
    Item {
        id,
        title: Some(title.to_string()),
        score: 10,
        by: Some("alice".to_string()),
        descendants: 3,
        kind: ItemKind::Story,
        kids,
        ..Default::default()
    }
}

fn comment(id: ItemId, by: &str, text: &str, kids: Vec<ItemId>) -> Item {
    Item {
        id,
        by: Some(by.to_string()),
        text: Some(text.to_string()),
        kind: ItemKind::Comment,
        kids,
        ..Default::default()
    }
}

fn engine_for(source: StaticItemSource) -> (Engine, Arc<StaticItemSource>) {
    let source = Arc::new(source);
    let engine = Engine::new(source.clone(), Arc::new(MarkdownRenderer::default()));
    (engine, source)
}

/// Root with children [C1, C2]; C1 has child [G1]; C2 has no children
fn two_level_tree() -> StaticItemSource {
    StaticItemSource::new()
        .with_item(story(1, "Root", vec![2, 3]))
        .with_item(comment(2, "bob", "c1", vec![4]))
        .with_item(comment(3, "dave", "c2", vec![]))
        .with_item(comment(4, "carol", "g1", vec![]))
}

const TWO_LEVEL_RENDERED: &str = "Root (10pts, 3cms)\n\tby alice\n--------------------\n\
\t-- by bob\n\tc1\n\t\t-- by carol\n\t\tg1\n\
\t-- by dave\n\tc2";

#[tokio::test]
async fn test_leaf_renders_header_only() {
    let (engine, source) = engine_for(
        StaticItemSource::new().with_item(comment(7, "pg", "Just <i>one</i> thought", vec![])),
    );

    let rendered = engine.render_tree(7).await.unwrap();

    assert_eq!(rendered, "-- by pg\nJust *one* thought");
    assert!(!rendered.contains('\t'));
    assert_eq!(source.fetch_count(), 1);
}

#[tokio::test]
async fn test_two_level_tree_order_and_indentation() {
    let (engine, source) = engine_for(two_level_tree());

    let rendered = engine.render_tree(1).await.unwrap();

    assert_eq!(rendered, TWO_LEVEL_RENDERED);
    assert_eq!(source.fetch_count(), 4);
}

#[tokio::test]
async fn test_tree_order_ignores_completion_timing() {
    let delay_sets: [[u64; 3]; 6] = [
        [0, 0, 0],
        [30, 0, 0],
        [0, 30, 0],
        [0, 0, 30],
        [30, 20, 10],
        [10, 30, 20],
    ];

    for delays in delay_sets {
        let source = two_level_tree()
            .with_delay(2, Duration::from_millis(delays[0]))
            .with_delay(3, Duration::from_millis(delays[1]))
            .with_delay(4, Duration::from_millis(delays[2]));
        let (engine, _) = engine_for(source);

        let rendered = engine.render_tree(1).await.unwrap();
        assert_eq!(rendered, TWO_LEVEL_RENDERED, "delays {:?}", delays);
    }
}

#[tokio::test]
async fn test_listing_order_ignores_completion_timing() {
    let ids: Vec<ItemId> = vec![5, 3, 9, 1];
    let delay_sets: [[u64; 4]; 4] = [
        [40, 30, 20, 10],
        [10, 20, 30, 40],
        [0, 40, 0, 40],
        [25, 0, 40, 5],
    ];

    for delays in delay_sets {
        let mut source = StaticItemSource::new();
        for (&id, &ms) in ids.iter().zip(delays.iter()) {
            source = source
                .with_item(story(id, &format!("Story {}", id), vec![]))
                .with_delay(id, Duration::from_millis(ms));
        }
        let (engine, _) = engine_for(source);

        let items = engine.render_listing(&ids).await.unwrap();
        let got: Vec<ItemId> = items.iter().map(|i| i.id).collect();
        assert_eq!(got, ids, "delays {:?}", delays);
    }
}

#[tokio::test]
async fn test_listing_failure_reports_failing_id() {
    let source = StaticItemSource::new()
        .with_item(story(5, "Five", vec![]))
        .with_item(story(3, "Three", vec![]))
        .with_item(story(9, "Nine", vec![]))
        .with_failure(3);
    let (engine, source) = engine_for(source);

    let err = engine.render_listing(&[5, 3, 9]).await.unwrap_err();

    assert!(matches!(err, HnError::Aggregate { index: 1, id: 3, .. }));
    assert!(matches!(err.root_cause(), HnError::Fetch { id: 3, .. }));
    assert!(err.to_string().contains("item 3"));
    // Every unit was still collected
    assert_eq!(source.fetch_count(), 3);
    assert_eq!(source.in_flight(), 0);
}

#[tokio::test]
async fn test_lowest_position_failure_reported_regardless_of_arrival() {
    // Position 0 fails slowly, position 2 fails at once
    let source = StaticItemSource::new()
        .with_item(story(5, "Five", vec![]))
        .with_item(story(3, "Three", vec![]))
        .with_item(story(9, "Nine", vec![]))
        .with_failure(5)
        .with_failure(9)
        .with_delay(5, Duration::from_millis(40));
    let (engine, _) = engine_for(source);

    let err = engine.render_listing(&[5, 3, 9]).await.unwrap_err();

    assert!(matches!(err, HnError::Aggregate { index: 0, id: 5, .. }));
}

#[tokio::test]
async fn test_deep_failure_fails_whole_tree() {
    let source = two_level_tree().with_failure(4);
    let (engine, _) = engine_for(source);

    let err = engine.render_tree(1).await.unwrap_err();

    // Root -> C1 (position 0) -> G1 (position 0)
    match &err {
        HnError::Aggregate { id: 2, source, .. } => {
            assert!(matches!(**source, HnError::Aggregate { id: 4, .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(matches!(err.root_cause(), HnError::Fetch { id: 4, .. }));
}

#[tokio::test]
async fn test_missing_root_fails_without_output() {
    let (engine, _) = engine_for(StaticItemSource::new());

    let err = engine.render_tree(42).await.unwrap_err();

    assert!(matches!(err, HnError::Fetch { id: 42, .. }));
    assert_eq!(err.to_string(), "fetch item 42");
}

/// Collects the message of every error in the `source()` chain
fn error_chain(err: &dyn std::error::Error) -> Vec<String> {
    let mut messages = vec![err.to_string()];
    let mut current = err.source();
    while let Some(cause) = current {
        messages.push(cause.to_string());
        current = cause.source();
    }
    messages
}

#[tokio::test]
async fn test_error_chain_names_each_level_once() {
    let source = two_level_tree().with_failure(4);
    let (engine, _) = engine_for(source);

    let err = engine.render_tree(1).await.unwrap_err();

    assert_eq!(
        error_chain(&err),
        vec![
            "item 2 (position 0)".to_string(),
            "item 4 (position 0)".to_string(),
            "fetch item 4".to_string(),
            "unexpected HTTP status 503 from memory://item/4".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_conversion_failure_propagates() {
    let source = two_level_tree().with_item(comment(3, "dave", "broken</div>", vec![]));
    let engine = Engine::new(Arc::new(source), Arc::new(MarkdownRenderer::new(true)));

    let err = engine.render_tree(1).await.unwrap_err();

    assert!(matches!(err, HnError::Aggregate { index: 1, id: 3, .. }));
    assert!(matches!(err.root_cause(), HnError::Conversion { id: 3, .. }));
}

#[tokio::test]
async fn test_fetch_bound_is_respected_and_deep_trees_complete() {
    // A chain deeper than the bound, plus a wide level
    let mut source = StaticItemSource::new()
        .with_item(story(1, "Root", vec![10, 11, 12, 13, 14, 15]))
        .with_item(comment(10, "a", "x", vec![20]))
        .with_item(comment(20, "b", "y", vec![30]))
        .with_item(comment(30, "c", "z", vec![]));
    for id in 11..=15 {
        source = source.with_item(comment(id, "w", "w", vec![]));
    }
    for id in [1, 10, 11, 12, 13, 14, 15, 20, 30] {
        source = source.with_delay(id, Duration::from_millis(10));
    }

    let source = Arc::new(source);
    let engine = Engine::new(source.clone(), Arc::new(MarkdownRenderer::default()))
        .with_max_concurrent_fetches(Some(2));

    let rendered = engine.render_tree(1).await.unwrap();

    assert!(rendered.contains("\t\t\t-- by c"));
    assert_eq!(source.fetch_count(), 9);
    assert!(source.peak_in_flight() <= 2);
}

#[tokio::test]
async fn test_unbounded_fan_out_runs_siblings_together() {
    let mut source = StaticItemSource::new().with_item(story(1, "Root", vec![2, 3, 4, 5]));
    for id in 2..=5 {
        source = source
            .with_item(comment(id, "u", "t", vec![]))
            .with_delay(id, Duration::from_millis(50));
    }
    let (engine, source) = engine_for(source);

    engine.render_tree(1).await.unwrap();

    assert_eq!(source.peak_in_flight(), 4);
}

#[tokio::test]
async fn test_cancellation_stops_tree_and_drains() {
    let source = two_level_tree().with_delay(4, Duration::from_secs(30));
    let (engine, source) = engine_for(source);

    let cancel = engine.cancellation_token().clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        cancel.cancel();
    });

    let started = std::time::Instant::now();
    let err = engine.render_tree(1).await.unwrap_err();

    assert!(started.elapsed() < Duration::from_secs(5));
    assert!(err.is_cancelled());
    assert_eq!(source.in_flight(), 0);
}
