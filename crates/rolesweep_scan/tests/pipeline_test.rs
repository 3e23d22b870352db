//! End-to-end tests for the scan-and-assign pipeline.

mod common;

use common::*;
use futures::stream;
use rolesweep_core::{AttachmentFilter, AuthorId, RoleId, RoleRank};
use rolesweep_error::{ScanError, ScanErrorKind};
use rolesweep_scan::{GrantError, ScanRequest, ScanSettings, run_scan};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::task::Poll;
use std::time::Duration;

fn request(filter: AttachmentFilter) -> ScanRequest {
    ScanRequest::new(prize_role(), bot_top(), filter)
}

#[tokio::test]
async fn test_three_author_scenario() {
    let messages = vec![
        image(1, author(1), "my entry https://example.com/a"),
        crossed(text(2, author(2), "text only")),
        image(3, author(3), "no url here"),
    ];
    let directory = RecordingDirectory::with_members([1, 2, 3]);
    let mut progress = RecordingProgress::default();

    let report = run_scan(
        &settings(),
        &request(AttachmentFilter::Link),
        history(messages),
        &directory,
        &mut progress,
    )
    .await
    .unwrap();

    assert_eq!(*report.scanned(), 3);
    assert_eq!(*report.assigned(), 1);
    assert_eq!(*report.excluded_by_reaction(), 1);
    assert_eq!(*report.excluded_by_filter(), 1);
    assert_eq!(report.failed(), 0);
    assert!(report.is_balanced());
    assert_eq!(directory.grants(), vec![AuthorId(1)]);
    assert_eq!(directory.roles_of(1), vec![PRIZE]);
}

#[tokio::test]
async fn test_hierarchy_violation_reads_nothing() {
    let polls = Arc::new(AtomicUsize::new(0));
    let counter = polls.clone();
    let messages = stream::poll_fn(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        Poll::Ready(None)
    });
    let directory = RecordingDirectory::with_members([1]);
    let mut progress = RecordingProgress::default();

    // Same position as the bot's top role; the older target role ranks higher.
    let request = ScanRequest::new(
        prize_role(),
        RoleRank::new(3, RoleId(600)),
        AttachmentFilter::None,
    );
    let err = run_scan(&settings(), &request, messages, &directory, &mut progress)
        .await
        .unwrap_err();

    assert!(matches!(err.kind(), ScanErrorKind::HierarchyViolation { .. }));
    assert_eq!(polls.load(Ordering::SeqCst), 0);
    assert!(directory.grants().is_empty());
    assert!(progress.posts.is_empty());
    assert!(progress.edits.is_empty());
}

#[tokio::test]
async fn test_bot_authors_are_invisible() {
    let messages = vec![
        image(1, bot(90), ""),
        text(2, bot(90), "beep"),
        text(3, author(1), "hello"),
    ];
    let directory = RecordingDirectory::with_members([1, 90]);
    let mut progress = RecordingProgress::default();

    let report = run_scan(
        &settings(),
        &request(AttachmentFilter::None),
        history(messages),
        &directory,
        &mut progress,
    )
    .await
    .unwrap();

    assert_eq!(*report.scanned(), 1);
    assert_eq!(*report.duplicates(), 0);
    assert_eq!(directory.grants(), vec![AuthorId(1)]);
}

#[tokio::test]
async fn test_one_qualifying_message_is_enough() {
    let messages = vec![
        crossed(image(1, author(1), "")),
        text(2, author(1), "no image"),
        image(3, author(1), ""),
        crossed(text(4, author(1), "late")),
    ];
    let directory = RecordingDirectory::with_members([1]);
    let mut progress = RecordingProgress::default();

    let report = run_scan(
        &settings(),
        &request(AttachmentFilter::Image),
        history(messages),
        &directory,
        &mut progress,
    )
    .await
    .unwrap();

    assert_eq!(*report.assigned(), 1);
    assert_eq!(*report.excluded_by_filter(), 0);
    assert_eq!(*report.duplicates(), 1);
}

#[tokio::test]
async fn test_existing_holder_is_not_regranted() {
    let messages = vec![text(1, author(4), "entry")];
    let directory = RecordingDirectory::with_members([4]).holding(4, PRIZE);
    let mut progress = RecordingProgress::default();

    let report = run_scan(
        &settings(),
        &request(AttachmentFilter::None),
        history(messages),
        &directory,
        &mut progress,
    )
    .await
    .unwrap();

    assert_eq!(*report.already_had(), 1);
    assert_eq!(*report.assigned(), 0);
    assert!(directory.grants().is_empty());
}

#[tokio::test]
async fn test_repeated_scan_is_idempotent() {
    let messages = || {
        vec![
            text(1, author(1), "a"),
            text(2, author(2), "b"),
            text(3, author(1), "c"),
        ]
    };
    let directory = RecordingDirectory::with_members([1, 2]);

    let mut progress = RecordingProgress::default();
    let first = run_scan(
        &settings(),
        &request(AttachmentFilter::None),
        history(messages()),
        &directory,
        &mut progress,
    )
    .await
    .unwrap();
    assert_eq!(*first.assigned(), 2);

    let mut progress = RecordingProgress::default();
    let second = run_scan(
        &settings(),
        &request(AttachmentFilter::None),
        history(messages()),
        &directory,
        &mut progress,
    )
    .await
    .unwrap();

    assert_eq!(*second.assigned(), 0);
    assert_eq!(*second.already_had(), 2);
    assert_eq!(directory.grants().len(), 2);
    assert_eq!(directory.roles_of(1), vec![PRIZE]);
}

#[tokio::test]
async fn test_failures_are_captured_not_fatal() {
    let messages = vec![
        text(1, author(1), "left"),
        text(2, author(2), "denied"),
        text(3, author(3), "throttled"),
        text(4, author(4), "fine"),
    ];
    let directory = RecordingDirectory::with_members([2, 3, 4])
        .refusing(2, GrantError::Forbidden)
        .refusing(3, GrantError::Transport { status: Some(429) });
    let mut progress = RecordingProgress::default();

    let report = run_scan(
        &settings(),
        &request(AttachmentFilter::None),
        history(messages),
        &directory,
        &mut progress,
    )
    .await
    .unwrap();

    assert_eq!(*report.assigned(), 1);
    assert_eq!(report.failed(), 3);
    assert!(report.is_balanced());
    let lines: Vec<String> = report.failures().iter().map(|f| f.to_string()).collect();
    assert_eq!(
        lines,
        vec![
            "user1 (left server?)",
            "user2 (permission denied)",
            "user3 (HTTP error: 429)",
        ]
    );
    // Member-not-found never reaches the grant call.
    assert_eq!(
        directory.grants(),
        vec![AuthorId(2), AuthorId(3), AuthorId(4)]
    );
}

#[tokio::test]
async fn test_progress_every_ten_and_truncated_report() {
    let messages = (1..=25).map(|i| text(i, author(i), "entry")).collect();
    let mut directory = RecordingDirectory::with_members(1..=25);
    for i in 1..=25 {
        directory = directory.refusing(i, GrantError::Forbidden);
    }
    let mut progress = RecordingProgress::default();

    let report = run_scan(
        &settings(),
        &request(AttachmentFilter::None),
        history(messages),
        &directory,
        &mut progress,
    )
    .await
    .unwrap();

    assert_eq!(report.failed(), 25);
    assert_eq!(progress.posts, vec!["⏳ Assigning roles... `0/25` done."]);
    assert_eq!(progress.edits.len(), 3);
    assert_eq!(progress.edits[0], "⏳ Assigning roles... `10/25` done.");
    assert_eq!(progress.edits[1], "⏳ Assigning roles... `20/25` done.");

    let final_text = progress.final_text().unwrap();
    let details = final_text.lines().filter(|l| l.starts_with("  • ")).count();
    assert_eq!(details, 20);
    assert!(final_text.contains("+5 more"));
}

#[tokio::test]
async fn test_report_falls_back_to_fresh_message() {
    let messages = vec![text(1, author(1), "entry")];
    let directory = RecordingDirectory::with_members([1]);
    let mut progress = RecordingProgress::failing_edits();

    let report = run_scan(
        &settings(),
        &request(AttachmentFilter::None),
        history(messages),
        &directory,
        &mut progress,
    )
    .await
    .unwrap();

    assert_eq!(*report.assigned(), 1);
    assert_eq!(progress.sends.len(), 1);
    assert!(progress.sends[0].starts_with("✅ **Scan Complete**"));
}

#[tokio::test]
async fn test_failing_edits_across_progress_intervals() {
    let messages = (1..=12).map(|i| text(i, author(i), "entry")).collect();
    let directory = RecordingDirectory::with_members(1..=12);
    let mut progress = RecordingProgress::failing_edits();

    let report = run_scan(
        &settings(),
        &request(AttachmentFilter::None),
        history(messages),
        &directory,
        &mut progress,
    )
    .await
    .unwrap();

    assert_eq!(*report.assigned(), 12);
    assert_eq!(report.failed(), 0);
    assert_eq!(directory.grants().len(), 12);
    assert!((1..=12).all(|i| directory.roles_of(i) == vec![PRIZE]));

    assert_eq!(progress.posts.len(), 1);
    assert!(progress.edits.is_empty());
    assert_eq!(progress.sends.len(), 1);
    assert!(progress.sends[0].starts_with("✅ **Scan Complete**"));
    assert!(progress.sends[0].contains("New roles assigned:** 12"));
}

#[tokio::test]
async fn test_history_failure_aborts_before_grants() {
    let messages = stream::iter(vec![
        Ok(text(1, author(1), "entry")),
        Err(ScanError::new(ScanErrorKind::History(
            "connection reset".to_string(),
        ))),
    ]);
    let directory = RecordingDirectory::with_members([1]);
    let mut progress = RecordingProgress::default();

    let err = run_scan(
        &settings(),
        &request(AttachmentFilter::None),
        messages,
        &directory,
        &mut progress,
    )
    .await
    .unwrap_err();

    assert!(matches!(err.kind(), ScanErrorKind::History(_)));
    assert!(directory.grants().is_empty());
}

#[tokio::test]
async fn test_empty_history_reports_zeroes() {
    let directory = RecordingDirectory::default();
    let mut progress = RecordingProgress::default();

    let report = run_scan(
        &settings(),
        &request(AttachmentFilter::None),
        history(vec![]),
        &directory,
        &mut progress,
    )
    .await
    .unwrap();

    assert_eq!(*report.scanned(), 0);
    assert!(report.is_balanced());
    assert_eq!(progress.posts, vec!["⏳ Assigning roles... `0/0` done."]);
    assert!(progress.final_text().unwrap().contains("Total users scanned:** 0"));
}

#[tokio::test(start_paused = true)]
async fn test_pause_follows_each_grant_call() {
    let messages = (1..=5).map(|i| text(i, author(i), "entry")).collect();
    // Author 5 has left the server and author 2 already holds the role.
    let directory = RecordingDirectory::with_members(1..=4).holding(2, PRIZE);
    let mut progress = RecordingProgress::default();
    let settings = ScanSettings::builder().grant_delay_ms(50u64).build().unwrap();

    let started = tokio::time::Instant::now();
    let report = run_scan(
        &settings,
        &request(AttachmentFilter::None),
        history(messages),
        &directory,
        &mut progress,
    )
    .await
    .unwrap();
    let elapsed = started.elapsed();

    assert_eq!(*report.assigned(), 3);
    assert_eq!(*report.already_had(), 1);
    assert_eq!(report.failed(), 1);
    assert_eq!(directory.grants().len(), 3);
    assert_eq!(elapsed, Duration::from_millis(150));
}

#[tokio::test(start_paused = true)]
async fn test_refused_grant_still_pauses() {
    let messages = (1..=2).map(|i| text(i, author(i), "entry")).collect();
    let directory =
        RecordingDirectory::with_members(1..=2).refusing(1, GrantError::Forbidden);
    let mut progress = RecordingProgress::default();
    let settings = ScanSettings::builder().grant_delay_ms(50u64).build().unwrap();

    let started = tokio::time::Instant::now();
    let report = run_scan(
        &settings,
        &request(AttachmentFilter::None),
        history(messages),
        &directory,
        &mut progress,
    )
    .await
    .unwrap();

    assert_eq!(*report.assigned(), 1);
    assert_eq!(report.failed(), 1);
    assert_eq!(started.elapsed(), Duration::from_millis(100));
}
