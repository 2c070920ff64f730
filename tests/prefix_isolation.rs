//! Prefix scoping under concurrency.

use std::time::Duration;

use logweave::pipeline::{current_prefix, log_prefix, spawn_with_prefix};
use logweave::LineFormatter;

mod common;

async fn emit(tag: &'static str, count: usize) {
    for i in 0..count {
        tracing::info!("{} step {}", tag, i);
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn test_nested_scopes_on_records() {
    let (out, _guard) = common::capture_with(LineFormatter::new().with_prefixes());

    log_prefix("A: ", async {
        log_prefix("B: ", async {
            tracing::info!("inner");
        })
        .await;
        tracing::info!("outer");
    })
    .await;
    tracing::info!("bare");

    assert_eq!(
        out.bodies(),
        vec![
            "      INFO: A: B: inner",
            "      INFO: A: outer",
            "      INFO: bare",
        ]
    );
}

#[tokio::test]
async fn test_interleaved_tasks_keep_their_prefixes() {
    let (out, _guard) = common::capture_with(LineFormatter::new().with_prefixes());

    tokio::join!(
        log_prefix("[x] ", emit("x", 5)),
        log_prefix("[y] ", emit("y", 5)),
        emit("none", 3),
    );

    let bodies = out.bodies();
    assert_eq!(bodies.len(), 13);

    // the join polls all three in turn, so output really is interleaved
    assert!(bodies[0].contains("x step 0"));
    assert!(bodies[1].contains("y step 0"));

    for body in &bodies {
        if body.contains(" x step ") {
            assert!(body.starts_with("      INFO: [x] x step"), "{body}");
        } else if body.contains(" y step ") {
            assert!(body.starts_with("      INFO: [y] y step"), "{body}");
        } else {
            assert!(body.starts_with("      INFO: none step"), "{body}");
        }
    }
}

#[tokio::test]
async fn test_scope_restored_when_future_dropped() {
    let pending = log_prefix("[cancelled] ", async {
        tokio::time::sleep(Duration::from_secs(60)).await;
    });

    let timed_out = tokio::time::timeout(Duration::from_millis(10), pending).await;
    assert!(timed_out.is_err());
    assert_eq!(current_prefix(), "");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_tasks_are_isolated() {
    let mut handles = Vec::new();
    for worker in 0..8 {
        handles.push(tokio::spawn(log_prefix(format!("[w{worker}] "), async move {
            let mut seen = Vec::new();
            for _ in 0..20 {
                tokio::task::yield_now().await;
                seen.push(current_prefix());
            }
            (worker, seen)
        })));
    }

    for handle in handles {
        let (worker, seen) = handle.await.unwrap();
        let expected = format!("[w{worker}] ");
        assert!(seen.iter().all(|prefix| *prefix == expected), "{seen:?}");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_child_task_extends_parent_chain() {
    let seen = log_prefix("[parent] ", async {
        spawn_with_prefix(log_prefix("[child] ", async { current_prefix() }))
            .await
            .unwrap()
    })
    .await;

    assert_eq!(seen, "[parent] [child] ");
}
