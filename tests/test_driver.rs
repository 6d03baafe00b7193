//! Integration tests for the launch-fallback control flow.

use std::sync::atomic::{AtomicUsize, Ordering};

use gmail_oauth_setup::driver::launch_with_fallback;

#[tokio::test]
async fn test_fallback_not_attempted_when_primary_succeeds() {
    let fallback_calls = AtomicUsize::new(0);

    let result: Result<i32, String> = launch_with_fallback(
        || async { Ok(1) },
        |_e: &String| {
            fallback_calls.fetch_add(1, Ordering::SeqCst);
            async { Ok(2) }
        },
    )
    .await;

    assert_eq!(result.unwrap(), 1);
    assert_eq!(fallback_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_fallback_attempted_exactly_once_on_primary_failure() {
    let fallback_calls = AtomicUsize::new(0);

    let result: Result<i32, String> = launch_with_fallback(
        || async { Err("chrome broke".to_string()) },
        |e: &String| {
            assert_eq!(e, "chrome broke");
            fallback_calls.fetch_add(1, Ordering::SeqCst);
            async { Ok(7) }
        },
    )
    .await;

    assert_eq!(result.unwrap(), 7);
    assert_eq!(fallback_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_fallback_failure_propagates() {
    let fallback_calls = AtomicUsize::new(0);

    let result: Result<i32, String> = launch_with_fallback(
        || async { Err("chrome broke".to_string()) },
        |_e: &String| {
            fallback_calls.fetch_add(1, Ordering::SeqCst);
            async { Err("chromium broke too".to_string()) }
        },
    )
    .await;

    assert_eq!(result.unwrap_err(), "chromium broke too");
    assert_eq!(fallback_calls.load(Ordering::SeqCst), 1);
}
