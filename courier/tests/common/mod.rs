//! Shared helpers for the integration suites.
#![allow(dead_code)]

/// Let spawned handler tasks run to completion on the test runtime.
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

/// Yield until `cond` holds; panics if it never does.
pub async fn wait_until(mut cond: impl FnMut() -> bool) {
    for _ in 0..1000 {
        if cond() {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("condition not reached");
}
