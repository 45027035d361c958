//! Unit tests for `IdleTimer`.
//!
//! All tests run on a paused tokio clock so window arithmetic is exact
//! and instant.

use std::time::Duration;

use futures::FutureExt;
use tokio::time::advance;

use hookrelay_core::IdleTimer;

const WINDOW: Duration = Duration::from_secs(60);

// ---------------------------------------------------------------------------
// Test: the timer fires once the window elapses untouched
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn fires_after_idle_window() {
    let mut timer = IdleTimer::new(WINDOW);

    advance(Duration::from_secs(61)).await;

    assert!(timer.expired().now_or_never().is_some());
}

// ---------------------------------------------------------------------------
// Test: the timer does not fire early
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn does_not_fire_before_window() {
    let mut timer = IdleTimer::new(WINDOW);

    advance(Duration::from_secs(59)).await;

    assert!(timer.expired().now_or_never().is_none());
}

// ---------------------------------------------------------------------------
// Test: reset() restarts the full window
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn reset_restarts_full_window() {
    let mut timer = IdleTimer::new(WINDOW);

    // Activity at second 55 keeps the connection open past second 61.
    advance(Duration::from_secs(55)).await;
    timer.reset();

    advance(Duration::from_secs(6)).await;
    assert!(timer.expired().now_or_never().is_none());

    // The new window runs out 60 seconds after the reset.
    advance(Duration::from_secs(55)).await;
    assert!(timer.expired().now_or_never().is_some());
}

// ---------------------------------------------------------------------------
// Test: a reset that lands before the expiry is observed always wins
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn reset_beats_pending_expiry() {
    let mut timer = IdleTimer::new(WINDOW);

    // The deadline has passed but the expiry has not been polled yet;
    // a reset landing now must still push the deadline out.
    advance(Duration::from_secs(90)).await;
    timer.reset();

    assert!(timer.expired().now_or_never().is_none());
}

// ---------------------------------------------------------------------------
// Test: cancel() suppresses expiry permanently
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn cancel_suppresses_expiry() {
    let mut timer = IdleTimer::new(WINDOW);

    timer.cancel();
    advance(Duration::from_secs(600)).await;

    assert!(timer.expired().now_or_never().is_none());
}

// ---------------------------------------------------------------------------
// Test: reset() after cancel() is a no-op
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn reset_after_cancel_is_noop() {
    let mut timer = IdleTimer::new(WINDOW);

    timer.cancel();
    timer.reset();
    advance(Duration::from_secs(600)).await;

    assert!(timer.expired().now_or_never().is_none());
}
