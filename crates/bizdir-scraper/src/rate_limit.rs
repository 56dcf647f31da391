//! Politeness policy for outbound requests.
//!
//! Every [`PageClient`](crate::PageClient) owns a [`RequestGate`] that keeps at
//! most one request in flight and spaces consecutive requests to the same host
//! by the configured delay. With `randomize` set, each delay is scaled by a
//! random factor in `[0.5, 1.5)` so the request rhythm is not fixed.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::{Mutex, MutexGuard};

/// Delay policy between consecutive requests to one host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Politeness {
    pub delay_ms: u64,
    pub randomize: bool,
}

impl Politeness {
    #[must_use]
    pub fn new(delay_ms: u64, randomize: bool) -> Self {
        Self {
            delay_ms,
            randomize,
        }
    }

    /// No delay at all; used for tests and for callers that pace themselves.
    #[must_use]
    pub fn none() -> Self {
        Self::new(0, false)
    }

    /// The gap to leave before the next request.
    #[must_use]
    pub fn next_gap(&self) -> Duration {
        if self.delay_ms == 0 {
            return Duration::ZERO;
        }
        if !self.randomize {
            return Duration::from_millis(self.delay_ms);
        }
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            clippy::cast_precision_loss
        )]
        let jittered = (self.delay_ms as f64 * (rand::random::<f64>() + 0.5)) as u64;
        Duration::from_millis(jittered)
    }
}

/// Serializes requests and enforces the per-host gap.
#[derive(Debug)]
pub(crate) struct RequestGate {
    politeness: Politeness,
    last_request: Mutex<HashMap<String, Instant>>,
}

/// Held for the whole duration of one request. Dropping it without calling
/// [`RequestSlot::finish`] still releases the gate but records nothing.
pub(crate) struct RequestSlot<'a> {
    host: String,
    last_request: MutexGuard<'a, HashMap<String, Instant>>,
}

impl RequestGate {
    pub(crate) fn new(politeness: Politeness) -> Self {
        Self {
            politeness,
            last_request: Mutex::new(HashMap::new()),
        }
    }

    /// Waits until this client is idle and `host` has been quiet long enough.
    pub(crate) async fn acquire(&self, host: &str) -> RequestSlot<'_> {
        let last_request = self.last_request.lock().await;
        if let Some(previous) = last_request.get(host) {
            let gap = self.politeness.next_gap();
            let elapsed = previous.elapsed();
            if elapsed < gap {
                let wait = gap.saturating_sub(elapsed);
                tracing::debug!(host, wait_ms = wait.as_millis(), "politeness delay");
                tokio::time::sleep(wait).await;
            }
        }
        RequestSlot {
            host: host.to_owned(),
            last_request,
        }
    }
}

impl RequestSlot<'_> {
    /// Records the request as finished now, starting the next gap.
    pub(crate) fn finish(mut self) {
        let host = std::mem::take(&mut self.host);
        self.last_request.insert(host, Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_delay_never_waits() {
        assert_eq!(Politeness::none().next_gap(), Duration::ZERO);
        assert_eq!(Politeness::new(0, true).next_gap(), Duration::ZERO);
    }

    #[test]
    fn fixed_delay_is_exact() {
        assert_eq!(
            Politeness::new(1500, false).next_gap(),
            Duration::from_millis(1500)
        );
    }

    #[test]
    fn randomized_delay_stays_within_half_to_one_and_a_half() {
        let policy = Politeness::new(2000, true);
        for _ in 0..200 {
            let gap = policy.next_gap();
            assert!(gap >= Duration::from_millis(1000), "gap too short: {gap:?}");
            assert!(gap < Duration::from_millis(3000), "gap too long: {gap:?}");
        }
    }

    #[tokio::test]
    async fn second_request_to_same_host_waits_for_gap() {
        let gate = RequestGate::new(Politeness::new(60, false));
        gate.acquire("example.es").await.finish();

        let started = Instant::now();
        gate.acquire("example.es").await.finish();
        assert!(started.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test]
    async fn first_request_to_other_host_does_not_wait() {
        let gate = RequestGate::new(Politeness::new(5_000, false));
        gate.acquire("a.example.es").await.finish();

        let started = Instant::now();
        gate.acquire("b.example.es").await.finish();
        assert!(started.elapsed() < Duration::from_millis(1_000));
    }
}
