use rand::Rng;
use std::time::Duration;

const BASE_DELAY_MS: u64 = 1000;
const MAX_BACKOFF_MS: u64 = 30_000;
const JITTER_MS: u64 = 250;

/// Delay schedule between event channel connection attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectPolicy {
    pub base: Duration,
    pub max: Duration,
    pub jitter: Duration,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            base: Duration::from_millis(BASE_DELAY_MS),
            max: Duration::from_millis(MAX_BACKOFF_MS),
            jitter: Duration::from_millis(JITTER_MS),
        }
    }
}

impl ReconnectPolicy {
    /// Retries at a constant interval forever.
    pub fn fixed(interval: Duration) -> Self {
        Self {
            base: interval,
            max: interval,
            jitter: Duration::ZERO,
        }
    }

    /// `attempt` counts failed attempts since the last successful open.
    pub fn delay(&self, attempt: u32) -> Duration {
        let base_ms = self.base.as_millis() as u64;
        let max_ms = self.max.as_millis() as u64;
        let jitter_ms = self.jitter.as_millis() as u64;

        let jitter = if jitter_ms == 0 {
            0
        } else {
            rand::thread_rng().gen_range(0..jitter_ms)
        };
        let exponential = base_ms.saturating_mul(2u64.saturating_pow(attempt.min(16)));
        Duration::from_millis(exponential.saturating_add(jitter).min(max_ms.max(base_ms)))
    }
}
