use std::time::Duration;

use tokio::time::Instant;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Coalesces bursts of triggers into one firing per quiet window.
///
/// Every [`Debouncer::trigger`] pushes the deadline to `now + delay`,
/// replacing any earlier one.
#[derive(Clone, Debug)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn trigger(&mut self) {
        self.deadline = Some(Instant::now() + self.delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Completes once the armed deadline has passed, then disarms.
    /// Never completes while disarmed. Cancel safe: dropping the future
    /// keeps the deadline armed.
    pub async fn fired(&mut self) {
        match self.deadline {
            Some(deadline) => {
                tokio::time::sleep_until(deadline).await;
                self.deadline = None;
            }
            None => std::future::pending::<()>().await,
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn fires_after_quiet_window() {
        let mut debouncer = Debouncer::default();
        let start = Instant::now();
        debouncer.trigger();
        assert!(debouncer.is_pending());
        debouncer.fired().await;
        assert_eq!(start.elapsed(), DEFAULT_DEBOUNCE);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn retrigger_pushes_deadline_back() {
        let mut debouncer = Debouncer::new(Duration::from_millis(300));
        let start = Instant::now();
        debouncer.trigger();
        tokio::time::sleep(Duration::from_millis(200)).await;
        debouncer.trigger();
        debouncer.fired().await;
        assert_eq!(start.elapsed(), Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn disarmed_debouncer_never_fires() {
        let mut debouncer = Debouncer::default();
        debouncer.trigger();
        debouncer.cancel();
        let fired = tokio::time::timeout(Duration::from_secs(5), debouncer.fired()).await;
        assert!(fired.is_err());
    }
}
