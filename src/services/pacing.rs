use std::time::Duration;
use tokio::{sync::Mutex, time::Instant};

/// Fixed inter-call pacing for a rate-limited upstream
///
/// Every `wait` returns at least `delay` after the previous one returned. The
/// first call passes immediately. This is a pacing policy, not a backoff: the
/// delay never grows and failed calls are not retried.
#[derive(Debug)]
pub struct Pacer {
    delay: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl Pacer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_call: Mutex::new(None),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Sleeps until the next outbound call is allowed
    ///
    /// The lock is held while sleeping so concurrent callers queue up and
    /// each one gets its own slot.
    pub async fn wait(&self) {
        let mut last_call = self.last_call.lock().await;

        if let Some(last) = *last_call {
            let ready_at = last + self.delay;
            if ready_at > Instant::now() {
                tracing::trace!(delay_ms = self.delay.as_millis() as u64, "Pacing outbound call");
                tokio::time::sleep_until(ready_at).await;
            }
        }

        *last_call = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_first_call_is_immediate() {
        let pacer = Pacer::new(Duration::from_secs(1));
        let start = Instant::now();
        pacer.wait().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_consecutive_calls_are_spaced_by_delay() {
        let pacer = Pacer::new(Duration::from_secs(1));
        let start = Instant::now();

        pacer.wait().await;
        pacer.wait().await;
        assert!(start.elapsed() >= Duration::from_secs(1));

        pacer.wait().await;
        assert!(start.elapsed() >= Duration::from_secs(2));
        assert!(start.elapsed() < Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_wait_when_delay_already_elapsed() {
        let pacer = Pacer::new(Duration::from_millis(500));
        pacer.wait().await;

        tokio::time::advance(Duration::from_secs(2)).await;

        let before = Instant::now();
        pacer.wait().await;
        assert_eq!(before.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_callers_are_serialized() {
        let pacer = Arc::new(Pacer::new(Duration::from_secs(1)));
        let start = Instant::now();

        let tasks: Vec<_> = (0..3)
            .map(|_| {
                let pacer = pacer.clone();
                tokio::spawn(async move {
                    pacer.wait().await;
                    Instant::now()
                })
            })
            .collect();

        let mut finished = Vec::new();
        for task in tasks {
            finished.push(task.await.unwrap());
        }
        finished.sort();

        assert!(finished[0] - start < Duration::from_secs(1));
        assert!(finished[1] - finished[0] >= Duration::from_secs(1));
        assert!(finished[2] - finished[1] >= Duration::from_secs(1));
    }
}
