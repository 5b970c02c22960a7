//! Quiet-period triggering for search input.

use std::{future::Future, time::Duration};

use tokio::task::JoinHandle;

/// Handle to a scheduled trigger that has not necessarily fired yet.
pub struct PendingTrigger {
    timer: JoinHandle<()>,
}

impl PendingTrigger {
    /// Stops the trigger if its quiet period has not elapsed. An action that
    /// already started keeps running.
    pub fn cancel(self) {
        self.timer.abort();
    }

    pub fn has_fired(&self) -> bool {
        self.timer.is_finished()
    }
}

pub struct Debouncer {
    quiet_period: Duration,
    pending: Option<PendingTrigger>,
}

impl Debouncer {
    pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(300);

    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            pending: None,
        }
    }

    /// Replaces any pending trigger with one that runs `action` after the
    /// quiet period.
    pub fn schedule<F>(&mut self, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let quiet_period = self.quiet_period;
        let timer = tokio::spawn(async move {
            tokio::time::sleep(quiet_period).await;
            // Detached so cancelling the timer never aborts a started request.
            tokio::spawn(action);
        });
        self.pending = Some(PendingTrigger { timer });
    }

    /// Returns true when a trigger was still waiting out its quiet period.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(trigger) if !trigger.has_fired() => {
                trigger.cancel();
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|trigger| !trigger.has_fired())
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_QUIET_PERIOD)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    type Fired = Arc<Mutex<Vec<&'static str>>>;

    fn schedule_label(debouncer: &mut Debouncer, fired: &Fired, label: &'static str) {
        let sink = fired.clone();
        debouncer.schedule(async move {
            sink.lock().expect("lock").push(label);
        });
    }

    #[tokio::test(start_paused = true)]
    async fn only_last_trigger_in_burst_fires() {
        let fired = Fired::default();
        let mut debouncer = Debouncer::default();

        for label in ["n", "ng", "ngu"] {
            schedule_label(&mut debouncer, &fired, label);
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        assert!(fired.lock().expect("lock").is_empty());

        tokio::time::sleep(Duration::from_millis(250)).await;
        tokio::task::yield_now().await;
        assert_eq!(*fired.lock().expect("lock"), vec!["ngu"]);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn separate_bursts_each_fire() {
        let fired = Fired::default();
        let mut debouncer = Debouncer::new(Duration::from_millis(50));

        schedule_label(&mut debouncer, &fired, "first");
        tokio::time::sleep(Duration::from_millis(80)).await;
        tokio::task::yield_now().await;

        schedule_label(&mut debouncer, &fired, "second");
        tokio::time::sleep(Duration::from_millis(80)).await;
        tokio::task::yield_now().await;

        assert_eq!(*fired.lock().expect("lock"), vec!["first", "second"]);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_and_drop_stop_pending_trigger() {
        let fired = Fired::default();

        let mut debouncer = Debouncer::default();
        schedule_label(&mut debouncer, &fired, "cancelled");
        assert!(debouncer.is_pending());
        assert!(debouncer.cancel());
        assert!(!debouncer.cancel());

        let mut dropped = Debouncer::default();
        schedule_label(&mut dropped, &fired, "dropped");
        drop(dropped);

        tokio::time::sleep(Duration::from_millis(600)).await;
        tokio::task::yield_now().await;
        assert!(fired.lock().expect("lock").is_empty());
    }
}
