//! Cancellable UI timers used while a stage request is in flight.
//!
//! Every timer is owned by a [`TimerHandle`]. Dropping the handle cancels the
//! timer, so a stage that returns early (or whose future is dropped) never
//! leaves a ticker running.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use hismarketing_core::config::PacingSettings;
use hismarketing_core::presentation::Presenter;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::messages;

/// Owns a background timer task.
pub struct TimerHandle {
    name: &'static str,
    token: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl TimerHandle {
    fn spawn<F>(name: &'static str, body: impl FnOnce(CancellationToken) -> F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let token = CancellationToken::new();
        let task = tokio::spawn(body(token.clone()));
        tracing::trace!(timer = name, "[Timer] Started");
        Self {
            name,
            token,
            task: Some(task),
        }
    }

    /// Cancels the timer and waits for its task to finish.
    ///
    /// Once this returns, the timer makes no further presenter calls.
    pub async fn stop(mut self) {
        self.token.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                if !e.is_cancelled() {
                    tracing::warn!(timer = self.name, "[Timer] Task failed: {}", e);
                }
            }
        }
        tracing::trace!(timer = self.name, "[Timer] Stopped");
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(JoinHandle::is_finished)
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.token.cancel();
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Starts the simulated upload progress bar.
///
/// Every `progress_interval` the bar advances by `progress_step_percent`
/// until it reaches `progress_ceiling_percent`, where the ticker stops by
/// itself. Completion (100%) is reported by the caller, not by the ticker.
pub fn spawn_progress_ticker(presenter: Arc<dyn Presenter>, pacing: &PacingSettings) -> TimerHandle {
    let step = pacing.progress_step_percent;
    let ceiling = pacing.progress_ceiling_percent.min(100);
    let period = pacing.progress_interval();

    TimerHandle::spawn("upload-progress", move |token| async move {
        if step == 0 || period.is_zero() {
            return;
        }

        let mut percent: u8 = 0;
        while percent < ceiling {
            tokio::select! {
                biased;
                _ = token.cancelled() => return,
                _ = tokio::time::sleep(period) => {}
            }

            percent = percent.saturating_add(step).min(ceiling);
            presenter.upload_progress(percent, &messages::upload_progress(percent));
        }
    })
}

/// Shows the first status message immediately, then cycles through
/// `statuses` every `period`, wrapping around, until stopped.
pub fn spawn_status_rotator(
    presenter: Arc<dyn Presenter>,
    statuses: &'static [&'static str],
    period: Duration,
) -> TimerHandle {
    if let Some(first) = statuses.first() {
        presenter.prediction_status(first);
    }

    TimerHandle::spawn("prediction-status", move |token| async move {
        if statuses.len() < 2 || period.is_zero() {
            token.cancelled().await;
            return;
        }

        let mut index = 0;
        loop {
            tokio::select! {
                biased;
                _ = token.cancelled() => return,
                _ = tokio::time::sleep(period) => {}
            }

            index = (index + 1) % statuses.len();
            presenter.prediction_status(statuses[index]);
        }
    })
}

/// Runs `future` but does not resolve before `min` has elapsed.
///
/// Both sides always settle; a fast failure still waits for the floor.
pub async fn with_min_latency<F: Future>(min: Duration, future: F) -> F::Output {
    if min.is_zero() {
        return future.await;
    }
    let (output, ()) = tokio::join!(future, tokio::time::sleep(min));
    output
}
