//! Generation job poller
//!
//! A single spawned task polls quiz status on a fixed interval while the
//! status is `PROCESSING`. On the first terminal status it fetches the
//! question list exactly once, emits an outcome, and exits; no further
//! status polls are ever issued. The handle aborts the task on drop, so the
//! poller's lifetime is bound to the owning wizard.

use std::sync::Arc;
use std::time::Duration;

use quizzer_client::{Question, QuizStatus};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::backend::QuizzerBackend;

/// Terminal outcome of a polling run.
#[derive(Debug)]
pub enum PollOutcome {
    /// The job left `PROCESSING` and questions were saved.
    QuestionsReady(Vec<Question>),
    /// The job left `PROCESSING` but the question list came back empty.
    /// Recoverable; the professor retries generation or escalates.
    NoQuestions,
}

pub struct JobPoller;

impl JobPoller {
    /// Spawn the polling task. The first status check fires immediately,
    /// then every `poll_interval`.
    pub fn spawn(
        backend: Arc<dyn QuizzerBackend>,
        quiz_id: Uuid,
        poll_interval: Duration,
    ) -> PollerHandle {
        let (tx, rx) = mpsc::channel(1);
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(poll_interval);
            loop {
                ticker.tick().await;
                let quiz = match backend.get_quiz(quiz_id).await {
                    Ok(quiz) => quiz,
                    Err(e) => {
                        // Transient; keep polling on the same cadence.
                        warn!("[POLLER] status poll failed for quiz {}: {}", quiz_id, e);
                        continue;
                    }
                };
                if quiz.ai_generation_status == QuizStatus::Processing {
                    debug!("[POLLER] quiz {} still processing", quiz_id);
                    continue;
                }

                // First terminal status: fetch the question list exactly once.
                let outcome = match backend.get_questions(quiz_id).await {
                    Ok(questions) if !questions.is_empty() => {
                        PollOutcome::QuestionsReady(questions)
                    }
                    Ok(_) => PollOutcome::NoQuestions,
                    Err(e) => {
                        warn!("[POLLER] question fetch failed for quiz {}: {}", quiz_id, e);
                        PollOutcome::NoQuestions
                    }
                };
                let _ = tx.send(outcome).await;
                break;
            }
        });
        PollerHandle { task, rx }
    }
}

/// Handle to a running poller. Dropping it aborts the task, so tearing down
/// the owning wizard cancels the poll; there is no separate "stale" state.
pub struct PollerHandle {
    task: JoinHandle<()>,
    rx: mpsc::Receiver<PollOutcome>,
}

impl PollerHandle {
    /// Wait for the terminal outcome. Returns `None` if the poller was
    /// cancelled before reaching one.
    pub async fn recv(&mut self) -> Option<PollOutcome> {
        self.rx.recv().await
    }

    /// Non-blocking check for an already-emitted outcome.
    pub fn try_recv(&mut self) -> Option<PollOutcome> {
        self.rx.try_recv().ok()
    }

    pub fn cancel(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
