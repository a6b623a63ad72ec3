//! Bounded polling of asynchronous server-side operations.
//!
//! Several OVHcloud calls answer with a task (or an order) that completes later.
//! [`wait_for_task`] polls such an operation through a [`TaskPoller`] until it
//! reaches a terminal state, giving up after a fixed number of polls.

use crate::{Error, Result};
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

/// Normalised state of an asynchronous operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    /// Accepted, not started
    Pending,
    /// In progress
    Running,
    /// Finished successfully
    Done,
    /// Finished with an error
    Error,
    /// Cancelled before completion
    Cancelled,
}

impl TaskStatus {
    /// Map an OVHcloud task status string.
    ///
    /// Unknown values are treated as still running.
    #[must_use]
    pub fn from_api(status: &str) -> Self {
        match status {
            "init" | "todo" => Self::Pending,
            "done" => Self::Done,
            "error" => Self::Error,
            "cancelled" | "canceled" => Self::Cancelled,
            _ => Self::Running,
        }
    }

    /// Returns true once the operation cannot change state anymore.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Error | Self::Cancelled)
    }

    /// Returns true for terminal failure states.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Error | Self::Cancelled)
    }
}

/// One observation of a polled operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSnapshot {
    /// Normalised status
    pub status: TaskStatus,
    /// Status as reported by the API
    pub raw_status: String,
}

impl TaskSnapshot {
    /// Build a snapshot from an OVHcloud task status string.
    #[must_use]
    pub fn from_api(status: impl Into<String>) -> Self {
        let raw_status = status.into();
        Self {
            status: TaskStatus::from_api(&raw_status),
            raw_status,
        }
    }
}

/// How often and how long to poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Maximum number of status polls
    pub max_attempts: u32,
    /// Delay between two polls
    pub interval: Duration,
}

impl PollPolicy {
    /// Create a policy polling at most `max_attempts` times, `interval` apart.
    #[must_use]
    pub const fn new(max_attempts: u32, interval: Duration) -> Self {
        Self {
            max_attempts,
            interval,
        }
    }

    /// Create a policy that gives up after roughly `timeout`.
    #[must_use]
    pub fn from_timeout(timeout: Duration, interval: Duration) -> Self {
        let attempts = if interval.is_zero() {
            1
        } else {
            let ratio = timeout.as_millis().div_ceil(interval.as_millis());
            u32::try_from(ratio).unwrap_or(u32::MAX).max(1)
        };
        Self::new(attempts, interval)
    }

    /// Upper bound of the time spent sleeping between polls.
    #[must_use]
    pub fn max_wait(&self) -> Duration {
        self.interval
            .saturating_mul(self.max_attempts.saturating_sub(1))
    }
}

/// Source of task status observations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskPoller: Send + Sync {
    /// Fetch the current state of a task.
    ///
    /// Returns `Ok(None)` once the task no longer exists, which OVHcloud does
    /// after purging completed tasks.
    async fn poll(&self, task_id: i64) -> Result<Option<TaskSnapshot>>;
}

/// Poll `task_id` until it completes.
///
/// # Errors
///
/// Returns [`Error::TaskFailed`] when the task ends in an error or cancelled
/// state, [`Error::Timeout`] when `policy` is exhausted, and any polling error
/// wrapped with the task and resource.
pub async fn wait_for_task<P>(
    poller: &P,
    resource: &str,
    task_id: i64,
    policy: PollPolicy,
) -> Result<()>
where
    P: TaskPoller + ?Sized,
{
    for attempt in 1..=policy.max_attempts {
        let snapshot = poller.poll(task_id).await.map_err(|err| {
            err.context(format!("waiting for task {task_id} of {resource}"))
        })?;

        match snapshot {
            None => {
                debug!(task_id, resource, "task no longer exists, treating as done");
                return Ok(());
            }
            Some(snapshot) if snapshot.status == TaskStatus::Done => {
                debug!(task_id, resource, attempt, "task done");
                return Ok(());
            }
            Some(snapshot) if snapshot.status.is_failure() => {
                return Err(Error::TaskFailed {
                    resource: resource.to_string(),
                    task_id,
                    status: snapshot.raw_status,
                });
            }
            Some(snapshot) => {
                debug!(task_id, resource, attempt, status = %snapshot.raw_status, "task in progress");
            }
        }

        if attempt < policy.max_attempts {
            sleep(policy.interval).await;
        }
    }

    Err(Error::Timeout(format!(
        "task {task_id} for {resource} did not complete after {} polls",
        policy.max_attempts
    )))
}
