//! Waiting for vRack tasks.

use crate::client::VrackClient;
use crate::models::VrackTask;
use crate::Result;
use async_trait::async_trait;
use ovh_core::task::{wait_for_task, PollPolicy, TaskPoller, TaskSnapshot};
use std::time::Duration;

/// Default delay between two vRack task polls.
pub const VRACK_TASK_POLL_INTERVAL_SECS: u64 = 10;

/// Default number of vRack task polls.
pub const VRACK_TASK_POLL_ATTEMPTS: u32 = 120;

/// Default polling policy for vRack tasks.
#[must_use]
pub const fn default_task_policy() -> PollPolicy {
    PollPolicy::new(
        VRACK_TASK_POLL_ATTEMPTS,
        Duration::from_secs(VRACK_TASK_POLL_INTERVAL_SECS),
    )
}

/// Polls the tasks of one vRack.
#[derive(Clone)]
pub struct VrackTaskPoller {
    client: VrackClient,
    service_name: String,
}

impl VrackTaskPoller {
    /// Create a poller for the tasks of `service_name`.
    #[must_use]
    pub fn new(client: VrackClient, service_name: impl Into<String>) -> Self {
        Self {
            client,
            service_name: service_name.into(),
        }
    }
}

#[async_trait]
impl TaskPoller for VrackTaskPoller {
    async fn poll(&self, task_id: i64) -> Result<Option<TaskSnapshot>> {
        match self.client.get_task(&self.service_name, task_id).await {
            Ok(task) => Ok(Some(TaskSnapshot::from_api(task.status))),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }
}

/// Wait for `task` of vRack `service_name` to complete.
///
/// # Errors
///
/// Returns the waiter errors: task failure, exhausted policy or polling error.
pub async fn wait_for_vrack_task(
    client: &VrackClient,
    service_name: &str,
    task: &VrackTask,
    policy: PollPolicy,
) -> Result<()> {
    let poller = VrackTaskPoller::new(client.clone(), service_name);
    wait_for_task(&poller, &format!("vrack {service_name}"), task.id, policy).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio_test::{assert_err, assert_ok};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn task(id: i64, status: &str) -> VrackTask {
        VrackTask {
            id,
            function: None,
            status: status.to_string(),
            service_name: Some("pn-1000".to_string()),
            target_domain: None,
            last_update: None,
            todo_date: None,
        }
    }

    async fn mount_status(server: &MockServer, id: i64, status: &str, times: u64) {
        Mock::given(method("GET"))
            .and(path(format!("/vrack/pn-1000/task/{id}").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": id,
                "status": status
            })))
            .up_to_n_times(times)
            .mount(server)
            .await;
    }

    fn fast_policy(attempts: u32) -> PollPolicy {
        PollPolicy::new(attempts, Duration::ZERO)
    }

    #[test]
    fn default_policy_covers_twenty_minutes() {
        let policy = default_task_policy();
        assert_eq!(policy.max_attempts, 120);
        assert_eq!(policy.interval, Duration::from_secs(10));
    }

    #[tokio::test]
    async fn waits_through_todo_and_doing() {
        let server = MockServer::start().await;
        mount_status(&server, 7, "todo", 1).await;
        mount_status(&server, 7, "doing", 1).await;
        mount_status(&server, 7, "done", 1).await;

        let client = VrackClient::new(server.uri()).unwrap();
        assert_ok!(wait_for_vrack_task(&client, "pn-1000", &task(7, "init"), fast_policy(5)).await);
    }

    #[tokio::test]
    async fn purged_task_counts_as_done() {
        let server = MockServer::start().await;
        mount_status(&server, 8, "doing", 1).await;
        Mock::given(method("GET"))
            .and(path("/vrack/pn-1000/task/8"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "gone"})))
            .mount(&server)
            .await;

        let client = VrackClient::new(server.uri()).unwrap();
        assert_ok!(wait_for_vrack_task(&client, "pn-1000", &task(8, "todo"), fast_policy(5)).await);
    }

    #[tokio::test]
    async fn error_status_names_vrack_and_task() {
        let server = MockServer::start().await;
        mount_status(&server, 9, "error", 1).await;

        let client = VrackClient::new(server.uri()).unwrap();
        let err = assert_err!(
            wait_for_vrack_task(&client, "pn-1000", &task(9, "todo"), fast_policy(5)).await
        );
        assert_eq!(err.error_code(), "TASK_FAILED");
        assert!(err.to_string().contains("vrack pn-1000"));
        assert!(err.to_string().contains("task 9"));
    }

    #[tokio::test]
    async fn stuck_task_times_out() {
        let server = MockServer::start().await;
        mount_status(&server, 10, "doing", 10).await;

        let client = VrackClient::new(server.uri()).unwrap();
        let err = assert_err!(
            wait_for_vrack_task(&client, "pn-1000", &task(10, "doing"), fast_policy(3)).await
        );
        assert_eq!(err.error_code(), "TIMEOUT");
    }
}
