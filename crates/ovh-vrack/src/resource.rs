//! The `ovh_vrack_iploadbalancing` resource.

use crate::client::{VrackClient, VrackClientBuilder};
use crate::models::AttachIpLoadbalancingRequest;
use crate::task::{default_task_policy, wait_for_vrack_task};
use crate::Result;
use async_trait::async_trait;
use ovh_core::config::OvhClientConfig;
use ovh_core::resource::{
    AttributeSchema, AttributeType, Attributes, Presence, Resource, ResourceState,
};
use ovh_core::task::PollPolicy;
use ovh_core::Error;
use serde_json::json;
use tracing::{debug, info};

const ID_PREFIX: &str = "vrack_";
const ID_SEPARATOR: &str = "-iplb_";

const SCHEMA: &[AttributeSchema] = &[
    AttributeSchema::new("service_name", AttributeType::String, Presence::Required).force_new(),
    AttributeSchema::new("ip_loadbalancing", AttributeType::String, Presence::Required)
        .force_new(),
];

/// Desired attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VrackIpLoadbalancingConfig {
    /// vRack service name.
    pub service_name: String,
    /// IP load balancer service name.
    pub ip_loadbalancing: String,
}

impl VrackIpLoadbalancingConfig {
    /// Resource ID of this attachment.
    #[must_use]
    pub fn resource_id(&self) -> String {
        format!(
            "{ID_PREFIX}{}{ID_SEPARATOR}{}",
            self.service_name, self.ip_loadbalancing
        )
    }

    /// Parse a resource ID built by [`Self::resource_id`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] if `id` does not have the expected shape.
    pub fn from_resource_id(id: &str) -> Result<Self> {
        id.strip_prefix(ID_PREFIX)
            .and_then(|rest| rest.split_once(ID_SEPARATOR))
            .filter(|(vrack, iplb)| !vrack.is_empty() && !iplb.is_empty())
            .map(|(vrack, iplb)| Self {
                service_name: vrack.to_string(),
                ip_loadbalancing: iplb.to_string(),
            })
            .ok_or_else(|| {
                Error::InvalidRequest(format!(
                    "resource id `{id}` is not formatted as {ID_PREFIX}<service_name>{ID_SEPARATOR}<ip_loadbalancing>"
                ))
            })
    }
}

/// Observed attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VrackIpLoadbalancingState {
    /// Resource ID.
    pub id: String,
    /// vRack service name.
    pub service_name: String,
    /// IP load balancer service name.
    pub ip_loadbalancing: String,
}

impl ResourceState for VrackIpLoadbalancingState {
    fn id(&self) -> &str {
        &self.id
    }

    fn to_attributes(&self) -> Attributes {
        let mut attributes = Attributes::new();
        attributes.insert("service_name", json!(self.service_name));
        attributes.insert("ip_loadbalancing", json!(self.ip_loadbalancing));
        attributes
    }
}

/// Lifecycle adapter for vRack IP load balancing attachments.
#[derive(Clone)]
pub struct VrackIpLoadbalancingResource {
    client: VrackClient,
    task_policy: PollPolicy,
}

impl VrackIpLoadbalancingResource {
    /// Create the resource from its API client.
    #[must_use]
    pub const fn new(client: VrackClient) -> Self {
        Self {
            client,
            task_policy: default_task_policy(),
        }
    }

    /// Create the resource from a provider configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be built.
    pub fn from_config(config: &OvhClientConfig) -> Result<Self> {
        Ok(Self::new(VrackClientBuilder::from_config(config)?.build()?))
    }

    /// Override the task polling policy.
    #[must_use]
    pub const fn with_task_policy(mut self, policy: PollPolicy) -> Self {
        self.task_policy = policy;
        self
    }
}

#[async_trait]
impl Resource for VrackIpLoadbalancingResource {
    type Config = VrackIpLoadbalancingConfig;
    type State = VrackIpLoadbalancingState;

    fn type_name(&self) -> &'static str {
        "ovh_vrack_iploadbalancing"
    }

    fn schema(&self) -> &'static [AttributeSchema] {
        SCHEMA
    }

    async fn create(&self, config: &VrackIpLoadbalancingConfig) -> Result<VrackIpLoadbalancingState> {
        let service_name = &config.service_name;
        let request = AttachIpLoadbalancingRequest {
            ip_loadbalancing: config.ip_loadbalancing.clone(),
        };

        debug!(%service_name, ip_loadbalancing = %config.ip_loadbalancing, "attaching ip loadbalancing");
        let task = self
            .client
            .attach_ip_loadbalancing(service_name, &request)
            .await?;

        wait_for_vrack_task(&self.client, service_name, &task, self.task_policy)
            .await
            .map_err(|err| {
                err.context(format!(
                    "waiting for vrack ({service_name}) to attach ip loadbalancing ({})",
                    config.ip_loadbalancing
                ))
            })?;
        info!(%service_name, ip_loadbalancing = %config.ip_loadbalancing, "ip loadbalancing attached");

        let id = config.resource_id();
        self.read(&id).await?.ok_or_else(|| {
            Error::NotFound(format!("vrack attachment {id} disappeared after creation"))
        })
    }

    async fn read(&self, id: &str) -> Result<Option<VrackIpLoadbalancingState>> {
        let config = VrackIpLoadbalancingConfig::from_resource_id(id)?;

        match self
            .client
            .get_ip_loadbalancing(&config.service_name, &config.ip_loadbalancing)
            .await
        {
            Ok(attachment) => Ok(Some(VrackIpLoadbalancingState {
                id: id.to_string(),
                service_name: attachment.vrack,
                ip_loadbalancing: attachment.ip_loadbalancing,
            })),
            Err(err) if err.is_not_found() => {
                info!(id, "vrack attachment is gone, removing from state");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    async fn update(
        &self,
        id: &str,
        config: &VrackIpLoadbalancingConfig,
    ) -> Result<VrackIpLoadbalancingState> {
        if config.resource_id() != id {
            return Err(Error::InvalidRequest(format!(
                "changing a vrack attachment requires replacing {id}"
            )));
        }

        self.read(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("vrack attachment {id} not found")))
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let config = VrackIpLoadbalancingConfig::from_resource_id(id)?;
        let service_name = &config.service_name;

        let task = match self
            .client
            .detach_ip_loadbalancing(service_name, &config.ip_loadbalancing)
            .await
        {
            Ok(task) => task,
            Err(err) if err.is_not_found() => {
                info!(id, "vrack attachment already removed");
                return Ok(());
            }
            Err(err) => return Err(err),
        };

        wait_for_vrack_task(&self.client, service_name, &task, self.task_policy)
            .await
            .map_err(|err| {
                err.context(format!(
                    "waiting for vrack ({service_name}) to detach ip loadbalancing ({})",
                    config.ip_loadbalancing
                ))
            })
    }

    async fn import(&self, id: &str) -> Result<String> {
        match id.split('/').collect::<Vec<_>>().as_slice() {
            [service_name, ip_loadbalancing]
                if !service_name.is_empty() && !ip_loadbalancing.is_empty() =>
            {
                Ok(VrackIpLoadbalancingConfig {
                    service_name: (*service_name).to_string(),
                    ip_loadbalancing: (*ip_loadbalancing).to_string(),
                }
                .resource_id())
            }
            _ => Err(Error::InvalidRequest(format!(
                "import id `{id}` is not formatted as <service_name>/<ip_loadbalancing>"
            ))),
        }
    }
}
