//! The `ovh_cloud_project` resource.
//!
//! A project is bought through an order; the resource ID is the order ID and
//! the project service name is resolved from the order on every call.

use crate::client::{CloudClient, CloudClientBuilder};
use crate::models::{CloudProject, CloudProjectUpdateRequest};
use crate::Result;
use async_trait::async_trait;
use ovh_core::config::OvhClientConfig;
use ovh_core::identifier::PUBLIC_CLOUD_PROJECT_ID;
use ovh_core::resource::{
    AttributeSchema, AttributeType, Attributes, Presence, Resource, ResourceState,
};
use ovh_core::task::PollPolicy;
use ovh_core::Error;
use ovh_order::models::{
    OrderRequest, ORDER_ATTRIBUTE, OVH_SUBSIDIARY_ATTRIBUTE, PLAN_ATTRIBUTE,
    PLAN_OPTION_ATTRIBUTE,
};
use ovh_order::{
    create_order, default_order_policy, find_order, parse_order_id, resolve_service_name,
    terminate_service, OrderClient, OrderState, ResolvedOrder,
};
use serde_json::{json, Value};
use tracing::{debug, info};

/// Product name of Public Cloud projects in the order cart.
pub const CLOUD_PRODUCT: &str = "cloud";

const SCHEMA: &[AttributeSchema] = &[
    AttributeSchema::new("description", AttributeType::String, Presence::OptionalComputed),
    AttributeSchema::new("urn", AttributeType::String, Presence::Computed),
    AttributeSchema::new("project_name", AttributeType::String, Presence::Computed),
    AttributeSchema::new("project_id", AttributeType::String, Presence::Computed),
    AttributeSchema::new("access", AttributeType::String, Presence::Computed),
    AttributeSchema::new("status", AttributeType::String, Presence::Computed),
    OVH_SUBSIDIARY_ATTRIBUTE,
    PLAN_ATTRIBUTE,
    PLAN_OPTION_ATTRIBUTE,
    ORDER_ATTRIBUTE,
];

/// Desired configuration of a cloud project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloudProjectConfig {
    /// Project description.
    pub description: Option<String>,
    /// How to buy the project.
    pub order: OrderRequest,
}

/// Observed state of a cloud project.
#[derive(Debug, Clone, PartialEq)]
pub struct CloudProjectState {
    /// Resource ID (the order ID).
    pub id: String,
    /// Resolved service name.
    pub service_name: String,
    /// Project as returned by the API.
    pub project: CloudProject,
    /// Order the project was bought with.
    pub order: OrderState,
}

fn optional(value: Option<&str>) -> Value {
    value.map_or(Value::Null, |v| json!(v))
}

impl ResourceState for CloudProjectState {
    fn id(&self) -> &str {
        &self.id
    }

    fn to_attributes(&self) -> Attributes {
        let project = &self.project;
        let mut attributes = Attributes::new();
        attributes.insert("description", optional(project.description.as_deref()));
        attributes.insert("urn", optional(project.urn()));
        attributes.insert("project_name", optional(project.project_name.as_deref()));
        attributes.insert("project_id", json!(project.project_id));
        attributes.insert("access", optional(project.access.as_deref()));
        attributes.insert("status", json!(project.status));
        attributes.insert("order", self.order.to_attribute());
        attributes
    }
}

/// Lifecycle adapter for Public Cloud projects.
#[derive(Clone)]
pub struct CloudProjectResource {
    orders: OrderClient,
    projects: CloudClient,
    order_policy: PollPolicy,
}

impl CloudProjectResource {
    /// Create the resource from its API clients.
    #[must_use]
    pub fn new(orders: OrderClient, projects: CloudClient) -> Self {
        Self {
            orders,
            projects,
            order_policy: default_order_policy(),
        }
    }

    /// Create the resource from a provider configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the clients cannot be built.
    pub fn from_config(config: &OvhClientConfig) -> Result<Self> {
        let projects = CloudClientBuilder::from_config(config)?.build()?;
        let orders = OrderClient::from_service_client(projects.service_client());
        Ok(Self::new(orders, projects))
    }

    /// Override the order delivery polling policy.
    #[must_use]
    pub const fn with_order_policy(mut self, policy: PollPolicy) -> Self {
        self.order_policy = policy;
        self
    }

    /// Resolve the order and project service name behind `id`.
    ///
    /// `None` means the order itself no longer exists.
    async fn resolve(&self, id: &str) -> Result<Option<(ResolvedOrder, String)>> {
        let order_id = parse_order_id(id)?;
        let Some(resolved) = find_order(&self.orders, order_id)
            .await
            .map_err(|err| err.context("could not read cloud project order"))?
        else {
            return Ok(None);
        };
        let service_name =
            resolve_service_name(&self.orders, &resolved, PUBLIC_CLOUD_PROJECT_ID).await?;
        Ok(Some((resolved, service_name)))
    }
}

#[async_trait]
impl Resource for CloudProjectResource {
    type Config = CloudProjectConfig;
    type State = CloudProjectState;

    fn type_name(&self) -> &'static str {
        "ovh_cloud_project"
    }

    fn schema(&self) -> &'static [AttributeSchema] {
        SCHEMA
    }

    async fn create(&self, config: &CloudProjectConfig) -> Result<CloudProjectState> {
        let order = create_order(&self.orders, CLOUD_PRODUCT, &config.order, self.order_policy)
            .await
            .map_err(|err| err.context("could not order cloud project"))?;
        let id = order.order_id.to_string();
        info!(order_id = order.order_id, "cloud project ordered");

        self.update(&id, config).await
    }

    async fn read(&self, id: &str) -> Result<Option<CloudProjectState>> {
        let Some((resolved, service_name)) = self.resolve(id).await? else {
            info!(id, "cloud project order is gone, removing from state");
            return Ok(None);
        };

        debug!(id, %service_name, "reading cloud project");
        let project = match self.projects.get_project(&service_name).await {
            Ok(project) => project,
            Err(err) if err.is_not_found() => {
                info!(id, %service_name, "cloud project is gone, removing from state");
                return Ok(None);
            }
            Err(err) => return Err(err),
        };

        Ok(Some(CloudProjectState {
            id: id.to_string(),
            service_name,
            project,
            order: OrderState::new(&resolved.order, &resolved.details),
        }))
    }

    async fn update(&self, id: &str, config: &CloudProjectConfig) -> Result<CloudProjectState> {
        let (_, service_name) = self
            .resolve(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("cloud project order {id} not found")))?;

        debug!(id, %service_name, "updating cloud project");
        let request = CloudProjectUpdateRequest {
            description: config.description.clone(),
        };
        self.projects
            .update_project(&service_name, &request)
            .await?;

        self.read(id).await?.ok_or_else(|| {
            Error::NotFound(format!(
                "cloud project {service_name} disappeared after update"
            ))
        })
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let Some((_, service_name)) = self.resolve(id).await? else {
            info!(id, "cloud project order is gone, nothing to terminate");
            return Ok(());
        };

        debug!(id, %service_name, "terminating cloud project");
        terminate_service(&self.projects, &service_name).await
    }
}
