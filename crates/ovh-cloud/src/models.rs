//! Data structures for Public Cloud projects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// IAM metadata of a project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CloudProjectIam {
    /// IAM resource identifier.
    pub id: String,
    /// Resource URN.
    pub urn: String,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// Public Cloud project as returned by `GET /cloud/project/{serviceName}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CloudProject {
    /// Project identifier (also its service name).
    pub project_id: String,
    /// Project name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Project status (`creating`, `ok`, `suspended`, `deleted`, ...).
    pub status: String,
    /// Access type (`full`, `restricted`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access: Option<String>,
    /// Plan the project was ordered with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_code: Option<String>,
    /// Creation date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<DateTime<Utc>>,
    /// Expiration date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<DateTime<Utc>>,
    /// Order the project was bought with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<i64>,
    /// IAM metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iam: Option<CloudProjectIam>,
}

impl CloudProject {
    /// URN of the project, if IAM metadata is present.
    #[must_use]
    pub fn urn(&self) -> Option<&str> {
        self.iam.as_ref().map(|iam| iam.urn.as_str())
    }
}

/// Body of `PUT /cloud/project/{serviceName}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CloudProjectUpdateRequest {
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Body of `POST /cloud/project/{serviceName}/confirmTermination`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfirmTerminationRequest {
    /// Token returned by the terminate call.
    pub token: String,
}

/// Answer of `POST /cloud/project/{serviceName}/terminate`.
///
/// Accepts either a bare JSON string or an object with a `token` field.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum TerminationToken {
    /// `"token"`
    Plain(String),
    /// `{"token": "..."}`
    Wrapped {
        /// Confirmation token.
        token: String,
    },
}

impl TerminationToken {
    /// Extract the token.
    #[must_use]
    pub fn into_token(self) -> String {
        match self {
            Self::Plain(token) | Self::Wrapped { token } => token,
        }
    }
}
