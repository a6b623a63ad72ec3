//! Core OVHcloud domain types.
//!
//! This module provides the enumeration of OVHcloud API endpoints and the API
//! families served from them.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{Error, Result};

/// Name of the endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "ovh-eu";

/// Named OVHcloud API endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OvhEndpoint {
    /// OVHcloud Europe
    #[serde(rename = "ovh-eu")]
    OvhEu,
    /// OVHcloud North America
    #[serde(rename = "ovh-ca")]
    OvhCa,
    /// OVHcloud US
    #[serde(rename = "ovh-us")]
    OvhUs,
    /// Kimsufi Europe
    #[serde(rename = "kimsufi-eu")]
    KimsufiEu,
    /// Kimsufi North America
    #[serde(rename = "kimsufi-ca")]
    KimsufiCa,
    /// So you Start Europe
    #[serde(rename = "soyoustart-eu")]
    SoyoustartEu,
    /// So you Start North America
    #[serde(rename = "soyoustart-ca")]
    SoyoustartCa,
}

impl OvhEndpoint {
    /// Returns the endpoint name as used in configuration.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::OvhEu => "ovh-eu",
            Self::OvhCa => "ovh-ca",
            Self::OvhUs => "ovh-us",
            Self::KimsufiEu => "kimsufi-eu",
            Self::KimsufiCa => "kimsufi-ca",
            Self::SoyoustartEu => "soyoustart-eu",
            Self::SoyoustartCa => "soyoustart-ca",
        }
    }

    /// Returns the API base URL of the endpoint.
    #[must_use]
    pub const fn base_url(&self) -> &'static str {
        match self {
            Self::OvhEu => "https://eu.api.ovh.com/1.0",
            Self::OvhCa => "https://ca.api.ovh.com/1.0",
            Self::OvhUs => "https://api.us.ovhcloud.com/1.0",
            Self::KimsufiEu => "https://eu.api.kimsufi.com/1.0",
            Self::KimsufiCa => "https://ca.api.kimsufi.com/1.0",
            Self::SoyoustartEu => "https://eu.api.soyoustart.com/1.0",
            Self::SoyoustartCa => "https://ca.api.soyoustart.com/1.0",
        }
    }

    /// Returns all known endpoints.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::OvhEu,
            Self::OvhCa,
            Self::OvhUs,
            Self::KimsufiEu,
            Self::KimsufiCa,
            Self::SoyoustartEu,
            Self::SoyoustartCa,
        ]
    }
}

impl FromStr for OvhEndpoint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|endpoint| endpoint.name() == s.to_lowercase())
            .ok_or_else(|| Error::InvalidRequest(format!("Unknown endpoint: {s}")))
    }
}

impl std::fmt::Display for OvhEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// API families served by an OVHcloud endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApiFamily {
    /// `/order` and `/me/order`
    Order,
    /// `/cloud`
    Cloud,
    /// `/vrack`
    Vrack,
}

impl ApiFamily {
    /// Returns the family name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Order => "order",
            Self::Cloud => "cloud",
            Self::Vrack => "vrack",
        }
    }

    /// Returns the human readable label used in messages.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Order => "Order API",
            Self::Cloud => "Cloud API",
            Self::Vrack => "vRack API",
        }
    }
}

impl std::fmt::Display for ApiFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_from_str() {
        assert_eq!("ovh-eu".parse::<OvhEndpoint>().unwrap(), OvhEndpoint::OvhEu);
        assert_eq!("OVH-US".parse::<OvhEndpoint>().unwrap(), OvhEndpoint::OvhUs);
        assert!("ovh-mars".parse::<OvhEndpoint>().is_err());
    }

    #[test]
    fn test_endpoint_names_round_trip() {
        for endpoint in OvhEndpoint::all() {
            assert_eq!(endpoint.name().parse::<OvhEndpoint>().unwrap(), *endpoint);
            assert!(endpoint.base_url().starts_with("https://"));
            assert!(endpoint.base_url().ends_with("/1.0"));
        }
    }

    #[test]
    fn test_endpoint_serde_uses_config_names() {
        let json = serde_json::to_string(&OvhEndpoint::SoyoustartCa).unwrap();
        assert_eq!(json, "\"soyoustart-ca\"");
    }

    #[test]
    fn test_default_endpoint_is_known() {
        assert!(DEFAULT_ENDPOINT.parse::<OvhEndpoint>().is_ok());
    }

    #[test]
    fn test_api_family_display() {
        assert_eq!(ApiFamily::Vrack.to_string(), "vrack");
        assert_eq!(ApiFamily::Cloud.label(), "Cloud API");
    }
}
