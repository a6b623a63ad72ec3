//! Resource lifecycle trait and attribute schema.
//!
//! A [`Resource`] adapts one OVHcloud service to the create/read/update/delete
//! and import lifecycle of an infrastructure-as-code engine. Resource state is a
//! typed struct; [`ResourceState::to_attributes`] is the explicit mapping from
//! that struct to the flat attributes published in the [`AttributeSchema`] list.

use crate::{Error, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;

/// Flat attribute map published to the engine.
pub type Attributes = BTreeMap<&'static str, Value>;

/// Value type of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    /// String value
    String,
    /// Integer value
    Int,
    /// Boolean value
    Bool,
    /// List of nested blocks or scalars
    List,
}

/// Who provides an attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Must be set in configuration
    Required,
    /// May be set in configuration
    Optional,
    /// May be set in configuration, otherwise filled by the API
    OptionalComputed,
    /// Always filled by the API
    Computed,
}

/// Declaration of one resource attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeSchema {
    /// Attribute name
    pub name: &'static str,
    /// Value type
    pub kind: AttributeType,
    /// Configuration presence
    pub presence: Presence,
    /// Changing the value replaces the resource
    pub force_new: bool,
}

impl AttributeSchema {
    /// Declare an attribute.
    #[must_use]
    pub const fn new(name: &'static str, kind: AttributeType, presence: Presence) -> Self {
        Self {
            name,
            kind,
            presence,
            force_new: false,
        }
    }

    /// Mark the attribute as forcing replacement.
    #[must_use]
    pub const fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    /// Returns true if the API fills the value.
    #[must_use]
    pub const fn is_computed(&self) -> bool {
        matches!(self.presence, Presence::Computed | Presence::OptionalComputed)
    }
}

/// Typed state of a managed resource.
pub trait ResourceState {
    /// Resource identifier stored by the engine.
    fn id(&self) -> &str;

    /// Map the typed state onto flat attributes.
    fn to_attributes(&self) -> Attributes;
}

/// Check that `attributes` only carries declared names and that every computed
/// attribute is present. Configuration-provided values are not checked.
///
/// # Errors
///
/// Returns [`Error::ValidationError`] naming the first offending attribute.
pub fn check_attributes(schema: &[AttributeSchema], attributes: &Attributes) -> Result<()> {
    if let Some(unknown) = attributes
        .keys()
        .find(|name| !schema.iter().any(|attr| attr.name == **name))
    {
        return Err(Error::ValidationError(format!(
            "attribute `{unknown}` is not declared in the schema"
        )));
    }

    if let Some(missing) = schema.iter().find(|attr| {
        attr.presence == Presence::Computed && !attributes.contains_key(attr.name)
    }) {
        return Err(Error::ValidationError(format!(
            "attribute `{}` is missing",
            missing.name
        )));
    }

    Ok(())
}

/// Create/read/update/delete/import lifecycle of one resource type.
#[async_trait]
pub trait Resource: Send + Sync {
    /// Desired attributes from configuration.
    type Config: Send + Sync;
    /// Observed state.
    type State: ResourceState + Send + Sync;

    /// Resource type name, e.g. `ovh_cloud_project`.
    fn type_name(&self) -> &'static str;

    /// Declared attributes.
    fn schema(&self) -> &'static [AttributeSchema];

    /// Provision the resource and return its state.
    async fn create(&self, config: &Self::Config) -> Result<Self::State>;

    /// Read the resource; `Ok(None)` means it no longer exists and must be
    /// removed from the engine state.
    async fn read(&self, id: &str) -> Result<Option<Self::State>>;

    /// Apply configuration changes to an existing resource.
    async fn update(&self, id: &str, config: &Self::Config) -> Result<Self::State>;

    /// Destroy the resource. Destroying an absent resource succeeds.
    async fn delete(&self, id: &str) -> Result<()>;

    /// Turn an import identifier into a resource ID. Accepts it verbatim by default.
    async fn import(&self, id: &str) -> Result<String> {
        Ok(id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SCHEMA: &[AttributeSchema] = &[
        AttributeSchema::new("name", AttributeType::String, Presence::Required).force_new(),
        AttributeSchema::new("description", AttributeType::String, Presence::OptionalComputed),
        AttributeSchema::new("status", AttributeType::String, Presence::Computed),
    ];

    #[test]
    fn schema_flags() {
        assert!(SCHEMA[0].force_new);
        assert!(!SCHEMA[0].is_computed());
        assert!(SCHEMA[1].is_computed());
        assert!(SCHEMA[2].is_computed());
    }

    #[test]
    fn check_accepts_complete_attributes() {
        let mut attributes = Attributes::new();
        attributes.insert("name", json!("demo"));
        attributes.insert("status", json!("ok"));
        assert!(check_attributes(SCHEMA, &attributes).is_ok());
    }

    #[test]
    fn check_rejects_unknown_attribute() {
        let mut attributes = Attributes::new();
        attributes.insert("name", json!("demo"));
        attributes.insert("status", json!("ok"));
        attributes.insert("colour", json!("blue"));
        let err = check_attributes(SCHEMA, &attributes).unwrap_err();
        assert!(err.to_string().contains("colour"));
    }

    #[test]
    fn check_rejects_missing_computed_attribute() {
        let mut attributes = Attributes::new();
        attributes.insert("name", json!("demo"));
        let err = check_attributes(SCHEMA, &attributes).unwrap_err();
        assert!(err.to_string().contains("status"));
    }
}
