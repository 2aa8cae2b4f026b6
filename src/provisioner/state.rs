use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Host-side state of the resource being provisioned.
///
/// Passed to [`ResourceProvisioner::apply`](super::ResourceProvisioner::apply)
/// for completeness; waffles does not consult it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceState {
    pub id: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl InstanceState {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}
