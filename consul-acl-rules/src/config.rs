//! Configuration record consumed by the rule composers.

use derive_new::new;
use serde::{Deserialize, Serialize};

/// Namespace the sync process writes into when nothing else is configured.
pub const DEFAULT_SYNC_NAMESPACE: &str = "default";

/// Inputs that shape the generated rule text.
///
/// `sync_namespace`, `mirroring_enabled` and `mirroring_prefix` only matter when
/// `namespaces_enabled` is set. Values are inserted into rule text verbatim, so
/// they must already be valid Consul namespace names or prefixes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
#[serde(default, rename_all = "camelCase")]
pub struct Configuration {
    /// Consul Enterprise namespaces are in use.
    pub namespaces_enabled: bool,
    /// Single namespace the sync process targets when mirroring is disabled.
    pub sync_namespace: String,
    /// Kubernetes namespaces are mirrored into Consul namespaces.
    pub mirroring_enabled: bool,
    /// Prefix applied to mirrored namespaces. Empty means all namespaces.
    pub mirroring_prefix: String,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            namespaces_enabled: false,
            sync_namespace: DEFAULT_SYNC_NAMESPACE.to_string(),
            mirroring_enabled: false,
            mirroring_prefix: String::new(),
        }
    }
}

impl Configuration {
    pub fn with_namespaces(mut self, enabled: bool) -> Self {
        self.namespaces_enabled = enabled;
        self
    }

    pub fn with_sync_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.sync_namespace = namespace.into();
        self
    }

    pub fn with_mirroring(mut self, enabled: bool) -> Self {
        self.mirroring_enabled = enabled;
        self
    }

    pub fn with_mirroring_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.mirroring_prefix = prefix.into();
        self
    }

    /// Look up a field by the name rule skeletons use in `${Name}` placeholders.
    pub fn field(&self, name: &str) -> Option<&str> {
        match name {
            "SyncNamespace" => Some(&self.sync_namespace),
            "MirroringPrefix" => Some(&self.mirroring_prefix),
            _ => None,
        }
    }
}
