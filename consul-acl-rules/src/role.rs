//! The fixed set of consumers that receive an ACL policy.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ComposerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// Consul client agents.
    Agent,
    /// DNS resolution through the agents.
    Dns,
    /// Mesh gateways registered under the default `mesh-gateway` name.
    MeshGateway,
    /// Catalog sync between Kubernetes and Consul.
    Sync,
    /// Connect sidecar injector.
    Injector,
    /// Snapshot agent.
    SnapshotAgent,
    /// Enterprise license operator.
    EntLicense,
}

impl Role {
    pub const ALL: [Self; 7] = [
        Self::Agent,
        Self::Dns,
        Self::MeshGateway,
        Self::Sync,
        Self::Injector,
        Self::SnapshotAgent,
        Self::EntLicense,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Agent => "agent",
            Self::Dns => "dns",
            Self::MeshGateway => "mesh-gateway",
            Self::Sync => "sync",
            Self::Injector => "injector",
            Self::SnapshotAgent => "snapshot-agent",
            Self::EntLicense => "ent-license",
        }
    }

    /// Name of the Consul ACL policy this role's rules are registered under.
    pub const fn policy_name(self) -> &'static str {
        match self {
            Self::Agent => "client-token",
            Self::Dns => "dns-policy",
            Self::MeshGateway => "mesh-gateway-token",
            Self::Sync => "catalog-sync-token",
            Self::Injector => "connect-inject-token",
            Self::SnapshotAgent => "client-snapshot-agent-token",
            Self::EntLicense => "enterprise-license-token",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Agent => "Client Token Policy",
            Self::Dns => "DNS Policy",
            Self::MeshGateway => "Mesh Gateway Token Policy",
            Self::Sync => "Catalog Sync Token Policy",
            Self::Injector => "Connect Inject Token Policy",
            Self::SnapshotAgent => "Client Snapshot Agent Token Policy",
            Self::EntLicense => "Enterprise License Token Policy",
        }
    }

    /// Whether the role's rules depend on the configuration at all.
    pub const fn is_constant(self) -> bool {
        matches!(self, Self::SnapshotAgent | Self::EntLicense)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ComposerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| ComposerError::UnknownRole(s.to_string()))
    }
}
