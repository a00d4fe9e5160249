//! The full set of policies to register for a configuration.

use log::debug;
use serde::Serialize;

use crate::config::Configuration;
use crate::error::ComposerResult;
use crate::role::Role;
use crate::rules::rules_for;

/// A named policy ready to hand to the registration API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyDefinition {
    pub role: Role,
    pub name: &'static str,
    pub description: &'static str,
    pub rules: String,
}

impl PolicyDefinition {
    pub fn for_role(role: Role, config: &Configuration) -> ComposerResult<Self> {
        Ok(Self {
            role,
            name: role.policy_name(),
            description: role.description(),
            rules: rules_for(role, config)?,
        })
    }
}

/// Compose a policy for every role, in [`Role::ALL`] order.
///
/// Roles whose rule text is blank (the injector without namespaces) are
/// omitted: Consul rejects policies with no rules. The first render failure
/// aborts the whole set.
pub fn policy_definitions(config: &Configuration) -> ComposerResult<Vec<PolicyDefinition>> {
    let mut policies = Vec::with_capacity(Role::ALL.len());
    for role in Role::ALL {
        let policy = PolicyDefinition::for_role(role, config)?;
        if policy.rules.trim().is_empty() {
            debug!("Skipping {} policy: no rules for this configuration", role);
            continue;
        }
        policies.push(policy);
    }
    Ok(policies)
}
