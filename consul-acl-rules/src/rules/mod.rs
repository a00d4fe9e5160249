//! Per-role rule composers.

mod constant;
mod scoped;

pub use constant::{
    ent_license_rules, snapshot_agent_rules, ENT_LICENSE_RULES, SNAPSHOT_AGENT_RULES,
};
pub use scoped::{
    agent_fragments, agent_rules, dns_fragments, dns_rules, injector_fragments, injector_rules,
    mesh_gateway_fragments, mesh_gateway_rules, sync_fragments, sync_rules, sync_scope,
};

use log::debug;

use crate::config::Configuration;
use crate::error::{ComposerError, ComposerResult};
use crate::fragment::{render_fragments, RuleFragment};
use crate::role::Role;

/// Render a role's fragments, attributing any failure to the role.
pub(crate) fn compose(
    role: Role,
    fragments: &[RuleFragment],
    config: &Configuration,
) -> ComposerResult<String> {
    let rules = render_fragments(fragments, config).map_err(ComposerError::render(role))?;
    debug!(
        "Composed {} rules from {} fragments ({} bytes)",
        role,
        fragments.len(),
        rules.len()
    );
    Ok(rules)
}

/// Produce the rule text for `role`.
///
/// Constant roles ignore `config`. Every call allocates a fresh string; equal
/// configurations always yield identical text.
pub fn rules_for(role: Role, config: &Configuration) -> ComposerResult<String> {
    match role {
        Role::Agent => agent_rules(config),
        Role::Dns => dns_rules(config),
        Role::MeshGateway => mesh_gateway_rules(config),
        Role::Sync => sync_rules(config),
        Role::Injector => injector_rules(config),
        Role::SnapshotAgent => Ok(snapshot_agent_rules().to_string()),
        Role::EntLicense => Ok(ent_license_rules().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::*;
    use crate::error::TemplateError;
    use crate::fragment::Scope;

    #[test]
    fn test_compose_surfaces_render_failure() {
        let fragments = vec![RuleFragment::Wrapped(
            Scope::Namespace(Cow::Borrowed("${ConsulSyncNamespace}")),
            vec![RuleFragment::leaf("  node_prefix \"\" {}")],
        )];
        let err = compose(Role::Sync, &fragments, &Configuration::default())
            .expect_err("should fail");
        assert_eq!(
            err,
            ComposerError::RenderFailure {
                role: Role::Sync,
                source: TemplateError::UnknownPlaceholder("ConsulSyncNamespace".to_string()),
            }
        );
    }

    #[test]
    fn test_rules_for_dispatches_to_each_composer() {
        let config = Configuration::default()
            .with_namespaces(true)
            .with_sync_namespace("sync-namespace");
        assert_eq!(rules_for(Role::Agent, &config), agent_rules(&config));
        assert_eq!(rules_for(Role::Dns, &config), dns_rules(&config));
        assert_eq!(rules_for(Role::MeshGateway, &config), mesh_gateway_rules(&config));
        assert_eq!(rules_for(Role::Sync, &config), sync_rules(&config));
        assert_eq!(rules_for(Role::Injector, &config), injector_rules(&config));
        assert_eq!(
            rules_for(Role::SnapshotAgent, &config).as_deref(),
            Ok(SNAPSHOT_AGENT_RULES)
        );
        assert_eq!(rules_for(Role::EntLicense, &config).as_deref(), Ok(ENT_LICENSE_RULES));
    }

    #[test]
    fn test_constant_roles_ignore_configuration() {
        let a = Configuration::default();
        let b = Configuration::new(true, "x".into(), true, "y".into());
        for role in Role::ALL.into_iter().filter(|r| r.is_constant()) {
            assert_eq!(rules_for(role, &a), rules_for(role, &b));
        }
    }
}
