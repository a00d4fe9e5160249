//! Rules that depend on namespace configuration.
//!
//! Each role has a `*_fragments` function that decides which blocks appear and
//! how they nest, and a `*_rules` function that renders them to policy text.

use std::borrow::Cow;

use super::compose;
use crate::config::Configuration;
use crate::error::ComposerResult;
use crate::fragment::{skeleton, wrap_if, RuleFragment, Scope};
use crate::role::Role;

const OPERATOR_WRITE: &str = r#"operator = "write""#;

const AGENT_NODE_RULES: &str = r#"
node_prefix "" {
    policy = "write"
  }
"#;

const AGENT_SERVICE_RULES: &str = r#"
  service_prefix "" {
    policy = "read"
  }
"#;

// DNS needs every namespace to resolve services in any of them.
const DNS_RULES: &str = r#"
  node_prefix "" {
     policy = "read"
  }
  service_prefix "" {
     policy = "read"
  }
"#;

// Assumes the gateway registers under the default "mesh-gateway" name.
const MESH_GATEWAY_RULES: &str = r#"
  service_prefix "" {
     policy = "read"
  }

  service "mesh-gateway" {
     policy = "write"
  }
"#;

// The policy line is tab-indented in registered policies.
const SYNC_NODE_RULES: &str = "\nnode \"k8s-sync\" {\n\tpolicy = \"write\"\n  }\n";

const SYNC_CATALOG_RULES: &str = r#"
  node_prefix "" {
    policy = "read"
  }
  service_prefix "" {
    policy = "write"
  }
"#;

/// An empty first fragment; rendered text starts with a blank line.
const BLANK: RuleFragment = RuleFragment::leaf("");

pub fn agent_fragments(config: &Configuration) -> Vec<RuleFragment> {
    let mut fragments = vec![RuleFragment::leaf(skeleton(AGENT_NODE_RULES))];
    fragments.extend(wrap_if(
        config.namespaces_enabled,
        Scope::all_namespaces(),
        vec![RuleFragment::leaf(skeleton(AGENT_SERVICE_RULES))],
    ));
    fragments
}

pub fn dns_fragments(config: &Configuration) -> Vec<RuleFragment> {
    let mut fragments = vec![BLANK];
    fragments.extend(wrap_if(
        config.namespaces_enabled,
        Scope::all_namespaces(),
        vec![RuleFragment::leaf(skeleton(DNS_RULES))],
    ));
    fragments
}

pub fn mesh_gateway_fragments(config: &Configuration) -> Vec<RuleFragment> {
    let mut fragments = vec![BLANK];
    fragments.extend(wrap_if(
        config.namespaces_enabled,
        Scope::all_namespaces(),
        vec![RuleFragment::leaf(skeleton(MESH_GATEWAY_RULES))],
    ));
    fragments
}

/// Namespace block the sync process writes into: every mirrored namespace
/// under the prefix, or the single destination namespace.
pub fn sync_scope(config: &Configuration) -> Scope {
    if config.mirroring_enabled {
        Scope::NamespacePrefix(Cow::Borrowed("${MirroringPrefix}"))
    } else {
        Scope::Namespace(Cow::Borrowed("${SyncNamespace}"))
    }
}

pub fn sync_fragments(config: &Configuration) -> Vec<RuleFragment> {
    let mut fragments = vec![RuleFragment::leaf(skeleton(SYNC_NODE_RULES))];
    let catalog = vec![RuleFragment::leaf(skeleton(SYNC_CATALOG_RULES))];

    if config.namespaces_enabled {
        // Creating namespaces requires operator write.
        fragments.push(RuleFragment::leaf(OPERATOR_WRITE));
        fragments.push(RuleFragment::Wrapped(sync_scope(config), catalog));
    } else {
        fragments.extend(catalog);
    }
    fragments
}

/// The injector only needs to create namespaces, so it has no rules at all
/// without them.
pub fn injector_fragments(config: &Configuration) -> Vec<RuleFragment> {
    if config.namespaces_enabled {
        vec![BLANK, RuleFragment::leaf(OPERATOR_WRITE)]
    } else {
        vec![BLANK]
    }
}

pub fn agent_rules(config: &Configuration) -> ComposerResult<String> {
    compose(Role::Agent, &agent_fragments(config), config)
}

pub fn dns_rules(config: &Configuration) -> ComposerResult<String> {
    compose(Role::Dns, &dns_fragments(config), config)
}

pub fn mesh_gateway_rules(config: &Configuration) -> ComposerResult<String> {
    compose(Role::MeshGateway, &mesh_gateway_fragments(config), config)
}

pub fn sync_rules(config: &Configuration) -> ComposerResult<String> {
    compose(Role::Sync, &sync_fragments(config), config)
}

pub fn injector_rules(config: &Configuration) -> ComposerResult<String> {
    compose(Role::Injector, &injector_fragments(config), config)
}
