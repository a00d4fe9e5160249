//! This crate composes Consul ACL policy rules for the components of a
//! Kubernetes deployment:
//! - Configuration describing namespace and mirroring settings
//! - Rule fragments and their flattening to text
//! - Per-role composers and the full policy set
//!
//! Composition is pure: no I/O, no shared state, identical output for equal
//! input. Any configuration may be used from many threads at once.

mod config;
mod error;
pub mod fragment;
mod policy;
mod role;
pub mod rules;
mod template;

// Re-exports for a small, focused public API
pub use config::{Configuration, DEFAULT_SYNC_NAMESPACE};
pub use error::{ComposerError, ComposerResult, TemplateError};
pub use fragment::{RuleFragment, Scope};
pub use policy::{policy_definitions, PolicyDefinition};
pub use role::Role;
pub use rules::{
    agent_rules, dns_rules, ent_license_rules, injector_rules, mesh_gateway_rules, rules_for,
    snapshot_agent_rules, sync_rules,
};
pub use template::substitute;
