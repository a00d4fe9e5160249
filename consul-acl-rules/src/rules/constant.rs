//! Rules that don't change with configuration.

pub const SNAPSHOT_AGENT_RULES: &str = r#"acl = "write"
key "consul-snapshot/lock" {
   policy = "write"
}
session_prefix "" {
   policy = "write"
}
service "consul-snapshot" {
   policy = "write"
}"#;

pub const ENT_LICENSE_RULES: &str = r#"operator = "write""#;

pub fn snapshot_agent_rules() -> &'static str {
    SNAPSHOT_AGENT_RULES
}

pub fn ent_license_rules() -> &'static str {
    ENT_LICENSE_RULES
}
