use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::parser::ValueSource;
use clap::{ArgAction, ArgMatches, Args, CommandFactory, FromArgMatches, Parser, Subcommand};
use consul_acl_rules::{
    policy_definitions, rules_for, Configuration, Role, DEFAULT_SYNC_NAMESPACE,
};
use log::{debug, info, warn};

#[derive(Debug, Parser)]
#[command(
    name = "consul-acl-rules",
    version,
    about = "Render Consul ACL policy rules for Kubernetes components"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct ConfigArgs {
    /// Read the configuration from a JSON file; flags and their env vars are ignored
    #[arg(long = "config", value_name = "FILE", global = true)]
    file: Option<PathBuf>,

    /// Configuration flags given explicitly on the command line.
    #[arg(skip)]
    command_line_flags: Vec<&'static str>,

    /// Consul Enterprise namespaces are enabled
    #[arg(long, global = true, env = "CONSUL_ACL_ENABLE_NAMESPACES")]
    enable_namespaces: bool,

    /// Consul namespace the catalog sync writes into when mirroring is disabled
    #[arg(
        long = "consul-sync-destination-namespace",
        value_name = "NAMESPACE",
        global = true,
        default_value = DEFAULT_SYNC_NAMESPACE,
        env = "CONSUL_ACL_SYNC_NAMESPACE"
    )]
    sync_namespace: String,

    /// Mirror Kubernetes namespaces into Consul namespaces
    #[arg(
        long = "enable-sync-k8s-namespace-mirroring",
        global = true,
        env = "CONSUL_ACL_ENABLE_MIRRORING"
    )]
    enable_mirroring: bool,

    /// Prefix prepended to mirrored namespaces
    #[arg(
        long = "sync-k8s-namespace-mirroring-prefix",
        value_name = "PREFIX",
        global = true,
        default_value = "",
        env = "CONSUL_ACL_MIRRORING_PREFIX"
    )]
    mirroring_prefix: String,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the rule text for a single role
    Render {
        /// One of: agent, dns, mesh-gateway, sync, injector, snapshot-agent, ent-license
        role: Role,
    },
    /// Print every policy to register as JSON
    Policies {
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// List roles and the policy names they are registered under
    Roles,
}

/// Argument ids of the flags that `--config` replaces.
const CONFIG_FLAGS: [&str; 4] = [
    "enable_namespaces",
    "sync_namespace",
    "enable_mirroring",
    "mirroring_prefix",
];

/// Config flags whose value came from the command line rather than an env var
/// or a default.
fn command_line_flags(matches: &ArgMatches) -> Vec<&'static str> {
    CONFIG_FLAGS
        .into_iter()
        .filter(|id| matches.value_source(id) == Some(ValueSource::CommandLine))
        .collect()
}

impl ConfigArgs {
    fn load(&self) -> Result<Configuration> {
        let config = match &self.file {
            Some(path) => {
                if !self.command_line_flags.is_empty() {
                    warn!(
                        "Ignoring {} because --config was given",
                        self.command_line_flags.join(", ")
                    );
                }
                let content = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file: {}", path.display()))?;
                let config: Configuration = serde_json::from_str(&content).with_context(|| {
                    format!("Failed to parse config file: {}", path.display())
                })?;
                info!("Loaded configuration from {}", path.display());
                config
            }
            None => Configuration::new(
                self.enable_namespaces,
                self.sync_namespace.clone(),
                self.enable_mirroring,
                self.mirroring_prefix.clone(),
            ),
        };

        if config.mirroring_enabled && !config.namespaces_enabled {
            warn!("Namespace mirroring has no effect unless namespaces are enabled");
        }
        debug!("Using configuration: {:?}", config);
        Ok(config)
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Command::Render { role } => {
            let config = cli.config.load()?;
            let rules = rules_for(*role, &config)
                .with_context(|| format!("Failed to compose rules for role {}", role))?;
            // Exact rule text: no trailing newline.
            print!("{}", rules);
        }
        Command::Policies { pretty } => {
            let config = cli.config.load()?;
            let policies = policy_definitions(&config).context("Failed to compose policies")?;
            info!("Composed {} policies", policies.len());
            let json = if *pretty {
                serde_json::to_string_pretty(&policies)
            } else {
                serde_json::to_string(&policies)
            }
            .context("Failed to serialize policies")?;
            println!("{}", json);
        }
        Command::Roles => {
            for role in Role::ALL {
                println!("{}\t{}", role, role.policy_name());
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let matches = Cli::command().get_matches();
    let mut cli = match Cli::from_arg_matches(&matches) {
        Ok(cli) => cli,
        Err(e) => e.exit(),
    };
    cli.config.command_line_flags = command_line_flags(&matches);
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
