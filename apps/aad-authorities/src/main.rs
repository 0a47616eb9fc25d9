#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use std::path::{Path, PathBuf};

use aad_graph::AadGraphConfig;
use aad_security::{UserPrincipal, decode_bin, encode_bin};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Environment variable consulted when `--token` is not given.
const TOKEN_ENV: &str = "GRAPH_BEARER_TOKEN";

#[derive(Parser)]
#[command(name = "aad-authorities", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve the `ROLE_` authorities granted to a bearer token.
    Authorities(LookupArgs),
    /// List the directory groups of a bearer token's user.
    Groups(LookupArgs),
    /// Build a user principal from a compact token and show it.
    Principal {
        #[arg(long, env = TOKEN_ENV, hide_env_values = true)]
        token: String,
        /// Also write the binary encoding here and read it back.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Args)]
struct LookupArgs {
    /// Value sent as the `Authorization` header, verbatim.
    #[arg(long, env = TOKEN_ENV, hide_env_values = true)]
    token: String,
    /// YAML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Authorities(args) => {
            let graph = aad_graph::module::init(&load_config(args.config.as_deref())?)?;
            for authority in graph.granted_authorities(&args.token).await? {
                println!("{authority}");
            }
        }
        Command::Groups(args) => {
            let graph = aad_graph::module::init(&load_config(args.config.as_deref())?)?;
            for group in graph.user_groups(&args.token).await? {
                println!("{}\t{}", group.object_id, group.display_name);
            }
        }
        Command::Principal { token, out } => {
            let principal = UserPrincipal::from_token(&token)?;
            let principal = match out {
                Some(path) => store_and_reload(&principal, &path)?,
                None => principal,
            };
            let summary = serde_json::json!({
                "kid": principal.kid(),
                "claims": principal.claims().to_json(),
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<AadGraphConfig> {
    AadGraphConfig::load(path).context("failed to load configuration")
}

fn store_and_reload(principal: &UserPrincipal, path: &Path) -> Result<UserPrincipal> {
    std::fs::write(path, encode_bin(principal)?)
        .with_context(|| format!("failed to write {}", path.display()))?;
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    tracing::info!(path = %path.display(), len = bytes.len(), "Stored principal");
    Ok(decode_bin(&bytes)?)
}
