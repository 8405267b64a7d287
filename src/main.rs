//! opensearch-access-graph - OpenSearch security model as an access graph

#![allow(missing_docs)]

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use opensearch_access_graph::utils::{LogFormat, init_logging};
use opensearch_access_graph::{Config, ConfigOverrides, Connector, UserMatchKey};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info, warn};

/// Export the OpenSearch security configuration as entitlements and grants
#[derive(Parser, Debug)]
#[command(name = "opensearch-access-graph", version, about, long_about = None)]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormatArg::Text, global = true)]
    log_format: LogFormatArg,

    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormatArg {
    Text,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Text => LogFormat::Text,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

/// Connection flags. These override the file and the environment.
#[derive(Args, Debug)]
struct ConnectionArgs {
    /// Cluster address, e.g. https://localhost:9200
    #[arg(long, global = true)]
    address: Option<String>,

    #[arg(long, global = true)]
    username: Option<String>,

    #[arg(long, global = true)]
    password: Option<String>,

    /// Key used to match mapped users: email, username or id
    #[arg(long, global = true)]
    user_match_key: Option<UserMatchKey>,

    /// Disable TLS certificate verification
    #[arg(long, global = true)]
    insecure_skip_verify: bool,

    /// PEM file with the CA that signed the cluster certificate
    #[arg(long, global = true)]
    ca_cert_path: Option<PathBuf>,

    /// Resolve mapped users that exist as internal users to user resources
    #[arg(long, global = true)]
    match_internal_users: bool,

    /// Roles processed concurrently
    #[arg(long, global = true)]
    concurrency: Option<usize>,
}

impl From<ConnectionArgs> for ConfigOverrides {
    fn from(args: ConnectionArgs) -> Self {
        Self {
            address: args.address,
            username: args.username,
            password: args.password,
            user_match_key: args.user_match_key,
            insecure_skip_verify: args.insecure_skip_verify.then_some(true),
            ca_cert_path: args.ca_cert_path,
            ca_cert: None,
            match_internal_users: args.match_internal_users.then_some(true),
            concurrency: args.concurrency,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a sync pass and write the report as JSON
    Sync {
        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON report
        #[arg(long)]
        pretty: bool,

        /// Exit successfully even when some roles failed
        #[arg(long)]
        allow_partial: bool,
    },

    /// Validate configuration and connectivity
    Check,

    /// Print the resource type declarations
    ResourceTypes,
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(cli.log_format.into());

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    if let Commands::ResourceTypes = cli.command {
        let types = opensearch_access_graph::connector::resource_types();
        println!("{}", serde_json::to_string_pretty(&types)?);
        return Ok(ExitCode::SUCCESS);
    }

    let config = Config::load(cli.config.as_deref(), cli.connection.into())
        .await
        .context("failed to load configuration")?;
    let connector = Connector::new(config.connector)
        .await
        .context("failed to create connector")?;

    match cli.command {
        Commands::Sync {
            output,
            pretty,
            allow_partial,
        } => {
            let report = connector.sync().await.context("sync pass failed")?;
            let json = if pretty {
                serde_json::to_string_pretty(&report)?
            } else {
                serde_json::to_string(&report)?
            };
            write_output(output.as_deref(), &json).await?;

            if report.is_complete() {
                Ok(ExitCode::SUCCESS)
            } else if allow_partial {
                warn!(failed_roles = report.failures.len(), "Sync completed with failures");
                Ok(ExitCode::SUCCESS)
            } else {
                error!(failed_roles = report.failures.len(), "Sync completed with failures");
                Ok(ExitCode::FAILURE)
            }
        }
        Commands::Check => {
            let report = connector.check().await.context("connectivity check failed")?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::ResourceTypes => Ok(ExitCode::SUCCESS),
    }
}

async fn write_output(path: Option<&Path>, json: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            tokio::fs::write(path, format!("{}\n", json))
                .await
                .with_context(|| format!("failed to write report to {}", path.display()))?;
            info!(path = %path.display(), "Report written");
        }
        None => println!("{}", json),
    }
    Ok(())
}
