// SPDX-License-Identifier: GPL-3.0-or-later
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, bail, Result};
use clap::{Parser, Subcommand};
use playme_config::{load as load_config, AppConfig};
use playme_core::{MethodPath, PlaymeClient, QueryString};
use playme_domain::{Album, Artist, Artists, Registry, Track};
use tracing::{debug, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "playme", version, about = "Query the playMe music metadata API")]
struct Args {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// API key, overrides the configured one
    #[arg(long, global = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Invoke any API method and print the response message
    Call {
        /// Dotted method name, e.g. album.getTracks
        method: String,
        /// Parameters as KEY=VALUE
        #[arg(value_parser = parse_param)]
        params: Vec<(String, String)>,
    },
    /// Print the URL a call would request, without sending it
    Url {
        method: String,
        #[arg(value_parser = parse_param)]
        params: Vec<(String, String)>,
    },
    /// Fetch one artist by code
    Artist { code: String },
    /// Fetch one album by code
    Album { code: String },
    /// Fetch one track by code
    Track { code: String },
    /// Search artists by name
    SearchArtists { name: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    init_tracing(&config.telemetry.log_level);

    let client = build_client(&config, args.api_key.as_deref())?;
    let registry = Registry::default();
    info!(target: "cli", base_url = client.base_url(), "client ready");

    match args.command {
        Command::Call { method, params } => {
            let method = parse_method(&method)?;
            let response = method.invoke(&client, to_query(params)).await?;
            println!("{}", response);

            let status = response.status()?;
            if !status.is_success() {
                bail!("{} ({})", status, status.code());
            }
        }
        Command::Url { method, params } => {
            let method = parse_method(&method)?;
            let request = client.request(method, to_query(params).with("format", "json"));
            println!("{}", request);
        }
        Command::Artist { code } => {
            let artist = Artist::fetch(&client, &registry, code).await?;
            println!("{}", serde_json::to_string_pretty(&artist)?);
        }
        Command::Album { code } => {
            let album = Album::fetch(&client, &registry, code).await?;
            println!("{}", serde_json::to_string_pretty(&album)?);
        }
        Command::Track { code } => {
            let track = Track::fetch(&client, &registry, code).await?;
            println!("{}", serde_json::to_string_pretty(&track)?);
        }
        Command::SearchArtists { name } => {
            let artists = Artists::search_by_name(&client, &registry, &name).await?;
            debug!(target: "cli", count = artists.len(), "search finished");
            println!("{}", serde_json::to_string_pretty(&artists)?);
        }
    }

    Ok(())
}

fn init_tracing(log_level: &str) {
    let fmt_layer = fmt::layer().with_target(true).with_level(true).with_writer(std::io::stderr);
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn build_client(config: &AppConfig, api_key: Option<&str>) -> Result<PlaymeClient> {
    let mut builder = PlaymeClient::builder().base_url(config.api.base_url.as_str());

    if let Some(api_key) = api_key.or(config.api.api_key.as_deref()) {
        builder = builder.api_key(api_key);
    }
    if let Some(secs) = config.api.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    Ok(builder.build()?)
}

/// Build a method path segment by segment so reserved names are rejected.
fn parse_method(name: &str) -> Result<MethodPath> {
    let mut segments = name.split('.');
    let root = segments
        .next()
        .filter(|root| !root.is_empty())
        .ok_or_else(|| anyhow!("empty method name"))?;

    let mut method = MethodPath::new(root);
    for segment in segments {
        method = method.extend(segment)?;
    }
    Ok(method)
}

fn parse_param(raw: &str) -> std::result::Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got `{raw}`"))
}

fn to_query(params: Vec<(String, String)>) -> QueryString {
    params.into_iter().collect()
}
