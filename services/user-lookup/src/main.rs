//! Twitter user lookup
//!
//! Small command-line front end for the application-only auth client:
//! 1. Loads consumer credentials and endpoint overrides
//! 2. Acquires a bearer token on first use
//! 3. Runs one command and prints the JSON result on stdout
//!
//! Logs go to stderr as JSON so stdout stays machine-readable.

mod config;

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use serde_json::Value;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use transport::ReqwestTransport;
use twitter_app_auth::{ApiClient, QueryParams};

use crate::config::Config;

const USAGE: &str = "usage: twitter-user-lookup [--config PATH] <command>

commands:
  user <screen_name>               show a user (users/show.json)
  get <endpoint> [key=value ...]   GET any 1.1 endpoint
  invalidate                       acquire, then invalidate the bearer token";

/// One unit of work requested on the command line.
#[derive(Debug, PartialEq)]
enum Command {
    User(String),
    Get {
        endpoint: String,
        params: QueryParams,
    },
    Invalidate,
}

/// Split `--config PATH` from the command and its arguments.
fn parse_args(args: &[String]) -> Result<(Option<String>, Command)> {
    let mut config_path = None;
    let mut rest = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--config" {
            let path = iter.next().context("--config requires a path")?;
            config_path = Some(path.clone());
        } else {
            rest.push(arg.as_str());
        }
    }

    let command = match rest.as_slice() {
        ["user", name] => Command::User((*name).to_owned()),
        ["get", endpoint, pairs @ ..] => {
            let mut params = QueryParams::new();
            for pair in pairs {
                let (key, value) = pair
                    .split_once('=')
                    .with_context(|| format!("expected key=value, got {pair:?}"))?;
                params.insert(key.to_owned(), value.to_owned());
            }
            Command::Get {
                endpoint: (*endpoint).to_owned(),
                params,
            }
        }
        ["invalidate"] => Command::Invalidate,
        _ => bail!("{USAGE}"),
    };

    Ok((config_path, command))
}

/// Execute a command. Returns the JSON to print, if any.
async fn run(client: &ApiClient, command: Command) -> Result<Option<Value>> {
    match command {
        Command::User(name) => {
            let user = client
                .get_user_info(&name)
                .await
                .with_context(|| format!("looking up user {name}"))?;
            Ok(Some(user))
        }
        Command::Get { endpoint, params } => {
            let body = client
                .get(&endpoint, &params)
                .await
                .with_context(|| format!("GET {endpoint}"))?;
            Ok(Some(body))
        }
        Command::Invalidate => {
            client.token().await.context("acquiring bearer token")?;
            client
                .invalidate_token()
                .await
                .context("invalidating bearer token")?;
            info!("bearer token invalidated");
            Ok(None)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with JSON output and LOG_LEVEL / RUST_LOG support
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_env("LOG_LEVEL")
                .or_else(|_| EnvFilter::try_from_default_env())
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (cli_config_path, command) = parse_args(&args)?;

    let config_path = Config::resolve_path(cli_config_path.as_deref());
    info!(path = %config_path.display(), "loading configuration");

    let config = Config::load(&config_path)
        .with_context(|| format!("failed to load config from {}", config_path.display()))?;
    let endpoints = config.endpoints();

    info!(
        api_url = %endpoints.api_url,
        token_url = %endpoints.token_url,
        timeout_secs = config.api.timeout_secs,
        "configuration loaded"
    );

    let transport =
        ReqwestTransport::new(Some(config.timeout())).context("building HTTP transport")?;
    let client = ApiClient::with_endpoints(config.credentials()?, endpoints, Arc::new(transport));

    if let Some(value) = run(&client, command).await? {
        println!("{}", serde_json::to_string_pretty(&value)?);
    }
    Ok(())
}
