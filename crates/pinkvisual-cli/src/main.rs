//! pinkvisual - command line client for the Pink Visual catalog API.

/// Application configuration (TOML).
mod config;
/// Result output.
mod output;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use pinkvisual_api::{PinkVisualClient, QueryParams};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;
use url::Url;

use crate::config::{AppConfig, resolve_config_path};
use crate::output::{emit_listing, emit_record};

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// API key. Falls back to the config file if neither this flag nor the
    /// environment variable is set.
    #[arg(long, global = true, env = "PINKVISUAL_API_KEY", hide_env_values = true)]
    key: Option<String>,

    /// Override the API base URL.
    #[arg(long, global = true)]
    base_url: Option<Url>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Query episodes.
    Episodes(EpisodesCommand),
    /// Query niches.
    Niches(NichesCommand),
    /// Query actors.
    Actors(ActorsCommand),
    /// Manage the config file.
    Config(ConfigCommand),
}

/// Arguments for the `episodes` subcommand.
#[derive(clap::Args)]
struct EpisodesCommand {
    /// Episodes subcommand to run.
    #[command(subcommand)]
    command: EpisodesSubcommands,
}

/// Available episodes subcommands.
#[derive(Subcommand)]
enum EpisodesSubcommands {
    /// List episodes (`episodes/all`).
    All(QueryArgs),
    /// Get a single episode (`episode/{id}`).
    Get(IdArgs),
    /// Search episodes by phrase (`episodes/search/{term}`).
    Search(SearchArgs),
    /// List episodes in a niche (`episodes/niche/{niche_id}`).
    ByNiche(NicheIdArgs),
    /// List episodes featuring an actor (`episodes/actor/{actor_id}`).
    ByActor(ActorIdArgs),
}

/// Arguments for the `niches` subcommand.
#[derive(clap::Args)]
struct NichesCommand {
    /// Niches subcommand to run.
    #[command(subcommand)]
    command: NichesSubcommands,
}

/// Available niches subcommands.
#[derive(Subcommand)]
enum NichesSubcommands {
    /// List niches (`niches/all`).
    All(QueryArgs),
    /// Get a single niche (`niche/{id}`).
    Get(IdArgs),
}

/// Arguments for the `actors` subcommand.
#[derive(clap::Args)]
struct ActorsCommand {
    /// Actors subcommand to run.
    #[command(subcommand)]
    command: ActorsSubcommands,
}

/// Available actors subcommands.
#[derive(Subcommand)]
enum ActorsSubcommands {
    /// List actors (`actors/all`).
    All(QueryArgs),
    /// Get a single actor (`actor/{id}`).
    Get(IdArgs),
    /// Search actors by name (`actors/search/{term}`).
    Search(SearchArgs),
    /// List actors by initial letter (`actors/letter/{letter}`).
    ByLetter(LetterArgs),
    /// List actors appearing in a niche (`actors/niche/{niche_id}`).
    ByNiche(NicheIdArgs),
}

/// Arguments for the `config` subcommand.
#[derive(clap::Args)]
struct ConfigCommand {
    /// Config subcommand to run.
    #[command(subcommand)]
    command: ConfigSubcommands,
}

/// Available config subcommands.
#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Show the config file location and settings.
    Show,
    /// Store the API key in the config file.
    SetKey(SetKeyArgs),
}

/// Query parameters shared by every API subcommand.
#[derive(clap::Args)]
struct QueryArgs {
    /// Offset of the first result.
    #[arg(long)]
    start: Option<u32>,
    /// Maximum number of results.
    #[arg(long)]
    limit: Option<u32>,
    /// Extra query parameter as NAME=VALUE (repeatable).
    #[arg(long = "param", value_name = "NAME=VALUE", value_parser = parse_param)]
    params: Vec<(String, String)>,
}

/// Arguments for `get` subcommands.
#[derive(clap::Args)]
struct IdArgs {
    /// Record ID.
    #[arg(long, required = true)]
    id: String,
    #[command(flatten)]
    query: QueryArgs,
}

/// Arguments for `search` subcommands.
#[derive(clap::Args)]
struct SearchArgs {
    /// Search phrase.
    #[arg(long, required = true)]
    term: String,
    #[command(flatten)]
    query: QueryArgs,
}

/// Arguments for `by-niche` subcommands.
#[derive(clap::Args)]
struct NicheIdArgs {
    /// Niche ID.
    #[arg(long, required = true)]
    niche_id: String,
    #[command(flatten)]
    query: QueryArgs,
}

/// Arguments for `episodes by-actor`.
#[derive(clap::Args)]
struct ActorIdArgs {
    /// Actor ID.
    #[arg(long, required = true)]
    actor_id: String,
    #[command(flatten)]
    query: QueryArgs,
}

/// Arguments for `actors by-letter`.
#[derive(clap::Args)]
struct LetterArgs {
    /// Initial letter of the actor name.
    #[arg(long, required = true)]
    letter: char,
    #[command(flatten)]
    query: QueryArgs,
}

/// Arguments for `config set-key`.
#[derive(clap::Args)]
struct SetKeyArgs {
    /// API key to store.
    #[arg(value_name = "KEY")]
    api_key: String,
}

impl QueryArgs {
    /// Converts the arguments into request parameters.
    fn to_params(&self) -> QueryParams {
        let mut params: QueryParams = self.params.iter().cloned().collect();
        if let Some(start) = self.start {
            params.insert("start", start);
        }
        if let Some(limit) = self.limit {
            params.insert("limit", limit);
        }
        params
    }
}

/// Parses a `NAME=VALUE` query parameter.
fn parse_param(s: &str) -> std::result::Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{s}`"))?;
    if name.is_empty() {
        return Err(format!("parameter name is empty in `{s}`"));
    }
    Ok((String::from(name), String::from(value)))
}

/// Builds a `PinkVisualClient` from flags, environment and config file.
///
/// The resolved key becomes the process-wide default key.
///
/// # Errors
///
/// Returns an error if no API key is available, the config file is invalid,
/// or the client fails to build.
#[instrument(skip_all)]
fn build_client(cli: &Cli) -> Result<PinkVisualClient> {
    let config_path = resolve_config_path(cli.dir.as_deref())?;
    let config = AppConfig::load(&config_path)?;

    let key = cli
        .key
        .as_deref()
        .filter(|key| !key.is_empty())
        .or_else(|| config.api.key());
    let Some(key) = key else {
        bail!(
            "API key is not configured: pass --key, set PINKVISUAL_API_KEY, \
             or run `pinkvisual config set-key`"
        );
    };
    pinkvisual_api::init(key);

    let mut builder = PinkVisualClient::builder().user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));
    if let Some(url) = cli.base_url.clone().or(config.api.base_url()?) {
        builder = builder.base_url(url);
    }

    builder.build().context("failed to build API client")
}

/// Runs an `episodes` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_episodes(client: &PinkVisualClient, command: &EpisodesSubcommands) -> Result<()> {
    let episodes = client.episodes();
    match command {
        EpisodesSubcommands::All(args) => {
            let listing = episodes
                .all(&args.to_params())
                .await
                .context("episodes/all request failed")?;
            emit_listing(&listing)
        }
        EpisodesSubcommands::Get(args) => {
            let episode = episodes
                .one(&args.id, &args.query.to_params())
                .await
                .context("episode request failed")?;
            emit_record(&episode)
        }
        EpisodesSubcommands::Search(args) => {
            let listing = episodes
                .search(&args.term, &args.query.to_params())
                .await
                .context("episodes/search request failed")?;
            emit_listing(&listing)
        }
        EpisodesSubcommands::ByNiche(args) => {
            let listing = episodes
                .by_niche(&args.niche_id, &args.query.to_params())
                .await
                .context("episodes/niche request failed")?;
            emit_listing(&listing)
        }
        EpisodesSubcommands::ByActor(args) => {
            let listing = episodes
                .by_actor(&args.actor_id, &args.query.to_params())
                .await
                .context("episodes/actor request failed")?;
            emit_listing(&listing)
        }
    }
}

/// Runs a `niches` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_niches(client: &PinkVisualClient, command: &NichesSubcommands) -> Result<()> {
    let niches = client.niches();
    match command {
        NichesSubcommands::All(args) => {
            let listing = niches
                .all(&args.to_params())
                .await
                .context("niches/all request failed")?;
            emit_listing(&listing)
        }
        NichesSubcommands::Get(args) => {
            let niche = niches
                .one(&args.id, &args.query.to_params())
                .await
                .context("niche request failed")?;
            emit_record(&niche)
        }
    }
}

/// Runs an `actors` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_actors(client: &PinkVisualClient, command: &ActorsSubcommands) -> Result<()> {
    let actors = client.actors();
    match command {
        ActorsSubcommands::All(args) => {
            let listing = actors
                .all(&args.to_params())
                .await
                .context("actors/all request failed")?;
            emit_listing(&listing)
        }
        ActorsSubcommands::Get(args) => {
            let actor = actors
                .one(&args.id, &args.query.to_params())
                .await
                .context("actor request failed")?;
            emit_record(&actor)
        }
        ActorsSubcommands::Search(args) => {
            let listing = actors
                .search(&args.term, &args.query.to_params())
                .await
                .context("actors/search request failed")?;
            emit_listing(&listing)
        }
        ActorsSubcommands::ByLetter(args) => {
            let listing = actors
                .by_letter(args.letter, &args.query.to_params())
                .await
                .context("actors/letter request failed")?;
            emit_listing(&listing)
        }
        ActorsSubcommands::ByNiche(args) => {
            let listing = actors
                .by_niche(&args.niche_id, &args.query.to_params())
                .await
                .context("actors/niche request failed")?;
            emit_listing(&listing)
        }
    }
}

/// Runs a `config` subcommand.
///
/// # Errors
///
/// Returns an error if the config file cannot be read or written.
#[instrument(skip_all)]
fn run_config(dir: Option<&Path>, command: &ConfigSubcommands) -> Result<()> {
    let config_path = resolve_config_path(dir)?;
    let mut config = AppConfig::load(&config_path)?;

    match command {
        ConfigSubcommands::Show => {
            tracing::info!("Config file: {}", config_path.display());
            tracing::info!(
                "API key: {}",
                if config.api.key().is_some() {
                    "set"
                } else {
                    "not set"
                }
            );
            tracing::info!(
                "Base URL: {}",
                config
                    .api
                    .base_url
                    .as_deref()
                    .unwrap_or(pinkvisual_api::DEFAULT_BASE_URL)
            );
        }
        ConfigSubcommands::SetKey(args) => {
            if args.api_key.is_empty() {
                bail!("API key must not be empty");
            }
            config.api.key = Some(args.api_key.clone());
            config.save(&config_path)?;
            tracing::info!("API key saved to {}", config_path.display());
        }
    }

    Ok(())
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    let cli = Cli::parse();
    match &cli.command {
        Commands::Config(cmd) => run_config(cli.dir.as_deref(), &cmd.command),
        Commands::Episodes(cmd) => run_episodes(&build_client(&cli)?, &cmd.command).await,
        Commands::Niches(cmd) => run_niches(&build_client(&cli)?, &cmd.command).await,
        Commands::Actors(cmd) => run_actors(&build_client(&cli)?, &cmd.command).await,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::panic)]

    use super::*;

    #[test]
    fn test_parse_param() {
        // Arrange & Act
        let parsed = parse_param("sitename=pvlocker").unwrap();

        // Assert
        assert_eq!(parsed, (String::from("sitename"), String::from("pvlocker")));
    }

    #[test]
    fn test_parse_param_keeps_equals_in_value() {
        // Arrange & Act
        let parsed = parse_param("filter=a=b").unwrap();

        // Assert
        assert_eq!(parsed, (String::from("filter"), String::from("a=b")));
    }

    #[test]
    fn test_parse_param_rejects_missing_separator() {
        // Arrange & Act
        let result = parse_param("sitename");

        // Assert
        assert!(result.unwrap_err().contains("expected NAME=VALUE"));
    }

    #[test]
    fn test_parse_param_rejects_empty_name() {
        // Arrange & Act
        let result = parse_param("=value");

        // Assert
        assert!(result.unwrap_err().contains("parameter name is empty"));
    }

    #[test]
    fn test_query_args_to_params() {
        // Arrange
        let args = QueryArgs {
            start: Some(40),
            limit: Some(20),
            params: vec![(String::from("sitename"), String::from("pvlocker"))],
        };

        // Act
        let params = args.to_params();

        // Assert
        assert_eq!(params.get("start"), Some("40"));
        assert_eq!(params.get("limit"), Some("20"));
        assert_eq!(params.get("sitename"), Some("pvlocker"));
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn test_cli_parses_actors_by_letter() {
        // Arrange & Act
        let cli = Cli::try_parse_from([
            "pinkvisual",
            "--key",
            "abc",
            "actors",
            "by-letter",
            "--letter",
            "m",
            "--limit",
            "5",
        ])
        .unwrap();

        // Assert
        assert_eq!(cli.key.as_deref(), Some("abc"));
        let Commands::Actors(cmd) = cli.command else {
            panic!("expected actors command");
        };
        let ActorsSubcommands::ByLetter(args) = cmd.command else {
            panic!("expected by-letter subcommand");
        };
        assert_eq!(args.letter, 'm');
        assert_eq!(args.query.limit, Some(5));
    }
}
