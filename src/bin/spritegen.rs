use std::{net::SocketAddr, path::PathBuf, time::Duration};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use spritegen::{Config, QueryParams, config};

#[derive(Parser, Debug)]
#[command(name = "spritegen", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one sprite sheet to a PNG file.
    Render(RenderArgs),
    /// Print the resolved layers for a parameter set as JSON.
    Layers(LayersArgs),
    /// Serve the HTTP API.
    Serve(ServeArgs),
}

#[derive(Args, Debug)]
struct StoreArgs {
    /// Catalog JSON file, or a directory of per-entry JSON files.
    #[arg(long, env = "SPRITEGEN_CATALOG")]
    catalog: PathBuf,

    /// Base URL of the remote asset store.
    #[arg(long, env = "SPRITEGEN_ASSETS_BASE_URL", default_value = config::DEFAULT_ASSETS_BASE_URL)]
    assets_base: String,

    /// Local asset mirror used instead of the remote store.
    #[arg(long, env = "SPRITEGEN_ASSETS_DIR")]
    assets_dir: Option<PathBuf>,

    /// Timeout of a single asset request, in milliseconds.
    #[arg(long, env = "SPRITEGEN_PROBE_TIMEOUT_MS", default_value_t = 5000)]
    probe_timeout_ms: u64,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    store: StoreArgs,

    /// Request parameter as `name=value`; repeatable, order is kept.
    #[arg(long = "param", value_parser = parse_param)]
    params: Vec<(String, String)>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct LayersArgs {
    #[command(flatten)]
    store: StoreArgs,

    /// Request parameter as `name=value`; repeatable, order is kept.
    #[arg(long = "param", value_parser = parse_param)]
    params: Vec<(String, String)>,
}

#[derive(Args, Debug)]
struct ServeArgs {
    #[command(flatten)]
    store: StoreArgs,

    /// Listen address.
    #[arg(long, env = "SPRITEGEN_BIND", default_value = config::DEFAULT_BIND)]
    bind: SocketAddr,
}

impl StoreArgs {
    fn into_config(self) -> Config {
        let mut cfg = Config::new(self.catalog);
        cfg.assets_base_url = self.assets_base;
        cfg.assets_dir = self.assets_dir;
        cfg.probe_timeout = Duration::from_millis(self.probe_timeout_ms);
        cfg
    }
}

fn parse_param(s: &str) -> Result<(String, String), String> {
    let (k, v) = s
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{s}'"))?;
    if k.is_empty() {
        return Err(format!("empty parameter name in '{s}'"));
    }
    Ok((k.to_string(), v.to_string()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args).await,
        Command::Layers(args) => cmd_layers(args).await,
        Command::Serve(args) => cmd_serve(args).await,
    }
}

async fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let generator = args.store.into_config().build_generator()?;
    let params: QueryParams = args.params.into_iter().collect();
    let png = generator.generate(&params).await?;

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, &png)
        .with_context(|| format!("write sheet '{}'", args.out.display()))?;
    tracing::info!(out = %args.out.display(), bytes = png.len(), "sheet written");
    Ok(())
}

async fn cmd_layers(args: LayersArgs) -> anyhow::Result<()> {
    let generator = args.store.into_config().build_generator()?;
    let params: QueryParams = args.params.into_iter().collect();
    let layers = generator.layers(&params).await;
    let json = serde_json::to_string_pretty(&layers).context("serialize layers")?;
    println!("{json}");
    Ok(())
}

async fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut cfg = args.store.into_config();
    cfg.bind = args.bind;
    let generator = cfg.build_generator()?;
    spritegen::serve(generator, cfg.bind).await
}
