use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use screech_client::client::CaptureClient;
use screech_client::config::{load_config, CliOverrides, ConfigBuilder};
use screech_client::logging::init_logging;
use screech_client::workflow::run_workflow;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "screech",
    version,
    about = "Client for the Screech screenshot and recording API",
    after_help = "Examples:\n  screech --url https://example.com\n  screech --no-save\n  screech --width 1280 --height 720\n  screech --record --duration 10"
)]
struct Cli {
    /// URL to capture (default: the demo GIF page)
    #[arg(long)]
    url: Option<String>,

    /// Viewport width in pixels (default: 1920)
    #[arg(long)]
    width: Option<u32>,

    /// Viewport height in pixels (default: 1080)
    #[arg(long)]
    height: Option<u32>,

    /// Also request a screencast recording
    #[arg(long)]
    record: bool,

    /// Recording length in seconds (default: 5)
    #[arg(long)]
    duration: Option<u32>,

    /// Save returned media locally
    #[arg(long, conflicts_with = "no_save")]
    save: bool,

    /// Don't save files locally
    #[arg(long)]
    no_save: bool,

    /// Directory for saved captures (default: downloads)
    #[arg(long, short = 'O')]
    output: Option<PathBuf>,

    /// Directory or file containing screech.json
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Env file to load (may set SCREECH_BASE_URL)
    #[arg(short, long)]
    env: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn save_override(&self) -> Option<bool> {
        match (self.save, self.no_save) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let base_dir = std::env::current_dir().context("resolving working directory")?;
    let config_target = cli
        .config
        .as_ref()
        .map(|p| resolve_relative(&base_dir, p))
        .unwrap_or_else(|| base_dir.clone());

    let cfg = load_config(&config_target).context("loading configuration")?;

    let overrides = CliOverrides {
        target_url: cli.url.clone(),
        width: cli.width,
        height: cli.height,
        record: cli.record,
        duration_seconds: cli.duration,
        save: cli.save_override(),
        download_dir: cli.output.clone(),
    };

    let resolved = ConfigBuilder::new(
        base_dir.clone(),
        cfg,
        cli.env.as_ref().map(|p| resolve_relative(&base_dir, p)),
        overrides,
    )
    .build()?;
    debug!(
        config = ?resolved.config_path,
        env_files = ?resolved.env_files,
        base_url = %resolved.client.base_url,
        "configuration resolved"
    );

    let client = CaptureClient::new(resolved.client)?;
    run_workflow(&client, &resolved.workflow).await;

    Ok(())
}

fn resolve_relative(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
