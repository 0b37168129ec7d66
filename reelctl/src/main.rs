mod plan;
mod script;
mod simulate;

use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use reel_config::{
    ConfigLoader, ConfigWarnings, ReelConfig, validation::apply_guard_rails,
};
use reel_core::{Carousel, WrapMode};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use plan::PlanReport;
use script::Script;
use simulate::RendererMode;

#[derive(Parser)]
#[command(
    name = "reelctl",
    version,
    about = "Headless driver for reel carousels"
)]
struct Cli {
    #[command(flatten)]
    overrides: Overrides,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Clone)]
struct Overrides {
    /// Config file (TOML or JSON). Without it, REEL_CONFIG_PATH,
    /// REEL_CONFIG_JSON and reel.toml are tried in that order
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Env file read before the configuration is loaded
    #[arg(long, global = true, default_value = ".env")]
    env_file: PathBuf,
    /// Number of items in the sequence
    #[arg(long, global = true)]
    items: Option<usize>,
    /// Wrap around seamlessly at both ends
    #[arg(long, global = true)]
    infinite: bool,
    /// Items shown side by side
    #[arg(long, global = true)]
    visible_items: Option<usize>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the clone pool, index bounds and initial index as JSON
    Plan {
        /// Include every rendered slot
        #[arg(long)]
        slots: bool,
    },
    /// Replay a JSON script of input events and print each output as a JSON line
    Simulate {
        /// Script file: {"steps": [{"op": "next"}, ...]}
        #[arg(long)]
        script: PathBuf,
        #[arg(long, value_enum, default_value_t = RendererMode::Ack)]
        renderer: RendererMode,
    },
    /// Print the effective configuration as TOML
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Stdout carries JSON; logs go to stderr.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let mut config = load_config(&cli.overrides)?;

    let mut stdout = io::stdout().lock();
    match cli.command {
        Command::Plan { slots } => {
            let carousel = mount(&config)?;
            let report = PlanReport::new(&carousel, slots);
            serde_json::to_writer_pretty(&mut stdout, &report)?;
            writeln!(stdout)?;
        }
        Command::Simulate { script, renderer } => {
            let script = Script::from_path(&script)?;
            if cli.overrides.items.is_none()
                && let Some(items) = script.items
            {
                config.track.items = items;
            }
            let viewport_width =
                script.viewport_width.unwrap_or(config.track.viewport_width);
            let carousel = mount(&config)?;
            let finished = simulate::run(
                carousel,
                viewport_width,
                &script,
                renderer,
                &mut stdout,
            )
            .await?;
            info!(
                index = finished.current_index(),
                logical_index = finished.logical_index(),
                "simulation finished"
            );
        }
        Command::Config => {
            write!(stdout, "{}", config.to_toml_string()?)?;
        }
    }
    stdout.flush()?;
    Ok(())
}

fn load_config(overrides: &Overrides) -> Result<ReelConfig> {
    let mut loader = ConfigLoader::new().with_env_file(&overrides.env_file);
    if let Some(path) = &overrides.config {
        loader = loader.with_config_path(path);
    }
    let load = loader.load().context("failed to load configuration")?;
    let mut config = load.config;

    let mut changed = false;
    if let Some(items) = overrides.items {
        config.track.items = items;
        changed = true;
    }
    if overrides.infinite {
        config.carousel.wrap_mode = WrapMode::Infinite;
        changed = true;
    }
    if let Some(visible_items) = overrides.visible_items {
        config.carousel.visible_items = visible_items;
        changed = true;
    }

    let warnings = if changed {
        apply_guard_rails(&config)
            .context("invalid command-line overrides")?
    } else {
        load.warnings
    };
    log_warnings(&warnings);
    Ok(config)
}

fn mount(config: &ReelConfig) -> Result<Carousel> {
    Carousel::new(config.track.items, config.carousel.to_settings())
        .context("invalid carousel settings")
}

fn log_warnings(warnings: &ConfigWarnings) {
    for warning in warnings {
        match warning.hint {
            Some(hint) => warn!(
                key = warning.key,
                hint,
                "configuration warning: {}",
                warning.message
            ),
            None => warn!(
                key = warning.key,
                "configuration warning: {}",
                warning.message
            ),
        }
    }
}
