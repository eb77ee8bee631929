use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pixbot::models::{AppConfig, CellQueue};
use pixbot::server;
use pixbot::services::{batch_validator, samples, ImageSource, StartOutcome};

#[derive(Parser)]
#[command(name = "pixbot")]
#[command(about = "Pixel placement bot - draws images one pixel at a time")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP control server
    Serve,
    /// Load an image, sample or batch and place it, then exit
    Run {
        /// Image file path, http(s) URL or data: URL
        #[arg(short, long, conflicts_with_all = ["sample", "batch"])]
        image: Option<String>,

        /// Built-in sample name (see `pixbot samples`)
        #[arg(short, long, conflicts_with = "batch")]
        sample: Option<String>,

        /// JSON file with a list of {x, y, color} objects
        #[arg(short, long)]
        batch: Option<PathBuf>,

        /// Origin x (overrides config)
        #[arg(long, allow_hyphen_values = true)]
        x: Option<i64>,

        /// Origin y (overrides config)
        #[arg(long, allow_hyphen_values = true)]
        y: Option<i64>,

        /// Pause between placements in milliseconds (overrides config)
        #[arg(short, long)]
        delay: Option<u64>,
    },
    /// Quantize an image and print its cells as JSON
    Quantize {
        /// Image file path, http(s) URL or data: URL
        image: String,

        /// Bounding box width (default: from config)
        #[arg(long)]
        max_width: Option<u32>,

        /// Bounding box height (default: from config)
        #[arg(long)]
        max_height: Option<u32>,
    },
    /// List built-in sample images
    Samples,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve) => run_server().await,
        Some(Commands::Run {
            image,
            sample,
            batch,
            x,
            y,
            delay,
        }) => run_placement(image, sample, batch, x, y, delay).await,
        Some(Commands::Quantize {
            image,
            max_width,
            max_height,
        }) => run_quantize(&image, max_width, max_height).await,
        Some(Commands::Samples) => {
            run_samples_command();
            Ok(())
        }
        None => {
            run_status_command();
            Ok(())
        }
    }
}

fn init_logging(default_filter: &str, with_time: bool) {
    let registry = tracing_subscriber::registry().with(
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| default_filter.into()),
    );
    if with_time {
        registry.with(tracing_subscriber::fmt::layer()).init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().without_time())
            .init();
    }
}

fn load_config() -> AppConfig {
    let config_file = std::env::var("CONFIG_FILE").ok().map(PathBuf::from);
    AppConfig::load(config_file.as_deref())
}

/// Run the HTTP control server
async fn run_server() -> anyhow::Result<()> {
    init_logging("pixbot=info,tower_http=debug", true);

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let config = load_config();

    let state = server::create_app_state(config)?;
    state.refresh_palette().await;

    let scheduler = state.scheduler.clone();
    let app = server::build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "pixbot server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            scheduler.stop();
            tracing::info!("Shutting down");
        })
        .await?;

    Ok(())
}

/// Place one queue from the command line; Ctrl-C stops the run.
async fn run_placement(
    image: Option<String>,
    sample: Option<String>,
    batch: Option<PathBuf>,
    x: Option<i64>,
    y: Option<i64>,
    delay: Option<u64>,
) -> anyhow::Result<()> {
    init_logging("pixbot=info", false);

    let config = load_config();
    let state = server::create_app_state(config)?;
    let scheduler = state.scheduler.clone();

    let queue = if let Some(image) = image {
        let source = ImageSource::parse(&image);
        let (max_width, max_height) = state.config.image_bounds(None, None)?;
        state
            .loader
            .load_cells(&source, max_width, max_height)
            .await?
    } else if let Some(name) = sample {
        samples::find(&name)
            .with_context(|| {
                format!("Unknown sample '{name}' (available: {})", samples::names())
            })?
            .queue()
    } else if let Some(path) = batch {
        read_batch(&path)?
    } else {
        anyhow::bail!("Nothing to place: pass --image, --sample or --batch");
    };

    let state_now = scheduler.state();
    if x.is_some() || y.is_some() {
        scheduler.set_origin(x.unwrap_or(state_now.origin_x), y.unwrap_or(state_now.origin_y));
    }
    if let Some(delay) = delay {
        scheduler.set_inter_pixel_delay(delay);
    }

    state.refresh_palette().await;
    scheduler.load(queue);

    let run = tokio::spawn({
        let scheduler = scheduler.clone();
        async move { scheduler.start().await }
    });

    let stopper = tokio::spawn({
        let scheduler = scheduler.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                scheduler.stop();
            }
        }
    });

    let outcome = run.await?;
    stopper.abort();

    match outcome {
        StartOutcome::Finished(report) | StartOutcome::Stopped(report) => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        StartOutcome::AlreadyRunning | StartOutcome::EmptyQueue => {
            println!("Nothing was placed.");
        }
    }

    Ok(())
}

fn read_batch(path: &Path) -> anyhow::Result<CellQueue> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    let validated = batch_validator::validate(&value)?;

    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "batch".to_string());
    Ok(validated.into_queue(name))
}

/// Quantize an image and print the cells (no placement)
async fn run_quantize(
    image: &str,
    max_width: Option<u32>,
    max_height: Option<u32>,
) -> anyhow::Result<()> {
    init_logging("pixbot=warn", false);

    let config = load_config();
    let state = server::create_app_state(config)?;
    let source = ImageSource::parse(image);
    let (max_width, max_height) = state.config.image_bounds(max_width, max_height)?;
    let queue = state
        .loader
        .load_cells(&source, max_width, max_height)
        .await?;

    let diagnostics = queue.diagnostics();
    eprintln!(
        "{}: {} cells, {}x{}, {} colors",
        queue.name(),
        queue.len(),
        diagnostics.width,
        diagnostics.height,
        diagnostics.distinct_colors
    );
    println!("{}", serde_json::to_string_pretty(queue.cells())?);
    Ok(())
}

fn run_samples_command() {
    println!("Built-in samples:");
    for sample in samples::SAMPLES {
        println!("  {:<8} {}x{}", sample.name, sample.width(), sample.height());
    }
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();

    println!("pixbot v{VERSION}");
    println!("Places images pixel by pixel on a shared drawing surface\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR    {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  CONFIG_FILE  {}",
        config_file.as_deref().unwrap_or("(not set, using defaults)")
    );

    let config = AppConfig::load(config_file.as_deref().map(Path::new));
    println!("\nConfiguration:");
    println!("  Origin:   ({}, {})", config.origin.x, config.origin.y);
    println!("  Delay:    {} ms (settle {} ms)", config.delay_ms, config.settle_ms);
    println!(
        "  Max size: {}x{} (limit {} per side)",
        config.max_width, config.max_height, config.max_side_limit
    );
    println!("  Palette:  {} configured colors", config.palette.len());
    println!(
        "  Surface:  {}",
        config.bridge_url.as_deref().unwrap_or("dry run (no bridge_url)")
    );

    println!("\nCommands:");
    println!("  pixbot serve      Start the HTTP control server");
    println!("  pixbot run        Place an image, sample or batch");
    println!("  pixbot quantize   Print an image's cells as JSON");
    println!("  pixbot samples    List built-in samples");
    println!("\nRun 'pixbot --help' for more details.");
}
