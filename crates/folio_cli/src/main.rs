//! Folio CLI
//!
//! Run the portfolio headlessly, inspect or flip the stored theme and send
//! a message through the configured contact relay.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use folio_app::{ContactMessage, FolioConfig, FormStatus, NavLink, PortfolioApp};
use folio_core::{FileStore, MemoryStore, Size};
use folio_theme::{ThemeState, THEME_KEY};

mod simulate;

use simulate::Script;

#[derive(Parser)]
#[command(name = "folio")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Folio portfolio runtime CLI", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file
    #[arg(short, long, global = true, default_value = "folio.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the page headlessly and print trigger progress per frame
    Simulate {
        /// Number of frames to run
        #[arg(short, long, default_value = "240")]
        frames: u32,

        /// Frame rate of the simulated display
        #[arg(long, default_value = "60")]
        fps: f64,

        /// Viewport width in pixels
        #[arg(long, default_value = "1280")]
        width: f32,

        /// Viewport height in pixels
        #[arg(long, default_value = "800")]
        height: f32,

        /// Wheel delta per input
        #[arg(short, long, default_value = "120", allow_negative_numbers = true)]
        wheel: f32,

        /// Frames between wheel inputs (0 disables wheel input)
        #[arg(short, long, default_value = "10")]
        every: u32,

        /// Navigate to a section (home, about, skill, project, contact) instead of wheeling
        #[arg(short, long)]
        goto: Option<String>,

        /// Print every trigger, including those not mid-range
        #[arg(short, long)]
        all: bool,
    },

    /// Show or toggle the stored color scheme
    Theme {
        #[command(subcommand)]
        command: ThemeCommands,
    },

    /// Send a message through the configured email relay
    Contact {
        /// Sender name
        #[arg(long)]
        name: String,

        /// Sender email address
        #[arg(long)]
        email: String,

        /// Message body
        #[arg(long)]
        message: String,
    },

    /// Show configuration and page information
    Info,
}

#[derive(Subcommand)]
enum ThemeCommands {
    /// Print the stored scheme
    Show,

    /// Switch between light and dark and persist the choice
    Toggle,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let config = load_config(&cli.config)?;

    match cli.command {
        Commands::Simulate {
            frames,
            fps,
            width,
            height,
            wheel,
            every,
            goto,
            all,
        } => cmd_simulate(config, frames, fps, Size::new(width, height), wheel, every, goto.as_deref(), all),

        Commands::Theme { command } => match command {
            ThemeCommands::Show => cmd_theme_show(&config),
            ThemeCommands::Toggle => cmd_theme_toggle(&config),
        },

        Commands::Contact {
            name,
            email,
            message,
        } => cmd_contact(config, ContactMessage::new(name, email, message)),

        Commands::Info => cmd_info(&cli.config, &config),
    }
}

fn load_config(path: &Path) -> Result<FolioConfig> {
    let config = FolioConfig::load(path).with_context(|| format!("Failed to load {}", path.display()))?;
    Ok(config.with_env_overrides())
}

#[allow(clippy::too_many_arguments)]
fn cmd_simulate(
    config: FolioConfig,
    frames: u32,
    fps: f64,
    viewport: Size,
    wheel: f32,
    every: u32,
    goto: Option<&str>,
    all: bool,
) -> Result<()> {
    if !(fps.is_finite() && fps > 0.0) {
        anyhow::bail!("Invalid frame rate {}", fps);
    }
    if !(viewport.width > 0.0 && viewport.height > 0.0) {
        anyhow::bail!("Invalid viewport {}x{}", viewport.width, viewport.height);
    }
    let goto = match goto {
        Some(name) => Some(NavLink::parse(name).with_context(|| {
            let valid: Vec<_> = NavLink::ALL.iter().map(|l| l.anchor()).collect();
            format!("Unknown section '{}'. Valid sections: {:?}", name, valid)
        })?),
        None => None,
    };

    let script = Script {
        viewport,
        frames,
        fps,
        wheel,
        every,
        goto,
        all,
    };
    simulate::run(config, &script)
}

fn open_theme(config: &FolioConfig) -> Result<(ThemeState, PathBuf)> {
    let path = config.storage.theme_path();
    let store = FileStore::open(&path).with_context(|| format!("Failed to open {}", path.display()))?;
    Ok((ThemeState::load(Box::new(store)), path))
}

fn cmd_theme_show(config: &FolioConfig) -> Result<()> {
    let (theme, path) = open_theme(config)?;
    println!("{}", theme.scheme());
    info!("Read {} from {}", THEME_KEY, path.display());
    Ok(())
}

fn cmd_theme_toggle(config: &FolioConfig) -> Result<()> {
    let (mut theme, path) = open_theme(config)?;
    let scheme = theme
        .toggle()
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("{}", scheme);
    Ok(())
}

fn cmd_contact(config: FolioConfig, message: ContactMessage) -> Result<()> {
    if !config.contact.has_credentials() {
        warn!("Relay credentials are incomplete; set them in [contact] or via FOLIO_EMAILJS_* variables");
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let viewport = Size::new(1280.0, 800.0);
    let mut app = PortfolioApp::new(config, Box::new(MemoryStore::new()), viewport)?;
    app.contact_form_mut().fill(message);

    runtime.block_on(async {
        app.submit_contact()?;
        info!("Sending...");
        app.settle_contact().await;
        anyhow::Ok(())
    })?;

    let status = app.contact_form().status().clone();
    app.shutdown();
    match status {
        FormStatus::Sent { .. } => {
            println!("{}", folio_app::content::SENT_NOTICE);
            Ok(())
        }
        FormStatus::Failed(text) => anyhow::bail!(text),
        FormStatus::Idle | FormStatus::Sending => anyhow::bail!("Relay did not respond"),
    }
}

fn cmd_info(config_path: &Path, config: &FolioConfig) -> Result<()> {
    println!("Folio");
    println!("=====");
    println!();
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    let source = if config_path.exists() { "" } else { " (not found, using defaults)" };
    println!("Config:  {}{}", config_path.display(), source);
    println!();
    println!("Scroll:");
    println!("  - duration: {}ms ({})", config.scroll.duration_ms, config.scroll.easing);
    println!(
        "  - smoothing: wheel {}, touch {}, native at or below {}px",
        config.scroll.smooth_wheel, config.scroll.smooth_touch, config.scroll.touch_breakpoint_px
    );
    println!("  - wheel multiplier: {}", config.scroll.wheel_multiplier);
    println!("  - lag smoothing: {}", config.scroll.lag_smoothing);
    println!();
    println!("Contact relay:");
    println!("  - endpoint: {}", config.contact.endpoint);
    let credentials = if config.contact.has_credentials() { "configured" } else { "missing" };
    println!("  - credentials: {}", credentials);
    println!("  - timeout: {}s", config.contact.timeout_secs);
    println!();
    println!("Theme file: {}", config.storage.theme_path().display());
    println!();

    let app = PortfolioApp::new(config.clone(), Box::new(MemoryStore::new()), Size::new(1280.0, 800.0))?;
    println!("Sections:");
    for name in app.section_names() {
        let top = app.page().anchor_top(name).unwrap_or_default();
        println!("  - #{:<8} at {:>6.0}px", name, top);
    }
    println!("Scroll triggers: {}", app.coordinator().trigger_count());

    Ok(())
}
