//! `teacup`: demo scenes and the standalone window launcher.

mod demos;
mod launcher;
mod window_process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use launcher::StandaloneWindow;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use teacup_core::{Engine, EngineConfig, WindowData};
use teacup_render::NativeBackend;

#[derive(Parser)]
#[command(name = "teacup", version, about = "Teacup 2D engine demos")]
struct Cli {
    /// Engine config file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Target frame rate, 0 for uncapped
    #[arg(long, global = true)]
    fps: Option<u32>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// A few overlapping rectangles.
    Rectangles,
    /// Twenty balls bouncing around a window.
    BouncingBalls,
    /// One window with a rainbow background, one with rainbow text.
    ///
    /// Needs the Inter font: run from a directory with `assets/` or set
    /// "font_dir" in a --config file.
    Rainbow,
    /// Open a window in its own process and close it again.
    Launch {
        /// Seconds to keep the window open
        #[arg(long, default_value_t = 10)]
        seconds: u64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        icon: Option<PathBuf>,
        #[arg(long, num_args = 2, value_names = ["WIDTH", "HEIGHT"])]
        size: Option<Vec<i32>>,
    },
    /// Child side of `launch`.
    #[command(hide = true)]
    WindowProcess {
        /// Encoded window data
        payload: Option<String>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(fps) = cli.fps {
        config.target_fps = fps;
    }

    match cli.command {
        Commands::Rectangles => {
            let mut engine = native_engine(config)?;
            demos::rectangles(&mut engine)?;
            demos::run(&mut engine, |_, _| {});
            engine.done();
        }
        Commands::BouncingBalls => {
            let mut engine = native_engine(config)?;
            let mut scene = demos::BouncingBalls::setup(&mut engine, &mut rand::rng())?;
            demos::run(&mut engine, |engine, _| scene.update(engine));
            engine.done();
        }
        Commands::Rainbow => {
            let mut engine = native_engine(config)?;
            let mut scene = demos::Rainbow::setup(&mut engine).map_err(with_font_hint)?;
            demos::run(&mut engine, |engine, dt| scene.update(engine, dt));
            engine.done();
        }
        Commands::Launch {
            seconds,
            title,
            icon,
            size,
        } => launch(seconds, title, icon, size)?,
        Commands::WindowProcess { payload } => window_process::run(payload.as_deref(), config)?,
    }
    Ok(())
}

fn native_engine(config: EngineConfig) -> Result<Engine<NativeBackend>> {
    let backend = NativeBackend::new().context("failed to start the native backend")?;
    Ok(Engine::with_config(backend, config))
}

fn with_font_hint(error: teacup_core::EngineError) -> anyhow::Error {
    let hint = demos::font_hint(&error);
    let error = anyhow::Error::from(error);
    match hint {
        Some(hint) => error.context(hint),
        None => error,
    }
}

fn launch(
    seconds: u64,
    title: Option<String>,
    icon: Option<PathBuf>,
    size: Option<Vec<i32>>,
) -> Result<()> {
    let mut data = WindowData::default();
    if let Some(title) = title {
        data.title = title;
    }
    if let Some(icon) = icon {
        data.icon = icon;
    }
    if let Some([width, height]) = size.as_deref() {
        data.size = (*width, *height);
    }

    let mut window = StandaloneWindow::new(data)?;
    window.start()?;

    let deadline = Instant::now() + Duration::from_secs(seconds);
    while Instant::now() < deadline {
        if !window.is_running() {
            log::info!("Window '{}' closed early", window.data().title);
            return Ok(());
        }
        std::thread::sleep(Duration::from_millis(100));
    }
    window.kill();
    Ok(())
}
