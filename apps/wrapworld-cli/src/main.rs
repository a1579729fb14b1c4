use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use glam::DVec2;
use tracing_subscriber::EnvFilter;
use wrapworld_common::ProjectionMode;
use wrapworld_engine::{EngineConfig, FrameClock, GameEngine};
use wrapworld_input::Key;
use wrapworld_kernel::World;
use wrapworld_render::{Camera, DebugTextRenderer, DrawListRenderer, NoSprites, pick_cell};

#[derive(Parser)]
#[command(name = "wrapworld-cli", about = "Headless tools for the wrapping world")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Engine configuration file (YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the world seed
    #[arg(long, global = true)]
    seed: Option<i64>,

    /// Override the number of chunks per world side
    #[arg(long, global = true)]
    chunk_count: Option<u32>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Fixed,
    Player,
}

impl From<ModeArg> for ProjectionMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Fixed => ProjectionMode::FixedAngle,
            ModeArg::Player => ProjectionMode::PlayerPerspective,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate versions and world dimensions
    Info,
    /// Generate one chunk and summarize its contents
    Chunk {
        #[arg(long, allow_negative_numbers = true)]
        x: i32,
        #[arg(long, allow_negative_numbers = true)]
        y: i32,
        /// Print every entity
        #[arg(long)]
        list: bool,
    },
    /// Run the frame loop with held keys and print the final frame
    Simulate {
        #[arg(short, long, default_value = "60")]
        frames: usize,
        #[arg(short, long, value_enum, default_value = "fixed")]
        mode: ModeArg,
        /// Keys held for the whole run, e.g. `w,d,left`
        #[arg(long, value_delimiter = ',')]
        hold: Vec<Key>,
        /// Seconds per frame
        #[arg(long, default_value_t = 1.0 / 60.0)]
        dt: f64,
        /// Use wall-clock frame times instead of `--dt`
        #[arg(long)]
        realtime: bool,
        /// Also print the engine state as JSON
        #[arg(long)]
        json: bool,
    },
    /// Resolve a screen position to its tile and chunk
    Pick {
        #[arg(long, allow_negative_numbers = true)]
        x: f64,
        #[arg(long, allow_negative_numbers = true)]
        y: f64,
        /// Camera focus in world pixels
        #[arg(long, allow_negative_numbers = true, default_value = "0")]
        camera_x: f64,
        #[arg(long, allow_negative_numbers = true, default_value = "0")]
        camera_y: f64,
        #[arg(long, default_value = "1")]
        zoom: f64,
        /// Camera rotation in radians
        #[arg(long, allow_negative_numbers = true, default_value = "0")]
        rotation: f64,
    },
}

fn load_config(cli: &Cli) -> anyhow::Result<EngineConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            EngineConfig::load(path)?
        }
        None => EngineConfig::default(),
    };
    if cli.seed.is_some() || cli.chunk_count.is_some() {
        config.override_world(cli.seed, cli.chunk_count)?;
    }
    tracing::info!(
        seed = config.world.seed(),
        chunk_count = config.world.chunk_count(),
        "world configured"
    );
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    let config = load_config(&cli)?;

    match cli.command {
        Commands::Info => {
            let w = &config.world;
            println!("wrapworld-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("stream: {}", wrapworld_stream::crate_info());
            println!("render: {}", wrapworld_render::crate_info());
            println!("engine: {}", wrapworld_engine::crate_info());
            println!(
                "world: seed={} chunk_size={} tile_size={} chunk_count={}",
                w.seed(),
                w.chunk_size(),
                w.tile_size(),
                w.chunk_count()
            );
            println!(
                "world size: {} px, {} tiles per side, chunk = {} px",
                w.world_size(),
                w.world_tiles(),
                w.chunk_pixel_size()
            );
            let plains = (f64::from(w.chunk_count()) * w.biome_plains_fraction()).floor();
            println!("plains columns: 0..{plains}");
        }
        Commands::Chunk { x, y, list } => {
            let mut world = World::new(config.world);
            let chunk = world.load_chunk(x, y);
            println!(
                "chunk {} (requested {x}_{y}): biome={} entities={}",
                chunk.coord(),
                chunk.biome(),
                chunk.len()
            );
            for (kind, count) in chunk.counts_by_kind() {
                println!("  {kind}: {count}");
            }
            if list {
                for e in chunk.entities() {
                    println!("  {} at ({}, {})", e.kind, e.position.x, e.position.y);
                }
            }
        }
        Commands::Simulate {
            frames,
            mode,
            hold,
            dt,
            realtime,
            json,
        } => {
            let mut engine = GameEngine::new(config);
            let mode = ProjectionMode::from(mode);
            if engine.camera().mode() != mode {
                engine.key_down(Key::P);
                engine.update(0.0);
                engine.key_up(Key::P);
            }
            for key in &hold {
                engine.key_down(*key);
            }

            let mut clock = FrameClock::new();
            clock.tick();
            tracing::info!(frames, ?mode, keys = hold.len(), realtime, "simulating");
            for _ in 0..frames {
                let step = if realtime {
                    std::thread::sleep(Duration::from_millis(16));
                    clock.tick()
                } else {
                    dt
                };
                engine.update(step);
                engine.render(&DrawListRenderer::new(NoSprites));
            }

            print!("{}", engine.render(&DebugTextRenderer::new()));
            let commands = engine.render(&DrawListRenderer::new(NoSprites));
            println!("Draw commands: {}", commands.len());
            println!(
                "Frames: {} avg frame {:?} fps {:.1}",
                engine.frames(),
                engine.timer().average(),
                engine.timer().fps()
            );
            if json {
                println!("{}", engine.state_json()?);
            }
        }
        Commands::Pick {
            x,
            y,
            camera_x,
            camera_y,
            zoom,
            rotation,
        } => {
            let mut camera = Camera::new(config.viewport.width, config.viewport.height);
            camera.snap_to(DVec2::new(camera_x, camera_y));
            camera.set_zoom(zoom);
            camera.update(1.0);
            camera.set_rotation(rotation);

            let cell = pick_cell(&camera, DVec2::new(x, y), 0.0, &config.world);
            let loc = cell.location;
            println!("Screen: ({x:.0}, {y:.0})");
            println!("World pixels: ({:.1}, {:.1})", loc.world.x, loc.world.y);
            println!("Grid cell: ({}, {})", loc.tile.x, loc.tile.y);
            println!("Chunk: ({}, {})", loc.chunk.x, loc.chunk.y);
            println!("Local tile in chunk: ({}, {})", loc.local.x, loc.local.y);
        }
    }

    Ok(())
}
