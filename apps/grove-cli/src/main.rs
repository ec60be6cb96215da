mod script;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use grove_assets::{AssetStore, Primitive, import_gltf};
use grove_kernel::{GameConfig, Recording, World};
use grove_render::{DebugTextRenderer, RenderView, Renderer, frame_from_world};
use grove_tools::{EventTally, GameInspector, GameSummary};
use script::{Script, Walk};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "grove-cli", about = "Headless tool for Hippo Grove")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and default game parameters
    Info,
    /// Run a scripted round without a window
    Simulate {
        /// Number of ticks to simulate
        #[arg(short, long, default_value = "600")]
        ticks: u64,
        /// Round seed
        #[arg(short, long, default_value = "42")]
        seed: u64,
        /// YAML game config
        #[arg(long)]
        config: Option<PathBuf>,
        /// How the scripted hippo moves
        #[arg(long, value_enum, default_value_t = Walk::Circle)]
        walk: Walk,
        /// Fire every n-th tick (0 = never)
        #[arg(long, default_value = "30")]
        fire_every: u64,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
        /// Also dump the final frame as text
        #[arg(long)]
        frame: bool,
    },
    /// Record a scripted round, play it back and compare state hashes
    Replay {
        /// Number of ticks to record
        #[arg(short, long, default_value = "600")]
        ticks: u64,
        /// Round seed
        #[arg(short, long, default_value = "42")]
        seed: u64,
        /// YAML game config
        #[arg(long)]
        config: Option<PathBuf>,
        /// Save the recording as JSON
        #[arg(long)]
        save: Option<PathBuf>,
        /// Play a saved recording instead of recording a new one
        #[arg(long, conflicts_with = "save")]
        load: Option<PathBuf>,
    },
    /// Print the default config as YAML, or check a config file
    Config {
        /// Write the default config here instead of printing it
        #[arg(long)]
        out: Option<PathBuf>,
        /// Load and validate this config file
        #[arg(long, conflicts_with = "out")]
        check: Option<PathBuf>,
    },
    /// Import a glTF/GLB model and print mesh statistics
    Model {
        path: PathBuf,
        /// Save the resulting asset registry as JSON
        #[arg(long)]
        store: Option<PathBuf>,
    },
}

#[derive(Serialize)]
struct SimulationReport {
    summary: GameSummary,
    events: EventTally,
}

fn load_config(path: Option<&Path>) -> anyhow::Result<GameConfig> {
    match path {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(GameConfig::default()),
    }
}

/// Play `ticks` scripted ticks from `seed`, returning the world and a tally
/// of every event it produced.
fn simulate(config: GameConfig, seed: u64, ticks: u64, script: Script) -> (World, EventTally) {
    let mut world = World::new(config, seed);
    let mut tally = EventTally::default();
    for tick in 0..ticks {
        world.apply(&script.input(tick));
        tally.extend(&world.drain_events());
    }
    (world, tally)
}

fn record(config: GameConfig, seed: u64, ticks: u64, script: Script) -> (World, Recording) {
    let mut world = World::new(config, seed);
    let mut recording = Recording::new(seed);
    for tick in 0..ticks {
        recording.record(&mut world, script.input(tick));
    }
    (world, recording)
}

/// Camera view trailing the hippo, as the desktop frames it.
fn follow_view(world: &World) -> RenderView {
    RenderView::following(world.hippo().position)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            let config = GameConfig::default();
            println!("grove-cli v{}", env!("CARGO_PKG_VERSION"));
            println!(
                "kernel: tick_rate={} fruits={} enemies={} tree_attempts={}",
                config.tick_rate,
                config.fruit.initial_count,
                config.enemy.initial_count,
                config.trees.attempts
            );
            let mut store = AssetStore::new();
            for primitive in [
                Primitive::Cube,
                Primitive::Sphere,
                Primitive::Cylinder { taper: 100 },
                Primitive::Cone,
                Primitive::Plane,
            ] {
                let id = store.register_primitive(primitive);
                let mesh = &store.require(id)?.mesh;
                println!(
                    "primitive {:<13} {:>4} vertices {:>4} triangles",
                    primitive.name(),
                    mesh.vertex_count(),
                    mesh.triangle_count()
                );
            }
        }
        Commands::Simulate {
            ticks,
            seed,
            config,
            walk,
            fire_every,
            json,
            frame,
        } => {
            let config = load_config(config.as_deref())?;
            let script = Script { walk, fire_every };
            tracing::info!(ticks, seed, ?walk, fire_every, "simulating");
            let (world, events) = simulate(config, seed, ticks, script);
            let summary = GameInspector::summary(&world);

            if json {
                let report = SimulationReport { summary, events };
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{summary}");
                println!("Events: {events}");
            }
            if frame {
                let mut renderer = DebugTextRenderer::new();
                print!("{}", renderer.render(&frame_from_world(&world), &follow_view(&world)));
            }
        }
        Commands::Replay {
            ticks,
            seed,
            config,
            save,
            load,
        } => {
            let config = load_config(config.as_deref())?;

            if let Some(path) = load {
                let file = std::fs::File::open(&path)
                    .with_context(|| format!("opening recording {}", path.display()))?;
                let recording: Recording = serde_json::from_reader(file)
                    .with_context(|| format!("parsing recording {}", path.display()))?;
                let world = recording.play(config);
                println!(
                    "Played {} ticks from seed {}: hash={:016x}",
                    recording.len(),
                    recording.seed,
                    world.state_hash()
                );
                println!("{}", GameInspector::summary(&world));
                return Ok(());
            }

            println!("Deterministic replay: seed={seed}, ticks={ticks}");
            let script = Script {
                walk: Walk::Circle,
                fire_every: 20,
            };
            let (live, recording) = record(config.clone(), seed, ticks, script);
            let replayed = recording.play(config);

            println!("Live:   tick={} hash={:016x}", live.tick(), live.state_hash());
            println!(
                "Replay: tick={} hash={:016x}",
                replayed.tick(),
                replayed.state_hash()
            );

            if let Some(path) = save {
                let file = std::fs::File::create(&path)
                    .with_context(|| format!("creating {}", path.display()))?;
                serde_json::to_writer(file, &recording)?;
                println!("Recording saved to {}", path.display());
            }

            if live.state_hash() != replayed.state_hash() {
                bail!("MISMATCH: replay diverged from the live round");
            }
            println!("OK: replay matches");
        }
        Commands::Config { out, check } => {
            if let Some(path) = check {
                let config = load_config(Some(&path))?;
                println!(
                    "{} is valid (tick_rate={})",
                    path.display(),
                    config.tick_rate
                );
                return Ok(());
            }
            let config = GameConfig::default();
            match out {
                Some(path) => {
                    config.save(&path)?;
                    println!("Default config written to {}", path.display());
                }
                None => print!("{}", config.to_yaml()?),
            }
        }
        Commands::Model { path, store } => {
            let meshes = import_gltf(&path)
                .with_context(|| format!("importing {}", path.display()))?;
            let mut registry = AssetStore::new();
            for mesh in meshes {
                let name = mesh.name.clone();
                let (vertices, triangles) = (mesh.mesh.vertex_count(), mesh.mesh.triangle_count());
                let id = mesh.register(&mut registry);
                println!("{name:<24} {vertices:>7} vertices {triangles:>7} triangles  id={:016x}", id.0);
            }
            println!(
                "Total: {} unique meshes, {} triangles",
                registry.len(),
                registry.triangle_count()
            );
            if let Some(out) = store {
                registry.save(&out)?;
                println!("Asset registry written to {}", out.display());
            }
        }
    }

    Ok(())
}
