#![deny(unsafe_code)]
//! CLI host for the particle-field simulation.
//!
//! Subcommands:
//! - `run`: build a scene (from a file and/or flags), run it, print the frame
//! - `vertices`: print the named vertex catalog

mod error;

use clap::{Args, Parser, Subcommand};
use error::CliError;
use particle_field_core::{Force, Frame, NamedVertex, Scene, ScreenSize};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "particle-field", about = "Particle field simulation CLI")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a scene and print the final frame.
    Run(RunArgs),
    /// List the named vertices with heights and positions.
    Vertices,
}

/// Flags override the matching scene fields; unset flags keep the scene's
/// values (or the built-in defaults when no scene file is given).
#[derive(Args, Default)]
struct RunArgs {
    /// Scene file (JSON).
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Number of particles.
    #[arg(short, long)]
    count: Option<usize>,

    /// Side length of the cubic field.
    #[arg(long)]
    field_size: Option<f64>,

    /// Number of simulation steps.
    #[arg(short, long)]
    steps: Option<usize>,

    /// Timestep in seconds.
    #[arg(long)]
    dt: Option<f64>,

    /// PRNG seed for deterministic placement and turbulence.
    #[arg(long)]
    seed: Option<u64>,

    /// Screen width in pixels.
    #[arg(short = 'W', long)]
    width: Option<f64>,

    /// Screen height in pixels.
    #[arg(short = 'H', long)]
    height: Option<f64>,

    /// Forces applied every step, as a JSON array.
    #[arg(long)]
    forces: Option<String>,
}

const DEFAULT_COUNT: usize = 100;
const DEFAULT_STEPS: usize = 100;

fn build_scene(args: &RunArgs) -> Result<Scene, CliError> {
    let mut scene = match &args.scene {
        Some(path) => Scene::load(path)?,
        None => {
            let mut scene = Scene::default();
            scene.config.count = DEFAULT_COUNT;
            scene.steps = DEFAULT_STEPS;
            scene
        }
    };

    if let Some(count) = args.count {
        scene.config.count = count;
    }
    if let Some(field_size) = args.field_size {
        scene.config.field_size = field_size;
        scene.camera.field_size = field_size;
    }
    if let Some(steps) = args.steps {
        scene.steps = steps;
    }
    if let Some(dt) = args.dt {
        scene.dt = dt;
    }
    if let Some(seed) = args.seed {
        scene.config.seed = seed;
    }
    if args.width.is_some() || args.height.is_some() {
        scene.screen = ScreenSize::new(
            args.width.unwrap_or(scene.screen.width),
            args.height.unwrap_or(scene.screen.height),
        );
    }
    if let Some(forces) = &args.forces {
        scene.forces = serde_json::from_str::<Vec<Force>>(forces)
            .map_err(|e| CliError::Input(format!("invalid --forces JSON: {e}")))?;
    }

    Ok(scene)
}

fn print_frame(frame: &Frame) {
    println!("step {}: {} particles", frame.step, frame.particles.len());
    println!(
        "{:>6}  {:>26}  {:>17}  {:>7}  shape",
        "id", "position", "screen", "color"
    );
    for p in &frame.particles {
        println!(
            "{:>6}  ({:>7.3}, {:>7.3}, {:>7.3})  ({:>7.1}, {:>7.1})  {}  {}",
            p.id.0,
            p.position.x,
            p.position.y,
            p.position.z,
            p.screen.x,
            p.screen.y,
            p.color.hex(),
            p.shape.glyph()
        );
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Vertices => {
            let vertices = NamedVertex::sacred_vertices();
            if cli.json {
                let info: Vec<_> = vertices
                    .iter()
                    .map(|v| {
                        serde_json::json!({
                            "name": v.name,
                            "height": v.height,
                            "position": v.position(),
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Vertices:");
                for v in &vertices {
                    let p = v.position();
                    println!(
                        "  {:<16} height {:.3}  ({:.3}, {:.3}, {:.3})",
                        v.name, v.height, p.x, p.y, p.z
                    );
                }
            }
        }
        Command::Run(args) => {
            let scene = build_scene(&args)?;
            let frame = scene.run()?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&frame)?);
            } else {
                print_frame(&frame);
            }
        }
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            log::error!("{e}");
        }
        process::exit(e.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::io::Write;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_flags_parse() {
        let cli = Cli::try_parse_from([
            "particle-field",
            "--json",
            "run",
            "--count",
            "8",
            "--field-size",
            "12",
            "--seed",
            "3",
            "-W",
            "640",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Command::Run(args) => {
                assert_eq!(args.count, Some(8));
                assert_eq!(args.field_size, Some(12.0));
                assert_eq!(args.seed, Some(3));
                assert_eq!(args.width, Some(640.0));
                assert_eq!(args.height, None);
            }
            Command::Vertices => panic!("expected run"),
        }
    }

    #[test]
    fn defaults_without_scene_file() {
        let scene = build_scene(&RunArgs::default()).unwrap();
        assert_eq!(scene.config.count, DEFAULT_COUNT);
        assert_eq!(scene.steps, DEFAULT_STEPS);
        assert!(scene.forces.is_empty());
    }

    #[test]
    fn flags_override_defaults() {
        let args = RunArgs {
            count: Some(5),
            field_size: Some(8.0),
            width: Some(320.0),
            forces: Some(r#"[{"kind": "turbulence", "strength": 1.5}]"#.into()),
            ..RunArgs::default()
        };
        let scene = build_scene(&args).unwrap();
        assert_eq!(scene.config.count, 5);
        assert_eq!(scene.config.field_size, 8.0);
        assert_eq!(scene.camera.field_size, 8.0);
        assert_eq!(scene.screen, ScreenSize::new(320.0, 800.0));
        assert_eq!(scene.forces, vec![Force::Turbulence { strength: 1.5 }]);
    }

    #[test]
    fn bad_forces_json_is_input_error() {
        let args = RunArgs {
            forces: Some("[{\"kind\": \"gravity\"}]".into()),
            ..RunArgs::default()
        };
        let err = build_scene(&args).err().unwrap();
        assert_eq!(err.exit_code(), 12);
    }

    #[test]
    fn scene_file_loads_and_flags_win() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"config": {{"count": 3, "seed": 9}}, "steps": 4, "dt": 0.1,
                "forces": [{{"kind": "sacred"}}]}}"#
        )
        .unwrap();

        let args = RunArgs {
            scene: Some(file.path().to_path_buf()),
            steps: Some(2),
            ..RunArgs::default()
        };
        let scene = build_scene(&args).unwrap();
        assert_eq!(scene.config.count, 3);
        assert_eq!(scene.config.seed, 9);
        assert_eq!(scene.steps, 2);
        assert_eq!(scene.dt, 0.1);
        assert_eq!(scene.forces.len(), 1);

        let frame = scene.run().unwrap();
        assert_eq!(frame.step, 2);
        assert_eq!(frame.particles.len(), 3);
    }

    #[test]
    fn malformed_scene_file_is_input_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"steps": "many"}}"#).unwrap();
        let args = RunArgs {
            scene: Some(file.path().to_path_buf()),
            ..RunArgs::default()
        };
        assert_eq!(build_scene(&args).unwrap_err().exit_code(), 12);
    }

    #[test]
    fn missing_scene_file_is_io_error() {
        let args = RunArgs {
            scene: Some(PathBuf::from("/nonexistent/scene.json")),
            ..RunArgs::default()
        };
        assert_eq!(build_scene(&args).err().unwrap().exit_code(), 11);
    }

    #[test]
    fn invalid_field_size_fails_at_run() {
        let args = RunArgs {
            field_size: Some(-1.0),
            ..RunArgs::default()
        };
        let scene = build_scene(&args).unwrap();
        let err = CliError::from(scene.run().unwrap_err());
        assert_eq!(err.exit_code(), 10);
    }
}
