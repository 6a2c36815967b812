//! Headless demo host: drives a sample preset through the surface callbacks
//! and prints the draw calls of the last frame.

use clap::Parser;
use log::{debug, info};

use glcam::{Matrix4, Primitive, SamplePreset};

#[derive(Parser, Debug, Clone)]
#[command(name = "glcam")]
#[command(about = "Run a sample scene without a GPU and print its matrices", long_about = None)]
struct Cli {
    /// Scene to run
    #[arg(short, long, default_value = "phong")]
    preset: SamplePreset,

    /// Number of frames to draw
    #[arg(short, long, default_value_t = 60)]
    frames: u32,

    /// Viewport width in pixels
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Log per-frame details
    #[arg(short, long)]
    verbose: bool,

    /// List the available scenes and exit
    #[arg(long)]
    list: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level = if cli.verbose { "trace" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if cli.list {
        for preset in SamplePreset::ALL {
            println!("{preset}");
        }
        return Ok(());
    }

    let mut renderer = cli.preset.build()?;
    renderer.on_surface_created();
    renderer.on_surface_changed(cli.width, cli.height)?;

    for frame in 1..=cli.frames {
        let calls = renderer.on_draw_frame();
        debug!("frame {}: {} draw calls", frame, calls.len());
    }

    let state = renderer.frame_state();
    info!(
        "{}: {} frames, camera azimuth {:.2} elevation {:.2}",
        cli.preset, state.frame, state.azimuth, state.elevation
    );

    let eye = renderer.camera().eye_position();
    println!(
        "{} after {} frames, eye at ({:.3}, {:.3}, {:.3})",
        cli.preset, cli.frames, eye[0], eye[1], eye[2]
    );

    for call in renderer.draw_calls() {
        let primitive = match call.primitive {
            Primitive::Triangles { index_count } => format!("{} triangles", index_count / 3),
            Primitive::Points { count, point_size } => {
                format!("{} points @ {}px", count, point_size)
            }
        };
        let mv = Matrix4(call.uniforms.model_view);
        let t = mv.translation();
        println!(
            "  entity {:>3}  {:<16} {:<20} model-view translation ({:.3}, {:.3}, {:.3})",
            call.entity.id(),
            call.technique.name(),
            primitive,
            t[0],
            t[1],
            t[2]
        );
    }

    Ok(())
}
