use std::path::PathBuf;

use anyhow::{ Context, Result };
use clap::Parser;
use tracing::{ info, Level };

use phong_tracer::consts::OUT_FILE;
use phong_tracer::scene::{ self, Scene };

/// Renders a scene of spheres and planes to a PPM image.
#[derive(Debug, Parser)]
#[clap(author, version, about)]
struct Args {
    /// JSON scene description. The built-in demo scene is used when omitted.
    scene: Option<PathBuf>,

    /// Where to write the rendered PPM image.
    #[clap(short, long, default_value = OUT_FILE)]
    output: PathBuf,

    /// Canvas width in pixels, overriding the scene's camera.
    #[clap(long)]
    width: Option<usize>,

    /// Canvas height in pixels, overriding the scene's camera.
    #[clap(long)]
    height: Option<usize>,

    /// Only log warnings and errors.
    #[clap(short, long)]
    quiet: bool,

    /// Log more detail (repeat for more).
    #[clap(short, long, parse(from_occurrences))]
    verbose: usize,
}

impl Args {
    fn log_level(&self) -> Level {
        if self.quiet {
            return Level::WARN;
        }

        match self.verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .init();

    let mut scene = match args.scene {
        Some(ref path) => Scene::load(path)
            .with_context(|| format!("failed to load scene {}", path.display()))?,
        None => scene::demo()?,
    };

    if args.width.is_some() || args.height.is_some() {
        let width = args.width.unwrap_or(scene.camera.hsize());
        let height = args.height.unwrap_or(scene.camera.vsize());
        scene.resize(width, height)?;
    }

    let canvas = scene.camera.render(&scene.world)?;
    canvas.save(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    info!(path = %args.output.display(), "wrote image");
    Ok(())
}
