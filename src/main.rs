use clap::Parser;
use fingerpaint::Config;
use fingerpaint::backend::{self, RunOptions};

#[derive(Parser, Debug)]
#[command(name = "fingerpaint")]
#[command(
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("FINGERPAINT_GIT_HASH"), ")"),
    about = "Draw on a virtual canvas with hand gestures tracked by a camera"
)]
#[command(after_help = "Hand landmarks are read from stdin, one JSON object per frame.\n\
    Send 'q' (or press Ctrl+C) to end the session.")]
struct Cli {
    /// Camera index the landmark detector reads from
    #[arg(long, short = 'c', value_name = "INDEX", default_value_t = 0)]
    camera: u32,

    /// Canvas width in pixels (overrides the config file)
    #[arg(long, value_name = "PIXELS", value_parser = clap::value_parser!(u32).range(1..))]
    width: Option<u32>,

    /// Canvas height in pixels (overrides the config file)
    #[arg(long, value_name = "PIXELS", value_parser = clap::value_parser!(u32).range(1..))]
    height: Option<u32>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = Config::load()?;

    log::info!("Starting fingerpaint on camera {}", cli.camera);
    log::info!("Gestures:");
    log::info!("  - Draw: index finger up");
    log::info!("  - Select: pinch thumb and index, other fingers up");
    log::info!("  - Clear: fist");
    log::info!("  - Undo: index + middle up");
    log::info!("  - Redo: index + middle + ring up");
    log::info!("  - Save: open hand");
    log::info!("  - Next brush: thumb + pinky up");

    backend::run_session(
        config,
        RunOptions {
            camera: cli.camera,
            width: cli.width,
            height: cli.height,
        },
    )?;

    log::info!("Session closed.");
    Ok(())
}
