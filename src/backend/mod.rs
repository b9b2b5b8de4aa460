use anyhow::{Context, Result};
use log::{info, warn};
use signal_hook::consts::signal::{SIGINT, SIGTERM};
use signal_hook::iterator::Signals;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use crate::app::App;
use crate::config::Config;
use crate::input::LandmarkSource;

pub mod feed;

pub use feed::FeedSource;

/// Startup parameters from the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Camera index the detector was started with
    pub camera: u32,
    /// Canvas width override
    pub width: Option<u32>,
    /// Canvas height override
    pub height: Option<u32>,
}

/// Run the interactive session on the stdin detector feed until quit.
///
/// # Errors
/// Returns an error if signal handlers cannot be installed or the input
/// device fails; save errors are logged and the session continues.
pub fn run_session(mut config: Config, options: RunOptions) -> Result<()> {
    if let Some(width) = options.width {
        config.canvas.width = width;
    }
    if let Some(height) = options.height {
        config.canvas.height = height;
    }
    config.validate_and_clamp();

    let quit_flag = Arc::new(AtomicBool::new(false));
    let mut signals =
        Signals::new([SIGTERM, SIGINT]).context("Failed to register signal handler")?;
    let signal_quit = quit_flag.clone();
    // Lives until process exit; the iterator has no clean shutdown.
    thread::spawn(move || {
        for sig in signals.forever() {
            match sig {
                SIGTERM | SIGINT => {
                    info!(
                        "Received {} - finishing the current stroke and exiting",
                        if sig == SIGTERM { "SIGTERM" } else { "SIGINT" }
                    );
                    signal_quit.store(true, Ordering::Release);
                }
                _ => {
                    warn!("Received unexpected signal: {}", sig);
                }
            }
        }
    });

    let mut app = App::new(&config);
    let mut feed = FeedSource::spawn(io::BufReader::new(io::stdin()), options.camera, quit_flag);
    info!("Session started; send 'q' or Ctrl+C to quit");

    let result: Result<()> = loop {
        match feed.detect() {
            Ok(Some(detection)) => {
                app.tick(&detection, &mut feed);
            }
            Ok(None) => break Ok(()),
            Err(err) => {
                log::error!("{}", err);
                break Err(err).context("Input device failure, ending session");
            }
        }
    };

    app.shutdown();
    if feed.malformed_lines() > 0 {
        warn!(
            "{} of {} feed lines were malformed",
            feed.malformed_lines(),
            feed.frames()
        );
    }
    result
}
