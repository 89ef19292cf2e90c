//! Tetraspin: a spinning tetrahedron in the terminal
//!
//! Controls (manual mode):
//! - Move left/right: A/D
//! - Move up/down: W/S
//! - Move forward/back: Q/Z
//! - Turn left/right: E/R
//! - Tilt up/down: F/V
//! - Quit: X (any mode)

use std::error::Error;
use std::io::{self, BufWriter};
use std::thread;
use std::time::Instant;

use log::{error, info, warn};
use tetraspin::config::{load_config, AppConfig, CameraMode};
use tetraspin::display::write_frame;
use tetraspin::input::{apply_keys, RawTerminal};
use tetraspin::rasterizer::Orbit;
use tetraspin::world::tetrahedron;

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() {
    // Logs go to stderr, frames to stdout
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run() {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => {
            info!("Loading config from {}", path);
            load_config(&path)?
        }
        None => AppConfig::default(),
    };
    info!("Tetraspin v{} ({}x{})", VERSION, config.cols, config.rows);

    let mut renderer = config.renderer();
    let tetra = &config.tetrahedron;
    if let Err(e) = renderer.add_scene(tetrahedron(tetra.size, tetra.base, tetra.outline, tetra.fill)) {
        warn!("Tetrahedron not added: {}", e);
    }

    let terminal = RawTerminal::enable()?;
    let mut orbit = Orbit::new(
        config.orbit.omega,
        config.orbit.radius,
        config.orbit.center_x,
        config.orbit.center_y,
    );
    let frame_time = config.frame_period()?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut frames = 0u64;

    while config.wants_frame(frames) {
        let start = Instant::now();

        let keys = terminal.poll_keys()?;
        let running = match config.mode {
            CameraMode::Manual => apply_keys(&keys, &config.controls, renderer.camera_mut()),
            CameraMode::Orbit => {
                orbit.step(renderer.camera_mut());
                !keys.contains(&b'x')
            }
        };
        if !running {
            info!("Quit after {} frames", frames);
            break;
        }

        write_frame(renderer.render(), &mut out)?;
        frames += 1;

        // Limit framerate
        if let Some(rest) = frame_time.checked_sub(start.elapsed()) {
            thread::sleep(rest);
        }
    }

    Ok(())
}
