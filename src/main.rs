//! Embers viewer.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use embers::{CameraOrbit, SceneConfig};

#[derive(Parser, Debug)]
#[command(name = "embers", version, about = "Real-time ember particle emitter")]
struct Cli {
    /// Number of particles in the pool
    #[arg(default_value_t = 1000, value_parser = clap::value_parser!(u32).range(1..))]
    particles: u32,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Particle sprite texture
    #[arg(long, value_name = "PATH")]
    particle_texture: Option<PathBuf>,

    /// Background texture
    #[arg(long, value_name = "PATH")]
    background_texture: Option<PathBuf>,

    /// WGSL file replacing the built-in particle shader
    #[arg(long, value_name = "PATH")]
    particle_shader: Option<PathBuf>,

    /// WGSL file replacing the built-in background shader
    #[arg(long, value_name = "PATH")]
    background_shader: Option<PathBuf>,

    /// Fill the pool as soon as the window opens
    #[arg(long)]
    emit_on_start: bool,

    /// Seed for a reproducible spawn sequence
    #[arg(long)]
    seed: Option<u64>,

    /// Initial camera distance from the emitter
    #[arg(long, value_name = "UNITS")]
    distance: Option<f32>,

    /// Simulated seconds per frame
    #[arg(long, default_value_t = embers::time::FIXED_STEP)]
    step: f32,
}

impl Cli {
    fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    fn into_config(self) -> SceneConfig {
        let mut config = SceneConfig::new()
            .with_particle_count(self.particles as usize)
            .with_time_step(self.step)
            .with_emit_on_start(self.emit_on_start);

        if let Some(path) = self.particle_texture {
            config = config.with_particle_texture(path);
        }
        if let Some(path) = self.background_texture {
            config = config.with_background_texture(path);
        }
        if let Some(path) = self.particle_shader {
            config = config.with_particle_shader(path);
        }
        if let Some(path) = self.background_shader {
            config = config.with_background_shader(path);
        }
        if let Some(radius) = self.distance {
            config = config.with_camera(CameraOrbit {
                radius,
                ..CameraOrbit::default()
            });
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .init();

    match embers::run(cli.into_config()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
