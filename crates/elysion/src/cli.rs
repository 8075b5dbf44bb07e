use clap::Parser;
use std::path::PathBuf;

/// User-specified command line parameters
#[derive(Debug, Parser)]
#[clap(name = "Elysion", about)]
pub struct Args {
    #[clap(long, short = 'f', default_value_t = 120)]
    /// Amount of frames to simulate.
    pub frames: u32,

    #[clap(long, default_value_t = 1.0 / 60.0)]
    /// Simulated frame duration, in seconds.
    pub dt: f32,

    #[clap(long, short = 's', default_value_t = 4)]
    /// Amount of projectiles spawned every frame.
    pub spawn: u32,

    #[clap(long, short = 'c')]
    /// Path to a TOML file with entity manager settings.
    pub config: Option<PathBuf>,

    #[clap(long, short = 'v')]
    /// Enables trace logging of every entity and component event.
    pub verbose: bool,
}
