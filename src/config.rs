use crate::orbit::OrbitExaggeration;
use clap::Parser;
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(Parser, Debug)]
#[command(name = "skymap")]
#[command(about = "Terminal planetarium: stars, constellations and a toy solar system")]
pub(crate) struct Cli {
    /// Settings file (default: settings.json in the platform config dir)
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,

    /// Frame rate cap
    #[arg(long)]
    pub(crate) fps: Option<u32>,

    /// Seed for the background star field
    #[arg(long)]
    pub(crate) seed: Option<u64>,

    /// Use UTC instead of local time as the sky's time base
    #[arg(long, default_value_t = false)]
    pub(crate) utc: bool,

    /// Start with the grid hidden
    #[arg(long, default_value_t = false)]
    pub(crate) no_grid: bool,

    /// Start with planets hidden
    #[arg(long, default_value_t = false)]
    pub(crate) no_planets: bool,

    /// Start with constellations hidden
    #[arg(long, default_value_t = false)]
    pub(crate) no_constellations: bool,

    /// Write diagnostics to this file
    #[arg(long)]
    pub(crate) log_file: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub(crate) fps_cap: u32,
    pub(crate) seed: u64,
    pub(crate) background_stars: usize,
    pub(crate) grid_spacing: f64,
    pub(crate) use_utc: bool,
    pub(crate) show_grid: bool,
    pub(crate) show_planets: bool,
    pub(crate) show_constellations: bool,
    pub(crate) orbit_exaggeration: OrbitExaggeration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fps_cap: 30,
            seed: 0x5A17_5A17_u64,
            background_stars: 200,
            grid_spacing: 24.0,
            use_utc: false,
            show_grid: true,
            show_planets: true,
            show_constellations: true,
            orbit_exaggeration: OrbitExaggeration::default(),
        }
    }
}

impl Settings {
    pub(crate) fn apply_cli(&mut self, cli: &Cli) {
        if let Some(fps) = cli.fps {
            self.fps_cap = fps;
        }
        if let Some(seed) = cli.seed {
            self.seed = seed;
        }
        self.use_utc |= cli.utc;
        self.show_grid &= !cli.no_grid;
        self.show_planets &= !cli.no_planets;
        self.show_constellations &= !cli.no_constellations;
    }

    pub(crate) fn fps(&self) -> u32 {
        self.fps_cap.clamp(10, 240)
    }
}

pub(crate) fn default_settings_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "skymap", "Skymap").map(|p| p.config_dir().join("settings.json"))
}

/// Settings from `path`, or defaults when the file is missing or unreadable.
pub(crate) fn load_settings(path: &Path) -> Settings {
    let Ok(s) = fs::read_to_string(path) else {
        tracing::debug!(path = %path.display(), "no settings file, using defaults");
        return Settings::default();
    };
    match serde_json::from_str::<Settings>(&s) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring malformed settings");
            Settings::default()
        }
    }
}

/// File settings overlaid with command-line flags.
pub(crate) fn resolve_settings(cli: &Cli) -> Settings {
    let path = cli.config.clone().or_else(default_settings_path);
    let mut settings = path.as_deref().map(load_settings).unwrap_or_default();
    settings.apply_cli(cli);
    settings
}
