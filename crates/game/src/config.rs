//! Launch configuration (window, graphics, paths). Loaded from config.ron at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use winit::dpi::LogicalSize;

/// Launch settings. Loaded from `config.ron` in the current directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Window width in logical pixels (scaled by the monitor's DPI factor).
    #[serde(default = "default_window_width")]
    pub window_width: u32,
    /// Window height in logical pixels.
    #[serde(default = "default_window_height")]
    pub window_height: u32,
    /// Enable vsync (recommended to avoid tearing).
    #[serde(default = "default_true")]
    pub vsync: bool,
    /// Flat text record holding tunables and the high score.
    #[serde(default = "default_state_path")]
    pub state_path: PathBuf,
    /// Root of textures and the skybox directory.
    #[serde(default = "default_asset_dir")]
    pub asset_dir: PathBuf,
    /// Separable blur passes per frame.
    #[serde(default = "default_blur_iterations")]
    pub blur_iterations: u32,
    /// Fixed seed for lane placement. `None` seeds from entropy.
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

fn default_window_width() -> u32 {
    800
}
fn default_window_height() -> u32 {
    600
}
fn default_true() -> bool {
    true
}
fn default_state_path() -> PathBuf {
    PathBuf::from("resources/program_state.txt")
}
fn default_asset_dir() -> PathBuf {
    PathBuf::from("resources")
}
fn default_blur_iterations() -> u32 {
    renderer::DEFAULT_BLUR_ITERATIONS
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_width: default_window_width(),
            window_height: default_window_height(),
            vsync: default_true(),
            state_path: default_state_path(),
            asset_dir: default_asset_dir(),
            blur_iterations: default_blur_iterations(),
            rng_seed: None,
        }
    }
}

impl GameConfig {
    /// Load config from `config.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(data) => match ron::from_str(&data) {
                Ok(c) => c,
                Err(e) => {
                    log::warn!("Invalid config at {:?}: {}, using defaults", path, e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("No config at {:?}, using defaults", path);
                Self::default()
            }
        }
    }

    /// Requested inner size of the window. Logical, so a 2x display opens at twice the pixels.
    pub fn window_size(&self) -> LogicalSize<u32> {
        LogicalSize::new(self.window_width, self.window_height)
    }

    /// Directory holding the six skybox faces.
    pub fn skybox_dir(&self) -> PathBuf {
        self.asset_dir.join("textures").join("skybox")
    }

    pub fn texture_path(&self, name: &str) -> PathBuf {
        self.asset_dir.join("textures").join(name)
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join("config.ron")
}
