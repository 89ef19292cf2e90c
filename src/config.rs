//! Configuration loading and saving
//!
//! Uses RON (Rusty Object Notation) for human-readable config files. Every
//! field has a default, so a config file only needs the values it changes.

use std::fs;
use std::path::Path;
use std::time::Duration;
use serde::{Deserialize, Serialize};
use crate::rasterizer::{BgColor, FgColor, PaintSpec, Renderer, Vec3};

/// Error type for config loading
#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    SerializeError(ron::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::ParseError(e)
    }
}

impl From<ron::Error> for ConfigError {
    fn from(e: ron::Error) -> Self {
        ConfigError::SerializeError(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
            ConfigError::SerializeError(e) => write!(f, "Serialize error: {}", e),
            ConfigError::Invalid(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// How the camera is driven between frames
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CameraMode {
    /// Circle the mesh automatically
    #[default]
    Orbit,
    /// Keyboard controls
    Manual,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    /// Radians per frame
    pub omega: f64,
    pub radius: f64,
    pub center_x: f64,
    pub center_y: f64,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            omega: 0.02,
            radius: 30.0,
            center_x: 0.0,
            center_y: 60.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    pub move_step: f64,
    pub turn_step: f64,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            move_step: 0.2,
            turn_step: 0.02,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TetrahedronConfig {
    pub size: f64,
    pub base: Vec3,
    pub outline: PaintSpec,
    pub fill: PaintSpec,
}

impl Default for TetrahedronConfig {
    fn default() -> Self {
        Self {
            size: 20.0,
            base: Vec3::new(0.0, 60.0, -8.0),
            outline: PaintSpec::new('-', FgColor::Red, BgColor::None),
            fill: PaintSpec::new('*', FgColor::None, BgColor::White),
        }
    }
}

/// Top-level settings for the demo binary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub rows: usize,
    pub cols: usize,
    pub camera_depth: f64,
    pub max_scenes: usize,
    /// Frames per second
    pub frame_rate: f64,
    /// Stop after this many frames (None = run until quit)
    pub frame_limit: Option<u64>,
    pub mode: CameraMode,
    pub orbit: OrbitConfig,
    pub controls: ControlsConfig,
    pub tetrahedron: TetrahedronConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            rows: 24,
            cols: 56,
            camera_depth: 3.0,
            max_scenes: 100,
            frame_rate: 10.0,
            frame_limit: None,
            mode: CameraMode::Orbit,
            orbit: OrbitConfig::default(),
            controls: ControlsConfig::default(),
            tetrahedron: TetrahedronConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::Invalid(format!(
                "screen must be at least 1x1, got {}x{}",
                self.cols, self.rows
            )));
        }
        if !(self.camera_depth.is_finite() && self.camera_depth > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "camera_depth must be positive, got {}",
                self.camera_depth
            )));
        }
        self.frame_period()?;
        Ok(())
    }

    /// Time budget of one frame
    pub fn frame_period(&self) -> Result<Duration, ConfigError> {
        if !(self.frame_rate.is_finite() && self.frame_rate > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "frame_rate must be positive, got {}",
                self.frame_rate
            )));
        }
        Duration::try_from_secs_f64(1.0 / self.frame_rate).map_err(|_| {
            ConfigError::Invalid(format!("frame_rate {} is too low", self.frame_rate))
        })
    }

    /// Whether another frame may be drawn after `drawn` frames
    pub fn wants_frame(&self, drawn: u64) -> bool {
        self.frame_limit.map_or(true, |limit| drawn < limit)
    }

    pub fn renderer(&self) -> Renderer {
        Renderer::new(self.rows, self.cols, self.camera_depth, self.max_scenes)
    }
}

/// Load a config from a RON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    load_config_from_str(&contents)
}

/// Load a config from a RON string
pub fn load_config_from_str(s: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = ron::from_str(s)?;
    config.validate()?;
    Ok(config)
}

/// Save a config to a RON file
pub fn save_config<P: AsRef<Path>>(config: &AppConfig, path: P) -> Result<(), ConfigError> {
    let pretty = ron::ser::PrettyConfig::new()
        .depth_limit(3)
        .indentor("  ".to_string());

    let contents = ron::ser::to_string_pretty(config, pretty)?;
    fs::write(path, contents)?;
    Ok(())
}
