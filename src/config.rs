use crate::camera::{Camera, ColumnMapping};
use crate::error::{Error, Result};
use crate::grid::{Grid, DEFAULT_MAP};
use crate::player::{Player, DEFAULT_FOV, DEFAULT_RADIUS, DEFAULT_SPEED, DEFAULT_TURN_SPEED};
use crate::raycast::{CastStrategy, ExactCaster, FixedStepCaster, RayCaster, TwoStageCaster};
use crate::view::View;
use log::{info, warn};
use macroquad::math::vec2;
use serde::Deserialize;
use std::f32::consts::PI;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_PATH: &str = "config.toml";

/// Where the active configuration came from
#[derive(Debug)]
pub enum ConfigSource {
    File(PathBuf),
    Missing(PathBuf),
    /// The file exists but was rejected; defaults are in use
    Fallback(PathBuf, Error),
}

impl ConfigSource {
    pub fn is_fallback(&self) -> bool {
        matches!(self, ConfigSource::Fallback(..))
    }

    /// Report the load outcome; call after the logger is installed
    pub fn log(&self) {
        match self {
            ConfigSource::File(path) => info!("Loaded configuration from {}", path.display()),
            ConfigSource::Missing(path) => {
                info!("No {} found, using default configuration", path.display())
            }
            ConfigSource::Fallback(path, e) => {
                warn!("Failed to use {}: {}", path.display(), e);
                warn!("Using default configuration");
            }
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default)]
    pub caster: CasterConfig,
    #[serde(default)]
    pub visual: VisualConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct WindowConfig {
    /// Full window width; the map and the first-person view each get half
    #[serde(default = "default_window_width")]
    pub width: u32,
    #[serde(default = "default_window_height")]
    pub height: u32,
    #[serde(default = "default_window_title")]
    pub title: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct MapConfig {
    /// Text map file; the built-in board is used when unset
    #[serde(default)]
    pub path: Option<String>,
    /// World units per cell; derived from the window height when unset
    #[serde(default)]
    pub cell_size: Option<f32>,
}

#[derive(Debug, Deserialize)]
pub struct PlayerConfig {
    /// Start position in world units; the map center when unset
    #[serde(default)]
    pub x: Option<f32>,
    #[serde(default)]
    pub y: Option<f32>,
    #[serde(default)]
    pub heading: f32,
    #[serde(default = "default_fov")]
    pub fov_radians: f32,
    #[serde(default = "default_speed")]
    pub speed: f32,
    #[serde(default = "default_turn_speed")]
    pub turn_speed: f32,
    #[serde(default = "default_radius")]
    pub radius: f32,
}

#[derive(Debug, Deserialize)]
pub struct CasterConfig {
    #[serde(default)]
    pub strategy: CastStrategy,
    /// Steps for the fixed-step scan
    #[serde(default = "default_scan_steps")]
    pub scan_steps: u32,
    /// Coarse steps for the two-stage scan
    #[serde(default = "default_primary_scan_steps")]
    pub primary_scan_steps: u32,
    /// Backward refinement steps for the two-stage scan
    #[serde(default = "default_secondary_scan_steps")]
    pub secondary_scan_steps: u32,
    /// Ray range; the window width when unset
    #[serde(default)]
    pub max_scan_distance: Option<f32>,
    #[serde(default)]
    pub column_mapping: ColumnMapping,
    #[serde(default = "default_fisheye_correction")]
    pub fisheye_correction: bool,
    #[serde(default)]
    pub parallel: bool,
}

#[derive(Debug, Deserialize)]
pub struct VisualConfig {
    #[serde(default = "default_background")]
    pub background: [u8; 3],
    #[serde(default = "default_wall")]
    pub wall: [u8; 3],
    #[serde(default = "default_sky")]
    pub sky: [u8; 3],
    #[serde(default = "default_ground")]
    pub ground: [u8; 3],
    #[serde(default = "default_player_color")]
    pub player: [u8; 3],
    #[serde(default = "default_heading_color")]
    pub heading: [u8; 3],
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// env_logger filter; RUST_LOG takes precedence
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub enable_input_log: bool,
    #[serde(default = "default_input_log_path")]
    pub input_log_path: String,
}

// Default values
fn default_window_width() -> u32 { 1200 }
fn default_window_height() -> u32 { 600 }
fn default_window_title() -> String { "Gridcaster".to_string() }
fn default_fov() -> f32 { DEFAULT_FOV }
fn default_speed() -> f32 { DEFAULT_SPEED }
fn default_turn_speed() -> f32 { DEFAULT_TURN_SPEED }
fn default_radius() -> f32 { DEFAULT_RADIUS }
fn default_scan_steps() -> u32 { 200 }
fn default_primary_scan_steps() -> u32 { 300 }
fn default_secondary_scan_steps() -> u32 { 30 }
fn default_fisheye_correction() -> bool { true }
fn default_background() -> [u8; 3] { [255, 255, 255] }
fn default_wall() -> [u8; 3] { [0, 0, 0] }
fn default_sky() -> [u8; 3] { [135, 206, 250] }
fn default_ground() -> [u8; 3] { [87, 59, 12] }
fn default_player_color() -> [u8; 3] { [0, 255, 0] }
fn default_heading_color() -> [u8; 3] { [255, 0, 0] }
fn default_log_level() -> String { "info".to_string() }
fn default_input_log_path() -> String { "input_log.json".to_string() }

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_window_width(),
            height: default_window_height(),
            title: default_window_title(),
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            x: None,
            y: None,
            heading: 0.0,
            fov_radians: default_fov(),
            speed: default_speed(),
            turn_speed: default_turn_speed(),
            radius: default_radius(),
        }
    }
}

impl Default for CasterConfig {
    fn default() -> Self {
        Self {
            strategy: CastStrategy::default(),
            scan_steps: default_scan_steps(),
            primary_scan_steps: default_primary_scan_steps(),
            secondary_scan_steps: default_secondary_scan_steps(),
            max_scan_distance: None,
            column_mapping: ColumnMapping::default(),
            fisheye_correction: default_fisheye_correction(),
            parallel: false,
        }
    }
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            background: default_background(),
            wall: default_wall(),
            sky: default_sky(),
            ground: default_ground(),
            player: default_player_color(),
            heading: default_heading_color(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            enable_input_log: false,
            input_log_path: default_input_log_path(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            map: MapConfig::default(),
            player: PlayerConfig::default(),
            caster: CasterConfig::default(),
            visual: VisualConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl LoggingConfig {
    /// Install env_logger with the configured level unless RUST_LOG is set
    pub fn init(&self) {
        let env = env_logger::Env::default().default_filter_or(self.level.as_str());
        // A second init (tests, repeated runs) is harmless
        let _ = env_logger::Builder::from_env(env).try_init();
    }
}

impl CasterConfig {
    /// Build the configured caster
    pub fn build(&self, max_distance: f32) -> Box<dyn RayCaster> {
        match self.strategy {
            CastStrategy::Exact => Box::new(ExactCaster::new(max_distance)),
            CastStrategy::FixedStep => Box::new(FixedStepCaster::new(self.scan_steps, max_distance)),
            CastStrategy::TwoStage => Box::new(TwoStageCaster::new(
                self.primary_scan_steps,
                self.secondary_scan_steps,
                max_distance,
            )),
        }
    }
}

impl Config {
    /// Load configuration from config.toml, or use defaults if it is missing or invalid
    pub fn load() -> (Self, ConfigSource) {
        Self::load_or_default(CONFIG_PATH)
    }

    /// Load configuration from a file, falling back to defaults
    ///
    /// Runs before the logger exists, so the outcome is returned for the caller to
    /// log once `LoggingConfig::init` has run.
    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, ConfigSource) {
        let path = path.as_ref().to_path_buf();
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(_) => return (Config::default(), ConfigSource::Missing(path)),
        };

        match Self::from_toml_str(&contents) {
            Ok(config) => (config, ConfigSource::File(path)),
            Err(e) => (Config::default(), ConfigSource::Fallback(path, e)),
        }
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the caster and projection cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.window.width < 2 || self.window.height == 0 {
            return Err(Error::Config(format!(
                "window must be at least 2x1, got {}x{}",
                self.window.width, self.window.height
            )));
        }
        if !(self.player.fov_radians > 0.0 && self.player.fov_radians < PI) {
            return Err(Error::Config(format!(
                "fov_radians must be in (0, pi), got {}",
                self.player.fov_radians
            )));
        }
        if self.caster.scan_steps == 0
            || self.caster.primary_scan_steps == 0
            || self.caster.secondary_scan_steps == 0
        {
            return Err(Error::Config("scan step counts must be positive".to_string()));
        }
        if let Some(distance) = self.caster.max_scan_distance {
            if !(distance > 0.0 && distance.is_finite()) {
                return Err(Error::Config(format!(
                    "max_scan_distance must be positive and finite, got {}",
                    distance
                )));
            }
        }
        if let Some(size) = self.map.cell_size {
            if !(size > 0.0 && size.is_finite()) {
                return Err(Error::Config(format!(
                    "cell_size must be positive and finite, got {}",
                    size
                )));
            }
        }
        Ok(())
    }

    /// Columns in the first-person view (right half of the window)
    pub fn view_width(&self) -> u32 {
        self.window.width / 2
    }

    pub fn max_scan_distance(&self) -> f32 {
        self.caster
            .max_scan_distance
            .unwrap_or(self.window.width as f32)
    }

    /// Load the configured map, sizing cells to fit the window height unless overridden
    pub fn load_grid(&self) -> Result<Grid> {
        let text = match &self.map.path {
            Some(path) => fs::read_to_string(path)?,
            None => DEFAULT_MAP.to_string(),
        };

        self.grid_from_text(&text)
    }

    /// Parse a text map and size its cells
    pub fn grid_from_text(&self, text: &str) -> Result<Grid> {
        let mut grid = Grid::parse(text, 1.0)?;
        grid.cell_size = self
            .map
            .cell_size
            .unwrap_or_else(|| self.window.height as f32 / grid.rows.max(grid.cols) as f32);

        if !(grid.cell_size > 0.0 && grid.cell_size.is_finite()) {
            return Err(Error::Config(format!(
                "cell size {} for a {}x{} map is not positive",
                grid.cell_size, grid.cols, grid.rows
            )));
        }

        info!(
            "Map {}x{} cells, cell size {}, {} walls",
            grid.cols,
            grid.rows,
            grid.cell_size,
            grid.wall_count()
        );
        Ok(grid)
    }

    /// Player at the configured start, or the map center
    pub fn spawn_player(&self, grid: &Grid) -> Player {
        let center = grid.center();
        let position = vec2(
            self.player.x.unwrap_or(center.x),
            self.player.y.unwrap_or(center.y),
        );

        let mut player = Player::new(position, self.player.heading);
        player.fov = self.player.fov_radians;
        player.speed = self.player.speed;
        player.turn_speed = self.player.turn_speed;
        player.radius = self.player.radius;
        player
    }

    /// First-person view for the configured camera and caster
    pub fn build_view(&self) -> View {
        let camera = Camera::with_mapping(
            self.player.fov_radians,
            self.view_width(),
            self.caster.column_mapping,
        );
        View::new(camera, self.caster.build(self.max_scan_distance()))
    }
}
