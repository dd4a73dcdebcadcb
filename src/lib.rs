pub mod camera;
pub mod config;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod input;
pub mod input_log;
pub mod player;
pub mod projection;
pub mod ray;
pub mod raycast;
pub mod render;
pub mod view;

pub use camera::{Camera, ColumnMapping};
pub use config::Config;
pub use error::{Error, Result};
pub use grid::Grid;
pub use input::{Action, InputEvent, InputState, Phase};
pub use player::{Player, Pose, Velocity};
pub use projection::{project, Slice};
pub use ray::{Hit, RaySample};
pub use raycast::{CastStrategy, ExactCaster, FixedStepCaster, RayCaster, TwoStageCaster};
pub use view::View;
