#![allow(dead_code)]

use gridcaster::{Camera, ExactCaster, FixedStepCaster, Grid, Pose, RayCaster, TwoStageCaster, View};
use macroquad::math::{vec2, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, PI};
use std::fs;
use std::path::Path;

pub const CELL: f32 = 60.0;
pub const MAX_DISTANCE: f32 = 1200.0;
pub const SCAN_STEPS: u32 = 200;
pub const PRIMARY_STEPS: u32 = 300;
pub const SECONDARY_STEPS: u32 = 30;

/// 10x10 room with a wall ring and 60 unit cells
pub fn room() -> Grid {
    Grid::bordered(10, 10, CELL)
}

/// Every strategy with the tolerance it should meet against the true wall distance
pub fn all_casters(max_distance: f32) -> Vec<(Box<dyn RayCaster>, f32)> {
    let fixed_step = max_distance / SCAN_STEPS as f32;
    let fine_step = max_distance / PRIMARY_STEPS as f32 / SECONDARY_STEPS as f32;
    vec![
        (Box::new(ExactCaster::new(max_distance)) as Box<dyn RayCaster>, 1e-2),
        (Box::new(FixedStepCaster::new(SCAN_STEPS, max_distance)), fixed_step + 1e-3),
        (
            Box::new(TwoStageCaster::new(PRIMARY_STEPS, SECONDARY_STEPS, max_distance)),
            fine_step + 1e-3,
        ),
    ]
}

/// Scenario fixture: one pose, one column, one expected distance
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScenarioData {
    #[serde(rename = "testName")]
    pub test_name: String,
    pub map: Vec<String>,
    #[serde(rename = "cellSize")]
    pub cell_size: f32,
    pub x: f32,
    pub y: f32,
    pub heading: f32,
    #[serde(rename = "fovRadians")]
    pub fov_radians: f32,
    #[serde(rename = "screenWidth")]
    pub screen_width: u32,
    pub column: u32,
    #[serde(rename = "maxDistance")]
    pub max_distance: f32,
    /// `null` when the ray must escape the map
    #[serde(rename = "expectedDistance")]
    pub expected_distance: Option<f32>,
    pub tolerance: f32,
}

impl ScenarioData {
    pub fn grid(&self) -> Result<Grid, Box<dyn std::error::Error>> {
        Ok(Grid::parse(&self.map.join("\n"), self.cell_size)?)
    }

    pub fn pose(&self) -> Pose {
        Pose::new(vec2(self.x, self.y), self.heading)
    }

    pub fn camera(&self) -> Camera {
        Camera::new(self.fov_radians, self.screen_width)
    }
}

/// Load a scenario from JSON file
pub fn load_scenario(path: &Path) -> Result<ScenarioData, Box<dyn std::error::Error>> {
    let contents = fs::read_to_string(path)?;
    let data: ScenarioData = serde_json::from_str(&contents)?;
    Ok(data)
}

/// Run one scenario against every strategy
/// Returns the names of strategies that missed, with what they reported
pub fn run_scenario(data: &ScenarioData) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let grid = data.grid()?;
    let pose = data.pose();
    let mut failures = Vec::new();

    for (caster, _) in all_casters(data.max_distance) {
        let name = caster.name();
        let view = View::new(data.camera(), caster);
        let actual = view.cast(&grid, &pose, data.column).distance();

        let passed = match (data.expected_distance, actual) {
            (Some(expected), Some(actual)) => (expected - actual).abs() <= data.tolerance,
            (None, None) => true,
            _ => false,
        };
        if !passed {
            failures.push(format!("{} (got {:?})", name, actual));
        }
    }

    Ok(failures)
}

/// Parsed scene file
pub struct Scene {
    pub grid: Grid,
    pub pose: Pose,
    /// Wall cell the straight-ahead ray must hit, if any
    pub target: Option<(i32, i32)>,
}

/// Parse a scene file
/// Format:
/// - `■`: wall
/// - `□`: open
/// - `x`: wall that the straight-ahead ray must hit
/// - `>` `v` `<` `^`: start cell (open) and heading
pub fn parse_scene(path: &Path, cell_size: f32) -> Result<Scene, Box<dyn std::error::Error>> {
    let contents = fs::read_to_string(path)?;
    let lines: Vec<&str> = contents
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .collect();

    let mut map = String::new();
    let mut start = None;
    let mut target = None;

    for (row, line) in lines.iter().enumerate() {
        for (col, ch) in line.chars().enumerate() {
            let cell = vec2(col as f32 + 0.5, row as f32 + 0.5) * cell_size;
            match ch {
                '>' => start = Some(Pose::new(cell, 0.0)),
                'v' => start = Some(Pose::new(cell, FRAC_PI_2)),
                '<' => start = Some(Pose::new(cell, PI)),
                '^' => start = Some(Pose::new(cell, PI + FRAC_PI_2)),
                'x' => target = Some((col as i32, row as i32)),
                _ => {}
            }
            map.push(match ch {
                '■' | 'x' => '■',
                '□' | '>' | 'v' | '<' | '^' => '□',
                other => other,
            });
        }
        map.push('\n');
    }

    let pose = start.ok_or("No start marker found in scene file")?;
    let grid = Grid::parse(&map, cell_size)?;
    Ok(Scene { grid, pose, target })
}

/// Distance from a point to the closest point of a rectangle (0 inside)
pub fn distance_to_rect(point: Vec2, rect: Rect) -> f32 {
    let dx = (rect.x - point.x).max(0.0).max(point.x - (rect.x + rect.w));
    let dy = (rect.y - point.y).max(0.0).max(point.y - (rect.y + rect.h));
    (dx * dx + dy * dy).sqrt()
}
