use crate::geometry::{intersection_point, Segment};
use crate::grid::Grid;
use crate::ray::{direction, Hit, HIT_EPSILON};
use macroquad::math::Vec2;
use serde::{Deserialize, Serialize};

/// Strategy used to find where a ray meets the first wall
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CastStrategy {
    /// Segment intersection against every wall edge
    Exact,
    /// Uniform march in a fixed number of steps
    FixedStep,
    /// Coarse march followed by a fine backward refinement
    #[default]
    TwoStage,
}

/// Finds the first wall along a ray
///
/// Implementations are pure functions of their inputs, so one caster can serve every
/// column of a frame from several threads at once.
pub trait RayCaster: Send + Sync {
    /// Trace a ray from `origin` at `angle` (radians)
    /// Returns `None` when no wall is hit within range or the ray leaves the grid
    fn trace(&self, grid: &Grid, origin: Vec2, angle: f32) -> Option<Hit>;

    /// Short name used in logs
    fn name(&self) -> &'static str;
}

/// Exact caster: intersects a long finite ray with all four edges of every wall cell
/// and keeps the closest intersection
#[derive(Debug, Clone, Copy)]
pub struct ExactCaster {
    /// Length of the sight segment
    pub ray_length: f32,
}

impl ExactCaster {
    pub fn new(ray_length: f32) -> Self {
        ExactCaster { ray_length }
    }
}

impl RayCaster for ExactCaster {
    fn trace(&self, grid: &Grid, origin: Vec2, angle: f32) -> Option<Hit> {
        let sight = Segment::new(origin, origin + direction(angle) * self.ray_length);

        // Hits closer than HIT_EPSILON are the ray touching its own origin
        grid.wall_cells()
            .flat_map(|(col, row)| grid.cell_edges(col, row))
            .filter_map(|edge| intersection_point(&sight, &edge))
            .map(|point| Hit::new(origin, point))
            .filter(|hit| hit.distance > HIT_EPSILON)
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }

    fn name(&self) -> &'static str {
        "exact"
    }
}

/// Fixed-step caster: marches toward the horizon in `steps` equal increments and stops
/// at the first wall cell
#[derive(Debug, Clone, Copy)]
pub struct FixedStepCaster {
    pub steps: u32,
    /// Distance from the origin to the horizon point
    pub max_distance: f32,
}

impl FixedStepCaster {
    pub fn new(steps: u32, max_distance: f32) -> Self {
        FixedStepCaster {
            steps,
            max_distance,
        }
    }
}

impl RayCaster for FixedStepCaster {
    fn trace(&self, grid: &Grid, origin: Vec2, angle: f32) -> Option<Hit> {
        let step = march_step(angle, self.max_distance, self.steps)?;
        march(grid, origin, step, self.steps).map(|point| Hit::new(origin, point))
    }

    fn name(&self) -> &'static str {
        "fixed_step"
    }
}

/// Two-stage caster: coarse march to the first wall cell, then walk back toward the
/// origin in `secondary_steps` sub-steps until open space is found again
///
/// Costs `primary_steps + secondary_steps` grid lookups for roughly the accuracy of
/// `primary_steps * secondary_steps`.
#[derive(Debug, Clone, Copy)]
pub struct TwoStageCaster {
    pub primary_steps: u32,
    pub secondary_steps: u32,
    pub max_distance: f32,
}

impl TwoStageCaster {
    pub fn new(primary_steps: u32, secondary_steps: u32, max_distance: f32) -> Self {
        TwoStageCaster {
            primary_steps,
            secondary_steps,
            max_distance,
        }
    }

    /// Resolution of the coarse march
    pub fn primary_step_length(&self) -> f32 {
        self.max_distance / self.primary_steps as f32
    }
}

impl RayCaster for TwoStageCaster {
    fn trace(&self, grid: &Grid, origin: Vec2, angle: f32) -> Option<Hit> {
        let step = march_step(angle, self.max_distance, self.primary_steps)?;
        let coarse = march(grid, origin, step, self.primary_steps)?;

        if self.secondary_steps == 0 {
            return Some(Hit::new(origin, coarse));
        }

        let back = -step / self.secondary_steps as f32;
        let mut inside = coarse;

        for i in 1..=self.secondary_steps {
            let point = coarse + back * i as f32;
            let (col, row) = grid.world_to_cell(point);

            // Leaving the grid while walking back counts as open space
            if !grid.contains(col, row) || !grid.is_wall(col, row) {
                let hit = Hit::new(origin, point);
                if hit.distance > HIT_EPSILON {
                    return Some(hit);
                }
                // Walked back onto the origin; report the wall side of the boundary
                return Some(Hit::new(origin, inside));
            }

            inside = point;
        }

        // Only reachable when the origin itself is inside a wall
        Some(Hit::new(origin, coarse))
    }

    fn name(&self) -> &'static str {
        "two_stage"
    }
}

/// Per-step displacement for a march of `steps` over `max_distance`
fn march_step(angle: f32, max_distance: f32, steps: u32) -> Option<Vec2> {
    if steps == 0 {
        return None;
    }
    Some(direction(angle) * (max_distance / steps as f32))
}

/// Walk `steps` increments from the origin
/// Returns the first sample inside a wall, or `None` once a sample leaves the grid
fn march(grid: &Grid, origin: Vec2, step: Vec2, steps: u32) -> Option<Vec2> {
    for i in 1..=steps {
        // Multiply instead of accumulating to keep rounding error flat
        let point = origin + step * i as f32;
        let (col, row) = grid.world_to_cell(point);

        if !grid.contains(col, row) {
            return None;
        }
        if grid.is_wall(col, row) {
            return Some(point);
        }
    }

    None
}
