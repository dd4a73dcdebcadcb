use macroquad::math::{vec2, Vec2};

/// Minimum accepted hit distance; anything closer is treated as the ray's own origin
pub const HIT_EPSILON: f32 = 1e-4;

/// Unit direction vector for an angle in radians
pub fn direction(angle: f32) -> Vec2 {
    vec2(angle.cos(), angle.sin())
}

/// Where a ray met a wall
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Euclidean distance from the ray origin
    pub distance: f32,
    /// World position of the hit
    pub point: Vec2,
}

impl Hit {
    pub fn new(origin: Vec2, point: Vec2) -> Self {
        Hit {
            distance: origin.distance(point),
            point,
        }
    }
}

/// Cast result for one screen column
/// `hit` is `None` when the ray escaped the map or found no wall in range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaySample {
    pub column: u32,
    /// View-angle offset of the column relative to the heading
    pub angle_offset: f32,
    pub hit: Option<Hit>,
}

impl RaySample {
    pub fn new(column: u32, angle_offset: f32, hit: Option<Hit>) -> Self {
        RaySample {
            column,
            angle_offset,
            hit,
        }
    }

    /// Sample that has not been cast yet
    pub fn empty(column: u32) -> Self {
        Self::new(column, 0.0, None)
    }

    pub fn distance(&self) -> Option<f32> {
        self.hit.map(|hit| hit.distance)
    }

    pub fn hit_point(&self) -> Option<Vec2> {
        self.hit.map(|hit| hit.point)
    }

    /// Distance measured along the view axis instead of along the ray
    /// Using this for projection removes the fisheye bulge on flat walls
    pub fn perpendicular_distance(&self) -> Option<f32> {
        self.distance().map(|d| d * self.angle_offset.cos())
    }
}
