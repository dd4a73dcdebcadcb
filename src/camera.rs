use serde::{Deserialize, Serialize};

/// How screen columns are turned into view-angle offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnMapping {
    /// Project through the focal length: columns are evenly spaced on the screen plane
    #[default]
    Pinhole,
    /// Evenly spaced angles; cheaper to reason about but distorts flat walls
    Linear,
}

/// Camera describing the view frustum for one screen
/// The frustum is fixed after construction
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    /// Horizontal field of view in radians
    pub fov: f32,
    /// Number of screen columns
    pub screen_width: u32,
    /// Distance from the eye to the screen plane, in pixels
    pub focal_length: f32,
    pub mapping: ColumnMapping,
}

impl Camera {
    /// Create a pinhole camera
    pub fn new(fov: f32, screen_width: u32) -> Self {
        Self::with_mapping(fov, screen_width, ColumnMapping::Pinhole)
    }

    pub fn with_mapping(fov: f32, screen_width: u32, mapping: ColumnMapping) -> Self {
        Camera {
            fov,
            screen_width,
            focal_length: focal_length(fov, screen_width),
            mapping,
        }
    }

    /// View-angle offset of a column relative to the heading
    /// Negative to the left of the screen center, zero at `screen_width / 2`
    pub fn angle_offset(&self, column: u32) -> f32 {
        let x = column as f32;
        let width = self.screen_width as f32;
        match self.mapping {
            ColumnMapping::Pinhole => (x - width / 2.0).atan2(self.focal_length),
            ColumnMapping::Linear => (x / width - 0.5) * self.fov,
        }
    }

    /// Absolute ray angle of a column for a given heading
    pub fn ray_angle(&self, heading: f32, column: u32) -> f32 {
        heading + self.angle_offset(column)
    }
}

/// Focal length for a field of view spread across `screen_width` pixels
pub fn focal_length(fov: f32, screen_width: u32) -> f32 {
    (screen_width as f32 / 2.0) / (fov / 2.0).tan()
}
