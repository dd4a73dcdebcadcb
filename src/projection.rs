use crate::error::{Error, Result};

/// Brightness floor so near walls never render fully black
pub const MIN_BRIGHTNESS: f32 = 0.1;

/// On-screen wall slice for one column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slice {
    /// Height in pixels
    pub height: f32,
    /// Fog factor in `[MIN_BRIGHTNESS, 1.0]`, growing with distance
    pub brightness: f32,
}

impl Slice {
    /// Top and bottom pixel rows of the slice, centered and clipped to the view
    pub fn span(&self, view_height: f32) -> (f32, f32) {
        let middle = view_height / 2.0;
        let half = self.height / 2.0;
        ((middle - half).max(0.0), (middle + half).min(view_height))
    }
}

/// Convert a hit distance into a perspective-correct slice height and fog brightness
///
/// `height * distance == cell_size * focal_length` for every positive distance.
/// A zero, negative or non-finite distance means the ray started on a wall and is rejected.
pub fn project(distance: f32, focal_length: f32, cell_size: f32, max_distance: f32) -> Result<Slice> {
    if !distance.is_finite() || distance <= 0.0 {
        return Err(Error::NonPositiveDistance(distance));
    }

    Ok(Slice {
        height: cell_size * focal_length / distance,
        brightness: brightness(distance, max_distance),
    })
}

/// Linear distance fog clamped to `[MIN_BRIGHTNESS, 1.0]`
pub fn brightness(distance: f32, max_distance: f32) -> f32 {
    (distance / max_distance).clamp(MIN_BRIGHTNESS, 1.0)
}
