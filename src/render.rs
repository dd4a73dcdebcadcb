use crate::config::Config;
use crate::grid::Grid;
use crate::player::Player;
use crate::projection::project;
use crate::ray::RaySample;
use crate::view::View;
use log::debug;
use macroquad::prelude::*;

/// Colors for both halves of the window
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub background: Color,
    pub wall: Color,
    pub sky: Color,
    pub ground: Color,
    pub player: Color,
    pub heading: Color,
}

impl Palette {
    pub fn from_config(config: &Config) -> Self {
        let visual = &config.visual;
        Palette {
            background: rgb(visual.background),
            wall: rgb(visual.wall),
            sky: rgb(visual.sky),
            ground: rgb(visual.ground),
            player: rgb(visual.player),
            heading: rgb(visual.heading),
        }
    }
}

fn rgb([r, g, b]: [u8; 3]) -> Color {
    Color::from_rgba(r, g, b, 255)
}

/// Blend the wall color toward the background as brightness grows
pub fn fog(wall: Color, background: Color, brightness: f32) -> Color {
    let t = brightness.clamp(0.0, 1.0);
    Color::new(
        wall.r + (background.r - wall.r) * t,
        wall.g + (background.g - wall.g) * t,
        wall.b + (background.b - wall.b) * t,
        1.0,
    )
}

/// Everything needed to draw a frame: screen layout, colors and the per-column buffer
///
/// Owned by the main loop and passed into each draw call.
pub struct RenderContext {
    /// Left half: top-down map
    pub map_area: Rect,
    /// Right half: first-person view
    pub view_area: Rect,
    pub palette: Palette,
    samples: Vec<RaySample>,
    parallel: bool,
    fisheye_correction: bool,
    max_distance: f32,
}

impl RenderContext {
    pub fn new(config: &Config) -> Self {
        let half = config.view_width() as f32;
        let height = config.window.height as f32;

        RenderContext {
            map_area: Rect::new(0.0, 0.0, half, height),
            view_area: Rect::new(half, 0.0, half, height),
            palette: Palette::from_config(config),
            samples: Vec::with_capacity(config.view_width() as usize),
            parallel: config.caster.parallel,
            fisheye_correction: config.caster.fisheye_correction,
            max_distance: config.max_scan_distance(),
        }
    }

    /// Samples from the last cast
    pub fn samples(&self) -> &[RaySample] {
        &self.samples
    }

    /// Cast all columns for the player's current pose
    pub fn cast(&mut self, grid: &Grid, player: &Player, view: &View) {
        if self.parallel {
            view.cast_frame_parallel(grid, &player.pose, &mut self.samples);
        } else {
            view.cast_frame(grid, &player.pose, &mut self.samples);
        }
    }

    /// Cast and draw one frame: map, first-person view and the divider between them
    pub fn render_frame(&mut self, grid: &Grid, player: &Player, view: &View) {
        clear_background(self.palette.background);
        self.draw_map(grid, player);
        self.cast(grid, player, view);
        self.draw_first_person(grid, view);
        self.draw_divider();
    }

    /// Scale from world units to map pixels, fitting the whole grid
    fn map_scale(&self, grid: &Grid) -> f32 {
        (self.map_area.w / grid.world_width()).min(self.map_area.h / grid.world_height())
    }

    fn draw_map(&self, grid: &Grid, player: &Player) {
        let scale = self.map_scale(grid);
        let origin = self.map_area.point();

        for (col, row) in grid.wall_cells() {
            let cell = grid.cell_to_world_rect(col, row);
            draw_rectangle(
                origin.x + cell.x * scale,
                origin.y + cell.y * scale,
                cell.w * scale,
                cell.h * scale,
                self.palette.wall,
            );
        }

        let center = origin + player.pose.position * scale;
        let tip = origin + player.heading_marker() * scale;
        draw_circle(center.x, center.y, player.radius * scale, self.palette.player);
        draw_line(center.x, center.y, tip.x, tip.y, 3.0, self.palette.heading);
    }

    fn draw_first_person(&self, grid: &Grid, view: &View) {
        let area = self.view_area;
        let horizon = area.h / 2.0;
        draw_rectangle(area.x, area.y, area.w, horizon, self.palette.sky);
        draw_rectangle(area.x, area.y + horizon, area.w, area.h - horizon, self.palette.ground);

        for sample in &self.samples {
            let distance = if self.fisheye_correction {
                sample.perpendicular_distance()
            } else {
                sample.distance()
            };
            // No hit: leave sky and ground showing
            let Some(distance) = distance else {
                continue;
            };

            match project(distance, view.camera.focal_length, grid.cell_size, self.max_distance) {
                Ok(slice) => {
                    let (top, bottom) = slice.span(area.h);
                    let x = area.x + sample.column as f32 + 0.5;
                    let color = fog(self.palette.wall, self.palette.background, slice.brightness);
                    draw_line(x, area.y + top, x, area.y + bottom, 1.0, color);
                }
                Err(e) => debug!("Skipping column {}: {}", sample.column, e),
            }
        }
    }

    fn draw_divider(&self) {
        let x = self.map_area.w - 1.0;
        draw_line(x, 0.0, x, self.map_area.h, 2.0, BLACK);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fog_endpoints() {
        let wall = Color::new(0.0, 0.0, 0.0, 1.0);
        let background = Color::new(1.0, 1.0, 1.0, 1.0);

        let near = fog(wall, background, 0.1);
        assert!((near.r - 0.1).abs() < 1e-6);

        let far = fog(wall, background, 1.0);
        assert_eq!(far.r, 1.0);
        assert_eq!(far.a, 1.0);
    }

    #[test]
    fn test_layout_splits_window() {
        let ctx = RenderContext::new(&Config::default());
        assert_eq!(ctx.map_area.w, 600.0);
        assert_eq!(ctx.view_area.x, 600.0);
        assert_eq!(ctx.view_area.h, 600.0);
        assert!(ctx.samples().is_empty());
    }
}
