use crate::camera::Camera;
use crate::grid::Grid;
use crate::player::Pose;
use crate::ray::RaySample;
use crate::raycast::RayCaster;
use rayon::prelude::*;

/// First-person view: a camera plus the caster used for every column of a frame
pub struct View {
    pub camera: Camera,
    caster: Box<dyn RayCaster>,
}

impl View {
    pub fn new(camera: Camera, caster: Box<dyn RayCaster>) -> Self {
        View { camera, caster }
    }

    pub fn caster_name(&self) -> &'static str {
        self.caster.name()
    }

    pub fn columns(&self) -> u32 {
        self.camera.screen_width
    }

    /// Cast the ray for one screen column
    pub fn cast(&self, grid: &Grid, pose: &Pose, column: u32) -> RaySample {
        let angle_offset = self.camera.angle_offset(column);
        let hit = self
            .caster
            .trace(grid, pose.position, pose.heading + angle_offset);
        RaySample::new(column, angle_offset, hit)
    }

    /// Cast every column into `samples`, reusing its allocation
    pub fn cast_frame(&self, grid: &Grid, pose: &Pose, samples: &mut Vec<RaySample>) {
        self.prepare(samples);
        for (column, slot) in samples.iter_mut().enumerate() {
            *slot = self.cast(grid, pose, column as u32);
        }
    }

    /// Same as `cast_frame`, spreading columns over the rayon pool
    ///
    /// Grid and pose are only borrowed, each column writes its own slot, and the call
    /// returns once every column is done.
    pub fn cast_frame_parallel(&self, grid: &Grid, pose: &Pose, samples: &mut Vec<RaySample>) {
        self.prepare(samples);
        samples
            .par_iter_mut()
            .enumerate()
            .for_each(|(column, slot)| *slot = self.cast(grid, pose, column as u32));
    }

    fn prepare(&self, samples: &mut Vec<RaySample>) {
        let columns = self.columns() as usize;
        samples.clear();
        samples.extend((0..columns).map(|column| RaySample::empty(column as u32)));
    }
}
