use crate::input::{InputEvent, InputState};
use crate::ray::direction;
use macroquad::math::Vec2;
use std::f32::consts::TAU;

pub const DEFAULT_FOV: f32 = TAU * 0.3;
pub const DEFAULT_SPEED: f32 = 1.0;
pub const DEFAULT_TURN_SPEED: f32 = 0.1;
pub const DEFAULT_RADIUS: f32 = 20.0;

/// Player position and heading
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// World units
    pub position: Vec2,
    /// Radians, 0 points along +x, positive turns toward +y
    pub heading: f32,
}

impl Pose {
    pub fn new(position: Vec2, heading: f32) -> Self {
        Pose { position, heading }
    }

    /// Unit vector along the heading
    pub fn direction(&self) -> Vec2 {
        direction(self.heading)
    }
}

/// Per-tick motion derived from the held keys
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Velocity {
    /// World units per tick
    pub linear: Vec2,
    /// Radians per tick
    pub angular: f32,
}

impl Velocity {
    pub fn is_zero(&self) -> bool {
        self.linear == Vec2::ZERO && self.angular == 0.0
    }
}

/// The viewer: pose plus movement tuning and held keys
#[derive(Debug, Clone)]
pub struct Player {
    pub pose: Pose,
    /// Horizontal field of view in radians
    pub fov: f32,
    /// World units per tick
    pub speed: f32,
    /// Radians per tick
    pub turn_speed: f32,
    /// Marker radius on the map view
    pub radius: f32,
    pub input: InputState,
}

impl Player {
    /// Create a player with default tuning
    pub fn new(position: Vec2, heading: f32) -> Self {
        Player {
            pose: Pose::new(position, heading),
            fov: DEFAULT_FOV,
            speed: DEFAULT_SPEED,
            turn_speed: DEFAULT_TURN_SPEED,
            radius: DEFAULT_RADIUS,
            input: InputState::new(),
        }
    }

    /// Feed a key event into the held-key state
    pub fn handle(&mut self, event: InputEvent) -> bool {
        self.input.apply(event)
    }

    /// Velocity for the current keys and heading
    pub fn velocity(&self) -> Velocity {
        Velocity {
            linear: self.pose.direction() * (self.speed * self.input.linear_sign()),
            angular: self.turn_speed * self.input.turn_sign(),
        }
    }

    /// Advance one tick with explicit Euler integration
    /// Returns true if the pose changed
    pub fn tick(&mut self) -> bool {
        let velocity = self.velocity();
        if velocity.is_zero() {
            return false;
        }

        self.pose.position += velocity.linear;
        self.pose.heading = (self.pose.heading + velocity.angular).rem_euclid(TAU);
        true
    }

    /// Tip of the heading marker on the map view
    pub fn heading_marker(&self) -> Vec2 {
        self.pose.position + self.pose.direction() * self.radius
    }
}
