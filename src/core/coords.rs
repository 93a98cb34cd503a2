//! Playfield <-> world coordinate mapping.
//!
//! Layout data is authored in screen space: origin at the top-left corner of a
//! `width` x `height` table, y pointing down, velocities in units per fixed
//! 60 Hz step. Bevy/Rapier world space has its origin at the table centre,
//! y pointing up, and velocities in units per second.
use bevy::prelude::*;

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct PlayfieldFrame {
    pub width: f32,
    pub height: f32,
    /// Simulation steps per second the authored per-step velocities assume.
    pub steps_per_second: f32,
}

impl Default for PlayfieldFrame {
    fn default() -> Self {
        Self {
            width: 500.0,
            height: 640.0,
            steps_per_second: 60.0,
        }
    }
}

impl PlayfieldFrame {
    pub fn new(width: f32, height: f32, steps_per_second: f32) -> Self {
        Self {
            width,
            height,
            steps_per_second,
        }
    }

    /// Absolute playfield point -> world point.
    pub fn to_world(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.x - self.width * 0.5, self.height * 0.5 - p.y)
    }

    /// World point -> absolute playfield point.
    pub fn to_playfield(&self, w: Vec2) -> Vec2 {
        Vec2::new(w.x + self.width * 0.5, self.height * 0.5 - w.y)
    }

    /// Relative offset (no translation), only the y axis flips.
    pub fn offset_to_world(&self, v: Vec2) -> Vec2 {
        Vec2::new(v.x, -v.y)
    }

    /// Clockwise-positive screen angle -> counter-clockwise-positive world angle.
    pub fn angle_to_world(&self, angle: f32) -> f32 {
        -angle
    }

    /// Per-step playfield velocity -> per-second world velocity.
    pub fn velocity_to_world(&self, per_step: Vec2) -> Vec2 {
        self.offset_to_world(per_step) * self.steps_per_second
    }

    pub fn translation(&self, p: Vec2, z: f32) -> Vec3 {
        self.to_world(p).extend(z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_map_to_centered_world() {
        let f = PlayfieldFrame::default();
        assert_eq!(f.to_world(Vec2::ZERO), Vec2::new(-250.0, 320.0));
        assert_eq!(f.to_world(Vec2::new(500.0, 640.0)), Vec2::new(250.0, -320.0));
        assert_eq!(f.to_world(Vec2::new(250.0, 320.0)), Vec2::ZERO);
    }

    #[test]
    fn playfield_round_trip() {
        let f = PlayfieldFrame::default();
        let p = Vec2::new(464.0, 500.0);
        assert_eq!(f.to_playfield(f.to_world(p)), p);
    }

    #[test]
    fn upward_launch_becomes_positive_world_velocity() {
        let f = PlayfieldFrame::default();
        let v = f.velocity_to_world(Vec2::new(0.0, -22.0));
        assert_eq!(v, Vec2::new(0.0, 22.0 * 60.0));
    }
}
