//! Stopper attraction: bottom stoppers push or pull their side's paddle.
//!
//! force = (stopper - body) * coefficient * gain
//!   gain = held_gain (-1)     while the side's key is held: paddle driven away, flipping up
//!   gain = released_gain (0.5) otherwise: paddle drawn back to rest
//! Bodies other than the matching paddle receive an explicit zero vector.
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::core::components::{BodyLabel, Side};
use crate::core::config::{PinballConfig, StopperConfig};
use crate::interaction::input::InputState;

/// Present only on bottom stoppers.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attractor {
    pub side: Side,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttractionLaw {
    pub coefficient: f32,
    pub held_gain: f32,
    pub released_gain: f32,
}

impl Default for AttractionLaw {
    fn default() -> Self {
        Self::from_config(&StopperConfig::default())
    }
}

impl AttractionLaw {
    pub fn from_config(cfg: &StopperConfig) -> Self {
        Self {
            coefficient: cfg.coefficient,
            held_gain: cfg.held_gain,
            released_gain: cfg.released_gain,
        }
    }

    pub fn gain(&self, held: bool) -> f32 {
        if held {
            self.held_gain
        } else {
            self.released_gain
        }
    }

    pub fn force(
        &self,
        attractor: Attractor,
        stopper_pos: Vec2,
        label: BodyLabel,
        body_pos: Vec2,
        input: &InputState,
    ) -> Vec2 {
        match label {
            BodyLabel::PaddleComp(side) if side == attractor.side => {
                (stopper_pos - body_pos) * self.coefficient * self.gain(input.is_up(side))
            }
            BodyLabel::PaddleComp(_)
            | BodyLabel::Reset
            | BodyLabel::Marble
            | BodyLabel::Stopper(..)
            | BodyLabel::Obstacle => Vec2::ZERO,
        }
    }
}

/// Overwrites each forced body's `ExternalForce` with the sum of all attractor
/// contributions for this frame.
pub fn apply_stopper_attraction(
    cfg: Res<PinballConfig>,
    input: Res<InputState>,
    stoppers: Query<(&Attractor, &Transform)>,
    mut bodies: Query<(&BodyLabel, &Transform, &mut ExternalForce), Without<Attractor>>,
) {
    let law = AttractionLaw::from_config(&cfg.stopper);
    let scale = cfg.stopper.force_scale;
    for (label, body_tf, mut ext) in &mut bodies {
        let body_pos = body_tf.translation.truncate();
        let total: Vec2 = stoppers
            .iter()
            .map(|(attractor, stopper_tf)| {
                law.force(
                    *attractor,
                    stopper_tf.translation.truncate(),
                    *label,
                    body_pos,
                    &input,
                )
            })
            .sum();
        ext.force = total * scale;
        ext.torque = 0.0;
    }
}
