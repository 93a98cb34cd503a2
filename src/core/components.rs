use bevy::prelude::*;
use std::fmt;

/// Which flipper a paddle, stopper or key binding belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    /// Mirror an x offset / angle authored for the left side.
    pub fn mirror(self, v: f32) -> f32 {
        match self {
            Side::Left => v,
            Side::Right => -v,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StopperPosition {
    Top,
    Bottom,
}

/// Behaviour tag carried by every playfield body.
///
/// Dispatch (reset contacts, attraction) matches on this enum; `tag()` keeps the
/// historical string form for entity names and logs.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyLabel {
    Reset,
    PaddleComp(Side),
    Marble,
    Stopper(Side, StopperPosition),
    Obstacle,
}

impl BodyLabel {
    pub fn tag(&self) -> &'static str {
        match self {
            BodyLabel::Reset => "reset",
            BodyLabel::PaddleComp(Side::Left) => "paddleLeftComp",
            BodyLabel::PaddleComp(Side::Right) => "paddleRightComp",
            BodyLabel::Marble => "marble",
            BodyLabel::Stopper(Side::Left, StopperPosition::Top) => "stopperLeftTop",
            BodyLabel::Stopper(Side::Left, StopperPosition::Bottom) => "stopperLeftBottom",
            BodyLabel::Stopper(Side::Right, StopperPosition::Top) => "stopperRightTop",
            BodyLabel::Stopper(Side::Right, StopperPosition::Bottom) => "stopperRightBottom",
            BodyLabel::Obstacle => "obstacle",
        }
    }

    pub fn is_reset(&self) -> bool {
        matches!(self, BodyLabel::Reset)
    }
}

impl fmt::Display for BodyLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Marker for the (conventionally single) dynamic marble.
#[derive(Component, Debug)]
pub struct Marble;

/// Compound flipper body (visible wedge + hidden brick).
#[derive(Component, Debug, Clone, Copy)]
pub struct Paddle {
    pub side: Side,
}

/// Fixed body the paddle's pivot spring is anchored to.
#[derive(Component, Debug, Clone, Copy)]
pub struct PaddleAnchor {
    pub side: Side,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct Stopper {
    pub side: Side,
    pub position: StopperPosition,
}

/// Static geometry spawned from a body description (walls, bumpers, paths, SVG).
#[derive(Component, Debug)]
pub struct StaticObstacle;

/// Dynamic bodies the pointer may grab.
#[derive(Component, Debug)]
pub struct Draggable;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paddle_labels_keep_historical_tags() {
        assert_eq!(BodyLabel::PaddleComp(Side::Left).tag(), "paddleLeftComp");
        assert_eq!(BodyLabel::PaddleComp(Side::Right).tag(), "paddleRightComp");
        assert_eq!(BodyLabel::Reset.to_string(), "reset");
    }

    #[test]
    fn mirror_flips_only_right() {
        assert_eq!(Side::Left.mirror(32.0), 32.0);
        assert_eq!(Side::Right.mirror(32.0), -32.0);
    }
}
