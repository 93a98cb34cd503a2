//! Static body descriptions for the playfield.
//!
//! Factories return plain data in playfield space (y down, clockwise angles);
//! `spawn::spawn_static_body` realises a description as a Rapier body.
use bevy::prelude::*;

use crate::core::components::BodyLabel;

use super::path::{rings_centroid, PathError, PathPolygon};

pub const OBSTACLE_FILL: Color = Color::srgb(0.286, 0.314, 0.341); // #495057
pub const PATH_FILL: Color = Color::srgb(1.0, 0.753, 0.796); // pink
pub const RESET_FILL: Color = Color::WHITE;

pub const WALL_CHAMFER_RADIUS: f32 = 10.0;
pub const RESET_Y: f32 = 620.0;
pub const RESET_HEIGHT: f32 = 2.0;

#[derive(Debug, Clone, PartialEq)]
pub enum ShapeSpec {
    Rect {
        width: f32,
        height: f32,
        /// Corner rounding radius; 0 for sharp corners.
        chamfer: f32,
    },
    Circle {
        radius: f32,
    },
    /// Rings relative to the body position (their area centroid), playfield orientation.
    Polygon {
        rings: Vec<Vec<Vec2>>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillStyle {
    pub color: Color,
    pub visible: bool,
}

impl FillStyle {
    pub const fn solid(color: Color) -> Self {
        Self {
            color,
            visible: true,
        }
    }

    pub const fn hidden() -> Self {
        Self {
            color: Color::NONE,
            visible: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BodySpec {
    pub label: BodyLabel,
    /// Playfield position of the body origin.
    pub position: Vec2,
    /// Clockwise rotation in playfield space (radians).
    pub angle: f32,
    pub shape: ShapeSpec,
    /// `None` keeps the engine default.
    pub restitution: Option<f32>,
    /// Sensor bodies report contacts but produce no collision response.
    pub sensor: bool,
    pub fill: FillStyle,
}

impl BodySpec {
    fn fixed(label: BodyLabel, position: Vec2, shape: ShapeSpec, fill: FillStyle) -> Self {
        Self {
            label,
            position,
            angle: 0.0,
            shape,
            restitution: None,
            sensor: false,
            fill,
        }
    }
}

/// Optional wall parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WallOptions {
    pub angle: f32,
}

/// Axis-aligned table boundary.
pub fn boundary(x: f32, y: f32, width: f32, height: f32) -> BodySpec {
    BodySpec::fixed(
        BodyLabel::Obstacle,
        Vec2::new(x, y),
        ShapeSpec::Rect {
            width,
            height,
            chamfer: 0.0,
        },
        FillStyle::solid(OBSTACLE_FILL),
    )
}

/// Chamfered (rounded) wall, optionally rotated.
pub fn wall(x: f32, y: f32, width: f32, height: f32, options: WallOptions) -> BodySpec {
    let mut body = BodySpec::fixed(
        BodyLabel::Obstacle,
        Vec2::new(x, y),
        ShapeSpec::Rect {
            width,
            height,
            chamfer: WALL_CHAMFER_RADIUS,
        },
        FillStyle::solid(OBSTACLE_FILL),
    );
    body.angle = options.angle;
    body
}

/// Round bumper. The super-elastic restitution is assigned after the body is
/// built; a value supplied through construction options never took effect.
pub fn bumper(x: f32, y: f32, radius: f32, restitution: f32) -> BodySpec {
    let mut body = BodySpec::fixed(
        BodyLabel::Obstacle,
        Vec2::new(x, y),
        ShapeSpec::Circle { radius },
        FillStyle::solid(OBSTACLE_FILL),
    );
    body.restitution = Some(restitution);
    body
}

/// Thin drain strip along the bottom of the table.
pub fn reset(x: f32, width: f32) -> BodySpec {
    let mut body = BodySpec::fixed(
        BodyLabel::Reset,
        Vec2::new(x, RESET_Y),
        ShapeSpec::Rect {
            width,
            height: RESET_HEIGHT,
            chamfer: 0.0,
        },
        FillStyle::solid(RESET_FILL),
    );
    body.sensor = true;
    body
}

/// Polygon from single-subpath path data, centred on (x, y).
///
/// The first path point must be the topmost one; see `PathPolygon`.
pub fn path(x: f32, y: f32, d: &str) -> Result<BodySpec, PathError> {
    let poly = PathPolygon::parse(d)?;
    if !poly.first_is_topmost() {
        warn!(
            target = "scene",
            "path '{d}': first point {:?} is not the topmost vertex {:?} (topmost-first authoring rule)",
            poly.first(),
            poly.topmost()
        );
    }
    Ok(polygon(x, y, vec![poly.vertices().to_vec()], PATH_FILL))
}

/// Multi-ring static polygon whose overall area centroid sits at (x, y).
pub fn polygon(x: f32, y: f32, rings: Vec<Vec<Vec2>>, color: Color) -> BodySpec {
    let c = rings_centroid(&rings);
    let rings = rings
        .into_iter()
        .map(|ring| ring.into_iter().map(|v| v - c).collect())
        .collect();
    BodySpec::fixed(
        BodyLabel::Obstacle,
        Vec2::new(x, y),
        ShapeSpec::Polygon { rings },
        FillStyle::solid(color),
    )
}

/// Trapezoid centred on its area centroid: `width` at the base, the top
/// narrowed by `slope` (same convention as the flipper wedge), playfield orientation.
pub fn trapezoid_vertices(width: f32, height: f32, slope: f32) -> Vec<Vec2> {
    let s = slope * 0.5;
    let roof = (1.0 - s * 2.0) * width;
    let x1 = width * s;
    let x2 = x1 + roof;
    let x3 = x2 + x1;
    let ring = vec![
        Vec2::new(0.0, height),
        Vec2::new(x1, 0.0),
        Vec2::new(x2, 0.0),
        Vec2::new(x3, height),
    ];
    let c = super::path::ring_centroid(&ring);
    ring.into_iter().map(|v| v - c).collect()
}

/// Rotate playfield-space points clockwise by `angle` (y down).
pub fn rotate_points(points: &[Vec2], angle: f32) -> Vec<Vec2> {
    let rot = Vec2::from_angle(angle);
    points.iter().map(|p| rot.rotate(*p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bumper_restitution_is_elevated() {
        let b = bumper(100.0, 180.0, 20.0, 1.5);
        assert_eq!(b.restitution, Some(1.5));
        assert!(matches!(b.shape, ShapeSpec::Circle { radius } if radius == 20.0));
    }

    #[test]
    fn reset_is_thin_labelled_sensor() {
        let r = reset(225.0, 64.0);
        assert_eq!(r.label, BodyLabel::Reset);
        assert!(r.sensor);
        assert_eq!(r.position, Vec2::new(225.0, RESET_Y));
        assert!(matches!(r.shape, ShapeSpec::Rect { height, .. } if height == RESET_HEIGHT));
    }

    #[test]
    fn wall_keeps_angle_and_chamfer() {
        let w = wall(88.0, 485.0, 20.0, 88.0, WallOptions { angle: -0.95 });
        assert_eq!(w.angle, -0.95);
        assert!(matches!(w.shape, ShapeSpec::Rect { chamfer, .. } if chamfer == WALL_CHAMFER_RADIUS));
        assert_eq!(boundary(0.0, 320.0, 40.0, 640.0).angle, 0.0);
    }

    #[test]
    fn path_body_is_centred_on_anchor() {
        let body = path(35.0, 260.0, "M 0 0 L 40 60 L 0 100 L 0 0").unwrap();
        assert_eq!(body.position, Vec2::new(35.0, 260.0));
        let ShapeSpec::Polygon { rings } = &body.shape else {
            panic!("expected polygon");
        };
        assert_eq!(rings.len(), 1);
        let c = super::super::path::ring_centroid(&rings[0]);
        assert!(c.length() < 1e-3, "ring not centred: {c:?}");
        // First vertex stays first and is still the topmost.
        let first = rings[0][0];
        assert!(rings[0].iter().all(|v| v.y >= first.y));
    }

    #[test]
    fn trapezoid_is_centred_and_narrow_on_top() {
        let t = trapezoid_vertices(20.0, 88.0, 0.33);
        assert_eq!(t.len(), 4);
        let c = super::super::path::ring_centroid(&t);
        assert!(c.length() < 1e-3);
        let base = t[3].x - t[0].x;
        let roof = t[2].x - t[1].x;
        assert!((base - 20.0).abs() < 1e-4);
        assert!((roof - 13.4).abs() < 1e-3);
    }
}
