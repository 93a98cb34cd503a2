//! The classic table: boundaries, gate walls, bumpers, lane walls, ramps,
//! drain strips and the decorative dome.
use bevy::prelude::*;

use crate::core::config::PinballConfig;

use super::geometry::path::PathError;
use super::geometry::shapes::{
    boundary, bumper, path, reset, wall, BodySpec, WallOptions,
};
use super::geometry::svg::SvgObstacleRequest;

pub const LEFT_ARROW: &str = "M 0 0 L 40 60 L 0 100 L 0 0";
pub const RIGHT_ARROW: &str = "M 40 -60 L 40 40 L 0 0 L 40 -60";
pub const LEFT_BOTTOM: &str = "M 0 0 L 0 -140 L 180 0 L 0 0";
pub const RIGHT_BOTTOM: &str = "M 0 -140 L 0 0 L -180 0 L 0 -140";

pub const DOME_NAME: &str = "dome";
pub const DOME_POSITION: Vec2 = Vec2::new(236.0, 80.0);

const BUMPERS: [(f32, f32); 5] = [
    (100.0, 180.0),
    (225.0, 180.0),
    (350.0, 180.0),
    (160.0, 260.0),
    (290.0, 260.0),
];

#[derive(Debug, Clone)]
pub struct PlayfieldLayout {
    pub bodies: Vec<BodySpec>,
    pub svg_obstacles: Vec<SvgObstacleRequest>,
}

pub fn classic_layout(cfg: &PinballConfig) -> Result<PlayfieldLayout, PathError> {
    let w = cfg.window.width;
    let h = cfg.window.height;
    let mut bodies = vec![
        boundary(0.0, h / 2.0, 40.0, h),
        boundary(w, h / 2.0, 40.0, h),
        // The floor is as wide as the table is tall.
        boundary(w / 2.0, h, h, 40.0),
        // top gates
        wall(150.0, 100.0, 18.0, 40.0, WallOptions::default()),
        wall(230.0, 100.0, 18.0, 40.0, WallOptions::default()),
        wall(320.0, 100.0, 18.0, 40.0, WallOptions::default()),
    ];
    bodies.extend(
        BUMPERS
            .iter()
            .map(|&(x, y)| bumper(x, y, cfg.bumper.radius, cfg.bumper.restitution)),
    );
    bodies.extend([
        // plunger lane
        wall(440.0, 420.0, 20.0, 450.0, WallOptions::default()),
        wall(120.0, 380.0, 20.0, 110.0, WallOptions::default()),
        wall(320.0, 380.0, 20.0, 110.0, WallOptions::default()),
        // inlanes
        wall(60.0, 400.0, 20.0, 150.0, WallOptions::default()),
        wall(88.0, 485.0, 20.0, 88.0, WallOptions { angle: -0.95 }),
        wall(380.0, 400.0, 20.0, 150.0, WallOptions::default()),
        wall(352.0, 485.0, 20.0, 88.0, WallOptions { angle: 0.95 }),
        reset(225.0, 64.0),
        reset(465.0, 32.0),
        path(35.0, 260.0, LEFT_ARROW)?,
        path(416.0, 280.0, RIGHT_ARROW)?,
        path(80.0, 580.0, LEFT_BOTTOM)?,
        path(370.0, 580.0, RIGHT_BOTTOM)?,
    ]);

    let svg_obstacles = if cfg.svg.enabled {
        vec![SvgObstacleRequest {
            name: DOME_NAME.into(),
            position: DOME_POSITION,
            tolerance: cfg.svg.tolerance,
        }]
    } else {
        Vec::new()
    };

    Ok(PlayfieldLayout {
        bodies,
        svg_obstacles,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::components::BodyLabel;
    use crate::gameplay::geometry::shapes::ShapeSpec;

    fn layout() -> PlayfieldLayout {
        classic_layout(&PinballConfig::default()).unwrap()
    }

    #[test]
    fn every_bumper_is_super_elastic() {
        let l = layout();
        let bumpers: Vec<_> = l
            .bodies
            .iter()
            .filter(|b| matches!(b.shape, ShapeSpec::Circle { .. }))
            .collect();
        assert_eq!(bumpers.len(), 5);
        assert!(bumpers.iter().all(|b| b.restitution == Some(1.5)));
        assert!(l
            .bodies
            .iter()
            .filter(|b| !matches!(b.shape, ShapeSpec::Circle { .. }))
            .all(|b| b.restitution.is_none()));
    }

    #[test]
    fn two_drain_strips_along_the_floor() {
        let l = layout();
        let strips: Vec<_> = l
            .bodies
            .iter()
            .filter(|b| b.label == BodyLabel::Reset)
            .collect();
        assert_eq!(strips.len(), 2);
        assert!(strips.iter().all(|b| b.sensor && b.position.y == 620.0));
    }

    #[test]
    fn floor_uses_table_height_as_width() {
        let l = layout();
        let floor = &l.bodies[2];
        assert_eq!(floor.position, Vec2::new(250.0, 640.0));
        assert!(matches!(floor.shape, ShapeSpec::Rect { width, height, .. } if width == 640.0 && height == 40.0));
    }

    #[test]
    fn dome_request_follows_svg_switch() {
        assert_eq!(layout().svg_obstacles.len(), 1);
        assert_eq!(layout().svg_obstacles[0].position, DOME_POSITION);
        let mut cfg = PinballConfig::default();
        cfg.svg.enabled = false;
        assert!(classic_layout(&cfg).unwrap().svg_obstacles.is_empty());
    }

    #[test]
    fn ramps_parse_into_polygons() {
        let polys = layout()
            .bodies
            .iter()
            .filter(|b| matches!(b.shape, ShapeSpec::Polygon { .. }))
            .count();
        assert_eq!(polys, 4);
    }
}
