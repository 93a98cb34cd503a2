use bevy::prelude::*;

use crate::gameplay::geometry::path::is_convex;

/// World-oriented, body-local drawable description attached to a physics body.
#[derive(Debug, Clone, PartialEq)]
pub enum VisualShape {
    Rect { size: Vec2 },
    Circle { radius: f32 },
    Rings(Vec<Vec<Vec2>>),
}

#[derive(Component, Debug, Clone)]
pub struct BodyVisual {
    pub shape: VisualShape,
    pub color: Color,
}

/// Tag for the mesh children created from a `BodyVisual`.
#[derive(Component)]
pub struct BodyVisualMesh;

pub struct BodyVisualsPlugin;

impl Plugin for BodyVisualsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (attach_body_visuals, draw_ring_outlines));
    }
}

fn attach_body_visuals(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    q: Query<(Entity, &BodyVisual), Added<BodyVisual>>,
) {
    for (entity, visual) in &q {
        let material = materials.add(visual.color);
        let mut handles: Vec<Handle<Mesh>> = Vec::new();
        match &visual.shape {
            VisualShape::Rect { size } => {
                handles.push(meshes.add(Mesh::from(Rectangle::new(size.x, size.y))));
            }
            VisualShape::Circle { radius } => {
                handles.push(meshes.add(Mesh::from(Circle { radius: *radius })));
            }
            VisualShape::Rings(rings) => {
                // Convex rings fill as a triangle fan; concave outlines are drawn with gizmos.
                for ring in rings.iter().filter(|r| is_convex(r)) {
                    for i in 1..ring.len() - 1 {
                        let tri = Triangle2d::new(ring[0], ring[i], ring[i + 1]);
                        handles.push(meshes.add(Mesh::from(tri)));
                    }
                }
            }
        }
        commands.entity(entity).insert(Visibility::default()).with_children(|parent| {
            for mesh in handles {
                parent.spawn((
                    BodyVisualMesh,
                    Mesh2d(mesh),
                    MeshMaterial2d(material.clone()),
                    Transform::from_xyz(0.0, 0.0, 0.1),
                ));
            }
        });
    }
}

fn draw_ring_outlines(mut gizmos: Gizmos, q: Query<(&GlobalTransform, &BodyVisual)>) {
    for (gt, visual) in &q {
        let VisualShape::Rings(rings) = &visual.shape else {
            continue;
        };
        for ring in rings {
            let Some(first) = ring.first() else { continue };
            let points = ring
                .iter()
                .chain(std::iter::once(first))
                .map(|v| gt.transform_point(v.extend(0.0)).truncate());
            gizmos.linestrip_2d(points, visual.color);
        }
    }
}
