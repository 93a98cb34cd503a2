//! Path data to vertex rings.
//!
//! Parsing and curve flattening are kurbo's (`BezPath::from_svg`, which also
//! takes arcs and relative commands). This module turns the flattened
//! outline into closed rings and keeps the polygon helpers the scene needs.
//!
//! Authoring constraint for `PathPolygon`: the first point must be the path's
//! topmost point (smallest y in playfield space). Rings that break it build a
//! malformed collision shape; `first_is_topmost` reports it, nothing reorders it.
use bevy::prelude::*;
use kurbo::{BezPath, PathEl};
use std::fmt;

/// Flattening tolerance for authored ramps; their segments are all straight.
const POLYGON_TOLERANCE: f64 = 0.25;

#[derive(Debug, Clone, PartialEq)]
pub enum PathError {
    Syntax(String),
    Empty,
    MultipleSubpaths,
    TooFewVertices(usize),
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::Syntax(msg) => write!(f, "invalid path data: {msg}"),
            PathError::Empty => write!(f, "path data is empty"),
            PathError::MultipleSubpaths => {
                write!(f, "polygon paths must contain a single subpath")
            }
            PathError::TooFewVertices(n) => {
                write!(f, "polygon needs at least 3 distinct vertices, got {n}")
            }
        }
    }
}

impl std::error::Error for PathError {}

impl From<kurbo::SvgParseError> for PathError {
    fn from(e: kurbo::SvgParseError) -> Self {
        PathError::Syntax(e.to_string())
    }
}

/// One flattened subpath, before ring cleanup.
#[derive(Debug, Default)]
struct Contour {
    points: Vec<Vec2>,
    closed: bool,
}

fn contours(d: &str, tolerance: f64) -> Result<Vec<Contour>, PathError> {
    if d.trim().is_empty() {
        return Err(PathError::Empty);
    }
    let path = BezPath::from_svg(d)?;
    if path.elements().is_empty() {
        return Err(PathError::Empty);
    }
    let mut out: Vec<Contour> = Vec::new();
    path.flatten(tolerance, |el| match el {
        PathEl::MoveTo(p) => out.push(Contour {
            points: vec![Vec2::new(p.x as f32, p.y as f32)],
            closed: false,
        }),
        PathEl::LineTo(p) => {
            if let Some(c) = out.last_mut() {
                c.points.push(Vec2::new(p.x as f32, p.y as f32));
            }
        }
        PathEl::ClosePath => {
            if let Some(c) = out.last_mut() {
                c.closed = true;
            }
        }
        // `flatten` only emits moves, lines and closes.
        PathEl::QuadTo(..) | PathEl::CurveTo(..) => {}
    });
    Ok(out)
}

/// Drop the repeated closing point and consecutive duplicates. Returns whether
/// the ring returned to its start.
fn tidy_ring(points: &mut Vec<Vec2>) -> bool {
    let mut returned = false;
    if points.len() > 1 && points[0].distance_squared(points[points.len() - 1]) < 1e-8 {
        points.pop();
        returned = true;
    }
    points.dedup_by(|a, b| a.distance_squared(*b) < 1e-8);
    returned
}

/// Closed vertex ring built from single-subpath path data.
#[derive(Debug, Clone, PartialEq)]
pub struct PathPolygon {
    vertices: Vec<Vec2>,
    explicitly_closed: bool,
}

impl PathPolygon {
    pub fn parse(d: &str) -> Result<Self, PathError> {
        let mut subpaths = contours(d, POLYGON_TOLERANCE)?;
        if subpaths.len() > 1 {
            return Err(PathError::MultipleSubpaths);
        }
        let Some(Contour { mut points, closed }) = subpaths.pop() else {
            return Err(PathError::Empty);
        };
        let returned = tidy_ring(&mut points);
        if points.len() < 3 {
            return Err(PathError::TooFewVertices(points.len()));
        }
        Ok(Self {
            vertices: points,
            explicitly_closed: closed || returned,
        })
    }

    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    pub fn first(&self) -> Vec2 {
        self.vertices[0]
    }

    /// True when the path text returned to its start (or used `Z`).
    pub fn is_explicitly_closed(&self) -> bool {
        self.explicitly_closed
    }

    /// Vertex with the smallest y; the first such vertex on ties.
    pub fn topmost(&self) -> Vec2 {
        self.vertices
            .iter()
            .copied()
            .fold(self.vertices[0], |best, v| if v.y < best.y { v } else { best })
    }

    pub fn first_is_topmost(&self) -> bool {
        self.topmost() == self.first()
    }

    pub fn centroid(&self) -> Vec2 {
        ring_centroid(&self.vertices)
    }
}

/// Signed shoelace area (positive for counter-clockwise rings in y-up space).
pub fn signed_area(ring: &[Vec2]) -> f32 {
    let n = ring.len();
    let mut a = 0.0;
    for i in 0..n {
        let p = ring[i];
        let q = ring[(i + 1) % n];
        a += p.x * q.y - q.x * p.y;
    }
    a * 0.5
}

/// Area centroid of a simple ring; falls back to the vertex mean for degenerate rings.
pub fn ring_centroid(ring: &[Vec2]) -> Vec2 {
    let n = ring.len();
    if n == 0 {
        return Vec2::ZERO;
    }
    let area = signed_area(ring);
    if area.abs() < 1e-6 {
        return ring.iter().copied().sum::<Vec2>() / n as f32;
    }
    let mut c = Vec2::ZERO;
    for i in 0..n {
        let p = ring[i];
        let q = ring[(i + 1) % n];
        let cross = p.x * q.y - q.x * p.y;
        c += (p + q) * cross;
    }
    c / (6.0 * area)
}

/// Area-weighted centroid across several rings.
pub fn rings_centroid(rings: &[Vec<Vec2>]) -> Vec2 {
    let mut total = 0.0;
    let mut acc = Vec2::ZERO;
    for ring in rings {
        let a = signed_area(ring).abs();
        total += a;
        acc += ring_centroid(ring) * a;
    }
    if total < 1e-6 {
        let all: Vec<Vec2> = rings.iter().flatten().copied().collect();
        return ring_centroid(&all);
    }
    acc / total
}

pub fn is_convex(ring: &[Vec2]) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }
    let mut sign = 0.0f32;
    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        let c = ring[(i + 2) % n];
        let cross = (b - a).perp_dot(c - b);
        if cross.abs() < 1e-6 {
            continue;
        }
        if sign == 0.0 {
            sign = cross.signum();
        } else if cross.signum() != sign {
            return false;
        }
    }
    true
}

/// Flatten full path data into closed rings, one per subpath with at least
/// three distinct vertices. Curves deviate from their ring by at most `tolerance`.
pub fn flatten_path_data(d: &str, tolerance: f32) -> Result<Vec<Vec<Vec2>>, PathError> {
    let tolerance = f64::from(tolerance.max(1e-3));
    let mut rings = Vec::new();
    for Contour { mut points, .. } in contours(d, tolerance)? {
        tidy_ring(&mut points);
        if points.len() >= 3 {
            rings.push(points);
        }
    }
    Ok(rings)
}
