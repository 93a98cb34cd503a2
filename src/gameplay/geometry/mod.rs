pub mod path;
pub mod shapes;
pub mod spawn;
pub mod svg;

pub use path::{PathError, PathPolygon};
pub use shapes::{BodySpec, ShapeSpec};
pub use spawn::spawn_static_body;
pub use svg::{SvgObstaclePlugin, SvgObstacleRequest, SvgOutline};
