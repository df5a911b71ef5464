use serde::Serialize;

use crate::{engine::id::CommandId, interpreter::value::core::Metadata};

/// A point in the sketch plane.
pub type Point2d = [f64; 2];
/// A point in 3D space.
pub type Position = [f64; 3];
/// A rotation quaternion stored as `[x, y, z, w]`.
pub type Rotation = [f64; 4];

/// The rotation that leaves everything in place.
pub const IDENTITY_ROTATION: Rotation = [0.0, 0.0, 0.0, 1.0];

/// A straight segment of a sketch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Path {
    /// Deterministic id of the segment.
    pub id:   CommandId,
    /// Optional tag used to look the segment up later.
    pub name: Option<String>,
    /// Start point.
    pub from: Point2d,
    /// End point.
    pub to:   Point2d,
    /// The call that drew the segment.
    #[serde(rename = "__geoMeta")]
    pub meta: Metadata,
}

/// A 2D profile made of connected segments.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SketchGroup {
    /// Id of the engine path. Stays the same while segments are appended.
    pub id:       CommandId,
    /// Segments in drawing order.
    pub value:    Vec<Path>,
    /// Where the pen started.
    pub start:    Point2d,
    /// Placement of the sketch plane.
    pub position: Position,
    /// Orientation of the sketch plane.
    pub rotation: Rotation,
    /// Lineage: the producing call first, then everything it was derived
    /// from.
    #[serde(rename = "__meta")]
    pub meta:     Vec<Metadata>,
}

impl SketchGroup {
    /// Where the next segment starts.
    #[must_use]
    pub fn current_point(&self) -> Point2d {
        self.value.last().map_or(self.start, |path| path.to)
    }

    /// Returns a copy with `path` appended and its lineage replaced by
    /// `meta`. `self` is left untouched.
    #[must_use]
    pub fn with_path(&self, path: Path, meta: Vec<Metadata>) -> Self {
        let mut value = self.value.clone();
        value.push(path);
        Self { value,
               meta,
               ..self.clone() }
    }
}

/// One side wall of an extrusion.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtrudeSurface {
    /// Deterministic id of the wall.
    pub id:       CommandId,
    /// Name of the segment the wall was swept from.
    pub name:     Option<String>,
    /// Centre of the wall.
    pub position: Position,
    /// Orientation of the wall; its local +X axis faces outward.
    pub rotation: Rotation,
    /// The call that drew the source segment.
    #[serde(rename = "__geoMeta")]
    pub meta:     Metadata,
}

/// A solid produced by extruding a sketch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtrudeGroup {
    /// Id of the extrusion command.
    pub id:       CommandId,
    /// One wall per sketch segment.
    pub value:    Vec<ExtrudeSurface>,
    /// Extrusion length.
    pub height:   f64,
    /// Placement, inherited from the sketch.
    pub position: Position,
    /// Orientation, inherited from the sketch.
    pub rotation: Rotation,
    /// Lineage: the extrude call first, then the sketch's chain.
    #[serde(rename = "__meta")]
    pub meta:     Vec<Metadata>,
}

impl ExtrudeGroup {
    /// Looks up a wall by the name of its source segment.
    #[must_use]
    pub fn find_surface(&self, name: &str) -> Option<&ExtrudeSurface> {
        self.value
            .iter()
            .find(|surface| surface.name.as_deref() == Some(name))
    }
}

/// Winding of a closed polygon: `1.0` for clockwise, `-1.0` for
/// counter-clockwise.
///
/// Degenerate polygons (zero area) count as clockwise.
///
/// ## Example
/// ```
/// use partscript::interpreter::value::geometry::clockwise_sign;
///
/// let ccw = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
/// let cw = [[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0]];
///
/// assert_eq!(clockwise_sign(&ccw), -1.0);
/// assert_eq!(clockwise_sign(&cw), 1.0);
/// ```
#[must_use]
pub fn clockwise_sign(points: &[Point2d]) -> f64 {
    let sum: f64 = points.iter()
                         .zip(points.iter().cycle().skip(1))
                         .map(|(current, next)| (next[0] - current[0]) * (next[1] + current[1]))
                         .sum();
    if sum >= 0.0 { 1.0 } else { -1.0 }
}

/// Placement of the wall swept from `path`.
///
/// The wall sits at the segment midpoint, halfway up the extrusion, rotated
/// about +Z so that it faces away from the profile. `winding` is the result of
/// [`clockwise_sign`] for the whole profile.
#[must_use]
pub fn wall_transform(path: &Path,
                      height: f64,
                      winding: f64,
                      origin: Position)
                      -> (Position, Rotation) {
    let dx = path.to[0] - path.from[0];
    let dy = path.to[1] - path.from[1];

    // Outward normal: right of travel for counter-clockwise, left for
    // clockwise.
    let (nx, ny) = if winding > 0.0 { (-dy, dx) } else { (dy, -dx) };
    let half_angle = ny.atan2(nx) / 2.0;

    let position = [origin[0] + (path.from[0] + path.to[0]) / 2.0,
                    origin[1] + (path.from[1] + path.to[1]) / 2.0,
                    origin[2] + height / 2.0];
    (position, [0.0, 0.0, half_angle.sin(), half_angle.cos()])
}
