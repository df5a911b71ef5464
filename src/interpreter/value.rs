/// Geometry values.
///
/// Defines `SketchGroup` and `ExtrudeGroup`, the engine addressable values
/// produced by the modeling functions, together with their segments, walls and
/// placement types.
///
/// Geometry values are immutable once built. Operations such as `lineTo`
/// return a new group and leave their input untouched.
pub mod geometry;

pub mod core;
