/// Math function implementations.
///
/// Contains the single argument numeric functions and `pi`.
pub mod builtin;
/// `min` and `max` function implementations.
///
/// Returns the smaller or larger of two numbers.
pub mod min_max;
/// The `show` function implementation.
///
/// Records values for the host to display.
pub mod show;
/// Sketch construction.
///
/// `startSketchAt`, `lineTo`, `line` and `close`. Each call submits its path
/// commands and returns a new `SketchGroup`.
pub mod sketch;
/// Extrusion.
///
/// `extrude` and `getExtrudeWallTransform`.
pub mod extrude;

pub mod core;
