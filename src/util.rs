/// Source text helpers.
///
/// This module converts the byte offsets carried by every source range into
/// the line and column numbers people read, and renders short excerpts of the
/// offending text for diagnostics.
pub mod text;
