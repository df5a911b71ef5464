use crate::ast::SourceRange;

/// Converts a byte offset into a 1-based `(line, column)` pair.
///
/// Columns count characters, not bytes. Offsets past the end of `source`
/// are clamped to the end, and offsets inside a multi-byte character count
/// as that character.
///
/// ## Parameters
/// - `source`: The complete source text.
/// - `offset`: A byte offset into `source`.
///
/// ## Returns
/// The line and column of `offset`, both starting at 1.
///
/// ## Example
/// ```
/// use partscript::util::text::line_col;
///
/// let source = "const a = 1\nconst b = c";
///
/// assert_eq!(line_col(source, 0), (1, 1));
/// assert_eq!(line_col(source, 22), (2, 11));
/// ```
#[must_use]
pub fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut column = 1;
    for (index, character) in source.char_indices() {
        if index >= offset {
            break;
        }
        if character == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }
    (line, column)
}

/// The full line of `source` containing the start of `range`, without its
/// line break.
///
/// ## Example
/// ```
/// use partscript::{ast::SourceRange, util::text::line_of};
///
/// let source = "const a = 1\nshow(b)";
/// assert_eq!(line_of(source, SourceRange::new(17, 18)), "show(b)");
/// ```
#[must_use]
pub fn line_of(source: &str, range: SourceRange) -> &str {
    let mut offset = range.start().min(source.len());
    while !source.is_char_boundary(offset) {
        offset -= 1;
    }
    let start = source[..offset].rfind('\n').map_or(0, |i| i + 1);
    let end = source[offset..].find('\n').map_or(source.len(), |i| offset + i);
    &source[start..end]
}
