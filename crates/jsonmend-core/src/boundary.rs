use crate::error::RepairError;

/// Span of the outermost `{...}` or `[...]` found in arbitrary text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundarySpan {
    pub found: bool,
    /// Byte offset of the opening delimiter.
    pub start: usize,
    /// Byte offset one past the matching closing delimiter.
    pub end: usize,
    pub balanced: bool,
}

impl BoundarySpan {
    fn not_found() -> Self {
        BoundarySpan { found: false, start: 0, end: 0, balanced: false }
    }
}

/// Locate the outermost object/array span inside `text`.
///
/// Whichever of the first `{` and first `[` comes earlier selects the
/// delimiter pair; depth is counted on that pair only. Delimiters inside
/// string literals count toward depth — bug-compatible with the original
/// sanitizer, see DESIGN.md.
pub fn find_boundary(text: &str) -> BoundarySpan {
    let obj = text.find('{');
    let arr = text.find('[');
    let (start, open, close) = match (obj, arr) {
        (None, None) => return BoundarySpan::not_found(),
        (Some(o), None) => (o, b'{', b'}'),
        (None, Some(a)) => (a, b'[', b']'),
        (Some(o), Some(a)) => {
            if o < a { (o, b'{', b'}') } else { (a, b'[', b']') }
        }
    };

    let bytes = text.as_bytes();
    let mut depth: i64 = 0;
    for (i, &ch) in bytes.iter().enumerate().skip(start) {
        if ch == open {
            depth += 1;
        } else if ch == close {
            depth -= 1;
            if depth == 0 {
                return BoundarySpan { found: true, start, end: i + 1, balanced: true };
            }
        }
    }
    BoundarySpan { found: true, start, end: text.len(), balanced: false }
}

/// Trim `text` to its outer delimiter span.
///
/// No opening delimiter at all is terminal (`NoBoundaryFound`); an
/// unbalanced span falls back to the whole input so later stages still get
/// a chance.
pub fn trim_to_boundary(text: &str) -> Result<&str, RepairError> {
    let span = find_boundary(text);
    if !span.found {
        return Err(RepairError::NoBoundaryFound);
    }
    if !span.balanced {
        return Ok(text);
    }
    Ok(&text[span.start..span.end])
}
