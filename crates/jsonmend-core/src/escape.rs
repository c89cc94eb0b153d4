use crate::sanitize::replace_slash_quote;

/// Escape raw newlines that sit inside string literals.
///
/// Single left-to-right scan over the text tracking whether we are inside a
/// double-quoted string and whether the previous character was a backslash.
/// A literal LF inside a string becomes the two-character sequence `\n`;
/// everything else is emitted verbatim. This is the only stage that keeps
/// in-string line breaks instead of deleting them.
pub fn escape_in_strings(text: &str) -> String {
    let text = replace_slash_quote(text);
    let mut out = String::with_capacity(text.len() + 8);
    let mut in_string = false;
    let mut pending_escape = false;

    for c in text.chars() {
        if pending_escape {
            out.push(c);
            pending_escape = false;
            continue;
        }
        match c {
            '\\' => {
                out.push(c);
                pending_escape = true;
            }
            '"' => {
                out.push(c);
                in_string = !in_string;
            }
            '\n' if in_string => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out
}
