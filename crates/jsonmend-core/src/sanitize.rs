//! Character-level cleanup: ordered, unconditional text rewrites that strip
//! control/format noise out of a would-be JSON payload. Lossy — raw newlines
//! inside strings do not survive this stage, which is why the string-aware
//! escaper runs first in the pipeline.

/// Common LLM escaping artifact: a stray `/"` pair terminating a string too
/// early. Rewritten to a left curly quote so the surrounding string survives.
pub(crate) fn replace_slash_quote(text: &str) -> String {
    text.replace("/\"", "\u{201C}")
}

fn is_control(c: char) -> bool {
    c <= '\u{1F}' || ('\u{7F}'..='\u{9F}').contains(&c)
}

fn strip_control_chars(text: &str) -> String {
    text.chars().filter(|c| !is_control(*c)).collect()
}

fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_run = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_run {
                out.push(' ');
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}

/// Drop backslashes that do not begin a recognized escape sequence. A
/// backslash followed by one of `" \ / b f n r t` is kept together with that
/// character; any other backslash is deleted and the following character
/// re-examined on its own.
fn strip_bogus_backslashes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some(&n) if matches!(n, '"' | '\\' | '/' | 'b' | 'f' | 'n' | 'r' | 't') => {
                out.push('\\');
                out.push(n);
                chars.next();
            }
            _ => {} // bogus escape: drop the backslash only
        }
    }
    out
}

fn collapse_quote_runs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_quote = false;
    for c in text.chars() {
        if c == '"' {
            if !prev_quote {
                out.push('"');
            }
            prev_quote = true;
        } else {
            out.push(c);
            prev_quote = false;
        }
    }
    out
}

fn blank_escape_chars(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{8}' | '\u{C}' | '\n' | '\r' | '\t' | '\u{B}' => ' ',
            c => c,
        })
        .collect()
}

/// Fixed-order rewrites removing characters a strict parser chokes on.
/// Output carries no parseability guarantee; the pipeline checks.
pub fn sanitize_characters(text: &str) -> String {
    let t = replace_slash_quote(text);
    let t = strip_control_chars(&t);
    let t = collapse_whitespace(&t);
    let t = strip_bogus_backslashes(&t);
    let t = collapse_quote_runs(&t);
    let t = blank_escape_chars(&t);
    t.trim().to_string()
}
