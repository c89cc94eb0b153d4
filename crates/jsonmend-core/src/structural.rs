//! Fallback heuristic syntax battery: trailing commas, unquoted keys,
//! single-quoted strings, JavaScript-isms (`undefined`, `NaN`, `Infinity`),
//! bare word values. Every pass scans with string/escape awareness so
//! quoted content is left alone, but the battery as a whole is
//! low-confidence — apostrophes and bare words in legitimate content can be
//! mangled. The pipeline prefers the jsonrepair library for this stage and
//! only falls back here when the library cannot produce parseable text.

fn is_ws(b: u8) -> bool {
    matches!(b, b' ' | b'\n' | b'\r' | b'\t')
}

fn strip_trailing_commas(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(bytes.len());
    let mut i = 0;
    let mut in_string = false;
    let mut escape = false;
    while i < bytes.len() {
        let ch = bytes[i];
        if in_string {
            out.push(ch);
            if escape {
                escape = false;
            } else if ch == b'\\' {
                escape = true;
            } else if ch == b'"' {
                in_string = false;
            }
            i += 1;
            continue;
        }
        if ch == b'"' {
            in_string = true;
            out.push(ch);
            i += 1;
            continue;
        }
        if ch == b',' {
            let mut j = i + 1;
            while j < bytes.len() && is_ws(bytes[j]) {
                j += 1;
            }
            if j < bytes.len() && (bytes[j] == b'}' || bytes[j] == b']') {
                i += 1;
                continue;
            }
        }
        out.push(ch);
        i += 1;
    }
    String::from_utf8_lossy(&out).to_string()
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_ident_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

// Quote bare identifier keys: `{foo: 1}` -> `{"foo": 1}`. A word counts as a
// key when it follows `{` or `,` and the next significant character is `:`.
fn quote_unquoted_keys(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(bytes.len() + 8);
    let mut i = 0;
    let mut in_string = false;
    let mut escape = false;
    let mut last_sig: u8 = 0;
    while i < bytes.len() {
        let ch = bytes[i];
        if in_string {
            out.push(ch);
            if escape {
                escape = false;
            } else if ch == b'\\' {
                escape = true;
            } else if ch == b'"' {
                in_string = false;
            }
            i += 1;
            continue;
        }
        if ch == b'"' {
            in_string = true;
            last_sig = ch;
            out.push(ch);
            i += 1;
            continue;
        }
        if is_ident_start(ch) && (last_sig == b'{' || last_sig == b',') {
            let start = i;
            while i < bytes.len() && is_ident_char(bytes[i]) {
                i += 1;
            }
            let mut j = i;
            while j < bytes.len() && is_ws(bytes[j]) {
                j += 1;
            }
            if j < bytes.len() && bytes[j] == b':' {
                out.push(b'"');
                out.extend_from_slice(&bytes[start..i]);
                out.push(b'"');
                last_sig = b'"';
            } else {
                out.extend_from_slice(&bytes[start..i]);
                last_sig = bytes[i - 1];
            }
            continue;
        }
        if !is_ws(ch) {
            last_sig = ch;
        }
        out.push(ch);
        i += 1;
    }
    String::from_utf8_lossy(&out).to_string()
}

// Convert single-quoted string delimiters to double quotes, escaping any
// embedded `"` and unescaping `\'`. Apostrophes in unquoted prose will be
// misread as delimiters; that is the accepted risk of this pass.
fn single_to_double_quotes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut in_double = false;
    let mut escape = false;
    while let Some(c) = chars.next() {
        if in_double {
            out.push(c);
            if escape {
                escape = false;
            } else if c == '\\' {
                escape = true;
            } else if c == '"' {
                in_double = false;
            }
            continue;
        }
        if c == '"' {
            in_double = true;
            out.push(c);
            continue;
        }
        if c == '\'' {
            out.push('"');
            while let Some(s) = chars.next() {
                match s {
                    '\\' => match chars.next() {
                        Some('\'') => out.push('\''),
                        Some(e) => {
                            out.push('\\');
                            out.push(e);
                        }
                        None => out.push('\\'),
                    },
                    '"' => out.push_str("\\\""),
                    '\'' => {
                        out.push('"');
                        break;
                    }
                    s => out.push(s),
                }
            }
            continue;
        }
        out.push(c);
    }
    out
}

// `undefined`, `NaN` and `Infinity` are common in JS-flavored output; a
// strict parser rejects all three. Mapped to null outside strings.
fn replace_bad_literals(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(bytes.len());
    let mut i = 0;
    let mut in_string = false;
    let mut escape = false;
    while i < bytes.len() {
        let ch = bytes[i];
        if in_string {
            out.push(ch);
            if escape {
                escape = false;
            } else if ch == b'\\' {
                escape = true;
            } else if ch == b'"' {
                in_string = false;
            }
            i += 1;
            continue;
        }
        if ch == b'"' {
            in_string = true;
            out.push(ch);
            i += 1;
            continue;
        }
        if is_ident_start(ch) {
            let start = i;
            while i < bytes.len() && is_ident_char(bytes[i]) {
                i += 1;
            }
            let word = &text[start..i];
            match word {
                "undefined" | "NaN" | "Infinity" => out.extend_from_slice(b"null"),
                _ => out.extend_from_slice(word.as_bytes()),
            }
            continue;
        }
        out.push(ch);
        i += 1;
    }
    String::from_utf8_lossy(&out).to_string()
}

fn is_json_literal_or_number(word: &str) -> bool {
    matches!(word, "true" | "false" | "null") || word.parse::<f64>().is_ok()
}

// Last grasp: quote a bare run of letters/digits/spaces sitting in value
// position, e.g. `{"a": hello world}` -> `{"a": "hello world"}`.
fn quote_bare_values(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(bytes.len() + 8);
    let mut i = 0;
    let mut in_string = false;
    let mut escape = false;
    let mut last_sig: u8 = 0;
    while i < bytes.len() {
        let ch = bytes[i];
        if in_string {
            out.push(ch);
            if escape {
                escape = false;
            } else if ch == b'\\' {
                escape = true;
            } else if ch == b'"' {
                in_string = false;
            }
            i += 1;
            continue;
        }
        if ch == b'"' {
            in_string = true;
            last_sig = ch;
            out.push(ch);
            i += 1;
            continue;
        }
        if ch.is_ascii_alphabetic() && last_sig == b':' {
            let start = i;
            while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b' ') {
                i += 1;
            }
            let run = text[start..i].trim_end();
            let terminated = i < bytes.len() && matches!(bytes[i], b',' | b'}' | b']');
            if terminated && !is_json_literal_or_number(run) {
                out.push(b'"');
                out.extend_from_slice(run.as_bytes());
                out.push(b'"');
                last_sig = b'"';
            } else {
                out.extend_from_slice(text[start..i].as_bytes());
                if !run.is_empty() {
                    last_sig = run.as_bytes()[run.len() - 1];
                }
            }
            continue;
        }
        if !is_ws(ch) {
            last_sig = ch;
        }
        out.push(ch);
        i += 1;
    }
    String::from_utf8_lossy(&out).to_string()
}

/// Run the full heuristic battery in its fixed order. Infallible text
/// transform; the pipeline decides whether the result is any good.
pub fn repair_structure(text: &str) -> String {
    let t = strip_trailing_commas(text);
    let t = quote_unquoted_keys(&t);
    let t = single_to_double_quotes(&t);
    let t = replace_bad_literals(&t);
    quote_bare_values(&t)
}
