//! Response sanitizer: post-processes raw model output into display-safe
//! text.
//!
//! "Extract code" behavior: when the reply contains a fenced code block,
//! the first block is pulled out, scrubbed of pseudo-tags (`<word>`,
//! `</word>`) and stray single-asterisk emphasis, and re-wrapped in a
//! fresh fence with its original language tag. Replies without a fence
//! pass through unchanged.
//!
//! Pure, deterministic, total: no input panics, and text with no
//! matching pattern is returned as-is.

const FENCE: &str = "```";

/// Clean a raw reply for display.
pub fn clean(raw: &str) -> String {
    match extract_fenced_block(raw) {
        Some((lang, body)) => {
            let scrubbed = strip_single_asterisks(&strip_pseudo_tags(body));
            let scrubbed = scrubbed.trim_end_matches('\n');
            if lang.is_empty() {
                format!("{FENCE}\n{scrubbed}\n{FENCE}")
            } else {
                format!("{FENCE}{lang}\n{scrubbed}\n{FENCE}")
            }
        }
        None => raw.to_string(),
    }
}

/// Locate the first fenced block and split it into (language tag, body).
///
/// A block is an opening fence, an optional language tag on the fence
/// line, content, and a closing fence. An unterminated fence is not a
/// block.
fn extract_fenced_block(text: &str) -> Option<(&str, &str)> {
    let open = text.find(FENCE)?;
    let after_open = &text[open + FENCE.len()..];
    let close = after_open.find(FENCE)?;
    let span = &after_open[..close];

    match span.find('\n') {
        Some(newline) => {
            let lang = span[..newline].trim();
            let body = &span[newline + 1..];
            Some((lang, body))
        }
        // Single-line span (e.g. an inline literal): no language tag.
        None => Some(("", span)),
    }
}

/// Remove pseudo-tags: `<`, optional `/`, one or more ASCII alphanumerics,
/// `>`. Anything else keeps its angle brackets (`a < b`, `Vec<T>`'s `>`
/// alone, etc. survive untouched).
fn strip_pseudo_tags(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        match pseudo_tag_len(tail) {
            Some(len) => rest = &tail[len..],
            None => {
                out.push('<');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Length of the pseudo-tag at the start of `s` (which begins with `<`),
/// or None if it is not one.
fn pseudo_tag_len(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut i = 1;
    if bytes.get(i) == Some(&b'/') {
        i += 1;
    }
    let word_start = i;
    while i < bytes.len() && bytes[i].is_ascii_alphanumeric() {
        i += 1;
    }
    if i > word_start && bytes.get(i) == Some(&b'>') {
        Some(i + 1)
    } else {
        None
    }
}

/// Remove lone `*` characters; runs of two or more survive so bold
/// markers and `**` operators are left alone.
fn strip_single_asterisks(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '*' {
            let mut run = 1;
            while chars.peek() == Some(&'*') {
                chars.next();
                run += 1;
            }
            if run >= 2 {
                out.extend(std::iter::repeat_n('*', run));
            }
        } else {
            out.push(c);
        }
    }
    out
}
