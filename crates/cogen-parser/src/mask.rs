//! Comment and string masking
//!
//! [`mask`] returns a copy of the source with the contents of comments and
//! string literals replaced by spaces. Byte offsets are preserved, so a
//! match found in the masked text can be sliced out of the original.
//!
//! String literals end at their closing quote or at the end of the line,
//! whichever comes first; a stray apostrophe in surrounding prose can only
//! hide the rest of its own line.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Code,
    LineComment,
    BlockComment,
    Str(char),
}

/// Blank out comments and string-literal contents, preserving offsets
#[must_use]
pub fn mask(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut state = State::Code;
    let mut chars = source.chars().peekable();

    while let Some(c) = chars.next() {
        match state {
            State::Code => match c {
                '/' if chars.peek() == Some(&'/') => {
                    chars.next();
                    out.push_str("  ");
                    state = State::LineComment;
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    out.push_str("  ");
                    state = State::BlockComment;
                }
                '"' | '\'' => {
                    out.push(c);
                    state = State::Str(c);
                }
                _ => out.push(c),
            },
            State::LineComment => {
                if c == '\n' {
                    out.push('\n');
                    state = State::Code;
                } else {
                    blank(&mut out, c);
                }
            }
            State::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    out.push_str("  ");
                    state = State::Code;
                } else if c == '\n' {
                    out.push('\n');
                } else {
                    blank(&mut out, c);
                }
            }
            State::Str(quote) => {
                if c == '\\' {
                    blank(&mut out, c);
                    if let Some(escaped) = chars.next_if(|n| *n != '\n') {
                        blank(&mut out, escaped);
                    }
                } else if c == quote {
                    out.push(c);
                    state = State::Code;
                } else if c == '\n' {
                    out.push('\n');
                    state = State::Code;
                } else {
                    blank(&mut out, c);
                }
            }
        }
    }

    out
}

fn blank(out: &mut String, c: char) {
    for _ in 0..c.len_utf8() {
        out.push(' ');
    }
}

/// Count `{` and `}` in masked text
#[must_use]
pub fn brace_counts(masked: &str) -> (usize, usize) {
    masked.bytes().fold((0, 0), |(open, close), b| match b {
        b'{' => (open + 1, close),
        b'}' => (open, close + 1),
        _ => (open, close),
    })
}

/// Offset of the delimiter closing the one at `open_idx`
///
/// Works for `{}` and `()`. Returns `None` if `open_idx` is not an opening
/// delimiter or it is never closed.
#[must_use]
pub fn matching_close(masked: &str, open_idx: usize) -> Option<usize> {
    let bytes = masked.as_bytes();
    let (open, close) = match bytes.get(open_idx)? {
        b'{' => (b'{', b'}'),
        b'(' => (b'(', b')'),
        _ => return None,
    };

    let mut depth = 0usize;
    for (idx, &b) in bytes.iter().enumerate().skip(open_idx) {
        if b == open {
            depth += 1;
        } else if b == close {
            depth -= 1;
            if depth == 0 {
                return Some(idx);
            }
        }
    }
    None
}
