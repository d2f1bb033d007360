// crates/annotate_schema/src/braces.rs

/// Which side of a block a brace opens or closes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Brace {
    Open,
    Close,
}

/// Byte offsets of every structural brace in `document`.
///
/// Braces inside `"..."` literals and `//` comments are skipped. A string
/// literal never spans a line break, so an unterminated quote only hides the
/// rest of its own line.
pub(crate) fn brace_positions(document: &str) -> Vec<(usize, Brace)> {
    let mut braces = Vec::new();
    let mut in_string = false;
    let mut escaped = false;
    let mut chars = document.char_indices().peekable();

    while let Some((offset, ch)) = chars.next() {
        if ch == '\n' {
            in_string = false;
            escaped = false;
            continue;
        }
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '/' if matches!(chars.peek(), Some((_, '/'))) => {
                while let Some(&(_, next)) = chars.peek() {
                    if next == '\n' {
                        break;
                    }
                    chars.next();
                }
            }
            '{' => braces.push((offset, Brace::Open)),
            '}' => braces.push((offset, Brace::Close)),
            _ => {}
        }
    }

    braces
}
