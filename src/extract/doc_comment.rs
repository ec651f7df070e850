//! Backward scan attaching comment text to a declaration.
//!
//! Starting just above the declaration, at most [`MAX_LOOKBACK`] lines are
//! visited bottom-up:
//!
//! | line                     | action                      | next state  |
//! |--------------------------|-----------------------------|-------------|
//! | blank                    | skip                        | unchanged   |
//! | starts with `//` or `*`  | capture                     | `InComment` |
//! | starts with `/*`         | capture                     | `Done`      |
//! | anything else            | stop                        | `Done`      |
//!
//! Captured fragments keep their top-to-bottom order and are joined with a
//! single space. Consecutive comment lines belonging to an earlier statement
//! are absorbed as well; the association is best effort.

pub const MAX_LOOKBACK: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Seeking,
    InComment,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Blank,
    CommentBody,
    BlockStart,
    Code,
}

fn classify(trimmed: &str) -> LineKind {
    if trimmed.is_empty() {
        LineKind::Blank
    } else if trimmed.starts_with("//") || trimmed.starts_with('*') {
        LineKind::CommentBody
    } else if trimmed.starts_with("/*") {
        LineKind::BlockStart
    } else {
        LineKind::Code
    }
}

fn strip_markers(trimmed: &str) -> &str {
    let text = trimmed.trim_start_matches(['/', '*']);
    let text = text.trim_end();
    text.strip_suffix("*/").unwrap_or(text).trim()
}

struct DocScanner<'a> {
    state: ScanState,
    fragments: Vec<&'a str>,
}

impl<'a> DocScanner<'a> {
    fn new() -> Self {
        Self {
            state: ScanState::Seeking,
            fragments: Vec::new(),
        }
    }

    fn feed(&mut self, line: &'a str) {
        let trimmed = line.trim();
        self.state = match (self.state, classify(trimmed)) {
            (ScanState::Done, _) => ScanState::Done,
            (state, LineKind::Blank) => state,
            (_, LineKind::CommentBody) => {
                self.capture(trimmed);
                ScanState::InComment
            }
            (_, LineKind::BlockStart) => {
                self.capture(trimmed);
                ScanState::Done
            }
            (_, LineKind::Code) => ScanState::Done,
        };
    }

    fn capture(&mut self, trimmed: &'a str) {
        let text = strip_markers(trimmed);
        if !text.is_empty() {
            self.fragments.push(text);
        }
    }

    fn finish(mut self) -> String {
        // Fragments were collected bottom-up.
        self.fragments.reverse();
        self.fragments.join(" ")
    }
}

/// Documentation for the declaration on `lines[decl_index]` (0-based).
pub fn extract_doc_comment(lines: &[&str], decl_index: usize) -> String {
    let start = decl_index.min(lines.len());
    let lower = start.saturating_sub(MAX_LOOKBACK);

    let mut scanner = DocScanner::new();
    for line in lines[lower..start].iter().rev() {
        scanner.feed(line);
        if scanner.state == ScanState::Done {
            break;
        }
    }

    scanner.finish()
}
