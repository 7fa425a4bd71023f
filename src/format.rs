//! Formatting passes applied to generated text after documentation expansion

use crate::constants::{markers, COMMENT_PREFIX};
use clap::ValueEnum;

/// Line terminator of generated files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LineEnding {
    #[default]
    Lf,
    Crlf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::Crlf => "\r\n",
        }
    }
}

/// Breaks lines at `#newline#` markers where they would grow past `width` columns.
///
/// The components between markers are appended to the current physical line until the next one
/// would push it past `width`; that component then starts a new line with the same indentation,
/// continuing the comment for documentation lines. A component is never split, and markers are
/// removed even when no break is needed.
///
/// # Examples
/// ```
/// use quantigen::format::wrap_long_lines;
///
/// assert_eq!(wrap_long_lines("    a #newline#=> b\n", 175), "    a => b\n");
/// assert_eq!(wrap_long_lines("    aaaa#newline#bbbb\n", 8), "    aaaa\n    bbbb\n");
/// ```
pub fn wrap_long_lines(text: &str, width: usize) -> String {
    let mut wrapped = String::with_capacity(text.len());
    for line in text.split_inclusive('\n') {
        if !line.contains(markers::NEWLINE) {
            wrapped.push_str(line);
            continue;
        }

        let (content, terminator) = match line.strip_suffix('\n') {
            Some(content) => (content, "\n"),
            None => (line, ""),
        };
        let indent = &content[..content.len() - content.trim_start_matches(' ').len()];
        let comment = content.trim_start().starts_with("///");

        let mut length = 0;
        for component in content.split(markers::NEWLINE) {
            let columns = component.chars().count();
            if length > 0 && length + columns > width {
                let kept = wrapped.trim_end_matches(' ').len();
                wrapped.truncate(kept);
                wrapped.push('\n');
                wrapped.push_str(indent);
                if comment {
                    wrapped.push_str(COMMENT_PREFIX);
                }
                length = 0;
            }
            wrapped.push_str(component);
            length += columns;
        }
        wrapped.push_str(terminator);
    }
    wrapped
}

/// Collapses runs of blank lines into a single empty line.
///
/// Leading and trailing blank lines are dropped, and non-empty output ends with one line break.
///
/// # Examples
/// ```
/// use quantigen::format::collapse_blank_lines;
///
/// assert_eq!(collapse_blank_lines("\na\n\n\n  \nb\n\n"), "a\n\nb\n");
/// ```
pub fn collapse_blank_lines(text: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    let mut previous_was_blank = true;
    for line in text.lines() {
        if line.trim().is_empty() {
            if !previous_was_blank {
                lines.push("");
            }
            previous_was_blank = true;
        } else {
            lines.push(line);
            previous_was_blank = false;
        }
    }
    if lines.last() == Some(&"") {
        lines.pop();
    }

    if lines.is_empty() {
        return String::new();
    }
    let mut collapsed = lines.join("\n");
    collapsed.push('\n');
    collapsed
}

/// Rewrites every line break of `text` as `ending`, whatever mix of breaks it had.
pub fn normalize_line_endings(text: &str, ending: LineEnding) -> String {
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");
    match ending {
        LineEnding::Lf => unified,
        LineEnding::Crlf => unified.replace('\n', ending.as_str()),
    }
}
