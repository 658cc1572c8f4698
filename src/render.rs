//! Unified-diff text rendering.
//!
//! Colors are ANSI SGR wraps around each full line (`ESC[31m...ESC[0m`),
//! written through `console` with styling forced on so the bytes do not
//! depend on whether stdout is a terminal.

use console::{Color, Style};

use crate::config::{DiffOptions, HeaderColor};
use crate::patch::{Hunk, HunkKind, Patch, UnifiedDiff};

/// How to render a diff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStyle {
    pub color: bool,
    pub header_color: HeaderColor,
}

impl RenderStyle {
    pub const fn plain() -> Self {
        Self {
            color: false,
            header_color: HeaderColor::Cyan,
        }
    }

    pub const fn colored(header_color: HeaderColor) -> Self {
        Self {
            color: true,
            header_color,
        }
    }
}

impl From<&DiffOptions> for RenderStyle {
    fn from(options: &DiffOptions) -> Self {
        Self {
            color: options.color,
            header_color: options.header_color,
        }
    }
}

impl From<HeaderColor> for Color {
    fn from(color: HeaderColor) -> Self {
        match color {
            HeaderColor::Cyan => Self::Cyan,
            HeaderColor::Yellow => Self::Yellow,
        }
    }
}

/// Render a whole diff: file header, then every patch.
pub fn render(diff: &UnifiedDiff, style: RenderStyle) -> String {
    let mut out = LineWriter::new(style);
    out.line(&format!("--- {}", diff.left_label), Some(Color::Red), true);
    out.line(&format!("+++ {}", diff.right_label), Some(Color::Green), true);
    for patch in &diff.patches {
        write_patch(&mut out, patch);
    }
    out.finish()
}

/// Render a single patch: range header and prefixed lines.
pub fn render_patch(patch: &Patch, style: RenderStyle) -> String {
    let mut out = LineWriter::new(style);
    write_patch(&mut out, patch);
    out.finish()
}

fn write_patch(out: &mut LineWriter, patch: &Patch) {
    let header_color = out.style.header_color.into();
    out.line(&patch.range_header(), Some(header_color), true);
    for hunk in &patch.hunks {
        write_hunk(out, hunk);
    }
}

fn write_hunk(out: &mut LineWriter, hunk: &Hunk) {
    let color = match hunk.kind {
        HunkKind::Equal => None,
        HunkKind::Delete => Some(Color::Red),
        HunkKind::Insert => Some(Color::Green),
    };
    let prefix = hunk.kind.prefix();
    for line in hunk.lines() {
        let (content, terminated) = match line.strip_suffix('\n') {
            Some(content) => (content, true),
            None => (line, false),
        };
        out.line(&format!("{prefix}{content}"), color, terminated);
    }
}

struct LineWriter {
    style: RenderStyle,
    buf: String,
    /// The last line had no terminator.
    open: bool,
}

impl LineWriter {
    const fn new(style: RenderStyle) -> Self {
        Self {
            style,
            buf: String::new(),
            open: false,
        }
    }

    fn line(&mut self, text: &str, color: Option<Color>, terminated: bool) {
        if self.open {
            self.buf.push('\n');
        }
        match color {
            Some(color) if self.style.color => {
                let styled = Style::new().fg(color).force_styling(true).apply_to(text);
                self.buf.push_str(&styled.to_string());
            }
            _ => self.buf.push_str(text),
        }
        if terminated {
            self.buf.push('\n');
        }
        self.open = !terminated;
    }

    fn finish(self) -> String {
        self.buf
    }
}
