//! Diff configuration.

use serde::Deserialize;

/// Default number of unchanged lines shown around each change.
pub const DEFAULT_CONTEXT: usize = 3;

/// Color of the `@@ ... @@` range header when coloring is enabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum HeaderColor {
    /// SGR 36, what `diff --color` prints.
    #[default]
    Cyan,
    /// SGR 33.
    Yellow,
}

impl std::str::FromStr for HeaderColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cyan" => Ok(Self::Cyan),
            "yellow" => Ok(Self::Yellow),
            other => Err(format!("unknown header color: {other} (expected cyan or yellow)")),
        }
    }
}

/// Configuration for a diff invocation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DiffOptions {
    /// Label printed after `---`.
    pub left_label: String,
    /// Label printed after `+++`.
    pub right_label: String,
    /// Context width, also half the merge threshold.
    pub context: usize,
    /// Wrap output lines in ANSI color escapes.
    pub color: bool,
    /// Color used for range headers.
    pub header_color: HeaderColor,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            left_label: "left".to_owned(),
            right_label: "right".to_owned(),
            context: DEFAULT_CONTEXT,
            color: false,
            header_color: HeaderColor::default(),
        }
    }
}

impl DiffOptions {
    #[must_use]
    pub fn with_labels(mut self, left: impl Into<String>, right: impl Into<String>) -> Self {
        self.left_label = left.into();
        self.right_label = right.into();
        self
    }

    #[must_use]
    pub const fn with_context(mut self, context: usize) -> Self {
        self.context = context;
        self
    }

    #[must_use]
    pub const fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub const fn with_header_color(mut self, header_color: HeaderColor) -> Self {
        self.header_color = header_color;
        self
    }
}
