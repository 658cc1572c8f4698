//! `linepatch` — in-process unified diff engine.
//!
//! Turns two line-oriented texts into GNU-compatible unified-diff patches
//! (`--- / +++ / @@ -l,s +l,s @@`) with configurable context width and
//! optional ANSI coloring, without shelling out to `diff`.
//!
//! # Architecture
//!
//! ```text
//! left, right ─→ script ─→ sequencer ─→ merger ─→ numberer ─→ UnifiedDiff ─→ render
//!               (similar)   (drafts)    (≤ 2×ctx)  (trim, @@)               (text/ANSI)
//!                   └──────────── StageEvent ──→ Diagnostics sink
//! ```
//!
//! Every stage is pure: it reads its input and returns new values, so
//! independent diffs can run in parallel without coordination.

pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod patch;
pub mod render;

pub use config::{DiffOptions, HeaderColor};
pub use diagnostics::{Diagnostics, NoDiagnostics, StageEvent, TracingDiagnostics};
pub use error::{PatchError, PatchResult, Stage};
pub use patch::{DiffOutcome, Differ, Hunk, HunkKind, Patch, UnifiedDiff};
pub use render::RenderStyle;

/// Diff `left_text` against `right_text`.
///
/// Returns [`DiffOutcome::NoDifference`] when the texts have the same lines.
/// The returned diff renders with `color_enabled` through `Display`.
///
/// # Errors
///
/// Returns a structural [`PatchError`] if the pipeline breaks an invariant.
pub fn diff(
    left_text: &str,
    right_text: &str,
    left_label: &str,
    right_label: &str,
    context_width: usize,
    color_enabled: bool,
) -> PatchResult<DiffOutcome> {
    let options = DiffOptions::default()
        .with_labels(left_label, right_label)
        .with_context(context_width)
        .with_color(color_enabled);
    Differ::new(options).diff(left_text, right_text)
}
