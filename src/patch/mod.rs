//! Edit script to unified-diff patches.
//!
//! The pipeline mirrors how `diff --unified` reports changes. Every stage
//! reads its input and returns fresh values, so a hunk is never shared
//! mutably between two patches.
//!
//! # Stages
//!
//! 1. [`script::edit_script`] — Myers line diff folded into maximal runs
//! 2. [`sequencer::sequence`] — group runs into draft patches with full
//!    leading/trailing context
//! 3. [`merger::merge`] — fuse drafts whose connecting context fits in
//!    twice the context width
//! 4. [`numberer::number`] — trim context, compute 1-based ranges
//!
//! Rendering lives in [`crate::render`].

pub mod merger;
pub mod numberer;
pub mod script;
pub mod sequencer;

use serde::Serialize;

use crate::config::DiffOptions;
use crate::diagnostics::{Diagnostics, StageEvent, TracingDiagnostics};
use crate::error::{PatchResult, Stage};
use crate::render::{self, RenderStyle};

/// Classification of a run of lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HunkKind {
    Equal,
    Delete,
    Insert,
}

impl HunkKind {
    /// Line prefix in unified-diff output.
    pub const fn prefix(self) -> char {
        match self {
            Self::Equal => ' ',
            Self::Delete => '-',
            Self::Insert => '+',
        }
    }

    pub const fn is_change(self) -> bool {
        !matches!(self, Self::Equal)
    }

    /// Whether lines of this kind exist in the left text.
    pub const fn on_left(self) -> bool {
        matches!(self, Self::Equal | Self::Delete)
    }

    /// Whether lines of this kind exist in the right text.
    pub const fn on_right(self) -> bool {
        matches!(self, Self::Equal | Self::Insert)
    }

    const fn initial(self) -> char {
        match self {
            Self::Equal => 'E',
            Self::Delete => 'D',
            Self::Insert => 'I',
        }
    }
}

/// A contiguous run of lines sharing one classification.
///
/// `body` keeps each line's `\n`; only the last line of a whole input may
/// lack one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hunk {
    pub kind: HunkKind,
    pub body: String,
}

impl Hunk {
    pub fn new(kind: HunkKind, body: impl Into<String>) -> Self {
        Self {
            kind,
            body: body.into(),
        }
    }

    pub fn equal(body: impl Into<String>) -> Self {
        Self::new(HunkKind::Equal, body)
    }

    pub fn delete(body: impl Into<String>) -> Self {
        Self::new(HunkKind::Delete, body)
    }

    pub fn insert(body: impl Into<String>) -> Self {
        Self::new(HunkKind::Insert, body)
    }

    /// Lines of the body, each with its terminator if it has one.
    pub fn lines(&self) -> std::str::SplitInclusive<'_, char> {
        self.body.split_inclusive('\n')
    }

    /// Number of lines; an unterminated final line still counts.
    pub fn line_count(&self) -> usize {
        self.lines().count()
    }

    /// Copy holding only the first `n` lines.
    #[must_use]
    pub fn head(&self, n: usize) -> Self {
        let end: usize = self.lines().take(n).map(str::len).sum();
        Self::new(self.kind, &self.body[..end])
    }

    /// Copy holding only the last `n` lines.
    #[must_use]
    pub fn tail(&self, n: usize) -> Self {
        let skip = self.line_count().saturating_sub(n);
        let start: usize = self.lines().take(skip).map(str::len).sum();
        Self::new(self.kind, &self.body[start..])
    }
}

/// Lines spanned on the left side (Equal + Delete).
pub fn left_len(hunks: &[Hunk]) -> usize {
    hunks
        .iter()
        .filter(|h| h.kind.on_left())
        .map(Hunk::line_count)
        .sum()
}

/// Lines spanned on the right side (Equal + Insert).
pub fn right_len(hunks: &[Hunk]) -> usize {
    hunks
        .iter()
        .filter(|h| h.kind.on_right())
        .map(Hunk::line_count)
        .sum()
}

/// Compact shape of a hunk list, e.g. `E3D1I1`.
pub fn shape(hunks: &[Hunk]) -> String {
    hunks
        .iter()
        .map(|h| format!("{}{}", h.kind.initial(), h.line_count()))
        .collect()
}

/// A patch before trimming and numbering.
///
/// Hunks are a contiguous slice of the edit script starting at `position`,
/// which is what the merger uses to confirm two drafts share a hunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftPatch {
    position: usize,
    hunks: Vec<Hunk>,
}

impl DraftPatch {
    pub const fn from_hunks(position: usize, hunks: Vec<Hunk>) -> Self {
        Self { position, hunks }
    }

    pub(crate) fn open(position: usize, first: Hunk) -> Self {
        Self::from_hunks(position, vec![first])
    }

    pub(crate) fn push(&mut self, hunk: Hunk) {
        self.hunks.push(hunk);
    }

    /// Append `next` minus its leading hunk, which duplicates our trailing one.
    #[must_use]
    pub(crate) fn join(mut self, next: Self) -> Self {
        self.hunks.extend(next.hunks.into_iter().skip(1));
        self
    }

    /// Script position of the first hunk.
    pub const fn first_position(&self) -> usize {
        self.position
    }

    /// Script position of the last hunk.
    pub fn last_position(&self) -> usize {
        self.position + self.hunks.len().saturating_sub(1)
    }

    pub fn hunks(&self) -> &[Hunk] {
        &self.hunks
    }

    pub fn head(&self) -> Option<&Hunk> {
        self.hunks.first()
    }

    pub fn tail(&self) -> Option<&Hunk> {
        self.hunks.last()
    }
}

/// One reportable change region with its unified-diff range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Patch {
    /// 1-based first left line, 0 when the left side is empty here.
    pub left_start: usize,
    pub left_len: usize,
    /// 1-based first right line, 0 when the right side is empty here.
    pub right_start: usize,
    pub right_len: usize,
    pub hunks: Vec<Hunk>,
}

impl Patch {
    /// The `@@ -l,s +l,s @@` range line without trailing newline.
    pub fn range_header(&self) -> String {
        format!(
            "@@ -{},{} +{},{} @@",
            self.left_start, self.left_len, self.right_start, self.right_len
        )
    }
}

/// Patches between two labelled texts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedDiff {
    pub left_label: String,
    pub right_label: String,
    pub patches: Vec<Patch>,
    /// How [`Display`](std::fmt::Display) renders this diff.
    #[serde(skip)]
    pub style: RenderStyle,
}

impl std::fmt::Display for UnifiedDiff {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&render::render(self, self.style))
    }
}

/// Result of a diff invocation. Identical inputs are not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffOutcome {
    Changed(UnifiedDiff),
    NoDifference,
}

impl DiffOutcome {
    pub const fn is_no_difference(&self) -> bool {
        matches!(self, Self::NoDifference)
    }

    pub const fn as_diff(&self) -> Option<&UnifiedDiff> {
        match self {
            Self::Changed(diff) => Some(diff),
            Self::NoDifference => None,
        }
    }

    pub fn into_diff(self) -> Option<UnifiedDiff> {
        match self {
            Self::Changed(diff) => Some(diff),
            Self::NoDifference => None,
        }
    }
}

/// Runs the pipeline with fixed options and a diagnostics sink.
#[derive(Debug, Clone)]
pub struct Differ<D = TracingDiagnostics> {
    options: DiffOptions,
    diagnostics: D,
}

impl Differ {
    pub const fn new(options: DiffOptions) -> Self {
        Self {
            options,
            diagnostics: TracingDiagnostics,
        }
    }
}

impl Default for Differ {
    fn default() -> Self {
        Self::new(DiffOptions::default())
    }
}

impl<D: Diagnostics> Differ<D> {
    /// Replace the diagnostics sink.
    pub fn with_diagnostics<E: Diagnostics>(self, diagnostics: E) -> Differ<E> {
        Differ {
            options: self.options,
            diagnostics,
        }
    }

    pub const fn options(&self) -> &DiffOptions {
        &self.options
    }

    /// Diff two texts line by line.
    ///
    /// # Errors
    ///
    /// Returns a structural [`PatchError`](crate::PatchError) if a stage
    /// receives input that breaks its contract.
    pub fn diff(&self, left: &str, right: &str) -> PatchResult<DiffOutcome> {
        if left == right {
            return Ok(DiffOutcome::NoDifference);
        }

        let hunks = script::edit_script(left, right);
        if hunks.iter().all(|h| !h.kind.is_change()) {
            return Ok(DiffOutcome::NoDifference);
        }
        self.report(Stage::Script, hunks.len(), shape(&hunks));

        let context = self.options.context;

        let drafts = sequencer::sequence(hunks)?;
        self.report(Stage::Sequence, drafts.len(), drafts_shape(&drafts));

        let merged = merger::merge(drafts, context)?;
        self.report(Stage::Merge, merged.len(), drafts_shape(&merged));

        let patches = numberer::number(&merged, context)?;
        self.report(
            Stage::Number,
            patches.len(),
            patches
                .iter()
                .map(|p| shape(&p.hunks))
                .collect::<Vec<_>>()
                .join(","),
        );

        Ok(DiffOutcome::Changed(UnifiedDiff {
            left_label: self.options.left_label.clone(),
            right_label: self.options.right_label.clone(),
            patches,
            style: RenderStyle::from(&self.options),
        }))
    }

    /// Rendered unified diff, empty when the texts do not differ.
    ///
    /// # Errors
    ///
    /// Same as [`Differ::diff`].
    pub fn diff_text(&self, left: &str, right: &str) -> PatchResult<String> {
        Ok(match self.diff(left, right)? {
            DiffOutcome::Changed(diff) => diff.to_string(),
            DiffOutcome::NoDifference => String::new(),
        })
    }

    fn report(&self, stage: Stage, len: usize, shape: String) {
        self.diagnostics.record(&StageEvent { stage, len, shape });
    }
}

fn drafts_shape(drafts: &[DraftPatch]) -> String {
    drafts
        .iter()
        .map(|d| shape(d.hunks()))
        .collect::<Vec<_>>()
        .join(",")
}
