//! Edit-script source using the `similar` crate.
//!
//! Folds the per-line changes of a Myers line diff into maximal runs, so
//! no two neighbouring hunks share a kind.

use similar::{Algorithm, ChangeTag, TextDiff};

use super::{Hunk, HunkKind};

impl From<ChangeTag> for HunkKind {
    fn from(tag: ChangeTag) -> Self {
        match tag {
            ChangeTag::Equal => Self::Equal,
            ChangeTag::Delete => Self::Delete,
            ChangeTag::Insert => Self::Insert,
        }
    }
}

/// Line-level edit script between `left` and `right`.
///
/// Concatenating the Equal and Delete bodies gives back `left`, the Equal
/// and Insert bodies give back `right`. Replaced lines come out as a Delete
/// run followed by an Insert run.
pub fn edit_script(left: &str, right: &str) -> Vec<Hunk> {
    let diff = TextDiff::configure()
        .algorithm(Algorithm::Myers)
        .diff_lines(left, right);

    let mut hunks: Vec<Hunk> = Vec::new();
    for change in diff.iter_all_changes() {
        let kind = HunkKind::from(change.tag());
        match hunks.last_mut() {
            Some(last) if last.kind == kind => last.body.push_str(change.value()),
            _ => hunks.push(Hunk::new(kind, change.value())),
        }
    }
    hunks
}
