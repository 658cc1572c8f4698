//! Patch merger.
//!
//! Two neighbouring drafts share the Equal run between them. When that run
//! has at most `2 * context` lines, trimming would show all of it anyway,
//! so the drafts are reported as one patch.

use super::{DraftPatch, HunkKind};
use crate::error::{PatchError, PatchResult};

/// Fuse drafts whose connecting Equal run fits in twice the context width.
///
/// # Errors
///
/// Returns [`PatchError::DetachedPatch`] if a draft does not start on the
/// hunk the previous one ends with, and [`PatchError::ConnectorNotEqual`] if
/// that shared hunk is not an Equal run.
pub fn merge(drafts: Vec<DraftPatch>, context: usize) -> PatchResult<Vec<DraftPatch>> {
    let threshold = context.saturating_mul(2);
    let mut merged = Vec::with_capacity(drafts.len());
    let mut drafts = drafts.into_iter().enumerate();

    let Some((_, mut current)) = drafts.next() else {
        return Ok(merged);
    };

    for (index, next) in drafts {
        let expected = current.last_position();
        let found = next.first_position();
        if expected != found {
            return Err(PatchError::DetachedPatch {
                index,
                expected,
                found,
            });
        }

        let connector = match next.head() {
            Some(hunk) if hunk.kind == HunkKind::Equal => hunk,
            _ => {
                return Err(PatchError::ConnectorNotEqual {
                    index,
                    position: found,
                });
            }
        };

        if connector.line_count() > threshold {
            merged.push(std::mem::replace(&mut current, next));
        } else {
            current = current.join(next);
        }
    }

    merged.push(current);
    Ok(merged)
}
