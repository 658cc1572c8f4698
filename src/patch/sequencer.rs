//! Draft-patch sequencer.
//!
//! Single left-to-right walk over the edit script. A draft opens on the
//! first change after an Equal run (taking that run as leading context),
//! collects consecutive changes, and closes on the next Equal run (taking it
//! as trailing context). A run sitting between two changes therefore ends
//! up in both drafts, untrimmed.

use super::{DraftPatch, Hunk};
use crate::error::{PatchError, PatchResult};

enum Walk {
    /// Nothing seen yet.
    Start,
    /// Last hunk was Equal and no draft is open.
    Context(usize, Hunk),
    /// Last hunk was a change.
    Open(DraftPatch),
}

/// Group the edit script into draft patches.
///
/// # Errors
///
/// Returns [`PatchError::AdjacentEqual`] if two Equal runs follow each other.
pub fn sequence(hunks: Vec<Hunk>) -> PatchResult<Vec<DraftPatch>> {
    let mut drafts = Vec::new();
    let mut walk = Walk::Start;

    for (position, hunk) in hunks.into_iter().enumerate() {
        let changed = hunk.kind.is_change();
        walk = match (walk, changed) {
            (Walk::Start, true) => Walk::Open(DraftPatch::open(position, hunk)),
            (Walk::Start, false) => Walk::Context(position, hunk),
            (Walk::Context(at, context), true) => {
                let mut draft = DraftPatch::open(at, context);
                draft.push(hunk);
                Walk::Open(draft)
            }
            (Walk::Context(previous, _), false) => {
                return Err(PatchError::AdjacentEqual {
                    previous,
                    current: position,
                });
            }
            (Walk::Open(mut draft), true) => {
                draft.push(hunk);
                Walk::Open(draft)
            }
            (Walk::Open(mut draft), false) => {
                draft.push(hunk.clone());
                drafts.push(draft);
                Walk::Context(position, hunk)
            }
        };
    }

    if let Walk::Open(draft) = walk {
        drafts.push(draft);
    }
    Ok(drafts)
}
