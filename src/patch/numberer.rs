//! Patch numberer / trimmer.
//!
//! Trims each merged patch's leading context to its last `context` lines and
//! trailing context to its first `context` lines, then computes the
//! `@@ -l,s +l,s @@` ranges.
//!
//! Line cursors advance by each patch's *untrimmed* side lengths. Because a
//! split Equal run is counted at the end of one patch and again at the start
//! of the next, every patch after the first subtracts its leading run before
//! computing its start.
//!
//! ```text
//! [Equal1, Delete1, Insert1, Equal2]
//!                           [Equal2, Insert2, Equal3]
//!                                            [Equal3, ...]
//! ```

use super::{left_len, right_len, DraftPatch, HunkKind, Patch};
use crate::error::{PatchError, PatchResult};

/// Trim and number merged patches.
///
/// # Errors
///
/// Returns [`PatchError::EmptyPatch`] for a patch without hunks and
/// [`PatchError::ContextOnlyPatch`] for one without any change.
pub fn number(patches: &[DraftPatch], context: usize) -> PatchResult<Vec<Patch>> {
    let mut left_cursor = 0usize;
    let mut right_cursor = 0usize;
    let mut numbered = Vec::with_capacity(patches.len());

    for (index, draft) in patches.iter().enumerate() {
        let hunks = draft.hunks();
        let (Some(head), Some(tail)) = (hunks.first(), hunks.last()) else {
            return Err(PatchError::EmptyPatch { index });
        };
        if !hunks.iter().any(|h| h.kind.is_change()) {
            return Err(PatchError::ContextOnlyPatch { index });
        }

        let mut trimmed = hunks.to_vec();

        let (mut left_start, mut right_start) = if head.kind == HunkKind::Equal {
            let n = head.line_count();
            if index > 0 {
                left_cursor = left_cursor.saturating_sub(n);
                right_cursor = right_cursor.saturating_sub(n);
            }
            let delta = (n + 1).saturating_sub(context);
            trimmed[0] = head.tail(context);
            (left_cursor + delta, right_cursor + delta)
        } else {
            (left_cursor, right_cursor)
        };

        if tail.kind == HunkKind::Equal {
            let last = trimmed.len() - 1;
            trimmed[last] = tail.head(context);
        }

        // Context trimmed to nothing (context width 0) is not reported.
        trimmed.retain(|h| h.kind.is_change() || !h.body.is_empty());

        // 0 means "no lines on this side", so a patch that starts at the top
        // of the file reports line 1 for every side it has content on.
        if left_start == 0 && right_start == 0 {
            if trimmed.iter().any(|h| h.kind.on_left()) {
                left_start = 1;
            }
            if trimmed.iter().any(|h| h.kind.on_right()) {
                right_start = 1;
            }
        }

        numbered.push(Patch {
            left_start,
            left_len: left_len(&trimmed),
            right_start,
            right_len: right_len(&trimmed),
            hunks: trimmed,
        });

        left_cursor += left_len(hunks);
        right_cursor += right_len(hunks);
    }

    Ok(numbered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patch::Hunk;

    fn ranges(patches: &[Patch]) -> Vec<(usize, usize, usize, usize)> {
        patches
            .iter()
            .map(|p| (p.left_start, p.left_len, p.right_start, p.right_len))
            .collect()
    }

    #[test]
    fn test_leading_context_trimmed() {
        let drafts = vec![DraftPatch::from_hunks(
            0,
            vec![Hunk::equal("1\n2\n3\n4\n5\n"), Hunk::delete("6\n")],
        )];

        let patches = number(&drafts, 3).expect("number");
        assert_eq!(ranges(&patches), vec![(3, 4, 3, 3)]);
        assert_eq!(patches[0].hunks[0], Hunk::equal("3\n4\n5\n"));
    }

    #[test]
    fn test_short_leading_context_starts_at_one() {
        let drafts = vec![DraftPatch::from_hunks(
            0,
            vec![Hunk::equal("1\n"), Hunk::insert("x\n"), Hunk::equal("2\n3\n4\n5\n")],
        )];

        let patches = number(&drafts, 3).expect("number");
        assert_eq!(ranges(&patches), vec![(1, 4, 1, 5)]);
        assert_eq!(patches[0].hunks[2], Hunk::equal("2\n3\n4\n"));
    }

    #[test]
    fn test_second_patch_subtracts_shared_run() {
        // left:  1 2 _ 4 5 6 7 8   (line 3 inserted on the right, 8 deleted)
        let shared = Hunk::equal("4\n5\n6\n7\n");
        let drafts = vec![
            DraftPatch::from_hunks(
                0,
                vec![Hunk::equal("1\n2\n"), Hunk::insert("3\n"), shared.clone()],
            ),
            DraftPatch::from_hunks(2, vec![shared, Hunk::delete("8\n")]),
        ];

        let patches = number(&drafts, 1).expect("number");
        assert_eq!(ranges(&patches), vec![(2, 2, 2, 3), (6, 2, 7, 1)]);
        assert_eq!(patches[1].hunks[0], Hunk::equal("7\n"));
    }

    #[test]
    fn test_pure_insert_into_empty_left() {
        let drafts = vec![DraftPatch::from_hunks(0, vec![Hunk::insert("a\nb\nc\n")])];
        let patches = number(&drafts, 3).expect("number");
        assert_eq!(ranges(&patches), vec![(0, 0, 1, 3)]);
    }

    #[test]
    fn test_pure_delete_of_whole_left() {
        let drafts = vec![DraftPatch::from_hunks(0, vec![Hunk::delete("a\nb\n")])];
        let patches = number(&drafts, 3).expect("number");
        assert_eq!(ranges(&patches), vec![(1, 2, 0, 0)]);
    }

    #[test]
    fn test_leading_insert_before_context() {
        let drafts = vec![DraftPatch::from_hunks(
            0,
            vec![Hunk::insert("0\n"), Hunk::equal("1\n2\n3\n")],
        )];
        let patches = number(&drafts, 3).expect("number");
        assert_eq!(ranges(&patches), vec![(1, 3, 1, 4)]);
    }

    #[test]
    fn test_zero_context_drops_trimmed_runs() {
        let drafts = vec![DraftPatch::from_hunks(
            0,
            vec![Hunk::equal("a\nb\n"), Hunk::delete("c\n"), Hunk::equal("d\n")],
        )];
        let patches = number(&drafts, 0).expect("number");
        assert_eq!(ranges(&patches), vec![(3, 1, 3, 0)]);
        assert_eq!(patches[0].hunks, vec![Hunk::delete("c\n")]);
    }

    #[test]
    fn test_input_is_not_modified() {
        let drafts = vec![DraftPatch::from_hunks(
            0,
            vec![Hunk::equal("1\n2\n3\n4\n"), Hunk::delete("5\n")],
        )];
        let before = drafts.clone();
        number(&drafts, 1).expect("number");
        assert_eq!(drafts, before);
    }

    #[test]
    fn test_empty_patch_is_fatal() {
        let drafts = vec![DraftPatch::from_hunks(0, Vec::new())];
        assert!(matches!(
            number(&drafts, 3),
            Err(PatchError::EmptyPatch { index: 0 })
        ));
    }

    #[test]
    fn test_context_only_patch_is_fatal() {
        let drafts = vec![
            DraftPatch::from_hunks(0, vec![Hunk::delete("a\n")]),
            DraftPatch::from_hunks(1, vec![Hunk::equal("b\n")]),
        ];
        assert!(matches!(
            number(&drafts, 3),
            Err(PatchError::ContextOnlyPatch { index: 1 })
        ));
    }
}
