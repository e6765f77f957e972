// Copyright 2026 The Udiff Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Turns sparse matched pairs into contiguous, context-bounded unified
//! hunks.

use std::cmp::min;
use std::io::{self, Write};

use crate::lcs::Lcs;
use crate::lines::Line;

/// Whether slot `k` opens a gap: the matched pair is not adjacent to its
/// predecessor in at least one of the files. The scan-terminator slot is
/// always a change point, which is what bounds the scans below.
fn is_change_point(lcs: &Lcs, k: usize) -> bool {
    lcs.left(k - 1) + 1 != lcs.left(k) || lcs.right(k - 1) + 1 != lcs.right(k)
}

/// A change point and the stretch of matched pairs crossed to reach it.
struct ChangePoint {
    /// Slot index in the bracketed pair array.
    slot: usize,
    /// Matched pairs passed since the previous change point. Meaningless
    /// for the first change point of a scan.
    common_run: usize,
}

/// Forward-only, non-restartable scan over the bracketed pair array,
/// yielding each change point up to (not including) the terminator slot.
struct ChangePoints<'a> {
    lcs: &'a Lcs,
    pos: usize,
}

impl Iterator for ChangePoints<'_> {
    type Item = ChangePoint;

    fn next(&mut self) -> Option<ChangePoint> {
        let terminal = self.lcs.len() + 2;
        if self.pos >= terminal {
            return None;
        }
        let start = self.pos;
        let mut slot = self.pos + 1;
        while !is_change_point(self.lcs, slot) {
            slot += 1;
        }
        self.pos = slot;
        if slot == terminal {
            return None;
        }
        Some(ChangePoint {
            slot,
            common_run: slot - start,
        })
    }
}

/// The role of one rendered line within a hunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiffLineType {
    /// Shared line emitted with a leading space.
    Context,
    /// Left-only line emitted with a leading `-`.
    Removed,
    /// Right-only line emitted with a leading `+`.
    Added,
}

/// One contiguous run of changes plus surrounding context, addressed in
/// both files.
#[derive(Clone, Debug)]
pub struct UnifiedHunk<'input> {
    /// 1-based first line covered in the left file, already following the
    /// unified convention of naming the preceding line when the range is
    /// empty.
    pub left_start: usize,
    /// Left lines covered.
    pub left_count: usize,
    /// 1-based first line covered in the right file, adjusted like
    /// `left_start`.
    pub right_start: usize,
    /// Right lines covered.
    pub right_count: usize,
    /// Body in output order: per change segment all removed lines, then all
    /// added lines, with shared context lines between segments.
    pub lines: Vec<(DiffLineType, Line<'input>)>,
}

/// Groups change points into hunks. A gap of at most `2 * context` matched
/// pairs folds into the running hunk (the shared lines appear once, as
/// interior context); a wider gap closes it.
pub fn unified_hunks<'input>(
    lcs: &Lcs,
    left: &[Line<'input>],
    right: &[Line<'input>],
    context: usize,
) -> Vec<UnifiedHunk<'input>> {
    let mut hunks = vec![];
    let mut points = ChangePoints { lcs, pos: 0 }.peekable();
    while let Some(first) = points.next() {
        let mut last = first.slot;
        while let Some(next) = points.peek() {
            if next.common_run > context.saturating_mul(2) {
                break;
            }
            last = next.slot;
            points.next();
        }
        hunks.push(build_hunk(lcs, left, right, first.slot, last, context));
    }
    hunks
}

/// Renders one hunk spanning change slots `first..=last`, extended by up to
/// `context` matched pairs on each side, clamped to the bracketing pairs.
fn build_hunk<'input>(
    lcs: &Lcs,
    left: &[Line<'input>],
    right: &[Line<'input>],
    first: usize,
    last: usize,
    context: usize,
) -> UnifiedHunk<'input> {
    let begin = (first - 1).saturating_sub(context);
    let limit = min(last.saturating_add(context), lcs.len() + 1);
    let mut left_start = lcs.left(begin) + 1;
    let mut right_start = lcs.right(begin) + 1;
    let left_count = lcs.left(limit) - left_start;
    let right_count = lcs.right(limit) - right_start;
    // An empty range addresses the line before the hunk, like `diff -U`.
    // patch(1) relies on this.
    if left_count == 0 {
        left_start -= 1;
    }
    if right_count == 0 {
        right_start -= 1;
    }

    let mut lines = vec![];
    for slot in begin + 1..=limit {
        if is_change_point(lcs, slot) {
            for n in lcs.left(slot - 1) + 1..lcs.left(slot) {
                lines.push((DiffLineType::Removed, left[n - 1]));
            }
            for n in lcs.right(slot - 1) + 1..lcs.right(slot) {
                lines.push((DiffLineType::Added, right[n - 1]));
            }
        }
        if slot < limit {
            lines.push((DiffLineType::Context, left[lcs.left(slot) - 1]));
        }
    }

    UnifiedHunk {
        left_start,
        left_count,
        right_start,
        right_count,
        lines,
    }
}

/// Writes the hunks as unified diff text: `@@` headers followed by
/// `-`/`+`/` ` body lines. A body line with no trailing newline is followed
/// by the conventional `\ No newline at end of file` marker.
pub fn write_hunks(out: &mut dyn Write, hunks: &[UnifiedHunk]) -> io::Result<()> {
    for hunk in hunks {
        write!(out, "@@ -")?;
        write_file_range(out, hunk.left_start, hunk.left_count)?;
        write!(out, " +")?;
        write_file_range(out, hunk.right_start, hunk.right_count)?;
        writeln!(out, " @@")?;
        for (line_type, line) in &hunk.lines {
            let sigil = match line_type {
                DiffLineType::Context => " ",
                DiffLineType::Removed => "-",
                DiffLineType::Added => "+",
            };
            write!(out, "{sigil}")?;
            out.write_all(line.raw())?;
            if !line.has_newline() {
                write!(out, "\n\\ No newline at end of file\n")?;
            }
        }
    }
    Ok(())
}

/// `start[,count]`, eliding the count when it is exactly one.
fn write_file_range(out: &mut dyn Write, start: usize, count: usize) -> io::Result<()> {
    if count == 1 {
        write!(out, "{start}")
    } else {
        write!(out, "{start},{count}")
    }
}
