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

//! Candidate-match index: for each left position, the right positions with
//! equal content.

use crate::diff::{vec_with_capacity, DiffError};
use crate::lines::{Line, LineComparator};

/// Maps each position in the left sequence to the list of positions in the
/// right sequence holding equal content. Positions are 1-based, like the
/// matched pairs the solver produces from them.
///
/// All left positions with the same content share one canonical list in the
/// pool. The solver looks lists up by left position, and every position of a
/// duplicated line must observe the same complete list of right-side
/// candidates, so the sharing is required for correctness.
///
/// Each list holds strictly increasing right positions. The solver's row
/// discipline is only sound for ascending candidate order, so this is an
/// invariant of the structure, not a detail of its construction.
#[derive(Clone, Debug)]
pub struct MatchIndex {
    /// Pool of distinct candidate lists, one per shared content value.
    lists: Vec<Vec<usize>>,
    /// For each left position `i` (at index `i - 1`), the pool id of its
    /// list, if the content occurs on the right at all.
    list_by_pos: Vec<Option<usize>>,
}

impl MatchIndex {
    /// Builds the index by sorting both sides by (content, position) and
    /// merge-scanning the sorted orders. Runs of equal content are linked
    /// once: the right-side run becomes one pool list, and every left
    /// position of the run points at it.
    ///
    /// Cost is O((n+m) log(n+m)) for the sorts plus a linear merge.
    pub fn build(
        left: &[Line],
        right: &[Line],
        comparator: &dyn LineComparator,
    ) -> Result<Self, DiffError> {
        // 1-based positions in content order. The position tie-break is
        // ascending, which is what makes the pool lists ascending below.
        fn sorted_positions(
            lines: &[Line],
            comparator: &dyn LineComparator,
        ) -> Result<Vec<usize>, DiffError> {
            let mut order = vec_with_capacity(lines.len())?;
            order.extend(1..=lines.len());
            order.sort_by(|&x, &y| {
                comparator
                    .cmp_lines(lines[x - 1].raw(), lines[y - 1].raw())
                    .then(x.cmp(&y))
            });
            Ok(order)
        }
        let left_order = sorted_positions(left, comparator)?;
        let right_order = sorted_positions(right, comparator)?;

        let mut lists = vec![];
        let mut list_by_pos = vec_with_capacity(left.len())?;
        list_by_pos.resize(left.len(), None);

        let mut ai = 0;
        let mut bi = 0;
        while ai < left_order.len() && bi < right_order.len() {
            let left_line = left[left_order[ai] - 1].raw();
            let right_line = right[right_order[bi] - 1].raw();
            match comparator.cmp_lines(left_line, right_line) {
                std::cmp::Ordering::Less => ai += 1,
                std::cmp::Ordering::Greater => bi += 1,
                std::cmp::Ordering::Equal => {
                    // Collect the right-side run of this content. The run is
                    // ascending because the sort broke ties by position.
                    let mut candidates = vec![];
                    while bi < right_order.len()
                        && comparator.eq_lines(right[right_order[bi] - 1].raw(), left_line)
                    {
                        candidates.push(right_order[bi]);
                        bi += 1;
                    }
                    let list_id = lists.len();
                    lists.push(candidates);
                    // Attach the same list to every left position of the run.
                    list_by_pos[left_order[ai] - 1] = Some(list_id);
                    ai += 1;
                    while ai < left_order.len()
                        && comparator.eq_lines(left[left_order[ai] - 1].raw(), left_line)
                    {
                        list_by_pos[left_order[ai] - 1] = Some(list_id);
                        ai += 1;
                    }
                }
            }
        }

        Ok(MatchIndex { lists, list_by_pos })
    }

    /// The right positions matching left position `i` (1-based), in strictly
    /// increasing order. Empty if the content never occurs on the right.
    pub fn candidates(&self, i: usize) -> &[usize] {
        match self.list_by_pos[i - 1] {
            Some(list_id) => &self.lists[list_id],
            None => &[],
        }
    }

    /// Number of left positions covered by the index.
    pub fn left_len(&self) -> usize {
        self.list_by_pos.len()
    }
}
