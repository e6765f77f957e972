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

//! Threshold LCS solver.
//!
//! `thresh[k]` records the smallest right position ending an increasing
//! chain of `k` matched pairs found so far, which keeps the array sorted and
//! lets a binary search place each candidate match. See Hunt & Szymanski,
//! "A Fast Algorithm for Computing Longest Common Subsequences" (CACM 20(5),
//! 1977) and Kuo & Cross, "An Improved Algorithm to Find the Length of the
//! Longest Common Subsequence of Two Strings" (SIGIR Forum 23(3-4), 1989).
//!
//! Candidate lists are traversed in ascending right-position order. Two
//! guards keep a chain from ever linking two matches with the same left
//! position: a candidate is skipped unless it exceeds the pre-update value
//! of the slot last replaced in this row, and the best-chain table is
//! committed one slot behind the scan, so a predecessor lookup never sees a
//! node created for the current row. Slots located within one row strictly
//! increase, so one pending slot is enough.

use crate::diff::{vec_with_capacity, DiffError};
use crate::lines::{Line, LineComparator};
use crate::matches::MatchIndex;

/// Strategy for locating the threshold slot of each candidate match. Both
/// produce the same matched pairs; they differ only in how much of the
/// threshold array each binary search covers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LcsAlgorithm {
    /// Fresh binary search over the whole threshold array per candidate.
    HuntSzymanski,
    /// Binary search above a lower bound carried across the candidates of
    /// one left position. Slots located within a row only move up, so the
    /// carried bound is sound and shrinks the searched range.
    #[default]
    KuoCross,
}

/// Closes the matched-pair array; strictly greater than any real position in
/// both coordinates (no `Vec` holds `usize::MAX` elements), it exists only
/// so forward scans terminate without a bounds check.
const SCAN_SENTINEL: (usize, usize) = (usize::MAX, usize::MAX);

/// One matched pair plus the chain it extends. Nodes are immutable once
/// pushed and are only dropped with the whole arena, so predecessor indices
/// stay valid for the entire solver run.
#[derive(Clone, Copy, Debug)]
struct ChainNode {
    left_pos: usize,
    right_pos: usize,
    prev: Option<usize>,
}

#[derive(Debug, Default)]
struct ChainArena {
    nodes: Vec<ChainNode>,
}

impl ChainArena {
    fn push(
        &mut self,
        left_pos: usize,
        right_pos: usize,
        prev: Option<usize>,
    ) -> Result<usize, DiffError> {
        self.nodes.try_reserve(1)?;
        self.nodes.push(ChainNode {
            left_pos,
            right_pos,
            prev,
        });
        Ok(self.nodes.len() - 1)
    }

    fn get(&self, node_id: usize) -> ChainNode {
        self.nodes[node_id]
    }
}

/// Longest common subsequence of two line sequences, as 1-based matched
/// position pairs bracketed for downstream scanning.
#[derive(Clone, Debug)]
pub struct Lcs {
    /// `pairs[0]` is `(0, 0)`, `pairs[1..=len]` the matched pairs in
    /// increasing order, `pairs[len + 1]` is `(n + 1, m + 1)`, and
    /// `pairs[len + 2]` the scan sentinel.
    pairs: Vec<(usize, usize)>,
    len: usize,
}

impl Lcs {
    /// Computes the LCS of `left` and `right` under `comparator`.
    pub fn compute(
        left: &[Line],
        right: &[Line],
        comparator: &dyn LineComparator,
        algorithm: LcsAlgorithm,
    ) -> Result<Lcs, DiffError> {
        let index = MatchIndex::build(left, right, comparator)?;
        Lcs::from_match_index(&index, right.len(), algorithm)
    }

    /// Runs the threshold computation over a prebuilt match index.
    pub fn from_match_index(
        index: &MatchIndex,
        right_len: usize,
        algorithm: LcsAlgorithm,
    ) -> Result<Lcs, DiffError> {
        let left_len = index.left_len();

        let mut thresh: Vec<Option<usize>> = vec_with_capacity(left_len + 2)?;
        thresh.push(Some(0));
        thresh.resize(left_len + 2, None);
        // chains[k] = arena index of the node ending the best chain of
        // length k.
        let mut chains: Vec<Option<usize>> = vec_with_capacity(left_len + 2)?;
        chains.resize(left_len + 2, None);
        let mut arena = ChainArena::default();

        for i in 1..=left_len {
            let mut low = 0;
            // Pre-update value of the slot last replaced in this row; later
            // candidates at or below it cannot improve any slot.
            let mut stale = 0;
            // Deferred chains[] commit, one slot in flight per row.
            let mut pending_slot = 0;
            let mut pending_chain = chains[0];
            for &j in index.candidates(i) {
                if j <= stale {
                    continue;
                }
                let k = threshold_slot(&thresh, low, j);
                debug_assert!(thresh[k - 1].is_some_and(|t| t < j));
                debug_assert!(thresh[k].map_or(true, |t| j <= t));
                if algorithm == LcsAlgorithm::KuoCross {
                    low = k;
                }
                match thresh[k] {
                    Some(t) => {
                        stale = t;
                        if j < t {
                            thresh[k] = Some(j);
                            let prev = chains[k - 1];
                            chains[pending_slot] = pending_chain;
                            pending_slot = k;
                            pending_chain = Some(arena.push(i, j, prev)?);
                        }
                    }
                    None => {
                        // First chain of length k overall. No older chain of
                        // this length exists for later candidates in this
                        // row to extend, so the row is done.
                        thresh[k] = Some(j);
                        let prev = chains[k - 1];
                        chains[pending_slot] = pending_chain;
                        pending_slot = k;
                        pending_chain = Some(arena.push(i, j, prev)?);
                        break;
                    }
                }
            }
            chains[pending_slot] = pending_chain;
        }

        // The LCS length is the largest k with a recorded ending position.
        // The guard slot at left_len + 1 is never set, so the scan stays in
        // bounds.
        let mut len = 0;
        while thresh[len + 1].is_some() {
            len += 1;
        }

        // Recover the pairs back-to-front along predecessor links.
        let mut pairs = vec_with_capacity(len + 3)?;
        pairs.resize(len + 3, (0, 0));
        pairs[len + 1] = (left_len + 1, right_len + 1);
        pairs[len + 2] = SCAN_SENTINEL;
        let mut slot = len;
        let mut node = chains[len];
        while let Some(node_id) = node {
            let ChainNode {
                left_pos,
                right_pos,
                prev,
            } = arena.get(node_id);
            pairs[slot] = (left_pos, right_pos);
            slot -= 1;
            node = prev;
        }
        debug_assert_eq!(slot, 0);

        Ok(Lcs { pairs, len })
    }

    /// Number of real matched pairs.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the sequences have no lines in common.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The matched pairs in increasing order, without the brackets.
    pub fn matched_pairs(&self) -> &[(usize, usize)] {
        &self.pairs[1..=self.len]
    }

    /// Left position of slot `k` in the bracketed pair array.
    pub(crate) fn left(&self, k: usize) -> usize {
        self.pairs[k].0
    }

    /// Right position of slot `k` in the bracketed pair array.
    pub(crate) fn right(&self, k: usize) -> usize {
        self.pairs[k].1
    }
}

/// Smallest slot index `k >= low` with `thresh[k] >= j`, treating `None` as
/// infinity. `thresh` is sorted with all `None`s at the end, so this is a
/// plain binary search; the guard slot keeps it from falling off the array.
fn threshold_slot(thresh: &[Option<usize>], low: usize, j: usize) -> usize {
    let mut lo = low;
    let mut hi = thresh.len() - 1;
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        match thresh[mid] {
            Some(t) if t < j => lo = mid + 1,
            _ => hi = mid,
        }
    }
    lo
}

#[cfg(test)]
mod tests {
    use std::cmp::max;

    use rand::Rng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::lines::{split_lines, ExactComparator};

    const ALGORITHMS: [LcsAlgorithm; 2] = [LcsAlgorithm::HuntSzymanski, LcsAlgorithm::KuoCross];

    fn lcs_pairs(left: &[u8], right: &[u8], algorithm: LcsAlgorithm) -> Vec<(usize, usize)> {
        let left = split_lines(left);
        let right = split_lines(right);
        let lcs = Lcs::compute(&left, &right, &ExactComparator, algorithm).unwrap();
        lcs.matched_pairs().to_vec()
    }

    fn brute_force_lcs_len(left: &[Line], right: &[Line]) -> usize {
        let mut table = vec![vec![0; right.len() + 1]; left.len() + 1];
        for i in 1..=left.len() {
            for j in 1..=right.len() {
                table[i][j] = if left[i - 1].raw() == right[j - 1].raw() {
                    table[i - 1][j - 1] + 1
                } else {
                    max(table[i - 1][j], table[i][j - 1])
                };
            }
        }
        table[left.len()][right.len()]
    }

    #[test]
    fn test_empty_inputs() {
        for algorithm in ALGORITHMS {
            assert_eq!(lcs_pairs(b"", b"", algorithm), vec![]);
            assert_eq!(lcs_pairs(b"", b"a\n", algorithm), vec![]);
            assert_eq!(lcs_pairs(b"a\n", b"", algorithm), vec![]);
        }
    }

    #[test]
    fn test_bracketing_pairs() {
        let left = split_lines(b"a\nb\n");
        let right = split_lines(b"b\n");
        for algorithm in ALGORITHMS {
            let lcs = Lcs::compute(&left, &right, &ExactComparator, algorithm).unwrap();
            assert_eq!(lcs.len(), 1);
            assert_eq!(lcs.pairs, vec![(0, 0), (2, 1), (3, 2), SCAN_SENTINEL]);
        }
    }

    #[test]
    fn test_identical_inputs() {
        for algorithm in ALGORITHMS {
            assert_eq!(
                lcs_pairs(b"a\nb\nc\n", b"a\nb\nc\n", algorithm),
                vec![(1, 1), (2, 2), (3, 3)]
            );
        }
    }

    #[test]
    fn test_disjoint_inputs() {
        for algorithm in ALGORITHMS {
            assert_eq!(lcs_pairs(b"a\nb\n", b"c\nd\n", algorithm), vec![]);
        }
    }

    #[test]
    fn test_single_line_against_duplicates() {
        // A second candidate in the same row must not chain onto the first;
        // a naive ascending-order update would report length 2 here.
        for algorithm in ALGORITHMS {
            assert_eq!(lcs_pairs(b"x\n", b"x\nx\n", algorithm).len(), 1);
            assert_eq!(lcs_pairs(b"x\nx\n", b"x\n", algorithm).len(), 1);
        }
    }

    #[test]
    fn test_crossing_matches() {
        for algorithm in ALGORITHMS {
            // Only one of the two swapped lines can survive.
            assert_eq!(lcs_pairs(b"a\nb\n", b"b\na\n", algorithm).len(), 1);
            assert_eq!(
                lcs_pairs(b"a\nb\nc\nd\n", b"a\nc\nb\nd\n", algorithm).len(),
                3
            );
        }
    }

    #[test]
    fn test_pairs_strictly_increasing_and_matching() {
        let left = split_lines(b"a\nb\na\nc\nb\na\n");
        let right = split_lines(b"b\na\nb\nc\na\n");
        for algorithm in ALGORITHMS {
            let lcs = Lcs::compute(&left, &right, &ExactComparator, algorithm).unwrap();
            let pairs = lcs.matched_pairs();
            assert!(!pairs.is_empty());
            for window in pairs.windows(2) {
                assert!(window[0].0 < window[1].0, "{pairs:?}");
                assert!(window[0].1 < window[1].1, "{pairs:?}");
            }
            for &(i, j) in pairs {
                assert_eq!(left[i - 1].raw(), right[j - 1].raw());
            }
        }
    }

    fn random_lines<'a>(rng: &mut ChaCha8Rng, alphabet: &[Line<'a>], max_len: usize) -> Vec<Line<'a>> {
        let len = rng.gen_range(0..=max_len);
        (0..len)
            .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
            .collect()
    }

    #[test]
    fn test_length_matches_brute_force_on_random_inputs() {
        let alphabet: Vec<Line> = [b"a\n", b"b\n", b"c\n", b"d\n"]
            .iter()
            .map(|raw| Line::new(*raw))
            .collect();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..300 {
            let left = random_lines(&mut rng, &alphabet, 12);
            let right = random_lines(&mut rng, &alphabet, 12);
            let expected = brute_force_lcs_len(&left, &right);
            let mut per_algorithm = vec![];
            for algorithm in ALGORITHMS {
                let lcs = Lcs::compute(&left, &right, &ExactComparator, algorithm).unwrap();
                assert_eq!(lcs.len(), expected, "{algorithm:?} {left:?} vs {right:?}");
                for window in lcs.matched_pairs().windows(2) {
                    assert!(window[0].0 < window[1].0);
                    assert!(window[0].1 < window[1].1);
                }
                for &(i, j) in lcs.matched_pairs() {
                    assert_eq!(left[i - 1].raw(), right[j - 1].raw());
                }
                per_algorithm.push(lcs.matched_pairs().to_vec());
            }
            // Both strategies place candidates in the same slots, so they
            // must agree on the pairs, not just the length.
            assert_eq!(per_algorithm[0], per_algorithm[1]);
        }
    }
}
