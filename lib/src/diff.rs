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

//! Top-level diff driver tying the pipeline together: line sequences are
//! indexed, the threshold LCS is solved, and the sparse matches are grouped
//! into context-bounded unified hunks.

use std::collections::TryReserveError;

use thiserror::Error;
use tracing::instrument;

use crate::hunks::{self, UnifiedHunk};
use crate::lcs::{Lcs, LcsAlgorithm};
use crate::lines::{Line, LineComparator};

/// Number of context lines shown around each change when the caller doesn't
/// ask for something else.
pub const DEFAULT_CONTEXT_LINES: usize = 3;

/// Error from the diff core.
///
/// The only failure mode is resource exhaustion while building the
/// per-invocation structures; it is reported once, to the caller, and the
/// computation is not retried (it is deterministic, so retrying changes
/// nothing).
#[derive(Debug, Error)]
pub enum DiffError {
    /// An internal allocation could not be satisfied.
    #[error("ran out of memory while computing the diff")]
    Capacity(#[from] TryReserveError),
}

/// Allocates a `Vec` for `len` elements, surfacing allocation failure
/// instead of aborting.
pub(crate) fn vec_with_capacity<T>(len: usize) -> Result<Vec<T>, DiffError> {
    let mut vec = Vec::new();
    vec.try_reserve_exact(len)?;
    Ok(vec)
}

/// Options controlling a diff invocation.
#[derive(Clone, Copy, Debug)]
pub struct DiffOptions {
    /// Lines of common context around each change.
    pub context: usize,
    /// Which threshold-LCS strategy to run.
    pub algorithm: LcsAlgorithm,
}

impl Default for DiffOptions {
    fn default() -> Self {
        DiffOptions {
            context: DEFAULT_CONTEXT_LINES,
            algorithm: LcsAlgorithm::default(),
        }
    }
}

/// Diffs two line sequences and returns the unified hunks, in order. An
/// empty result means the sequences are line-for-line identical under
/// `comparator`.
///
/// All intermediate state (match index, threshold array, chain arena) is
/// allocated fresh for this call and dropped before it returns; only the
/// hunks, which borrow the input lines, survive.
#[instrument(skip_all)]
pub fn diff<'input>(
    left: &[Line<'input>],
    right: &[Line<'input>],
    comparator: &dyn LineComparator,
    options: &DiffOptions,
) -> Result<Vec<UnifiedHunk<'input>>, DiffError> {
    let lcs = Lcs::compute(left, right, comparator, options.algorithm)?;
    tracing::debug!(
        left_lines = left.len(),
        right_lines = right.len(),
        common_lines = lcs.len(),
        "computed line lcs"
    );
    Ok(hunks::unified_hunks(&lcs, left, right, options.context))
}
