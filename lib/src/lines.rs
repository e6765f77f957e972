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

//! Line tokens and the comparison seam between them.

use std::cmp::Ordering;
use std::fmt::{Debug, Formatter};

use bstr::ByteSlice;
use itertools::Itertools;

/// One line of input, borrowing the raw bytes including the trailing newline
/// if the line had one. Keeping the terminator inside the token means a final
/// line without a newline never compares equal to a terminated copy of the
/// same text, and rendered output reproduces the input bytes exactly.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Line<'input> {
    raw: &'input [u8],
}

impl<'input> Line<'input> {
    /// Wraps one line worth of raw bytes.
    pub fn new(raw: &'input [u8]) -> Self {
        Line { raw }
    }

    /// The line's bytes, terminator included.
    pub fn raw(&self) -> &'input [u8] {
        self.raw
    }

    /// The line's bytes with the trailing newline (if any) removed.
    pub fn content(&self) -> &'input [u8] {
        self.raw.strip_suffix(b"\n").unwrap_or(self.raw)
    }

    /// Whether the line ended with a newline in the input.
    pub fn has_newline(&self) -> bool {
        self.raw.last() == Some(&b'\n')
    }
}

impl Debug for Line<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        f.debug_tuple("Line").field(&self.raw.as_bstr()).finish()
    }
}

/// Splits `text` into lines, each including its `\n` terminator. Text after
/// the last newline becomes a final, unterminated line. Embedded NUL bytes
/// are ordinary content.
pub fn split_lines(text: &[u8]) -> Vec<Line<'_>> {
    text.split_inclusive(|b| *b == b'\n')
        .map(Line::new)
        .collect_vec()
}

/// Total equality and ordering over line content.
///
/// The diff core only needs *some* total order that is consistent with the
/// equality it implies; the concrete policy (case folding, whitespace
/// handling) is pluggable here. Comparators see the raw bytes, terminator
/// included.
pub trait LineComparator {
    /// Compares two lines' raw bytes.
    fn cmp_lines(&self, left: &[u8], right: &[u8]) -> Ordering;

    /// Whether two lines compare equal.
    fn eq_lines(&self, left: &[u8], right: &[u8]) -> bool {
        self.cmp_lines(left, right) == Ordering::Equal
    }
}

/// Exact byte-for-byte comparison. The default policy.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExactComparator;

impl LineComparator for ExactComparator {
    fn cmp_lines(&self, left: &[u8], right: &[u8]) -> Ordering {
        left.cmp(right)
    }

    fn eq_lines(&self, left: &[u8], right: &[u8]) -> bool {
        left == right
    }
}

/// Comparison that ignores ASCII case differences.
#[derive(Clone, Copy, Debug, Default)]
pub struct IgnoreAsciiCaseComparator;

impl LineComparator for IgnoreAsciiCaseComparator {
    fn cmp_lines(&self, left: &[u8], right: &[u8]) -> Ordering {
        let folded = |b: &u8| b.to_ascii_lowercase();
        left.iter().map(folded).cmp(right.iter().map(folded))
    }
}
