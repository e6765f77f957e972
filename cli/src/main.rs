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

//! udiff: print a unified diff of two files.

use std::fs;
use std::io::{self, Read, Write};
use std::process::ExitCode;
use std::time::SystemTime;

use clap::Parser;
use thiserror::Error;
use udiff_lib::diff::{diff, DiffError, DiffOptions, DEFAULT_CONTEXT_LINES};
use udiff_lib::hunks::write_hunks;
use udiff_lib::lcs::LcsAlgorithm;
use udiff_lib::lines::{
    split_lines, ExactComparator, IgnoreAsciiCaseComparator, LineComparator,
};

mod time_util;

/// Compare two files line by line and print a unified diff
///
/// Exits with status 0 when the files are identical, 1 when they differ, and
/// 2 when something went wrong.
#[derive(clap::Parser, Clone, Debug)]
#[command(name = "udiff", version)]
struct UdiffArgs {
    /// First file to compare; `-` reads standard input
    file1: String,
    /// Second file to compare; `-` reads standard input
    file2: String,
    /// Lines of common context to show around each change
    #[arg(
        short = 'U',
        long = "unified",
        value_name = "NUM",
        default_value_t = DEFAULT_CONTEXT_LINES
    )]
    context: usize,
    /// LCS strategy to run
    #[arg(long, value_enum, default_value_t = AlgorithmArg::Kc)]
    algorithm: AlgorithmArg,
    /// Ignore ASCII case differences between lines
    #[arg(short = 'i', long)]
    ignore_case: bool,
}

/// Selectable solver strategies.
#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum AlgorithmArg {
    /// Hunt-Szymanski: fresh binary search per candidate match
    Hs,
    /// Kuo-Cross: search bound carried across each input line
    Kc,
}

impl From<AlgorithmArg> for LcsAlgorithm {
    fn from(arg: AlgorithmArg) -> LcsAlgorithm {
        match arg {
            AlgorithmArg::Hs => LcsAlgorithm::HuntSzymanski,
            AlgorithmArg::Kc => LcsAlgorithm::KuoCross,
        }
    }
}

#[derive(Debug, Error)]
enum CommandError {
    #[error("can't read {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error("only one input may be standard input")]
    BothStdin,
    #[error(transparent)]
    Diff(#[from] DiffError),
    #[error("error writing output: {0}")]
    Output(#[from] io::Error),
}

/// What a completed comparison found.
enum DiffOutcome {
    Same,
    Different,
}

/// Reads one input completely, along with the timestamp its header line
/// should carry: the file's mtime, or the current time for standard input.
fn read_input(path: &str) -> Result<(Vec<u8>, SystemTime), CommandError> {
    if path == "-" {
        let mut text = Vec::new();
        io::stdin()
            .lock()
            .read_to_end(&mut text)
            .map_err(|source| CommandError::Read {
                path: path.to_owned(),
                source,
            })?;
        Ok((text, SystemTime::now()))
    } else {
        let text = fs::read(path).map_err(|source| CommandError::Read {
            path: path.to_owned(),
            source,
        })?;
        let mtime = fs::metadata(path)
            .and_then(|metadata| metadata.modified())
            .map_err(|source| CommandError::Read {
                path: path.to_owned(),
                source,
            })?;
        Ok((text, mtime))
    }
}

fn run(args: &UdiffArgs) -> Result<DiffOutcome, CommandError> {
    if args.file1 == "-" && args.file2 == "-" {
        return Err(CommandError::BothStdin);
    }
    let (left_text, left_time) = read_input(&args.file1)?;
    let (right_text, right_time) = read_input(&args.file2)?;
    let left = split_lines(&left_text);
    let right = split_lines(&right_text);
    let comparator: &dyn LineComparator = if args.ignore_case {
        &IgnoreAsciiCaseComparator
    } else {
        &ExactComparator
    };
    let options = DiffOptions {
        context: args.context,
        algorithm: args.algorithm.into(),
    };
    let hunks = diff(&left, &right, comparator, &options)?;
    if hunks.is_empty() {
        return Ok(DiffOutcome::Same);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(
        out,
        "--- {}\t{}",
        args.file1,
        time_util::format_timestamp(left_time)
    )?;
    writeln!(
        out,
        "+++ {}\t{}",
        args.file2,
        time_util::format_timestamp(right_time)
    )?;
    write_hunks(&mut out, &hunks)?;
    out.flush()?;
    Ok(DiffOutcome::Different)
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(tracing::metadata::LevelFilter::ERROR.into())
                .from_env_lossy(),
        )
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let args = UdiffArgs::parse();
    match run(&args) {
        Ok(DiffOutcome::Same) => ExitCode::SUCCESS,
        Ok(DiffOutcome::Different) => ExitCode::from(1),
        Err(err) => {
            eprintln!("udiff: {err}");
            ExitCode::from(2)
        }
    }
}
