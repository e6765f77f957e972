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

//! Header timestamp formatting.

use std::time::SystemTime;

use chrono::{DateTime, Local};

/// Formats a file timestamp the way unified diff headers expect: local
/// time as `YYYY-MM-DD HH:MM:SS ±HHMM`.
pub fn format_timestamp(time: SystemTime) -> String {
    let time: DateTime<Local> = time.into();
    time.format("%Y-%m-%d %H:%M:%S %z").to_string()
}
