// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Display rendering for execution timestamps.

use chrono::{DateTime, Local, TimeDelta};

/// Render a wall-clock timestamp as `2017-09-29 22:03:48.083128`.
pub fn format_timestamp(t: &DateTime<Local>) -> String {
    t.format("%Y-%m-%d %H:%M:%S%.6f").to_string()
}

/// Render an elapsed interval as `0:00:00.001529`.
///
/// Hours are unpadded, minutes and seconds two-digit, and the microsecond
/// part is omitted when zero. Intervals of a day or more gain a day prefix
/// (`1 day, 2:03:04`). Negative intervals clamp to zero.
pub fn format_delta(delta: TimeDelta) -> String {
    let total_micros = delta.num_microseconds().unwrap_or(0).max(0);
    let micros = total_micros % 1_000_000;
    let total_secs = total_micros / 1_000_000;
    let secs = total_secs % 60;
    let mins = (total_secs / 60) % 60;
    let hours = (total_secs / 3600) % 24;
    let days = total_secs / 86_400;

    let mut out = String::new();
    if days == 1 {
        out.push_str("1 day, ");
    } else if days > 1 {
        out.push_str(&format!("{days} days, "));
    }
    out.push_str(&format!("{hours}:{mins:02}:{secs:02}"));
    if micros != 0 {
        out.push_str(&format!(".{micros:06}"));
    }
    out
}

#[cfg(test)]
#[path = "time_fmt_tests.rs"]
mod tests;
