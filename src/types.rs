// src/types.rs

use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

/// What the poll loop does with a cycle whose job query failed.
///
/// - `Skip`: keep the previous snapshot, do not diff this cycle, and mark the
///   dashboard stale (default behaviour).
/// - `Empty`: treat the failure as an empty queue. Every job that was running
///   is then reported completed, which is what a bare `squeue` wrapper does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryFailurePolicy {
    #[default]
    Skip,
    Empty,
}

impl FromStr for QueryFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "skip" => Ok(QueryFailurePolicy::Skip),
            "empty" => Ok(QueryFailurePolicy::Empty),
            other => Err(format!(
                "invalid on_query_failure: {other} (expected \"skip\" or \"empty\")"
            )),
        }
    }
}

/// Parse a duration string such as `"30s"`, `"500ms"`, `"2m"` or `"1h"`.
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty duration string".to_string());
    }

    let idx = s
        .chars()
        .position(|c| !c.is_ascii_digit())
        .ok_or_else(|| format!("duration '{s}' is missing a unit suffix"))?;

    let (num_part, unit_part) = s.split_at(idx);
    let value: u64 = num_part
        .parse()
        .map_err(|e| format!("invalid duration number '{}': {}", num_part, e))?;
    let unit = unit_part.trim().to_lowercase();

    match unit.as_str() {
        "ms" => Ok(Duration::from_millis(value)),
        "s" => Ok(Duration::from_secs(value)),
        "m" => Ok(Duration::from_secs(value * 60)),
        "h" => Ok(Duration::from_secs(value * 60 * 60)),
        _ => Err(format!(
            "unsupported duration unit '{}'; expected ms, s, m, or h",
            unit
        )),
    }
}
