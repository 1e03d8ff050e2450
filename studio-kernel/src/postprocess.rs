//! Cleanup applied to raw model output before it reaches a result field.

use serde_json::Value;
use studio_primitives::MAX_TITLES;
use tracing::{debug, warn};

/// How far before the CTA limit a sentence end may sit and still be used
/// as the cut point.
pub const CTA_LOOKBACK: usize = 50;

/// Parses a structured response as a JSON list of strings.
///
/// Returns `None` when `raw` is not JSON. A JSON value other than an array
/// yields an empty list. Non-string elements are rendered as JSON text.
#[must_use]
pub fn parse_string_list(raw: &str) -> Option<Vec<String>> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => Some(
            items
                .into_iter()
                .map(|item| match item {
                    Value::String(text) => text,
                    other => other.to_string(),
                })
                .collect(),
        ),
        Ok(_) => Some(Vec::new()),
        Err(_) => None,
    }
}

/// Extracts at most five titles.
///
/// Text that is not JSON is read one title per line, with a leading `- `
/// bullet removed.
#[must_use]
pub fn parse_titles(raw: &str) -> Vec<String> {
    if let Some(titles) = parse_string_list(raw) {
        return titles.into_iter().take(MAX_TITLES).collect();
    }

    warn!(raw, "titles response is not JSON, splitting on lines");
    raw.lines()
        .map(|line| line.strip_prefix("- ").unwrap_or(line).trim())
        .filter(|line| !line.is_empty())
        .take(MAX_TITLES)
        .map(str::to_owned)
        .collect()
}

/// Extracts tags, trimmed and without empties.
///
/// Text that is not JSON is split on commas.
#[must_use]
pub fn parse_tags(raw: &str) -> Vec<String> {
    let tags = parse_string_list(raw).unwrap_or_else(|| {
        warn!(raw, "tags response is not JSON, splitting on commas");
        raw.split(',').map(str::to_owned).collect()
    });

    tags.into_iter()
        .map(|tag| tag.trim().to_owned())
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// Keeps the longest prefix of `tags` whose combined length fits `limit`
/// characters.
#[must_use]
pub fn enforce_tag_budget(tags: Vec<String>, limit: usize) -> Vec<String> {
    let total = tags.len();
    let mut used = 0;
    let kept: Vec<String> = tags
        .into_iter()
        .take_while(|tag| {
            let len = tag.chars().count();
            if used + len <= limit {
                used += len;
                true
            } else {
                false
            }
        })
        .collect();

    if kept.len() < total {
        debug!(kept = kept.len(), dropped = total - kept.len(), limit, "tag budget enforced");
    }
    kept
}

/// Shortens a CTA longer than `max` characters.
///
/// Prefers ending after a period within the last [`CTA_LOOKBACK`]
/// characters of the limit, then before the last space, then a hard cut.
/// A sentence cut keeps its period and only considers periods strictly
/// before index `max`. The result is trimmed.
#[must_use]
pub fn truncate_cta(text: &str, max: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max {
        return text.to_owned();
    }

    let floor = max.saturating_sub(CTA_LOOKBACK);
    let sentence_end = chars[..max]
        .iter()
        .rposition(|ch| *ch == '.')
        .filter(|idx| *idx >= floor);

    let cut = if let Some(period) = sentence_end {
        period + 1
    } else if let Some(space) = chars[..=max].iter().rposition(|ch| *ch == ' ') {
        space
    } else {
        max
    };

    debug!(original = chars.len(), cut, max, "cta truncated");
    chars[..cut].iter().collect::<String>().trim().to_owned()
}
