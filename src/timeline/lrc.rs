//! Timed-lyric (`[MM:SS.ff]text`) document parsing.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

// ASCII digits only; `\d` would also accept other Unicode decimal digits.
static TIME_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[([0-9]{2}):([0-9]{2})\.([0-9]{2,3})\]").expect("timestamp tag pattern")
});

/// One timed lyric line.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LyricEntry {
    /// Seconds from playback start.
    pub time: f64,
    /// Trimmed, non-empty lyric text.
    pub text: String,
}

/// How lines carrying several timestamp tags are handled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatTags {
    /// One entry per line, timed by the first tag. Every tag is stripped from the text.
    #[default]
    FirstTag,
    /// One entry per tag, all sharing the line's text.
    Expand,
}

/// Parser knobs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Multi-tag line policy.
    pub repeat_tags: RepeatTags,
}

/// Immutable, time-sorted sequence of lyric entries.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct Timeline {
    entries: Vec<LyricEntry>,
}

impl Timeline {
    /// Parse with default options. Never fails; unmatched lines are skipped.
    pub fn parse(document: &str) -> Self {
        Self::parse_with(document, ParseOptions::default())
    }

    /// Parse a document line by line.
    pub fn parse_with(document: &str, opts: ParseOptions) -> Self {
        let mut entries = Vec::new();
        for line in document.lines() {
            parse_line(line, opts, &mut entries);
        }
        Self::from_entries(entries)
    }

    /// Build from arbitrary entries; sorts by time, keeping input order for equal times.
    ///
    /// Text is trimmed; entries with a negative or non-finite time or blank text are dropped.
    pub fn from_entries(entries: Vec<LyricEntry>) -> Self {
        let mut entries: Vec<LyricEntry> = entries
            .into_iter()
            .filter(|e| e.time.is_finite() && e.time >= 0.0)
            .filter_map(|e| {
                let text = e.text.trim();
                (!text.is_empty()).then(|| LyricEntry {
                    time: e.time,
                    text: text.to_string(),
                })
            })
            .collect();
        entries.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { entries }
    }

    /// Read and parse a document, degrading to an empty timeline on IO failure.
    pub fn load_or_empty(path: &Path, opts: ParseOptions) -> Self {
        match std::fs::read_to_string(path) {
            Ok(doc) => {
                let timeline = Self::parse_with(&doc, opts);
                tracing::debug!(
                    path = %path.display(),
                    entries = timeline.len(),
                    "parsed lyric document"
                );
                timeline
            }
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to load lyric document; continuing with an empty timeline"
                );
                Self::default()
            }
        }
    }

    /// All entries in time order.
    pub fn entries(&self) -> &[LyricEntry] {
        &self.entries
    }

    /// Entry at `index`.
    pub fn get(&self, index: usize) -> Option<&LyricEntry> {
        self.entries.get(index)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Time of the first entry.
    pub fn start_time(&self) -> Option<f64> {
        self.entries.first().map(|e| e.time)
    }
}

fn tag_seconds(caps: &regex::Captures<'_>) -> Option<f64> {
    let minutes: u32 = caps.get(1)?.as_str().parse().ok()?;
    let seconds: u32 = caps.get(2)?.as_str().parse().ok()?;
    // "5" -> "500", "50" -> "500", "05" -> "050".
    let fraction = format!("{:0<3}", caps.get(3)?.as_str());
    let millis: u32 = fraction.parse().ok()?;
    Some(f64::from(minutes) * 60.0 + f64::from(seconds) + f64::from(millis) / 1000.0)
}

fn parse_line(line: &str, opts: ParseOptions, out: &mut Vec<LyricEntry>) {
    let times: Vec<f64> = match opts.repeat_tags {
        RepeatTags::FirstTag => TIME_TAG
            .captures(line)
            .and_then(|c| tag_seconds(&c))
            .into_iter()
            .collect(),
        RepeatTags::Expand => TIME_TAG
            .captures_iter(line)
            .filter_map(|c| tag_seconds(&c))
            .collect(),
    };
    if times.is_empty() {
        return;
    }

    let text = TIME_TAG.replace_all(line, "");
    let text = text.trim();
    if text.is_empty() {
        return;
    }

    out.extend(times.into_iter().map(|time| LyricEntry {
        time,
        text: text.to_string(),
    }));
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/lrc.rs"]
mod tests;
