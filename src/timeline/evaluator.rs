use crate::{animation::envelope::FadeEnvelope, timeline::lrc::Timeline};

/// On-screen window given to the final entry, which has no successor to bound it.
pub const LAST_ENTRY_HOLD_SECS: f64 = 5.0;

/// The active lyric at a query time.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ActiveEntry {
    /// Index into the timeline.
    pub index: usize,
    /// Seconds since the entry's start; always `>= 0`.
    pub elapsed: f64,
    /// Window the entry occupies: next start minus this start, or the last-entry hold.
    pub duration: f64,
    /// Envelope level in `[0, 1]` at `elapsed`.
    pub progress: f64,
}

/// Per-query evaluation outcome. Recomputed on every call, never stored.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum EvaluationResult {
    /// Nothing to show: empty timeline, query before the first entry, or NaN time.
    Inactive,
    /// Exactly one entry is on screen.
    Active(ActiveEntry),
}

impl EvaluationResult {
    /// The active entry, if any.
    pub fn active(&self) -> Option<&ActiveEntry> {
        match self {
            Self::Inactive => None,
            Self::Active(a) => Some(a),
        }
    }

    /// Index of the active entry, if any.
    pub fn active_index(&self) -> Option<usize> {
        self.active().map(|a| a.index)
    }
}

/// Stateless evaluator from `(timeline, time)` to the active entry and its envelope.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TimelineEvaluator {
    /// Fade curve used for `progress`.
    pub envelope: FadeEnvelope,
    /// Duration assumed for the final entry.
    pub last_entry_hold_secs: f64,
}

impl Default for TimelineEvaluator {
    fn default() -> Self {
        Self {
            envelope: FadeEnvelope::default(),
            last_entry_hold_secs: LAST_ENTRY_HOLD_SECS,
        }
    }
}

impl TimelineEvaluator {
    /// Evaluator with a custom envelope and the default last-entry hold.
    pub fn with_envelope(envelope: FadeEnvelope) -> Self {
        Self {
            envelope,
            ..Self::default()
        }
    }

    /// Evaluate `timeline` at `time` seconds. Total: never fails, never panics.
    pub fn evaluate(&self, timeline: &Timeline, time: f64) -> EvaluationResult {
        match active_index(timeline, time) {
            Some(index) => self.describe(timeline, index, time),
            None => EvaluationResult::Inactive,
        }
    }

    /// Build the result for a known active index.
    pub(crate) fn describe(&self, timeline: &Timeline, index: usize, time: f64) -> EvaluationResult {
        let entries = timeline.entries();
        let Some(entry) = entries.get(index) else {
            return EvaluationResult::Inactive;
        };
        let duration = match entries.get(index + 1) {
            Some(next) => next.time - entry.time,
            None => self.last_entry_hold_secs,
        };
        let elapsed = (time - entry.time).max(0.0);
        EvaluationResult::Active(ActiveEntry {
            index,
            elapsed,
            duration,
            progress: self.envelope.sample(elapsed, duration),
        })
    }
}

/// Evaluate with the default 1 s fades and 5 s last-entry hold.
pub fn evaluate(timeline: &Timeline, time: f64) -> EvaluationResult {
    TimelineEvaluator::default().evaluate(timeline, time)
}

/// Index `i` with `entry[i].time <= time < entry[i + 1].time`; the last entry is open-ended.
///
/// Among equal start times the last one wins, since earlier ones own an empty interval.
pub fn active_index(timeline: &Timeline, time: f64) -> Option<usize> {
    if time.is_nan() {
        return None;
    }
    timeline
        .entries()
        .partition_point(|e| e.time <= time)
        .checked_sub(1)
}

/// Memoized active-index search for nearly monotonic frame-by-frame queries.
///
/// Checks the previously active entry and its successor before falling back to a binary
/// search. Results are identical to [`TimelineEvaluator::evaluate`].
#[derive(Clone, Debug, Default)]
pub struct TimelineCursor {
    evaluator: TimelineEvaluator,
    last: Option<usize>,
}

impl TimelineCursor {
    /// Cursor over a given evaluator's settings.
    pub fn new(evaluator: TimelineEvaluator) -> Self {
        Self {
            evaluator,
            last: None,
        }
    }

    /// Evaluate at `time`, reusing the previous position when possible.
    pub fn evaluate(&mut self, timeline: &Timeline, time: f64) -> EvaluationResult {
        let index = self
            .last
            .and_then(|i| probe(timeline, i, time).or_else(|| probe(timeline, i + 1, time)))
            .or_else(|| active_index(timeline, time));
        self.last = index;
        match index {
            Some(i) => self.evaluator.describe(timeline, i, time),
            None => EvaluationResult::Inactive,
        }
    }

    /// Forget the cached position.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

fn probe(timeline: &Timeline, i: usize, time: f64) -> Option<usize> {
    let entries = timeline.entries();
    let entry = entries.get(i)?;
    let starts = entry.time <= time;
    let before_next = entries.get(i + 1).is_none_or(|next| time < next.time);
    (starts && before_next).then_some(i)
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/evaluator.rs"]
mod tests;
