//! Subtitle data model: cues, time ranges and flavor-keyed tracks

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{TimelineError, TimelineResult};

/// Stable identifier of a cue
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CueId(pub String);

impl CueId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Subtitle flavor (e.g. one language) that keys a track
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlavorId(pub String);

impl FlavorId {
    pub fn new(flavor: impl Into<String>) -> Self {
        Self(flavor.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FlavorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Convert a proposed millisecond value to a whole, non-negative millisecond
///
/// Negative, NaN and infinite proposals collapse to 0.
fn whole_ms(value: f64) -> u64 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    value.round() as u64
}

/// A committed `(start, end)` pair in milliseconds
///
/// Built only through the clamping constructors (or the validating [`TimeRange::new`]),
/// so `start <= end` always holds. Non-negativity comes from the unsigned fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct TimeRange {
    start: u64,
    end: u64,
}

impl TimeRange {
    /// Validating constructor for data that did not come from a pointer
    pub fn new(start: u64, end: u64) -> TimelineResult<Self> {
        if end < start {
            return Err(TimelineError::InvalidTimeRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Clamp a proposed range: negative start becomes 0, an end before the start
    /// becomes the start. Never rejects.
    pub fn clamped(start_ms: f64, end_ms: f64) -> Self {
        let start = whole_ms(start_ms);
        let end = whole_ms(end_ms).max(start);
        Self { start, end }
    }

    /// Clamp a proposed move while keeping `length` exact
    ///
    /// A negative start is pulled to 0 and the end follows it, so a pure move
    /// never changes the cue's duration.
    pub fn clamped_move(start_ms: f64, length: u64) -> Self {
        let start = whole_ms(start_ms);
        Self {
            start,
            end: start.saturating_add(length),
        }
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    /// Duration of the range in milliseconds
    pub fn length(&self) -> u64 {
        self.end - self.start
    }
}

/// A single time-bounded subtitle entry
///
/// `text` and `tree` are payload: the timeline never interprets them and passes
/// them through every commit unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cue {
    pub id: CueId,
    /// Start time in milliseconds
    pub start_time: u64,
    /// End time in milliseconds
    pub end_time: u64,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub tree: serde_json::Value,
}

impl Cue {
    pub fn new(
        id: impl Into<String>,
        start_time: u64,
        end_time: u64,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id: CueId::new(id),
            start_time,
            end_time,
            text: text.into(),
            tree: serde_json::Value::Null,
        }
    }

    /// Cue duration in milliseconds (0 for a malformed cue)
    pub fn length(&self) -> u64 {
        self.end_time.saturating_sub(self.start_time)
    }

    /// The cue's current range, if it satisfies `start <= end`
    pub fn range(&self) -> TimelineResult<TimeRange> {
        TimeRange::new(self.start_time, self.end_time)
    }

    /// Copy of this cue with both times replaced together
    pub fn with_range(&self, range: TimeRange) -> Self {
        Self {
            id: self.id.clone(),
            start_time: range.start(),
            end_time: range.end(),
            text: self.text.clone(),
            tree: self.tree.clone(),
        }
    }
}

/// Ordered cues of one flavor
///
/// Order is significant: the index is the position used when committing
/// an edit. It is usually, but not necessarily, chronological.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub flavor: FlavorId,
    #[serde(default)]
    pub cues: Vec<Cue>,
}

impl Track {
    pub fn new(flavor: impl Into<String>, cues: Vec<Cue>) -> Self {
        Self {
            flavor: FlavorId::new(flavor),
            cues,
        }
    }

    pub fn cue_at(&self, index: usize) -> Option<&Cue> {
        self.cues.get(index)
    }

    /// Position of the cue with the given id
    pub fn position_of(&self, id: &CueId) -> Option<usize> {
        self.cues.iter().position(|cue| &cue.id == id)
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    /// Check every cue's time range (used after deserializing external data)
    pub fn validate(&self) -> TimelineResult<()> {
        for cue in &self.cues {
            cue.range()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamped_negative_start() {
        let range = TimeRange::clamped(-2000.0, 8000.0);
        assert_eq!(range.start(), 0);
        assert_eq!(range.end(), 8000);
    }

    #[test]
    fn test_clamped_inverted_range_collapses() {
        let range = TimeRange::clamped(5000.0, 3000.0);
        assert_eq!(range.start(), 5000);
        assert_eq!(range.end(), 5000);
        assert_eq!(range.length(), 0);
    }

    #[test]
    fn test_clamped_rounds_to_whole_ms() {
        let range = TimeRange::clamped(1000.4, 1999.6);
        assert_eq!((range.start(), range.end()), (1000, 2000));
    }

    #[test]
    fn test_clamped_nan_is_zero() {
        let range = TimeRange::clamped(f64::NAN, f64::INFINITY);
        assert_eq!((range.start(), range.end()), (0, 0));
    }

    #[test]
    fn test_clamped_move_preserves_length() {
        let range = TimeRange::clamped_move(-2000.0, 10_000);
        assert_eq!((range.start(), range.end()), (0, 10_000));

        let range = TimeRange::clamped_move(4999.7, 10_000);
        assert_eq!((range.start(), range.end()), (5000, 15_000));
    }

    #[test]
    fn test_new_rejects_inverted() {
        assert_eq!(
            TimeRange::new(10, 5),
            Err(TimelineError::InvalidTimeRange { start: 10, end: 5 })
        );
        assert!(TimeRange::new(5, 5).is_ok());
    }

    #[test]
    fn test_with_range_keeps_payload() {
        let mut cue = Cue::new("c1", 10_000, 20_000, "Hello");
        cue.tree = serde_json::json!({ "children": [{ "type": "text", "value": "Hello" }] });

        let moved = cue.with_range(TimeRange::clamped(5000.0, 15_000.0));
        assert_eq!(moved.id, cue.id);
        assert_eq!(moved.text, cue.text);
        assert_eq!(moved.tree, cue.tree);
        assert_eq!((moved.start_time, moved.end_time), (5000, 15_000));
    }

    #[test]
    fn test_track_lookup() {
        let track = Track::new(
            "en",
            vec![Cue::new("a", 0, 1000, "A"), Cue::new("b", 1000, 2000, "B")],
        );
        assert_eq!(track.position_of(&CueId::new("b")), Some(1));
        assert_eq!(track.position_of(&CueId::new("zz")), None);
        assert_eq!(track.cue_at(0).map(|c| c.text.as_str()), Some("A"));
        assert!(track.cue_at(2).is_none());
    }

    #[test]
    fn test_track_validate_detects_inverted_cue() {
        let track = Track::new("en", vec![Cue::new("a", 2000, 1000, "bad")]);
        assert!(matches!(
            track.validate(),
            Err(TimelineError::InvalidTimeRange { start: 2000, end: 1000 })
        ));
    }

    #[test]
    fn test_track_yaml_roundtrip() {
        let yaml = "flavor: de\ncues:\n  - id: x\n    start_time: 100\n    end_time: 900\n    \
                    text: Hallo\n";
        let track: Track = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(track.flavor, FlavorId::new("de"));
        assert_eq!(track.cues[0].tree, serde_json::Value::Null);

        let back = serde_yaml::to_string(&track).unwrap();
        let parsed: Track = serde_yaml::from_str(&back).unwrap();
        assert_eq!(parsed, track);
    }
}
