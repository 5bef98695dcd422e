//! Timeline error types

use thiserror::Error;

use crate::types::{CueId, FlavorId};

/// Errors raised by the timeline core
///
/// Pointer input never produces these: proposed times are clamped instead.
/// They cover contract violations by collaborators and malformed external data.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimelineError {
    /// No track is loaded for the flavor
    #[error("No subtitle track for flavor '{0}'")]
    UnknownFlavor(FlavorId),

    /// Neither the committed index nor the cue id resolves in the track
    #[error("Cue '{id}' not found in flavor '{flavor}' (index {index})")]
    CueNotFound {
        flavor: FlavorId,
        index: usize,
        id: CueId,
    },

    /// A cue whose end lies before its start
    #[error("Invalid time range: start {start}ms is after end {end}ms")]
    InvalidTimeRange { start: u64, end: u64 },
}

/// Result type for timeline operations
pub type TimelineResult<T> = Result<T, TimelineError>;
