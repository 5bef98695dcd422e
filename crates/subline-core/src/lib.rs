//! Subline Core - time/space mapping and gesture engine for subtitle timelines
//!
//! A subtitle timeline shows every cue of a track as a box on a horizontally
//! zoomed, scrollable main track, with a miniature overview of the whole
//! duration below it. This crate holds everything that does not depend on a
//! GUI toolkit:
//!
//! - [`mapper`]: pure conversions between milliseconds and pixel offsets
//! - [`geometry`]: per-cue box geometry derived from a cue's time range
//! - [`interaction`]: drag (move) and resize (trim) gestures ending in commits
//! - [`sync`]: main track auto-scroll, overview marker and overview click-to-seek
//! - [`store`]: the read/write contracts shared with collaborators, plus an
//!   in-memory store
//!
//! Three coordinate systems meet here: absolute time (ms), pixels on the zoomed
//! main track and pixels on the miniature overview. Only [`mapper`] converts
//! between them; everything else goes through it.

pub mod config;
pub mod error;
pub mod geometry;
pub mod interaction;
pub mod mapper;
pub mod store;
pub mod sync;
pub mod types;

pub use config::TimelineConfig;
pub use error::{TimelineError, TimelineResult};
pub use geometry::{ResizeHandle, SegmentGeometry, SegmentHit, TrackLayout};
pub use interaction::{GestureOutcome, InteractionController, InteractionSettings, ResizePreview};
pub use mapper::TrackScale;
pub use store::{CueUpdate, SubtitleStore, TimelineAction, TimelineSink, TimelineSource};
pub use sync::{ScrollGeometry, ViewportSync};
pub use types::{Cue, CueId, FlavorId, TimeRange, Track};
