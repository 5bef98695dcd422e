//! Subline Editor - subtitle timing on a scrollable timeline
//!
//! Owns an in-memory subtitle store and wires the timeline widget to it. The
//! editor also stands in for the timeline's collaborators: it consumes the
//! segment-click notice (cue list selection) and the user-seek flag (playback).

pub mod document;
pub mod ui;
