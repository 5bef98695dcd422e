//! Segment geometry derived from cue time ranges
//!
//! Geometry is never stored as a source of truth. It is recomputed from
//! `(start, end, duration, track width)` whenever any of those change, so a
//! commit is visible on the very next layout.

use crate::mapper::TrackScale;
use crate::types::Cue;

/// Width of a resize handle's hit zone in pixels
pub const HANDLE_WIDTH_PX: f64 = 8.0;

/// Box geometry of one cue on the main track (pixels, track space)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SegmentGeometry {
    pub left_px: f64,
    pub width_px: f64,
    pub height_px: f64,
}

/// Which edge of a segment a resize gesture grabs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeHandle {
    /// Leading edge, changes the start time
    Start,
    /// Trailing edge, changes the end time (opt-in, see `TimelineConfig::end_handle_enabled`)
    End,
}

/// Part of a segment under the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentHit {
    Body,
    Handle(ResizeHandle),
}

impl SegmentGeometry {
    /// Geometry of a cue on a track with the given scale
    ///
    /// `left` maps the start position; `width` maps the cue's length, not its
    /// end position.
    pub fn for_cue(cue: &Cue, scale: TrackScale, height_px: f64) -> Self {
        Self {
            left_px: scale.time_to_pixel(cue.start_time as f64),
            width_px: scale.ms_to_px(cue.length() as f64),
            height_px,
        }
    }

    pub fn right_px(&self) -> f64 {
        self.left_px + self.width_px
    }

    pub fn contains_x(&self, x: f64) -> bool {
        x >= self.left_px && x <= self.right_px()
    }

    /// Width of each handle zone, shrunk on narrow boxes so the body stays grabbable
    fn handle_zone(&self) -> f64 {
        HANDLE_WIDTH_PX.min(self.width_px / 3.0)
    }

    /// Classify a track-space x against this box
    pub fn hit_test(&self, x: f64, end_handle_enabled: bool) -> Option<SegmentHit> {
        if !self.contains_x(x) {
            return None;
        }
        let zone = self.handle_zone();
        if x <= self.left_px + zone {
            Some(SegmentHit::Handle(ResizeHandle::Start))
        } else if end_handle_enabled && x >= self.right_px() - zone {
            Some(SegmentHit::Handle(ResizeHandle::End))
        } else {
            Some(SegmentHit::Body)
        }
    }
}

/// Geometry of every cue of a track, in track order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrackLayout {
    pub segments: Vec<SegmentGeometry>,
}

impl TrackLayout {
    /// Lay out all cues; empty while the scale is not ready
    pub fn compute(cues: &[Cue], scale: TrackScale, height_px: f64) -> Self {
        if !scale.is_ready() {
            return Self::default();
        }
        Self {
            segments: cues
                .iter()
                .map(|cue| SegmentGeometry::for_cue(cue, scale, height_px))
                .collect(),
        }
    }

    pub fn get(&self, index: usize) -> Option<&SegmentGeometry> {
        self.segments.get(index)
    }

    /// Topmost segment under `x`
    ///
    /// Later cues are drawn over earlier ones, so the search runs backwards.
    pub fn hit_test(&self, x: f64, end_handle_enabled: bool) -> Option<(usize, SegmentHit)> {
        self.segments
            .iter()
            .enumerate()
            .rev()
            .find_map(|(index, geometry)| {
                geometry
                    .hit_test(x, end_handle_enabled)
                    .map(|hit| (index, hit))
            })
    }
}
