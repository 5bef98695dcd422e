//! Time ↔ pixel conversion
//!
//! Every conversion between milliseconds and pixel offsets in either view goes
//! through this module. The functions are pure and safe to call on every render.
//!
//! A zero duration or zero width means the timeline is "not ready" (no media
//! loaded yet, or the container has not been measured). All conversions then
//! return `0.0` instead of NaN or infinity.

/// Whether a `(duration, width)` pair can be used for mapping
fn is_ready(duration_ms: f64, width_px: f64) -> bool {
    duration_ms.is_finite() && width_px.is_finite() && duration_ms > 0.0 && width_px > 0.0
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Map a time position to a pixel offset: `(time / duration) * width`
pub fn time_to_pixel(time_ms: f64, duration_ms: f64, width_px: f64) -> f64 {
    if !is_ready(duration_ms, width_px) {
        return 0.0;
    }
    finite_or_zero((time_ms / duration_ms) * width_px)
}

/// Map a pixel offset to a time position: `(pixel / width) * duration`
pub fn pixel_to_time(pixel: f64, duration_ms: f64, width_px: f64) -> f64 {
    if !is_ready(duration_ms, width_px) {
        return 0.0;
    }
    finite_or_zero((pixel / width_px) * duration_ms)
}

/// Map a time span (not a position) to a pixel length
///
/// Same formula as [`time_to_pixel`]; kept separate so call sites say whether
/// they convert a position or a length.
pub fn ms_to_px(length_ms: f64, duration_ms: f64, width_px: f64) -> f64 {
    time_to_pixel(length_ms, duration_ms, width_px)
}

/// Map a pixel length to a time span
pub fn px_to_ms(length_px: f64, duration_ms: f64, width_px: f64) -> f64 {
    pixel_to_time(length_px, duration_ms, width_px)
}

/// Width of the zoomed main track
///
/// The track is `duration / cutout` viewports wide, so `cutout_ms` always
/// fills exactly one visible viewport width.
pub fn main_track_width(duration_ms: f64, cutout_ms: f64, container_width_px: f64) -> f64 {
    if !cutout_ms.is_finite()
        || cutout_ms <= 0.0
        || !duration_ms.is_finite()
        || duration_ms <= 0.0
    {
        return 0.0;
    }
    finite_or_zero((duration_ms / cutout_ms) * container_width_px.max(0.0))
}

/// A `(duration, width)` pair bundled for one pixel space
///
/// The zoomed main track and the miniature overview each get their own scale;
/// both share the same duration.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrackScale {
    /// Timeline length in milliseconds
    pub duration_ms: f64,
    /// Pixel width spanning the whole duration
    pub width_px: f64,
}

impl TrackScale {
    pub fn new(duration_ms: u64, width_px: f64) -> Self {
        Self {
            duration_ms: duration_ms as f64,
            width_px,
        }
    }

    /// Scale of the zoomed main track for a given viewport width
    pub fn main_track(duration_ms: u64, cutout_ms: u64, viewport_width_px: f64) -> Self {
        let width_px = main_track_width(duration_ms as f64, cutout_ms as f64, viewport_width_px);
        Self::new(duration_ms, width_px)
    }

    pub fn is_ready(&self) -> bool {
        is_ready(self.duration_ms, self.width_px)
    }

    pub fn time_to_pixel(&self, time_ms: f64) -> f64 {
        time_to_pixel(time_ms, self.duration_ms, self.width_px)
    }

    pub fn pixel_to_time(&self, pixel: f64) -> f64 {
        pixel_to_time(pixel, self.duration_ms, self.width_px)
    }

    pub fn ms_to_px(&self, length_ms: f64) -> f64 {
        ms_to_px(length_ms, self.duration_ms, self.width_px)
    }

    pub fn px_to_ms(&self, length_px: f64) -> f64 {
        px_to_ms(length_px, self.duration_ms, self.width_px)
    }
}
