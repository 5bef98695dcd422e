//! Playhead, scroll and miniature-overview synchronization
//!
//! The main track scrolls under a playhead fixed at the viewport center. The
//! track carries half a viewport of padding on each side, so position 0 and
//! position `duration` can both sit under the playhead.

use crate::mapper::{pixel_to_time, time_to_pixel};
use crate::store::TimelineAction;

/// Horizontal scroll extent of the padded main track
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollGeometry {
    /// Visible viewport width
    pub client_width: f64,
    /// Full scrollable width (track plus padding)
    pub scroll_width: f64,
}

impl ScrollGeometry {
    /// Scroll surface for a track of `track_width` px in a `client_width` px viewport
    pub fn for_track(client_width: f64, track_width: f64) -> Self {
        let client_width = non_negative(client_width);
        Self {
            client_width,
            scroll_width: non_negative(track_width) + client_width,
        }
    }

    /// Largest valid scroll offset
    pub fn scroll_left_max(&self) -> f64 {
        (self.scroll_width - self.client_width).max(0.0)
    }

    /// Scroll offset that puts `position` under the playhead
    pub fn scroll_left_for(&self, position: u64, duration: u64) -> f64 {
        time_to_pixel(position as f64, duration as f64, self.scroll_left_max())
            .clamp(0.0, self.scroll_left_max())
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

/// Playhead x within the viewport
pub fn playhead_anchor_x(client_width: f64) -> f64 {
    non_negative(client_width) / 2.0
}

/// Map a viewport x to a track x for the given scroll offset
pub fn viewport_to_track_x(x_viewport: f64, scroll_left: f64, client_width: f64) -> f64 {
    x_viewport + scroll_left - playhead_anchor_x(client_width)
}

/// Map a track x back to a viewport x
pub fn track_to_viewport_x(x_track: f64, scroll_left: f64, client_width: f64) -> f64 {
    x_track - scroll_left + playhead_anchor_x(client_width)
}

/// Position marker offset on the miniature overview (0 when not ready)
pub fn mini_marker_offset(position: u64, duration: u64, mini_width: f64) -> f64 {
    time_to_pixel(position as f64, duration as f64, mini_width)
}

/// Position a miniature-overview click seeks to, clamped to `[0, duration]`
pub fn mini_click_position(x: f64, mini_width: f64, duration: u64) -> u64 {
    let time = pixel_to_time(x, duration as f64, mini_width);
    if time <= 0.0 {
        0
    } else {
        (time.round() as u64).min(duration)
    }
}

/// Shared-state writes for a user seek from the miniature overview
pub fn seek_from_mini_click(x: f64, mini_width: f64, duration: u64) -> [TimelineAction; 2] {
    let position = mini_click_position(x, mini_width, duration);
    log::debug!("mini click at x={:.1}/{:.1} -> {}ms", x, mini_width, position);
    [
        TimelineAction::SetSeekTriggered(true),
        TimelineAction::SetCurrentPosition(position),
    ]
}

/// Keeps the main track scrolled so the current position sits under the playhead
///
/// Re-aligns only when position, duration, viewport width or the scroll extent
/// changed since the last reconcile; manual scrolling alone never snaps the
/// view back.
#[derive(Debug, Clone, Default)]
pub struct ViewportSync {
    last: Option<SyncKey>,
    scroll_left: f64,
}

/// Everything the scroll offset depends on
#[derive(Debug, Clone, Copy, PartialEq)]
struct SyncKey {
    position: u64,
    duration: u64,
    client_width: f64,
    scroll_left_max: f64,
}

impl SyncKey {
    fn new(position: u64, duration: u64, client_width: f64, scroll: ScrollGeometry) -> Self {
        Self {
            position,
            duration,
            client_width,
            scroll_left_max: scroll.scroll_left_max(),
        }
    }
}

impl ViewportSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the new scroll offset when a dependency changed
    pub fn reconcile(
        &mut self,
        position: u64,
        duration: u64,
        client_width: f64,
        scroll: ScrollGeometry,
    ) -> Option<f64> {
        let key = SyncKey::new(position, duration, client_width, scroll);
        if self.last == Some(key) {
            return None;
        }
        self.last = Some(key);
        self.scroll_left = scroll.scroll_left_for(position, duration);
        log::debug!(
            "viewport sync: position={}ms duration={}ms -> scroll_left={:.1}",
            position,
            duration,
            self.scroll_left
        );
        Some(self.scroll_left)
    }

    /// Scroll offset from the last reconcile
    pub fn scroll_left(&self) -> f64 {
        self.scroll_left
    }

    /// Scroll offset for the given dependencies without recording them
    ///
    /// Renderers that only get shared access use this; it agrees with what
    /// `reconcile` would return.
    pub fn scroll_left_for(
        &self,
        position: u64,
        duration: u64,
        client_width: f64,
        scroll: ScrollGeometry,
    ) -> f64 {
        if self.last == Some(SyncKey::new(position, duration, client_width, scroll)) {
            self.scroll_left
        } else {
            scroll.scroll_left_for(position, duration)
        }
    }
}
