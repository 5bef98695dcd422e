//! Pointer gestures on the main track: move, resize, click
//!
//! The controller owns only transient gesture state. While a gesture runs it
//! reports a preview geometry for the grabbed segment; the committed cue in
//! shared state is untouched until release, when the outcome is turned into
//! [`TimelineAction`]s for the owner to apply.
//!
//! ```text
//! Idle ──press──▶ Pressed ──travel ≥ threshold──▶ Dragging | Resizing
//!                    │                                   │
//!                 release (click)                    release (commit)
//!                    ▼                                   ▼
//!                  Idle ◀──────────── cancel ───────── Idle
//! ```

use crate::config::TimelineConfig;
use crate::geometry::{ResizeHandle, SegmentGeometry, SegmentHit, TrackLayout};
use crate::mapper::TrackScale;
use crate::store::{CueUpdate, TimelineAction};
use crate::types::{Cue, CueId, FlavorId, TimeRange, Track};

/// Tunables for gesture recognition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionSettings {
    pub segment_height_px: f64,
    /// Horizontal travel below which a press/release pair is a click
    pub drag_threshold_px: f64,
    pub end_handle_enabled: bool,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self::from(&TimelineConfig::default())
    }
}

impl From<&TimelineConfig> for InteractionSettings {
    fn from(config: &TimelineConfig) -> Self {
        Self {
            segment_height_px: config.segment_height_px,
            drag_threshold_px: config.drag_threshold_px,
            end_handle_enabled: config.end_handle_enabled,
        }
    }
}

/// Live box of a segment being resized (track space)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ResizePreview {
    pub width_px: f64,
    pub height_px: f64,
    pub left_px: f64,
}

impl ResizePreview {
    fn from_geometry(geometry: &SegmentGeometry) -> Self {
        Self {
            width_px: geometry.width_px,
            height_px: geometry.height_px,
            left_px: geometry.left_px,
        }
    }
}

/// What a finished gesture produced
#[derive(Debug, Clone, PartialEq)]
pub enum GestureOutcome {
    /// A move or resize that changes the cue's times
    Committed(CueUpdate),
    /// A press without enough travel to start a drag
    Clicked {
        cue_id: CueId,
        start_time: u64,
    },
}

impl GestureOutcome {
    /// Shared-state writes for this outcome, in dispatch order
    pub fn into_actions(self) -> Vec<TimelineAction> {
        match self {
            Self::Committed(update) => vec![TimelineAction::SetCueAtIndex(update)],
            Self::Clicked { cue_id, start_time } => vec![
                TimelineAction::SetCurrentPosition(start_time),
                TimelineAction::SetSegmentClickTriggered(true),
                TimelineAction::SetSegmentClicked(cue_id),
            ],
        }
    }
}

/// Snapshot of the segment a gesture started on
#[derive(Debug, Clone, PartialEq)]
struct GestureTarget {
    flavor: FlavorId,
    index: usize,
    cue: Cue,
    geometry: SegmentGeometry,
}

#[derive(Debug, Clone, PartialEq, Default)]
enum Gesture {
    #[default]
    Idle,
    Pressed {
        target: GestureTarget,
        hit: SegmentHit,
        origin_x: f64,
    },
    Dragging {
        target: GestureTarget,
        origin_x: f64,
        left_px: f64,
    },
    Resizing {
        target: GestureTarget,
        handle: ResizeHandle,
        origin_x: f64,
        preview: ResizePreview,
    },
}

/// Gesture state machine for one main track
#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    gesture: Gesture,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a gesture is in progress (pressed, dragging or resizing)
    pub fn is_active(&self) -> bool {
        !matches!(self.gesture, Gesture::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.gesture, Gesture::Dragging { .. })
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self.gesture, Gesture::Resizing { .. })
    }

    /// Index of the segment under the current gesture
    pub fn active_index(&self) -> Option<usize> {
        match &self.gesture {
            Gesture::Idle => None,
            Gesture::Pressed { target, .. }
            | Gesture::Dragging { target, .. }
            | Gesture::Resizing { target, .. } => Some(target.index),
        }
    }

    /// Start a gesture at a track-space x
    ///
    /// Returns `false` (and stays idle) when nothing is under the pointer or the
    /// timeline is not ready. A press while another gesture runs replaces it.
    pub fn press(
        &mut self,
        x: f64,
        track: &Track,
        scale: TrackScale,
        settings: &InteractionSettings,
    ) -> bool {
        let layout = TrackLayout::compute(&track.cues, scale, settings.segment_height_px);
        let Some((index, hit)) = layout.hit_test(x, settings.end_handle_enabled) else {
            self.gesture = Gesture::Idle;
            return false;
        };
        let (Some(cue), Some(geometry)) = (track.cue_at(index), layout.get(index)) else {
            self.gesture = Gesture::Idle;
            return false;
        };

        log::debug!(
            "press: cue '{}' (index {}) hit {:?} at x={:.1}",
            cue.id,
            index,
            hit,
            x
        );
        self.gesture = Gesture::Pressed {
            target: GestureTarget {
                flavor: track.flavor.clone(),
                index,
                cue: cue.clone(),
                geometry: *geometry,
            },
            hit,
            origin_x: x,
        };
        true
    }

    /// Feed a pointer position; returns `true` when the preview changed
    pub fn pointer_moved(
        &mut self,
        x: f64,
        scale: TrackScale,
        settings: &InteractionSettings,
    ) -> bool {
        match std::mem::take(&mut self.gesture) {
            Gesture::Idle => false,
            Gesture::Pressed { target, hit, origin_x } => {
                if (x - origin_x).abs() < settings.drag_threshold_px {
                    self.gesture = Gesture::Pressed { target, hit, origin_x };
                    return false;
                }
                self.gesture = match hit {
                    SegmentHit::Body => {
                        log::debug!("drag start: cue '{}'", target.cue.id);
                        let left_px = target.geometry.left_px;
                        Gesture::Dragging { target, origin_x, left_px }
                    }
                    SegmentHit::Handle(handle) => {
                        log::debug!("resize start: cue '{}' {:?} edge", target.cue.id, handle);
                        let preview = ResizePreview::from_geometry(&target.geometry);
                        Gesture::Resizing { target, handle, origin_x, preview }
                    }
                };
                self.pointer_moved(x, scale, settings);
                true
            }
            Gesture::Dragging { target, origin_x, .. } => {
                let left_px = bounded_left(&target.geometry, x - origin_x, scale.width_px);
                self.gesture = Gesture::Dragging { target, origin_x, left_px };
                true
            }
            Gesture::Resizing { target, handle, origin_x, .. } => {
                let preview = resize_preview(&target.geometry, handle, x - origin_x);
                self.gesture = Gesture::Resizing { target, handle, origin_x, preview };
                true
            }
        }
    }

    /// End the gesture and report what it produced
    ///
    /// Always returns to idle. Moves and resizes commit even when the resulting
    /// times equal the ones before the gesture.
    pub fn release(&mut self, scale: TrackScale) -> Option<GestureOutcome> {
        match std::mem::take(&mut self.gesture) {
            Gesture::Idle => None,
            Gesture::Pressed { target, .. } => {
                log::debug!("click: cue '{}'", target.cue.id);
                Some(GestureOutcome::Clicked {
                    start_time: target.cue.start_time,
                    cue_id: target.cue.id,
                })
            }
            Gesture::Dragging { target, left_px, .. } => {
                let range =
                    TimeRange::clamped_move(scale.pixel_to_time(left_px), target.cue.length());
                Some(commit(target, range))
            }
            Gesture::Resizing { target, handle, preview, .. } => {
                let range = resized_range(&target.cue, handle, scale.px_to_ms(preview.width_px));
                Some(commit(target, range))
            }
        }
    }

    /// Abort the gesture without emitting anything
    pub fn cancel(&mut self) {
        if self.is_active() {
            log::debug!("gesture cancelled");
        }
        self.gesture = Gesture::Idle;
    }

    /// Geometry to render for segment `index`
    ///
    /// The grabbed segment shows the live preview; everything else, and every
    /// segment once the gesture ends, shows its committed geometry.
    pub fn display_geometry(&self, index: usize, committed: SegmentGeometry) -> SegmentGeometry {
        match &self.gesture {
            Gesture::Dragging { target, left_px, .. } if target.index == index => SegmentGeometry {
                left_px: *left_px,
                ..committed
            },
            Gesture::Resizing { target, preview, .. } if target.index == index => SegmentGeometry {
                left_px: preview.left_px,
                width_px: preview.width_px,
                height_px: preview.height_px,
            },
            _ => committed,
        }
    }

    /// Live resize box, if a resize is running
    pub fn resize_preview(&self) -> Option<ResizePreview> {
        match &self.gesture {
            Gesture::Resizing { preview, .. } => Some(*preview),
            _ => None,
        }
    }
}

/// Drag position bounded to the track like a parent-bounded draggable
fn bounded_left(geometry: &SegmentGeometry, delta_x: f64, track_width_px: f64) -> f64 {
    let max_left = (track_width_px - geometry.width_px).max(0.0);
    let left = geometry.left_px + delta_x;
    if left.is_finite() {
        left.clamp(0.0, max_left)
    } else {
        geometry.left_px
    }
}

fn resize_preview(geometry: &SegmentGeometry, handle: ResizeHandle, delta_x: f64) -> ResizePreview {
    let mut preview = ResizePreview::from_geometry(geometry);
    match handle {
        ResizeHandle::Start => {
            preview.width_px = (geometry.width_px - delta_x).max(0.0);
            // Leading edge follows the pointer; trailing edge stays put
            preview.left_px = geometry.left_px - (preview.width_px - geometry.width_px);
        }
        ResizeHandle::End => {
            preview.width_px = (geometry.width_px + delta_x).max(0.0);
        }
    }
    preview
}

/// New range after a resize to `new_duration_ms`
///
/// `time_diff = length - new_duration` is applied to the grabbed edge only:
/// the leading edge gets `start + time_diff`, the trailing edge `end - time_diff`.
fn resized_range(cue: &Cue, handle: ResizeHandle, new_duration_ms: f64) -> TimeRange {
    let start = cue.start_time as f64;
    let end = cue.end_time as f64;
    let time_diff = cue.length() as f64 - new_duration_ms;
    match handle {
        ResizeHandle::Start => TimeRange::clamped(start + time_diff, end),
        ResizeHandle::End => TimeRange::clamped(start, end - time_diff),
    }
}

fn commit(target: GestureTarget, range: TimeRange) -> GestureOutcome {
    log::info!(
        "commit: cue '{}' (index {}) {}..{}ms -> {}..{}ms",
        target.cue.id,
        target.index,
        target.cue.start_time,
        target.cue.end_time,
        range.start(),
        range.end()
    );
    GestureOutcome::Committed(CueUpdate {
        flavor: target.flavor,
        index: target.index,
        new_cue: target.cue.with_range(range),
    })
}
