//! Colors for the timeline canvas

use iced::Color;

/// Main track background (padding area outside the media range)
pub const TRACK_PADDING_BG: Color = Color::from_rgb(0.08, 0.08, 0.1);

/// Main track background inside `[0, duration]`
pub const TRACK_BG: Color = Color::from_rgb(0.12, 0.12, 0.15);

/// Segment fill
pub const SEGMENT_FILL: Color = Color::from_rgba(0.25, 0.45, 0.75, 0.85);

/// Segment fill while grabbed
pub const SEGMENT_ACTIVE_FILL: Color = Color::from_rgba(0.35, 0.6, 0.95, 0.95);

pub const SEGMENT_BORDER: Color = Color::from_rgb(0.7, 0.8, 1.0);

/// Leading-edge resize grip
pub const HANDLE_COLOR: Color = Color::from_rgba(1.0, 1.0, 1.0, 0.35);

pub const SEGMENT_TEXT: Color = Color::from_rgb(0.95, 0.95, 0.95);

/// Fixed center playhead
pub const PLAYHEAD_COLOR: Color = Color::from_rgb(1.0, 0.3, 0.3);

/// Miniature overview background
pub const MINI_BG: Color = Color::from_rgb(0.05, 0.05, 0.08);

/// Cue marks on the miniature overview
pub const MINI_SEGMENT: Color = Color::from_rgba(0.25, 0.45, 0.75, 0.6);

/// Position marker on the miniature overview
pub const MINI_MARKER: Color = Color::from_rgb(1.0, 1.0, 1.0);
