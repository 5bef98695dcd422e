//! Application messages

use iced::time::Instant;
use subline_core::FlavorId;
use subline_widgets::TimelineEvent;

/// Application messages
#[derive(Debug, Clone)]
pub enum Message {
    // Timeline
    /// Actions published by the timeline canvas
    Timeline(TimelineEvent),
    /// Show another flavor on the timeline
    SelectFlavor(FlavorId),

    // Transport
    TogglePlayback,
    /// Playback clock tick
    Tick(Instant),

    // Persistence
    SaveDocument,
    /// Flip the trailing resize handle and persist the config
    ToggleEndHandle,
}
