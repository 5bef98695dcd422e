//! Timeline view function

use super::canvas::TimelineCanvas;
use super::message::TimelineEvent;
use super::state::TimelineViewState;
use iced::widget::Canvas;
use iced::{Element, Length};

/// Create the subtitle timeline element (main track + miniature overview)
///
/// # Arguments
///
/// * `state` - Snapshot of duration, position, cues and config
/// * `on_event` - Callback closure wrapping timeline events into the app's message type
///
/// # Example
///
/// ```ignore
/// let timeline = subtitle_timeline(&self.timeline, Message::Timeline);
/// column![player, timeline].into()
/// ```
pub fn subtitle_timeline<'a, Message>(
    state: &'a TimelineViewState,
    on_event: impl Fn(TimelineEvent) -> Message + 'a,
) -> Element<'a, Message>
where
    Message: Clone + 'a,
{
    Canvas::new(TimelineCanvas { state, on_event })
        .width(Length::Fill)
        .height(Length::Fixed(state.total_height()))
        .into()
}
