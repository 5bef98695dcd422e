//! Subtitle timeline widget
//!
//! A zoomed main track that scrolls under a fixed center playhead, with a
//! miniature overview of the whole duration below it. Segments can be moved,
//! trimmed from their leading edge and clicked; the overview seeks on click.
//!
//! ## Usage
//!
//! ```ignore
//! fn view(&self) -> Element<Message> {
//!     subtitle_timeline(&self.timeline, Message::Timeline)
//! }
//!
//! fn update(&mut self, message: Message) {
//!     match message {
//!         Message::Timeline(TimelineEvent::Actions(actions)) => {
//!             dispatch_all(&mut self.store, actions)?;
//!         }
//!     }
//! }
//! ```

mod canvas;
mod message;
mod state;
mod view;

pub use canvas::{TimelineInteraction, MINI_TIMELINE_GAP};
pub use message::TimelineEvent;
pub use state::TimelineViewState;
pub use view::subtitle_timeline;
