//! iced widgets for the subline subtitle timeline
//!
//! ## Architecture (iced 0.14 patterns)
//!
//! - **State structs**: Pure data (`TimelineViewState`)
//! - **View functions**: Take state + callbacks, return `Element<Message>`
//! - **Canvas Programs**: Handle custom rendering and event-to-callback translation
//!
//! All time/pixel math lives in `subline-core`; the canvas only converts between
//! iced's `f32` coordinates and the core's `f64` track space.

pub mod theme;
pub mod timeline;

pub use timeline::{
    subtitle_timeline, TimelineEvent, TimelineInteraction, TimelineViewState, MINI_TIMELINE_GAP,
};
