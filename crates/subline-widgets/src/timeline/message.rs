//! Events published by the timeline canvas

use subline_core::TimelineAction;

/// Events emitted by the subtitle timeline
#[derive(Debug, Clone, PartialEq)]
pub enum TimelineEvent {
    /// Shared-state writes to apply in order (commit, seek, click notice)
    Actions(Vec<TimelineAction>),
}

impl TimelineEvent {
    pub fn into_actions(self) -> Vec<TimelineAction> {
        match self {
            Self::Actions(actions) => actions,
        }
    }
}
