//! Timeline view state

use subline_core::{
    InteractionSettings, ScrollGeometry, TimelineConfig, TimelineSource, Track, TrackLayout,
    TrackScale,
};

/// Snapshot of everything the timeline canvas renders
///
/// Pure data: the application rebuilds or refreshes it from its store and
/// hands a reference to [`subtitle_timeline`](super::subtitle_timeline).
#[derive(Debug, Clone, Default)]
pub struct TimelineViewState {
    pub config: TimelineConfig,
    /// Timeline length in milliseconds (0 = nothing loaded)
    pub duration: u64,
    /// Playhead position in milliseconds
    pub current_position: u64,
    /// Cues of the selected flavor
    pub track: Option<Track>,
}

impl TimelineViewState {
    pub fn new(config: TimelineConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Snapshot the selected flavor of a source
    pub fn from_source<S: TimelineSource + ?Sized>(config: TimelineConfig, source: &S) -> Self {
        let mut state = Self::new(config);
        state.refresh(source);
        state
    }

    /// Refresh duration, position and cues from a source
    pub fn refresh<S: TimelineSource + ?Sized>(&mut self, source: &S) {
        self.duration = source.duration();
        self.current_position = source.current_position();
        self.track = source.selected_flavor().and_then(|flavor| {
            source
                .cues_for_flavor(flavor)
                .map(|cues| Track {
                    flavor: flavor.clone(),
                    cues: cues.to_vec(),
                })
        });
    }

    pub fn with_duration(mut self, duration: u64) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_position(mut self, position: u64) -> Self {
        self.current_position = position;
        self
    }

    pub fn with_track(mut self, track: Track) -> Self {
        self.track = Some(track);
        self
    }

    /// Main track scale for a viewport width
    pub fn main_scale(&self, viewport_width: f32) -> TrackScale {
        TrackScale::main_track(self.duration, self.config.timeline_cutout_ms, viewport_width as f64)
    }

    /// Miniature overview scale for its width
    pub fn mini_scale(&self, mini_width: f32) -> TrackScale {
        TrackScale::new(self.duration, mini_width as f64)
    }

    /// Padded scroll surface of the main track
    pub fn scroll_geometry(&self, viewport_width: f32) -> ScrollGeometry {
        ScrollGeometry::for_track(viewport_width as f64, self.main_scale(viewport_width).width_px)
    }

    /// Committed segment geometry on the main track
    pub fn layout(&self, viewport_width: f32) -> TrackLayout {
        match &self.track {
            Some(track) => TrackLayout::compute(
                &track.cues,
                self.main_scale(viewport_width),
                self.config.segment_height_px,
            ),
            None => TrackLayout::default(),
        }
    }

    pub fn interaction_settings(&self) -> InteractionSettings {
        self.config.interaction_settings()
    }

    /// Main track height plus gap plus overview height
    pub fn total_height(&self) -> f32 {
        (self.config.timeline_height_px + self.config.mini_timeline_height_px) as f32
            + super::MINI_TIMELINE_GAP
    }
}
