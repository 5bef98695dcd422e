//! Shared timeline state: read/write contracts and an in-memory store
//!
//! Duration, current position and the cue tracks are shared between the
//! timeline and its collaborators (playback, list view). Instead of reaching
//! into global state, components get an explicit handle:
//!
//! | Component     | Reads                  | Writes                                  |
//! |---------------|------------------------|-----------------------------------------|
//! | `mapper`      | –                      | –                                       |
//! | `geometry`    | duration, cues         | –                                       |
//! | `interaction` | duration, cues         | cue at index, position, click notices   |
//! | `sync`        | position, duration     | position, seek-triggered flag           |
//!
//! Controllers do not write directly: they return [`TimelineAction`]s and the
//! owner applies them to a [`TimelineSink`]. Writes are last-write-wins; the
//! input model guarantees a single writer at a time.

use crate::error::{TimelineError, TimelineResult};
use crate::types::{Cue, CueId, FlavorId, Track};

/// Read access to shared timeline state
pub trait TimelineSource {
    /// Total timeline length in milliseconds (0 until media is loaded)
    fn duration(&self) -> u64;

    /// Flavor currently shown on the timeline
    fn selected_flavor(&self) -> Option<&FlavorId>;

    /// Ordered cues of a flavor
    fn cues_for_flavor(&self, flavor: &FlavorId) -> Option<&[Cue]>;

    /// Playhead position in milliseconds
    fn current_position(&self) -> u64;
}

/// Write access to shared timeline state
pub trait TimelineSink {
    fn set_current_position(&mut self, position: u64);

    /// Marks the last seek as user-initiated (consumers may sync playback)
    fn set_seek_triggered(&mut self, triggered: bool);

    /// Replace a cue wholesale; the only way a time-range edit reaches shared state
    fn set_cue_at_index(&mut self, update: CueUpdate) -> TimelineResult<()>;

    fn set_segment_click_triggered(&mut self, triggered: bool);

    fn set_segment_clicked(&mut self, cue_id: CueId);
}

/// Payload of a committed time-range edit
#[derive(Debug, Clone, PartialEq)]
pub struct CueUpdate {
    pub flavor: FlavorId,
    /// Index of the cue in the track as rendered when the gesture started
    pub index: usize,
    /// Replacement cue (same id and payload, new times)
    pub new_cue: Cue,
}

/// One externally observable state change
#[derive(Debug, Clone, PartialEq)]
pub enum TimelineAction {
    SetCurrentPosition(u64),
    SetSeekTriggered(bool),
    SetCueAtIndex(CueUpdate),
    SetSegmentClickTriggered(bool),
    SetSegmentClicked(CueId),
}

impl TimelineAction {
    /// Perform this action on a sink
    pub fn apply<S: TimelineSink + ?Sized>(self, sink: &mut S) -> TimelineResult<()> {
        match self {
            Self::SetCurrentPosition(position) => sink.set_current_position(position),
            Self::SetSeekTriggered(triggered) => sink.set_seek_triggered(triggered),
            Self::SetCueAtIndex(update) => return sink.set_cue_at_index(update),
            Self::SetSegmentClickTriggered(triggered) => {
                sink.set_segment_click_triggered(triggered)
            }
            Self::SetSegmentClicked(id) => sink.set_segment_clicked(id),
        }
        Ok(())
    }
}

/// Apply actions in order, stopping at the first failure
pub fn dispatch_all<S, I>(sink: &mut S, actions: I) -> TimelineResult<()>
where
    S: TimelineSink + ?Sized,
    I: IntoIterator<Item = TimelineAction>,
{
    for action in actions {
        action.apply(sink)?;
    }
    Ok(())
}

/// In-memory shared state for a subtitle document
#[derive(Debug, Clone, Default)]
pub struct SubtitleStore {
    duration: u64,
    current_position: u64,
    tracks: Vec<Track>,
    selected_flavor: Option<FlavorId>,
    seek_triggered: bool,
    segment_click_triggered: bool,
    segment_clicked: Option<CueId>,
}

impl SubtitleStore {
    pub fn new(duration: u64) -> Self {
        Self {
            duration,
            ..Self::default()
        }
    }

    /// Add or replace the track for its flavor; the first track becomes selected
    pub fn insert_track(&mut self, track: Track) {
        if self.selected_flavor.is_none() {
            self.selected_flavor = Some(track.flavor.clone());
        }
        match self.tracks.iter_mut().find(|t| t.flavor == track.flavor) {
            Some(existing) => *existing = track,
            None => self.tracks.push(track),
        }
    }

    pub fn select_flavor(&mut self, flavor: FlavorId) -> TimelineResult<()> {
        if self.track(&flavor).is_none() {
            return Err(TimelineError::UnknownFlavor(flavor));
        }
        self.selected_flavor = Some(flavor);
        Ok(())
    }

    pub fn track(&self, flavor: &FlavorId) -> Option<&Track> {
        self.tracks.iter().find(|t| &t.flavor == flavor)
    }

    /// Track of the selected flavor
    pub fn selected_track(&self) -> Option<&Track> {
        self.selected_flavor.as_ref().and_then(|flavor| self.track(flavor))
    }

    pub fn seek_triggered(&self) -> bool {
        self.seek_triggered
    }

    pub fn segment_click_triggered(&self) -> bool {
        self.segment_click_triggered
    }

    pub fn segment_clicked(&self) -> Option<&CueId> {
        self.segment_clicked.as_ref()
    }

    /// Consume the segment-click notification (list view side)
    pub fn take_segment_click(&mut self) -> Option<CueId> {
        if !self.segment_click_triggered {
            return None;
        }
        self.segment_click_triggered = false;
        self.segment_clicked.clone()
    }

    /// Consume the user-seek flag (playback side)
    pub fn take_seek_triggered(&mut self) -> bool {
        std::mem::replace(&mut self.seek_triggered, false)
    }
}

impl TimelineSource for SubtitleStore {
    fn duration(&self) -> u64 {
        self.duration
    }

    fn selected_flavor(&self) -> Option<&FlavorId> {
        self.selected_flavor.as_ref()
    }

    fn cues_for_flavor(&self, flavor: &FlavorId) -> Option<&[Cue]> {
        self.track(flavor).map(|track| track.cues.as_slice())
    }

    fn current_position(&self) -> u64 {
        self.current_position
    }
}

impl TimelineSink for SubtitleStore {
    fn set_current_position(&mut self, position: u64) {
        self.current_position = position;
    }

    fn set_seek_triggered(&mut self, triggered: bool) {
        self.seek_triggered = triggered;
    }

    /// Replace the cue, keyed by identity
    ///
    /// The index is trusted only while the cue there still carries the committed
    /// id. If the track was reordered or filtered since the gesture began, the
    /// cue is located by id instead.
    fn set_cue_at_index(&mut self, update: CueUpdate) -> TimelineResult<()> {
        let CueUpdate { flavor, index, new_cue } = update;
        let Some(track) = self.tracks.iter_mut().find(|t| t.flavor == flavor) else {
            return Err(TimelineError::UnknownFlavor(flavor));
        };

        let target = if track.cue_at(index).map(|cue| &cue.id) == Some(&new_cue.id) {
            index
        } else if let Some(found) = track.position_of(&new_cue.id) {
            log::warn!(
                "set_cue_at_index: cue '{}' moved from index {} to {} in flavor '{}', \
                 committing by id",
                new_cue.id,
                index,
                found,
                flavor
            );
            found
        } else {
            return Err(TimelineError::CueNotFound {
                flavor,
                index,
                id: new_cue.id,
            });
        };

        log::debug!(
            "set_cue_at_index: flavor={} index={} id={} {}..{}ms",
            flavor,
            target,
            new_cue.id,
            new_cue.start_time,
            new_cue.end_time
        );
        track.cues[target] = new_cue;
        Ok(())
    }

    fn set_segment_click_triggered(&mut self, triggered: bool) {
        self.segment_click_triggered = triggered;
    }

    fn set_segment_clicked(&mut self, cue_id: CueId) {
        self.segment_clicked = Some(cue_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SubtitleStore {
        let mut store = SubtitleStore::new(100_000);
        store.insert_track(Track::new(
            "en",
            vec![
                Cue::new("a", 0, 1000, "A"),
                Cue::new("b", 2000, 3000, "B"),
                Cue::new("c", 4000, 5000, "C"),
            ],
        ));
        store
    }

    fn update(index: usize, cue: Cue) -> CueUpdate {
        CueUpdate {
            flavor: FlavorId::new("en"),
            index,
            new_cue: cue,
        }
    }

    #[test]
    fn test_first_track_is_selected() {
        let store = store();
        assert_eq!(store.selected_flavor(), Some(&FlavorId::new("en")));
        assert_eq!(store.selected_track().map(|t| t.len()), Some(3));
    }

    #[test]
    fn test_set_cue_at_index_replaces_in_place() {
        let mut store = store();
        store
            .set_cue_at_index(update(1, Cue::new("b", 2500, 3500, "B")))
            .unwrap();

        let cues = store.cues_for_flavor(&FlavorId::new("en")).unwrap();
        assert_eq!((cues[1].start_time, cues[1].end_time), (2500, 3500));
        assert_eq!(cues.len(), 3);
        assert_eq!(cues[0].id, CueId::new("a"));
        assert_eq!(cues[2].id, CueId::new("c"));
    }

    #[test]
    fn test_stale_index_commits_by_id() {
        let mut store = store();
        // Index 0 holds "a" but the commit is for "c"
        store
            .set_cue_at_index(update(0, Cue::new("c", 6000, 7000, "C")))
            .unwrap();

        let cues = store.cues_for_flavor(&FlavorId::new("en")).unwrap();
        assert_eq!((cues[0].start_time, cues[0].end_time), (0, 1000));
        assert_eq!((cues[2].start_time, cues[2].end_time), (6000, 7000));
    }

    #[test]
    fn test_out_of_bounds_index_falls_back_to_id() {
        let mut store = store();
        store
            .set_cue_at_index(update(99, Cue::new("b", 0, 10, "B")))
            .unwrap();
        let cues = store.cues_for_flavor(&FlavorId::new("en")).unwrap();
        assert_eq!(cues[1].end_time, 10);
    }

    #[test]
    fn test_unknown_cue_is_an_error() {
        let mut store = store();
        let err = store
            .set_cue_at_index(update(99, Cue::new("zz", 0, 10, "?")))
            .unwrap_err();
        assert!(matches!(err, TimelineError::CueNotFound { index: 99, .. }));
    }

    #[test]
    fn test_unknown_flavor_is_an_error() {
        let mut store = store();
        let err = store
            .set_cue_at_index(CueUpdate {
                flavor: FlavorId::new("fr"),
                index: 0,
                new_cue: Cue::new("a", 0, 10, "A"),
            })
            .unwrap_err();
        assert_eq!(err, TimelineError::UnknownFlavor(FlavorId::new("fr")));
        assert!(store.select_flavor(FlavorId::new("fr")).is_err());
    }

    #[test]
    fn test_dispatch_all_applies_in_order() {
        let mut store = store();
        dispatch_all(
            &mut store,
            vec![
                TimelineAction::SetCurrentPosition(2000),
                TimelineAction::SetSegmentClickTriggered(true),
                TimelineAction::SetSegmentClicked(CueId::new("b")),
                TimelineAction::SetCurrentPosition(4000),
            ],
        )
        .unwrap();

        assert_eq!(store.current_position(), 4000);
        assert_eq!(store.take_segment_click(), Some(CueId::new("b")));
        assert_eq!(store.take_segment_click(), None);
    }

    #[test]
    fn test_take_seek_triggered_resets() {
        let mut store = store();
        TimelineAction::SetSeekTriggered(true).apply(&mut store).unwrap();
        assert!(store.seek_triggered());
        assert!(store.take_seek_triggered());
        assert!(!store.take_seek_triggered());
    }

    #[test]
    fn test_insert_track_replaces_same_flavor() {
        let mut store = store();
        store.insert_track(Track::new("en", vec![Cue::new("x", 0, 1, "X")]));
        store.insert_track(Track::new("de", vec![]));
        assert_eq!(store.track(&FlavorId::new("en")).map(|t| t.len()), Some(1));
        assert_eq!(store.selected_flavor(), Some(&FlavorId::new("en")));
        store.select_flavor(FlavorId::new("de")).unwrap();
        assert_eq!(store.selected_track().map(|t| t.is_empty()), Some(true));
    }
}
