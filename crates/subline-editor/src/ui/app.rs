//! Main application state and iced implementation

use super::message::Message;
use crate::document::{demo_document, load_document, save_document, SubtitleDocument};
use iced::time::Instant;
use iced::widget::{button, column, container, row, scrollable, text, Id, Space};
use iced::{Element, Length, Subscription, Task, Theme};
use std::path::PathBuf;
use std::sync::LazyLock;
use subline_core::config::{load_config, save_config};
use subline_core::store::dispatch_all;
use subline_core::{CueId, FlavorId, SubtitleStore, TimelineConfig, TimelineSink, TimelineSource};
use subline_widgets::{subtitle_timeline, TimelineEvent, TimelineViewState};

/// Playback clock resolution
const TICK_MS: u64 = 33;

/// Cue list row height (used for scroll calculations)
const CUE_ROW_HEIGHT: f32 = 30.0;

const CUE_ROW_SPACING: f32 = 2.0;

/// Rows kept above a clicked cue when scrolling to it
const CUE_LIST_LEAD_ROWS: f32 = 2.0;

/// Scrollable ID for the cue list (used for programmatic scrolling)
static CUE_LIST_SCROLLABLE_ID: LazyLock<Id> = LazyLock::new(Id::unique);

/// Startup options parsed from the command line
#[derive(Debug, Clone, Default)]
pub struct AppOptions {
    /// Subtitle document to open (demo document when `None`)
    pub document: Option<PathBuf>,
    /// Timeline config file
    pub config_path: PathBuf,
}

/// Editor state
pub struct SublineApp {
    config: TimelineConfig,
    config_path: PathBuf,
    store: SubtitleStore,
    /// Flavors in document order
    flavors: Vec<FlavorId>,
    document_path: Option<PathBuf>,
    timeline: TimelineViewState,
    playing: bool,
    last_tick: Option<Instant>,
    /// Cue highlighted in the list (set by timeline clicks)
    selected_cue: Option<CueId>,
    status: String,
}

impl SublineApp {
    pub fn new(options: AppOptions) -> (Self, Task<Message>) {
        let mut config: TimelineConfig = load_config(&options.config_path);
        config.validate();
        log::info!(
            "Timeline config: cutout={}ms, end handle {}",
            config.timeline_cutout_ms,
            if config.end_handle_enabled { "on" } else { "off" }
        );

        let (document, status) = match &options.document {
            Some(path) => match load_document(path) {
                Ok(document) => (document, format!("Opened {}", path.display())),
                Err(e) => {
                    log::warn!("Falling back to demo document: {:#}", e);
                    (demo_document(), format!("Could not open {}: {:#}", path.display(), e))
                }
            },
            None => (demo_document(), String::from("Demo document")),
        };

        (Self::with_document(config, options, document, status), Task::none())
    }

    fn with_document(
        config: TimelineConfig,
        options: AppOptions,
        document: SubtitleDocument,
        status: String,
    ) -> Self {
        let flavors = flavor_order(&document);
        let (store, flavors, status) = match document.into_store() {
            Ok(store) => (store, flavors, status),
            Err(e) => {
                log::warn!("Rejected document: {:#}", e);
                let demo = demo_document();
                let flavors = flavor_order(&demo);
                let store = demo.into_store().unwrap_or_default();
                (store, flavors, format!("Rejected document: {:#}", e))
            }
        };
        let timeline = TimelineViewState::from_source(config.clone(), &store);

        Self {
            config,
            config_path: options.config_path,
            store,
            flavors,
            document_path: options.document,
            timeline,
            playing: false,
            last_tick: None,
            selected_cue: None,
            status,
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        let mut task = Task::none();
        match message {
            Message::Timeline(event) => task = self.apply_timeline_event(event),
            Message::SelectFlavor(flavor) => {
                if let Err(e) = self.store.select_flavor(flavor) {
                    log::warn!("{}", e);
                    self.status = e.to_string();
                }
                self.selected_cue = None;
            }
            Message::TogglePlayback => {
                self.playing = !self.playing;
                self.last_tick = None;
            }
            Message::Tick(now) => self.advance_playback(now),
            Message::SaveDocument => self.save_document(),
            Message::ToggleEndHandle => {
                self.config.end_handle_enabled = !self.config.end_handle_enabled;
                match save_config(&self.config, &self.config_path) {
                    Ok(()) => self.status = String::from("Config saved"),
                    Err(e) => {
                        log::warn!("Failed to save config: {:#}", e);
                        self.status = format!("Failed to save config: {:#}", e);
                    }
                }
                self.timeline.config = self.config.clone();
            }
        }
        self.timeline.refresh(&self.store);
        task
    }

    /// Apply canvas actions, then consume the notices they raised
    ///
    /// A segment click selects the cue and scrolls the cue list to it.
    fn apply_timeline_event(&mut self, event: TimelineEvent) -> Task<Message> {
        let mut task = Task::none();
        if let Err(e) = dispatch_all(&mut self.store, event.into_actions()) {
            log::warn!("Timeline action failed: {}", e);
            self.status = e.to_string();
        }

        if let Some(cue_id) = self.store.take_segment_click() {
            log::debug!("cue list: select '{}'", cue_id);
            self.status = format!("Selected {}", cue_id);
            if let Some(target_y) = self.cue_list_offset(&cue_id) {
                let offset = scrollable::AbsoluteOffset { x: 0.0, y: target_y };
                task = iced::advanced::widget::operate(
                    iced::advanced::widget::operation::scrollable::scroll_to(
                        CUE_LIST_SCROLLABLE_ID.clone().into(),
                        offset.into(),
                    ),
                );
            }
            self.selected_cue = Some(cue_id);
        }

        if self.store.take_seek_triggered() {
            log::info!("user seek to {}ms", self.store.current_position());
            self.last_tick = None;
        }
        task
    }

    /// Cue list scroll offset that shows `cue_id` near the top
    fn cue_list_offset(&self, cue_id: &CueId) -> Option<f32> {
        let index = self.store.selected_track()?.position_of(cue_id)?;
        let pitch = CUE_ROW_HEIGHT + CUE_ROW_SPACING;
        Some(((index as f32 - CUE_LIST_LEAD_ROWS) * pitch).max(0.0))
    }

    fn advance_playback(&mut self, now: Instant) {
        if !self.playing {
            return;
        }
        let elapsed = match self.last_tick {
            Some(last) => now.saturating_duration_since(last).as_millis() as u64,
            None => 0,
        };
        self.last_tick = Some(now);

        let duration = self.store.duration();
        let position = (self.store.current_position() + elapsed).min(duration);
        self.store.set_current_position(position);
        if position >= duration {
            self.playing = false;
        }
    }

    fn save_document(&mut self) {
        let Some(path) = self.document_path.clone() else {
            self.status = String::from("Demo document has no file; start with a path to save");
            return;
        };
        let document = SubtitleDocument::from_store(&self.store, &self.flavors);
        match save_document(&document, &path) {
            Ok(()) => self.status = format!("Saved {}", path.display()),
            Err(e) => {
                log::warn!("Failed to save document: {:#}", e);
                self.status = format!("Failed to save: {:#}", e);
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        column![
            self.view_header(),
            subtitle_timeline(&self.timeline, Message::Timeline),
            self.view_cue_list(),
            text(&self.status).size(14),
        ]
        .spacing(10)
        .padding(10)
        .into()
    }

    /// Flavor tabs, transport and persistence controls
    fn view_header(&self) -> Element<'_, Message> {
        let selected = self.store.selected_flavor();
        let mut tabs = row![].spacing(6);
        for flavor in &self.flavors {
            tabs = tabs.push(
                button(text(flavor.as_str()))
                    .on_press(Message::SelectFlavor(flavor.clone()))
                    .style(if selected == Some(flavor) {
                        button::primary
                    } else {
                        button::secondary
                    }),
            );
        }

        let play_btn = button(text(if self.playing { "Pause" } else { "Play" }))
            .on_press(Message::TogglePlayback);
        let end_handle_btn = button(text(if self.config.end_handle_enabled {
            "End handle: on"
        } else {
            "End handle: off"
        }))
        .on_press(Message::ToggleEndHandle)
        .style(button::secondary);
        let save_btn = button(text("Save")).on_press(Message::SaveDocument);

        row![
            text("subline").size(24),
            tabs,
            Space::new().width(Length::Fill),
            text(format_timestamp(self.store.current_position())).size(18),
            play_btn,
            end_handle_btn,
            save_btn,
        ]
        .spacing(10)
        .into()
    }

    /// Cues of the selected flavor, the clicked one highlighted
    fn view_cue_list(&self) -> Element<'_, Message> {
        let mut list = column![].spacing(CUE_ROW_SPACING);
        if let Some(track) = self.store.selected_track() {
            for cue in &track.cues {
                let line = row![
                    text(format_timestamp(cue.start_time)).width(Length::Fixed(90.0)),
                    text(format_timestamp(cue.end_time)).width(Length::Fixed(90.0)),
                    text(&cue.text),
                ]
                .spacing(10);
                let entry = container(line)
                    .padding(4)
                    .width(Length::Fill)
                    .height(Length::Fixed(CUE_ROW_HEIGHT));
                list = list.push(if self.selected_cue.as_ref() == Some(&cue.id) {
                    entry.style(container::rounded_box)
                } else {
                    entry
                });
            }
        }
        scrollable(list)
            .id(CUE_LIST_SCROLLABLE_ID.clone())
            .height(Length::Fill)
            .into()
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    /// Playback clock while playing
    pub fn subscription(&self) -> Subscription<Message> {
        if self.playing {
            iced::time::every(std::time::Duration::from_millis(TICK_MS)).map(Message::Tick)
        } else {
            Subscription::none()
        }
    }
}

fn flavor_order(document: &SubtitleDocument) -> Vec<FlavorId> {
    document.tracks.iter().map(|t| t.flavor.clone()).collect()
}

/// `mm:ss.mmm`
pub fn format_timestamp(ms: u64) -> String {
    let minutes = ms / 60_000;
    let seconds = (ms / 1000) % 60;
    format!("{:02}:{:02}.{:03}", minutes, seconds, ms % 1000)
}

#[cfg(test)]
mod tests {
    use super::*;
    use subline_core::{Cue, CueUpdate, TimelineAction, Track};

    fn app() -> SublineApp {
        let options = AppOptions {
            document: None,
            config_path: PathBuf::from("/nonexistent/subline/timeline.yaml"),
        };
        SublineApp::new(options).0
    }

    fn cues(app: &SublineApp) -> Vec<Cue> {
        app.store.selected_track().map(|t| t.cues.clone()).unwrap_or_default()
    }

    #[test]
    fn test_starts_with_demo_document() {
        let app = app();
        assert_eq!(app.flavors, vec![FlavorId::new("en"), FlavorId::new("de")]);
        assert_eq!(app.timeline.duration, 40_000);
        assert_eq!(app.timeline.track.as_ref().map(|t| t.len()), Some(6));
    }

    #[test]
    fn test_segment_click_selects_cue() {
        let mut app = app();
        let actions = vec![
            TimelineAction::SetCurrentPosition(4_000),
            TimelineAction::SetSegmentClickTriggered(true),
            TimelineAction::SetSegmentClicked(CueId::new("en-2")),
        ];
        app.update(Message::Timeline(TimelineEvent::Actions(actions)));

        assert_eq!(app.selected_cue, Some(CueId::new("en-2")));
        assert_eq!(app.timeline.current_position, 4_000);
        assert!(!app.store.segment_click_triggered());
    }

    #[test]
    fn test_cue_list_offset_follows_click() {
        let app = app();
        let pitch = CUE_ROW_HEIGHT + CUE_ROW_SPACING;
        // Rows near the top stay at the top
        assert_eq!(app.cue_list_offset(&CueId::new("en-1")), Some(0.0));
        assert_eq!(app.cue_list_offset(&CueId::new("en-5")), Some(2.0 * pitch));
        assert_eq!(app.cue_list_offset(&CueId::new("de-1")), None);
    }

    #[test]
    fn test_commit_refreshes_timeline() {
        let mut app = app();
        let mut moved = cues(&app)[0].clone();
        moved.start_time = 500;
        moved.end_time = 3_000;
        let update = CueUpdate {
            flavor: FlavorId::new("en"),
            index: 0,
            new_cue: moved,
        };
        app.update(Message::Timeline(TimelineEvent::Actions(vec![
            TimelineAction::SetCueAtIndex(update),
        ])));

        let shown = &app.timeline.track.as_ref().unwrap().cues[0];
        assert_eq!((shown.start_time, shown.end_time), (500, 3_000));
    }

    #[test]
    fn test_failed_commit_sets_status() {
        let mut app = app();
        let update = CueUpdate {
            flavor: FlavorId::new("en"),
            index: 0,
            new_cue: Cue::new("missing", 0, 1, "?"),
        };
        app.update(Message::Timeline(TimelineEvent::Actions(vec![
            TimelineAction::SetCueAtIndex(update),
        ])));
        assert!(app.status.contains("missing"));
    }

    #[test]
    fn test_mini_seek_is_consumed() {
        let mut app = app();
        app.update(Message::Timeline(TimelineEvent::Actions(vec![
            TimelineAction::SetSeekTriggered(true),
            TimelineAction::SetCurrentPosition(20_000),
        ])));
        assert_eq!(app.store.current_position(), 20_000);
        assert!(!app.store.seek_triggered());
    }

    #[test]
    fn test_select_flavor() {
        let mut app = app();
        app.update(Message::SelectFlavor(FlavorId::new("de")));
        assert_eq!(app.timeline.track.as_ref().map(|t| t.len()), Some(3));

        app.update(Message::SelectFlavor(FlavorId::new("fr")));
        assert!(app.status.contains("fr"));
        assert_eq!(app.timeline.track.as_ref().map(|t| t.len()), Some(3));
    }

    #[test]
    fn test_playback_advances_and_stops() {
        let mut app = app();
        let start = Instant::now();
        app.update(Message::TogglePlayback);
        app.update(Message::Tick(start));
        app.update(Message::Tick(start + std::time::Duration::from_millis(250)));
        assert_eq!(app.store.current_position(), 250);

        app.update(Message::Tick(start + std::time::Duration::from_secs(3600)));
        assert_eq!(app.store.current_position(), 40_000);
        assert!(!app.playing);
    }

    #[test]
    fn test_toggle_end_handle_persists_config() {
        let dir = tempfile::tempdir().unwrap();
        let options = AppOptions {
            document: None,
            config_path: dir.path().join("timeline.yaml"),
        };
        let mut app = SublineApp::new(options.clone()).0;
        app.update(Message::ToggleEndHandle);
        assert!(app.timeline.config.end_handle_enabled);

        let reloaded: TimelineConfig = load_config(&options.config_path);
        assert!(reloaded.end_handle_enabled);
    }

    #[test]
    fn test_save_document_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.yaml");
        save_document(&demo_document(), &path).unwrap();

        let options = AppOptions {
            document: Some(path.clone()),
            config_path: dir.path().join("timeline.yaml"),
        };
        let mut app = SublineApp::new(options).0;
        let mut moved = cues(&app)[1].clone();
        moved.start_time = 4_500;
        app.update(Message::Timeline(TimelineEvent::Actions(vec![
            TimelineAction::SetCueAtIndex(CueUpdate {
                flavor: FlavorId::new("en"),
                index: 1,
                new_cue: moved,
            }),
        ])));
        app.update(Message::SaveDocument);

        let saved = load_document(&path).unwrap();
        assert_eq!(saved.tracks[0].cues[1].start_time, 4_500);
        assert_eq!(saved.tracks.len(), 2);
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0), "00:00.000");
        assert_eq!(format_timestamp(61_005), "01:01.005");
        assert_eq!(format_timestamp(3_600_000), "60:00.000");
    }

    #[test]
    fn test_rejected_document_falls_back_to_demo() {
        let document = SubtitleDocument {
            duration: 1000,
            tracks: vec![Track::new("xx", vec![Cue::new("bad", 900, 100, "x")])],
        };
        let app = SublineApp::with_document(
            TimelineConfig::default(),
            AppOptions::default(),
            document,
            String::new(),
        );
        assert!(app.status.starts_with("Rejected document"));
        assert_eq!(app.flavors, vec![FlavorId::new("en"), FlavorId::new("de")]);
    }
}
