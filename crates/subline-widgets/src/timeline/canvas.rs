//! Canvas Program for the subtitle timeline
//!
//! Main track and miniature overview share one canvas, the same way the
//! combined waveform view does. Pointer positions are converted from viewport
//! space to track space here; everything else is delegated to `subline-core`.

use super::message::TimelineEvent;
use super::state::TimelineViewState;
use crate::theme;
use iced::alignment::Vertical;
use iced::keyboard::{self, key};
use iced::widget::canvas::{self, Event, Frame, Geometry, Path, Program, Stroke, Text};
use iced::{mouse, Point, Rectangle, Size, Theme};
use subline_core::sync::{
    mini_marker_offset, playhead_anchor_x, seek_from_mini_click, track_to_viewport_x,
    viewport_to_track_x,
};
use subline_core::geometry::HANDLE_WIDTH_PX;
use subline_core::{InteractionController, SegmentHit, TrackScale, ViewportSync};

/// Gap between the main track and the miniature overview
pub const MINI_TIMELINE_GAP: f32 = 4.0;

/// Playhead triangle size
const PLAYHEAD_TRIANGLE: f32 = 8.0;

/// Horizontal text inset inside a segment box
const SEGMENT_TEXT_INSET: f32 = 6.0;

const SEGMENT_TEXT_SIZE: f32 = 14.0;

/// Average glyph advance as a fraction of the text size
const GLYPH_ADVANCE: f32 = 0.6;

// =============================================================================
// Canvas Interaction State
// =============================================================================

/// Canvas state: the running gesture and the last reconciled scroll offset
#[derive(Debug, Clone, Default)]
pub struct TimelineInteraction {
    pub controller: InteractionController,
    pub sync: ViewportSync,
}

// =============================================================================
// Layout
// =============================================================================

/// Main track and overview regions inside the canvas bounds
fn regions(state: &TimelineViewState, bounds: Rectangle) -> (Rectangle, Rectangle) {
    let main_height = state.config.timeline_height_px as f32;
    let main = Rectangle {
        x: bounds.x,
        y: bounds.y,
        width: bounds.width,
        height: main_height,
    };
    let mini = Rectangle {
        x: bounds.x,
        y: bounds.y + main_height + MINI_TIMELINE_GAP,
        width: bounds.width,
        height: state.config.mini_timeline_height_px as f32,
    };
    (main, mini)
}

/// Top of the segment row, vertically centered in the main track
fn segment_top(state: &TimelineViewState) -> f32 {
    ((state.config.timeline_height_px - state.config.segment_height_px) / 2.0).max(0.0) as f32
}

// =============================================================================
// Timeline Canvas Program
// =============================================================================

/// Canvas program for the subtitle timeline
///
/// Takes a callback closure `on_event` that wraps every [`TimelineEvent`] into
/// the application's message type.
pub struct TimelineCanvas<'a, Message, F>
where
    F: Fn(TimelineEvent) -> Message,
{
    pub state: &'a TimelineViewState,
    pub on_event: F,
}

impl<'a, Message, F> TimelineCanvas<'a, Message, F>
where
    F: Fn(TimelineEvent) -> Message,
{
    fn publish(&self, event: TimelineEvent) -> canvas::Action<Message> {
        canvas::Action::publish((self.on_event)(event)).and_capture()
    }

    fn to_track_x(&self, interaction: &TimelineInteraction, x_in_bounds: f32, width: f32) -> f64 {
        to_track_x(self.state, interaction, x_in_bounds, width)
    }
}

/// Viewport x (relative to the canvas) to main track x
fn to_track_x(
    state: &TimelineViewState,
    interaction: &TimelineInteraction,
    x_in_bounds: f32,
    width: f32,
) -> f64 {
    let scroll_left = interaction.sync.scroll_left_for(
        state.current_position,
        state.duration,
        width as f64,
        state.scroll_geometry(width),
    );
    viewport_to_track_x(x_in_bounds as f64, scroll_left, width as f64)
}

/// Segment part under a viewport x
fn hit_at(
    state: &TimelineViewState,
    interaction: &TimelineInteraction,
    x_in_bounds: f32,
    width: f32,
) -> Option<SegmentHit> {
    let x = to_track_x(state, interaction, x_in_bounds, width);
    state
        .layout(width)
        .hit_test(x, state.config.end_handle_enabled)
        .map(|(_, hit)| hit)
}

impl<'a, Message, F> Program<Message> for TimelineCanvas<'a, Message, F>
where
    Message: Clone,
    F: Fn(TimelineEvent) -> Message,
{
    type State = TimelineInteraction;

    fn update(
        &self,
        interaction: &mut Self::State,
        event: &Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<Message>> {
        let width = bounds.width;
        let (main_bounds, mini_bounds) = regions(self.state, bounds);
        let scale = self.state.main_scale(width);
        let settings = self.state.interaction_settings();

        interaction.sync.reconcile(
            self.state.current_position,
            self.state.duration,
            width as f64,
            self.state.scroll_geometry(width),
        );

        match event {
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                if let Some(position) = cursor.position_in(main_bounds) {
                    let track = self.state.track.as_ref()?;
                    let x = self.to_track_x(interaction, position.x, width);
                    if interaction.controller.press(x, track, scale, &settings) {
                        return Some(canvas::Action::request_redraw().and_capture());
                    }
                } else if let Some(position) = cursor.position_in(mini_bounds) {
                    let actions =
                        seek_from_mini_click(position.x as f64, width as f64, self.state.duration);
                    return Some(self.publish(TimelineEvent::Actions(actions.to_vec())));
                }
            }
            Event::Mouse(mouse::Event::CursorMoved { position }) => {
                if interaction.controller.is_active() {
                    let x = self.to_track_x(interaction, position.x - bounds.x, width);
                    if interaction.controller.pointer_moved(x, scale, &settings) {
                        return Some(canvas::Action::request_redraw());
                    }
                }
            }
            Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                if interaction.controller.is_active() {
                    if let Some(position) = cursor.position() {
                        let x = self.to_track_x(interaction, position.x - bounds.x, width);
                        interaction.controller.pointer_moved(x, scale, &settings);
                    }
                    if let Some(outcome) = interaction.controller.release(scale) {
                        return Some(self.publish(TimelineEvent::Actions(outcome.into_actions())));
                    }
                }
            }
            Event::Mouse(mouse::Event::CursorLeft)
            | Event::Keyboard(keyboard::Event::KeyPressed {
                key: keyboard::Key::Named(key::Named::Escape),
                ..
            }) => {
                if interaction.controller.is_active() {
                    interaction.controller.cancel();
                    return Some(canvas::Action::request_redraw());
                }
            }
            _ => {}
        }

        None
    }

    fn mouse_interaction(
        &self,
        interaction: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if interaction.controller.is_dragging() {
            return mouse::Interaction::Grabbing;
        }
        if interaction.controller.is_resizing() {
            return mouse::Interaction::ResizingHorizontally;
        }

        let (main_bounds, mini_bounds) = regions(self.state, bounds);
        if let Some(position) = cursor.position_in(main_bounds) {
            match hit_at(self.state, interaction, position.x, bounds.width) {
                Some(SegmentHit::Handle(_)) => mouse::Interaction::ResizingHorizontally,
                Some(SegmentHit::Body) => mouse::Interaction::Grab,
                None => mouse::Interaction::default(),
            }
        } else if cursor.is_over(mini_bounds) {
            mouse::Interaction::Pointer
        } else {
            mouse::Interaction::default()
        }
    }

    fn draw(
        &self,
        interaction: &Self::State,
        renderer: &iced::Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let width = bounds.width;
        let scroll_left = interaction.sync.scroll_left_for(
            self.state.current_position,
            self.state.duration,
            width as f64,
            self.state.scroll_geometry(width),
        );

        // =====================================================================
        // MAIN TRACK (top section)
        // =====================================================================
        draw_main_track(&mut frame, self.state, &interaction.controller, scroll_left, width);

        // =====================================================================
        // MINIATURE OVERVIEW (bottom section)
        // =====================================================================
        draw_mini_track(&mut frame, self.state, width);

        vec![frame.into_geometry()]
    }
}

// =============================================================================
// Drawing Helper Functions
// =============================================================================

/// Draw the zoomed main track: padding, segments, playhead
fn draw_main_track(
    frame: &mut Frame,
    state: &TimelineViewState,
    controller: &InteractionController,
    scroll_left: f64,
    width: f32,
) {
    let height = state.config.timeline_height_px as f32;
    let client_width = width as f64;

    frame.fill_rectangle(Point::ORIGIN, Size::new(width, height), theme::TRACK_PADDING_BG);

    let scale = state.main_scale(width);
    if scale.is_ready() {
        let track_start = track_to_viewport_x(0.0, scroll_left, client_width) as f32;
        frame.fill_rectangle(
            Point::new(track_start, 0.0),
            Size::new(scale.width_px as f32, height),
            theme::TRACK_BG,
        );

        if let Some(track) = &state.track {
            let layout = state.layout(width);
            let top = segment_top(state);
            for (index, (cue, committed)) in track.cues.iter().zip(&layout.segments).enumerate() {
                let geometry = controller.display_geometry(index, *committed);
                let x = track_to_viewport_x(geometry.left_px, scroll_left, client_width) as f32;
                let segment = Rectangle {
                    x,
                    y: top,
                    width: geometry.width_px as f32,
                    height: geometry.height_px as f32,
                };
                if segment.x + segment.width < 0.0 || segment.x > width {
                    continue;
                }
                let active = controller.active_index() == Some(index);
                draw_segment(frame, segment, &cue.text, active, state.config.end_handle_enabled);
            }
        }
    }

    draw_playhead(frame, playhead_anchor_x(client_width) as f32, height);
}

/// Draw one segment box with its grips and clipped text
fn draw_segment(frame: &mut Frame, segment: Rectangle, text: &str, active: bool, end_handle: bool) {
    let fill = if active {
        theme::SEGMENT_ACTIVE_FILL
    } else {
        theme::SEGMENT_FILL
    };
    frame.fill_rectangle(segment.position(), segment.size(), fill);
    frame.stroke(
        &Path::rectangle(segment.position(), segment.size()),
        Stroke::default()
            .with_color(theme::SEGMENT_BORDER)
            .with_width(1.0),
    );

    let grip = (HANDLE_WIDTH_PX as f32).min(segment.width / 3.0);
    frame.fill_rectangle(
        segment.position(),
        Size::new(grip, segment.height),
        theme::HANDLE_COLOR,
    );
    if end_handle {
        frame.fill_rectangle(
            Point::new(segment.x + segment.width - grip, segment.y),
            Size::new(grip, segment.height),
            theme::HANDLE_COLOR,
        );
    }

    if text.is_empty() || segment.width <= SEGMENT_TEXT_INSET * 2.0 {
        return;
    }
    let content = ellipsize(text, segment.width - SEGMENT_TEXT_INSET * 2.0, SEGMENT_TEXT_SIZE);
    frame.with_clip(segment, |frame| {
        frame.fill_text(Text {
            content,
            position: Point::new(SEGMENT_TEXT_INSET, segment.height / 2.0),
            size: SEGMENT_TEXT_SIZE.into(),
            color: theme::SEGMENT_TEXT,
            align_y: Vertical::Center.into(),
            ..Text::default()
        });
    });
}

/// Shorten `text` with a trailing ellipsis so it fits `max_width`
fn ellipsize(text: &str, max_width: f32, size: f32) -> String {
    let advance = size * GLYPH_ADVANCE;
    let fits = (max_width / advance).floor().max(0.0) as usize;
    if text.chars().count() <= fits {
        return text.to_string();
    }
    if fits == 0 {
        return String::new();
    }
    let mut short: String = text.chars().take(fits - 1).collect();
    short.push('…');
    short
}

/// Fixed center playhead with its triangle
fn draw_playhead(frame: &mut Frame, x: f32, height: f32) {
    frame.stroke(
        &Path::line(Point::new(x, 0.0), Point::new(x, height)),
        Stroke::default()
            .with_color(theme::PLAYHEAD_COLOR)
            .with_width(2.0),
    );
    let triangle = Path::new(|builder| {
        builder.move_to(Point::new(x - PLAYHEAD_TRIANGLE, 0.0));
        builder.line_to(Point::new(x + PLAYHEAD_TRIANGLE, 0.0));
        builder.line_to(Point::new(x, PLAYHEAD_TRIANGLE * 1.5));
        builder.close();
    });
    frame.fill(&triangle, theme::PLAYHEAD_COLOR);
}

/// Draw the miniature overview: background, cue marks, position marker
fn draw_mini_track(frame: &mut Frame, state: &TimelineViewState, width: f32) {
    let y = state.config.timeline_height_px as f32 + MINI_TIMELINE_GAP;
    let height = state.config.mini_timeline_height_px as f32;

    frame.fill_rectangle(Point::new(0.0, y), Size::new(width, height), theme::MINI_BG);

    let scale: TrackScale = state.mini_scale(width);
    if !scale.is_ready() {
        return;
    }

    if let Some(track) = &state.track {
        for cue in &track.cues {
            let x = scale.time_to_pixel(cue.start_time as f64) as f32;
            let w = (scale.ms_to_px(cue.length() as f64) as f32).max(1.0);
            frame.fill_rectangle(
                Point::new(x, y + height * 0.25),
                Size::new(w, height * 0.5),
                theme::MINI_SEGMENT,
            );
        }
    }

    let marker_x = mini_marker_offset(state.current_position, state.duration, width as f64) as f32;
    frame.stroke(
        &Path::line(Point::new(marker_x, y), Point::new(marker_x, y + height)),
        Stroke::default()
            .with_color(theme::MINI_MARKER)
            .with_width(2.0),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use subline_core::{
        Cue, CueId, CueUpdate, FlavorId, ResizeHandle, TimelineAction, TimelineConfig, Track,
    };

    fn state() -> TimelineViewState {
        TimelineViewState::new(TimelineConfig::default())
            .with_duration(100_000)
            .with_position(0)
            .with_track(Track::new("en", vec![Cue::new("a", 0, 2000, "A")]))
    }

    #[test]
    fn test_regions_stack_main_over_mini() {
        let bounds = Rectangle::new(Point::new(10.0, 20.0), Size::new(800.0, 239.0));
        let (main, mini) = regions(&state(), bounds);
        assert_eq!(main.height, 220.0);
        assert_eq!(mini.y, 20.0 + 220.0 + MINI_TIMELINE_GAP);
        assert_eq!(mini.height, 15.0);
        assert_eq!(state().total_height(), 239.0);
    }

    #[test]
    fn test_segment_row_is_centered() {
        assert_eq!(segment_top(&state()), 70.0);
    }

    #[test]
    fn test_hit_at_playhead() {
        // Position 0 sits under the playhead, so the cue's leading edge is at the center
        let interaction = TimelineInteraction::default();
        assert_eq!(
            hit_at(&state(), &interaction, 401.0, 800.0),
            Some(SegmentHit::Handle(ResizeHandle::Start))
        );
        assert_eq!(hit_at(&state(), &interaction, 450.0, 800.0), Some(SegmentHit::Body));
        assert_eq!(hit_at(&state(), &interaction, 300.0, 800.0), None);
    }

    #[test]
    fn test_track_x_follows_scroll() {
        // At 50s the view is scrolled by half the 8000px track
        let state = state().with_position(50_000);
        let interaction = TimelineInteraction::default();
        assert_eq!(to_track_x(&state, &interaction, 400.0, 800.0), 4000.0);
        assert_eq!(to_track_x(&state, &interaction, 0.0, 800.0), 3600.0);
    }

    type EventCanvas<'a> = TimelineCanvas<'a, TimelineEvent, fn(TimelineEvent) -> TimelineEvent>;

    fn timeline_canvas(state: &TimelineViewState) -> EventCanvas<'_> {
        TimelineCanvas {
            state,
            on_event: |event| event,
        }
    }

    fn published(action: Option<canvas::Action<TimelineEvent>>) -> Option<TimelineEvent> {
        action.and_then(|action| action.into_inner().0)
    }

    fn left_press() -> Event {
        Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left))
    }

    fn left_release() -> Event {
        Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left))
    }

    #[test]
    fn test_drag_publishes_commit() {
        // Canvas offset in the window; the 8000px track starts under the playhead
        let bounds = Rectangle::new(Point::new(10.0, 20.0), Size::new(800.0, 239.0));
        let state = state();
        let canvas = timeline_canvas(&state);
        let mut interaction = TimelineInteraction::default();

        let pressed = Point::new(460.0, 120.0);
        let press = canvas.update(
            &mut interaction,
            &left_press(),
            bounds,
            mouse::Cursor::Available(pressed),
        );
        assert!(press.is_some());
        assert_eq!(published(press), None);

        let moved = Point::new(560.0, 120.0);
        canvas.update(
            &mut interaction,
            &Event::Mouse(mouse::Event::CursorMoved { position: moved }),
            bounds,
            mouse::Cursor::Available(moved),
        );
        assert!(interaction.controller.is_dragging());

        let release = canvas.update(
            &mut interaction,
            &left_release(),
            bounds,
            mouse::Cursor::Available(moved),
        );
        // 100px on an 8000px track of 100s is 1250ms
        let expected = Cue::new("a", 1250, 3250, "A");
        assert_eq!(
            published(release),
            Some(TimelineEvent::Actions(vec![TimelineAction::SetCueAtIndex(CueUpdate {
                flavor: FlavorId::new("en"),
                index: 0,
                new_cue: expected,
            })]))
        );
        assert!(!interaction.controller.is_active());
    }

    #[test]
    fn test_click_publishes_seek_and_notice() {
        let bounds = Rectangle::new(Point::ORIGIN, Size::new(800.0, 239.0));
        let state = state().with_position(1000);
        let canvas = timeline_canvas(&state);
        let mut interaction = TimelineInteraction::default();

        // Position 1000 is 80px into the track, so the cue body is left of the playhead
        let cursor = mouse::Cursor::Available(Point::new(380.0, 100.0));
        canvas.update(&mut interaction, &left_press(), bounds, cursor);
        let release = canvas.update(&mut interaction, &left_release(), bounds, cursor);

        assert_eq!(
            published(release),
            Some(TimelineEvent::Actions(vec![
                TimelineAction::SetCurrentPosition(0),
                TimelineAction::SetSegmentClickTriggered(true),
                TimelineAction::SetSegmentClicked(CueId::new("a")),
            ]))
        );
    }

    #[test]
    fn test_mini_click_seeks_over_full_width() {
        let bounds = Rectangle::new(Point::new(10.0, 20.0), Size::new(800.0, 239.0));
        let state = state();
        let canvas = timeline_canvas(&state);
        let mut interaction = TimelineInteraction::default();

        // Mini track spans y 244..259 in window coordinates
        let cursor = mouse::Cursor::Available(Point::new(410.0, 250.0));
        let action = canvas.update(&mut interaction, &left_press(), bounds, cursor);

        assert_eq!(
            published(action),
            Some(TimelineEvent::Actions(vec![
                TimelineAction::SetSeekTriggered(true),
                TimelineAction::SetCurrentPosition(50_000),
            ]))
        );
    }

    #[test]
    fn test_escape_cancels_drag() {
        let bounds = Rectangle::new(Point::ORIGIN, Size::new(800.0, 239.0));
        let state = state();
        let canvas = timeline_canvas(&state);
        let mut interaction = TimelineInteraction::default();

        let cursor = mouse::Cursor::Available(Point::new(450.0, 100.0));
        canvas.update(&mut interaction, &left_press(), bounds, cursor);
        canvas.update(
            &mut interaction,
            &Event::Mouse(mouse::Event::CursorMoved {
                position: Point::new(600.0, 100.0),
            }),
            bounds,
            cursor,
        );
        assert!(interaction.controller.is_dragging());

        canvas.update(&mut interaction, &Event::Mouse(mouse::Event::CursorLeft), bounds, cursor);
        assert!(!interaction.controller.is_active());
        let release = canvas.update(&mut interaction, &left_release(), bounds, cursor);
        assert_eq!(published(release), None);
    }

    #[test]
    fn test_ellipsize() {
        // 14px text advances 8.4px per glyph
        assert_eq!(ellipsize("Hello", 100.0, 14.0), "Hello");
        assert_eq!(ellipsize("Hello, world", 50.0, 14.0), "Hell…");
        assert_eq!(ellipsize("Hello", 5.0, 14.0), "");
    }
}
