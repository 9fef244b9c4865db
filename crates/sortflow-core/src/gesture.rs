#![forbid(unsafe_code)]

//! Drag gesture recognition.
//!
//! [`GestureRecognizer`] converts raw [`Event`]s into [`SemanticEvent`]s. It
//! tracks a single pointer: press → (move past threshold) → drag → release.
//!
//! # Invariants
//!
//! 1. Drag and Click never both emit for the same press → release interaction.
//! 2. `DragStart` is emitted at most once per press and always before any
//!    `DragMove` of that press.
//! 3. After [`reset`](GestureRecognizer::reset) the recognizer is idle and will
//!    not emit `DragEnd` for a release that follows.
//!
//! # Failure Modes
//!
//! - A `Drag` event with no preceding press (the press was delivered to
//!   another surface) starts tracking at that position; the threshold still
//!   applies from there.
//! - Escape or focus loss during a started drag emits `DragCancel`. Before
//!   the threshold is crossed they just forget the press.

use crate::event::{Event, KeyCode, KeyEventKind, PointerButton, PointerEventKind};
use crate::geometry::Point;
use crate::semantic_event::SemanticEvent;

/// Thresholds for gesture recognition.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GestureConfig {
    /// Minimum Manhattan distance before a press becomes a drag (default: 3.0).
    pub drag_threshold: f32,
    /// Whether Escape cancels an active drag (default: true).
    pub cancel_on_escape: bool,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            drag_threshold: 3.0,
            cancel_on_escape: true,
        }
    }
}

impl GestureConfig {
    #[must_use]
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.drag_threshold = threshold.max(0.0);
        self
    }

    #[must_use]
    pub fn no_escape_cancel(mut self) -> Self {
        self.cancel_on_escape = false;
        self
    }
}

#[derive(Debug, Clone, Copy)]
struct DragTracker {
    start: Point,
    last: Point,
    button: PointerButton,
    started: bool,
}

/// Stateful recognizer for press / click / drag.
#[derive(Debug, Clone, Default)]
pub struct GestureRecognizer {
    config: GestureConfig,
    tracker: Option<DragTracker>,
}

impl GestureRecognizer {
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            tracker: None,
        }
    }

    /// Process a raw event, returning the semantic events it produced.
    ///
    /// Most events produce zero or one semantic event; the move that crosses
    /// the drag threshold produces `DragStart` followed by `DragMove`.
    pub fn process(&mut self, event: &Event) -> Vec<SemanticEvent> {
        let mut out = Vec::with_capacity(2);
        match event {
            Event::Pointer(pointer) => {
                let pos = pointer.position;
                match pointer.kind {
                    PointerEventKind::Down(button) => self.on_down(pos, button, &mut out),
                    PointerEventKind::Drag(button) => self.on_drag(pos, button, &mut out),
                    PointerEventKind::Up(button) => self.on_up(pos, button, &mut out),
                    PointerEventKind::Moved
                    | PointerEventKind::ScrollUp
                    | PointerEventKind::ScrollDown => {}
                }
            }
            Event::Key(key) => {
                if key.kind == KeyEventKind::Press
                    && key.code == KeyCode::Escape
                    && self.config.cancel_on_escape
                {
                    self.abort(&mut out);
                }
            }
            Event::Focus(false) => self.abort(&mut out),
            Event::Focus(true) => {}
        }
        out
    }

    /// Whether a drag has crossed the threshold and not yet ended.
    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.tracker.is_some_and(|t| t.started)
    }

    /// Whether a button is currently held (drag started or not).
    #[inline]
    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.tracker.is_some()
    }

    /// Drop all tracking state without emitting anything.
    pub fn reset(&mut self) {
        self.tracker = None;
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: GestureConfig) {
        self.config = config;
    }

    fn on_down(&mut self, pos: Point, button: PointerButton, out: &mut Vec<SemanticEvent>) {
        // A second press while dragging (another button) ends nothing; the
        // first button keeps ownership of the gesture.
        if self.is_dragging() {
            return;
        }
        self.tracker = Some(DragTracker {
            start: pos,
            last: pos,
            button,
            started: false,
        });
        out.push(SemanticEvent::Press { pos, button });
    }

    fn on_drag(&mut self, pos: Point, button: PointerButton, out: &mut Vec<SemanticEvent>) {
        let threshold = self.config.drag_threshold;
        let tracker = self.tracker.get_or_insert(DragTracker {
            start: pos,
            last: pos,
            button,
            started: false,
        });
        if tracker.button != button {
            return;
        }

        if !tracker.started && tracker.start.manhattan_distance(pos) >= threshold {
            tracker.started = true;
            out.push(SemanticEvent::DragStart {
                start: tracker.start,
                pos,
                button,
            });
        }

        if tracker.started {
            out.push(SemanticEvent::DragMove {
                start: tracker.start,
                current: pos,
                delta: (pos.x - tracker.last.x, pos.y - tracker.last.y),
            });
        }
        tracker.last = pos;
    }

    fn on_up(&mut self, pos: Point, button: PointerButton, out: &mut Vec<SemanticEvent>) {
        let Some(tracker) = self.tracker else {
            return;
        };
        if tracker.button != button {
            return;
        }
        self.tracker = None;
        if tracker.started {
            out.push(SemanticEvent::DragEnd {
                start: tracker.start,
                end: pos,
            });
        } else {
            out.push(SemanticEvent::Click { pos, button });
        }
    }

    fn abort(&mut self, out: &mut Vec<SemanticEvent>) {
        if let Some(tracker) = self.tracker.take()
            && tracker.started
        {
            out.push(SemanticEvent::DragCancel);
        }
    }
}
