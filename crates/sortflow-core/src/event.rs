#![forbid(unsafe_code)]

//! Canonical input event types.
//!
//! Pointer positions are in screen space as `f32`. Terminal front-ends that
//! report cell coordinates convert them one-to-one (see the `crossterm`
//! feature); graphical front-ends pass logical pixels.
//!
//! # Design Notes
//!
//! - Only the events the rearrangeable list reacts to are modelled: pointer
//!   buttons, motion, wheel, a handful of keys, and focus changes.
//! - `Modifiers` use bitflags for easy combination.

use crate::geometry::Point;
use bitflags::bitflags;
#[cfg(feature = "crossterm")]
use crossterm::event as cte;

/// Canonical input event.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A pointer (mouse) event.
    Pointer(PointerEvent),

    /// A keyboard event.
    Key(KeyEvent),

    /// Focus gained (`true`) or lost (`false`).
    ///
    /// Focus loss cancels an in-flight drag.
    Focus(bool),
}

impl Event {
    /// Convert a crossterm event, dropping kinds with no counterpart.
    #[cfg(feature = "crossterm")]
    #[must_use]
    pub fn from_crossterm(event: cte::Event) -> Option<Self> {
        match event {
            cte::Event::Key(key) => map_key_event(key).map(Event::Key),
            cte::Event::Mouse(mouse) => Some(Event::Pointer(map_mouse_event(mouse))),
            cte::Event::FocusGained => Some(Event::Focus(true)),
            cte::Event::FocusLost => Some(Event::Focus(false)),
            _ => None,
        }
    }
}

impl From<PointerEvent> for Event {
    fn from(event: PointerEvent) -> Self {
        Event::Pointer(event)
    }
}

impl From<KeyEvent> for Event {
    fn from(event: KeyEvent) -> Self {
        Event::Key(event)
    }
}

/// A pointer event in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// What happened.
    pub kind: PointerEventKind,

    /// Screen-space pointer position.
    pub position: Point,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl PointerEvent {
    #[must_use]
    pub const fn new(kind: PointerEventKind, position: Point) -> Self {
        Self {
            kind,
            position,
            modifiers: Modifiers::NONE,
        }
    }

    /// Button pressed at `(x, y)`.
    #[must_use]
    pub const fn down(button: PointerButton, x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Down(button), Point::new(x, y))
    }

    /// Button released at `(x, y)`.
    #[must_use]
    pub const fn up(button: PointerButton, x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Up(button), Point::new(x, y))
    }

    /// Pointer moved to `(x, y)` with `button` held.
    #[must_use]
    pub const fn drag(button: PointerButton, x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Drag(button), Point::new(x, y))
    }

    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Pointer event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    /// Button pressed down.
    Down(PointerButton),

    /// Button released.
    Up(PointerButton),

    /// Pointer moved while a button is held.
    Drag(PointerButton),

    /// Pointer moved with no button held.
    Moved,

    /// Wheel scrolled toward the start of the content.
    ScrollUp,

    /// Wheel scrolled toward the end of the content.
    ScrollDown,
}

/// Pointer buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointerButton {
    #[default]
    Left,
    Right,
    Middle,
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Key press with no modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }
}

/// Key codes the list cares about; everything else maps to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Escape,
    Backspace,
    Delete,
    Up,
    Down,
    Home,
    End,
    /// Any key without a dedicated variant.
    Other,
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    #[default]
    Press,
    Repeat,
    Release,
}

bitflags! {
    /// Modifier keys held during an event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const NONE  = 0b0000;
        const SHIFT = 0b0001;
        const ALT   = 0b0010;
        const CTRL  = 0b0100;
        const SUPER = 0b1000;
    }
}

#[cfg(feature = "crossterm")]
fn map_key_event(event: cte::KeyEvent) -> Option<KeyEvent> {
    let code = match event.code {
        cte::KeyCode::Char(c) => KeyCode::Char(c),
        cte::KeyCode::Enter => KeyCode::Enter,
        cte::KeyCode::Esc => KeyCode::Escape,
        cte::KeyCode::Backspace => KeyCode::Backspace,
        cte::KeyCode::Delete => KeyCode::Delete,
        cte::KeyCode::Up => KeyCode::Up,
        cte::KeyCode::Down => KeyCode::Down,
        cte::KeyCode::Home => KeyCode::Home,
        cte::KeyCode::End => KeyCode::End,
        cte::KeyCode::Modifier(_) => return None,
        _ => KeyCode::Other,
    };
    let kind = match event.kind {
        cte::KeyEventKind::Press => KeyEventKind::Press,
        cte::KeyEventKind::Repeat => KeyEventKind::Repeat,
        cte::KeyEventKind::Release => KeyEventKind::Release,
    };
    Some(KeyEvent {
        code,
        modifiers: map_modifiers(event.modifiers),
        kind,
    })
}

#[cfg(feature = "crossterm")]
fn map_modifiers(modifiers: cte::KeyModifiers) -> Modifiers {
    let mut mapped = Modifiers::NONE;
    if modifiers.contains(cte::KeyModifiers::SHIFT) {
        mapped |= Modifiers::SHIFT;
    }
    if modifiers.contains(cte::KeyModifiers::ALT) {
        mapped |= Modifiers::ALT;
    }
    if modifiers.contains(cte::KeyModifiers::CONTROL) {
        mapped |= Modifiers::CTRL;
    }
    if modifiers.intersects(
        cte::KeyModifiers::SUPER | cte::KeyModifiers::HYPER | cte::KeyModifiers::META,
    ) {
        mapped |= Modifiers::SUPER;
    }
    mapped
}

#[cfg(feature = "crossterm")]
fn map_mouse_event(event: cte::MouseEvent) -> PointerEvent {
    let kind = match event.kind {
        cte::MouseEventKind::Down(button) => PointerEventKind::Down(map_mouse_button(button)),
        cte::MouseEventKind::Up(button) => PointerEventKind::Up(map_mouse_button(button)),
        cte::MouseEventKind::Drag(button) => PointerEventKind::Drag(map_mouse_button(button)),
        cte::MouseEventKind::ScrollUp => PointerEventKind::ScrollUp,
        cte::MouseEventKind::ScrollDown => PointerEventKind::ScrollDown,
        cte::MouseEventKind::Moved
        | cte::MouseEventKind::ScrollLeft
        | cte::MouseEventKind::ScrollRight => PointerEventKind::Moved,
    };
    let position = Point::new(f32::from(event.column), f32::from(event.row));
    PointerEvent::new(kind, position).with_modifiers(map_modifiers(event.modifiers))
}

#[cfg(feature = "crossterm")]
fn map_mouse_button(button: cte::MouseButton) -> PointerButton {
    match button {
        cte::MouseButton::Left => PointerButton::Left,
        cte::MouseButton::Right => PointerButton::Right,
        cte::MouseButton::Middle => PointerButton::Middle,
    }
}
