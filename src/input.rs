//! Input routing.
//!
//! Two physical sources, keyboard and gamepad, are normalized into one
//! small command vocabulary.  Every gamepad event type is read here and
//! either translated or explicitly discarded; nothing falls through to
//! the host environment while capture is active.  The concrete
//! capture acquisition (raw mode, alternate screen) lives in the
//! frontend; the router only keeps the grab-active bookkeeping so the
//! release contract is checkable.

use crossterm::event::KeyCode;
use tracing::{debug, info, warn};

use crate::config::AXIS_DEADZONE;

/// The command vocabulary the state machine consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Up,
    Down,
    Left,
    Right,
    Confirm,
    Cancel,
    Pause,
    TextChar(char),
    Backspace,
}

/// Gamepad buttons, in the layout of the target handheld.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadButton {
    A,
    B,
    X,
    Y,
    L,
    R,
    Select,
    Start,
    Other(u8),
}

/// Gamepad analog axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadAxis {
    X,
    Y,
    Other(u8),
}

/// Raw device events as they arrive from the platform layer.  The pad
/// variants cover every event type the device can emit so that all of
/// them pass through the router.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawEvent {
    KeyDown(KeyCode),
    PadButtonDown(PadButton),
    PadButtonUp(PadButton),
    PadAxisMotion { axis: PadAxis, value: f32 },
    PadHatMotion { x: i8, y: i8 },
    PadBallMotion { dx: i16, dy: i16 },
    PadConnected { id: u32 },
    PadDisconnected { id: u32 },
}

/// Normalizes raw events into [`Command`]s.
#[derive(Debug)]
pub struct InputRouter {
    /// Whether exclusive gamepad capture is currently held.  While
    /// false, pad events are left for the host and never translated.
    captured: bool,
    /// In text mode (high-score name entry) letters become
    /// [`Command::TextChar`] instead of WASD steering.
    text_mode: bool,
    axis_x: f32,
    axis_y: f32,
    /// Axis debounce: a deflection emits one command until the stick
    /// returns to the deadzone.
    axis_neutral: bool,
}

impl InputRouter {
    pub fn new() -> Self {
        Self {
            captured: false,
            text_mode: false,
            axis_x: 0.0,
            axis_y: 0.0,
            axis_neutral: true,
        }
    }

    /// Record the outcome of the platform's exclusive-capture attempt.
    /// A refusal degrades to pass-through with a warning; the game goes
    /// on without the exclusivity guarantee.
    pub fn claim_capture(&mut self, granted: bool) {
        if granted {
            debug!("exclusive input capture active");
        } else {
            warn!("exclusive input capture refused, continuing without it");
        }
        self.captured = granted;
    }

    /// Give the gamepad back to the host.  Called on every exit path.
    pub fn release_capture(&mut self) {
        if self.captured {
            debug!("exclusive input capture released");
        }
        self.captured = false;
    }

    pub fn capture_active(&self) -> bool {
        self.captured
    }

    pub fn set_text_mode(&mut self, on: bool) {
        self.text_mode = on;
    }

    pub fn text_mode(&self) -> bool {
        self.text_mode
    }

    /// Translate one raw event, or consume it without a command.
    pub fn translate(&mut self, event: RawEvent) -> Option<Command> {
        match event {
            RawEvent::KeyDown(code) => self.translate_key(code),

            // Gamepad events are only claimed while capture is held.
            RawEvent::PadButtonDown(_)
            | RawEvent::PadButtonUp(_)
            | RawEvent::PadAxisMotion { .. }
            | RawEvent::PadHatMotion { .. }
            | RawEvent::PadBallMotion { .. }
                if !self.captured =>
            {
                None
            }

            RawEvent::PadButtonDown(button) => match button {
                PadButton::A => Some(Command::Confirm),
                PadButton::B => Some(Command::Cancel),
                PadButton::Start => Some(Command::Pause),
                // Read and dropped: no binding on this layout.
                PadButton::X
                | PadButton::Y
                | PadButton::L
                | PadButton::R
                | PadButton::Select
                | PadButton::Other(_) => None,
            },
            // Releases carry no meaning here but must still be drained.
            RawEvent::PadButtonUp(_) => None,

            RawEvent::PadAxisMotion { axis, value } => self.translate_axis(axis, value),

            RawEvent::PadHatMotion { x, y } => match (x, y) {
                (_, 1) => Some(Command::Up),
                (_, -1) => Some(Command::Down),
                (-1, _) => Some(Command::Left),
                (1, _) => Some(Command::Right),
                _ => None,
            },

            // Trackball motion is read and explicitly discarded.
            RawEvent::PadBallMotion { .. } => None,

            RawEvent::PadConnected { id } => {
                info!(id, "gamepad connected");
                None
            }
            RawEvent::PadDisconnected { id } => {
                info!(id, "gamepad disconnected");
                None
            }
        }
    }

    fn translate_key(&mut self, code: KeyCode) -> Option<Command> {
        match code {
            KeyCode::Up => Some(Command::Up),
            KeyCode::Down => Some(Command::Down),
            KeyCode::Left => Some(Command::Left),
            KeyCode::Right => Some(Command::Right),
            KeyCode::Enter => Some(Command::Confirm),
            KeyCode::Esc => Some(Command::Cancel),
            KeyCode::Backspace => Some(Command::Backspace),
            KeyCode::Char(c) if self.text_mode && c.is_ascii_alphanumeric() => {
                Some(Command::TextChar(c.to_ascii_uppercase()))
            }
            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'w' => Some(Command::Up),
                's' => Some(Command::Down),
                'a' => Some(Command::Left),
                'd' => Some(Command::Right),
                'p' => Some(Command::Pause),
                _ => None,
            },
            _ => None,
        }
    }

    /// Analog steering with neutral-return debouncing: the dominant
    /// axis emits one direction per deflection.
    fn translate_axis(&mut self, axis: PadAxis, value: f32) -> Option<Command> {
        match axis {
            PadAxis::X => self.axis_x = value,
            PadAxis::Y => self.axis_y = value,
            PadAxis::Other(_) => return None,
        }

        let deflected = self.axis_x.abs() > AXIS_DEADZONE || self.axis_y.abs() > AXIS_DEADZONE;
        if !deflected {
            self.axis_neutral = true;
            return None;
        }
        if !self.axis_neutral {
            return None;
        }
        self.axis_neutral = false;

        if self.axis_y.abs() > self.axis_x.abs() {
            if self.axis_y < 0.0 {
                Some(Command::Up)
            } else {
                Some(Command::Down)
            }
        } else if self.axis_x < 0.0 {
            Some(Command::Left)
        } else {
            Some(Command::Right)
        }
    }
}

impl Default for InputRouter {
    fn default() -> Self {
        Self::new()
    }
}
