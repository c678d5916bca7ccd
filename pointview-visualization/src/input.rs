//! Pointer, scroll and keyboard handling
//!
//! [`InputController`] is a small state machine over host input events. It
//! remembers the last pointer position while a button is held and turns every
//! event into at most one [`ViewAction`].

use serde::{Deserialize, Serialize};

use crate::pipeline::ViewAction;

/// Static listing of every binding, shown from the context menu
pub const CONTROLS_HELP: &str = "\
3D view controls

  W / S        rotate about X (up / down)
  A / D        rotate about Y (left / right)
  Q / E        rotate about Z (counter-clockwise / clockwise)
  R            reset view
  + / -        zoom in / out (0.1x to 10x)
  drag         rotate
  Shift + drag pan
  mouse wheel  zoom in / out
  right click  context menu, then 1 / 2 to pick an entry or Esc to close";

/// Input sensitivities
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    pub rotate_degrees_per_pixel: f64,
    pub pan_per_pixel: f64,
    /// Zoom factor per forward scroll line
    pub scroll_zoom_step: f64,
    pub key_rotate_degrees: f64,
    pub key_zoom_in: f64,
    pub key_zoom_out: f64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            rotate_degrees_per_pixel: 0.1,
            pan_per_pixel: 0.5,
            scroll_zoom_step: 1.05,
            key_rotate_degrees: 2.0,
            key_zoom_in: 1.1,
            key_zoom_out: 0.9,
        }
    }
}

/// Keys the viewer reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKey {
    /// W
    TiltUp,
    /// S
    TiltDown,
    /// A
    TurnLeft,
    /// D
    TurnRight,
    /// Q
    RollCounterClockwise,
    /// E
    RollClockwise,
    /// `+` or `=`
    ZoomIn,
    /// `-` or `_`
    ZoomOut,
    /// R
    Reset,
}

impl ViewKey {
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'w' => Some(Self::TiltUp),
            's' => Some(Self::TiltDown),
            'a' => Some(Self::TurnLeft),
            'd' => Some(Self::TurnRight),
            'q' => Some(Self::RollCounterClockwise),
            'e' => Some(Self::RollClockwise),
            '+' | '=' => Some(Self::ZoomIn),
            '-' | '_' => Some(Self::ZoomOut),
            'r' => Some(Self::Reset),
            _ => None,
        }
    }
}

/// Input as delivered by the host window, in surface pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerPressed { x: f64, y: f64 },
    /// Pointer moved with a button held; `pan` is the pan modifier (Shift)
    PointerDragged { x: f64, y: f64, pan: bool },
    PointerReleased,
    /// Positive is forward (away from the user)
    Scroll { lines: f64 },
    Key(ViewKey),
    /// Secondary click; opens the context menu
    ContextMenuRequested,
    /// An entry was picked from the open context menu
    ContextMenuSelected(ContextMenuItem),
    /// The open context menu was closed without a choice
    ContextMenuDismissed,
}

/// Entries of the right-click menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextMenuItem {
    ResetView,
    ShowControls,
}

impl ContextMenuItem {
    pub fn label(self) -> &'static str {
        match self {
            Self::ResetView => "Reset view",
            Self::ShowControls => "Show controls",
        }
    }

    /// Transform change triggered by choosing this entry
    pub fn view_action(self) -> Option<ViewAction> {
        match self {
            Self::ResetView => Some(ViewAction::Reset),
            Self::ShowControls => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextMenu {
    pub items: Vec<ContextMenuItem>,
}

impl ContextMenu {
    pub fn help_text(&self) -> &'static str {
        CONTROLS_HELP
    }

    /// Entry at 1-based `position`, as listed to the user
    pub fn entry(&self, position: usize) -> Option<ContextMenuItem> {
        position.checked_sub(1).and_then(|i| self.items.get(i)).copied()
    }
}

impl Default for ContextMenu {
    fn default() -> Self {
        Self {
            items: vec![ContextMenuItem::ResetView, ContextMenuItem::ShowControls],
        }
    }
}

/// What the host should do after an event
#[derive(Debug, Clone, PartialEq)]
pub enum InputResponse {
    Ignored,
    Action(ViewAction),
    ContextMenu(ContextMenu),
    /// Show this controls listing
    Help(&'static str),
}

#[derive(Debug, Clone, Default)]
pub struct InputController {
    config: InputConfig,
    last_pointer: Option<(f64, f64)>,
    menu_open: bool,
}

impl InputController {
    pub fn new(config: InputConfig) -> Self {
        Self {
            config,
            last_pointer: None,
            menu_open: false,
        }
    }

    pub fn config(&self) -> &InputConfig {
        &self.config
    }

    /// Whether a context menu is waiting for a choice
    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn handle(&mut self, event: &InputEvent) -> InputResponse {
        match *event {
            InputEvent::PointerPressed { x, y } => {
                self.last_pointer = Some((x, y));
                InputResponse::Ignored
            }
            InputEvent::PointerDragged { x, y, pan } => {
                match self.last_pointer.replace((x, y)) {
                    Some((old_x, old_y)) => {
                        InputResponse::Action(self.drag(x - old_x, y - old_y, pan))
                    }
                    None => InputResponse::Ignored,
                }
            }
            InputEvent::PointerReleased => {
                self.last_pointer = None;
                InputResponse::Ignored
            }
            InputEvent::Scroll { lines } => match self.scroll(lines) {
                Some(action) => InputResponse::Action(action),
                None => InputResponse::Ignored,
            },
            InputEvent::Key(key) => InputResponse::Action(self.key(key)),
            InputEvent::ContextMenuRequested => {
                self.menu_open = true;
                InputResponse::ContextMenu(ContextMenu::default())
            }
            InputEvent::ContextMenuSelected(item) => {
                if !std::mem::take(&mut self.menu_open) {
                    return InputResponse::Ignored;
                }
                match item.view_action() {
                    Some(action) => InputResponse::Action(action),
                    None => InputResponse::Help(CONTROLS_HELP),
                }
            }
            InputEvent::ContextMenuDismissed => {
                self.menu_open = false;
                InputResponse::Ignored
            }
        }
    }

    /// Action for a pointer drag of `(dx, dy)` pixels
    pub fn drag(&self, dx: f64, dy: f64, pan: bool) -> ViewAction {
        if pan {
            ViewAction::Pan {
                x: dx * self.config.pan_per_pixel,
                y: dy * self.config.pan_per_pixel,
            }
        } else {
            // dragging right turns the view right, dragging down tilts it down
            ViewAction::Rotate {
                x: dy * self.config.rotate_degrees_per_pixel,
                y: -dx * self.config.rotate_degrees_per_pixel,
                z: 0.0,
            }
        }
    }

    /// Action for `lines` units of scroll, `None` for a zero delta
    pub fn scroll(&self, lines: f64) -> Option<ViewAction> {
        if lines == 0.0 || !lines.is_finite() {
            return None;
        }
        Some(ViewAction::Zoom(self.config.scroll_zoom_step.powf(lines)))
    }

    /// Action for one key press
    pub fn key(&self, key: ViewKey) -> ViewAction {
        let step = self.config.key_rotate_degrees;
        let rotate = |x, y, z| ViewAction::Rotate { x, y, z };
        match key {
            ViewKey::TiltUp => rotate(step, 0.0, 0.0),
            ViewKey::TiltDown => rotate(-step, 0.0, 0.0),
            ViewKey::TurnLeft => rotate(0.0, step, 0.0),
            ViewKey::TurnRight => rotate(0.0, -step, 0.0),
            ViewKey::RollCounterClockwise => rotate(0.0, 0.0, -step),
            ViewKey::RollClockwise => rotate(0.0, 0.0, step),
            ViewKey::ZoomIn => ViewAction::Zoom(self.config.key_zoom_in),
            ViewKey::ZoomOut => ViewAction::Zoom(self.config.key_zoom_out),
            ViewKey::Reset => ViewAction::Reset,
        }
    }
}
