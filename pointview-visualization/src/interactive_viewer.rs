//! Windowed viewer
//!
//! Owns the winit event loop, the GPU renderer and the [`ViewerCore`]. The
//! event loop thread is the render thread: window input and host commands
//! both go through the same [`CommandQueue`], which is drained right before
//! every frame.

use std::sync::Arc;
use winit::{
    dpi::{LogicalPosition, LogicalSize, PhysicalPosition},
    event::{ElementState, Event, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::WindowBuilder,
};

use pointview_core::{Error, Result};
use pointview_gpu::MarkerRenderer;

use crate::config::ViewerConfig;
use crate::dispatch::{CommandQueue, ViewerHandle};
use crate::frame::FrameBuilder;
use crate::input::{ContextMenu, InputEvent, ViewKey, CONTROLS_HELP};
use crate::viewer::ViewerCore;

/// Logical pixel scroll distance treated as one wheel line
const PIXELS_PER_SCROLL_LINE: f64 = 40.0;

/// Translates raw window events into viewer input events.
///
/// Positions are kept in logical pixels so drag sensitivity does not depend
/// on the display scale factor. While a context menu is open, the digit keys
/// pick its entries and Escape closes it.
#[derive(Debug, Default)]
struct WindowInput {
    cursor: LogicalPosition<f64>,
    left_pressed: bool,
    shift_held: bool,
    menu: Option<ContextMenu>,
}

impl WindowInput {
    fn translate(&mut self, event: &WindowEvent, scale_factor: f64) -> Option<InputEvent> {
        match event {
            WindowEvent::ModifiersChanged(modifiers) => {
                self.shift_held = modifiers.state().shift_key();
                None
            }
            WindowEvent::CursorMoved { position, .. } => self.cursor_moved(*position, scale_factor),
            WindowEvent::MouseInput { state, button, .. } => match (button, state) {
                (MouseButton::Left, ElementState::Pressed) => {
                    self.left_pressed = true;
                    Some(InputEvent::PointerPressed {
                        x: self.cursor.x,
                        y: self.cursor.y,
                    })
                }
                (MouseButton::Left, ElementState::Released) => {
                    self.left_pressed = false;
                    Some(InputEvent::PointerReleased)
                }
                (MouseButton::Right, ElementState::Pressed) => Some(self.open_menu()),
                _ => None,
            },
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y as f64,
                    MouseScrollDelta::PixelDelta(pos) => {
                        pos.to_logical::<f64>(scale_factor).y / PIXELS_PER_SCROLL_LINE
                    }
                };
                Some(InputEvent::Scroll { lines })
            }
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                self.key_pressed(&event.logical_key)
            }
            _ => None,
        }
    }

    fn cursor_moved(
        &mut self,
        position: PhysicalPosition<f64>,
        scale_factor: f64,
    ) -> Option<InputEvent> {
        self.cursor = position.to_logical(scale_factor);
        self.left_pressed.then_some(InputEvent::PointerDragged {
            x: self.cursor.x,
            y: self.cursor.y,
            pan: self.shift_held,
        })
    }

    fn open_menu(&mut self) -> InputEvent {
        self.menu = Some(ContextMenu::default());
        InputEvent::ContextMenuRequested
    }

    fn key_pressed(&mut self, key: &Key) -> Option<InputEvent> {
        if let Some(menu) = &self.menu {
            match key {
                Key::Named(NamedKey::Escape) => {
                    self.menu = None;
                    return Some(InputEvent::ContextMenuDismissed);
                }
                Key::Character(text) => {
                    let choice = text
                        .chars()
                        .next()
                        .and_then(|c| c.to_digit(10))
                        .and_then(|digit| menu.entry(digit as usize));
                    if let Some(item) = choice {
                        self.menu = None;
                        return Some(InputEvent::ContextMenuSelected(item));
                    }
                }
                _ => {}
            }
        }

        match key {
            Key::Character(text) => text
                .chars()
                .next()
                .and_then(ViewKey::from_char)
                .map(InputEvent::Key),
            _ => None,
        }
    }
}

/// Interactive window showing one labeled point set at a time
pub struct InteractiveViewer {
    config: ViewerConfig,
    core: ViewerCore,
    queue: CommandQueue,
}

impl InteractiveViewer {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            core: ViewerCore::new(config.clone()),
            config,
            queue: CommandQueue::new(),
        }
    }

    /// Handle for feeding data and commands from any thread
    pub fn handle(&self) -> ViewerHandle {
        self.queue.handle()
    }

    /// Open the window and block until it is closed
    pub fn run(self) -> Result<()> {
        let Self { config, mut core, queue } = self;
        log::info!("Starting pointview viewer...");

        let event_loop = EventLoop::new()
            .map_err(|e| Error::Visualization(format!("Failed to create event loop: {}", e)))?;
        let window = Arc::new(
            WindowBuilder::new()
                .with_title(config.window_title.as_str())
                .with_inner_size(LogicalSize::new(config.window_width, config.window_height))
                .build(&event_loop)
                .map_err(|e| Error::Visualization(format!("Failed to create window: {}", e)))?,
        );

        let mut renderer =
            pollster::block_on(MarkerRenderer::new(window.clone(), config.render_config()))?;
        let mut frames = FrameBuilder::new();
        let mut input = WindowInput::default();
        let local = queue.handle();

        log::info!("Viewer initialized\n{}", CONTROLS_HELP);

        event_loop
            .run(move |event, target| {
                target.set_control_flow(ControlFlow::Poll);

                match event {
                    Event::WindowEvent { event, .. } => match event {
                        WindowEvent::CloseRequested => {
                            log::info!("Viewer window closed");
                            target.exit();
                        }
                        WindowEvent::Resized(new_size) => {
                            renderer.resize(new_size);
                            window.request_redraw();
                        }
                        WindowEvent::RedrawRequested => {
                            let applied = queue.drain(&mut core);
                            if applied > 0 {
                                log::trace!("Applied {} viewer commands", applied);
                            }

                            let frame = frames.build(&core, renderer.aspect_ratio() as f64);
                            if frame.rebuilt {
                                renderer.upload_vertices(frame.vertices);
                            }
                            renderer.update_camera(frame.view_proj);
                            if let Err(e) = renderer.render() {
                                log::warn!("Render error: {}", e);
                                renderer.resize(window.inner_size());
                            }
                        }
                        other => {
                            let scale_factor = window.scale_factor();
                            if let Some(input_event) = input.translate(&other, scale_factor) {
                                if let Err(e) = local.send_input(input_event) {
                                    log::warn!("Dropped input event: {}", e);
                                }
                            }
                        }
                    },
                    Event::AboutToWait => window.request_redraw(),
                    _ => {}
                }
            })
            .map_err(|e| Error::Visualization(format!("Event loop error: {}", e)))?;

        Ok(())
    }
}

impl Default for InteractiveViewer {
    fn default() -> Self {
        Self::new(ViewerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ContextMenuItem;
    use winit::keyboard::SmolStr;

    fn character(c: &str) -> Key {
        Key::Character(SmolStr::new(c))
    }

    #[test]
    fn test_drag_uses_logical_pixels() {
        let mut input = WindowInput {
            left_pressed: true,
            ..WindowInput::default()
        };

        let event = input.cursor_moved(PhysicalPosition::new(300.0, 120.0), 2.0);
        assert_eq!(
            event,
            Some(InputEvent::PointerDragged {
                x: 150.0,
                y: 60.0,
                pan: false,
            })
        );
        assert_eq!(input.cursor, LogicalPosition::new(150.0, 60.0));
    }

    #[test]
    fn test_hover_without_button_is_silent() {
        let mut input = WindowInput::default();
        assert_eq!(input.cursor_moved(PhysicalPosition::new(10.0, 10.0), 1.0), None);
        assert_eq!(input.cursor, LogicalPosition::new(10.0, 10.0));
    }

    #[test]
    fn test_digit_picks_menu_entry() {
        let mut input = WindowInput::default();
        assert_eq!(input.open_menu(), InputEvent::ContextMenuRequested);

        assert_eq!(
            input.key_pressed(&character("1")),
            Some(InputEvent::ContextMenuSelected(ContextMenuItem::ResetView))
        );
        assert!(input.menu.is_none());

        // with the menu closed, R is the plain reset binding and digits do nothing
        assert_eq!(input.key_pressed(&character("2")), None);
        assert_eq!(
            input.key_pressed(&character("r")),
            Some(InputEvent::Key(ViewKey::Reset))
        );
    }

    #[test]
    fn test_menu_escape_and_unknown_entries() {
        let mut input = WindowInput::default();
        input.open_menu();

        // out of range digits and view keys leave the menu open
        assert_eq!(input.key_pressed(&character("9")), None);
        assert_eq!(
            input.key_pressed(&character("w")),
            Some(InputEvent::Key(ViewKey::TiltUp))
        );
        assert!(input.menu.is_some());

        assert_eq!(
            input.key_pressed(&Key::Named(NamedKey::Escape)),
            Some(InputEvent::ContextMenuDismissed)
        );
        assert!(input.menu.is_none());
    }

    #[test]
    fn test_menu_selected_then_drained_resets_view() {
        let mut viewer = InteractiveViewer::default();
        let mut input = WindowInput::default();
        let handle = viewer.handle();

        handle.send_input(InputEvent::Key(ViewKey::RollClockwise)).unwrap();
        handle.send_input(input.open_menu()).unwrap();
        handle
            .send_input(input.key_pressed(&character("1")).unwrap())
            .unwrap();
        viewer.queue.drain(&mut viewer.core);

        assert!(viewer.core.transform_state().is_identity());
    }

    #[test]
    fn test_viewer_handle_reaches_core() {
        let mut viewer = InteractiveViewer::default();
        viewer
            .handle()
            .visualize_data(vec![pointview_core::LabeledPoint::new(1.0, 1.0, 1.0, "A")])
            .unwrap();

        viewer.queue.drain(&mut viewer.core);
        assert_eq!(viewer.core.scene().point_count(), 1);
    }
}
