//! Window event handling for GameState.

use winit::event::WindowEvent;
use winit::window::CursorGrabMode;

impl crate::GameState {
    /// Handle a window event. Returns true if the app should exit.
    pub(crate) fn handle_window_event(&mut self, event: WindowEvent) -> bool {
        match event {
            WindowEvent::CloseRequested => {
                self.quit();
                true
            }
            WindowEvent::Resized(size) => {
                self.renderer.resize(size);
                self.camera.set_aspect(size.width, size.height);
                false
            }
            WindowEvent::Focused(false) => {
                self.input.clear_held();
                false
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let winit::keyboard::PhysicalKey::Code(key) = event.physical_key {
                    self.input.process_keyboard(key, event.state);
                }
                false
            }
            WindowEvent::RedrawRequested => {
                self.update();
                if self.running {
                    if let Err(e) = self.render() {
                        log::error!("Render error: {}", e);
                    }
                    self.renderer.window.request_redraw();
                }
                false
            }
            _ => false,
        }
    }

    /// Capture and hide the cursor while playing; release it while the settings overlay is open.
    pub(crate) fn set_cursor_captured(&mut self, captured: bool) {
        let window = &self.renderer.window;
        if captured {
            let _ = window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
            window.set_cursor_visible(false);
        } else {
            let _ = window.set_cursor_grab(CursorGrabMode::None);
            window.set_cursor_visible(true);
        }
    }
}
