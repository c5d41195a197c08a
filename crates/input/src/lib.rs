//! Keyboard input handling.
//!
//! Tracks which keys are held and which were freshly pressed this frame, so
//! gameplay acts once per physical press and ignores OS key repeat.

use std::collections::HashSet;

/// Manages input state for the current frame.
#[derive(Debug, Default)]
pub struct InputState {
    /// Keys currently held down.
    keys_held: HashSet<KeyCode>,
    /// Keys pressed this frame.
    keys_pressed: HashSet<KeyCode>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear per-frame state. Call at the end of each frame.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
    }

    /// Process a keyboard event.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if !self.keys_held.contains(&key) {
                    self.keys_pressed.insert(key);
                }
                self.keys_held.insert(key);
            }
            ElementState::Released => {
                self.keys_held.remove(&key);
            }
        }
    }

    /// Drop all held keys (window lost focus; releases will never arrive).
    pub fn clear_held(&mut self) {
        self.keys_held.clear();
    }

    /// Check if a key was pressed this frame.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Lane step requested this frame: -1 (left), +1 (right) or 0.
    pub fn lane_step(&self) -> i32 {
        let mut step = 0;
        if self.is_key_pressed(KeyCode::ArrowLeft) {
            step -= 1;
        }
        if self.is_key_pressed(KeyCode::ArrowRight) {
            step += 1;
        }
        step
    }

    /// Check if reset was pressed (R).
    pub fn is_reset_pressed(&self) -> bool {
        self.is_key_pressed(KeyCode::KeyR)
    }

    /// Check if the bloom toggle was pressed (B).
    pub fn is_bloom_toggle_pressed(&self) -> bool {
        self.is_key_pressed(KeyCode::KeyB)
    }

    /// Check if the settings overlay toggle was pressed (F5).
    pub fn is_overlay_toggle_pressed(&self) -> bool {
        self.is_key_pressed(KeyCode::F5)
    }

    /// Check if quit was pressed (Escape).
    pub fn is_quit_pressed(&self) -> bool {
        self.is_key_pressed(KeyCode::Escape)
    }

    /// Overlay field selection: -1 (up), +1 (down) or 0.
    pub fn selection_step(&self) -> i32 {
        let mut step = 0;
        if self.is_key_pressed(KeyCode::ArrowUp) {
            step -= 1;
        }
        if self.is_key_pressed(KeyCode::ArrowDown) {
            step += 1;
        }
        step
    }

    /// Overlay value adjustment: -1 (minus), +1 (plus/equals) or 0.
    pub fn adjust_step(&self) -> i32 {
        let mut step = 0;
        if self.is_key_pressed(KeyCode::Minus) || self.is_key_pressed(KeyCode::NumpadSubtract) {
            step -= 1;
        }
        if self.is_key_pressed(KeyCode::Equal) || self.is_key_pressed(KeyCode::NumpadAdd) {
            step += 1;
        }
        step
    }
}

// Re-export for convenience
pub use winit::event::ElementState;
pub use winit::keyboard::KeyCode;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_key_is_pressed_only_once() {
        let mut input = InputState::new();
        input.process_keyboard(KeyCode::ArrowLeft, ElementState::Pressed);
        assert_eq!(input.lane_step(), -1);
        input.begin_frame();
        // OS key repeat delivers another Pressed without a Released
        input.process_keyboard(KeyCode::ArrowLeft, ElementState::Pressed);
        assert_eq!(input.lane_step(), 0);
        assert!(input.keys_held.contains(&KeyCode::ArrowLeft));
    }

    #[test]
    fn release_then_press_counts_again() {
        let mut input = InputState::new();
        input.process_keyboard(KeyCode::KeyB, ElementState::Pressed);
        input.begin_frame();
        input.process_keyboard(KeyCode::KeyB, ElementState::Released);
        assert!(!input.keys_held.contains(&KeyCode::KeyB));
        input.begin_frame();
        input.process_keyboard(KeyCode::KeyB, ElementState::Pressed);
        assert!(input.is_bloom_toggle_pressed());
    }

    #[test]
    fn opposite_steps_cancel() {
        let mut input = InputState::new();
        input.process_keyboard(KeyCode::ArrowLeft, ElementState::Pressed);
        input.process_keyboard(KeyCode::ArrowRight, ElementState::Pressed);
        assert_eq!(input.lane_step(), 0);
    }

    #[test]
    fn clear_held_allows_fresh_press() {
        let mut input = InputState::new();
        input.process_keyboard(KeyCode::KeyR, ElementState::Pressed);
        input.begin_frame();
        input.clear_held();
        input.process_keyboard(KeyCode::KeyR, ElementState::Pressed);
        assert!(input.is_reset_pressed());
    }
}
