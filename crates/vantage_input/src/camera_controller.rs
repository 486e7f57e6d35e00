//! Camera input controller
//!
//! Controls:
//! - W/S: forward/backward
//! - A/D: left/right strafe
//! - Space/Ctrl: up/down
//! - Shift: slow (halved speed cap)
//! - Mouse: look (when freelook is enabled)
//!
//! The controller only collects state. Each frame the app reads a
//! [`MoveKeys`] snapshot and the current absolute cursor position and
//! passes them to the cursor filter and camera - the kinematics stay a
//! pure function of `(state, input, dt)`.

use vantage_core::MoveKeys;
use vantage_math::Vec2;
use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// Collects keyboard and cursor state between frames
#[derive(Debug, Default)]
pub struct CameraController {
    keys: MoveKeys,
    cursor_position: Vec2,
}

impl CameraController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process keyboard input
    ///
    /// Returns true if the key maps to a movement flag.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) -> bool {
        let flag = match key {
            KeyCode::KeyW => MoveKeys::FORWARD,
            KeyCode::KeyS => MoveKeys::BACK,
            KeyCode::KeyA => MoveKeys::LEFT,
            KeyCode::KeyD => MoveKeys::RIGHT,
            KeyCode::Space => MoveKeys::UP,
            KeyCode::ControlLeft => MoveKeys::DOWN,
            KeyCode::ShiftLeft | KeyCode::ShiftRight => MoveKeys::SLOW,
            _ => return false,
        };

        self.keys.set(flag, state == ElementState::Pressed);
        true
    }

    /// Track the absolute cursor position from a window cursor event
    pub fn process_cursor_moved(&mut self, x: f64, y: f64) {
        self.cursor_position = Vec2::new(x as f32, y as f32);
    }

    /// Accumulate a raw device motion delta into the cursor position
    ///
    /// While the cursor is grabbed, window cursor events stop on most
    /// platforms, so device deltas keep a virtual absolute position moving
    /// instead.
    pub fn process_mouse_motion(&mut self, delta_x: f64, delta_y: f64) {
        self.cursor_position += Vec2::new(delta_x as f32, delta_y as f32);
    }

    /// Movement snapshot for this frame
    pub fn keys(&self) -> MoveKeys {
        self.keys
    }

    /// Current absolute cursor position in pixels
    pub fn cursor_position(&self) -> Vec2 {
        self.cursor_position
    }

    /// Check if any movement key is held
    pub fn is_moving(&self) -> bool {
        self.keys.intersects(
            MoveKeys::FORWARD
                | MoveKeys::BACK
                | MoveKeys::LEFT
                | MoveKeys::RIGHT
                | MoveKeys::UP
                | MoveKeys::DOWN,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_keys_set_and_clear() {
        let mut controller = CameraController::new();

        assert!(controller.process_keyboard(KeyCode::KeyW, ElementState::Pressed));
        assert!(controller.keys().contains(MoveKeys::FORWARD));
        assert!(controller.is_moving());

        assert!(controller.process_keyboard(KeyCode::KeyW, ElementState::Released));
        assert!(!controller.keys().contains(MoveKeys::FORWARD));
        assert!(!controller.is_moving());
    }

    #[test]
    fn test_unmapped_key_ignored() {
        let mut controller = CameraController::new();
        assert!(!controller.process_keyboard(KeyCode::KeyZ, ElementState::Pressed));
        assert_eq!(controller.keys(), MoveKeys::empty());
    }

    #[test]
    fn test_slow_is_not_movement() {
        let mut controller = CameraController::new();
        controller.process_keyboard(KeyCode::ShiftLeft, ElementState::Pressed);
        assert!(controller.keys().contains(MoveKeys::SLOW));
        assert!(!controller.is_moving());
    }

    #[test]
    fn test_simultaneous_keys_accumulate() {
        let mut controller = CameraController::new();
        controller.process_keyboard(KeyCode::KeyW, ElementState::Pressed);
        controller.process_keyboard(KeyCode::KeyD, ElementState::Pressed);
        controller.process_keyboard(KeyCode::Space, ElementState::Pressed);
        assert_eq!(
            controller.keys(),
            MoveKeys::FORWARD | MoveKeys::RIGHT | MoveKeys::UP
        );
    }

    #[test]
    fn test_cursor_tracking() {
        let mut controller = CameraController::new();
        controller.process_cursor_moved(320.0, 240.0);
        assert_eq!(controller.cursor_position(), Vec2::new(320.0, 240.0));

        controller.process_mouse_motion(5.0, -3.0);
        assert_eq!(controller.cursor_position(), Vec2::new(325.0, 237.0));
    }
}
