//! Input mapping from raw events to semantic actions
//!
//! Maps keyboard input to high-level actions like ToggleFreelook.
//! Movement keys (WASD, Space, Ctrl, Shift) are NOT mapped here - they go
//! directly to the CameraController.

use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// Actions triggered by special input (not movement)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Toggle freelook: flips cursor capture and the camera's Locked/Free
    /// state together (Escape)
    ToggleFreelook,
    /// Toggle fullscreen mode (F key)
    ToggleFullscreen,
}

/// Maps raw input events to semantic actions
pub struct InputMapper;

impl InputMapper {
    /// Map keyboard input to an action
    ///
    /// Returns `Some(action)` on the press edge of a special key, `None`
    /// for movement keys and releases.
    pub fn map_keyboard(key: KeyCode, state: ElementState) -> Option<InputAction> {
        if state != ElementState::Pressed {
            return None;
        }

        match key {
            KeyCode::Escape => Some(InputAction::ToggleFreelook),
            KeyCode::KeyF => Some(InputAction::ToggleFullscreen),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_toggles_freelook() {
        let action = InputMapper::map_keyboard(KeyCode::Escape, ElementState::Pressed);
        assert_eq!(action, Some(InputAction::ToggleFreelook));
    }

    #[test]
    fn test_key_release_ignored() {
        let action = InputMapper::map_keyboard(KeyCode::Escape, ElementState::Released);
        assert_eq!(action, None);
    }

    #[test]
    fn test_movement_keys_not_mapped() {
        for key in [
            KeyCode::KeyW,
            KeyCode::KeyA,
            KeyCode::KeyS,
            KeyCode::KeyD,
            KeyCode::Space,
            KeyCode::ControlLeft,
            KeyCode::ShiftLeft,
        ] {
            let action = InputMapper::map_keyboard(key, ElementState::Pressed);
            assert_eq!(action, None, "Key {:?} should not be mapped", key);
        }
    }

    #[test]
    fn test_fullscreen_key() {
        assert_eq!(
            InputMapper::map_keyboard(KeyCode::KeyF, ElementState::Pressed),
            Some(InputAction::ToggleFullscreen)
        );
    }
}
