//! Per-frame input snapshot
//!
//! The host (windowing / pointer-lock layer) fills one of these each frame
//! from its pressed-key set and mouse delta; the simulation never talks to
//! the input devices directly.

use glam::Vec2;

/// Input state sampled once per frame by the host
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    /// Sprint key held
    pub sprint: bool,
    /// Jump key pressed this frame
    pub jump: bool,
    /// Fire button pressed this frame
    pub fire: bool,
    /// Reload key pressed this frame
    pub reload: bool,
    /// Aim button held
    pub aim: bool,
    /// Mouse delta since last frame (x = yaw, y = pitch)
    pub look_delta: Vec2,
}

impl InputState {
    /// Raw movement axes before camera-relative rotation
    /// (x: strafe right positive, y: forward positive)
    pub fn move_axes(&self) -> Vec2 {
        let mut axes = Vec2::ZERO;
        if self.forward {
            axes.y += 1.0;
        }
        if self.back {
            axes.y -= 1.0;
        }
        if self.right {
            axes.x += 1.0;
        }
        if self.left {
            axes.x -= 1.0;
        }
        axes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_axes() {
        let mut input = InputState::default();
        assert_eq!(input.move_axes(), Vec2::ZERO);

        input.forward = true;
        input.right = true;
        assert_eq!(input.move_axes(), Vec2::new(1.0, 1.0));

        input.back = true;
        assert_eq!(input.move_axes(), Vec2::new(1.0, 0.0));
    }
}
