use crate::constants::GLOW_EASE;
use glam::Vec2;

/// Cursor-follow state: the dot snaps to the pointer on every move event,
/// the glow chases it with an exponential lag stepped once per frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct CursorFollow {
    pub target: Vec2,
    pub eased: Vec2,
}

impl CursorFollow {
    /// Record the latest pointer position in viewport pixels.
    pub fn set_target(&mut self, x: f32, y: f32) {
        self.target = Vec2::new(x, y);
    }

    /// One frame of easing toward the target.
    pub fn step(&mut self) {
        self.eased += (self.target - self.eased) * GLOW_EASE;
    }
}
