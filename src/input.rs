//! Touch classification and host input translation
//!
//! The left strip of the screen (three rocket widths) is the steering area:
//! touching above the rocket steers up, below steers down. Touching anywhere
//! else fires. Arrow keys steer and the space bar fires.

use serde::{Deserialize, Serialize};

use crate::sim::GameState;

/// Steering direction relative to the rocket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Stay,
    Down,
}

/// Phase of a touch gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Begin,
    Move,
    End,
}

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    Up,
    Down,
    Space,
    Other,
}

impl GameState {
    /// Whether a touch at `x` lands in the steering strip
    pub fn is_cursor_touch(&self, x: f32) -> bool {
        x < self.tuning.rocket_width * 3.0
    }

    /// Steering direction for a touch at height `y`
    pub fn classify_touch(&self, y: f32) -> Direction {
        let rocket_y = self.rocket.y;
        if rocket_y > y {
            Direction::Up
        } else if rocket_y < y {
            Direction::Down
        } else {
            Direction::Stay
        }
    }

    /// Translate a touch: begin presses, end releases, moves are ignored
    pub fn handle_touch(&mut self, x: f32, y: f32, phase: TouchPhase) {
        let is_cursor = self.is_cursor_touch(x);
        let direction = self.classify_touch(y);
        match phase {
            TouchPhase::Begin => self.press(true, direction, is_cursor),
            TouchPhase::End => self.press(false, direction, is_cursor),
            TouchPhase::Move => {}
        }
    }

    /// Translate a key press or release
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        match key {
            KeyCode::Up => self.press(pressed, Direction::Up, true),
            KeyCode::Down => self.press(pressed, Direction::Down, true),
            KeyCode::Space if pressed => {
                self.fire_bomb();
            }
            KeyCode::Space | KeyCode::Other => {}
        }
    }
}
