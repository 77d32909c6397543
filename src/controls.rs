use crate::engine::input::KeyPress;
use crate::sprite::player::Player;
use crate::sprite::{Direction, FrameSet};
use crate::world::Chunk;

/// Arrow keys and WASD, by physical key code
pub fn direction_for(code: &str) -> Option<Direction> {
    match code {
        "ArrowUp" | "KeyW" => Some(Direction::Up),
        "ArrowDown" | "KeyS" => Some(Direction::Down),
        "ArrowLeft" | "KeyA" => Some(Direction::Left),
        "ArrowRight" | "KeyD" => Some(Direction::Right),
        _ => None,
    }
}

pub fn is_mapped(code: &str) -> bool {
    direction_for(code).is_some()
}

/// One key event against the player
/// - key down: one step, or a turn when the target is blocked
/// - key up: back to the idle pose
/// - unmapped keys are ignored
pub fn apply(press: &KeyPress, player: &mut Player, chunk: &Chunk, frames: &FrameSet) {
    let Some(direction) = direction_for(press.code()) else {
        return;
    };
    match press {
        KeyPress::Down(_) => player.step(direction, chunk, frames),
        KeyPress::Up(_) => player.release(),
    }
}
