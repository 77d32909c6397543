//! Player typestates: a transition is only reachable through the methods
//! defined for the state it starts from
//! - PUBLIC  : PlayerState and PlayerContext
//! - PRIVATE : the context mutators
use crate::sprite::{Direction, Idle, Walking, FRAME_INTERVAL_MS};
use crate::world::Tile;

/// Shared data for :
/// - position : tile the player stands on
/// - display : facing + walk cycle frame and its timer
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PlayerContext {
    pub position: Tile,
    pub direction: Direction,
    pub frame: usize,
    pub frame_timer: f64,
}

#[derive(Debug, Copy, Clone)]
pub struct PlayerState<S> {
    context: PlayerContext,
    // type-level tag only, never read
    _state: S,
}

impl<S> PlayerState<S> {
    pub fn context(&self) -> &PlayerContext {
        &self.context
    }
}

impl PlayerState<Idle> {
    pub fn new(spawn: Tile) -> Self {
        PlayerState {
            context: PlayerContext {
                position: spawn,
                direction: Direction::Down,
                frame: 0,
                frame_timer: 0.0,
            },
            _state: Idle,
        }
    }

    /// Idle pose is always frame 0
    pub fn update(mut self) -> Self {
        self.context = self.context.reset_frame();
        self
    }

    pub fn walk(self, to: Tile, direction: Direction, frame_count: usize) -> PlayerState<Walking> {
        PlayerState {
            context: self.context.step(to, direction, frame_count),
            _state: Walking,
        }
    }

    /// Turn toward a blocked tile without moving
    pub fn bump(mut self, direction: Direction) -> Self {
        self.context = self.context.face(direction).reset_frame();
        self
    }

    pub fn release(mut self) -> Self {
        self.context = self.context.reset_frame().reset_timer();
        self
    }
}

impl PlayerState<Walking> {
    pub fn update(mut self, delta: f64, frame_count: usize) -> Self {
        self.context = self.context.tick(delta, frame_count);
        self
    }

    pub fn walk(mut self, to: Tile, direction: Direction, frame_count: usize) -> Self {
        self.context = self.context.step(to, direction, frame_count);
        self
    }

    pub fn bump(self, direction: Direction) -> PlayerState<Idle> {
        PlayerState {
            context: self.context.face(direction).reset_frame(),
            _state: Idle,
        }
    }

    pub fn stop(self) -> PlayerState<Idle> {
        PlayerState {
            context: self.context.reset_frame().reset_timer(),
            _state: Idle,
        }
    }
}

impl PlayerContext {
    /// Accumulate `delta`, advance one frame once the interval is reached
    /// - the timer restarts at 0, the overshoot is dropped
    fn tick(mut self, delta: f64, frame_count: usize) -> Self {
        self.frame_timer += delta;
        if self.frame_timer >= FRAME_INTERVAL_MS {
            self.frame_timer = 0.0;
            self = self.next_frame(frame_count);
        }
        self
    }

    fn step(self, to: Tile, direction: Direction, frame_count: usize) -> Self {
        let mut context = self.face(direction).next_frame(frame_count).reset_timer();
        context.position = to;
        context
    }

    fn face(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    fn next_frame(mut self, frame_count: usize) -> Self {
        self.frame = (self.frame + 1) % frame_count.max(1);
        self
    }

    fn reset_frame(mut self) -> Self {
        self.frame = 0;
        self
    }

    fn reset_timer(mut self) -> Self {
        self.frame_timer = 0.0;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn walking_timer_resets_instead_of_carrying_over() {
        let walking = PlayerState::new(Tile::new(2, 2)).walk(Tile::new(2, 1), Direction::Up, 4);
        assert_eq!(walking.context().frame, 1);

        let walking = walking.update(100.0, 4);
        assert_eq!(walking.context().frame, 1);
        assert_relative_eq!(walking.context().frame_timer, 100.0);

        let walking = walking.update(100.0, 4);
        assert_eq!(walking.context().frame, 2);
        assert_relative_eq!(walking.context().frame_timer, 0.0);
    }

    #[test]
    fn exact_interval_advances() {
        let walking = PlayerState::new(Tile::default())
            .walk(Tile::new(1, 0), Direction::Right, 2)
            .update(FRAME_INTERVAL_MS, 2);
        assert_eq!(walking.context().frame, 0);
    }

    #[test]
    fn stop_returns_to_idle_pose() {
        let idle = PlayerState::new(Tile::default())
            .walk(Tile::new(0, 1), Direction::Down, 3)
            .update(50.0, 3)
            .stop();
        assert_eq!(idle.context().frame, 0);
        assert_relative_eq!(idle.context().frame_timer, 0.0);
        assert_eq!(idle.context().position, Tile::new(0, 1));
    }
}
