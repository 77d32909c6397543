use crate::sprite::state::{PlayerContext, PlayerState};
use crate::sprite::{Direction, FrameSet, Idle, Walking};
use crate::world::{Chunk, Tile};

/// ┌──────────────── State Transition Flow ──────────────────┐
/// │  From State  →  Event    →  To State                    │
/// ├─────────────────────────────────────────────────────────┤
/// │  Idle        →  Walk     →  Walking                     │
/// │  Idle        →  Bump     →  Idle     (turned, frame 0)  │
/// │  Walking     →  Walk     →  Walking  (next frame)       │
/// │  Walking     →  Bump     →  Idle                        │
/// │  Walking     →  Release  →  Idle                        │
/// │  -------        ------                                  │
/// │  Idle        →  Update   →  Idle     (frame 0)          │
/// │  Walking     →  Update   →  Walking  (walk cycle)       │
/// └─────────────────────────────────────────────────────────┘
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Event {
    Walk {
        to: Tile,
        direction: Direction,
        frame_count: usize,
    },
    Bump(Direction),
    Release,
    Update {
        delta: f64,
        frame_count: usize,
    },
}

#[derive(Debug, Copy, Clone)]
enum PlayerStateMachine {
    Idle(PlayerState<Idle>),
    Walking(PlayerState<Walking>),
}

impl From<PlayerState<Idle>> for PlayerStateMachine {
    fn from(state: PlayerState<Idle>) -> Self {
        PlayerStateMachine::Idle(state)
    }
}

impl From<PlayerState<Walking>> for PlayerStateMachine {
    fn from(state: PlayerState<Walking>) -> Self {
        PlayerStateMachine::Walking(state)
    }
}

impl PlayerStateMachine {
    fn transition(self, event: Event) -> Self {
        use PlayerStateMachine::*;
        match (self, event) {
            (
                Idle(state),
                Event::Walk {
                    to,
                    direction,
                    frame_count,
                },
            ) => state.walk(to, direction, frame_count).into(),
            (
                Walking(state),
                Event::Walk {
                    to,
                    direction,
                    frame_count,
                },
            ) => state.walk(to, direction, frame_count).into(),
            (Idle(state), Event::Bump(direction)) => state.bump(direction).into(),
            (Walking(state), Event::Bump(direction)) => state.bump(direction).into(),
            (Idle(state), Event::Release) => state.release().into(),
            (Walking(state), Event::Release) => state.stop().into(),
            (Idle(state), Event::Update { .. }) => state.update().into(),
            (Walking(state), Event::Update { delta, frame_count }) => {
                state.update(delta, frame_count).into()
            }
        }
    }

    fn context(&self) -> &PlayerContext {
        match self {
            PlayerStateMachine::Idle(state) => state.context(),
            PlayerStateMachine::Walking(state) => state.context(),
        }
    }
}

/// The avatar walking the chunk, one tile per step
/// - never stands outside the chunk or on a blocking cell, given a
///   passable spawn
#[derive(Debug, Clone)]
pub struct Player {
    state: PlayerStateMachine,
}

impl Player {
    pub fn new(spawn: Tile) -> Self {
        Player {
            state: PlayerState::new(spawn).into(),
        }
    }

    /// Face `direction` and try to move one tile that way
    pub fn step(&mut self, direction: Direction, chunk: &Chunk, frames: &FrameSet) {
        let (dx, dy) = direction.delta();
        let target = self.position().offset(dx, dy);
        let event = if chunk.is_blocked(target.x, target.y) {
            Event::Bump(direction)
        } else {
            Event::Walk {
                to: target,
                direction,
                frame_count: frames.frame_count(direction),
            }
        };
        self.state = self.state.transition(event);
    }

    pub fn release(&mut self) {
        self.state = self.state.transition(Event::Release);
    }

    /// Advance the walk cycle by `delta` milliseconds
    pub fn update(&mut self, delta: f64, frames: &FrameSet) {
        let frame_count = frames.frame_count(self.direction());
        self.state = self
            .state
            .transition(Event::Update { delta, frame_count });
    }

    pub fn position(&self) -> Tile {
        self.state.context().position
    }

    pub fn direction(&self) -> Direction {
        self.state.context().direction
    }

    pub fn frame_index(&self) -> usize {
        self.state.context().frame
    }

    pub fn frame_timer(&self) -> f64 {
        self.state.context().frame_timer
    }

    pub fn is_moving(&self) -> bool {
        matches!(self.state, PlayerStateMachine::Walking(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sprite::FrameRect;
    use crate::world::Cell;
    use approx::assert_relative_eq;

    fn walk_cycle() -> FrameSet {
        let strip = |row: u32| {
            (0..3)
                .map(|column| FrameRect::new(column * 16, row * 16, 16, 16))
                .collect::<Vec<_>>()
        };
        FrameSet::new()
            .with(Direction::Down, strip(0))
            .with(Direction::Left, strip(1))
            .with(Direction::Up, strip(2))
            .with(Direction::Right, strip(1).into_iter().map(FrameRect::flipped).collect())
    }

    fn field(blocked: &[(usize, usize)]) -> Chunk {
        let grid = (0..5)
            .map(|y| {
                (0..5)
                    .map(|x| {
                        if blocked.contains(&(x, y)) {
                            Cell::new("GRASS", Some("HOUSE_BASE"))
                        } else {
                            Cell::new("GRASS", None)
                        }
                    })
                    .collect()
            })
            .collect();
        Chunk::from_rows(grid).unwrap()
    }

    #[test]
    fn step_onto_passable_tile_moves() {
        let chunk = field(&[]);
        let frames = walk_cycle();
        let mut player = Player::new(Tile::new(2, 2));
        assert_eq!(player.direction(), Direction::Down);

        player.step(Direction::Up, &chunk, &frames);

        assert_eq!(player.position(), Tile::new(2, 1));
        assert_eq!(player.direction(), Direction::Up);
        assert!(player.is_moving());
        assert_eq!(player.frame_index(), 1);
        assert_relative_eq!(player.frame_timer(), 0.0);
    }

    #[test]
    fn step_into_blocking_tile_only_turns() {
        let chunk = field(&[(2, 1)]);
        let frames = walk_cycle();
        let mut player = Player::new(Tile::new(2, 2));

        player.step(Direction::Up, &chunk, &frames);

        assert_eq!(player.position(), Tile::new(2, 2));
        assert_eq!(player.direction(), Direction::Up);
        assert!(!player.is_moving());
        assert_eq!(player.frame_index(), 0);
    }

    #[test]
    fn bump_while_walking_stops() {
        let chunk = field(&[(2, 0)]);
        let frames = walk_cycle();
        let mut player = Player::new(Tile::new(2, 2));

        player.step(Direction::Up, &chunk, &frames);
        assert!(player.is_moving());
        player.step(Direction::Up, &chunk, &frames);

        assert_eq!(player.position(), Tile::new(2, 1));
        assert!(!player.is_moving());
        assert_eq!(player.frame_index(), 0);
    }

    #[test]
    fn edge_of_chunk_blocks() {
        let chunk = field(&[]);
        let frames = walk_cycle();
        let mut player = Player::new(Tile::new(0, 0));

        player.step(Direction::Left, &chunk, &frames);
        player.step(Direction::Up, &chunk, &frames);

        assert_eq!(player.position(), Tile::new(0, 0));
        assert_eq!(player.direction(), Direction::Up);
    }

    #[test]
    fn repeated_steps_cycle_frames() {
        let chunk = field(&[]);
        let frames = walk_cycle();
        let mut player = Player::new(Tile::new(0, 2));

        let seen: Vec<usize> = (0..4)
            .map(|_| {
                player.step(Direction::Right, &chunk, &frames);
                player.frame_index()
            })
            .collect();

        assert_eq!(seen, vec![1, 2, 0, 1]);
        assert_eq!(player.position(), Tile::new(4, 2));
    }

    #[test]
    fn release_resets_walk_cycle() {
        let chunk = field(&[]);
        let frames = walk_cycle();
        let mut player = Player::new(Tile::new(2, 2));

        player.step(Direction::Down, &chunk, &frames);
        player.update(90.0, &frames);
        player.release();

        assert!(!player.is_moving());
        assert_eq!(player.frame_index(), 0);
        assert_relative_eq!(player.frame_timer(), 0.0);
        assert_eq!(player.position(), Tile::new(2, 3));
    }

    #[test]
    fn animation_advances_once_and_resets_timer() {
        let chunk = field(&[]);
        let frames = walk_cycle();
        let mut player = Player::new(Tile::new(2, 2));
        player.step(Direction::Left, &chunk, &frames);
        let start = player.frame_index();

        player.update(100.0, &frames);
        player.update(100.0, &frames);

        assert_eq!(player.frame_index(), (start + 1) % 3);
        assert_relative_eq!(player.frame_timer(), 0.0);
    }

    #[test]
    fn idle_update_holds_pose() {
        let frames = walk_cycle();
        let mut player = Player::new(Tile::new(1, 1));

        player.update(500.0, &frames);

        assert_eq!(player.frame_index(), 0);
        assert!(!player.is_moving());
    }
}
