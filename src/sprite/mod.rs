// sprite/
// ├── mod.rs     sheet slicing: Direction, FrameRect, FrameSet
// ├── state.rs   typestates Idle / Walking and the shared PlayerContext
// └── player.rs  Player, the state machine driven by input and ticks
use std::collections::HashMap;

pub mod player;
pub mod state;

/// Walk cycle advances once per this many milliseconds while moving
pub const FRAME_INTERVAL_MS: f64 = 180.0;

/// Frames on the sheet, left to right: down, left, up
const SHEET_COLUMNS: u32 = 3;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Tile offset of one step, y grows downward
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Sub-region of the sprite sheet
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FrameRect {
    pub sx: u32,
    pub sy: u32,
    pub sw: u32,
    pub sh: u32,
    pub flip_x: bool,
}

impl FrameRect {
    pub fn new(sx: u32, sy: u32, sw: u32, sh: u32) -> Self {
        FrameRect {
            sx,
            sy,
            sw,
            sh,
            flip_x: false,
        }
    }

    pub fn flipped(mut self) -> Self {
        self.flip_x = true;
        self
    }
}

/// Animation frames for each facing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameSet {
    frames: HashMap<Direction, Vec<FrameRect>>,
}

impl FrameSet {
    pub fn new() -> Self {
        FrameSet::default()
    }

    pub fn with(mut self, direction: Direction, frames: Vec<FrameRect>) -> Self {
        self.frames.insert(direction, frames);
        self
    }

    pub fn frames(&self, direction: Direction) -> &[FrameRect] {
        self.frames
            .get(&direction)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Never 0, so frame indices can always be wrapped with it
    pub fn frame_count(&self, direction: Direction) -> usize {
        self.frames(direction).len().max(1)
    }

    pub fn frame(&self, direction: Direction, index: usize) -> Option<&FrameRect> {
        let frames = self.frames(direction);
        frames.get(index % self.frame_count(direction))
    }
}

/// Slice a sheet of three equal-width frames into the four facings
/// - `right` reuses the `left` frame mirrored
/// - a width not divisible by 3 drops the remainder columns
pub fn create_frame_sets(sheet_width: u32, sheet_height: u32) -> FrameSet {
    let frame_width = sheet_width / SHEET_COLUMNS;
    let column = |index: u32| FrameRect::new(frame_width * index, 0, frame_width, sheet_height);

    FrameSet::new()
        .with(Direction::Down, vec![column(0)])
        .with(Direction::Left, vec![column(1)])
        .with(Direction::Up, vec![column(2)])
        .with(Direction::Right, vec![column(1).flipped()])
}

#[derive(Debug, Copy, Clone)]
pub struct Idle;

#[derive(Debug, Copy, Clone)]
pub struct Walking;
