use crate::error::AssetError;
use crate::world::tiles;
use anyhow::Result;
use serde::Deserialize;

/// Integer tile coordinate inside a chunk
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Tile {
    pub x: i32,
    pub y: i32,
}

impl Tile {
    pub fn new(x: i32, y: i32) -> Self {
        Tile { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Tile {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Chunk coordinate on the world grid, used to address the chunk endpoint
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct ChunkCoord {
    pub cx: i32,
    pub cy: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Cell {
    pub base: String,
    #[serde(default)]
    pub deco: Option<String>,
    #[serde(default)]
    pub height: i32,
    #[serde(default)]
    pub growth_stage: Option<u32>,
}

impl Cell {
    pub fn new(base: &str, deco: Option<&str>) -> Self {
        Cell {
            base: base.to_string(),
            deco: deco.map(str::to_string),
            height: 0,
            growth_stage: None,
        }
    }

    /// Types painted or collided on this cell: base first, then deco
    pub fn layers(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.base.as_str()).chain(self.deco.as_deref())
    }
}

/// A square grid of cells, row-major: `grid[y][x]`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Chunk {
    #[serde(default)]
    pub cx: i32,
    #[serde(default)]
    pub cy: i32,
    #[serde(default)]
    pub version: Option<String>,
    pub size: usize,
    pub grid: Vec<Vec<Cell>>,
}

impl Chunk {
    /// Build a chunk from rows, `size` taken from the row count
    pub fn from_rows(grid: Vec<Vec<Cell>>) -> Result<Self> {
        Chunk {
            cx: 0,
            cy: 0,
            version: None,
            size: grid.len(),
            grid,
        }
        .validated("<memory>")
    }

    /// Reject grids whose shape does not match `size`
    pub fn validated(self, url: &str) -> Result<Self> {
        let malformed = |reason: String| AssetError::Parse {
            url: url.to_string(),
            reason,
        };
        if self.grid.len() != self.size {
            return Err(malformed(format!(
                "chunk has {} rows, expected {}",
                self.grid.len(),
                self.size
            ))
            .into());
        }
        if let Some((y, row)) = self
            .grid
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != self.size)
        {
            return Err(malformed(format!(
                "chunk row {} has {} cells, expected {}",
                y,
                row.len(),
                self.size
            ))
            .into());
        }
        Ok(self)
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.size && (y as usize) < self.size
    }

    pub fn cell_at(&self, x: i32, y: i32) -> Option<&Cell> {
        if !self.contains(x, y) {
            return None;
        }
        self.grid.get(y as usize)?.get(x as usize)
    }

    /// Cells with their coordinates, row by row
    pub fn cells(&self) -> impl Iterator<Item = (Tile, &Cell)> {
        self.grid.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .map(move |(x, cell)| (Tile::new(x as i32, y as i32), cell))
        })
    }

    /// Out of bounds is always blocked
    pub fn is_blocked(&self, x: i32, y: i32) -> bool {
        match self.cell_at(x, y) {
            Some(cell) => cell.layers().any(tiles::blocks),
            None => true,
        }
    }
}
