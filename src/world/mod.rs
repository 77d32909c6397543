// world/
// ├── chunk.rs  Chunk + Cell as served by the world endpoint, collision
// ├── tiles.rs  tile colors and the blocking set
// └── spawn.rs  where the player starts
pub mod chunk;
pub mod spawn;
pub mod tiles;

pub use chunk::{Cell, Chunk, ChunkCoord, Tile};
