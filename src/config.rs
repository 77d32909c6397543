use crate::error::AssetError;
use crate::world::ChunkCoord;
use anyhow::Result;
use serde::Deserialize;

pub const DEFAULT_TILE_SIZE: u32 = 32;

// Resource locations, relative to the page
pub const BINDING_PATH: &str = "assets/mapping/tileset_binding.json";
pub const CHUNK_ENDPOINT: &str = "/world/chunk";
pub const SPRITE_PATH: &str = "assets/sprites/user_character/sheet.png";

/// The chunk shown by the explorer
pub const START_CHUNK: ChunkCoord = ChunkCoord { cx: 0, cy: 0 };

/// Tileset binding file; only `tile_size` is read, other keys are ignored
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct TilesetBinding {
    #[serde(default)]
    pub tile_size: Option<u32>,
}

impl TilesetBinding {
    /// Pixel size of a tile, `DEFAULT_TILE_SIZE` when unset or 0
    pub fn tile_size(&self) -> u32 {
        self.tile_size
            .filter(|size| *size > 0)
            .unwrap_or(DEFAULT_TILE_SIZE)
    }
}

/// Canvas side in pixels for a chunk of `chunk_size` tiles
/// - a product past `u32` is blamed on the binding's `tile_size`
pub fn surface_side(chunk_size: usize, tile_size: u32) -> Result<u32> {
    u32::try_from(chunk_size)
        .ok()
        .and_then(|size| size.checked_mul(tile_size))
        .ok_or_else(|| {
            AssetError::Parse {
                url: BINDING_PATH.to_string(),
                reason: format!(
                    "tile_size {} too large for a {} tile chunk",
                    tile_size, chunk_size
                ),
            }
            .into()
        })
}

pub fn chunk_url(coord: ChunkCoord) -> String {
    format!("{}?cx={}&cy={}", CHUNK_ENDPOINT, coord.cx, coord.cy)
}
