use crate::engine::{Point, Rect, Renderer};
use crate::sprite::player::Player;
use crate::sprite::{FrameRect, FrameSet};
use crate::world::tiles::create_color;
use crate::world::{Chunk, Tile};
use web_sys::HtmlImageElement;

/// Share of the tile left empty on each side around a decoration
const DECO_INSET: f64 = 0.2;
/// Sprite height in tiles; the sprite overhangs the tile above
const SPRITE_SCALE: f64 = 1.2;

pub fn tile_rect(tile: Tile, tile_size: f64) -> Rect {
    Rect::new(
        tile.x as f64 * tile_size,
        tile.y as f64 * tile_size,
        tile_size,
        tile_size,
    )
}

pub fn deco_rect(tile: Tile, tile_size: f64) -> Rect {
    tile_rect(tile, tile_size).inset(tile_size * DECO_INSET)
}

/// Where the sprite lands for a player on `tile`
/// - pivot: tile center, the point a mirrored frame flips about
/// - destination: one tile wide, `SPRITE_SCALE` tiles tall, bottom on the pivot
pub fn sprite_placement(tile: Tile, tile_size: f64) -> (Rect, Point) {
    let pivot = Point {
        x: tile.x as f64 * tile_size + tile_size / 2.0,
        y: tile.y as f64 * tile_size + tile_size / 2.0,
    };
    let height = tile_size * SPRITE_SCALE;
    let destination = Rect::new(pivot.x - tile_size / 2.0, pivot.y - height, tile_size, height);
    (destination, pivot)
}

fn source_rect(frame: &FrameRect) -> Rect {
    Rect::new(
        frame.sx as f64,
        frame.sy as f64,
        frame.sw as f64,
        frame.sh as f64,
    )
}

/// Paint every cell: base color, then the inset decoration if any
pub fn draw_map(renderer: &Renderer, chunk: &Chunk, tile_size: f64) {
    for (tile, cell) in chunk.cells() {
        renderer.fill_rect(
            &tile_rect(tile, tile_size),
            &create_color(&cell.base).to_string(),
        );
        if let Some(deco) = &cell.deco {
            renderer.fill_rect(&deco_rect(tile, tile_size), &create_color(deco).to_string());
        }
    }
}

pub fn draw_player(
    renderer: &Renderer,
    image: &HtmlImageElement,
    frames: &FrameSet,
    player: &Player,
    tile_size: f64,
) {
    let Some(frame) = frames.frame(player.direction(), player.frame_index()) else {
        return;
    };
    let (destination, pivot) = sprite_placement(player.position(), tile_size);
    let source = source_rect(frame);
    if frame.flip_x {
        renderer.draw_image_flipped(image, &source, &destination, &pivot);
    } else {
        renderer.draw_image(image, &source, &destination);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn tiles_are_laid_out_on_the_grid() {
        assert_eq!(tile_rect(Tile::new(3, 2), 32.0), Rect::new(96.0, 64.0, 32.0, 32.0));
    }

    #[test]
    fn decoration_is_inset_a_fifth() {
        let rect = deco_rect(Tile::new(0, 0), 40.0);
        assert_relative_eq!(rect.x, 8.0, epsilon = 1e-9);
        assert_relative_eq!(rect.y, 8.0, epsilon = 1e-9);
        assert_relative_eq!(rect.width, 24.0, epsilon = 1e-9);
        assert_relative_eq!(rect.height, 24.0, epsilon = 1e-9);
    }

    #[test]
    fn sprite_stands_on_tile_center() {
        let (destination, pivot) = sprite_placement(Tile::new(2, 1), 32.0);
        assert_relative_eq!(pivot.x, 80.0);
        assert_relative_eq!(pivot.y, 48.0);
        assert_relative_eq!(destination.x, 64.0);
        assert_relative_eq!(destination.y, 48.0 - 38.4, epsilon = 1e-9);
        assert_relative_eq!(destination.width, 32.0);
        assert_relative_eq!(destination.height, 38.4, epsilon = 1e-9);
    }

    #[test]
    fn source_rect_copies_frame_geometry() {
        let rect = source_rect(&FrameRect::new(100, 0, 100, 120).flipped());
        assert_eq!(rect, Rect::new(100.0, 0.0, 100.0, 120.0));
    }
}
