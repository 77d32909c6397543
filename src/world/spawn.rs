use crate::world::chunk::{Chunk, Tile};

/// Nearest passable tile to the chunk center
/// - square rings of growing radius, each scanned row by row
/// - `(0, 0)` when nothing within range is passable, which is not itself checked
pub fn find_spawn(chunk: &Chunk) -> Tile {
    let center = (chunk.size / 2) as i32;
    let radius = center.max(1);
    (0..=radius)
        .flat_map(|r| {
            (-r..=r).flat_map(move |dy| (-r..=r).map(move |dx| Tile::new(center + dx, center + dy)))
        })
        .find(|tile| !chunk.is_blocked(tile.x, tile.y))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::chunk::Cell;

    fn chunk_with(size: usize, passable: impl Fn(usize, usize) -> bool) -> Chunk {
        let grid = (0..size)
            .map(|y| {
                (0..size)
                    .map(|x| {
                        if passable(x, y) {
                            Cell::new("GRASS", None)
                        } else {
                            Cell::new("WATER", None)
                        }
                    })
                    .collect()
            })
            .collect();
        Chunk::from_rows(grid).unwrap()
    }

    #[test]
    fn open_grid_spawns_at_center() {
        for size in [1, 2, 3, 4, 7, 32] {
            let chunk = chunk_with(size, |_, _| true);
            let center = (size / 2) as i32;
            assert_eq!(find_spawn(&chunk), Tile::new(center, center));
        }
    }

    #[test]
    fn only_origin_passable_spawns_at_origin() {
        for size in [1, 2, 3, 5, 8] {
            let chunk = chunk_with(size, |x, y| x == 0 && y == 0);
            assert_eq!(find_spawn(&chunk), Tile::new(0, 0));
        }
    }

    #[test]
    fn ring_is_scanned_row_major() {
        // center (2, 2) blocked, ring 1 has (3, 1) and (1, 3) open
        let chunk = chunk_with(5, |x, y| (x, y) == (3, 1) || (x, y) == (1, 3));
        assert_eq!(find_spawn(&chunk), Tile::new(3, 1));
    }

    #[test]
    fn nearer_ring_wins_over_scan_order() {
        let chunk = chunk_with(7, |x, y| (x, y) == (0, 0) || (x, y) == (4, 4));
        assert_eq!(find_spawn(&chunk), Tile::new(4, 4));
    }

    #[test]
    fn fully_blocked_falls_back_to_origin() {
        let chunk = chunk_with(4, |_, _| false);
        assert_eq!(find_spawn(&chunk), Tile::new(0, 0));
        assert!(chunk.is_blocked(0, 0));
    }
}
