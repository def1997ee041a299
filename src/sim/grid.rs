//! Tile grid: layout generation, collision queries and blast destruction

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{FALLBACK_TILE_SIZE, MIN_TILE_SIZE, TARGET_COLUMNS};
use crate::error::{ArenaError, Result};
use crate::pixel_to_tile;

/// Contents of a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TileType {
    #[default]
    Empty,
    /// Destructible, removed by one blast contact
    SoftWall,
    /// Indestructible interior pillar
    HardWall,
    /// Indestructible outer ring; also what any out-of-range query sees
    BorderWall,
}

impl TileType {
    /// Whether a blast can destroy this tile
    pub fn is_destructible(self) -> bool {
        self == TileType::SoftWall
    }

    /// Whether an actor can stand on this tile
    pub fn is_walkable(self) -> bool {
        self == TileType::Empty
    }
}

/// Fixed-size tile map for one round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    tile_size: i32,
    rows: i32,
    columns: i32,
    /// Row-major tile storage; empty until a layout has been generated
    tiles: Vec<TileType>,
}

impl Grid {
    /// Derive grid dimensions from the screen size.
    ///
    /// The tile size is chosen so that `TARGET_COLUMNS` tiles fill the width,
    /// floored at `MIN_TILE_SIZE`. If that leaves no interior, one retry is made
    /// with `FALLBACK_TILE_SIZE` before giving up. The layout is left unset;
    /// call [`Grid::generate_layout`] before use.
    pub fn initialize(pixel_width: i32, pixel_height: i32) -> Result<Self> {
        if pixel_width <= 0 || pixel_height <= 0 {
            return Err(ArenaError::InvalidDimensions {
                width: pixel_width,
                height: pixel_height,
            });
        }

        let tile_size = (pixel_width / TARGET_COLUMNS).max(MIN_TILE_SIZE);
        let mut grid = Self {
            tile_size,
            rows: pixel_height / tile_size,
            columns: TARGET_COLUMNS,
            tiles: Vec::new(),
        };

        if grid.rows <= 2 || grid.columns <= 2 {
            log::warn!(
                "Grid {}x{} at {}px has no interior, retrying with {}px tiles",
                grid.rows,
                grid.columns,
                grid.tile_size,
                FALLBACK_TILE_SIZE
            );
            grid.tile_size = FALLBACK_TILE_SIZE;
            grid.columns = pixel_width / FALLBACK_TILE_SIZE;
            grid.rows = pixel_height / FALLBACK_TILE_SIZE;
            if grid.rows <= 2 || grid.columns <= 2 {
                log::error!(
                    "Grid still too small after fallback: {}x{}",
                    grid.rows,
                    grid.columns
                );
                return Err(ArenaError::GridTooSmall {
                    rows: grid.rows,
                    columns: grid.columns,
                    tile_size: grid.tile_size,
                });
            }
        }

        log::info!(
            "Grid initialized: {} rows, {} columns, tile size {}",
            grid.rows,
            grid.columns,
            grid.tile_size
        );
        Ok(grid)
    }

    /// Build a grid from a textual layout, one line per row.
    ///
    /// `B` border, `H` hard wall, `S` soft wall, `.` empty. Whitespace around
    /// each line is ignored, blank lines are skipped.
    pub fn parse(tile_size: i32, layout: &str) -> Result<Self> {
        if tile_size <= 0 {
            return Err(ArenaError::InvalidLayout(format!(
                "tile size must be positive, got {tile_size}"
            )));
        }

        let mut tiles = Vec::new();
        let mut rows = 0;
        let mut columns = None;
        for line in layout.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let row: Vec<TileType> = line
                .chars()
                .map(|c| match c {
                    'B' => Ok(TileType::BorderWall),
                    'H' => Ok(TileType::HardWall),
                    'S' => Ok(TileType::SoftWall),
                    '.' => Ok(TileType::Empty),
                    other => Err(ArenaError::InvalidLayout(format!(
                        "unknown tile '{other}' on row {rows}"
                    ))),
                })
                .collect::<Result<_>>()?;

            let width = row.len() as i32;
            match columns {
                None => columns = Some(width),
                Some(c) if c != width => {
                    return Err(ArenaError::InvalidLayout(format!(
                        "row {rows} has {width} tiles, expected {c}"
                    )));
                }
                Some(_) => {}
            }
            tiles.extend(row);
            rows += 1;
        }

        let columns = columns.unwrap_or(0);
        if rows <= 2 || columns <= 2 {
            return Err(ArenaError::GridTooSmall {
                rows,
                columns,
                tile_size,
            });
        }

        Ok(Self {
            tile_size,
            rows,
            columns,
            tiles,
        })
    }

    /// Fill the grid with a fresh random layout.
    ///
    /// Border ring, hard pillars on even interior coordinates, soft walls with
    /// probability 1/3 everywhere else except the four 3x3 spawn corners. The
    /// three tiles next to the player spawn are always cleared.
    pub fn generate_layout<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let (rows, cols) = (self.rows, self.columns);
        self.tiles = vec![TileType::Empty; (rows * cols) as usize];

        for r in 0..rows {
            for c in 0..cols {
                if r == 0 || r == rows - 1 || c == 0 || c == cols - 1 {
                    self.set_tile(r, c, TileType::BorderWall);
                }
            }
        }

        for r in (2..rows - 2).step_by(2) {
            for c in (2..cols - 2).step_by(2) {
                self.set_tile(r, c, TileType::HardWall);
            }
        }

        for r in 1..rows - 1 {
            for c in 1..cols - 1 {
                if self.tile_type(r, c) != TileType::Empty || self.in_spawn_corner(r, c) {
                    continue;
                }
                if rng.random_range(0..3) == 0 {
                    self.set_tile(r, c, TileType::SoftWall);
                }
            }
        }

        // Escape path from the player's corner
        for (r, c) in [(1, 1), (1, 2), (2, 1)] {
            if r < rows - 1 && c < cols - 1 {
                self.set_tile(r, c, TileType::Empty);
            }
        }
    }

    fn in_spawn_corner(&self, r: i32, c: i32) -> bool {
        let top = r <= 2;
        let bottom = r >= self.rows - 3;
        let left = c <= 2;
        let right = c >= self.columns - 3;
        (top || bottom) && (left || right)
    }

    /// Whether an axis-aligned box at a pixel position touches any non-empty tile.
    ///
    /// Only the four corners are sampled, so boxes larger than a tile can
    /// straddle a wall without being reported. An uninitialized grid blocks
    /// everything.
    pub fn is_colliding(&self, x: i32, y: i32, width: i32, height: i32) -> bool {
        if self.tiles.is_empty() {
            return true;
        }
        let far_x = x + width - 1;
        let far_y = y + height - 1;
        [(x, y), (far_x, y), (x, far_y), (far_x, far_y)]
            .into_iter()
            .any(|(px, py)| !self.tile_at_pixel(IVec2::new(px, py)).is_walkable())
    }

    /// Tile at (row, column). Out of range reads as `BorderWall`, an unset
    /// layout reads as `HardWall`.
    pub fn tile_type(&self, row: i32, col: i32) -> TileType {
        if row < 0 || row >= self.rows || col < 0 || col >= self.columns {
            return TileType::BorderWall;
        }
        if self.tiles.is_empty() {
            return TileType::HardWall;
        }
        self.tiles[self.index(row, col)]
    }

    /// Tile containing a pixel
    pub fn tile_at_pixel(&self, pixel: IVec2) -> TileType {
        let tile = pixel_to_tile(pixel, self.tile_size);
        self.tile_type(tile.y, tile.x)
    }

    /// Destroy every soft wall under the footprint, returning how many went.
    pub fn apply_blast(&mut self, footprint: &[IVec2]) -> u32 {
        if self.tiles.is_empty() {
            return 0;
        }
        let mut destroyed = 0;
        for &cell in footprint {
            let tile = pixel_to_tile(cell, self.tile_size);
            if self.tile_type(tile.y, tile.x).is_destructible() {
                self.set_tile(tile.y, tile.x, TileType::Empty);
                destroyed += 1;
            }
        }
        destroyed
    }

    /// Overwrite a tile. Out-of-range coordinates and unset layouts are ignored.
    pub fn set_tile(&mut self, row: i32, col: i32, tile: TileType) {
        if row < 0 || row >= self.rows || col < 0 || col >= self.columns || self.tiles.is_empty()
        {
            return;
        }
        let idx = self.index(row, col);
        self.tiles[idx] = tile;
    }

    #[inline]
    fn index(&self, row: i32, col: i32) -> usize {
        (row * self.columns + col) as usize
    }

    pub fn tile_size(&self) -> i32 {
        self.tile_size
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn columns(&self) -> i32 {
        self.columns
    }

    /// Map size in pixels (columns x tile, rows x tile)
    pub fn pixel_size(&self) -> IVec2 {
        IVec2::new(self.columns * self.tile_size, self.rows * self.tile_size)
    }

    pub fn is_initialized(&self) -> bool {
        !self.tiles.is_empty()
    }

    /// Iterate `(row, col, tile)` in row-major order
    pub fn iter_tiles(&self) -> impl Iterator<Item = (i32, i32, TileType)> + '_ {
        self.tiles.iter().enumerate().map(|(i, &t)| {
            let i = i as i32;
            (i / self.columns, i % self.columns, t)
        })
    }

    /// Number of tiles of a given type
    pub fn count(&self, tile: TileType) -> usize {
        self.tiles.iter().filter(|&&t| t == tile).count()
    }
}
