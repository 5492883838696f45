//! Wall presence state of a rectangular maze.
//!
//! A `w × h` maze is bounded by `h + 1` rows of horizontal walls (`w` walls each) and `w + 1`
//! columns of vertical walls (`h` walls each). Horizontal wall `(x, y)` separates cell `(x, y-1)`
//! from cell `(x, y)`; vertical wall `(x, y)` separates cell `(x-1, y)` from cell `(x, y)`.
//! Walls at `y == 0`/`y == h` (horizontal) and `x == 0`/`x == w` (vertical) form the perimeter.

use std::fmt;

use bit_set::BitSet;
use itertools::iproduct;

use crate::cells::{self, Cartesian2DCoordinate, CompassPrimary};
use crate::grid_dimensions::RectGridDimensions;
use crate::renderers;


/// A boolean matrix of wall presence, `columns × rows`. A set bit means the wall is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WallGrid {
    columns: usize,
    rows: usize,
    present: BitSet,
}

impl WallGrid {
    /// Every wall present.
    pub fn closed(columns: usize, rows: usize) -> WallGrid {
        let cells = columns * rows;
        let mut present = BitSet::with_capacity(cells);
        for index in 0..cells {
            present.insert(index);
        }
        WallGrid { columns, rows, present }
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Wall presence at `(x, y)`, None if outside the matrix.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<bool> {
        self.index(x, y).map(|i| self.present.contains(i))
    }

    /// Is there a wall at `(x, y)`? Positions outside the matrix have no wall.
    #[inline]
    pub fn is_present(&self, x: usize, y: usize) -> bool {
        self.get(x, y).unwrap_or(false)
    }

    pub fn count_present(&self) -> usize {
        self.present.len()
    }

    /// Positions of present walls, column by column.
    pub fn iter_present<'a>(&'a self) -> impl Iterator<Item = (usize, usize)> + 'a {
        iproduct!(0..self.columns, 0..self.rows).filter(move |&(x, y)| self.is_present(x, y))
    }

    /// Returns false if `(x, y)` is outside the matrix.
    fn clear(&mut self, x: usize, y: usize) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.present.remove(i);
                true
            }
            None => false,
        }
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> Option<usize> {
        if x < self.columns && y < self.rows {
            Some(y * self.columns + x)
        } else {
            None
        }
    }
}

/// Identifies a single wall slot in either of the two wall matrices.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub enum WallPosition {
    /// Blocks the North/South boundary below row `y` at column `x`.
    Horizontal { x: u32, y: u32 },
    /// Blocks the East/West boundary left of column `x` at row `y`.
    Vertical { x: u32, y: u32 },
}

impl fmt::Display for WallPosition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            WallPosition::Horizontal { x, y } => write!(f, "horizontal wall ({}, {})", x, y),
            WallPosition::Vertical { x, y } => write!(f, "vertical wall ({}, {})", x, y),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeWalls {
    dimensions: RectGridDimensions,
    horizontal: WallGrid,
    vertical: WallGrid,
}

impl MazeWalls {
    /// A maze with every wall present, no passages at all.
    pub fn closed(dimensions: RectGridDimensions) -> MazeWalls {
        let (w, h) = (dimensions.width().0, dimensions.height().0);
        MazeWalls {
            dimensions,
            horizontal: WallGrid::closed(w, h + 1),
            vertical: WallGrid::closed(w + 1, h),
        }
    }

    #[inline]
    pub fn dimensions(&self) -> &RectGridDimensions {
        &self.dimensions
    }

    #[inline]
    pub fn horizontal(&self) -> &WallGrid {
        &self.horizontal
    }

    #[inline]
    pub fn vertical(&self) -> &WallGrid {
        &self.vertical
    }

    /// The wall slot on the `dir` side of a cell, perimeter slots included.
    /// None if the cell is outside the grid.
    pub fn wall_position(&self,
                         coord: Cartesian2DCoordinate,
                         dir: CompassPrimary)
                         -> Option<WallPosition> {
        if !self.dimensions.contains(coord) {
            return None;
        }
        let (x, y) = (coord.x, coord.y);
        let position = match dir {
            CompassPrimary::North => WallPosition::Horizontal { x, y: y + 1 },
            CompassPrimary::South => WallPosition::Horizontal { x, y },
            CompassPrimary::East => WallPosition::Vertical { x: x + 1, y },
            CompassPrimary::West => WallPosition::Vertical { x, y },
        };
        Some(position)
    }

    pub fn has_wall(&self, position: WallPosition) -> bool {
        match position {
            WallPosition::Horizontal { x, y } => self.horizontal.is_present(x as usize, y as usize),
            WallPosition::Vertical { x, y } => self.vertical.is_present(x as usize, y as usize),
        }
    }

    /// Can you walk from `coord` into the neighbouring cell in direction `dir`?
    pub fn is_passage(&self, coord: Cartesian2DCoordinate, dir: CompassPrimary) -> bool {
        cells::offset_coordinate(coord, dir, &self.dimensions).is_some() &&
        self.wall_position(coord, dir).map_or(false, |wall| !self.has_wall(wall))
    }

    /// Cells reachable in one step from `coord`.
    pub fn passages(&self, coord: Cartesian2DCoordinate) -> cells::NeighbourSmallVec {
        cells::neighbours(coord, &self.dimensions)
            .into_iter()
            .filter(|&(dir, _)| self.is_passage(coord, dir))
            .collect()
    }

    pub fn is_perimeter(&self, position: WallPosition) -> bool {
        let (w, h) = (self.dimensions.width().0 as u32, self.dimensions.height().0 as u32);
        match position {
            WallPosition::Horizontal { y, .. } => y == 0 || y == h,
            WallPosition::Vertical { x, .. } => x == 0 || x == w,
        }
    }

    /// Every present wall: horizontal walls column by column, then vertical walls.
    pub fn present_walls<'a>(&'a self) -> impl Iterator<Item = WallPosition> + 'a {
        let horizontal = self.horizontal
            .iter_present()
            .map(|(x, y)| WallPosition::Horizontal { x: x as u32, y: y as u32 });
        let vertical = self.vertical
            .iter_present()
            .map(|(x, y)| WallPosition::Vertical { x: x as u32, y: y as u32 });
        horizontal.chain(vertical)
    }

    pub fn present_walls_count(&self) -> usize {
        self.horizontal.count_present() + self.vertical.count_present()
    }

    pub fn removed_walls_count(&self) -> usize {
        self.dimensions.walls_count().0 - self.present_walls_count()
    }

    pub fn perimeter_intact(&self) -> bool {
        let (w, h) = (self.dimensions.width().0, self.dimensions.height().0);
        let horizontal_edges = (0..w).all(|x| {
            self.horizontal.is_present(x, 0) && self.horizontal.is_present(x, h)
        });
        let vertical_edges = (0..h).all(|y| {
            self.vertical.is_present(0, y) && self.vertical.is_present(w, y)
        });
        horizontal_edges && vertical_edges
    }

    /// Open the interior wall on the `dir` side of `coord`.
    ///
    /// Returns None, changing nothing, when there is no neighbouring cell in that direction;
    /// perimeter walls are never removed.
    pub(crate) fn remove_wall(&mut self,
                              coord: Cartesian2DCoordinate,
                              dir: CompassPrimary)
                              -> Option<WallPosition> {
        let position = self.wall_position(coord, dir)?;
        if self.is_perimeter(position) {
            return None;
        }
        let cleared = match position {
            WallPosition::Horizontal { x, y } => self.horizontal.clear(x as usize, y as usize),
            WallPosition::Vertical { x, y } => self.vertical.clear(x as usize, y as usize),
        };
        if cleared {
            Some(position)
        } else {
            None
        }
    }
}

impl fmt::Display for MazeWalls {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", renderers::render_text(self, None))
    }
}
