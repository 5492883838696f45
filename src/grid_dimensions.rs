use crate::cells::Cartesian2DCoordinate;
use crate::errors::*;
use crate::grid_iterators::RectGridCellIter;
use crate::units::{EdgesCount, Height, NodesCount, Width};


/// Cell counts of a rectangular maze, never zero in either direction.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct RectGridDimensions {
    width: Width,
    height: Height,
}

impl RectGridDimensions {
    pub fn new(width: Width, height: Height) -> Result<RectGridDimensions> {
        if width.0 == 0 || height.0 == 0 || width.0 > u32::MAX as usize ||
           height.0 > u32::MAX as usize {
            bail!(ErrorKind::InvalidDimensions(width.0, height.0));
        }
        Ok(RectGridDimensions { width, height })
    }

    #[inline(always)]
    pub fn width(&self) -> Width {
        self.width
    }

    #[inline(always)]
    pub fn height(&self) -> Height {
        self.height
    }

    #[inline(always)]
    pub fn size(&self) -> NodesCount {
        NodesCount(self.width.0 * self.height.0)
    }

    /// All walls of a closed grid: `w * (h+1)` horizontal plus `(w+1) * h` vertical.
    pub fn walls_count(&self) -> EdgesCount {
        let (w, h) = (self.width.0, self.height.0);
        EdgesCount(w * (h + 1) + (w + 1) * h)
    }

    #[inline]
    pub fn contains(&self, coord: Cartesian2DCoordinate) -> bool {
        (coord.x as usize) < self.width.0 && (coord.y as usize) < self.height.0
    }

    /// Convert a grid coordinate to a one dimensional row major index in the range 0..size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn coordinate_to_index(&self, coord: Cartesian2DCoordinate) -> Option<usize> {
        if self.contains(coord) {
            Some(coord.y as usize * self.width.0 + coord.x as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn iter(&self) -> RectGridCellIter {
        RectGridCellIter::new(*self)
    }
}
