use std::fmt;

use smallvec::SmallVec;

use crate::grid_dimensions::RectGridDimensions;

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Cartesian2DCoordinate {
    pub x: u32,
    pub y: u32,
}

impl Cartesian2DCoordinate {
    pub fn new(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate { x, y }
    }

    #[inline]
    pub fn from_row_major_index(index: usize, dimensions: &RectGridDimensions) -> Self {
        let width = dimensions.width().0;
        Cartesian2DCoordinate::new((index % width) as u32, (index / width) as u32)
    }
}

impl fmt::Display for Cartesian2DCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The four grid directions.
///
/// North faces increasing `y` (the +z axis of the built geometry), East faces increasing `x`.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum CompassPrimary {
    North,
    South,
    East,
    West,
}

pub type NeighbourSmallVec = SmallVec<[(CompassPrimary, Cartesian2DCoordinate); 4]>;

impl CompassPrimary {
    /// Neighbour enumeration order used by the maze walk.
    pub const ALL: [CompassPrimary; 4] = [CompassPrimary::North,
                                         CompassPrimary::South,
                                         CompassPrimary::East,
                                         CompassPrimary::West];
}

/// Creates a new coordinate offset 1 cell away in the given direction.
/// Returns None if that cell lies outside the grid. There is no wraparound.
pub fn offset_coordinate(coord: Cartesian2DCoordinate,
                         dir: CompassPrimary,
                         dimensions: &RectGridDimensions)
                         -> Option<Cartesian2DCoordinate> {

    if !dimensions.contains(coord) {
        return None;
    }

    let (x, y) = (coord.x, coord.y);
    let (width, height) = (dimensions.width().0 as u32, dimensions.height().0 as u32);
    match dir {
        CompassPrimary::North => {
            if y + 1 < height {
                Some(Cartesian2DCoordinate { x, y: y + 1 })
            } else {
                None
            }
        }
        CompassPrimary::South => {
            if y > 0 {
                Some(Cartesian2DCoordinate { x, y: y - 1 })
            } else {
                None
            }
        }
        CompassPrimary::East => {
            if x + 1 < width {
                Some(Cartesian2DCoordinate { x: x + 1, y })
            } else {
                None
            }
        }
        CompassPrimary::West => {
            if x > 0 {
                Some(Cartesian2DCoordinate { x: x - 1, y })
            } else {
                None
            }
        }
    }
}

/// Cells to the North, South, East or West of `coord` that lie inside the grid, paired with
/// the direction taken to reach them. Not necessarily linked by a passage.
pub fn neighbours(coord: Cartesian2DCoordinate,
                  dimensions: &RectGridDimensions)
                  -> NeighbourSmallVec {
    CompassPrimary::ALL
        .iter()
        .filter_map(|dir| offset_coordinate(coord, *dir, dimensions).map(|n| (*dir, n)))
        .collect()
}
