//! Placement of maze solids in the maze root's local space.
//!
//! The grid is centred on the origin in the XZ plane: cell column `x` runs along +X, cell row
//! `y` runs along +Z, and walls stand on the floor growing up +Y.

use std::fmt;

use nalgebra::Vector3;

use crate::cells::Cartesian2DCoordinate;
use crate::grid_dimensions::RectGridDimensions;
use crate::walls::WallPosition;

/// Height of the floor tiles.
pub const FLOOR_THICKNESS: f32 = 0.1;

/// Local position and scale of a solid.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub position: Vector3<f32>,
    pub scale: Vector3<f32>,
}

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub enum ObjectKind {
    Floor,
    HorizontalWall,
    VerticalWall,
}

impl ObjectKind {
    #[inline]
    pub fn is_wall(self) -> bool {
        self != ObjectKind::Floor
    }
}

/// Identity of an object the maze owns in the scene: what it is and which grid slot it fills.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct ObjectKey {
    pub kind: ObjectKind,
    pub x: u32,
    pub y: u32,
}

impl ObjectKey {
    pub fn floor(coord: Cartesian2DCoordinate) -> ObjectKey {
        ObjectKey {
            kind: ObjectKind::Floor,
            x: coord.x,
            y: coord.y,
        }
    }

    pub fn wall(position: WallPosition) -> ObjectKey {
        match position {
            WallPosition::Horizontal { x, y } => {
                ObjectKey {
                    kind: ObjectKind::HorizontalWall,
                    x,
                    y,
                }
            }
            WallPosition::Vertical { x, y } => {
                ObjectKey {
                    kind: ObjectKind::VerticalWall,
                    x,
                    y,
                }
            }
        }
    }

    /// Scene object name: `Floor_x_y`, `Wall_H_x_y` or `Wall_V_x_y`.
    pub fn name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let prefix = match self.kind {
            ObjectKind::Floor => "Floor",
            ObjectKind::HorizontalWall => "Wall_H",
            ObjectKind::VerticalWall => "Wall_V",
        };
        write!(f, "{}_{}_{}", prefix, self.x, self.y)
    }
}

/// Spatial layout of a maze: grid size plus the physical sizes of cells and walls.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MazeLayout {
    pub dimensions: RectGridDimensions,
    pub cell_size: f32,
    pub wall_thickness: f32,
    pub wall_height: f32,
}

impl MazeLayout {
    pub fn floor_transform(&self, coord: Cartesian2DCoordinate) -> Transform {
        let c = self.cell_size;
        Transform {
            position: Vector3::new(self.column_origin(coord.x) + c / 2.0,
                                   0.0,
                                   self.row_origin(coord.y) + c / 2.0),
            scale: Vector3::new(c, FLOOR_THICKNESS, c),
        }
    }

    pub fn wall_transform(&self, position: WallPosition) -> Transform {
        let c = self.cell_size;
        let half_height = self.wall_height / 2.0;
        match position {
            WallPosition::Horizontal { x, y } => {
                Transform {
                    position: Vector3::new(self.column_origin(x) + c / 2.0,
                                           half_height,
                                           self.row_origin(y)),
                    scale: Vector3::new(c, self.wall_height, self.wall_thickness),
                }
            }
            WallPosition::Vertical { x, y } => {
                Transform {
                    position: Vector3::new(self.column_origin(x),
                                           half_height,
                                           self.row_origin(y) + c / 2.0),
                    scale: Vector3::new(self.wall_thickness, self.wall_height, c),
                }
            }
        }
    }

    /// `(x - width/2) * cell_size`, the X of the western edge of column `x`.
    #[inline]
    fn column_origin(&self, x: u32) -> f32 {
        (x as f32 - self.dimensions.width().0 as f32 / 2.0) * self.cell_size
    }

    /// `(y - height/2) * cell_size`, the Z of the southern edge of row `y`.
    #[inline]
    fn row_origin(&self, y: u32) -> f32 {
        (y as f32 - self.dimensions.height().0 as f32 / 2.0) * self.cell_size
    }
}
