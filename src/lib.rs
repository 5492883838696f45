//! **maze_corridors** generates perfect mazes on rectangular grids and builds them as floor and
//! wall solids in a host scene graph, either all at once or one carved passage at a time.

#[macro_use]
extern crate error_chain;

pub mod builder;
pub mod cells;
pub mod config;
pub mod errors;
pub mod generators;
pub mod geometry;
pub mod grid_dimensions;
pub mod grid_iterators;
pub mod maze_generator;
pub mod pathing;
pub mod renderers;
pub mod scene;
pub mod scheduling;
pub mod units;
pub mod walls;
