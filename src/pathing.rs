use std::collections::hash_map::Entry;

use fnv::FnvHashMap;
use petgraph::algo::{connected_components, is_cyclic_undirected};
use petgraph::graph::{NodeIndex, UnGraph};
use smallvec::SmallVec;

use crate::cells::{self, Cartesian2DCoordinate, CompassPrimary};
use crate::walls::MazeWalls;


/// Flood fill distances, in steps, from a start cell to every reachable cell.
#[derive(Debug, Clone)]
pub struct Distances {
    start_coordinate: Cartesian2DCoordinate,
    distances: FnvHashMap<Cartesian2DCoordinate, u32>,
    max_distance: u32,
}

impl Distances {
    /// None if `start_coordinate` is outside the maze.
    pub fn new(walls: &MazeWalls, start_coordinate: Cartesian2DCoordinate) -> Option<Distances> {

        if !walls.dimensions().contains(start_coordinate) {
            return None;
        }

        let mut max = 0;
        let mut distances = FnvHashMap::default();
        distances.reserve(walls.dimensions().size().0);
        distances.insert(start_coordinate, 0);

        // Every link is one step, so the first time a cell is reached is by its shortest route.
        // The distances map doubles as the visited set.
        let mut frontier = vec![start_coordinate];
        while !frontier.is_empty() {

            let mut new_frontier = vec![];
            for cell_coord in &frontier {
                let distance_to_cell = distances.get(cell_coord).cloned().unwrap_or(0);
                if distance_to_cell > max {
                    max = distance_to_cell;
                }

                for &(_, link_coordinate) in walls.passages(*cell_coord).iter() {
                    if let Entry::Vacant(entry) = distances.entry(link_coordinate) {
                        entry.insert(distance_to_cell + 1);
                        new_frontier.push(link_coordinate);
                    }
                }
            }
            frontier = new_frontier;
        }

        Some(Distances {
            start_coordinate,
            distances,
            max_distance: max,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> Cartesian2DCoordinate {
        self.start_coordinate
    }

    #[inline(always)]
    pub fn max(&self) -> u32 {
        self.max_distance
    }

    /// None if the cell cannot be reached from the start.
    #[inline(always)]
    pub fn distance_from_start_to(&self, coord: Cartesian2DCoordinate) -> Option<u32> {
        self.distances.get(&coord).cloned()
    }

    #[inline]
    pub fn reachable_count(&self) -> usize {
        self.distances.len()
    }

    pub fn furthest_points_on_grid(&self) -> SmallVec<[Cartesian2DCoordinate; 8]> {
        let furthest_distance = self.max();
        let mut furthest: SmallVec<[Cartesian2DCoordinate; 8]> = self.distances
            .iter()
            .filter(|&(_, distance)| *distance == furthest_distance)
            .map(|(coord, _)| *coord)
            .collect();
        furthest.sort();
        furthest
    }
}

/// Undirected graph with a node per cell (row major order) and an edge per open passage.
pub fn passage_graph(walls: &MazeWalls) -> UnGraph<Cartesian2DCoordinate, ()> {
    let dimensions = walls.dimensions();
    let mut graph = UnGraph::with_capacity(dimensions.size().0, walls.removed_walls_count());
    for coord in dimensions.iter() {
        let _ = graph.add_node(coord);
    }

    // Only look East and North so each passage is added once.
    for coord in dimensions.iter() {
        for dir in &[CompassPrimary::East, CompassPrimary::North] {
            if !walls.is_passage(coord, *dir) {
                continue;
            }
            let neighbour = match cells::offset_coordinate(coord, *dir, dimensions) {
                Some(n) => n,
                None => continue,
            };
            if let (Some(a), Some(b)) = (dimensions.coordinate_to_index(coord),
                                         dimensions.coordinate_to_index(neighbour)) {
                let _ = graph.add_edge(NodeIndex::new(a), NodeIndex::new(b), ());
            }
        }
    }
    graph
}

/// A perfect maze has exactly one route between any two cells: its passages form a spanning
/// tree, connected and without cycles.
pub fn is_perfect_maze(walls: &MazeWalls) -> bool {
    let graph = passage_graph(walls);
    connected_components(&graph) == 1 && !is_cyclic_undirected(&graph)
}


#[cfg(test)]
mod tests {

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::generators;
    use crate::grid_dimensions::RectGridDimensions;
    use crate::units::{Height, Width};

    fn closed(w: usize, h: usize) -> MazeWalls {
        MazeWalls::closed(RectGridDimensions::new(Width(w), Height(h)).unwrap())
    }

    fn open_grid_2x2() -> MazeWalls {
        let mut walls = closed(2, 2);
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);
        walls.remove_wall(gc(0, 0), CompassPrimary::East);
        walls.remove_wall(gc(0, 0), CompassPrimary::North);
        walls.remove_wall(gc(1, 0), CompassPrimary::North);
        walls.remove_wall(gc(0, 1), CompassPrimary::East);
        walls
    }

    #[test]
    fn distances_construction_requires_valid_start_coordinate() {
        let walls = closed(3, 3);
        assert!(Distances::new(&walls, Cartesian2DCoordinate::new(3, 0)).is_none());
    }

    #[test]
    fn distances_to_unreachable_cells_is_none() {
        let walls = closed(3, 3);
        let start_coordinate = Cartesian2DCoordinate::new(0, 0);
        let distances = Distances::new(&walls, start_coordinate).unwrap();
        for coord in walls.dimensions().iter() {
            let d = distances.distance_from_start_to(coord);
            if coord != start_coordinate {
                assert!(d.is_none());
            } else {
                assert_eq!(d, Some(0));
            }
        }
        assert_eq!(distances.reachable_count(), 1);
        assert_eq!(distances.start(), start_coordinate);
    }

    #[test]
    fn distances_on_open_grid() {
        let walls = open_grid_2x2();
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);
        let distances = Distances::new(&walls, gc(0, 0)).unwrap();

        assert_eq!(distances.distance_from_start_to(gc(0, 0)), Some(0));
        assert_eq!(distances.distance_from_start_to(gc(1, 0)), Some(1));
        assert_eq!(distances.distance_from_start_to(gc(0, 1)), Some(1));
        assert_eq!(distances.distance_from_start_to(gc(1, 1)), Some(2));
        assert_eq!(distances.max(), 2);
        assert_eq!(&*distances.furthest_points_on_grid(), &[gc(1, 1)]);
    }

    #[test]
    fn open_loop_is_not_perfect() {
        let walls = open_grid_2x2();
        assert!(!is_perfect_maze(&walls));
        let graph = passage_graph(&walls);
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 4);
    }

    #[test]
    fn closed_grid_is_not_connected() {
        let walls = closed(2, 2);
        assert!(!is_perfect_maze(&walls));
        assert_eq!(passage_graph(&walls).edge_count(), 0);
    }

    #[test]
    fn single_cell_is_perfect() {
        assert!(is_perfect_maze(&closed(1, 1)));
    }

    #[test]
    fn generated_maze_is_perfect() {
        let d = RectGridDimensions::new(Width(16), Height(11)).unwrap();
        let walls = generators::recursive_backtracker(d, &mut StdRng::seed_from_u64(8));
        assert!(is_perfect_maze(&walls));
        assert_eq!(passage_graph(&walls).edge_count(), 16 * 11 - 1);

        let distances = Distances::new(&walls, Cartesian2DCoordinate::new(0, 0)).unwrap();
        assert_eq!(distances.reachable_count(), 16 * 11);
    }
}
