use crate::pathing::Distances;
use crate::cells::Cartesian2DCoordinate;
use crate::walls::MazeWalls;

const WALL_L: &str = "╴";
const WALL_R: &str = "╶";
const WALL_U: &str = "╵";
const WALL_D: &str = "╷";
const WALL_LR_3: &str = "───";
const WALL_LR: &str = "─";
const WALL_UD: &str = "│";
const WALL_LD: &str = "┐";
const WALL_RU: &str = "└";
const WALL_LU: &str = "┘";
const WALL_RD: &str = "┌";
const WALL_LRU: &str = "┴";
const WALL_LRD: &str = "┬";
const WALL_LRUD: &str = "┼";
const WALL_RUD: &str = "├";
const WALL_LUD: &str = "┤";
const DISTANCE_OVERFLOW: &str = "+++";

/// Render the maze walls as box drawing text, North (increasing `y`) at the top.
///
/// Each cell body is 3 glyphs wide. With `distances` the body shows the flood fill distance of
/// the cell from the distances' start, centre aligned lowercase hex. Distances past `0xfff` do
/// not fit the body and show as `+++`.
pub fn render_text(walls: &MazeWalls, distances: Option<&Distances>) -> String {

    let (width, height) = (walls.dimensions().width().0, walls.dimensions().height().0);
    let horizontal = walls.horizontal();
    let vertical = walls.vertical();

    let mut output = String::new();

    // Corner row `cy` sits between cell row `cy` above it and cell row `cy - 1` below it.
    for corner_row in (0..height + 1).rev() {

        for corner_column in 0..width + 1 {
            let left = corner_column > 0 && horizontal.is_present(corner_column - 1, corner_row);
            let right = horizontal.is_present(corner_column, corner_row);
            let up = vertical.is_present(corner_column, corner_row);
            let down = corner_row > 0 && vertical.is_present(corner_column, corner_row - 1);
            output.push_str(corner_glyph(left, right, up, down));

            if corner_column < width {
                if right {
                    output.push_str(WALL_LR_3);
                } else {
                    output.push_str("   ");
                }
            }
        }
        output.push('\n');

        if corner_row == 0 {
            break;
        }

        let cell_row = corner_row - 1;
        for column in 0..width + 1 {
            if vertical.is_present(column, cell_row) {
                output.push_str(WALL_UD);
            } else {
                output.push(' ');
            }
            if column < width {
                let coord = Cartesian2DCoordinate::new(column as u32, cell_row as u32);
                output.push_str(&cell_body(coord, distances));
            }
        }
        output.push('\n');
    }

    output
}

fn cell_body(coord: Cartesian2DCoordinate, distances: Option<&Distances>) -> String {
    match distances.and_then(|d| d.distance_from_start_to(coord)) {
        Some(d) => distance_glyphs(d),
        None => String::from("   "),
    }
}

fn distance_glyphs(distance: u32) -> String {
    if distance > 0xfff {
        String::from(DISTANCE_OVERFLOW)
    } else {
        format!("{:^3x}", distance)
    }
}

fn corner_glyph(left: bool, right: bool, up: bool, down: bool) -> &'static str {
    match (left, right, up, down) {
        (true, true, true, true) => WALL_LRUD,
        (true, true, true, false) => WALL_LRU,
        (true, true, false, true) => WALL_LRD,
        (true, false, true, true) => WALL_LUD,
        (false, true, true, true) => WALL_RUD,
        (true, true, false, false) => WALL_LR,
        (false, false, true, true) => WALL_UD,
        (false, true, true, false) => WALL_RU,
        (true, false, false, true) => WALL_LD,
        (true, false, true, false) => WALL_LU,
        (false, true, false, true) => WALL_RD,
        (true, false, false, false) => WALL_L,
        (false, true, false, false) => WALL_R,
        (false, false, true, false) => WALL_U,
        (false, false, false, true) => WALL_D,
        (false, false, false, false) => " ",
    }
}


#[cfg(test)]
mod tests {

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::cells::CompassPrimary;
    use crate::generators;
    use crate::grid_dimensions::RectGridDimensions;
    use crate::units::{Height, Width};

    fn closed(w: usize, h: usize) -> MazeWalls {
        MazeWalls::closed(RectGridDimensions::new(Width(w), Height(h)).unwrap())
    }

    #[test]
    fn single_closed_cell() {
        assert_eq!(render_text(&closed(1, 1), None), "┌───┐\n│   │\n└───┘\n");
    }

    #[test]
    fn open_passage_between_two_cells() {
        let mut walls = closed(2, 1);
        walls.remove_wall(Cartesian2DCoordinate::new(0, 0), CompassPrimary::East);
        assert_eq!(render_text(&walls, None), "┌───────┐\n│       │\n└───────┘\n");
    }

    #[test]
    fn north_is_drawn_at_the_top() {
        let mut walls = closed(1, 2);
        walls.remove_wall(Cartesian2DCoordinate::new(0, 0), CompassPrimary::North);
        let text = format!("{}", walls);
        assert_eq!(text, "┌───┐\n│   │\n│   │\n│   │\n└───┘\n");
    }

    #[test]
    fn distances_fill_cell_bodies() {
        let mut walls = closed(2, 1);
        walls.remove_wall(Cartesian2DCoordinate::new(0, 0), CompassPrimary::East);
        let distances = Distances::new(&walls, Cartesian2DCoordinate::new(0, 0)).unwrap();
        assert_eq!(render_text(&walls, Some(&distances)),
                   "┌───────┐\n│ 0   1 │\n└───────┘\n");
    }

    #[test]
    fn distance_bodies_are_three_glyphs() {
        assert_eq!(distance_glyphs(0x7), " 7 ");
        assert_eq!(distance_glyphs(0xab), "ab ");
        assert_eq!(distance_glyphs(0xfff), "fff");
        assert_eq!(distance_glyphs(0x1000), "+++");
        assert_eq!(distance_glyphs(u32::MAX), "+++");
    }

    #[test]
    fn long_corridor_distances_stay_aligned() {
        // a single row has exactly one maze, a corridor 4100 cells long
        let dims = RectGridDimensions::new(Width(4100), Height(1)).unwrap();
        let walls = generators::recursive_backtracker(dims, &mut StdRng::seed_from_u64(1));
        let distances = Distances::new(&walls, Cartesian2DCoordinate::new(0, 0)).unwrap();
        assert_eq!(distances.max(), 4099);

        let text = render_text(&walls, Some(&distances));
        let widths: Vec<usize> = text.lines().map(|line| line.chars().count()).collect();
        assert_eq!(widths, vec![4 * 4100 + 1; 3]);
        assert!(text.contains("fff"));
        assert!(text.contains("+++"));
    }
}
