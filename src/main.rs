use docopt::Docopt;
use log::info;
use nalgebra::Vector3;
use maze_corridors::{
    cells::Cartesian2DCoordinate,
    config::MazeConfig,
    maze_generator::MazeGenerator,
    pathing,
    renderers,
    scene::{MemoryScene, NodeId, SceneGraph},
    scheduling::ThreadSleep,
    walls::MazeWalls,
};
use rand::{rngs::StdRng, SeedableRng};
use serde_derive::Deserialize;
use std::{
    fs::File,
    io,
    io::prelude::*,
};

const USAGE: &str = "Maze Corridors

Usage:
    maze_corridors_driver -h | --help
    maze_corridors_driver [options]

Options:
    -h --help                Show this screen.
    --width=<w>              Cells along the X axis [default: 10].
    --height=<h>             Cells along the Z axis [default: 10].
    --cell-size=<c>          Side length of a square cell [default: 2.0].
    --wall-thickness=<t>     Thickness of a wall solid [default: 0.2].
    --wall-height=<y>        Height of a wall solid [default: 3.0].
    --animate                Rebuild the walls after every carved passage, pausing in between.
    --delay=<s>              Seconds to pause between carves when animating [default: 0.05].
    --seed=<n>               Seed for the random source. Seeded from the OS when absent.
    --show-distances         Show the distance of every cell from the start of the longest path.
    --list-objects           List every scene object the maze built, with position and scale.
    --text-out=<path>        Output file path for a textual rendering of the maze.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_width: usize,
    flag_height: usize,
    flag_cell_size: f32,
    flag_wall_thickness: f32,
    flag_wall_height: f32,
    flag_animate: bool,
    flag_delay: f32,
    flag_seed: Option<u64>,
    flag_show_distances: bool,
    flag_list_objects: bool,
    flag_text_out: String,
}

mod errors {
    // Create the Error, ErrorKind, ResultExt, and Result types
    // Library errors are linked in so `?` works on them too.
    use error_chain::*;
    error_chain! {

        links {
            Maze(::maze_corridors::errors::Error, ::maze_corridors::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let config = MazeConfig {
        width: args.flag_width,
        height: args.flag_height,
        cell_size: args.flag_cell_size,
        wall_thickness: args.flag_wall_thickness,
        wall_height: args.flag_wall_height,
        animate_generation: args.flag_animate,
        generation_delay: args.flag_delay,
        ..MazeConfig::default()
    };

    let rng = match args.flag_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut scene = MemoryScene::new();
    let root = scene.create_node("Maze", None);
    let mut generator = MazeGenerator::new(config, root, rng)
        .chain_err(|| "Unusable maze settings")?;

    let report = generator.run_animation(&mut scene, &mut ThreadSleep);
    info!("{} scene objects created, {} destroyed along the way",
          scene.created_count(),
          scene.destroyed_count());

    let walls = generator.walls().ok_or("Maze generation produced no walls")?;
    let text = if args.flag_show_distances {
        let distances = longest_path_distances(walls)?;
        info!("distances from {}, furthest {} steps", distances.start(), distances.max());
        renderers::render_text(walls, Some(&distances))
    } else {
        renderers::render_text(walls, None)
    };

    if args.flag_text_out.is_empty() {
        println!("{}", text);
    } else {
        write_text_to_file(&text, &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    }

    if args.flag_list_objects {
        list_objects(&scene, root);
        println!("{} floors, {} walls, {} walls removed",
                 report.floors,
                 report.walls,
                 report.removed_walls);
    }

    Ok(())
}

/// Distances from one end of the longest path in the maze. The cell furthest from any start is
/// an end of a longest path in a perfect maze.
fn longest_path_distances(walls: &MazeWalls) -> Result<pathing::Distances> {
    let origin = Cartesian2DCoordinate::new(0, 0);
    let from_origin = pathing::Distances::new(walls, origin)
        .ok_or("Maze has no origin cell.")?;
    let start = from_origin
        .furthest_points_on_grid()
        .first()
        .cloned()
        .unwrap_or(origin);
    Ok(pathing::Distances::new(walls, start).ok_or("Invalid longest path start.")?)
}

fn list_objects(scene: &MemoryScene, root: NodeId) {
    for node in scene.children(root) {
        if let Some(object) = scene.object(node) {
            let material = object.material.and_then(|m| scene.material_name(m)).unwrap_or("-");
            println!("{:<14} position {} scale {} material {}",
                     object.name,
                     format_vector(&object.position),
                     format_vector(&object.scale),
                     material);
        }
    }
}

fn format_vector(v: &Vector3<f32>) -> String {
    format!("({:.3}, {:.3}, {:.3})", v.x, v.y, v.z)
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}
