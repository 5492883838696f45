use fnv::FnvHashMap;
use log::debug;

use crate::cells::Cartesian2DCoordinate;
use crate::geometry::{MazeLayout, ObjectKey, Transform};
use crate::scene::{MaterialId, NodeId, SceneGraph, TemplateId};
use crate::walls::{MazeWalls, WallPosition};

/// How maze solids are sourced: copied from a template when one is set, otherwise a default
/// cuboid painted with the material, if any.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Appearance {
    pub wall_template: Option<TemplateId>,
    pub floor_template: Option<TemplateId>,
    pub wall_material: Option<MaterialId>,
    pub floor_material: Option<MaterialId>,
}

/// Turns wall state into scene objects under the maze root, and owns those objects.
///
/// Every object the builder creates is recorded against its `ObjectKey`, so walls can be
/// rebuilt without touching floors.
#[derive(Debug, Clone)]
pub struct GeometryBuilder {
    root: NodeId,
    layout: MazeLayout,
    appearance: Appearance,
    objects: FnvHashMap<ObjectKey, NodeId>,
}

impl GeometryBuilder {
    pub fn new(root: NodeId, layout: MazeLayout, appearance: Appearance) -> GeometryBuilder {
        GeometryBuilder {
            root,
            layout,
            appearance,
            objects: FnvHashMap::default(),
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn layout(&self) -> &MazeLayout {
        &self.layout
    }

    /// Scene handle of the object filling a slot, if it has been built.
    pub fn object(&self, key: ObjectKey) -> Option<NodeId> {
        self.objects.get(&key).cloned()
    }

    pub fn floor_count(&self) -> usize {
        self.objects.keys().filter(|key| !key.kind.is_wall()).count()
    }

    pub fn wall_count(&self) -> usize {
        self.objects.keys().filter(|key| key.kind.is_wall()).count()
    }

    /// Destroy every child of the maze root, including objects this builder did not create.
    pub fn clear_all<S: SceneGraph + ?Sized>(&mut self, scene: &mut S) {
        for child in scene.children(self.root) {
            scene.destroy(child);
        }
        self.objects.clear();
    }

    /// Destroy the wall objects only, floors stay.
    pub fn clear_walls<S: SceneGraph + ?Sized>(&mut self, scene: &mut S) {
        self.objects.retain(|key, node| {
            if key.kind.is_wall() {
                scene.destroy(*node);
                false
            } else {
                true
            }
        });
    }

    /// Floor tiles plus walls, from scratch.
    pub fn build_all<S: SceneGraph + ?Sized>(&mut self, scene: &mut S, walls: &MazeWalls) {
        self.clear_all(scene);
        self.build_floors(scene);
        self.refresh_walls(scene, walls);
    }

    /// One floor tile per cell.
    pub fn build_floors<S: SceneGraph + ?Sized>(&mut self, scene: &mut S) {
        for coord in self.layout.dimensions.iter() {
            self.create_floor(scene, coord);
        }
    }

    /// Remove every wall object and create one per present wall.
    pub fn refresh_walls<S: SceneGraph + ?Sized>(&mut self, scene: &mut S, walls: &MazeWalls) {
        self.clear_walls(scene);
        for position in walls.present_walls() {
            self.create_wall(scene, position);
        }
        debug!("rebuilt {} wall objects", walls.present_walls_count());
    }

    fn create_floor<S: SceneGraph + ?Sized>(&mut self, scene: &mut S, coord: Cartesian2DCoordinate) {
        let key = ObjectKey::floor(coord);
        let Transform { position, scale } = self.layout.floor_transform(coord);

        let node = match self.appearance.floor_template {
            // Template floors keep their own scale.
            Some(template) => scene.instantiate(template, self.root),
            None => {
                let node = scene.create_cuboid(self.root);
                scene.set_local_scale(node, scale);
                if let Some(material) = self.appearance.floor_material {
                    scene.set_material(node, material);
                }
                node
            }
        };
        scene.set_local_position(node, position);
        self.register(scene, key, node);
    }

    fn create_wall<S: SceneGraph + ?Sized>(&mut self, scene: &mut S, position: WallPosition) {
        let key = ObjectKey::wall(position);
        let transform = self.layout.wall_transform(position);

        let node = match self.appearance.wall_template {
            Some(template) => scene.instantiate(template, self.root),
            None => {
                let node = scene.create_cuboid(self.root);
                if let Some(material) = self.appearance.wall_material {
                    scene.set_material(node, material);
                }
                node
            }
        };
        scene.set_local_scale(node, transform.scale);
        scene.set_local_position(node, transform.position);
        self.register(scene, key, node);
    }

    fn register<S: SceneGraph + ?Sized>(&mut self, scene: &mut S, key: ObjectKey, node: NodeId) {
        scene.set_name(node, &key.name());
        if let Some(previous) = self.objects.insert(key, node) {
            scene.destroy(previous);
        }
    }
}


#[cfg(test)]
mod tests {

    use nalgebra::Vector3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::generators;
    use crate::geometry::{ObjectKind, FLOOR_THICKNESS};
    use crate::grid_dimensions::RectGridDimensions;
    use crate::scene::{MemoryScene, ObjectSource};
    use crate::units::{Height, Width};

    fn layout(w: usize, h: usize) -> MazeLayout {
        MazeLayout {
            dimensions: RectGridDimensions::new(Width(w), Height(h)).unwrap(),
            cell_size: 2.0,
            wall_thickness: 0.2,
            wall_height: 3.0,
        }
    }

    fn setup(w: usize, h: usize, appearance: Appearance) -> (MemoryScene, GeometryBuilder) {
        let mut scene = MemoryScene::new();
        let root = scene.create_node("Maze", None);
        (scene, GeometryBuilder::new(root, layout(w, h), appearance))
    }

    #[test]
    fn builds_one_object_per_floor_and_present_wall() {
        let (mut scene, mut builder) = setup(4, 3, Appearance::default());
        let walls = generators::recursive_backtracker(builder.layout().dimensions,
                                                      &mut StdRng::seed_from_u64(10));
        builder.build_all(&mut scene, &walls);

        assert_eq!(builder.floor_count(), 12);
        assert_eq!(builder.wall_count(), walls.present_walls_count());
        assert_eq!(scene.children(builder.root()).len(), 12 + walls.present_walls_count());
    }

    #[test]
    fn objects_are_named_and_placed() {
        let (mut scene, mut builder) = setup(1, 1, Appearance::default());
        let walls = MazeWalls::closed(builder.layout().dimensions);
        builder.build_all(&mut scene, &walls);

        let root = builder.root();
        let floor = scene.find_child(root, "Floor_0_0").unwrap();
        let floor_object = scene.object(floor).unwrap();
        assert_eq!(floor_object.position, Vector3::new(0.0, 0.0, 0.0));
        assert_eq!(floor_object.scale, Vector3::new(2.0, FLOOR_THICKNESS, 2.0));
        assert_eq!(floor_object.source, ObjectSource::Cuboid);

        for name in &["Wall_H_0_0", "Wall_H_0_1", "Wall_V_0_0", "Wall_V_1_0"] {
            assert!(scene.find_child(root, name).is_some(), "missing {}", name);
        }
        let north = scene.find_child(root, "Wall_H_0_1").unwrap();
        let north_object = scene.object(north).unwrap();
        assert_eq!(north_object.position, Vector3::new(0.0, 1.5, 1.0));
        assert_eq!(north_object.scale, Vector3::new(2.0, 3.0, 0.2));
        assert_eq!(builder.object(ObjectKey {
                                      kind: ObjectKind::HorizontalWall,
                                      x: 0,
                                      y: 1,
                                  }),
                   Some(north));
    }

    #[test]
    fn wall_refresh_keeps_floors() {
        let (mut scene, mut builder) = setup(2, 1, Appearance::default());
        let mut walls = MazeWalls::closed(builder.layout().dimensions);
        builder.build_all(&mut scene, &walls);
        let floor = builder.object(ObjectKey::floor(Cartesian2DCoordinate::new(1, 0)));
        assert_eq!(builder.wall_count(), 7);

        walls.remove_wall(Cartesian2DCoordinate::new(0, 0), crate::cells::CompassPrimary::East);
        builder.refresh_walls(&mut scene, &walls);

        assert_eq!(builder.wall_count(), 6);
        assert_eq!(builder.floor_count(), 2);
        assert_eq!(builder.object(ObjectKey::floor(Cartesian2DCoordinate::new(1, 0))), floor);
        assert!(scene.find_child(builder.root(), "Wall_V_1_0").is_none());
        assert_eq!(scene.children(builder.root()).len(), 8);
    }

    #[test]
    fn clear_all_removes_foreign_children_too() {
        let (mut scene, mut builder) = setup(2, 2, Appearance::default());
        let walls = MazeWalls::closed(builder.layout().dimensions);
        builder.build_all(&mut scene, &walls);
        let stray = scene.create_node("Stray", Some(builder.root()));

        builder.clear_all(&mut scene);
        assert!(scene.children(builder.root()).is_empty());
        assert!(scene.object(stray).is_none());
        assert_eq!(builder.floor_count() + builder.wall_count(), 0);
    }

    #[test]
    fn materials_paint_default_cuboids() {
        let mut scene = MemoryScene::new();
        let root = scene.create_node("Maze", None);
        let stone = scene.register_material("stone");
        let moss = scene.register_material("moss");
        let appearance = Appearance {
            wall_material: Some(stone),
            floor_material: Some(moss),
            ..Appearance::default()
        };
        let mut builder = GeometryBuilder::new(root, layout(1, 1), appearance);
        let walls = MazeWalls::closed(builder.layout().dimensions);
        builder.build_all(&mut scene, &walls);

        let floor = scene.find_child(root, "Floor_0_0").unwrap();
        let wall = scene.find_child(root, "Wall_V_0_0").unwrap();
        assert_eq!(scene.object(floor).unwrap().material, Some(moss));
        assert_eq!(scene.object(wall).unwrap().material, Some(stone));
    }

    #[test]
    fn templates_replace_cuboids() {
        let mut scene = MemoryScene::new();
        let root = scene.create_node("Maze", None);
        let stone = scene.register_material("stone");
        let tile_scale = Vector3::new(5.0, 0.5, 5.0);
        let wall_template = scene.register_template("Hedge", Vector3::repeat(1.0), None);
        let floor_template = scene.register_template("Tile", tile_scale, None);
        let appearance = Appearance {
            wall_template: Some(wall_template),
            floor_template: Some(floor_template),
            wall_material: Some(stone),
            floor_material: None,
        };
        let mut builder = GeometryBuilder::new(root, layout(1, 1), appearance);
        let walls = MazeWalls::closed(builder.layout().dimensions);
        builder.build_all(&mut scene, &walls);

        let floor = scene.object(scene.find_child(root, "Floor_0_0").unwrap()).unwrap();
        assert_eq!(floor.source, ObjectSource::Template(floor_template));
        assert_eq!(floor.scale, tile_scale);

        let wall = scene.object(scene.find_child(root, "Wall_V_1_0").unwrap()).unwrap();
        assert_eq!(wall.source, ObjectSource::Template(wall_template));
        assert_eq!(wall.scale, Vector3::new(0.2, 3.0, 2.0));
        assert_eq!(wall.position, Vector3::new(1.0, 1.5, 0.0));
        assert_eq!(wall.material, None);
    }
}
