//! The host scene graph the maze builds into.
//!
//! A game engine implements `SceneGraph` over its own object hierarchy. `MemoryScene` is a
//! headless implementation that just records the hierarchy, used by the driver, tests and
//! benches.

use fnv::FnvHashMap;
use nalgebra::Vector3;

/// Handle to an object living in the scene.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct NodeId(pub u64);

/// Handle to a template object that can be copied into the scene.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub struct TemplateId(pub u64);

/// Handle to a surface appearance.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub struct MaterialId(pub u64);

pub trait SceneGraph {
    /// Create a default unit cuboid parented under `parent`.
    fn create_cuboid(&mut self, parent: NodeId) -> NodeId;

    /// Create a copy of `template` parented under `parent`.
    fn instantiate(&mut self, template: TemplateId, parent: NodeId) -> NodeId;

    /// Destroy an object and everything below it. Unknown handles are ignored.
    fn destroy(&mut self, node: NodeId);

    fn children(&self, node: NodeId) -> Vec<NodeId>;

    fn set_name(&mut self, node: NodeId, name: &str);

    fn set_local_position(&mut self, node: NodeId, position: Vector3<f32>);

    fn set_local_scale(&mut self, node: NodeId, scale: Vector3<f32>);

    fn set_material(&mut self, node: NodeId, material: MaterialId);
}

/// Where a scene object came from.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum ObjectSource {
    Empty,
    Cuboid,
    Template(TemplateId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub name: String,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub position: Vector3<f32>,
    pub scale: Vector3<f32>,
    pub material: Option<MaterialId>,
    pub source: ObjectSource,
}

impl SceneObject {
    fn new(name: &str, parent: Option<NodeId>, source: ObjectSource) -> SceneObject {
        SceneObject {
            name: name.to_owned(),
            parent,
            children: Vec::new(),
            position: Vector3::zeros(),
            scale: Vector3::repeat(1.0),
            material: None,
            source,
        }
    }
}

#[derive(Debug, Clone)]
struct Template {
    name: String,
    scale: Vector3<f32>,
    material: Option<MaterialId>,
}

/// In memory scene graph.
#[derive(Debug, Clone, Default)]
pub struct MemoryScene {
    objects: FnvHashMap<NodeId, SceneObject>,
    templates: FnvHashMap<TemplateId, Template>,
    materials: FnvHashMap<MaterialId, String>,
    next_id: u64,
    created: usize,
    destroyed: usize,
}

impl MemoryScene {
    pub fn new() -> MemoryScene {
        MemoryScene::default()
    }

    /// Create an empty object, at the top of the hierarchy when `parent` is None.
    pub fn create_node(&mut self, name: &str, parent: Option<NodeId>) -> NodeId {
        self.add(SceneObject::new(name, parent, ObjectSource::Empty))
    }

    pub fn register_template(&mut self,
                             name: &str,
                             scale: Vector3<f32>,
                             material: Option<MaterialId>)
                             -> TemplateId {
        let id = TemplateId(self.next_handle());
        let _ = self.templates.insert(id,
                                      Template {
                                          name: name.to_owned(),
                                          scale,
                                          material,
                                      });
        id
    }

    pub fn register_material(&mut self, name: &str) -> MaterialId {
        let id = MaterialId(self.next_handle());
        let _ = self.materials.insert(id, name.to_owned());
        id
    }

    pub fn material_name(&self, material: MaterialId) -> Option<&str> {
        self.materials.get(&material).map(|name| name.as_str())
    }

    pub fn object(&self, node: NodeId) -> Option<&SceneObject> {
        self.objects.get(&node)
    }

    /// First child of `parent` with the given name.
    pub fn find_child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.objects
            .get(&parent)?
            .children
            .iter()
            .cloned()
            .find(|child| self.objects.get(child).map_or(false, |o| o.name == name))
    }

    /// Objects currently alive.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Objects ever created, including ones since destroyed.
    pub fn created_count(&self) -> usize {
        self.created
    }

    pub fn destroyed_count(&self) -> usize {
        self.destroyed
    }

    fn next_handle(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn add(&mut self, object: SceneObject) -> NodeId {
        let id = NodeId(self.next_handle());
        if let Some(parent) = object.parent.and_then(|p| self.objects.get_mut(&p)) {
            parent.children.push(id);
        }
        let _ = self.objects.insert(id, object);
        self.created += 1;
        id
    }
}

impl SceneGraph for MemoryScene {
    fn create_cuboid(&mut self, parent: NodeId) -> NodeId {
        self.add(SceneObject::new("Cube", Some(parent), ObjectSource::Cuboid))
    }

    fn instantiate(&mut self, template: TemplateId, parent: NodeId) -> NodeId {
        let mut object = SceneObject::new("", Some(parent), ObjectSource::Template(template));
        if let Some(t) = self.templates.get(&template) {
            object.name = format!("{}(Clone)", t.name);
            object.scale = t.scale;
            object.material = t.material;
        }
        self.add(object)
    }

    fn destroy(&mut self, node: NodeId) {
        let object = match self.objects.remove(&node) {
            Some(o) => o,
            None => return,
        };
        self.destroyed += 1;

        if let Some(parent) = object.parent.and_then(|p| self.objects.get_mut(&p)) {
            parent.children.retain(|&child| child != node);
        }
        for child in object.children {
            self.destroy(child);
        }
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.objects.get(&node).map_or_else(Vec::new, |o| o.children.clone())
    }

    fn set_name(&mut self, node: NodeId, name: &str) {
        if let Some(o) = self.objects.get_mut(&node) {
            o.name = name.to_owned();
        }
    }

    fn set_local_position(&mut self, node: NodeId, position: Vector3<f32>) {
        if let Some(o) = self.objects.get_mut(&node) {
            o.position = position;
        }
    }

    fn set_local_scale(&mut self, node: NodeId, scale: Vector3<f32>) {
        if let Some(o) = self.objects.get_mut(&node) {
            o.scale = scale;
        }
    }

    fn set_material(&mut self, node: NodeId, material: MaterialId) {
        if let Some(o) = self.objects.get_mut(&node) {
            o.material = Some(material);
        }
    }
}


#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn cuboids_are_parented() {
        let mut scene = MemoryScene::new();
        let root = scene.create_node("Maze", None);
        let a = scene.create_cuboid(root);
        let b = scene.create_cuboid(root);
        assert_eq!(scene.children(root), vec![a, b]);
        assert_eq!(scene.object(a).map(|o| o.parent), Some(Some(root)));
        assert_eq!(scene.object(a).map(|o| o.source), Some(ObjectSource::Cuboid));
        assert_eq!(scene.len(), 3);
        assert_eq!(scene.created_count(), 3);
    }

    #[test]
    fn destroy_is_recursive_and_detaches() {
        let mut scene = MemoryScene::new();
        let root = scene.create_node("Maze", None);
        let group = scene.create_node("Group", Some(root));
        let leaf = scene.create_cuboid(group);
        let sibling = scene.create_cuboid(root);

        scene.destroy(group);
        assert!(scene.object(group).is_none());
        assert!(scene.object(leaf).is_none());
        assert_eq!(scene.children(root), vec![sibling]);
        assert_eq!(scene.destroyed_count(), 2);

        // already gone
        scene.destroy(leaf);
        assert_eq!(scene.destroyed_count(), 2);
    }

    #[test]
    fn templates_carry_scale_and_material() {
        let mut scene = MemoryScene::new();
        let root = scene.create_node("Maze", None);
        let stone = scene.register_material("stone");
        let pillar = scene.register_template("Pillar", Vector3::new(1.0, 4.0, 1.0), Some(stone));
        let copy = scene.instantiate(pillar, root);

        let object = scene.object(copy).unwrap();
        assert_eq!(object.name, "Pillar(Clone)");
        assert_eq!(object.scale, Vector3::new(1.0, 4.0, 1.0));
        assert_eq!(object.material, Some(stone));
        assert_eq!(object.source, ObjectSource::Template(pillar));
        assert_eq!(scene.material_name(stone), Some("stone"));
    }

    #[test]
    fn setters_and_lookup_by_name() {
        let mut scene = MemoryScene::new();
        let root = scene.create_node("Maze", None);
        let node = scene.create_cuboid(root);
        scene.set_name(node, "Floor_0_0");
        scene.set_local_position(node, Vector3::new(1.0, 2.0, 3.0));
        scene.set_local_scale(node, Vector3::new(2.0, 0.1, 2.0));

        assert_eq!(scene.find_child(root, "Floor_0_0"), Some(node));
        assert_eq!(scene.find_child(root, "Floor_9_9"), None);
        let object = scene.object(node).unwrap();
        assert_eq!(object.position, Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(object.scale, Vector3::new(2.0, 0.1, 2.0));
        assert_eq!(object.material, None);
    }
}
