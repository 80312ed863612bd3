//! Scene Module
//!
//! Per-view store of drawable objects. Each object is an oriented box with a
//! colour, optionally tagged with the wall it represents. The view
//! synchronizer owns two scenes (plan and elevation); the renderer reads
//! them and picking raycasts against them.

use std::collections::BTreeMap;

use glam::{Quat, Vec3};

use super::wall::WallId;
use crate::camera::{OrientedBox, Ray};
use crate::render::mesh::{generate_oriented_box, Mesh};

/// Stable key of an object within one scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectHandle(u64);

/// What an object stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectKind {
    /// Plan-view centre line of a wall.
    WallLine,
    /// Plan-view footprint rectangle of a wall.
    WallFootprint,
    /// Elevation-view extruded wall.
    WallBody,
    /// Draw-gesture preview line.
    Preview,
}

impl ObjectKind {
    /// Footprints and bodies are what the pointer can hit.
    pub fn is_pickable(&self) -> bool {
        matches!(self, ObjectKind::WallFootprint | ObjectKind::WallBody)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneObject {
    pub kind: ObjectKind,
    pub wall: Option<WallId>,
    pub center: Vec3,
    pub rotation: Quat,
    /// Full size along the local axes; X is the segment direction.
    pub size: Vec3,
    pub color: [f32; 4],
}

impl SceneObject {
    pub fn bounds(&self) -> OrientedBox {
        OrientedBox::new(self.center, self.rotation, self.size)
    }

    pub fn mesh(&self) -> Mesh {
        generate_oriented_box(self.center, self.rotation, self.size, self.color)
    }
}

/// A nearest-hit result from [`Scene::pick`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneHit {
    pub handle: ObjectHandle,
    pub wall: Option<WallId>,
    pub distance: f32,
}

#[derive(Debug, Default)]
pub struct Scene {
    objects: BTreeMap<ObjectHandle, SceneObject>,
    next_handle: u64,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, object: SceneObject) -> ObjectHandle {
        let handle = ObjectHandle(self.next_handle);
        self.next_handle += 1;
        self.objects.insert(handle, object);
        handle
    }

    pub fn remove(&mut self, handle: ObjectHandle) -> Option<SceneObject> {
        self.objects.remove(&handle)
    }

    pub fn get(&self, handle: ObjectHandle) -> Option<&SceneObject> {
        self.objects.get(&handle)
    }

    pub fn get_mut(&mut self, handle: ObjectHandle) -> Option<&mut SceneObject> {
        self.objects.get_mut(&handle)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Objects in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectHandle, &SceneObject)> {
        self.objects.iter().map(|(h, o)| (*h, o))
    }

    pub fn count_kind(&self, kind: ObjectKind) -> usize {
        self.objects.values().filter(|o| o.kind == kind).count()
    }

    /// Nearest pickable object along the ray.
    pub fn pick(&self, ray: &Ray) -> Option<SceneHit> {
        self.iter()
            .filter(|(_, o)| o.kind.is_pickable())
            .filter_map(|(handle, o)| {
                ray.intersect_oriented_box(&o.bounds()).map(|distance| SceneHit {
                    handle,
                    wall: o.wall,
                    distance,
                })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }

    /// Append every object's box to `mesh`.
    pub fn append_meshes(&self, mesh: &mut Mesh) {
        for object in self.objects.values() {
            mesh.merge(&object.mesh());
        }
    }
}
