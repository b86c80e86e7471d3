//! Reference host: a scene loaded from OBJ files.
//!
//! A [`Scene`] holds named objects, a selection and a set of
//! [`OrbitViewport`]s, and implements [`ClipHost`] so it can be driven by a
//! [`ClipController`](crate::ClipController) without a real 3D application.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::io::BufRead;
use std::path::Path;

use log::{debug, warn};

use crate::clip_range::ClipRange;
use crate::controller::ClipHost;
use crate::math::{Aabb, Vec3};
use crate::object::{Object3D, ObjectKind};
use crate::transform::Transform;
use crate::viewport::OrbitViewport;

/// Errors raised while loading a scene.
#[derive(Debug)]
pub enum LoadError {
    /// The OBJ file could not be read or parsed.
    Obj(tobj::LoadError),
    /// The file parsed but had no vertices.
    NoGeometry(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Obj(err) => write!(f, "Failed to load OBJ: {}", err),
            LoadError::NoGeometry(source) => write!(f, "No geometry in {}", source),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Obj(err) => Some(err),
            LoadError::NoGeometry(_) => None,
        }
    }
}

impl From<tobj::LoadError> for LoadError {
    fn from(err: tobj::LoadError) -> Self {
        LoadError::Obj(err)
    }
}

/// A named object with local bounds and a placement.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    name: String,
    kind: ObjectKind,
    bounds: Aabb,
    transform: Transform,
}

impl SceneObject {
    /// Creates a mesh object at the origin with the given local bounds.
    pub fn new(name: impl Into<String>, bounds: Aabb) -> Self {
        Self {
            name: name.into(),
            kind: ObjectKind::Mesh,
            bounds,
            transform: Transform::default(),
        }
    }

    pub fn with_kind(mut self, kind: ObjectKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    /// Extents and location as reported to the clip calculator.
    pub fn to_object3d(&self) -> Object3D {
        Object3D {
            kind: self.kind,
            dimensions: self.transform.scaled_extents(self.bounds.size()),
            location: self.transform.position(),
        }
    }
}

/// Objects, selection and viewports of a loaded scene.
#[derive(Debug, Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
    object_names: HashMap<String, usize>,
    selection: HashSet<usize>,
    viewports: Vec<OrbitViewport>,
    volumetric_clip: Option<ClipRange>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every object of an OBJ file.
    ///
    /// Each OBJ object/group becomes one [`SceneObject`], placed at the
    /// centre of its vertices. The scene starts with one default viewport.
    pub fn load_obj(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let (models, _materials) = tobj::load_obj(path, &tobj::LoadOptions::default())?;
        Self::from_models(models, &path.display().to_string())
    }

    /// Same as [`Scene::load_obj`], reading OBJ text from `reader`.
    /// Material libraries are not resolved.
    pub fn from_obj_reader<R: BufRead>(reader: &mut R) -> Result<Self, LoadError> {
        let (models, _materials) =
            tobj::load_obj_buf(reader, &tobj::LoadOptions::default(), |_| {
                Err(tobj::LoadError::OpenFileFailed)
            })?;
        Self::from_models(models, "OBJ input")
    }

    fn from_models(models: Vec<tobj::Model>, source: &str) -> Result<Self, LoadError> {
        let mut scene = Self::new();
        for model in models {
            let points = model
                .mesh
                .positions
                .chunks_exact(3)
                .map(|p| Vec3::new(p[0], p[1], p[2]));
            let Some(bounds) = Aabb::from_points(points) else {
                warn!("object '{}' in {} has no vertices", model.name, source);
                continue;
            };

            let mut object = SceneObject::new(model.name, bounds.centered());
            object.transform_mut().set_position(bounds.center());
            scene.add_object(object);
        }

        if scene.objects.is_empty() {
            return Err(LoadError::NoGeometry(source.to_string()));
        }
        debug!("loaded {} object(s) from {}", scene.objects.len(), source);
        scene.add_viewport(OrbitViewport::default());
        Ok(scene)
    }

    // ============ Objects ============

    /// Adds an object, replacing the name lookup of any earlier object with
    /// the same name.
    pub fn add_object(&mut self, object: SceneObject) -> usize {
        let index = self.objects.len();
        self.object_names.insert(object.name().to_string(), index);
        self.objects.push(object);
        index
    }

    pub fn object(&self, name: &str) -> Option<&SceneObject> {
        self.object_names.get(name).map(|&i| &self.objects[i])
    }

    pub fn object_mut(&mut self, name: &str) -> Option<&mut SceneObject> {
        self.object_names
            .get(name)
            .copied()
            .map(move |i| &mut self.objects[i])
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    // ============ Selection ============

    /// Selects an object by name. Returns false if there is no such object.
    pub fn select(&mut self, name: &str) -> bool {
        match self.object_names.get(name) {
            Some(&i) => {
                self.selection.insert(i);
                true
            }
            None => false,
        }
    }

    pub fn deselect(&mut self, name: &str) {
        if let Some(i) = self.object_names.get(name) {
            self.selection.remove(i);
        }
    }

    pub fn select_all(&mut self) {
        self.selection = (0..self.objects.len()).collect();
    }

    pub fn deselect_all(&mut self) {
        self.selection.clear();
    }

    /// Selected objects, in insertion order.
    pub fn selected(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects
            .iter()
            .enumerate()
            .filter(|(i, _)| self.selection.contains(i))
            .map(|(_, o)| o)
    }

    // ============ Viewports ============

    pub fn add_viewport(&mut self, viewport: OrbitViewport) -> usize {
        self.viewports.push(viewport);
        self.viewports.len() - 1
    }

    pub fn viewport(&self, index: usize) -> Option<&OrbitViewport> {
        self.viewports.get(index)
    }

    pub fn viewport_mut(&mut self, index: usize) -> Option<&mut OrbitViewport> {
        self.viewports.get_mut(index)
    }

    pub fn viewports(&self) -> &[OrbitViewport] {
        &self.viewports
    }

    /// Range last written to volumetric effects.
    pub fn volumetric_clip(&self) -> Option<ClipRange> {
        self.volumetric_clip
    }
}

impl ClipHost for Scene {
    fn viewport_count(&self) -> usize {
        self.viewports.len()
    }

    fn view_distance(&self, viewport: usize) -> f32 {
        self.viewports
            .get(viewport)
            .map_or(f32::NAN, OrbitViewport::view_distance)
    }

    fn has_camera(&self, viewport: usize) -> bool {
        self.viewports
            .get(viewport)
            .is_some_and(|v| v.camera().is_some())
    }

    fn selected_objects(&self) -> Vec<Object3D> {
        self.selected().map(SceneObject::to_object3d).collect()
    }

    fn set_viewport_clip(&mut self, viewport: usize, range: ClipRange) {
        if let Some(v) = self.viewports.get_mut(viewport) {
            v.set_clip(range);
        }
    }

    fn set_camera_clip(&mut self, viewport: usize, range: ClipRange) {
        if let Some(camera) = self.viewports.get_mut(viewport).and_then(|v| v.camera_mut()) {
            camera.clip = Some(range);
        }
    }

    fn set_volumetric_clip(&mut self, range: ClipRange) {
        self.volumetric_clip = Some(range);
    }
}
