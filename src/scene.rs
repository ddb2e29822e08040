//! Scene descriptions.
//!
//! A scene is a `World` plus the `Camera` that looks at it. Scenes are either
//! built in code (see `demo`) or read from a JSON description:
//!
//! ```json
//! {
//!   "camera": {
//!     "width": 100, "height": 50, "field_of_view": 1.0472,
//!     "from": [0, 1.5, -5], "to": [0, 1, 0], "up": [0, 1, 0]
//!   },
//!   "light": { "position": [-10, 10, -10], "intensity": [1, 1, 1] },
//!   "shapes": [
//!     { "type": "plane", "material": { "specular": 0 } },
//!     {
//!       "type": "sphere",
//!       "transform": [ { "scale": [0.5, 0.5, 0.5] }, { "translate": [0, 1, 0] } ],
//!       "material": {
//!         "pattern": { "type": "stripe", "a": [1, 1, 1], "b": [0, 0, 0] }
//!       }
//!     }
//!   ]
//! }
//! ```
//!
//! Transform lists are applied in order, so the sphere above is scaled and
//! then moved.

use std::fs;
use std::path::Path;
use std::f64::consts::PI;

use serde::Deserialize;
use tracing::{ debug, warn };

use crate::consts::{ CANVAS_WIDTH, CANVAS_HEIGHT, FEQ_EPSILON };
use crate::error::{ Result, TracerError };
use crate::tuple::Tuple;
use crate::color::Color;
use crate::matrix::Matrix;
use crate::transform::{ translation, scaling, rotation_x, rotation_y, rotation_z,
    shearing, view_transform };
use crate::shape::Shape;
use crate::pattern::{ Pattern, PatternKind };
use crate::material::Material;
use crate::light::PointLight;
use crate::world::World;
use crate::camera::Camera;

/// A world and the camera to render it with.
#[derive(Clone, Debug)]
pub struct Scene {
    pub world: World,
    pub camera: Camera,
}

impl Scene {
    /// Reads a JSON scene description from disk.
    pub fn load(path: &Path) -> Result<Scene> {
        let text = fs::read_to_string(path)?;
        let scene = Scene::from_json(&text)?;

        debug!(path = %path.display(), objects = scene.world.objects.len(),
            "loaded scene");
        Ok(scene)
    }

    /// Parses and validates a JSON scene description.
    pub fn from_json(text: &str) -> Result<Scene> {
        let json: SceneJson = serde_json::from_str(text)?;
        json.build()
    }

    /// Replaces the camera with one of a different canvas size, keeping its
    /// field of view and orientation.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(TracerError::InvalidScene(
                format!("canvas size {}x{} is empty", width, height)
            ));
        }

        self.camera = Camera::new(width, height, self.camera.field_of_view())
            .with_transform(*self.camera.transform())?;
        Ok(())
    }
}

/// The built-in scene: three spheres resting on a floor.
pub fn demo() -> Result<Scene> {
    let floor = Shape::plane().with_material(Material {
        color: Color::rgb(1.0, 0.9, 0.9),
        specular: 0.0,
        ..Default::default()
    });

    let sphere_material = |color| Material {
        color,
        diffuse: 0.7,
        specular: 0.3,
        ..Default::default()
    };

    let middle = Shape::sphere()
        .with_transform(translation(-0.5, 1.0, 0.5))
        .with_material(sphere_material(Color::rgb(0.1, 1.0, 0.5)));

    let right = Shape::sphere()
        .with_transform(translation(1.5, 0.5, -0.5) * scaling(0.5, 0.5, 0.5))
        .with_material(sphere_material(Color::rgb(0.5, 1.0, 0.1)));

    let left = Shape::sphere()
        .with_transform(translation(-1.5, 0.33, -0.75) * scaling(0.33, 0.33, 0.33))
        .with_material(sphere_material(Color::rgb(1.0, 0.8, 0.1)));

    let world = World::new()
        .with_light(PointLight::new(Tuple::point(-10.0, 10.0, -10.0), Color::white()))
        .with_object(floor)
        .with_object(middle)
        .with_object(right)
        .with_object(left);

    let view = view_transform(
        Tuple::point(0.0, 1.5, -5.0),
        Tuple::point(0.0, 1.0, 0.0),
        Tuple::vector(0.0, 1.0, 0.0),
    );
    let camera = Camera::new(CANVAS_WIDTH, CANVAS_HEIGHT, PI / 3.0)
        .with_transform(view)?;

    Ok(Scene { world, camera })
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneJson {
    camera: CameraJson,
    light: LightJson,

    #[serde(default)]
    shapes: Vec<ShapeJson>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CameraJson {
    width: usize,
    height: usize,
    field_of_view: f64,

    from: [f64; 3],
    to: [f64; 3],
    up: [f64; 3],
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct LightJson {
    position: [f64; 3],
    intensity: [f64; 3],
}

#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
enum ShapeType {
    Sphere,
    Plane,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ShapeJson {
    #[serde(rename = "type")]
    ty: ShapeType,

    #[serde(default)]
    transform: Vec<TransformJson>,

    material: Option<MaterialJson>,
}

/// One step of a transform list, e.g. `{ "rotate_y": 0.5 }`.
#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
enum TransformJson {
    Translate([f64; 3]),
    Scale([f64; 3]),
    RotateX(f64),
    RotateY(f64),
    RotateZ(f64),
    Shear([f64; 6]),
}

#[derive(Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct MaterialJson {
    color: Option<[f64; 3]>,
    ambient: Option<f64>,
    diffuse: Option<f64>,
    specular: Option<f64>,
    shininess: Option<f64>,
    pattern: Option<PatternJson>,
}

#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
enum PatternType {
    Stripe,
    Gradient,
    Ring,
    Checkers,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct PatternJson {
    #[serde(rename = "type")]
    ty: PatternType,
    a: [f64; 3],
    b: [f64; 3],

    #[serde(default)]
    transform: Vec<TransformJson>,
}

impl TransformJson {
    fn matrix(&self) -> Matrix {
        match *self {
            TransformJson::Translate([x, y, z]) => translation(x, y, z),
            TransformJson::Scale([x, y, z]) => scaling(x, y, z),
            TransformJson::RotateX(r) => rotation_x(r),
            TransformJson::RotateY(r) => rotation_y(r),
            TransformJson::RotateZ(r) => rotation_z(r),
            TransformJson::Shear([xy, xz, yx, yz, zx, zy]) => {
                shearing(xy, xz, yx, yz, zx, zy)
            },
        }
    }
}

/// Composes a transform list, first entry applied first.
fn compose(ops: &[TransformJson]) -> Matrix {
    ops.iter().fold(Matrix::identity(), |acc, op| op.matrix() * acc)
}

impl SceneJson {
    fn build(self) -> Result<Scene> {
        let camera = self.camera.build()?;

        let light = PointLight::new(
            self.light.position.into(),
            self.light.intensity.into(),
        );

        let mut world = World::new().with_light(light);
        for (i, shape_json) in self.shapes.into_iter().enumerate() {
            let shape = shape_json.build()?;
            if !shape.is_renderable() {
                warn!(index = i, "shape transform is not invertible; it will not be visible");
            }

            world.objects.push(shape);
        }

        Ok(Scene { world, camera })
    }
}

impl CameraJson {
    fn build(&self) -> Result<Camera> {
        if self.width == 0 || self.height == 0 {
            return Err(TracerError::InvalidScene(
                format!("canvas size {}x{} is empty", self.width, self.height)
            ));
        }

        if !(self.field_of_view > 0.0 && self.field_of_view < PI) {
            return Err(TracerError::InvalidScene(
                format!("field of view {} is outside (0, pi)", self.field_of_view)
            ));
        }

        let from: Tuple = self.from.into();
        let to: Tuple = self.to.into();
        if from == to {
            return Err(TracerError::InvalidScene(
                "camera `from` and `to` coincide".to_string()
            ));
        }

        let up = Tuple::vector(self.up[0], self.up[1], self.up[2]);
        if up.magnitude() < FEQ_EPSILON {
            return Err(TracerError::InvalidScene(
                "camera `up` has no direction".to_string()
            ));
        }

        let view = view_transform(from, to, up);

        Camera::new(self.width, self.height, self.field_of_view)
            .with_transform(view)
            .map_err(|_| TracerError::InvalidScene(
                "camera `up` is parallel to the view direction".to_string()
            ))
    }
}

impl ShapeJson {
    fn build(self) -> Result<Shape> {
        let shape = match self.ty {
            ShapeType::Sphere => Shape::sphere(),
            ShapeType::Plane => Shape::plane(),
        };

        let material = match self.material {
            Some(m) => m.build()?,
            None => Material::default(),
        };

        Ok(shape.with_transform(compose(&self.transform)).with_material(material))
    }
}

impl MaterialJson {
    fn build(self) -> Result<Material> {
        let defaults = Material::default();

        let pattern = match self.pattern {
            Some(p) => Some(p.build()?),
            None => None,
        };

        Ok(Material {
            color: self.color.map(Color::from).unwrap_or(defaults.color),
            pattern,
            ambient: self.ambient.unwrap_or(defaults.ambient),
            diffuse: self.diffuse.unwrap_or(defaults.diffuse),
            specular: self.specular.unwrap_or(defaults.specular),
            shininess: self.shininess.unwrap_or(defaults.shininess),
        })
    }
}

impl PatternJson {
    fn build(self) -> Result<Pattern> {
        let kind = match self.ty {
            PatternType::Stripe => PatternKind::Stripe,
            PatternType::Gradient => PatternKind::Gradient,
            PatternType::Ring => PatternKind::Ring,
            PatternType::Checkers => PatternKind::Checkers,
        };

        Pattern::new(kind, self.a.into(), self.b.into())
            .with_transform(compose(&self.transform))
            .map_err(|_| TracerError::InvalidScene(
                "pattern transform is not invertible".to_string()
            ))
    }
}

#[cfg(test)]
const SMALL_SCENE: &str = r#"{
    "camera": {
        "width": 11, "height": 11, "field_of_view": 1.5707963267948966,
        "from": [0, 0, -5], "to": [0, 0, 0], "up": [0, 1, 0]
    },
    "light": { "position": [-10, 10, -10], "intensity": [1, 1, 1] },
    "shapes": [
        {
            "type": "sphere",
            "material": { "color": [0.8, 1.0, 0.6], "diffuse": 0.7, "specular": 0.2 }
        },
        { "type": "sphere", "transform": [ { "scale": [0.5, 0.5, 0.5] } ] }
    ]
}"#;

#[test]
fn load_small_scene() {
    let scene = Scene::from_json(SMALL_SCENE).unwrap();

    assert_eq!(scene.camera.hsize(), 11);
    assert_eq!(scene.world.objects.len(), 2);
    assert_eq!(scene.world.objects[0].material.color, Color::rgb(0.8, 1.0, 0.6));
    assert_eq!(scene.world.objects[0].material.ambient, 0.1);
    assert_eq!(*scene.world.objects[1].transform(), scaling(0.5, 0.5, 0.5));
}

#[test]
fn loaded_scene_renders_like_built_one() {
    let scene = Scene::from_json(SMALL_SCENE).unwrap();
    let image = scene.camera.render(&scene.world).unwrap();

    assert_eq!(image.pixel_at(5, 5).unwrap(), Color::rgb(0.38066, 0.47583, 0.2855));
}

#[test]
fn transform_list_applies_in_order() {
    let ops = vec![
        TransformJson::RotateX(PI / 2.0),
        TransformJson::Scale([5.0, 5.0, 5.0]),
        TransformJson::Translate([10.0, 5.0, 7.0]),
    ];

    assert_eq!(compose(&ops) * Tuple::point(1.0, 0.0, 1.0), Tuple::point(15.0, 0.0, 7.0));
    assert_eq!(compose(&[]), Matrix::identity());
}

#[test]
fn pattern_in_scene() {
    let text = r#"{
        "camera": { "width": 4, "height": 2, "field_of_view": 1.0,
                    "from": [0, 0, -5], "to": [0, 0, 0], "up": [0, 1, 0] },
        "light": { "position": [0, 0, -10], "intensity": [1, 1, 1] },
        "shapes": [ {
            "type": "plane",
            "material": { "pattern": {
                "type": "checkers", "a": [1, 1, 1], "b": [0, 0, 0],
                "transform": [ { "scale": [2, 2, 2] } ]
            } }
        } ]
    }"#;

    let scene = Scene::from_json(text).unwrap();
    let pattern = scene.world.objects[0].material.pattern.unwrap();

    assert_eq!(pattern.kind, PatternKind::Checkers);
    assert_eq!(*pattern.transform(), scaling(2.0, 2.0, 2.0));
}

#[test]
fn degenerate_shape_is_kept_but_invisible() {
    let text = r#"{
        "camera": { "width": 4, "height": 2, "field_of_view": 1.0,
                    "from": [0, 0, -5], "to": [0, 0, 0], "up": [0, 1, 0] },
        "light": { "position": [0, 0, -10], "intensity": [1, 1, 1] },
        "shapes": [ { "type": "sphere", "transform": [ { "scale": [0, 1, 1] } ] } ]
    }"#;

    let scene = Scene::from_json(text).unwrap();

    assert_eq!(scene.world.objects.len(), 1);
    assert!(!scene.world.objects[0].is_renderable());
}

#[test]
fn invalid_scenes_are_rejected() {
    let camera = |body: &str| format!(r#"{{
        "camera": {},
        "light": {{ "position": [0, 0, -10], "intensity": [1, 1, 1] }}
    }}"#, body);

    let empty = camera(r#"{ "width": 0, "height": 2, "field_of_view": 1.0,
        "from": [0, 0, -5], "to": [0, 0, 0], "up": [0, 1, 0] }"#);
    let same = camera(r#"{ "width": 4, "height": 2, "field_of_view": 1.0,
        "from": [0, 0, 0], "to": [0, 0, 0], "up": [0, 1, 0] }"#);
    let parallel = camera(r#"{ "width": 4, "height": 2, "field_of_view": 1.0,
        "from": [0, 0, -5], "to": [0, 0, 0], "up": [0, 0, 1] }"#);
    let zero_up = camera(r#"{ "width": 4, "height": 2, "field_of_view": 1.0,
        "from": [0, 0, 0], "to": [1, 1, 1], "up": [0, 0, 0] }"#);

    for text in [empty, same, parallel, zero_up].iter() {
        assert!(matches!(Scene::from_json(text), Err(TracerError::InvalidScene(_))));
    }
}

#[test]
fn malformed_json_is_a_scene_error() {
    assert!(matches!(Scene::from_json("{ \"camera\": "), Err(TracerError::Scene(_))));
    assert!(matches!(Scene::from_json(r#"{ "shapes": [ { "type": "cube" } ] }"#),
        Err(TracerError::Scene(_))));
}

#[test]
fn demo_scene() {
    let scene = demo().unwrap();

    assert_eq!(scene.camera.hsize(), 800);
    assert_eq!(scene.camera.vsize(), 400);
    assert_eq!(scene.world.objects.len(), 4);
    assert_eq!(scene.world.light, Some(PointLight::new(
        Tuple::point(-10.0, 10.0, -10.0), Color::white())));
}

#[test]
fn bundled_demo_file_matches_demo() {
    let from_file = Scene::from_json(include_str!("../scenes/demo.json")).unwrap();
    let built = demo().unwrap();

    assert_eq!(from_file.camera.hsize(), built.camera.hsize());
    assert_eq!(from_file.camera.vsize(), built.camera.vsize());
    assert!(crate::feq(from_file.camera.pixel_size(), built.camera.pixel_size()));
    assert_eq!(from_file.camera.transform(), built.camera.transform());
    assert_eq!(from_file.world.light, built.world.light);
    assert_eq!(from_file.world.objects, built.world.objects);
}

#[test]
fn resize_keeps_orientation() {
    let mut scene = demo().unwrap();
    let transform = *scene.camera.transform();
    scene.resize(80, 40).unwrap();

    assert_eq!(scene.camera.hsize(), 80);
    assert_eq!(*scene.camera.transform(), transform);
    assert!(matches!(scene.resize(0, 40), Err(TracerError::InvalidScene(_))));
}

#[test]
fn bundled_pattern_scene_loads() {
    let scene = Scene::from_json(include_str!("../scenes/patterns.json")).unwrap();

    assert_eq!(scene.world.objects.len(), 4);
    assert!(scene.world.objects.iter().all(|s| s.material.pattern.is_some()));
    assert!(scene.world.objects.iter().all(|s| s.is_renderable()));
}
