// scene/ - Scene graph
//
// Slot arena of objects plus the active lights and environment. Removed
// slots are reused so ids stay small for the host.

mod light;
mod object;

pub use light::*;
pub use object::*;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ObjectId(pub u32);

#[derive(Debug, Default)]
pub struct Scene {
    objects: Vec<Option<SceneObject>>,
    lights: Vec<Light>,
    environment: Option<EnvironmentId>,
}

#[derive(Serialize)]
struct Entry<'a> {
    id: ObjectId,
    #[serde(flatten)]
    object: &'a SceneObject,
}

#[derive(Serialize)]
struct Snapshot<'a> {
    objects: Vec<Entry<'a>>,
    lights: &'a [Light],
    environment: Option<EnvironmentId>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, object: SceneObject) -> ObjectId {
        if let Some(i) = self.objects.iter().position(Option::is_none) {
            self.objects[i] = Some(object);
            return ObjectId(i as u32);
        }
        self.objects.push(Some(object));
        ObjectId(self.objects.len() as u32 - 1)
    }

    pub fn remove(&mut self, id: ObjectId) -> Option<SceneObject> {
        self.objects.get_mut(id.0 as usize)?.take()
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id.0 as usize)?.as_ref()
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.get_mut(id.0 as usize)?.as_mut()
    }

    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &SceneObject)> {
        self.objects
            .iter()
            .enumerate()
            .filter_map(|(i, o)| o.as_ref().map(|o| (ObjectId(i as u32), o)))
    }

    pub fn len(&self) -> usize {
        self.objects.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn add_light(&mut self, light: Light) {
        if !self.lights.contains(&light) {
            self.lights.push(light);
        }
    }

    pub fn remove_light(&mut self, light: &Light) {
        self.lights.retain(|l| l != light);
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn set_environment(&mut self, env: Option<EnvironmentId>) {
        self.environment = env;
    }

    pub fn environment(&self) -> Option<EnvironmentId> {
        self.environment
    }

    /// JSON snapshot for the host renderer.
    pub fn to_json(&self) -> String {
        let snapshot = Snapshot {
            objects: self.objects().map(|(id, object)| Entry { id, object }).collect(),
            lights: &self.lights,
            environment: self.environment,
        };
        serde_json::to_string(&snapshot).unwrap_or_else(|err| {
            log::error!("scene snapshot failed: {err}");
            String::from("{}")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn sphere() -> SceneObject {
        SceneObject::new(Shape::Sphere { radius: 0.1 }, Material::Phong, 0xff0000)
    }

    #[test]
    fn slots_are_reused() {
        let mut scene = Scene::new();
        let a = scene.add(sphere());
        let b = scene.add(sphere());
        assert_eq!((a, b), (ObjectId(0), ObjectId(1)));

        assert!(scene.remove(a).is_some());
        assert!(scene.get(a).is_none());
        assert!(scene.remove(a).is_none());
        assert_eq!(scene.len(), 1);

        assert_eq!(scene.add(sphere()), ObjectId(0));
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn lights_are_deduplicated() {
        let mut scene = Scene::new();
        scene.add_light(Light::ambient());
        scene.add_light(Light::ambient());
        scene.add_light(Light::Estimated);
        assert_eq!(scene.lights().len(), 2);
        scene.remove_light(&Light::ambient());
        assert_eq!(scene.lights(), &[Light::Estimated]);
    }

    #[test]
    fn snapshot_lists_live_objects() {
        let mut scene = Scene::new();
        let gone = scene.add(sphere());
        scene.add(sphere().at(Vec3::new(0.0, 0.0, -1.0)));
        scene.remove(gone);
        scene.set_environment(Some(EnvironmentId(7)));

        let v: serde_json::Value = serde_json::from_str(&scene.to_json()).unwrap();
        let objects = v["objects"].as_array().unwrap();
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0]["id"], 1);
        assert_eq!(objects[0]["shape"]["type"], "sphere");
        assert_eq!(objects[0]["color"], 0xff0000);
        assert_eq!(v["environment"], 7);
    }
}
