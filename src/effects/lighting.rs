// lighting.rs - Swap between the default and the platform-estimated light
//
// Two states. The platform announces when estimated values start and stop
// arriving; each transition swaps the light and the environment map.

use crate::scene::{EnvironmentId, Light, Scene};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightingState {
    Default,
    Estimated,
}

pub struct LightEstimation {
    state: LightingState,
    default_light: Light,
    // Unset until the host finishes loading the HDR texture
    default_environment: Option<EnvironmentId>,
}

impl LightEstimation {
    /// Installs `default_light` into the scene.
    pub fn new(default_light: Light, scene: &mut Scene) -> Self {
        scene.add_light(default_light);
        Self {
            state: LightingState::Default,
            default_light,
            default_environment: None,
        }
    }

    pub fn state(&self) -> LightingState {
        self.state
    }

    pub fn default_environment(&self) -> Option<EnvironmentId> {
        self.default_environment
    }

    /// Default environment finished loading.
    pub fn set_default_environment(&mut self, env: EnvironmentId, scene: &mut Scene) {
        self.default_environment = Some(env);
        // Loading is independent of estimation; it always lands on the scene
        scene.set_environment(Some(env));
    }

    /// Estimated values started arriving.
    pub fn start(&mut self, environment: Option<EnvironmentId>, scene: &mut Scene) -> bool {
        if self.state == LightingState::Estimated {
            return false;
        }
        scene.add_light(Light::Estimated);
        scene.remove_light(&self.default_light);
        if environment.is_some() {
            scene.set_environment(environment);
        }
        self.state = LightingState::Estimated;
        log::info!("light estimation started");
        true
    }

    /// Estimated values stopped arriving.
    pub fn end(&mut self, scene: &mut Scene) -> bool {
        if self.state == LightingState::Default {
            return false;
        }
        scene.add_light(self.default_light);
        scene.remove_light(&Light::Estimated);
        scene.set_environment(self.default_environment);
        self.state = LightingState::Default;
        log::info!("light estimation ended");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_and_end_swap_lights() {
        let mut scene = Scene::new();
        let mut le = LightEstimation::new(Light::hemisphere(1.0), &mut scene);
        assert_eq!(scene.lights(), &[Light::hemisphere(1.0)]);

        assert!(le.start(Some(EnvironmentId(9)), &mut scene));
        assert_eq!(le.state(), LightingState::Estimated);
        assert_eq!(scene.lights(), &[Light::Estimated]);
        assert_eq!(scene.environment(), Some(EnvironmentId(9)));

        assert!(le.end(&mut scene));
        assert_eq!(le.state(), LightingState::Default);
        assert_eq!(scene.lights(), &[Light::hemisphere(1.0)]);
        assert_eq!(scene.environment(), None);
    }

    #[test]
    fn end_restores_loaded_default_environment() {
        let mut scene = Scene::new();
        let mut le = LightEstimation::new(Light::hemisphere(1.0), &mut scene);
        le.set_default_environment(EnvironmentId(1), &mut scene);

        le.start(Some(EnvironmentId(2)), &mut scene);
        le.end(&mut scene);
        assert_eq!(scene.environment(), Some(EnvironmentId(1)));
    }

    #[test]
    fn start_without_environment_keeps_current() {
        let mut scene = Scene::new();
        let mut le = LightEstimation::new(Light::hemisphere(1.0), &mut scene);
        le.set_default_environment(EnvironmentId(1), &mut scene);
        le.start(None, &mut scene);
        assert_eq!(scene.environment(), Some(EnvironmentId(1)));
    }

    #[test]
    fn repeated_events_are_ignored() {
        let mut scene = Scene::new();
        let mut le = LightEstimation::new(Light::hemisphere(1.0), &mut scene);
        assert!(!le.end(&mut scene));
        assert!(le.start(None, &mut scene));
        assert!(!le.start(None, &mut scene));
        assert_eq!(scene.lights().len(), 1);
    }
}
