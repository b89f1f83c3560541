/// Per-tick world placement of every body.
///
/// The catalog is depth-first with parents first, so one in-order pass
/// always finds a parent's frame already resolved. A satellite orbits in
/// its parent's orbit frame: it inherits the parent's position and tilt,
/// never the parent's self-rotation.

use glam::{Quat, Vec3};
use orrery_engine::Frame;

use crate::bodies::BodyCatalog;
use crate::features::FeatureToggles;
use crate::orbit;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyState {
    /// World position.
    pub position: Vec3,
    /// Orientation of the tilted orbit frame this body moves in.
    pub orbit_rotation: Quat,
    /// Self-rotation about the body's local Y axis.
    pub spin: f32,
    pub visible: bool,
}

impl Default for BodyState {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orbit_rotation: Quat::IDENTITY,
            spin: 0.0,
            visible: true,
        }
    }
}

/// Evaluated state for every catalog entry, indexed like the catalog.
#[derive(Debug, Clone, Default)]
pub struct Hierarchy {
    states: Vec<BodyState>,
}

impl Hierarchy {
    pub fn new(catalog: &BodyCatalog) -> Self {
        Self {
            states: vec![BodyState::default(); catalog.len()],
        }
    }

    /// Place every body for `elapsed` simulation seconds.
    pub fn evaluate(&mut self, catalog: &BodyCatalog, elapsed: f64, toggles: &FeatureToggles) {
        self.states.resize(catalog.len(), BodyState::default());

        for (idx, node) in catalog.nodes().iter().enumerate() {
            let (parent_frame, parent_visible) = match node.parent {
                Some(p) => {
                    let s = &self.states[p];
                    (Frame::new(s.position, s.orbit_rotation), s.visible)
                }
                None => (Frame::IDENTITY, true),
            };

            let body = &node.body;
            let orbit_frame = parent_frame.child(Vec3::ZERO, orbit::inclination(body.orbit_inclination));
            let local = orbit::position_at_time(
                body.orbit_radius,
                body.orbit_eccentricity,
                body.orbital_speed,
                body.phase(),
                elapsed,
            );

            let state = &mut self.states[idx];
            state.position = orbit_frame.transform_point(local);
            state.orbit_rotation = orbit_frame.rotation;
            state.visible = parent_visible && toggles.shows(body);
        }
    }

    /// Advance self-rotation of every body by `sim_dt` simulation seconds.
    pub fn advance_spin(&mut self, catalog: &BodyCatalog, sim_dt: f32) {
        for (state, node) in self.states.iter_mut().zip(catalog.nodes()) {
            state.spin = orbit::advance_spin(state.spin, node.body.rotation_speed, sim_dt);
        }
    }

    pub fn state(&self, idx: usize) -> Option<&BodyState> {
        self.states.get(idx)
    }

    pub fn world_position(&self, idx: usize) -> Option<Vec3> {
        self.states.get(idx).map(|s| s.position)
    }

    pub fn is_visible(&self, idx: usize) -> bool {
        self.states.get(idx).is_some_and(|s| s.visible)
    }

    /// World-space points of the orbit path of `idx`, drawn around its parent.
    pub fn orbit_path(&self, catalog: &BodyCatalog, idx: usize, segments: usize) -> Vec<Vec3> {
        let Some(node) = catalog.node(idx) else {
            return Vec::new();
        };
        if node.body.is_stationary() {
            return Vec::new();
        }
        let Some(state) = self.states.get(idx) else {
            return Vec::new();
        };
        let center = node
            .parent
            .and_then(|p| self.world_position(p))
            .unwrap_or(Vec3::ZERO);
        let frame = Frame::new(center, state.orbit_rotation);
        orbit::path_points(node.body.orbit_radius, node.body.orbit_eccentricity, segments)
            .into_iter()
            .map(|p| frame.transform_point(p))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::{BodyKind, OrbitalBody, MOON_ID, EARTH_ID};
    use crate::features::Feature;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-3
    }

    fn evaluated(t: f64) -> (BodyCatalog, Hierarchy) {
        let catalog = BodyCatalog::builtin();
        let mut h = Hierarchy::new(&catalog);
        h.evaluate(&catalog, t, &FeatureToggles::default());
        (catalog, h)
    }

    #[test]
    fn sun_stays_at_origin() {
        let (_, h) = evaluated(42.0);
        assert_eq!(h.world_position(0), Some(Vec3::ZERO));
    }

    #[test]
    fn planets_sit_on_their_orbits() {
        let (catalog, h) = evaluated(17.5);
        let earth = catalog.index_of(EARTH_ID).unwrap();
        let r = h.world_position(earth).unwrap().length();
        assert!((r - 32.0).abs() < 1e-3);
    }

    #[test]
    fn child_is_parent_plus_own_offset() {
        for t in [0.0, 3.3, 250.0] {
            let (catalog, h) = evaluated(t);
            for (idx, node) in catalog.nodes().iter().enumerate() {
                let Some(parent) = node.parent else { continue };
                let b = &node.body;
                let parent_state = h.state(parent).unwrap();
                let local = orbit::position_at_time(
                    b.orbit_radius, b.orbit_eccentricity, b.orbital_speed, b.phase(), t,
                );
                let expected = parent_state.position
                    + parent_state.orbit_rotation * orbit::inclination(b.orbit_inclination) * local;
                assert!(
                    approx(h.world_position(idx).unwrap(), expected),
                    "{} at t={t}",
                    b.id
                );
            }
        }
    }

    #[test]
    fn satellites_inherit_parent_tilt() {
        let roots = vec![
            OrbitalBody::new("sun", BodyKind::Star, 1.0),
            OrbitalBody::new("p", BodyKind::Planet, 1.0)
                .with_orbit(10.0, 0.0)
                .with_tilted_orbit(90.0, 0.0)
                .with_phase(0.0)
                .with_satellites(vec![
                    OrbitalBody::new("m", BodyKind::Moon, 0.1).with_orbit(1.0, 0.0).with_phase(std::f32::consts::FRAC_PI_2),
                ]),
        ];
        let catalog = BodyCatalog::new(roots).unwrap();
        let mut h = Hierarchy::new(&catalog);
        h.evaluate(&catalog, 0.0, &FeatureToggles::default());

        // Planet at +X; moon's +Z offset is tilted onto -Y by the planet's frame
        assert!(approx(h.world_position(1).unwrap(), Vec3::new(10.0, 0.0, 0.0)));
        assert!(approx(h.world_position(2).unwrap(), Vec3::new(10.0, -1.0, 0.0)));
    }

    #[test]
    fn hidden_parents_hide_children_without_touching_the_table() {
        let catalog = BodyCatalog::builtin();
        let before = catalog.clone();
        let mut toggles = FeatureToggles::default();
        toggles.toggle(Feature::AdvancedMoons);
        let mut h = Hierarchy::new(&catalog);
        h.evaluate(&catalog, 1.0, &toggles);

        assert!(h.is_visible(catalog.index_of(MOON_ID).unwrap()));
        assert!(!h.is_visible(catalog.index_of("ganymede").unwrap()));
        assert_eq!(catalog, before);
    }

    #[test]
    fn orbit_path_passes_through_body() {
        let catalog = BodyCatalog::builtin();
        let moon = catalog.index_of(MOON_ID).unwrap();
        let body = catalog.body(moon).unwrap().clone();
        // Pick t so the moon sits exactly on path vertex 0 (θ = 0)
        let t = (std::f64::consts::TAU - body.phase() as f64)
            / (body.orbital_speed as f64 * orbit::ORBIT_TIME_SCALE);
        let mut h = Hierarchy::new(&catalog);
        h.evaluate(&catalog, t, &FeatureToggles::default());

        let path = h.orbit_path(&catalog, moon, orbit::ORBIT_PATH_SEGMENTS);
        assert!(approx(path[0], h.world_position(moon).unwrap()));
        assert!(h.orbit_path(&catalog, 0, 16).is_empty());
    }

    #[test]
    fn spin_accumulates() {
        let catalog = BodyCatalog::builtin();
        let mut h = Hierarchy::new(&catalog);
        for _ in 0..10 {
            h.advance_spin(&catalog, orrery_engine::REFERENCE_DT);
        }
        let earth = catalog.index_of(EARTH_ID).unwrap();
        assert!((h.state(earth).unwrap().spin - 10.0 * 0.2 * 0.01).abs() < 1e-5);
    }
}
