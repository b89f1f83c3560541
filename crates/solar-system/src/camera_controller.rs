/// Camera state machine: free roam with no selection, an eased transition
/// toward a selected body, then following it while the user owns the pose.

use glam::Vec3;
use orrery_engine::{approach_vec3, rate_adjusted, Camera3D, OrbitControls};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CameraTuning {
    /// Fraction of the remaining distance the look-target covers per reference tick.
    pub target_lerp: f32,
    /// Same, for the camera position while transitioning.
    pub position_lerp: f32,
    /// Distance to the ideal framing at which a transition counts as arrived.
    pub convergence_threshold: f32,
    /// Framing offset above the body, in body sizes.
    pub offset_height: f32,
    /// Framing offset behind the body, in body sizes.
    pub offset_distance: f32,
    /// Free roam speed in world units per second.
    pub free_roam_speed: f32,
    /// A transition that has not arrived after this many ticks hands over to following.
    pub max_transition_ticks: u32,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            target_lerp: 0.2,
            position_lerp: 0.04,
            convergence_threshold: 0.1,
            offset_height: 1.5,
            offset_distance: 3.5,
            free_roam_speed: 30.0,
            max_transition_ticks: 600,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMode {
    /// Nothing selected; movement keys drive the camera.
    FreeRoam,
    /// Easing toward the framing of the selected body.
    Transitioning { ticks: u32 },
    /// Look-target tracks the selected body; the pose is left to the user.
    Following,
}

impl CameraMode {
    /// Code reported to the host page.
    pub fn code(&self) -> u32 {
        match self {
            CameraMode::FreeRoam => 0,
            CameraMode::Transitioning { .. } => 1,
            CameraMode::Following => 2,
        }
    }
}

/// Where the followed body is this tick and how big it is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FollowTarget {
    pub position: Vec3,
    pub size: f32,
}

#[derive(Debug, Clone)]
pub struct CameraController {
    pub tuning: CameraTuning,
    mode: CameraMode,
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new(CameraTuning::default())
    }
}

impl CameraController {
    pub fn new(tuning: CameraTuning) -> Self {
        Self {
            tuning,
            mode: CameraMode::FreeRoam,
        }
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.mode, CameraMode::Transitioning { .. })
    }

    fn set_mode(&mut self, mode: CameraMode) {
        if std::mem::discriminant(&mode) != std::mem::discriminant(&self.mode) {
            log::debug!("camera: {:?} -> {:?}", self.mode, mode);
        }
        self.mode = mode;
    }

    /// A new body was selected (`true`) or the selection was cleared.
    /// Selecting restarts the transition even when one is already running.
    pub fn on_selection_changed(&mut self, has_selection: bool) {
        if has_selection {
            self.set_mode(CameraMode::Transitioning { ticks: 0 });
        } else {
            self.set_mode(CameraMode::FreeRoam);
        }
    }

    /// Camera position that frames a body of `size` at `position`.
    pub fn ideal_position(&self, target: FollowTarget) -> Vec3 {
        target.position
            + Vec3::new(
                0.0,
                target.size * self.tuning.offset_height,
                target.size * self.tuning.offset_distance,
            )
    }

    /// Advance one tick. `target` is `None` while the followed body is not
    /// mounted; the easing is skipped and retried next tick.
    /// `controls.update` always runs last.
    pub fn tick(
        &mut self,
        camera: &mut Camera3D,
        controls: &mut OrbitControls,
        target: Option<FollowTarget>,
        intent: Vec3,
        dt: f32,
    ) {
        if controls.is_interacting() && self.is_animating() {
            self.set_mode(CameraMode::Following);
        }

        match self.mode {
            CameraMode::FreeRoam => {
                if intent != Vec3::ZERO {
                    let delta = camera.orientation * intent * self.tuning.free_roam_speed * dt;
                    camera.position += delta;
                    controls.target += delta;
                }
            }
            CameraMode::Transitioning { ticks } => {
                if let Some(target) = target {
                    self.follow(controls, target, dt);
                    let ideal = self.ideal_position(target);
                    camera.position = approach_vec3(
                        camera.position,
                        ideal,
                        rate_adjusted(self.tuning.position_lerp, dt),
                    );
                    let ticks = ticks + 1;
                    if camera.position.distance(ideal) < self.tuning.convergence_threshold {
                        self.set_mode(CameraMode::Following);
                    } else if ticks >= self.tuning.max_transition_ticks {
                        log::debug!("camera: transition cut off after {ticks} ticks");
                        self.set_mode(CameraMode::Following);
                    } else {
                        self.mode = CameraMode::Transitioning { ticks };
                    }
                }
            }
            CameraMode::Following => {
                if let Some(target) = target {
                    self.follow(controls, target, dt);
                }
            }
        }

        controls.update(camera);
    }

    fn follow(&self, controls: &mut OrbitControls, target: FollowTarget, dt: f32) {
        controls.target = approach_vec3(
            controls.target,
            target.position,
            rate_adjusted(self.tuning.target_lerp, dt),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_engine::{ticks_to_converge, ControlsConfig, REFERENCE_DT};

    fn rig(camera_pos: Vec3) -> (CameraController, Camera3D, OrbitControls) {
        let mut camera = Camera3D::default().with_position(camera_pos);
        camera.look_at(Vec3::ZERO);
        let controls = OrbitControls::new(ControlsConfig::default());
        (CameraController::default(), camera, controls)
    }

    const SUN: FollowTarget = FollowTarget {
        position: Vec3::ZERO,
        size: 1.0,
    };

    #[test]
    fn transition_converges_within_bound() {
        let controller = CameraController::default();
        let ideal = controller.ideal_position(SUN);
        let (mut controller, mut camera, mut controls) = rig(ideal + Vec3::new(0.0, 0.0, 50.0));

        let bound = ticks_to_converge(50.0, 0.1, 0.04).unwrap();
        assert_eq!(bound, 153);

        controller.on_selection_changed(true);
        let mut arrived_at = None;
        for tick in 1..=bound + 5 {
            controller.tick(&mut camera, &mut controls, Some(SUN), Vec3::ZERO, REFERENCE_DT);
            if controller.mode() == CameraMode::Following {
                arrived_at = Some(tick);
                break;
            }
        }
        let arrived_at = arrived_at.expect("transition never converged");
        assert!(arrived_at + 2 >= bound && arrived_at <= bound + 1, "arrived at {arrived_at}");
        assert!(camera.position.distance(ideal) < 0.1 + 1e-3);
    }

    #[test]
    fn drag_preempts_transition_but_keeps_following() {
        let (mut controller, mut camera, mut controls) = rig(Vec3::new(0.0, 50.0, 150.0));
        let body = FollowTarget {
            position: Vec3::new(30.0, 0.0, 0.0),
            size: 1.0,
        };
        controller.on_selection_changed(true);
        controller.tick(&mut camera, &mut controls, Some(body), Vec3::ZERO, REFERENCE_DT);
        assert!(controller.is_animating());

        controls.begin_interaction();
        let before = controls.target;
        controller.tick(&mut camera, &mut controls, Some(body), Vec3::ZERO, REFERENCE_DT);
        assert_eq!(controller.mode(), CameraMode::Following);
        // Look-target keeps tracking the body
        assert!(controls.target.distance(body.position) < before.distance(body.position));
    }

    #[test]
    fn deselect_freezes_in_place() {
        let (mut controller, mut camera, mut controls) = rig(Vec3::new(0.0, 50.0, 150.0));
        controller.on_selection_changed(true);
        for _ in 0..10 {
            controller.tick(&mut camera, &mut controls, Some(SUN), Vec3::ZERO, REFERENCE_DT);
        }
        controller.on_selection_changed(false);
        assert_eq!(controller.mode(), CameraMode::FreeRoam);

        let pose = camera.position;
        let target = controls.target;
        controller.tick(&mut camera, &mut controls, None, Vec3::ZERO, REFERENCE_DT);
        assert!((camera.position - pose).length() < 1e-3);
        assert!((controls.target - target).length() < 1e-6);
    }

    #[test]
    fn unresolved_target_is_skipped() {
        let (mut controller, mut camera, mut controls) = rig(Vec3::new(0.0, 50.0, 150.0));
        controller.on_selection_changed(true);
        let pose = camera.position;
        for _ in 0..5 {
            controller.tick(&mut camera, &mut controls, None, Vec3::ZERO, REFERENCE_DT);
        }
        assert_eq!(controller.mode(), CameraMode::Transitioning { ticks: 0 });
        assert!((camera.position - pose).length() < 1e-3);
    }

    #[test]
    fn runaway_target_is_cut_off() {
        let (mut controller, mut camera, mut controls) = rig(Vec3::new(0.0, 50.0, 150.0));
        controller.tuning.max_transition_ticks = 5;
        controller.on_selection_changed(true);
        for i in 0..5 {
            let body = FollowTarget {
                position: Vec3::new(100.0 * i as f32, 0.0, 0.0),
                size: 1.0,
            };
            controller.tick(&mut camera, &mut controls, Some(body), Vec3::ZERO, REFERENCE_DT);
        }
        assert_eq!(controller.mode(), CameraMode::Following);
    }

    #[test]
    fn free_roam_moves_camera_and_target_together() {
        let (mut controller, mut camera, mut controls) = rig(Vec3::new(0.0, 0.0, 100.0));
        let start_cam = camera.position;
        let start_target = controls.target;
        for _ in 0..60 {
            controller.tick(&mut camera, &mut controls, None, Vec3::NEG_Z, REFERENCE_DT);
        }
        // One second forward at 30 units/s, toward the origin
        assert!((camera.position - (start_cam + Vec3::new(0.0, 0.0, -30.0))).length() < 0.1);
        assert!((controls.target - (start_target + Vec3::new(0.0, 0.0, -30.0))).length() < 0.1);
    }

    #[test]
    fn reselect_restarts_transition() {
        let mut controller = CameraController::default();
        controller.on_selection_changed(true);
        controller.mode = CameraMode::Following;
        controller.on_selection_changed(true);
        assert_eq!(controller.mode(), CameraMode::Transitioning { ticks: 0 });
        assert_eq!(controller.mode().code(), 1);
    }
}
