/// Solar system exhibit: nested orbits, body selection and a follow camera.
///
/// Bodies are 3D spheres mounted in the engine scene once their texture has
/// resolved. Clicking a body eases the camera toward it; dragging orbits the
/// view; arrow/WASD keys fly the camera while nothing is selected.

use glam::{Vec2, Vec3};
use orrery_engine::*;
use serde::Serialize;

use crate::belt::{ParticleField, ASTEROID_BELT, KUIPER_BELT};
use crate::bodies::{BodyCatalog, BodyInfo, BodyKind, Ring};
use crate::camera_controller::{CameraController, FollowTarget};
use crate::config::{AudioSettings, ExhibitConfig};
use crate::error::ConfigError;
use crate::features::{Feature, FeatureToggles};
use crate::hierarchy::Hierarchy;
use crate::intent::InputIntent;
use crate::orbit::ORBIT_PATH_SEGMENTS;
use crate::selection::Selection;

// ── Custom event kinds from the host page ────────────────────────────

pub const CUSTOM_START: u32 = 1;
/// a = catalog index, negative clears.
pub const CUSTOM_SELECT: u32 = 2;
pub const CUSTOM_NEXT: u32 = 3;
pub const CUSTOM_PREVIOUS: u32 = 4;
pub const CUSTOM_CLOSE: u32 = 5;
/// a = feature code (see `Feature::from_code`).
pub const CUSTOM_TOGGLE_FEATURE: u32 = 6;
pub const CUSTOM_TOGGLE_SETTINGS: u32 = 7;
pub const CUSTOM_TOGGLE_AUDIO: u32 = 8;
/// a = channel (0 background, 1 UI), b = volume.
pub const CUSTOM_SET_VOLUME: u32 = 9;
pub const CUSTOM_TOGGLE_PAUSE: u32 = 10;
/// a = simulation seconds per real second.
pub const CUSTOM_SET_TIME_SCALE: u32 = 11;
/// Pointer entered a UI button.
pub const CUSTOM_UI_HOVER: u32 = 12;

// ── Game event kinds to the host page ────────────────────────────────

/// a = camera mode, b = gesture active, c = auto-rotating.
pub const EVENT_CAMERA: f32 = 1.0;
/// a = selected index or -1, b = follow anchor or -1, c = settings open.
pub const EVENT_SELECTION: f32 = 2.0;
/// a = feature bits, b = audio enabled, c = started.
pub const EVENT_FEATURES: f32 = 3.0;
/// a = elapsed simulation seconds, b = paused, c = time scale.
pub const EVENT_CLOCK: f32 = 4.0;
/// a = UI sounds audible, b = background volume, c = UI volume.
pub const EVENT_AUDIO: f32 = 5.0;
/// a = hovered index or -1.
pub const EVENT_HOVER: f32 = 6.0;

// ── Sounds ───────────────────────────────────────────────────────────

pub const SOUND_CLICK: SoundEvent = SoundEvent(1);
pub const SOUND_HOVER: SoundEvent = SoundEvent(2);

// ── Look ─────────────────────────────────────────────────────────────

/// Pointer travel in NDC before a press becomes a drag.
const DRAG_THRESHOLD: f32 = 0.01;

const DIMMED_OPACITY: f32 = 0.3;
const SUN_EMISSIVE: f32 = 1.0;
const SELECTED_EMISSIVE: f32 = 0.2;
const HOVER_EMISSIVE: f32 = 0.15;
const HOVER_SCALE: f32 = 1.05;

const ORBIT_DOT_SIZE: f32 = 0.12;
const ORBIT_COLOR: [f32; 3] = [0.2, 0.2, 0.2];
const ORBIT_SELECTED_COLOR: [f32; 3] = [0.38, 0.855, 0.984];

// ── Pointer gesture ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default)]
struct Pointer {
    /// Where the current press started, if a button is down.
    pressed_at: Option<Vec2>,
    last: Vec2,
    dragging: bool,
}

/// Info panel payload: always the selected body's own data.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SelectedInfo<'a> {
    index: usize,
    id: &'a str,
    #[serde(rename = "type")]
    kind: BodyKind,
    #[serde(flatten)]
    info: &'a BodyInfo,
}

/// Flat catalog row for the host page (names, rings, nesting).
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CatalogEntry<'a> {
    index: usize,
    parent: Option<usize>,
    id: &'a str,
    #[serde(rename = "type")]
    kind: BodyKind,
    size: f32,
    is_sun: bool,
    is_togglable: bool,
    ring: Option<Ring>,
    name: &'a str,
}

// ── Game struct ──────────────────────────────────────────────────────

pub struct Orrery {
    catalog: BodyCatalog,
    hierarchy: Hierarchy,
    toggles: FeatureToggles,
    selection: Selection,
    intent: InputIntent,
    camera: CameraController,
    clock: SimClock,
    settings: ExhibitConfig,
    audio: AudioSettings,
    /// Browsers only allow sound after a user gesture.
    audio_unlocked: bool,
    started: bool,
    settings_open: bool,

    asteroid_belt: ParticleField,
    kuiper_belt: ParticleField,

    /// Scene entity per catalog index while mounted.
    mounted: Vec<Option<EntityId>>,
    hovered: Option<usize>,
    pointer: Pointer,
}

impl Orrery {
    pub fn new() -> Self {
        Self::with_settings(BodyCatalog::builtin(), ExhibitConfig::default())
    }

    pub fn with_settings(catalog: BodyCatalog, settings: ExhibitConfig) -> Self {
        Self {
            hierarchy: Hierarchy::new(&catalog),
            mounted: vec![None; catalog.len()],
            catalog,
            toggles: settings.features,
            selection: Selection::new(),
            intent: InputIntent::new(),
            camera: CameraController::new(settings.camera),
            clock: SimClock::new(),
            audio: settings.audio,
            settings,
            audio_unlocked: false,
            started: false,
            settings_open: false,
            asteroid_belt: ParticleField::generate(ASTEROID_BELT),
            kuiper_belt: ParticleField::generate(KUIPER_BELT),
            hovered: None,
            pointer: Pointer::default(),
        }
    }

    pub fn catalog(&self) -> &BodyCatalog {
        &self.catalog
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn toggles(&self) -> &FeatureToggles {
        &self.toggles
    }

    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_settings_open(&self) -> bool {
        self.settings_open
    }

    // ── Host-facing data ───────────────────────────────────────────

    /// Info panel JSON for the selected body, if any.
    pub fn selected_info_json(&self) -> Option<String> {
        let index = self.selection.selected()?;
        let body = self.catalog.body(index)?;
        let info = SelectedInfo {
            index,
            id: &body.id,
            kind: body.kind,
            info: &body.info,
        };
        serde_json::to_string(&info)
            .map_err(|e| log::error!("selected info: {e}"))
            .ok()
    }

    /// Every body in catalog order with its parent index.
    pub fn catalog_json(&self) -> Result<String, serde_json::Error> {
        let entries: Vec<CatalogEntry> = self
            .catalog
            .nodes()
            .iter()
            .enumerate()
            .map(|(index, node)| CatalogEntry {
                index,
                parent: node.parent,
                id: &node.body.id,
                kind: node.body.kind,
                size: node.body.size,
                is_sun: node.body.is_sun,
                is_togglable: node.body.is_togglable,
                ring: node.body.ring,
                name: &node.body.info.name,
            })
            .collect();
        serde_json::to_string(&entries)
    }

    /// Replace the body table. On error the current table stays active.
    pub fn apply_body_table(&mut self, json: &str, ctx: &mut EngineContext) -> Result<(), ConfigError> {
        let catalog = BodyCatalog::from_json(json).map_err(|e| {
            log::error!("body table rejected: {e}");
            e
        })?;
        log::info!("body table replaced: {} bodies", catalog.len());

        for id in self.mounted.drain(..).flatten() {
            ctx.scene.despawn(id);
        }
        if self.selection.clear() {
            self.camera.on_selection_changed(false);
        }
        self.hovered = None;
        self.hierarchy = Hierarchy::new(&catalog);
        self.mounted = vec![None; catalog.len()];
        ctx.load_manifest(catalog.texture_manifest());
        self.catalog = catalog;
        Ok(())
    }

    /// Replace the exhibit tuning. On error the current tuning stays active.
    pub fn apply_config(&mut self, json: &str, ctx: &mut EngineContext) -> Result<(), ConfigError> {
        let settings = ExhibitConfig::from_json(json).map_err(|e| {
            log::error!("exhibit config rejected: {e}");
            e
        })?;
        self.camera.tuning = settings.camera;
        ctx.controls.config = settings.controls;
        self.toggles = settings.features;
        self.audio = settings.audio;
        self.settings = settings;
        self.drop_hidden_selection();
        log::info!("exhibit config applied");
        Ok(())
    }

    // ── Selection helpers ──────────────────────────────────────────

    /// Selecting the body that is already selected leaves the camera alone.
    fn select(&mut self, idx: usize) {
        if !self.toggles.is_visible(&self.catalog, idx) {
            return;
        }
        if self.selection.select(idx) {
            self.on_selected(idx);
        }
    }

    fn on_selected(&mut self, idx: usize) {
        if let Some(body) = self.catalog.body(idx) {
            log::info!("selected '{}'", body.id);
        }
        self.camera.on_selection_changed(true);
    }

    /// Step through root-level bodies.
    fn cycle(&mut self, ctx: &mut EngineContext, forward: bool) {
        let before = self.selection.selected();
        let picked = if forward {
            self.selection.next(&self.catalog, &self.toggles)
        } else {
            self.selection.previous(&self.catalog, &self.toggles)
        };
        if let Some(idx) = picked {
            if picked != before {
                self.on_selected(idx);
            }
            self.play(ctx, SOUND_CLICK);
        }
    }

    /// Returns true if something was selected.
    fn deselect(&mut self) -> bool {
        let cleared = self.selection.clear();
        if cleared {
            log::info!("selection cleared");
            self.camera.on_selection_changed(false);
        }
        cleared
    }

    fn unlock_audio(&mut self) {
        if !self.audio_unlocked {
            self.audio_unlocked = true;
            log::debug!("audio unlocked");
        }
    }

    fn drop_hidden_selection(&mut self) {
        if self.selection.clear_if_hidden(&self.catalog, &self.toggles) {
            log::info!("selected body hidden, selection cleared");
            self.camera.on_selection_changed(false);
        }
    }

    fn play(&self, ctx: &mut EngineContext, sound: SoundEvent) {
        if self.audio.enabled && self.audio_unlocked {
            ctx.emit_sound(sound);
        }
    }

    // ── Picking ────────────────────────────────────────────────────

    /// Nearest visible mounted body under the pointer.
    fn pick(&self, ctx: &EngineContext, ndc: Vec2) -> Option<usize> {
        let ray = ctx.camera.ray_through(ndc);
        ctx.scene
            .iter()
            .filter(|e| e.active)
            .filter_map(|e| {
                let t = ray.intersect_sphere(e.pos, e.effective_radius())?;
                Some((t, e))
            })
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .and_then(|(_, e)| self.catalog.index_of(&e.tag))
    }

    // ── Input ──────────────────────────────────────────────────────

    fn handle_custom(&mut self, ctx: &mut EngineContext, kind: u32, a: f32, b: f32) {
        match kind {
            CUSTOM_SELECT => {
                if !a.is_finite() {
                    log::warn!("select: invalid index {a}");
                } else if a < 0.0 {
                    self.deselect();
                } else if (a as usize) < self.catalog.len() {
                    self.select(a as usize);
                }
            }
            CUSTOM_NEXT => self.cycle(ctx, true),
            CUSTOM_PREVIOUS => self.cycle(ctx, false),
            CUSTOM_CLOSE => {
                self.deselect();
                self.play(ctx, SOUND_CLICK);
            }
            CUSTOM_TOGGLE_FEATURE => match Feature::from_code(a as u32) {
                Some(feature) => {
                    self.toggles.toggle(feature);
                    log::debug!("feature {:?} toggled", feature);
                    self.drop_hidden_selection();
                    self.play(ctx, SOUND_CLICK);
                }
                None => log::warn!("unknown feature code {a}"),
            },
            CUSTOM_TOGGLE_SETTINGS => {
                self.settings_open = !self.settings_open;
                self.play(ctx, SOUND_CLICK);
            }
            CUSTOM_TOGGLE_AUDIO => {
                self.audio.enabled = !self.audio.enabled;
                self.play(ctx, SOUND_CLICK);
            }
            CUSTOM_SET_VOLUME => {
                let volume = b.clamp(0.0, 1.0);
                match a as u32 {
                    0 => self.audio.background_volume = volume,
                    1 => self.audio.ui_volume = volume,
                    channel => log::warn!("unknown volume channel {channel}"),
                }
            }
            CUSTOM_TOGGLE_PAUSE => {
                self.clock.toggle_pause();
                log::debug!("simulation paused: {}", self.clock.is_paused());
            }
            CUSTOM_SET_TIME_SCALE => self.clock.set_time_scale(a as f64),
            CUSTOM_UI_HOVER => self.play(ctx, SOUND_HOVER),
            _ => {}
        }
    }

    fn handle_input(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        for event in input.iter() {
            if !self.started {
                // Only the start button counts before start; it is a user gesture too
                match event {
                    InputEvent::Custom { kind: CUSTOM_START, .. } => {
                        self.started = true;
                        self.unlock_audio();
                        log::info!("exhibit started");
                    }
                    InputEvent::PointerDown { .. } => self.unlock_audio(),
                    _ => {}
                }
                continue;
            }

            match *event {
                InputEvent::Custom { kind, a, b, .. } => self.handle_custom(ctx, kind, a, b),
                InputEvent::PointerDown { x, y } => {
                    self.unlock_audio();
                    let p = Vec2::new(x, y);
                    self.pointer = Pointer {
                        pressed_at: Some(p),
                        last: p,
                        dragging: false,
                    };
                }
                InputEvent::PointerMove { x, y } => {
                    let p = Vec2::new(x, y);
                    if let Some(start) = self.pointer.pressed_at {
                        if !self.pointer.dragging && p.distance(start) > DRAG_THRESHOLD {
                            self.pointer.dragging = true;
                            ctx.controls.begin_interaction();
                        }
                        if self.pointer.dragging {
                            let d = p - self.pointer.last;
                            ctx.controls.rotate(d.x, d.y, ctx.camera.aspect);
                        }
                    } else {
                        let hovered = self.pick(ctx, p);
                        if hovered != self.hovered {
                            if hovered.is_some() {
                                self.play(ctx, SOUND_HOVER);
                            }
                            self.hovered = hovered;
                        }
                    }
                    self.pointer.last = p;
                }
                InputEvent::PointerUp { x, y } => {
                    if self.pointer.dragging {
                        ctx.controls.end_interaction();
                    } else if self.pointer.pressed_at.is_some() {
                        let clicked = match self.pick(ctx, Vec2::new(x, y)) {
                            Some(idx) => {
                                self.select(idx);
                                true
                            }
                            None => self.deselect(),
                        };
                        if clicked {
                            self.play(ctx, SOUND_CLICK);
                        }
                    }
                    self.pointer = Pointer::default();
                }
                InputEvent::Wheel { delta } => ctx.controls.dolly(delta),
                InputEvent::KeyDown { key: Key::Escape } => {
                    if self.selection.any() {
                        self.deselect();
                    } else {
                        self.settings_open = !self.settings_open;
                    }
                }
                InputEvent::KeyDown { key } => {
                    self.intent.key_down(key);
                }
                InputEvent::KeyUp { key } => {
                    self.intent.key_up(key);
                }
            }
        }
    }

    // ── Scene sync ─────────────────────────────────────────────────

    /// Mount, unmount and restyle body entities from the evaluated hierarchy.
    fn sync_scene(&mut self, ctx: &mut EngineContext) {
        for (idx, node) in self.catalog.nodes().iter().enumerate() {
            let body = &node.body;
            let wanted = self.hierarchy.is_visible(idx) && ctx.textures.is_resolved(&body.id);

            let id = match (self.mounted[idx], wanted) {
                (Some(id), true) => id,
                (None, true) => {
                    let id = ctx.next_id();
                    ctx.scene.spawn(Entity::new(id).with_tag(body.id.clone()).with_radius(body.size));
                    log::debug!("mounted '{}'", body.id);
                    self.mounted[idx] = Some(id);
                    id
                }
                (Some(id), false) => {
                    ctx.scene.despawn(id);
                    log::debug!("unmounted '{}'", body.id);
                    self.mounted[idx] = None;
                    if self.hovered == Some(idx) {
                        self.hovered = None;
                    }
                    continue;
                }
                (None, false) => continue,
            };

            let highlighted = self.selection.is_highlighted(&self.catalog, idx);
            let hovered = self.hovered == Some(idx);
            let appearance = Appearance {
                opacity: if self.selection.any() && !highlighted { DIMMED_OPACITY } else { 1.0 },
                emissive: if body.is_sun {
                    SUN_EMISSIVE
                } else if highlighted {
                    SELECTED_EMISSIVE
                } else if hovered {
                    HOVER_EMISSIVE
                } else {
                    0.0
                },
                scale: if hovered { HOVER_SCALE } else { 1.0 },
                texture: ctx.manifest.texture_slot(self.toggles.texture_key(body)).unwrap_or(0),
            };

            let Some(state) = self.hierarchy.state(idx) else { continue };
            if let Some(entity) = ctx.scene.get_mut(id) {
                entity.pos = state.position;
                entity.orientation = state.orbit_rotation;
                entity.spin = state.spin;
                entity.radius = body.size;
                entity.appearance = appearance;
            }
        }
    }

    /// Followed body as the scene currently has it; `None` while unmounted.
    fn follow_target(&self, ctx: &EngineContext) -> Option<FollowTarget> {
        let anchor = self.selection.follow_anchor(&self.catalog)?;
        let body = self.catalog.body(anchor)?;
        let position = ctx.scene.world_position(&body.id)?;
        Some(FollowTarget {
            position,
            size: body.size,
        })
    }

    // ── Points ─────────────────────────────────────────────────────

    fn write_points(&self, points: &mut Vec<PointInstance>) {
        points.clear();
        if self.toggles.asteroid_belt {
            self.asteroid_belt.write_points(points);
        }
        if self.toggles.kuiper_belt {
            self.kuiper_belt.write_points(points);
        }

        for idx in 0..self.catalog.len() {
            if !self.hierarchy.is_visible(idx) {
                continue;
            }
            let selected = self.selection.is_highlighted(&self.catalog, idx);
            let [r, g, b] = if selected { ORBIT_SELECTED_COLOR } else { ORBIT_COLOR };
            let path = self.hierarchy.orbit_path(&self.catalog, idx, ORBIT_PATH_SEGMENTS);
            // The last point repeats the first
            points.extend(path.iter().skip(1).map(|p| PointInstance {
                x: p.x,
                y: p.y,
                z: p.z,
                size: ORBIT_DOT_SIZE,
                r,
                g,
                b,
                emissive: if selected { 1.0 } else { 0.0 },
            }));
        }
    }

    // ── Events ─────────────────────────────────────────────────────

    fn emit_events(&self, ctx: &mut EngineContext) {
        let index = |i: Option<usize>| i.map(|i| i as f32).unwrap_or(-1.0);
        let anchor = self.selection.follow_anchor(&self.catalog);

        ctx.emit_event(GameEvent::new(
            EVENT_CAMERA,
            self.camera.mode().code() as f32,
            flag(ctx.controls.is_interacting()),
            flag(ctx.controls.auto_rotate),
        ));
        ctx.emit_event(GameEvent::new(
            EVENT_SELECTION,
            index(self.selection.selected()),
            index(anchor),
            flag(self.settings_open),
        ));
        ctx.emit_event(GameEvent::new(
            EVENT_FEATURES,
            self.toggles.bits() as f32,
            flag(self.audio.enabled),
            flag(self.started),
        ));
        ctx.emit_event(GameEvent::new(
            EVENT_CLOCK,
            self.clock.elapsed() as f32,
            flag(self.clock.is_paused()),
            self.clock.time_scale() as f32,
        ));
        ctx.emit_event(GameEvent::new(
            EVENT_AUDIO,
            flag(self.audio.enabled && self.audio_unlocked),
            self.audio.background_volume,
            self.audio.ui_volume,
        ));
        ctx.emit_event(GameEvent::new(EVENT_HOVER, index(self.hovered), 0.0, 0.0));
    }
}

impl Default for Orrery {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for Orrery {
    fn config(&self) -> GameConfig {
        GameConfig {
            fixed_dt: 1.0 / 60.0,
            max_events: 64,
            camera_position: Vec3::new(0.0, 50.0, 150.0),
            controls: self.settings.controls,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        ctx.load_manifest(self.catalog.texture_manifest());
        self.hierarchy.evaluate(&self.catalog, self.clock.elapsed(), &self.toggles);
        self.sync_scene(ctx);
        log::info!(
            "orrery ready: {} bodies, {} textures pending",
            self.catalog.len(),
            ctx.textures.pending()
        );
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        let dt = ctx.dt;

        self.handle_input(ctx, input);

        // ── Simulation ───────────────────────────────────────────────
        let sim_dt = self.clock.advance(dt) as f32;
        self.hierarchy.evaluate(&self.catalog, self.clock.elapsed(), &self.toggles);
        self.hierarchy.advance_spin(&self.catalog, sim_dt);
        if self.toggles.asteroid_belt {
            self.asteroid_belt.advance(sim_dt);
        }
        if self.toggles.kuiper_belt {
            self.kuiper_belt.advance(sim_dt);
        }
        self.sync_scene(ctx);

        // ── Camera ───────────────────────────────────────────────────
        ctx.controls.auto_rotate =
            !self.selection.any() && !ctx.controls.is_interacting() && !self.intent.is_navigating();
        let target = self.follow_target(ctx);
        self.camera.tick(
            &mut ctx.camera,
            &mut ctx.controls,
            target,
            self.intent.direction(),
            dt,
        );

        self.write_points(&mut ctx.points);
        self.emit_events(ctx);
    }
}
