use orrery_engine::{
    Game, GameConfig, EngineContext,
    InputEvent, InputQueue, RenderBuffer, AssetManifest,
    FixedTimestep, ProtocolLayout, CAMERA_FLOATS,
};
use orrery_engine::systems::render::build_render_buffer;

/// Generic game runner that wires up the engine loop.
///
/// Each concrete exhibit creates a `thread_local!` GameRunner
/// and exports free functions via `#[wasm_bindgen]`, because wasm-bindgen
/// cannot export generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    render_buffer: RenderBuffer,
    timestep: FixedTimestep,
    config: GameConfig,
    layout: ProtocolLayout,
    initialized: bool,
    /// Flat buffer of sound event IDs for SharedArrayBuffer reads.
    sound_buffer: Vec<u8>,
    /// View-projection (16), eye xyzw (4), look-target xyzw (4).
    camera_block: [f32; CAMERA_FLOATS],
    frame_counter: u64,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let timestep = FixedTimestep::new(config.fixed_dt);
        let layout = ProtocolLayout::from_config(&config);

        let render_buffer = RenderBuffer::with_capacity(config.max_bodies);
        let sound_buffer = Vec::with_capacity(config.max_sounds);

        Self {
            game,
            ctx: EngineContext::with_config(&config),
            input: InputQueue::new(),
            render_buffer,
            timestep,
            layout,
            config,
            initialized: false,
            sound_buffer,
            camera_block: [0.0; CAMERA_FLOATS],
            frame_counter: 0,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.config = self.game.config();
        self.layout = ProtocolLayout::from_config(&self.config);
        self.timestep = FixedTimestep::new(self.config.fixed_dt);
        self.game.init(&mut self.ctx);
        self.pack_camera();
        self.initialized = true;
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame tick: fixed-step updates, then pack everything the host reads.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        let steps = self.timestep.accumulate(dt);
        for _ in 0..steps {
            self.game.update(&mut self.ctx, &self.input);
            // Each event is seen by exactly one step
            self.input.drain();
        }

        build_render_buffer(self.ctx.scene.iter(), &mut self.render_buffer, self.config.max_bodies);

        if self.ctx.points.len() > self.config.max_points {
            log::warn!(
                "point buffer full ({} points), dropping {}",
                self.config.max_points,
                self.ctx.points.len() - self.config.max_points
            );
            self.ctx.points.truncate(self.config.max_points);
        }
        if self.ctx.events.len() > self.config.max_events {
            self.ctx.events.truncate(self.config.max_events);
        }

        // Pack sound events into flat buffer
        self.sound_buffer.clear();
        for sound in self.ctx.sounds.iter().take(self.config.max_sounds) {
            self.sound_buffer.push(sound.0 as u8);
        }

        self.pack_camera();
        self.frame_counter += 1;
    }

    fn pack_camera(&mut self) {
        let uniform = self.ctx.camera.uniform();
        let target = self.ctx.controls.target;
        let matrix = uniform.view_projection.iter().flatten();
        for (slot, value) in self.camera_block.iter_mut().zip(matrix) {
            *slot = *value;
        }
        self.camera_block[16..20].copy_from_slice(&uniform.eye);
        self.camera_block[20..24].copy_from_slice(&[target.x, target.y, target.z, 1.0]);
    }

    /// Parse and install an asset manifest. Malformed JSON is logged and ignored.
    pub fn load_manifest(&mut self, json: &str) {
        match AssetManifest::from_json(json) {
            Ok(manifest) => {
                log::info!(
                    "asset manifest: {} textures, {} sounds",
                    manifest.textures.len(),
                    manifest.sounds.len()
                );
                self.ctx.load_manifest(manifest);
            }
            Err(e) => log::error!("invalid asset manifest: {}", e),
        }
    }

    /// Record the outcome of one texture load.
    pub fn report_texture(&mut self, key: &str, ok: bool) {
        self.ctx.textures.report(key, ok);
    }

    /// Viewport size changed.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.ctx.camera.resize(width, height);
        self.pack_camera();
    }

    // ---- Direct access for exhibit-specific exports ----

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    pub fn ctx(&self) -> &EngineContext {
        &self.ctx
    }

    /// Game and engine context together, for exports that need both.
    pub fn parts_mut(&mut self) -> (&mut G, &mut EngineContext) {
        (&mut self.game, &mut self.ctx)
    }

    // ---- Pointer accessors for SharedArrayBuffer reads ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }

    pub fn points_ptr(&self) -> *const f32 {
        self.ctx.points.as_ptr() as *const f32
    }

    pub fn point_count(&self) -> u32 {
        self.ctx.points.len() as u32
    }

    pub fn camera_ptr(&self) -> *const f32 {
        self.camera_block.as_ptr()
    }

    pub fn camera_block(&self) -> &[f32] {
        &self.camera_block
    }

    pub fn sound_events_ptr(&self) -> *const u8 {
        self.sound_buffer.as_ptr()
    }

    pub fn sound_events_len(&self) -> u32 {
        self.sound_buffer.len() as u32
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn frame_counter(&self) -> f64 {
        self.frame_counter as f64
    }

    // ---- Capacity accessors (read by TypeScript via wasm_bindgen exports) ----

    pub fn max_bodies(&self) -> u32 {
        self.layout.max_bodies as u32
    }

    pub fn max_points(&self) -> u32 {
        self.layout.max_points as u32
    }

    pub fn max_sounds(&self) -> u32 {
        self.layout.max_sounds as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}
