pub mod runner;

pub use runner::GameRunner;
pub use orrery_engine;
pub use js_sys;

/// Copy a float slice into a fresh JS `Float32Array`.
/// For small snapshots read once per frame; bulk data goes through pointers.
pub fn float_array(values: &[f32]) -> js_sys::Float32Array {
    js_sys::Float32Array::from(values)
}

/// Generate all `#[wasm_bindgen]` exports for an exhibit.
///
/// Generates:
/// - `thread_local!` storage for the GameRunner
/// - `with_runner()` helper function (returns `None` before `game_init`)
/// - All wasm-bindgen exports (game_init, game_tick, input handlers, data accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// mod game;
/// use game::MyExhibit;
///
/// orrery_web::export_game!(MyExhibit, "my-exhibit");
/// ```
///
/// # Arguments
///
/// - `$game_type`: The type implementing `orrery_engine::Game`, with a `new()` constructor
/// - `$game_name`: A string literal used in the initialization log message
#[macro_export]
macro_rules! export_game {
    ($game_type:ty, $game_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::GameRunner<$game_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::GameRunner<$game_type>) -> R) -> Option<R> {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                match borrow.as_mut() {
                    Some(runner) => Some(f(runner)),
                    None => {
                        log::warn!("{}: called before game_init()", $game_name);
                        None
                    }
                }
            })
        }

        fn push_input(event: $crate::orrery_engine::InputEvent) {
            with_runner(|r| r.push_input(event));
        }

        #[wasm_bindgen]
        pub fn game_init() {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let game = <$game_type>::new();
            let runner = $crate::GameRunner::new(game);

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });

            with_runner(|r| r.init());
            log::info!("{}: initialized", $game_name);
        }

        #[wasm_bindgen]
        pub fn game_tick(dt: f32) {
            with_runner(|r| r.tick(dt));
        }

        #[wasm_bindgen]
        pub fn game_resize(width: f32, height: f32) {
            with_runner(|r| r.resize(width, height));
        }

        #[wasm_bindgen]
        pub fn game_pointer_down(x: f32, y: f32) {
            push_input($crate::orrery_engine::InputEvent::PointerDown { x, y });
        }

        #[wasm_bindgen]
        pub fn game_pointer_up(x: f32, y: f32) {
            push_input($crate::orrery_engine::InputEvent::PointerUp { x, y });
        }

        #[wasm_bindgen]
        pub fn game_pointer_move(x: f32, y: f32) {
            push_input($crate::orrery_engine::InputEvent::PointerMove { x, y });
        }

        #[wasm_bindgen]
        pub fn game_wheel(delta: f32) {
            push_input($crate::orrery_engine::InputEvent::Wheel { delta });
        }

        #[wasm_bindgen]
        pub fn game_key_down(key: &str) {
            let key = $crate::orrery_engine::Key::from_dom(key);
            push_input($crate::orrery_engine::InputEvent::KeyDown { key });
        }

        #[wasm_bindgen]
        pub fn game_key_up(key: &str) {
            let key = $crate::orrery_engine::Key::from_dom(key);
            push_input($crate::orrery_engine::InputEvent::KeyUp { key });
        }

        #[wasm_bindgen]
        pub fn game_custom_event(kind: u32, a: f32, b: f32, c: f32) {
            push_input($crate::orrery_engine::InputEvent::Custom { kind, a, b, c });
        }

        #[wasm_bindgen]
        pub fn game_load_manifest(json: &str) {
            with_runner(|r| r.load_manifest(json));
        }

        #[wasm_bindgen]
        pub fn game_texture_loaded(key: &str, ok: bool) {
            with_runner(|r| r.report_texture(key, ok));
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_instances_ptr() -> *const f32 {
            with_runner(|r| r.instances_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_instance_count() -> u32 {
            with_runner(|r| r.instance_count()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_points_ptr() -> *const f32 {
            with_runner(|r| r.points_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_point_count() -> u32 {
            with_runner(|r| r.point_count()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_camera_ptr() -> *const f32 {
            with_runner(|r| r.camera_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_camera() -> $crate::js_sys::Float32Array {
            with_runner(|r| $crate::float_array(r.camera_block()))
                .unwrap_or_else(|| $crate::float_array(&[]))
        }

        #[wasm_bindgen]
        pub fn get_sound_events_ptr() -> *const u8 {
            with_runner(|r| r.sound_events_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_sound_events_len() -> u32 {
            with_runner(|r| r.sound_events_len()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_game_events_ptr() -> *const f32 {
            with_runner(|r| r.game_events_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_game_events_len() -> u32 {
            with_runner(|r| r.game_events_len()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_frame_counter() -> f64 {
            with_runner(|r| r.frame_counter()).unwrap_or(0.0)
        }

        // ---- Capacity accessors ----

        #[wasm_bindgen]
        pub fn get_max_bodies() -> u32 {
            with_runner(|r| r.max_bodies()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_max_points() -> u32 {
            with_runner(|r| r.max_points()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_max_sounds() -> u32 {
            with_runner(|r| r.max_sounds()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_max_events() -> u32 {
            with_runner(|r| r.max_events()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_buffer_total_floats() -> u32 {
            with_runner(|r| r.buffer_total_floats()).unwrap_or(0)
        }
    };
}
