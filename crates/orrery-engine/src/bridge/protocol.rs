/// Shared buffer layout.
/// Must stay in sync with TypeScript `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Camera: 24 floats]  view-projection (16), eye xyzw (4), target xyzw (4)
/// [Bodies: max_bodies × 12 floats]
/// [Points: max_points × 8 floats]
/// [Sounds: max_sounds × 1 float]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written once into the header at init.
/// TypeScript reads them from the header to compute offsets dynamically.

use crate::api::game::GameConfig;
use crate::api::types::GameEvent;
use crate::renderer::instance::{BodyInstance, PointInstance};

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_LOCK: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_PROTOCOL_VERSION: usize = 2;
pub const HEADER_MAX_BODIES: usize = 3;
pub const HEADER_BODY_COUNT: usize = 4;
pub const HEADER_MAX_POINTS: usize = 5;
pub const HEADER_POINT_COUNT: usize = 6;
pub const HEADER_MAX_SOUNDS: usize = 7;
pub const HEADER_SOUND_COUNT: usize = 8;
pub const HEADER_MAX_EVENTS: usize = 9;
pub const HEADER_EVENT_COUNT: usize = 10;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 2.0;

/// Floats in the camera block (fixed wire format).
pub const CAMERA_FLOATS: usize = 24;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_bodies: usize,
    pub max_points: usize,
    pub max_sounds: usize,
    pub max_events: usize,

    /// Offset (in floats) where the camera block begins.
    pub camera_offset: usize,
    /// Offset (in floats) where body instances begin.
    pub body_data_offset: usize,
    /// Offset (in floats) where point instances begin.
    pub point_data_offset: usize,
    /// Offset (in floats) where sound data begins.
    pub sound_data_offset: usize,
    /// Offset (in floats) where event data begins.
    pub event_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_bodies: usize, max_points: usize, max_sounds: usize, max_events: usize) -> Self {
        let camera_offset = HEADER_FLOATS;
        let body_data_offset = camera_offset + CAMERA_FLOATS;
        let point_data_offset = body_data_offset + max_bodies * BodyInstance::FLOATS;
        let sound_data_offset = point_data_offset + max_points * PointInstance::FLOATS;
        let event_data_offset = sound_data_offset + max_sounds;
        let buffer_total_floats = event_data_offset + max_events * GameEvent::FLOATS;

        Self {
            max_bodies,
            max_points,
            max_sounds,
            max_events,
            camera_offset,
            body_data_offset,
            point_data_offset,
            sound_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    /// Compute layout from a GameConfig.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.max_bodies, config.max_points, config.max_sounds, config.max_events)
    }
}
