use bytemuck::{Pod, Zeroable};

/// Unique identifier for a mounted node in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

/// A UI sound cue emitted by the exhibit logic.
/// The numeric value maps to a cue in the host page's audio wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct SoundEvent(pub u32);

/// A numeric event communicated from Rust to the host page each frame.
/// `kind` identifies the event, `a/b/c` carry the payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;

    pub fn new(kind: f32, a: f32, b: f32, c: f32) -> Self {
        Self { kind, a, b, c }
    }
}

/// Encode a boolean as the 0.0 / 1.0 payload convention used by game events.
#[inline]
pub fn flag(value: bool) -> f32 {
    if value { 1.0 } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_event_is_four_floats() {
        assert_eq!(std::mem::size_of::<GameEvent>(), GameEvent::FLOATS * 4);
    }

    #[test]
    fn flag_encoding() {
        assert_eq!(flag(true), 1.0);
        assert_eq!(flag(false), 0.0);
    }
}
