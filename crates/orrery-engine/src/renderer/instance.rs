use bytemuck::{Pod, Zeroable};

/// Per-body render data written to the shared buffer for the TypeScript renderer.
/// Must match the TypeScript protocol: 12 floats = 48 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct BodyInstance {
    /// World-space position.
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Sphere radius after hover scaling.
    pub radius: f32,
    /// Orbital-frame orientation quaternion.
    pub qx: f32,
    pub qy: f32,
    pub qz: f32,
    pub qw: f32,
    /// Self-rotation about the local Y axis in radians.
    pub spin: f32,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub opacity: f32,
    /// Emissive highlight intensity.
    pub emissive: f32,
    /// Texture slot in the asset manifest.
    pub texture: f32,
}

impl BodyInstance {
    pub const FLOATS: usize = 12;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// A single point sprite (belt debris and similar decoration).
/// 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct PointInstance {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub size: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// Emissive intensity.
    pub emissive: f32,
}

impl PointInstance {
    pub const FLOATS: usize = 8;
}

/// Render buffer containing one instance per visible mounted body.
pub struct RenderBuffer {
    pub instances: Vec<BodyInstance>,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: BodyInstance) {
        self.instances.push(instance);
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to instance data for shared-buffer reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    /// Instance data as a flat float slice.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_instance_is_12_floats() {
        assert_eq!(std::mem::size_of::<BodyInstance>(), BodyInstance::STRIDE_BYTES);
        assert_eq!(BodyInstance::FLOATS, 12);
    }

    #[test]
    fn point_instance_is_8_floats() {
        assert_eq!(std::mem::size_of::<PointInstance>(), PointInstance::FLOATS * 4);
    }

    #[test]
    fn render_buffer_push_and_count() {
        let mut buf = RenderBuffer::new();
        buf.push(BodyInstance::default());
        buf.push(BodyInstance { x: 2.0, ..Default::default() });
        assert_eq!(buf.instance_count(), 2);
        assert_eq!(buf.as_floats().len(), 24);
        assert_eq!(buf.as_floats()[12], 2.0);
    }
}
