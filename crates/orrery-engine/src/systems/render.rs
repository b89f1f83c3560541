use crate::components::entity::Entity;
use crate::renderer::instance::{BodyInstance, RenderBuffer};

/// Build the render buffer from a set of entities.
/// Inactive entities and anything beyond `max_instances` are skipped.
pub fn build_render_buffer<'a>(
    entities: impl Iterator<Item = &'a Entity>,
    buffer: &mut RenderBuffer,
    max_instances: usize,
) {
    buffer.clear();

    for entity in entities.filter(|e| e.active) {
        if buffer.instances.len() >= max_instances {
            log::warn!("render buffer full ({} instances), dropping '{}'", max_instances, entity.tag);
            break;
        }
        let q = entity.orientation;
        let look = &entity.appearance;
        buffer.push(BodyInstance {
            x: entity.pos.x,
            y: entity.pos.y,
            z: entity.pos.z,
            radius: entity.effective_radius(),
            qx: q.x,
            qy: q.y,
            qz: q.z,
            qw: q.w,
            spin: entity.spin,
            opacity: look.opacity,
            emissive: look.emissive,
            texture: look.texture as f32,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::EntityId;
    use crate::components::entity::Appearance;
    use glam::Vec3;

    #[test]
    fn build_buffer_copies_pose_and_appearance() {
        let entities = vec![
            Entity::new(EntityId(1))
                .with_pos(Vec3::new(10.0, 20.0, 30.0))
                .with_radius(2.0)
                .with_appearance(Appearance { scale: 1.05, opacity: 0.3, ..Default::default() }),
            Entity::new(EntityId(2)).with_pos(Vec3::new(-1.0, 0.0, 0.0)),
        ];

        let mut buffer = RenderBuffer::new();
        build_render_buffer(entities.iter(), &mut buffer, 64);

        assert_eq!(buffer.instance_count(), 2);
        let first = buffer.instances[0];
        assert_eq!((first.x, first.y, first.z), (10.0, 20.0, 30.0));
        assert!((first.radius - 2.1).abs() < 1e-5);
        assert_eq!(first.opacity, 0.3);
        assert_eq!(first.qw, 1.0);
    }

    #[test]
    fn inactive_entities_are_skipped() {
        let mut entity = Entity::new(EntityId(1));
        entity.active = false;

        let entities = vec![entity];
        let mut buffer = RenderBuffer::new();
        build_render_buffer(entities.iter(), &mut buffer, 64);
        assert_eq!(buffer.instance_count(), 0);
    }

    #[test]
    fn capacity_is_respected() {
        let entities: Vec<Entity> = (0..5).map(|i| Entity::new(EntityId(i))).collect();
        let mut buffer = RenderBuffer::new();
        build_render_buffer(entities.iter(), &mut buffer, 3);
        assert_eq!(buffer.instance_count(), 3);
    }
}
