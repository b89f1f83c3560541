/// Decorative particle belts: deterministic ring-shaped fields that slowly
/// spin about the Y axis while visible.

use glam::{Quat, Vec3};
use orrery_engine::{PointInstance, REFERENCE_DT};

use crate::bodies::unit_hash;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeltSpec {
    pub count: usize,
    pub inner_radius: f32,
    pub outer_radius: f32,
    /// Particles scatter ±height around the plane.
    pub height: f32,
    /// Extra per-particle tilt, ±inclination (fraction of the radius).
    pub inclination: f32,
    pub min_size: f32,
    pub max_size: f32,
    pub color: [f32; 3],
    pub emissive: f32,
    /// Radians per reference tick.
    pub spin_per_tick: f32,
    pub seed: u32,
}

pub const ASTEROID_BELT: BeltSpec = BeltSpec {
    count: 1500,
    inner_radius: 50.0,
    outer_radius: 68.0,
    height: 1.5,
    inclination: 0.0,
    min_size: 0.05 * 0.2,
    max_size: 0.2 * 0.2,
    color: [0.36, 0.30, 0.25],
    emissive: 0.0,
    spin_per_tick: 1.0e-4,
    seed: 0xA57E,
};

pub const KUIPER_BELT: BeltSpec = BeltSpec {
    count: 2000,
    inner_radius: 160.0,
    outer_radius: 220.0,
    height: 5.0,
    inclination: 0.2,
    min_size: 0.1 * 0.2,
    max_size: 0.3 * 0.2,
    color: [0.63, 0.75, 1.0],
    emissive: 0.1,
    spin_per_tick: 5.0e-5,
    seed: 0x4B1F,
};

/// A generated belt. Particle positions are fixed; only the belt angle moves.
#[derive(Debug, Clone)]
pub struct ParticleField {
    pub spec: BeltSpec,
    particles: Vec<(Vec3, f32)>,
    angle: f32,
}

impl ParticleField {
    pub fn generate(spec: BeltSpec) -> Self {
        let mut particles = Vec::with_capacity(spec.count);
        let span = |lo: f32, hi: f32, u: f32| lo + (hi - lo) * u;
        for i in 0..spec.count as u32 {
            let base = spec.seed.wrapping_add(i.wrapping_mul(5));
            let angle = unit_hash(base) * std::f32::consts::TAU;
            let radius = span(spec.inner_radius, spec.outer_radius, unit_hash(base + 1));
            let tilt = span(-spec.inclination, spec.inclination, unit_hash(base + 2));
            let lift = span(-spec.height, spec.height, unit_hash(base + 3));
            let size = span(spec.min_size, spec.max_size, unit_hash(base + 4));

            let pos = Vec3::new(
                angle.cos() * radius,
                angle.sin() * radius * tilt + lift,
                angle.sin() * radius,
            );
            particles.push((pos, size));
        }
        Self {
            spec,
            particles,
            angle: 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Spin by `sim_dt` simulation seconds.
    pub fn advance(&mut self, sim_dt: f32) {
        self.angle = (self.angle + self.spec.spin_per_tick * sim_dt / REFERENCE_DT)
            .rem_euclid(std::f32::consts::TAU);
    }

    /// Append the rotated particles as point sprites.
    pub fn write_points(&self, out: &mut Vec<PointInstance>) {
        let rotation = Quat::from_rotation_y(self.angle);
        let [r, g, b] = self.spec.color;
        out.extend(self.particles.iter().map(|&(pos, size)| {
            let p = rotation * pos;
            PointInstance {
                x: p.x,
                y: p.y,
                z: p.z,
                size,
                r,
                g,
                b,
                emissive: self.spec.emissive,
            }
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asteroid_belt_stays_in_its_ring() {
        let field = ParticleField::generate(ASTEROID_BELT);
        assert_eq!(field.len(), 1500);
        for &(p, size) in &field.particles {
            let r = (p.x * p.x + p.z * p.z).sqrt();
            assert!((50.0 - 1e-3..=68.0 + 1e-3).contains(&r), "radius {r}");
            assert!(p.y.abs() <= 1.5 + 1e-4);
            assert!(size > 0.0);
        }
    }

    #[test]
    fn kuiper_belt_is_thicker() {
        let field = ParticleField::generate(KUIPER_BELT);
        assert_eq!(field.len(), 2000);
        let max_lift = field.particles.iter().map(|(p, _)| p.y.abs()).fold(0.0, f32::max);
        // ±5 scatter plus up to 0.2 · 220 of tilt
        assert!(max_lift <= 5.0 + 0.2 * 220.0 + 1e-3);
        assert!(max_lift > 5.0);
    }

    #[test]
    fn generation_is_deterministic() {
        let a = ParticleField::generate(ASTEROID_BELT);
        let b = ParticleField::generate(ASTEROID_BELT);
        assert_eq!(a.particles, b.particles);
    }

    #[test]
    fn spins_slowly_about_y() {
        let mut field = ParticleField::generate(ASTEROID_BELT);
        for _ in 0..100 {
            field.advance(REFERENCE_DT);
        }
        assert!((field.angle() - 0.01).abs() < 1e-5);

        let mut points = Vec::new();
        field.write_points(&mut points);
        assert_eq!(points.len(), field.len());
        let (p0, _) = field.particles[0];
        let q = Vec3::new(points[0].x, points[0].y, points[0].z);
        assert!((q.length() - p0.length()).abs() < 1e-3);
        assert!((q.y - p0.y).abs() < 1e-4);
    }
}
