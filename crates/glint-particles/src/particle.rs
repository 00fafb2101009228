//! Particle types: per-slot simulation state and GPU instance data

use crate::config::SceneConfig;
use crate::rand::ParticleRng;
use bytemuck::{Pod, Zeroable};
use glint_core::{Color, Vec3};
use serde::Serialize;
use std::f32::consts::TAU;

/// A particle's own stage, which can lag the global phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum IndividualPhase {
    Entry,
    Following,
    Dispersing,
}

/// Fixed position of a particle relative to the swarm centroid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormationOffset {
    pub angle: f32,
    pub radius: f32,
    pub x: f32,
    pub y: f32,
    /// Index fraction `i / count`, the particle's place in the stagger
    pub delay_factor: f32,
}

impl FormationOffset {
    fn for_slot(index: usize, count: usize, base_radius: f32, growth: f32) -> Self {
        let delay_factor = index as f32 / count as f32;
        let angle = delay_factor * TAU;
        // Later starters fly wider
        let radius = base_radius + delay_factor * growth;
        Self {
            angle,
            radius,
            x: angle.cos() * radius,
            y: angle.sin() * radius,
            delay_factor,
        }
    }

    pub fn scaled(&self, scale: f32) -> Vec3 {
        Vec3::new(self.x * scale, self.y * scale, 0.0)
    }
}

/// CPU-side glitter state (not sent to GPU)
#[derive(Debug, Clone)]
pub struct GlitterParticle {
    pub position: Vec3,
    pub scale: f32,
    pub delay_ms: f64,
    /// Entry progress in [0, 1], never decreasing
    pub entry_progress: f32,
    pub acceleration: f32,
    pub formation: FormationOffset,
    pub phase: IndividualPhase,
    /// Continuous index into the wave path samples
    pub path_index: f32,
    pub path_speed: f32,
    /// Seconds spent following the wave
    pub follow_s: f32,
    pub spread_target: Vec3,
    pub spread_speed: f32,
    /// Dispersal progress in [0, 1], never decreasing
    pub spread_progress: f32,
    pub base_color: Color,
    pub sparkle_phase: f32,
    pub sparkle_speed: f32,
    /// Shimmered color for the current frame
    pub color: Color,
}

/// Fixed-size glitter pool, sorted by start delay
pub struct GlitterPool {
    particles: Vec<GlitterParticle>,
}

impl GlitterPool {
    pub fn new(config: &SceneConfig, rng: &mut ParticleRng) -> Self {
        let count = config.particle_count;
        let g = &config.glitter;
        let stagger_ms = config.entry_duration_ms * config.stagger_fraction;
        let entry = Vec3::from_array(config.entry_point);

        let mut particles: Vec<GlitterParticle> = (0..count)
            .map(|i| {
                let formation =
                    FormationOffset::for_slot(i, count, g.formation_radius, g.formation_growth);
                GlitterParticle {
                    position: entry + formation.scaled(1.0),
                    scale: rng.range(g.scale_min, g.scale_max),
                    delay_ms: formation.delay_factor as f64 * stagger_ms,
                    entry_progress: 0.0,
                    acceleration: rng.range(g.acceleration_min, g.acceleration_max),
                    formation,
                    phase: IndividualPhase::Entry,
                    path_index: 0.0,
                    path_speed: rng.range(g.path_speed_min, g.path_speed_max),
                    follow_s: 0.0,
                    spread_target: rng.ring_point(
                        g.spread_radius_min,
                        g.spread_radius_max,
                        g.spread_depth,
                    ),
                    spread_speed: rng.range(g.spread_speed_min, g.spread_speed_max),
                    spread_progress: 0.0,
                    base_color: config.palette.glitter,
                    sparkle_phase: rng.angle(),
                    sparkle_speed: rng.range(g.shimmer_speed_min, g.shimmer_speed_max),
                    color: config.palette.glitter,
                }
            })
            .collect();

        // Already in order by construction; keep the invariant explicit
        particles.sort_by(|a, b| a.delay_ms.total_cmp(&b.delay_ms));

        Self { particles }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[GlitterParticle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [GlitterParticle] {
        &mut self.particles
    }

    /// Number of particles in each individual phase: (entry, following, dispersing)
    pub fn phase_counts(&self) -> (usize, usize, usize) {
        self.particles
            .iter()
            .fold((0, 0, 0), |(e, f, d), p| match p.phase {
                IndividualPhase::Entry => (e + 1, f, d),
                IndividualPhase::Following => (e, f + 1, d),
                IndividualPhase::Dispersing => (e, f, d + 1),
            })
    }
}

/// GPU instance data, one slot of the instanced draw buffer.
/// 32 bytes (2 rows of vec4).
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable, Serialize)]
pub struct ParticleInstance {
    /// xyz = position, w = uniform scale
    pub pos_scale: [f32; 4],
    /// rgba
    pub color: [f32; 4],
}

impl ParticleInstance {
    pub fn new(position: Vec3, scale: f32, color: Color) -> Self {
        Self {
            pos_scale: [position.x, position.y, position.z, scale],
            color: color.to_array(),
        }
    }

    pub fn from_glitter(p: &GlitterParticle, opacity: f32) -> Self {
        Self::new(p.position, p.scale, p.color.with_alpha(opacity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(count: usize, seed: u32) -> GlitterPool {
        let config = SceneConfig {
            particle_count: count,
            ..SceneConfig::default()
        };
        GlitterPool::new(&config, &mut ParticleRng::new(seed))
    }

    #[test]
    fn delays_are_staggered_and_sorted() {
        let pool = pool(100, 42);
        assert_eq!(pool.len(), 100);
        let delays: Vec<f64> = pool.particles().iter().map(|p| p.delay_ms).collect();
        assert_eq!(delays[0], 0.0);
        assert!(delays.windows(2).all(|w| w[0] <= w[1]));
        // 1/3 of 4500 ms, last slot one step short of it
        assert!((delays[99] - 1485.0).abs() < 0.5);
    }

    #[test]
    fn formation_radius_grows_with_delay() {
        let pool = pool(10, 1);
        let first = pool.particles()[0].formation;
        let last = pool.particles()[9].formation;
        assert!((first.radius - 0.2).abs() < 1e-6);
        assert!(last.radius > first.radius);
        assert!((last.radius - (0.2 + 0.9 * 0.6)).abs() < 1e-5);
    }

    #[test]
    fn same_seed_same_layout() {
        let a = pool(50, 9);
        let b = pool(50, 9);
        for (pa, pb) in a.particles().iter().zip(b.particles()) {
            assert_eq!(pa.spread_target, pb.spread_target);
            assert_eq!(pa.scale, pb.scale);
        }
        let c = pool(50, 10);
        assert_ne!(a.particles()[3].spread_target, c.particles()[3].spread_target);
    }

    #[test]
    fn starts_in_entry_around_entry_point() {
        let pool = pool(20, 3);
        assert_eq!(pool.phase_counts(), (20, 0, 0));
        let entry = Vec3::new(4.0, -4.0, 0.0);
        for p in pool.particles() {
            assert!(p.position.distance(&entry) <= 0.8 + 1e-4);
            assert_eq!(p.entry_progress, 0.0);
        }
    }

    #[test]
    fn particle_instance_layout() {
        assert_eq!(std::mem::size_of::<ParticleInstance>(), 32);
        assert_eq!(std::mem::align_of::<ParticleInstance>(), 4);
        let inst = ParticleInstance::new(Vec3::new(1.0, 2.0, 3.0), 0.5, Color::WHITE);
        let bytes: &[u8] = bytemuck::bytes_of(&inst);
        assert_eq!(bytes.len(), 32);
        assert_eq!(inst.pos_scale, [1.0, 2.0, 3.0, 0.5]);
        let first: [f32; 4] = bytemuck::pod_read_unaligned(&bytes[..16]);
        assert_eq!(first, inst.pos_scale);
    }
}
