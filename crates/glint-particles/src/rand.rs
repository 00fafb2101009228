//! Seedable xorshift32 PRNG, passed explicitly into every construction routine

use glint_core::Vec3;
use std::f32::consts::TAU;

#[derive(Clone, Debug)]
pub struct ParticleRng {
    state: u32,
}

impl ParticleRng {
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Returns a float in [0, 1)
    pub fn next_f32(&mut self) -> f32 {
        // 24 high bits keep the result strictly below 1.0 in f32
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Returns a float in [min, max)
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// Returns an angle in [0, 2π)
    pub fn angle(&mut self) -> f32 {
        self.next_f32() * TAU
    }

    /// True with probability `p`
    pub fn chance(&mut self, p: f32) -> bool {
        self.next_f32() < p
    }

    /// Point on a ring of radius in [radius_min, radius_max) in the XY plane,
    /// with z uniform in [-depth / 2, depth / 2)
    pub fn ring_point(&mut self, radius_min: f32, radius_max: f32, depth: f32) -> Vec3 {
        let angle = self.angle();
        let radius = self.range(radius_min, radius_max);
        Vec3::new(
            angle.cos() * radius,
            angle.sin() * radius,
            (self.next_f32() - 0.5) * depth,
        )
    }

    /// Point uniform in the axis-aligned box [-half, half)
    pub fn box_point(&mut self, half: Vec3) -> Vec3 {
        Vec3::new(
            self.range(-half.x, half.x),
            self.range(-half.y, half.y),
            self.range(-half.z, half.z),
        )
    }
}
