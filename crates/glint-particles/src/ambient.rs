//! Background snow field

use crate::config::AmbientParams;
use crate::rand::ParticleRng;
use glint_core::Vec3;

#[derive(Debug, Clone)]
pub struct Snowflake {
    /// Private drift clock, advanced by `speed` per second
    pub time: f32,
    pub factor: f32,
    pub speed: f32,
    pub origin: Vec3,
    pub position: Vec3,
}

/// Fixed-size pool of drifting flakes with constant scale
pub struct AmbientField {
    flakes: Vec<Snowflake>,
    scale: f32,
}

impl AmbientField {
    pub fn new(params: &AmbientParams, rng: &mut ParticleRng) -> Self {
        let half = Vec3::new(params.extent, params.extent, params.extent);
        let flakes = (0..params.count)
            .map(|_| {
                let time = rng.range(0.0, 100.0);
                let factor = rng.range(params.factor_min, params.factor_max);
                let speed = rng.range(params.speed_min, params.speed_max);
                let origin = rng.box_point(half);
                let mut flake = Snowflake {
                    time,
                    factor,
                    speed,
                    origin,
                    position: origin,
                };
                flake.position = drift(&flake);
                flake
            })
            .collect();
        Self {
            flakes,
            scale: params.scale,
        }
    }

    pub fn step(&mut self, dt_s: f32) {
        for flake in &mut self.flakes {
            flake.time += flake.speed * dt_s;
            flake.position = drift(flake);
        }
    }

    pub fn len(&self) -> usize {
        self.flakes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flakes.is_empty()
    }

    pub fn flakes(&self) -> &[Snowflake] {
        &self.flakes
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }
}

fn drift(flake: &Snowflake) -> Vec3 {
    let t = flake.time;
    let f = flake.factor;
    Vec3::new(
        flake.origin.x + ((t / 10.0) * f).cos() + (t.sin() * f) / 10.0,
        flake.origin.y + ((t / 10.0) * f).sin() + ((t * 2.0).cos() * f) / 10.0,
        t.cos() + t.sin() / 10.0,
    )
}
