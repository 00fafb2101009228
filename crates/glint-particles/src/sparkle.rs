//! Short-lived sparkles in a fixed-capacity arena with slot reuse

use glint_core::{Color, Vec3};

#[derive(Debug, Clone)]
pub struct Sparkle {
    pub position: Vec3,
    /// Remaining life in [0, 1]
    pub life: f32,
    /// Life lost per frame
    pub speed: f32,
    pub base_scale: f32,
    pub scale: f32,
    pub color: Color,
}

impl Sparkle {
    pub fn new(position: Vec3, speed: f32, base_scale: f32, color: Color) -> Self {
        Self {
            position,
            life: 1.0,
            speed,
            base_scale,
            scale: base_scale,
            color,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

/// Fixed slots plus a free list. Dead slots are recycled by later spawns,
/// so steady-state shimmer never reallocates.
pub struct SparkleArena {
    slots: Vec<Option<Sparkle>>,
    free: Vec<usize>,
    active: usize,
}

impl SparkleArena {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
            // Reversed so spawns fill low slots first
            free: (0..capacity).rev().collect(),
            active: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.active
    }

    /// Place a sparkle in a free slot. Returns None if the arena is full.
    pub fn spawn(&mut self, sparkle: Sparkle) -> Option<usize> {
        let slot = self.free.pop()?;
        self.slots[slot] = Some(sparkle);
        self.active += 1;
        Some(slot)
    }

    /// Age every live sparkle by one frame and release the ones that died
    pub fn age_all(&mut self) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            let Some(sparkle) = slot else {
                continue;
            };
            sparkle.life = (sparkle.life - sparkle.speed).max(0.0);
            sparkle.scale = sparkle.base_scale * sparkle.life;
            if !sparkle.is_alive() {
                *slot = None;
                self.free.push(index);
                self.active -= 1;
            }
        }
    }

    pub fn get(&self, slot: usize) -> Option<&Sparkle> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    pub fn active(&self) -> impl Iterator<Item = &Sparkle> {
        self.slots.iter().flatten()
    }

    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|s| *s = None);
        self.free = (0..self.slots.len()).rev().collect();
        self.active = 0;
    }
}
